use cosmwasm_std::{StdError, Uint128};
use cw_ownable::OwnershipError;
use cw_utils::PaymentError;
use fridge_helpers::pause::PauseError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    OwnershipError(#[from] OwnershipError),

    #[error("{0}")]
    PaymentError(#[from] PaymentError),

    #[error("{0}")]
    PauseError(#[from] PauseError),

    #[error("unauthorized")]
    Unauthorized {},

    #[error("unknown token id: {token_id}")]
    UnknownToken { token_id: u64 },

    #[error("max supply must not be zero")]
    ZeroMaxSupply {},

    #[error("nothing to mint")]
    NothingToMint {},

    #[error("exceeds max supply")]
    SupplyExceeded {},

    #[error("insufficient payment: required {required}, sent {sent}")]
    InsufficientPayment { required: Uint128, sent: Uint128 },

    #[error("price calculation overflow")]
    Overflow {},

    #[error("Semver parsing error: {0}")]
    SemVer(String),
}

impl From<semver::Error> for ContractError {
    fn from(err: semver::Error) -> Self {
        Self::SemVer(err.to_string())
    }
}

pub type ContractResult<T> = Result<T, ContractError>;
