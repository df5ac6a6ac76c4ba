use cosmwasm_std::{StdError, VerificationError};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Verification(#[from] VerificationError),

    #[error("invalid bech32 prefix")]
    InvalidPrefix {},

    #[error("invalid signature")]
    InvalidSignature {},

    #[error("nonce mismatch: expected {expected}, actual {actual}")]
    NonceMismatch { expected: u64, actual: u64 },

    #[error("attached funds do not match the signed request")]
    FundsMismatch {},

    #[error("Semver parsing error: {0}")]
    SemVer(String),
}

impl From<semver::Error> for ContractError {
    fn from(err: semver::Error) -> Self {
        Self::SemVer(err.to_string())
    }
}

pub type ContractResult<T> = Result<T, ContractError>;
