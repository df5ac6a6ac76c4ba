use cosmwasm_schema::cw_serde;
use cosmwasm_std::{StdError, StdResult, Storage};
use cw_storage_plus::Item;
use thiserror::Error;

const PAUSED: Item<bool> = Item::new("paused");

#[cw_serde]
pub enum PauseInfoResponse {
    Paused {},
    Unpaused {},
}

#[derive(Error, Debug, PartialEq)]
pub enum PauseError {
    #[error("Contract execution is paused")]
    Paused {},

    #[error("{0}")]
    Std(#[from] StdError),
}

pub fn is_paused(storage: &dyn Storage) -> StdResult<bool> {
    Ok(PAUSED.may_load(storage)?.unwrap_or(false))
}

pub fn set_pause(storage: &mut dyn Storage) -> StdResult<()> {
    PAUSED.save(storage, &true)
}

pub fn unpause(storage: &mut dyn Storage) {
    PAUSED.remove(storage)
}

pub fn pause_guard(storage: &dyn Storage) -> Result<(), PauseError> {
    if is_paused(storage)? {
        return Err(PauseError::Paused {});
    }
    Ok(())
}
