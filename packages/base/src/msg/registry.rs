use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Uint128};
use cw_ownable::{cw_ownable_execute, cw_ownable_query};
use fridge_helpers::pause::PauseInfoResponse;

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    pub platform: String,
    pub forwarder: Option<String>,
    pub price_denom: String,
}

#[cw_ownable_execute]
#[cw_serde]
pub enum ExecuteMsg {
    CreateArtwork {
        max_supply: Uint128,
        artist: String,
        price: Uint128,
        uri: String,
    },
    /// Direct mint, paid in `price_denom` attached to the message.
    Mint {
        to: String,
        token_id: u64,
        amount: Uint128,
    },
    /// Platform-paid mint, callable by the platform relay only.
    MintSponsored {
        to: String,
        token_id: u64,
        amount: Uint128,
    },
    /// Deprecated alias of MintSponsored kept for older platform clients.
    MintByPlatform {
        to: String,
        token_id: u64,
        amount: Uint128,
    },
    /// Meta-transaction entry point, callable by the trusted forwarder only.
    /// `msg` is re-dispatched with `sender` as the logical caller.
    Forwarded {
        sender: String,
        msg: Binary,
    },
    UpdatePrice {
        token_id: u64,
        price: Uint128,
    },
    UpdateArtist {
        token_id: u64,
        artist: String,
    },
    UpdateConfig {
        platform: Option<String>,
        forwarder: Option<String>,
    },
    Pause {},
    Unpause {},
}

#[cw_ownable_query]
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},
    #[returns(PauseInfoResponse)]
    PauseInfo {},
    #[returns(ArtworkResponse)]
    Artwork { token_id: u64 },
    #[returns(Vec<ArtworkResponse>)]
    Artworks {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    #[returns(BalanceResponse)]
    Balance { address: String, token_id: u64 },
}

#[cw_serde]
pub struct ConfigResponse {
    pub platform: String,
    pub forwarder: Option<String>,
    pub price_denom: String,
}

#[cw_serde]
pub struct ArtworkResponse {
    pub token_id: u64,
    pub uri: String,
    pub max_supply: Uint128,
    pub current_supply: Uint128,
    pub price: Uint128,
    pub artist: String,
    pub is_one_of_one: bool,
    pub sold_out: bool,
}

#[cw_serde]
pub struct BalanceResponse {
    pub balance: Uint128,
}

#[cw_serde]
pub struct MigrateMsg {}
