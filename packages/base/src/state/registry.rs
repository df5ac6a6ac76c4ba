use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    /// Address allowed to mint on the platform's dime.
    pub platform: Addr,
    /// Trusted meta-transaction forwarder, if any.
    pub forwarder: Option<Addr>,
    /// Native denom direct mints are priced in.
    pub price_denom: String,
}

#[cw_serde]
pub struct Artwork {
    pub max_supply: Uint128,
    pub current_supply: Uint128,
    pub price: Uint128,
    pub artist: Addr,
    pub uri: String,
}

impl Artwork {
    pub fn is_one_of_one(&self) -> bool {
        self.max_supply == Uint128::one()
    }

    pub fn sold_out(&self) -> bool {
        self.current_supply == self.max_supply
    }
}

pub const CONFIG: Item<Config> = Item::new("config");

// Token ids are dense and start at 1; 0 means nothing was created yet.
pub const LAST_TOKEN_ID: Item<u64> = Item::new("last_token_id");

pub const ARTWORKS: Map<u64, Artwork> = Map::new("artworks");

// (token id, holder) → held quantity
pub const BALANCES: Map<(u64, &Addr), Uint128> = Map::new("balances");
