use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

pub const ADDRESS_PREFIX: Item<String> = Item::new("address_prefix");

// Sender → next expected nonce, starting at 0
pub const NONCES: Map<&Addr, u64> = Map::new("nonces");
