use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Coin};

#[cw_serde]
pub struct InstantiateMsg {
    pub address_prefix: String,
}

/// A relayed call signed off-chain by `from` and submitted by anyone
/// willing to pay gas for it.
#[cw_serde]
pub struct ForwardRequest {
    pub from: String,
    pub to: String,
    pub funds: Vec<Coin>,
    pub nonce: u64,
    pub msg: Binary,
}

/// What actually gets signed: the request scoped to one chain and one
/// forwarder deployment, so signatures cannot be replayed elsewhere.
#[cw_serde]
pub struct ForwardPayload {
    pub chain_id: String,
    pub forwarder: String,
    pub req: ForwardRequest,
}

/// Envelope the forwarder wraps the inner payload into. Target contracts
/// accept it from the forwarder address only and treat `sender` as the
/// logical caller.
#[cw_serde]
pub enum ForwardedExecuteMsg {
    Forwarded { sender: String, msg: Binary },
}

#[cw_serde]
pub enum ExecuteMsg {
    Execute {
        req: ForwardRequest,
        signature: Binary,
        public_key: Binary,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(NonceResponse)]
    Nonce { address: String },
    #[returns(VerifyResponse)]
    Verify {
        req: ForwardRequest,
        signature: Binary,
        public_key: Binary,
    },
}

#[cw_serde]
pub struct NonceResponse {
    pub nonce: u64,
}

#[cw_serde]
pub struct VerifyResponse {
    pub valid: bool,
}

#[cw_serde]
pub struct MigrateMsg {}
