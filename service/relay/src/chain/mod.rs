use thiserror::Error;

pub mod client;
pub mod tx;

pub use client::ChainClient;

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("LCD request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("invalid bech32 prefix")]
    InvalidPrefix,

    #[error("connected to wrong chain: expected {expected}, node reports {actual}")]
    UnexpectedChainId { expected: String, actual: String },

    #[error("account {address} not found on chain")]
    UnknownAccount { address: String },

    #[error("transaction rejected with code {code}: {raw_log}")]
    Broadcast { code: u32, raw_log: String },

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
