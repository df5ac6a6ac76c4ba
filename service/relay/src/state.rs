use std::sync::Arc;

use crate::{chain::ChainClient, storage::StorageClient};

#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<ChainClient>,
    pub storage: Arc<StorageClient>,
    pub address_prefix: String,
}

impl AppState {
    pub fn new(chain: ChainClient, storage: StorageClient, address_prefix: String) -> Self {
        Self {
            chain: Arc::new(chain),
            storage: Arc::new(storage),
            address_prefix,
        }
    }
}
