use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use cosmwasm_std::Uint128;
use fridge_base::msg::registry::ExecuteMsg;
use k256::ecdsa::SigningKey;
use serde::Deserialize;

use super::{
    tx::{account_address, build_execute_tx, TxParams},
    ChainError,
};
use crate::config::Config;

/// LCD-backed client holding the platform signing key. The key never
/// leaves this struct and is never logged.
pub struct ChainClient {
    http: reqwest::Client,
    lcd_url: String,
    chain_id: String,
    registry: String,
    key: SigningKey,
    address: String,
    fee_denom: String,
    fee_amount: u128,
    gas_limit: u64,
}

#[derive(Deserialize)]
struct NodeInfoResponse {
    default_node_info: NodeInfo,
}

#[derive(Deserialize)]
struct NodeInfo {
    network: String,
}

#[derive(Deserialize)]
struct AccountResponse {
    account: Account,
}

#[derive(Deserialize)]
struct Account {
    account_number: String,
    sequence: String,
}

#[derive(Deserialize)]
struct BroadcastResponse {
    tx_response: TxResponse,
}

#[derive(Deserialize)]
pub struct TxResponse {
    pub txhash: String,
    pub code: u32,
    pub raw_log: String,
}

impl ChainClient {
    pub fn new(config: &Config) -> Result<Self, ChainError> {
        let key = SigningKey::from_slice(&config.platform_key)
            .map_err(|err| ChainError::Signing(err.to_string()))?;
        let address = account_address(&config.address_prefix, &key)?;

        Ok(Self {
            http: reqwest::Client::new(),
            lcd_url: config.lcd_url.clone(),
            chain_id: config.chain_id.clone(),
            registry: config.registry_address.clone(),
            key,
            address,
            fee_denom: config.fee_denom.clone(),
            fee_amount: config.fee_amount,
            gas_limit: config.gas_limit,
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// Fails startup when the node behind `LCD_URL` serves a different
    /// chain than the one the relay was configured for.
    pub async fn assert_chain_id(&self) -> Result<(), ChainError> {
        let info: NodeInfoResponse = self
            .http
            .get(format!(
                "{}/cosmos/base/tendermint/v1beta1/node_info",
                self.lcd_url
            ))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if info.default_node_info.network != self.chain_id {
            return Err(ChainError::UnexpectedChainId {
                expected: self.chain_id.clone(),
                actual: info.default_node_info.network,
            });
        }
        Ok(())
    }

    async fn account(&self, address: &str) -> Result<(u64, u64), ChainError> {
        let response = self
            .http
            .get(format!(
                "{}/cosmos/auth/v1beta1/accounts/{}",
                self.lcd_url, address
            ))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ChainError::UnknownAccount {
                address: address.to_string(),
            });
        }
        let account: AccountResponse = response.error_for_status()?.json().await?;

        let account_number = account
            .account
            .account_number
            .parse()
            .map_err(|_| ChainError::UnknownAccount {
                address: address.to_string(),
            })?;
        let sequence = account
            .account
            .sequence
            .parse()
            .map_err(|_| ChainError::UnknownAccount {
                address: address.to_string(),
            })?;
        Ok((account_number, sequence))
    }

    async fn broadcast(&self, tx_bytes: Vec<u8>) -> Result<TxResponse, ChainError> {
        let response: BroadcastResponse = self
            .http
            .post(format!("{}/cosmos/tx/v1beta1/txs", self.lcd_url))
            .json(&serde_json::json!({
                "tx_bytes": BASE64.encode(tx_bytes),
                "mode": "BROADCAST_MODE_SYNC",
            }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let tx = response.tx_response;
        if tx.code != 0 {
            return Err(ChainError::Broadcast {
                code: tx.code,
                raw_log: tx.raw_log,
            });
        }
        Ok(tx)
    }

    /// Mints `amount` editions of `token_id` to `to`, paid for by the
    /// platform key, and returns the transaction hash.
    pub async fn execute_mint(
        &self,
        to: &str,
        token_id: u64,
        amount: u128,
    ) -> Result<String, ChainError> {
        let msg = serde_json::to_vec(&ExecuteMsg::MintSponsored {
            to: to.to_string(),
            token_id,
            amount: Uint128::new(amount),
        })?;

        let (account_number, sequence) = self.account(&self.address).await?;
        let tx_bytes = build_execute_tx(
            &self.key,
            &self.address,
            &self.registry,
            msg,
            vec![],
            &TxParams {
                chain_id: self.chain_id.clone(),
                account_number,
                sequence,
                fee_denom: self.fee_denom.clone(),
                fee_amount: self.fee_amount,
                gas_limit: self.gas_limit,
            },
        )?;

        let tx = self.broadcast(tx_bytes).await?;
        tracing::info!(txhash = %tx.txhash, token_id, amount, to, "sponsored mint submitted");
        Ok(tx.txhash)
    }
}
