use std::env;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(String),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: String, reason: String },
}

/// Runtime configuration, loaded from the environment at startup.
///
/// | Variable | Description | Default |
/// |----------|-------------|---------|
/// | `HOST` | Server bind address | `0.0.0.0` |
/// | `PORT` | Server bind port | `8080` |
/// | `LCD_URL` | Cosmos LCD (REST) endpoint | Required |
/// | `CHAIN_ID` | Chain the relay expects to talk to | Required |
/// | `ADDRESS_PREFIX` | Bech32 account prefix | `neutron` |
/// | `REGISTRY_ADDRESS` | Artwork registry contract address | Required |
/// | `PLATFORM_KEY` | Hex-encoded secp256k1 key paying for sponsored mints | Required |
/// | `FEE_DENOM` | Denom the relay pays fees in | `untrn` |
/// | `FEE_AMOUNT` | Flat fee per transaction | `20000` |
/// | `GAS_LIMIT` | Gas limit per transaction | `400000` |
/// | `IPFS_API_URL` | Content-addressed storage API | `https://api.nft.storage` |
/// | `IPFS_API_TOKEN` | Bearer token for the storage API | Required |
/// | `ARWEAVE_BUNDLE_URL` | Permanence mirror endpoint | Optional |
/// | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub lcd_url: String,
    pub chain_id: String,
    pub address_prefix: String,
    pub registry_address: String,
    pub platform_key: Vec<u8>,
    pub fee_denom: String,
    pub fee_amount: u128,
    pub gas_limit: u64,
    pub ipfs_api_url: String,
    pub ipfs_api_token: String,
    pub arweave_bundle_url: Option<String>,
}

fn required(name: &str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name.to_string()))
}

fn optional(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parsed<T: std::str::FromStr>(name: &str, default: &str) -> Result<T, ConfigError> {
    optional(name, default)
        .parse()
        .map_err(|_| ConfigError::Invalid {
            name: name.to_string(),
            reason: String::from("not a number"),
        })
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let platform_key =
            hex::decode(required("PLATFORM_KEY")?).map_err(|_| ConfigError::Invalid {
                name: String::from("PLATFORM_KEY"),
                reason: String::from("not hex"),
            })?;
        if platform_key.len() != 32 {
            return Err(ConfigError::Invalid {
                name: String::from("PLATFORM_KEY"),
                reason: String::from("expected 32 bytes"),
            });
        }

        Ok(Self {
            host: optional("HOST", "0.0.0.0"),
            port: parsed("PORT", "8080")?,
            lcd_url: required("LCD_URL")?.trim_end_matches('/').to_string(),
            chain_id: required("CHAIN_ID")?,
            address_prefix: optional("ADDRESS_PREFIX", "neutron"),
            registry_address: required("REGISTRY_ADDRESS")?,
            platform_key,
            fee_denom: optional("FEE_DENOM", "untrn"),
            fee_amount: parsed("FEE_AMOUNT", "20000")?,
            gas_limit: parsed("GAS_LIMIT", "400000")?,
            ipfs_api_url: optional("IPFS_API_URL", "https://api.nft.storage")
                .trim_end_matches('/')
                .to_string(),
            ipfs_api_token: required("IPFS_API_TOKEN")?,
            arweave_bundle_url: env::var("ARWEAVE_BUNDLE_URL").ok(),
        })
    }
}
