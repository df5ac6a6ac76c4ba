use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::Config;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("storage service rejected the upload: {0}")]
    Rejected(String),
}

/// Client for the content-addressed store and the permanence mirror.
/// Both are opaque services: store(bytes) -> URI and pin(URI) -> ack.
pub struct StorageClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
    arweave_bundle_url: Option<String>,
}

#[derive(Deserialize)]
struct UploadResponse {
    value: UploadValue,
}

#[derive(Deserialize)]
struct UploadValue {
    cid: String,
}

#[derive(Deserialize)]
struct BundleResponse {
    #[serde(rename = "transactionId")]
    transaction_id: String,
}

impl StorageClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: config.ipfs_api_url.clone(),
            token: config.ipfs_api_token.clone(),
            arweave_bundle_url: config.arweave_bundle_url.clone(),
        }
    }

    async fn store(&self, bytes: Vec<u8>, content_type: &str) -> Result<String, StorageError> {
        let response = self
            .http
            .post(format!("{}/upload", self.api_url))
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Rejected(format!("{status}: {body}")));
        }
        let upload: UploadResponse = response.json().await?;
        Ok(upload.value.cid)
    }

    /// Stores an image blob, returning its `ipfs://` URI.
    pub async fn store_image(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let cid = self.store(bytes, content_type).await?;
        Ok(format!("ipfs://{cid}"))
    }

    /// Stores a metadata document, returning its `ipfs://` URI.
    pub async fn store_metadata(&self, metadata: &Value) -> Result<String, StorageError> {
        let cid = self
            .store(metadata.to_string().into_bytes(), "application/json")
            .await?;
        Ok(format!("ipfs://{cid}"))
    }

    /// Pins an already-stored CID to the permanence network. Returns the
    /// mirror transaction id, or None when no mirror is configured.
    pub async fn mirror(&self, uri: &str) -> Result<Option<String>, StorageError> {
        let Some(bundle_url) = &self.arweave_bundle_url else {
            tracing::warn!("no permanence mirror configured, skipping pin");
            return Ok(None);
        };

        let cid = uri.trim_start_matches("ipfs://");
        let response = self
            .http
            .post(bundle_url)
            .json(&json!({ "cid": cid }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Rejected(format!("{status}: {body}")));
        }
        let bundle: BundleResponse = response.json().await?;
        Ok(Some(bundle.transaction_id))
    }
}

/// Token metadata document referencing a stored image.
pub fn build_metadata(
    title: &str,
    artist: &str,
    description: &str,
    image_uri: &str,
    age: Option<u32>,
) -> Value {
    let mut attributes = vec![
        json!({ "trait_type": "Artist", "value": artist }),
        json!({ "trait_type": "Platform", "value": "Fridgeditions" }),
    ];
    if let Some(age) = age {
        attributes.push(json!({ "trait_type": "Age", "value": age }));
    }

    json!({
        "name": title,
        "description": description,
        "image": image_uri,
        "attributes": attributes,
    })
}
