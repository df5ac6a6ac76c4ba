use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, state::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintRequest {
    pub user_address: String,
    pub token_id: u64,
    pub amount: u128,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintResponse {
    pub success: bool,
    pub transaction_hash: String,
}

/// Mints on behalf of a user who cannot pay gas. The platform key signs
/// and pays for the transaction.
pub async fn mint_sponsored(
    State(state): State<AppState>,
    Json(request): Json<MintRequest>,
) -> Result<Json<MintResponse>, ApiError> {
    let (hrp, _) = bech32::decode(&request.user_address)
        .map_err(|_| ApiError::bad_request("invalid user address"))?;
    if hrp.as_str() != state.address_prefix {
        return Err(ApiError::bad_request("invalid user address"));
    }
    if request.token_id == 0 {
        return Err(ApiError::bad_request("invalid token id"));
    }
    if request.amount == 0 {
        return Err(ApiError::bad_request("amount must be at least 1"));
    }

    let transaction_hash = state
        .chain
        .execute_mint(&request.user_address, request.token_id, request.amount)
        .await?;

    Ok(Json(MintResponse {
        success: true,
        transaction_hash,
    }))
}
