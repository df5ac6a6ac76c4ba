use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub chain_id: String,
    pub platform_address: String,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        chain_id: state.chain.chain_id().to_string(),
        platform_address: state.chain.address().to_string(),
    })
}
