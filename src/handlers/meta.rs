use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::schemas::ClientConfig;
use crate::AppState;

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Todo API is running!" }))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "message": "API is running" }))
}

/// Connection details for the web frontend.
pub async fn client_config(State(state): State<AppState>) -> Json<ClientConfig> {
    Json(state.config.client_config())
}
