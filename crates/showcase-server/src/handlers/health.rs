//! Operational introspection.

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::server::AppState;

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let cache = state.cache.stats();
    Json(json!({
        "status": "ok",
        "storage": { "backend": state.store.backend_name() },
        "cache": cache,
    }))
}
