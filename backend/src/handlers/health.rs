//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use super::blocking;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub storage: String,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // Check the data directory is readable
    let store = state.store;
    let readable = blocking(move || Ok(store.load_settings()?)).await;
    let storage_status = match readable {
        Ok(_) => "available".to_string(),
        Err(_) => "unavailable".to_string(),
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: storage_status,
    })
}
