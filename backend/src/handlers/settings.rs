//! HTTP handlers for user settings

use axum::{extract::State, Json};
use rust_decimal::Decimal;
use shared::UserSettings;

use super::blocking;
use crate::error::{AppError, AppResult};
use crate::AppState;

pub async fn get_settings(State(state): State<AppState>) -> AppResult<Json<UserSettings>> {
    let store = state.store;
    Ok(Json(blocking(move || Ok(store.load_settings()?)).await?))
}

pub async fn update_settings(
    State(state): State<AppState>,
    Json(settings): Json<UserSettings>,
) -> AppResult<Json<UserSettings>> {
    if settings.loss_rate_threshold < Decimal::ZERO {
        return Err(AppError::Validation {
            field: "loss_rate_threshold".to_string(),
            message: "Loss rate threshold must not be negative".to_string(),
        });
    }

    let store = state.store;
    let saved = settings.clone();
    blocking(move || Ok(store.save_settings(&saved)?)).await?;
    tracing::info!("Loss rate threshold set to {}%", settings.loss_rate_threshold);
    Ok(Json(settings))
}
