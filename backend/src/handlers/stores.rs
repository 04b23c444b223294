//! HTTP handlers for store monitoring and purchase forecasts

use axum::{
    extract::{Path, State},
    Json,
};
use inventory_engine::ForecastEngine;
use shared::{Alert, Store, StoreMetrics};

use super::blocking;
use crate::error::AppResult;
use crate::services::forecast::StoreForecast;
use crate::services::{ForecastService, MonitorRun};
use crate::AppState;

/// List all stores
pub async fn list_stores(State(state): State<AppState>) -> AppResult<Json<Vec<Store>>> {
    let monitor = state.monitor;
    Ok(Json(blocking(move || monitor.list_stores()).await?))
}

/// Snapshot history of a store, most recent first
pub async fn get_store_history(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> AppResult<Json<Vec<StoreMetrics>>> {
    let monitor = state.monitor;
    Ok(Json(blocking(move || monitor.history(&store_id)).await?))
}

/// Record a store's snapshot for its date
pub async fn record_store_metrics(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    Json(metrics): Json<StoreMetrics>,
) -> AppResult<Json<StoreMetrics>> {
    let monitor = state.monitor;
    Ok(Json(
        blocking(move || monitor.record_snapshot(&store_id, metrics)).await?,
    ))
}

/// Check a store's latest snapshot now
pub async fn get_store_alerts(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> AppResult<Json<Vec<Alert>>> {
    let monitor = state.monitor;
    Ok(Json(blocking(move || monitor.check_store(&store_id)).await?))
}

/// Latest scheduled monitor run; checks immediately before the first one lands
pub async fn get_monitor_summary(State(state): State<AppState>) -> AppResult<Json<MonitorRun>> {
    let latest = state.monitor_results.borrow().clone();
    match latest {
        Some(run) => Ok(Json(run)),
        None => {
            let monitor = state.monitor;
            Ok(Json(blocking(move || monitor.run_all()).await?))
        }
    }
}

/// Purchase forecast for a store
pub async fn get_store_forecast(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> AppResult<Json<StoreForecast>> {
    let service = ForecastService::new(
        state.store.clone(),
        ForecastEngine::new(state.config.engine.forecast.clone()),
    );
    Ok(Json(blocking(move || service.forecast(&store_id)).await?))
}
