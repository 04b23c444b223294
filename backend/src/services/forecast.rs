//! Forecast service: purchase recommendations from a store's history

use std::sync::Arc;

use inventory_engine::{summarize_forecasts, ForecastEngine, ForecastSummary};
use serde::Serialize;
use shared::PurchaseForecast;

use crate::error::{AppError, AppResult};
use crate::store::InventoryStore;

#[derive(Debug, Clone, Serialize)]
pub struct StoreForecast {
    pub store_id: String,
    pub forecasts: Vec<PurchaseForecast>,
    pub summary: ForecastSummary,
}

pub struct ForecastService {
    store: Arc<dyn InventoryStore>,
    engine: ForecastEngine,
}

impl ForecastService {
    pub fn new(store: Arc<dyn InventoryStore>, engine: ForecastEngine) -> Self {
        Self { store, engine }
    }

    pub fn forecast(&self, store_id: &str) -> AppResult<StoreForecast> {
        if !self.store.load_stores()?.iter().any(|s| s.id == store_id) {
            return Err(AppError::NotFound("Store".to_string()));
        }

        let history = self.store.load_store_history(store_id)?;
        let forecasts = self.engine.generate_purchase_forecast(store_id, &history);
        let summary = summarize_forecasts(&forecasts);

        Ok(StoreForecast {
            store_id: store_id.to_string(),
            forecasts,
            summary,
        })
    }
}
