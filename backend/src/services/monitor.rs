//! Monitor service: runs the alert engine over each store's latest snapshot

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use inventory_engine::{summarize_alerts, MonitorEngine, MonitorSummary};
use serde::Serialize;
use shared::{validate_store_metrics, Alert, Store, StoreMetrics};

use crate::error::{AppError, AppResult};
use crate::store::InventoryStore;

/// Alerts for every active store, checked at one instant
#[derive(Debug, Clone, Serialize)]
pub struct MonitorRun {
    pub checked_at: DateTime<Utc>,
    pub alerts: Vec<Alert>,
    pub summary: MonitorSummary,
}

/// Store monitoring
///
/// Snapshot recording is serialized through one write lock.
pub struct MonitorService {
    store: Arc<dyn InventoryStore>,
    engine: MonitorEngine,
    write_lock: Mutex<()>,
}

impl MonitorService {
    pub fn new(store: Arc<dyn InventoryStore>, engine: MonitorEngine) -> Self {
        Self {
            store,
            engine,
            write_lock: Mutex::new(()),
        }
    }

    pub fn engine(&self) -> &MonitorEngine {
        &self.engine
    }

    pub fn list_stores(&self) -> AppResult<Vec<Store>> {
        Ok(self.store.load_stores()?)
    }

    pub fn history(&self, store_id: &str) -> AppResult<Vec<StoreMetrics>> {
        self.find_store(store_id)?;
        Ok(self.store.load_store_history(store_id)?)
    }

    /// Record a snapshot, replacing one for the same date, keeping history
    /// most recent first
    pub fn record_snapshot(&self, store_id: &str, mut metrics: StoreMetrics) -> AppResult<StoreMetrics> {
        self.find_store(store_id)?;
        metrics.store_id = store_id.to_string();
        validate_store_metrics(&metrics)?;

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| AppError::Internal("Monitor lock poisoned".to_string()))?;
        self.store.update_store_history(store_id, &mut |history: &mut Vec<StoreMetrics>| {
            history.retain(|day| day.date != metrics.date);
            history.push(metrics.clone());
            history.sort_by(|a, b| b.date.cmp(&a.date));
        })?;

        tracing::info!("Recorded {} snapshot for {}", metrics.date, store_id);
        Ok(metrics)
    }

    /// Alerts for one store's latest snapshot; empty without history
    pub fn check_store(&self, store_id: &str) -> AppResult<Vec<Alert>> {
        self.find_store(store_id)?;
        let history = self.store.load_store_history(store_id)?;
        Ok(history
            .first()
            .map(|latest| self.engine.check_store(latest))
            .unwrap_or_default())
    }

    /// Check every active store
    pub fn run_all(&self) -> AppResult<MonitorRun> {
        self.run_all_at(Utc::now())
    }

    pub fn run_all_at(&self, checked_at: DateTime<Utc>) -> AppResult<MonitorRun> {
        let stores: Vec<Store> = self
            .store
            .load_stores()?
            .into_iter()
            .filter(Store::is_active)
            .collect();

        let mut alerts = Vec::new();
        for store in &stores {
            let history = self.store.load_store_history(&store.id)?;
            match history.first() {
                Some(latest) => alerts.extend(self.engine.check_store_at(latest, checked_at)),
                None => tracing::debug!("No snapshots for store {}", store.id),
            }
        }

        let summary = summarize_alerts(stores.len(), &alerts);
        tracing::info!(
            "Monitor run: {} stores, {} with alerts, {} urgent",
            summary.total_stores,
            summary.stores_with_alerts,
            summary.urgent_alerts
        );

        Ok(MonitorRun {
            checked_at,
            alerts,
            summary,
        })
    }

    fn find_store(&self, store_id: &str) -> AppResult<Store> {
        self.store
            .load_stores()?
            .into_iter()
            .find(|s| s.id == store_id)
            .ok_or_else(|| AppError::NotFound("Store".to_string()))
    }
}
