//! Store Inventory Analytics - Backend Service
//!
//! Hosts the analytics engine behind a JSON API: catalog and daily entry
//! management, loss analysis and reports, store monitoring and purchase
//! forecasts.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod scheduler;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use scheduler::{MonitorResults, RefreshScheduler};
pub use store::{seed_defaults, InventoryStore, JsonFileStore, MemoryStore};

use services::{CatalogService, MonitorService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn InventoryStore>,
    pub catalog: Arc<CatalogService>,
    pub monitor: Arc<MonitorService>,
    pub config: Arc<Config>,
    pub monitor_results: MonitorResults,
}

impl AppState {
    /// `monitor` is normally the service the refresh scheduler runs
    pub fn new(
        store: Arc<dyn InventoryStore>,
        config: Arc<Config>,
        monitor: Arc<MonitorService>,
        monitor_results: MonitorResults,
    ) -> Self {
        Self {
            catalog: Arc::new(CatalogService::new(Arc::clone(&store))),
            store,
            monitor,
            config,
            monitor_results,
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Store Inventory Analytics API v1.0"
}
