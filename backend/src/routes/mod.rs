//! Route definitions for the Store Inventory Analytics service

use axum::{
    routing::{get, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/ingredients", ingredient_routes())
        .nest("/recipes", recipe_routes())
        .nest("/daily-entries", daily_entry_routes())
        .nest("/analysis", analysis_routes())
        .nest("/stores", store_routes())
        .route("/monitor/summary", get(handlers::get_monitor_summary))
        .route(
            "/settings",
            get(handlers::get_settings).put(handlers::update_settings),
        )
}

/// Ingredient catalog routes
fn ingredient_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_ingredients).post(handlers::create_ingredient),
        )
        .route(
            "/:ingredient_id",
            put(handlers::update_ingredient).delete(handlers::delete_ingredient),
        )
}

/// Recipe routes
fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_recipes).post(handlers::create_recipe))
        .route(
            "/:recipe_id",
            put(handlers::update_recipe).delete(handlers::delete_recipe),
        )
}

/// Daily entry routes, keyed by date
fn daily_entry_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_daily_entries))
        .route("/:date", put(handlers::record_daily_entry))
}

/// Loss analysis routes
fn analysis_routes() -> Router<AppState> {
    Router::new()
        .route("/daily/:date", get(handlers::get_daily_analysis))
        .route("/range", get(handlers::get_range_analysis))
        .route("/report", get(handlers::get_report))
}

/// Store monitoring and forecast routes
fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_stores))
        .route(
            "/:store_id/metrics",
            get(handlers::get_store_history).put(handlers::record_store_metrics),
        )
        .route("/:store_id/alerts", get(handlers::get_store_alerts))
        .route("/:store_id/forecast", get(handlers::get_store_forecast))
}
