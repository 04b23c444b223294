//! Store Inventory Analytics - Backend Server

use std::sync::Arc;

use inventory_backend::{
    create_app, seed_defaults,
    services::MonitorService,
    AppState, Config, InventoryStore, JsonFileStore, RefreshScheduler,
};
use inventory_engine::MonitorEngine;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "inventory_server=debug,inventory_backend=debug,inventory_engine=info,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;
    config.engine.validate()?;

    tracing::info!("Starting Store Inventory Analytics Server");
    tracing::info!("Environment: {}", config.environment);

    // Open the data directory
    let json_store = JsonFileStore::new(&config.storage.data_dir);
    tracing::info!("Data directory: {}", json_store.data_dir().display());
    let store: Arc<dyn InventoryStore> = Arc::new(json_store);

    if config.storage.seed_defaults {
        seed_defaults(store.as_ref())?;
    }

    // Start the periodic monitor
    let monitor = Arc::new(MonitorService::new(
        Arc::clone(&store),
        MonitorEngine::new(config.engine.monitor.clone()),
    ));
    let (monitor_results, _refresh) =
        RefreshScheduler::new(Arc::clone(&monitor), config.engine.monitor.check_interval).spawn();

    // Create application state
    let state = AppState::new(store, Arc::new(config.clone()), monitor, monitor_results);

    // Build application
    let app = create_app(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
