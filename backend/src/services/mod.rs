//! Business logic services for the Store Inventory Analytics service

pub mod analysis;
pub mod catalog;
pub mod forecast;
pub mod monitor;

pub use analysis::AnalysisService;
pub use catalog::CatalogService;
pub use forecast::ForecastService;
pub use monitor::{MonitorRun, MonitorService};
