//! Inventory analytics and forecasting engine
//!
//! Pure, synchronous computations over already-loaded collections:
//! - Consumption analysis (theoretical vs actual, loss rate)
//! - Threshold-based store monitoring alerts
//! - Purchase quantity and timing forecasts
//!
//! Nothing in this crate performs I/O or keeps state between calls beyond
//! the configuration an engine is constructed with.

pub mod analysis;
pub mod config;
pub mod consumption;
pub mod error;
pub mod forecast;
pub mod monitor;

pub use analysis::{
    daily_analysis, filter_abnormal, range_analysis, summarize, validated_daily_analysis,
    validated_range_analysis, AnalysisSummary, ReportPeriod,
};
pub use config::{EngineConfig, ForecastConfig, MonitorConfig};
pub use consumption::{actual_consumption, loss_rate, recipe_consumption, theoretical_consumption};
pub use error::{EngineError, EngineResult};
pub use forecast::{summarize_forecasts, ForecastEngine, ForecastSummary, OrderUrgency};
pub use monitor::{
    stock_days, summarize_alerts, usage_loss_rate, MonitorEngine, MonitorSummary,
    STOCK_DAYS_UNLIMITED,
};
