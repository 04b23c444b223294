//! Engine configuration
//!
//! Thresholds are injected into each engine at construction so engines with
//! different tuning (e.g. per store) can coexist.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Configuration for both engines
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub monitor: MonitorConfig,
    pub forecast: ForecastConfig,
}

impl EngineConfig {
    pub fn validate(&self) -> EngineResult<()> {
        self.monitor.validate()?;
        self.forecast.validate()
    }
}

/// Store monitor thresholds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MonitorConfig {
    /// Loss-rate percentage above which an ingredient raises an alert
    pub loss_rate_threshold: Decimal,
    /// Remaining stock days below which an ingredient raises an alert
    pub stock_warning_days: Decimal,
    /// Sales drop percentage reserved for the sales check
    pub sales_drop_threshold: Decimal,
    /// Cost increase percentage reserved for cost checks
    pub cost_increase_threshold: Decimal,
    /// Minutes between scheduled re-evaluations
    pub check_interval: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            loss_rate_threshold: Decimal::from(5),
            stock_warning_days: Decimal::from(3),
            sales_drop_threshold: Decimal::from(20),
            cost_increase_threshold: Decimal::from(10),
            check_interval: 15,
        }
    }
}

impl MonitorConfig {
    pub fn validate(&self) -> EngineResult<()> {
        non_negative("monitor.loss_rate_threshold", self.loss_rate_threshold)?;
        non_negative("monitor.stock_warning_days", self.stock_warning_days)?;
        non_negative("monitor.sales_drop_threshold", self.sales_drop_threshold)?;
        non_negative("monitor.cost_increase_threshold", self.cost_increase_threshold)?;
        if self.check_interval == 0 {
            return Err(EngineError::InvalidConfig {
                field: "monitor.check_interval",
                reason: "must be at least one minute".to_string(),
            });
        }
        Ok(())
    }
}

/// Purchase forecast parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ForecastConfig {
    /// Days of buffer stock to hold
    pub safety_stock_days: Decimal,
    /// Days between consecutive purchase orders
    pub min_order_cycle: Decimal,
    /// Number of most recent snapshots averaged
    pub history_days: usize,
    /// Assumed over-ordering factor of the naive reorder policy
    pub baseline_order_factor: Decimal,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            safety_stock_days: Decimal::from(3),
            min_order_cycle: Decimal::from(2),
            history_days: 7,
            baseline_order_factor: Decimal::new(12, 1),
        }
    }
}

impl ForecastConfig {
    pub fn validate(&self) -> EngineResult<()> {
        non_negative("forecast.safety_stock_days", self.safety_stock_days)?;
        non_negative("forecast.min_order_cycle", self.min_order_cycle)?;
        non_negative("forecast.baseline_order_factor", self.baseline_order_factor)?;
        if self.history_days == 0 {
            return Err(EngineError::InvalidConfig {
                field: "forecast.history_days",
                reason: "must cover at least one day".to_string(),
            });
        }
        Ok(())
    }
}

fn non_negative(field: &'static str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::InvalidConfig {
            field,
            reason: format!("must not be negative, got {}", value),
        });
    }
    Ok(())
}
