//! WebAssembly module for Store Inventory Analytics
//!
//! Exposes the analytics engine to the browser:
//! - Daily and range loss analysis
//! - Abnormal record filtering
//! - Store alert checks
//! - Purchase forecasts
//!
//! Collections cross the boundary as JSON strings in the shared model's
//! wire shape.

use chrono::NaiveDate;
use inventory_engine::{
    daily_analysis, filter_abnormal, range_analysis, stock_days, usage_loss_rate, ForecastConfig,
    ForecastEngine, MonitorConfig, MonitorEngine,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

fn parse<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn parse_date(date: &str) -> Result<NaiveDate, String> {
    date.parse()
        .map_err(|e| format!("Invalid date {}: {}", date, e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization failed: {}", e))
}

fn to_js_error(message: String) -> JsValue {
    js_sys::Error::new(&message).into()
}

/// Log a contract violation without failing the call
fn warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

/// Nearest Decimal to `value`, saturating at the Decimal range; `None` for NaN
fn saturating_decimal(value: f64) -> Option<Decimal> {
    if value.is_nan() {
        return None;
    }
    Some(match Decimal::try_from(value) {
        Ok(decimal) => decimal,
        Err(_) if value > 0.0 => Decimal::MAX,
        Err(_) if value < 0.0 => Decimal::MIN,
        Err(_) => Decimal::ZERO,
    })
}

/// Numeric helper input; NaN reads as zero
fn decimal(value: f64) -> Decimal {
    saturating_decimal(value).unwrap_or(Decimal::ZERO)
}

fn float(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

// ============================================================================
// Analysis
// ============================================================================

/// Entries that break the data model still analyse, with a console warning
fn parse_entries(entries_json: &str) -> Result<Vec<DailyEntry>, String> {
    let entries: Vec<DailyEntry> = parse(entries_json, "daily entries")?;
    if let Err(err) = validate_daily_entries(&entries) {
        warn(&format!("Daily entries violate the data model: {}", err));
    }
    Ok(entries)
}

fn daily_analysis_json(date: &str, recipes_json: &str, entries_json: &str) -> Result<String, String> {
    let date = parse_date(date)?;
    let recipes: Vec<Recipe> = parse(recipes_json, "recipes")?;
    let entries = parse_entries(entries_json)?;
    to_json(&daily_analysis(date, &recipes, &entries))
}

fn range_analysis_json(
    start: &str,
    end: &str,
    recipes_json: &str,
    entries_json: &str,
) -> Result<String, String> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    let recipes: Vec<Recipe> = parse(recipes_json, "recipes")?;
    let entries = parse_entries(entries_json)?;
    to_json(&range_analysis(start, end, &recipes, &entries))
}

fn filter_abnormal_json(analysis_json: &str, threshold: f64) -> Result<String, String> {
    let threshold = saturating_decimal(threshold)
        .ok_or_else(|| "Loss rate threshold must be a number".to_string())?;
    let analysis: Vec<InventoryAnalysis> = parse(analysis_json, "analysis")?;
    to_json(&filter_abnormal(&analysis, threshold))
}

/// Analysis of every record in the entry for `date`
#[wasm_bindgen(js_name = dailyAnalysis)]
pub fn daily_analysis_js(date: &str, recipes_json: &str, entries_json: &str) -> Result<String, JsValue> {
    daily_analysis_json(date, recipes_json, entries_json).map_err(to_js_error)
}

/// Concatenated analysis of every entry dated within `[start, end]`
#[wasm_bindgen(js_name = rangeAnalysis)]
pub fn range_analysis_js(
    start: &str,
    end: &str,
    recipes_json: &str,
    entries_json: &str,
) -> Result<String, JsValue> {
    range_analysis_json(start, end, recipes_json, entries_json).map_err(to_js_error)
}

/// Records whose loss rate is strictly above `threshold`
#[wasm_bindgen(js_name = filterAbnormal)]
pub fn filter_abnormal_js(analysis_json: &str, threshold: f64) -> Result<String, JsValue> {
    filter_abnormal_json(analysis_json, threshold).map_err(to_js_error)
}

// ============================================================================
// Monitor and Forecast
// ============================================================================

/// `config_json` may be empty for the default configuration
fn config_or_default<T: DeserializeOwned + Default>(config_json: &str, what: &str) -> Result<T, String> {
    if config_json.trim().is_empty() {
        Ok(T::default())
    } else {
        parse(config_json, what)
    }
}

fn check_store_json(metrics_json: &str, config_json: &str) -> Result<String, String> {
    let metrics: StoreMetrics = parse(metrics_json, "store metrics")?;
    let config: MonitorConfig = config_or_default(config_json, "monitor config")?;
    config.validate().map_err(|e| e.to_string())?;
    to_json(&MonitorEngine::new(config).check_store(&metrics))
}

fn purchase_forecast_json(store_id: &str, history_json: &str, config_json: &str) -> Result<String, String> {
    let history: Vec<StoreMetrics> = parse(history_json, "store history")?;
    let config: ForecastConfig = config_or_default(config_json, "forecast config")?;
    config.validate().map_err(|e| e.to_string())?;
    to_json(&ForecastEngine::new(config).generate_purchase_forecast(store_id, &history))
}

/// Alerts for one store snapshot
#[wasm_bindgen(js_name = checkStore)]
pub fn check_store_js(metrics_json: &str, config_json: &str) -> Result<String, JsValue> {
    check_store_json(metrics_json, config_json).map_err(to_js_error)
}

/// Purchase forecasts from a most-recent-first snapshot history
#[wasm_bindgen(js_name = generatePurchaseForecast)]
pub fn generate_purchase_forecast_js(
    store_id: &str,
    history_json: &str,
    config_json: &str,
) -> Result<String, JsValue> {
    purchase_forecast_json(store_id, history_json, config_json).map_err(to_js_error)
}

// ============================================================================
// Numeric Helpers
// ============================================================================

/// Loss rate of the analysis view, `(theoretical - actual) / theoretical * 100`
#[wasm_bindgen]
pub fn calculate_loss_rate(theoretical: f64, actual: f64) -> f64 {
    float(inventory_engine::loss_rate(decimal(theoretical), decimal(actual)))
}

/// Loss rate of the monitor view, `(actual - theoretical) / theoretical * 100`
#[wasm_bindgen]
pub fn calculate_monitor_loss_rate(theoretical: f64, actual: f64) -> f64 {
    float(usage_loss_rate(&usage(theoretical, actual, 0.0)))
}

/// Days of stock left at the current usage; 999 when nothing is used
#[wasm_bindgen]
pub fn calculate_stock_days(stock: f64, actual_usage: f64) -> f64 {
    float(stock_days(&usage(0.0, actual_usage, stock)))
}

fn usage(theoretical: f64, actual: f64, stock: f64) -> IngredientUsage {
    IngredientUsage {
        ingredient_id: String::new(),
        name: String::new(),
        theoretical_usage: decimal(theoretical),
        actual_usage: decimal(actual),
        stock: decimal(stock),
        unit: String::new(),
        cost_per_unit: Decimal::ZERO,
    }
}
