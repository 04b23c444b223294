//! Store monitor
//!
//! Stateless evaluation of a [`StoreMetrics`] snapshot against a
//! [`MonitorConfig`]. Loss here is `(actual - theoretical) / theoretical`,
//! i.e. positive when more was used than the recipes predict.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{Alert, AlertLevel, AlertStatus, AlertType, IngredientUsage, StoreMetrics};
use uuid::Uuid;

use crate::config::MonitorConfig;

/// Stock days reported when an ingredient has no usage
pub const STOCK_DAYS_UNLIMITED: i64 = 999;

const LOSS_RATE_SUGGESTIONS: [&str; 5] = [
    "1. Take an immediate stock count of this ingredient and verify the recorded figures",
    "2. Check that the ingredient is stored under appropriate conditions",
    "3. Review the preparation workflow and operating procedures",
    "4. Retrain staff on ingredient portioning standards",
    "5. Consider adjusting the recipe or the product pricing",
];

const LOW_STOCK_SUGGESTIONS: [&str; 4] = [
    "1. Replenish stock immediately",
    "2. Check the supplier's delivery lead time",
    "3. Consider raising the safety stock level",
    "4. Optimize the purchasing plan",
];

/// Evaluates store snapshots against fixed thresholds
#[derive(Debug, Clone, Default)]
pub struct MonitorEngine {
    config: MonitorConfig,
}

/// Fields of an alert before identity and timestamp are assigned
struct AlertDraft {
    alert_type: AlertType,
    level: AlertLevel,
    metric: String,
    value: Decimal,
    threshold: Decimal,
    message: String,
    suggestions: &'static [&'static str],
    cost_impact: Option<Decimal>,
}

impl MonitorEngine {
    pub fn new(config: MonitorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Evaluate a snapshot now
    pub fn check_store(&self, metrics: &StoreMetrics) -> Vec<Alert> {
        self.check_store_at(metrics, Utc::now())
    }

    /// Evaluate a snapshot, stamping alerts with `now`
    pub fn check_store_at(&self, metrics: &StoreMetrics, now: DateTime<Utc>) -> Vec<Alert> {
        let mut drafts = self.check_loss_rate(metrics);
        drafts.extend(self.check_stock(metrics));
        drafts.extend(self.check_sales(metrics));

        let alerts: Vec<Alert> = drafts
            .into_iter()
            .map(|draft| create_alert(&metrics.store_id, draft, now))
            .collect();

        if !alerts.is_empty() {
            tracing::info!(
                "Store {} raised {} alert(s) across {} ingredients",
                metrics.store_id,
                alerts.len(),
                metrics.ingredients.len()
            );
        }
        alerts
    }

    fn check_loss_rate(&self, metrics: &StoreMetrics) -> Vec<AlertDraft> {
        let threshold = self.config.loss_rate_threshold;

        metrics
            .ingredients
            .iter()
            .filter_map(|ingredient| {
                let loss = usage_loss_rate(ingredient);
                if loss <= threshold {
                    return None;
                }

                let level = if loss > threshold * Decimal::from(2) {
                    AlertLevel::Urgent
                } else {
                    AlertLevel::Warning
                };
                let excess = (ingredient.actual_usage - ingredient.theoretical_usage)
                    .max(Decimal::ZERO);

                Some(AlertDraft {
                    alert_type: AlertType::HighLossRate,
                    level,
                    metric: ingredient.name.clone(),
                    value: loss,
                    threshold,
                    message: format!(
                        "{} loss rate {}% exceeds the {}% threshold",
                        ingredient.name,
                        loss.round_dp(1),
                        threshold
                    ),
                    suggestions: &LOSS_RATE_SUGGESTIONS,
                    cost_impact: Some(excess * ingredient.cost_per_unit),
                })
            })
            .collect()
    }

    fn check_stock(&self, metrics: &StoreMetrics) -> Vec<AlertDraft> {
        let threshold = self.config.stock_warning_days;

        metrics
            .ingredients
            .iter()
            .filter_map(|ingredient| {
                let days_remaining = stock_days(ingredient);
                if days_remaining >= threshold {
                    return None;
                }

                let level = if days_remaining < Decimal::ONE {
                    AlertLevel::Urgent
                } else {
                    AlertLevel::Warning
                };

                Some(AlertDraft {
                    alert_type: AlertType::LowStock,
                    level,
                    metric: ingredient.name.clone(),
                    value: days_remaining,
                    threshold,
                    message: format!(
                        "{} stock covers only {} days of usage",
                        ingredient.name,
                        days_remaining.round_dp(1)
                    ),
                    suggestions: &LOW_STOCK_SUGGESTIONS,
                    cost_impact: None,
                })
            })
            .collect()
    }

    /// Sales trend check.
    ///
    /// Snapshots carry a single day of sales, so there is no baseline to
    /// compare against `sales_drop_threshold` yet. Returns no alerts.
    fn check_sales(&self, metrics: &StoreMetrics) -> Vec<AlertDraft> {
        tracing::trace!(
            "Sales check skipped for store {} ({} sale records)",
            metrics.store_id,
            metrics.sales.len()
        );
        Vec::new()
    }
}

/// Percentage by which actual usage exceeds theoretical usage
pub fn usage_loss_rate(ingredient: &IngredientUsage) -> Decimal {
    if ingredient.theoretical_usage.is_zero() {
        return Decimal::ZERO;
    }
    (ingredient.actual_usage - ingredient.theoretical_usage) / ingredient.theoretical_usage
        * Decimal::from(100)
}

/// Days the current stock lasts at the snapshot's usage.
///
/// [`STOCK_DAYS_UNLIMITED`] when nothing is being used.
pub fn stock_days(ingredient: &IngredientUsage) -> Decimal {
    if ingredient.actual_usage.is_zero() {
        return Decimal::from(STOCK_DAYS_UNLIMITED);
    }
    ingredient.stock / ingredient.actual_usage
}

fn create_alert(store_id: &str, draft: AlertDraft, now: DateTime<Utc>) -> Alert {
    Alert {
        id: Uuid::new_v4(),
        store_id: store_id.to_string(),
        alert_type: draft.alert_type,
        level: draft.level,
        timestamp: now,
        metric: draft.metric,
        value: draft.value,
        threshold: draft.threshold,
        message: draft.message,
        suggestions: draft.suggestions.iter().map(|s| s.to_string()).collect(),
        status: AlertStatus::New,
        cost_impact: draft.cost_impact,
    }
}

/// Alert counts across a set of monitored stores
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonitorSummary {
    pub total_stores: usize,
    pub stores_with_alerts: usize,
    pub urgent_alerts: usize,
    pub warning_alerts: usize,
}

pub fn summarize_alerts(total_stores: usize, alerts: &[Alert]) -> MonitorSummary {
    let stores: std::collections::HashSet<&str> =
        alerts.iter().map(|alert| alert.store_id.as_str()).collect();

    MonitorSummary {
        total_stores,
        stores_with_alerts: stores.len(),
        urgent_alerts: alerts.iter().filter(|a| a.level == AlertLevel::Urgent).count(),
        warning_alerts: alerts.iter().filter(|a| a.level == AlertLevel::Warning).count(),
    }
}
