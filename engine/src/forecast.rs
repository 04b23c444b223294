//! Purchase forecasting
//!
//! Averages recent actual usage per ingredient and recommends how much to buy
//! and when, so stock covers one order cycle plus the safety buffer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{IngredientUsage, PurchaseForecast, StoreMetrics};

use crate::config::ForecastConfig;

/// Purchase forecaster for store snapshot histories
#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    config: ForecastConfig,
}

impl ForecastEngine {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Forecast purchases for every ingredient in the latest snapshot.
    ///
    /// `history` is ordered most recent first; only the first
    /// `history_days` snapshots are used. Ingredients with no average usage
    /// are left out.
    pub fn generate_purchase_forecast(
        &self,
        store_id: &str,
        history: &[StoreMetrics],
    ) -> Vec<PurchaseForecast> {
        let window = &history[..history.len().min(self.config.history_days)];
        let Some(latest) = window.first() else {
            tracing::debug!("No history for store {}, skipping forecast", store_id);
            return Vec::new();
        };

        let forecasts: Vec<PurchaseForecast> = latest
            .ingredients
            .iter()
            .filter_map(|ingredient| self.forecast_ingredient(store_id, ingredient, window))
            .collect();

        tracing::debug!(
            "Forecast {} of {} ingredients for store {} over {} days",
            forecasts.len(),
            latest.ingredients.len(),
            store_id,
            window.len()
        );
        forecasts
    }

    fn forecast_ingredient(
        &self,
        store_id: &str,
        ingredient: &IngredientUsage,
        window: &[StoreMetrics],
    ) -> Option<PurchaseForecast> {
        let usage_series: Vec<Decimal> = window
            .iter()
            .map(|day| {
                day.usage_for(&ingredient.ingredient_id)
                    .map(|usage| usage.actual_usage)
                    .unwrap_or(Decimal::ZERO)
            })
            .collect();

        let average_daily_usage = average(&usage_series);
        if average_daily_usage <= Decimal::ZERO {
            return None;
        }

        let days_remaining = ingredient.stock / average_daily_usage;
        let days_to_order = (days_remaining - self.config.safety_stock_days).max(Decimal::ZERO);
        let recommended_purchase = self.recommended_purchase(average_daily_usage, ingredient.stock);
        let estimated_cost = recommended_purchase * ingredient.cost_per_unit;

        let baseline_purchase =
            average_daily_usage * self.config.min_order_cycle * self.config.baseline_order_factor;
        let potential_savings = ((baseline_purchase - recommended_purchase)
            * ingredient.cost_per_unit)
            .max(Decimal::ZERO);

        Some(PurchaseForecast {
            store_id: store_id.to_string(),
            ingredient_id: ingredient.ingredient_id.clone(),
            ingredient_name: ingredient.name.clone(),
            unit: ingredient.unit.clone(),
            current_stock: ingredient.stock,
            average_daily_usage,
            recommended_purchase,
            days_to_order,
            estimated_cost,
            potential_savings,
        })
    }

    /// Cycle demand plus safety stock, net of stock on hand; never negative
    fn recommended_purchase(&self, average_daily_usage: Decimal, current_stock: Decimal) -> Decimal {
        let safety_stock = average_daily_usage * self.config.safety_stock_days;
        let cycle_demand = average_daily_usage * self.config.min_order_cycle;
        (cycle_demand + safety_stock - current_stock).max(Decimal::ZERO)
    }
}

fn average(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    let total: Decimal = values.iter().sum();
    total / Decimal::from(values.len())
}

/// When an order should be placed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderUrgency {
    Immediate,
    Tomorrow,
    Later,
}

impl OrderUrgency {
    pub fn from_days(days_to_order: Decimal) -> Self {
        if days_to_order <= Decimal::ZERO {
            OrderUrgency::Immediate
        } else if days_to_order <= Decimal::ONE {
            OrderUrgency::Tomorrow
        } else {
            OrderUrgency::Later
        }
    }
}

/// Totals across a store's forecasts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastSummary {
    pub total_estimated_cost: Decimal,
    pub total_potential_savings: Decimal,
    /// Savings as a percentage of estimated cost; 0 when nothing is bought
    pub savings_rate: Decimal,
    pub immediate_orders: usize,
}

pub fn summarize_forecasts(forecasts: &[PurchaseForecast]) -> ForecastSummary {
    let total_estimated_cost: Decimal = forecasts.iter().map(|f| f.estimated_cost).sum();
    let total_potential_savings: Decimal = forecasts.iter().map(|f| f.potential_savings).sum();
    let savings_rate = if total_estimated_cost.is_zero() {
        Decimal::ZERO
    } else {
        total_potential_savings / total_estimated_cost * Decimal::from(100)
    };

    ForecastSummary {
        total_estimated_cost,
        total_potential_savings,
        savings_rate,
        immediate_orders: forecasts
            .iter()
            .filter(|f| OrderUrgency::from_days(f.days_to_order) == OrderUrgency::Immediate)
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average() {
        assert_eq!(average(&[]), Decimal::ZERO);
        assert_eq!(
            average(&[Decimal::new(55, 1), Decimal::new(52, 1)]),
            Decimal::new(535, 2)
        );
    }

    #[test]
    fn test_order_urgency() {
        assert_eq!(OrderUrgency::from_days(Decimal::ZERO), OrderUrgency::Immediate);
        assert_eq!(OrderUrgency::from_days(Decimal::new(5, 1)), OrderUrgency::Tomorrow);
        assert_eq!(OrderUrgency::from_days(Decimal::ONE), OrderUrgency::Tomorrow);
        assert_eq!(OrderUrgency::from_days(Decimal::from(4)), OrderUrgency::Later);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize_forecasts(&[]);
        assert_eq!(summary.total_estimated_cost, Decimal::ZERO);
        assert_eq!(summary.savings_rate, Decimal::ZERO);
        assert_eq!(summary.immediate_orders, 0);
    }
}
