//! Purchase forecast models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Purchase recommendation for one ingredient of a store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseForecast {
    pub store_id: String,
    pub ingredient_id: String,
    pub ingredient_name: String,
    pub unit: String,
    pub current_stock: Decimal,
    pub average_daily_usage: Decimal,
    /// Never negative
    pub recommended_purchase: Decimal,
    /// Days until an order should be placed; 0 means order now
    pub days_to_order: Decimal,
    pub estimated_cost: Decimal,
    /// Never negative
    pub potential_savings: Decimal,
}
