//! Derived consumption analysis records

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Theoretical versus actual consumption of one ingredient on one day.
///
/// Keyed by (`date`, `ingredient_id`); produced fresh on every query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryAnalysis {
    pub date: NaiveDate,
    pub ingredient_id: String,
    pub ingredient_name: String,
    pub theoretical_consumption: Decimal,
    pub actual_consumption: Decimal,
    /// Percentage; 0 when theoretical consumption is 0
    pub loss_rate: Decimal,
    pub unit: String,
}
