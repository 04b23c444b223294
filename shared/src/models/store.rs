//! Store and store-metrics snapshot models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Alert;

/// Store format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreType {
    #[default]
    Standard,
    Flagship,
}

/// Whether a store is currently trading
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreStatus {
    #[default]
    Active,
    Inactive,
}

/// A store location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Store {
    pub id: String,
    pub name: String,
    pub region: String,
    #[serde(rename = "type")]
    pub store_type: StoreType,
    pub status: StoreStatus,
}

impl Store {
    pub fn is_active(&self) -> bool {
        self.status == StoreStatus::Active
    }
}

/// Usage of one ingredient within a store snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngredientUsage {
    pub ingredient_id: String,
    pub name: String,
    pub theoretical_usage: Decimal,
    pub actual_usage: Decimal,
    /// Stock on hand at snapshot time
    pub stock: Decimal,
    pub unit: String,
    pub cost_per_unit: Decimal,
}

/// Ordering channel of a sale
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SalesPlatform {
    Meituan,
    Eleme,
    Own,
}

/// Product sales aggregated per channel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleRecord {
    pub product_id: String,
    pub product_name: String,
    pub quantity: Decimal,
    pub amount: Decimal,
    pub platform: SalesPlatform,
}

/// Point-in-time operational metrics for one store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreMetrics {
    pub store_id: String,
    pub date: NaiveDate,
    pub ingredients: Vec<IngredientUsage>,
    #[serde(default)]
    pub sales: Vec<SaleRecord>,
    #[serde(default)]
    pub alerts: Vec<Alert>,
}

impl StoreMetrics {
    pub fn usage_for(&self, ingredient_id: &str) -> Option<&IngredientUsage> {
        self.ingredients
            .iter()
            .find(|usage| usage.ingredient_id == ingredient_id)
    }
}
