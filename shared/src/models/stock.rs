//! Daily stock activity models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One ingredient's activity for a single day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockRecord {
    pub id: String,
    pub ingredient_id: String,
    pub ingredient_name: String,
    pub purchase_amount: Decimal,
    /// Sales revenue attributed to this line (currency)
    pub sales_amount: Decimal,
    /// Sold product units attributed to this line
    pub sold_amount: Decimal,
    pub unit: String,
}

/// All stock records for one calendar day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyEntry {
    pub id: String,
    pub date: NaiveDate,
    pub records: Vec<StockRecord>,
}

impl DailyEntry {
    pub fn record_for(&self, ingredient_id: &str) -> Option<&StockRecord> {
        self.records
            .iter()
            .find(|record| record.ingredient_id == ingredient_id)
    }
}

/// Find the entry recorded for a date
pub fn entry_for_date(entries: &[DailyEntry], date: NaiveDate) -> Option<&DailyEntry> {
    entries.iter().find(|entry| entry.date == date)
}
