//! User-facing settings

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Settings persisted alongside the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSettings {
    /// Loss-rate percentage above which an analysis record is abnormal
    pub loss_rate_threshold: Decimal,
    pub notification_enabled: bool,
    pub date_format: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            loss_rate_threshold: Decimal::from(5),
            notification_enabled: true,
            date_format: "YYYY-MM-DD".to_string(),
        }
    }
}
