//! Operational alert models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kinds of operational alerts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    HighLossRate,
    LowStock,
    AbnormalUsage,
    SalesDrop,
    CostIncrease,
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertType::HighLossRate => write!(f, "High Loss Rate"),
            AlertType::LowStock => write!(f, "Low Stock"),
            AlertType::AbnormalUsage => write!(f, "Abnormal Usage"),
            AlertType::SalesDrop => write!(f, "Sales Drop"),
            AlertType::CostIncrease => write!(f, "Cost Increase"),
        }
    }
}

/// Alert severity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Urgent,
    Warning,
    Notice,
}

/// Handling state of an alert, managed outside the engine
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    #[default]
    New,
    Processing,
    Resolved,
}

/// An alert raised by the store monitor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    pub id: Uuid,
    pub store_id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub level: AlertLevel,
    pub timestamp: DateTime<Utc>,
    /// Name of the measured subject (usually the ingredient name)
    pub metric: String,
    pub value: Decimal,
    pub threshold: Decimal,
    pub message: String,
    pub suggestions: Vec<String>,
    pub status: AlertStatus,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cost_impact: Option<Decimal>,
}
