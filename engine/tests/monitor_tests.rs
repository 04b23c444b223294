//! Store monitor tests
//!
//! Tests for alert evaluation including:
//! - Loss-rate alerts and severity escalation
//! - Low-stock alerts and the no-usage sentinel
//! - Alert identity, timestamps and idempotence

use chrono::{TimeZone, Utc};
use inventory_engine::{
    stock_days, summarize_alerts, usage_loss_rate, MonitorConfig, MonitorEngine,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{Alert, AlertLevel, AlertStatus, AlertType, IngredientUsage, StoreMetrics};
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn usage(id: &str, name: &str, theoretical: &str, actual: &str, stock: &str) -> IngredientUsage {
    IngredientUsage {
        ingredient_id: id.to_string(),
        name: name.to_string(),
        theoretical_usage: dec(theoretical),
        actual_usage: dec(actual),
        stock: dec(stock),
        unit: "kg".to_string(),
        cost_per_unit: dec("200"),
    }
}

fn metrics(store_id: &str, ingredients: Vec<IngredientUsage>) -> StoreMetrics {
    StoreMetrics {
        store_id: store_id.to_string(),
        date: chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        ingredients,
        sales: vec![],
        alerts: vec![],
    }
}

fn engine() -> MonitorEngine {
    MonitorEngine::new(MonitorConfig::default())
}

/// Alert fields that must be stable across evaluations
fn stable_fields(alert: &Alert) -> (AlertType, AlertLevel, String, Decimal, Decimal, String) {
    (
        alert.alert_type,
        alert.level,
        alert.metric.clone(),
        alert.value,
        alert.threshold,
        alert.message.clone(),
    )
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// 30% loss against a 5% threshold escalates to urgent
    #[test]
    fn test_high_loss_rate_urgent() {
        let snapshot = metrics("store1", vec![usage("1", "Coffee beans", "50", "65", "1000")]);
        let alerts = engine().check_store(&snapshot);

        assert_eq!(alerts.len(), 1);
        let alert = &alerts[0];
        assert_eq!(alert.alert_type, AlertType::HighLossRate);
        assert_eq!(alert.level, AlertLevel::Urgent);
        assert_eq!(alert.value, dec("30"));
        assert_eq!(alert.threshold, dec("5"));
        assert_eq!(alert.metric, "Coffee beans");
        assert_eq!(alert.store_id, "store1");
        assert_eq!(alert.status, AlertStatus::New);
        assert_eq!(alert.suggestions.len(), 5);
        assert!(alert.message.contains("Coffee beans"));
        assert!(alert.message.contains("30"));
        // 15 kg over theoretical at 200 per kg
        assert_eq!(alert.cost_impact, Some(dec("3000")));
    }

    /// Loss between one and two times the threshold is a warning
    #[test]
    fn test_high_loss_rate_warning() {
        let snapshot = metrics("store1", vec![usage("1", "Milk", "100", "108", "1000")]);
        let alerts = engine().check_store(&snapshot);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].level, AlertLevel::Warning);
        assert_eq!(alerts[0].value, dec("8"));
    }

    /// Exactly twice the threshold stays a warning, exactly the threshold is silent
    #[test]
    fn test_loss_rate_boundaries() {
        let at_double = metrics("s", vec![usage("1", "Milk", "100", "110", "1000")]);
        assert_eq!(engine().check_store(&at_double)[0].level, AlertLevel::Warning);

        let at_threshold = metrics("s", vec![usage("1", "Milk", "100", "105", "1000")]);
        assert!(engine().check_store(&at_threshold).is_empty());
    }

    /// Using less than theoretical never raises a loss alert
    #[test]
    fn test_under_usage_is_not_loss() {
        let snapshot = metrics("s", vec![usage("1", "Milk", "100", "60", "1000")]);
        assert!(engine().check_store(&snapshot).is_empty());
        assert_eq!(usage_loss_rate(&snapshot.ingredients[0]), dec("-40"));
    }

    /// Zero theoretical usage means zero loss
    #[test]
    fn test_zero_theoretical_usage() {
        let snapshot = metrics("s", vec![usage("1", "Syrup", "0", "5", "1000")]);
        assert!(engine()
            .check_store(&snapshot)
            .iter()
            .all(|a| a.alert_type != AlertType::HighLossRate));
    }

    /// No usage reports the 999-day sentinel and never a low-stock alert
    #[test]
    fn test_no_usage_sentinel() {
        let snapshot = metrics("s", vec![usage("1", "Coffee beans", "0", "0", "10")]);
        assert_eq!(stock_days(&snapshot.ingredients[0]), dec("999"));
        assert!(engine().check_store(&snapshot).is_empty());
    }

    /// Less than a day of stock is urgent
    #[test]
    fn test_low_stock_urgent() {
        let snapshot = metrics("s", vec![usage("1", "Milk", "12", "12", "6")]);
        let alerts = engine().check_store(&snapshot);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::LowStock);
        assert_eq!(alerts[0].level, AlertLevel::Urgent);
        assert_eq!(alerts[0].value, dec("0.5"));
        assert_eq!(alerts[0].threshold, dec("3"));
        assert_eq!(alerts[0].suggestions.len(), 4);
        assert_eq!(alerts[0].cost_impact, None);
    }

    /// Between one day and the warning horizon is a warning
    #[test]
    fn test_low_stock_warning() {
        let snapshot = metrics("s", vec![usage("1", "Milk", "10", "10", "25")]);
        let alerts = engine().check_store(&snapshot);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].level, AlertLevel::Warning);
        assert_eq!(alerts[0].value, dec("2.5"));
    }

    /// Exactly the warning horizon is not low
    #[test]
    fn test_low_stock_boundary() {
        let snapshot = metrics("s", vec![usage("1", "Milk", "10", "10", "30")]);
        assert!(engine().check_store(&snapshot).is_empty());
    }

    /// Loss alerts come before stock alerts, each in ingredient order
    #[test]
    fn test_alert_ordering() {
        let snapshot = metrics(
            "store2",
            vec![
                usage("1", "Coffee beans", "50", "65", "20"),
                usage("2", "Milk", "10", "12", "1000"),
                usage("3", "Syrup", "2", "2", "3"),
            ],
        );
        let alerts = engine().check_store(&snapshot);
        let kinds: Vec<(AlertType, &str)> = alerts
            .iter()
            .map(|a| (a.alert_type, a.metric.as_str()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (AlertType::HighLossRate, "Coffee beans"),
                (AlertType::HighLossRate, "Milk"),
                (AlertType::LowStock, "Coffee beans"),
                (AlertType::LowStock, "Syrup"),
            ]
        );
    }

    /// Custom thresholds change what is flagged
    #[test]
    fn test_custom_thresholds() {
        let lenient = MonitorEngine::new(MonitorConfig {
            loss_rate_threshold: dec("40"),
            stock_warning_days: dec("1"),
            ..MonitorConfig::default()
        });
        let snapshot = metrics("s", vec![usage("1", "Coffee beans", "50", "65", "65")]);
        assert!(lenient.check_store(&snapshot).is_empty());
        assert_eq!(engine().check_store(&snapshot).len(), 2);
    }

    /// Alerts carry fresh ids and the supplied evaluation time
    #[test]
    fn test_alert_identity_and_timestamp() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();
        let snapshot = metrics("s", vec![usage("1", "Coffee beans", "50", "65", "20")]);
        let alerts = engine().check_store_at(&snapshot, now);

        assert_eq!(alerts.len(), 2);
        assert_ne!(alerts[0].id, alerts[1].id);
        assert!(alerts.iter().all(|a| a.timestamp == now));

        let json = serde_json::to_value(&alerts[0]).unwrap();
        assert_eq!(json["timestamp"], "2024-06-01T09:30:00Z");
        assert_eq!(json["type"], "HIGH_LOSS_RATE");
        assert_eq!(json["level"], "urgent");
        assert_eq!(json["status"], "new");
    }

    /// Test repeated evaluation is identical apart from id and timestamp
    #[test]
    fn test_check_store_idempotent() {
        let snapshot = metrics(
            "s",
            vec![
                usage("1", "Coffee beans", "50", "65", "20"),
                usage("2", "Milk", "10", "11", "5"),
            ],
        );
        let first: Vec<_> = engine().check_store(&snapshot).iter().map(stable_fields).collect();
        let second: Vec<_> = engine().check_store(&snapshot).iter().map(stable_fields).collect();
        assert_eq!(first, second);
    }

    /// Test summary counts distinct stores and severities
    #[test]
    fn test_summarize_alerts() {
        let mut alerts = engine().check_store(&metrics(
            "store1",
            vec![usage("1", "Coffee beans", "50", "65", "1000")],
        ));
        alerts.extend(engine().check_store(&metrics(
            "store2",
            vec![
                usage("2", "Milk", "100", "108", "1000"),
                usage("3", "Syrup", "2", "2", "1"),
            ],
        )));

        let summary = summarize_alerts(5, &alerts);
        assert_eq!(summary.total_stores, 5);
        assert_eq!(summary.stores_with_alerts, 2);
        assert_eq!(summary.urgent_alerts, 2);
        assert_eq!(summary.warning_alerts, 1);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for positive usage quantities (0.1 to 100.0)
    fn quantity_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=1000i64).prop_map(|n| Decimal::new(n, 1))
    }

    fn usage_strategy() -> impl Strategy<Value = IngredientUsage> {
        (quantity_strategy(), quantity_strategy(), quantity_strategy()).prop_map(
            |(theoretical, actual, stock)| IngredientUsage {
                ingredient_id: "1".to_string(),
                name: "Coffee beans".to_string(),
                theoretical_usage: theoretical,
                actual_usage: actual,
                stock,
                unit: "kg".to_string(),
                cost_per_unit: Decimal::from(200),
            },
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// A loss alert is raised exactly when loss exceeds the threshold
        #[test]
        fn prop_loss_alert_iff_above_threshold(ingredient in usage_strategy()) {
            let loss = usage_loss_rate(&ingredient);
            let alerts = engine().check_store(&metrics("s", vec![ingredient]));
            let loss_alerts: Vec<&Alert> = alerts
                .iter()
                .filter(|a| a.alert_type == AlertType::HighLossRate)
                .collect();

            if loss > Decimal::from(5) {
                prop_assert_eq!(loss_alerts.len(), 1);
                let expected = if loss > Decimal::from(10) {
                    AlertLevel::Urgent
                } else {
                    AlertLevel::Warning
                };
                prop_assert_eq!(loss_alerts[0].level, expected);
            } else {
                prop_assert!(loss_alerts.is_empty());
            }
        }

        /// A stock alert is raised exactly when runway is below the horizon
        #[test]
        fn prop_stock_alert_iff_below_horizon(ingredient in usage_strategy()) {
            let days = stock_days(&ingredient);
            let alerts = engine().check_store(&metrics("s", vec![ingredient]));
            let stock_alerts = alerts
                .iter()
                .filter(|a| a.alert_type == AlertType::LowStock)
                .count();
            prop_assert_eq!(stock_alerts, usize::from(days < Decimal::from(3)));
        }

        /// Every alert starts new and belongs to the evaluated store
        #[test]
        fn prop_alerts_start_new(ingredients in prop::collection::vec(usage_strategy(), 0..8)) {
            for alert in engine().check_store(&metrics("store9", ingredients)) {
                prop_assert_eq!(alert.status, AlertStatus::New);
                prop_assert_eq!(alert.store_id.as_str(), "store9");
            }
        }
    }
}
