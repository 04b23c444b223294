//! Consumption analysis tests
//!
//! Tests for daily and range analysis including:
//! - Missing dates produce empty analysis
//! - Zero theoretical consumption produces zero loss rate
//! - Single-day ranges match daily analysis
//! - Abnormal filtering is a strict, order-preserving subset

use chrono::NaiveDate;
use inventory_engine::{
    daily_analysis, filter_abnormal, range_analysis, summarize, validated_daily_analysis,
    EngineError,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{DailyEntry, InventoryAnalysis, Recipe, RecipeIngredient, StockRecord};
use std::str::FromStr;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

fn line(ingredient_id: &str, name: &str, amount: &str, unit: &str) -> RecipeIngredient {
    RecipeIngredient {
        ingredient_id: ingredient_id.to_string(),
        ingredient_name: name.to_string(),
        amount: dec(amount),
        unit: unit.to_string(),
    }
}

/// Bread and cake, as seeded for a new bakery
fn bakery_recipes() -> Vec<Recipe> {
    vec![
        Recipe {
            id: "1".to_string(),
            name: "Bread".to_string(),
            ingredients: vec![
                line("1", "Flour", "0.5", "kg"),
                line("2", "Sugar", "0.1", "kg"),
                line("5", "Milk", "0.2", "L"),
            ],
        },
        Recipe {
            id: "2".to_string(),
            name: "Cake".to_string(),
            ingredients: vec![
                line("1", "Flour", "0.3", "kg"),
                line("2", "Sugar", "0.2", "kg"),
                line("3", "Cream", "0.1", "kg"),
                line("4", "Egg", "4", "pcs"),
            ],
        },
    ]
}

fn record(ingredient_id: &str, name: &str, purchase: &str, sold: &str) -> StockRecord {
    StockRecord {
        id: format!("rec-{}", ingredient_id),
        ingredient_id: ingredient_id.to_string(),
        ingredient_name: name.to_string(),
        purchase_amount: dec(purchase),
        sales_amount: Decimal::ZERO,
        sold_amount: dec(sold),
        unit: "kg".to_string(),
    }
}

fn entry(d: u32, records: Vec<StockRecord>) -> DailyEntry {
    DailyEntry {
        id: format!("entry-{}", d),
        date: date(d),
        records,
    }
}

fn sample_entries() -> Vec<DailyEntry> {
    vec![
        entry(
            1,
            vec![
                record("1", "Flour", "20", "10"),
                record("2", "Sugar", "5", "4"),
                record("5", "Milk", "3", "0"),
            ],
        ),
        entry(
            2,
            vec![
                record("1", "Flour", "12", "8"),
                record("3", "Cream", "2", "1"),
            ],
        ),
        entry(4, vec![record("4", "Egg", "30", "5")]),
    ]
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Test a full day of analysis against hand-computed figures
    #[test]
    fn test_daily_analysis_figures() {
        let analysis = daily_analysis(date(1), &bakery_recipes(), &sample_entries());
        assert_eq!(analysis.len(), 3);

        // Flour: (0.5 + 0.3) * 10 = 8 theoretical, 20 - 10 = 10 actual
        let flour = &analysis[0];
        assert_eq!(flour.ingredient_id, "1");
        assert_eq!(flour.theoretical_consumption, dec("8"));
        assert_eq!(flour.actual_consumption, dec("10"));
        assert_eq!(flour.loss_rate, dec("-25"));

        // Sugar: (0.1 + 0.2) * 4 = 1.2 theoretical, 5 - 4 = 1 actual
        let sugar = &analysis[1];
        assert_eq!(sugar.theoretical_consumption, dec("1.2"));
        assert_eq!(sugar.actual_consumption, dec("1"));
        assert!((sugar.loss_rate - dec("16.6666")).abs() < dec("0.001"));

        // Milk: nothing sold, so no theoretical consumption and no loss
        let milk = &analysis[2];
        assert_eq!(milk.theoretical_consumption, Decimal::ZERO);
        assert_eq!(milk.loss_rate, Decimal::ZERO);
    }

    /// Records keep entry order and carry their names and units through
    #[test]
    fn test_daily_analysis_preserves_record_order() {
        let analysis = daily_analysis(date(2), &bakery_recipes(), &sample_entries());
        let ids: Vec<&str> = analysis.iter().map(|a| a.ingredient_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(analysis[1].ingredient_name, "Cream");
        assert_eq!(analysis[1].unit, "kg");
        assert!(analysis.iter().all(|a| a.date == date(2)));
    }

    /// Test missing date produces empty analysis
    #[test]
    fn test_daily_analysis_missing_date() {
        assert!(daily_analysis(date(3), &bakery_recipes(), &sample_entries()).is_empty());
        assert!(daily_analysis(date(1), &bakery_recipes(), &[]).is_empty());
    }

    /// Sold exceeding purchased is a negative actual consumption, not an error
    #[test]
    fn test_oversold_is_negative_actual() {
        let entries = vec![entry(1, vec![record("1", "Flour", "2", "10")])];
        let analysis = daily_analysis(date(1), &bakery_recipes(), &entries);
        assert_eq!(analysis[0].actual_consumption, dec("-8"));
        // (8 - -8) / 8 * 100
        assert_eq!(analysis[0].loss_rate, dec("200"));
    }

    /// Test inclusive range concatenates entries in order
    #[test]
    fn test_range_analysis_inclusive() {
        let analysis = range_analysis(date(1), date(2), &bakery_recipes(), &sample_entries());
        let keys: Vec<(NaiveDate, &str)> = analysis
            .iter()
            .map(|a| (a.date, a.ingredient_id.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                (date(1), "1"),
                (date(1), "2"),
                (date(1), "5"),
                (date(2), "1"),
                (date(2), "3"),
            ]
        );
    }

    /// Range order follows entry order, not date order
    #[test]
    fn test_range_analysis_follows_entry_order() {
        let mut entries = sample_entries();
        entries.reverse();
        let analysis = range_analysis(date(1), date(30), &bakery_recipes(), &entries);
        assert_eq!(analysis.first().map(|a| a.date), Some(date(4)));
        assert_eq!(analysis.last().map(|a| a.date), Some(date(1)));
    }

    /// Test inverted range matches nothing
    #[test]
    fn test_range_analysis_inverted() {
        assert!(range_analysis(date(4), date(1), &bakery_recipes(), &sample_entries()).is_empty());
    }

    /// Test strict threshold comparison
    #[test]
    fn test_filter_abnormal_strict() {
        let entries = vec![entry(
            1,
            vec![
                record("1", "Flour", "7.6", "0"),
                record("2", "Sugar", "5", "4"),
            ],
        )];
        // Flour has no sales; sugar: 1.2 theoretical, 1 actual, ~16.7%
        let analysis = daily_analysis(date(1), &bakery_recipes(), &entries);
        assert_eq!(filter_abnormal(&analysis, dec("16")).len(), 1);
        assert!(filter_abnormal(&analysis, analysis[1].loss_rate).is_empty());
        assert!(filter_abnormal(&analysis, Decimal::ZERO)
            .iter()
            .all(|a| a.ingredient_id == "2"));
    }

    /// Test summary averages loss rates and counts abnormal records
    #[test]
    fn test_summarize() {
        let analysis = daily_analysis(date(1), &bakery_recipes(), &sample_entries());
        let summary = summarize(&analysis, Decimal::from(5));
        assert_eq!(summary.record_count, 3);
        assert_eq!(summary.abnormal_count, 1);
        assert_eq!(summary.abnormal[0].ingredient_id, "2");
        let expected: Decimal =
            analysis.iter().map(|a| a.loss_rate).sum::<Decimal>() / Decimal::from(3);
        assert_eq!(summary.average_loss_rate, expected);
    }

    /// Test validated analysis fails fast on duplicate ingredients
    #[test]
    fn test_validated_rejects_duplicate_records() {
        let entries = vec![entry(
            1,
            vec![record("1", "Flour", "2", "1"), record("1", "Flour", "3", "1")],
        )];
        let result = validated_daily_analysis(date(1), &bakery_recipes(), &entries);
        assert!(matches!(result, Err(EngineError::InvalidInput(_))));

        let ok = validated_daily_analysis(date(1), &bakery_recipes(), &sample_entries()).unwrap();
        assert_eq!(ok, daily_analysis(date(1), &bakery_recipes(), &sample_entries()));
    }

    /// Test repeated calls yield identical output
    #[test]
    fn test_analysis_is_idempotent() {
        let recipes = bakery_recipes();
        let entries = sample_entries();
        let first = range_analysis(date(1), date(4), &recipes, &entries);
        let second = range_analysis(date(1), date(4), &recipes, &entries);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating non-negative amounts (0.0 to 100.0)
    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=1000i64).prop_map(|n| Decimal::new(n, 1))
    }

    /// Strategy for a day's records over ingredients 1-5, unique per day
    fn records_strategy() -> impl Strategy<Value = Vec<StockRecord>> {
        prop::collection::vec((amount_strategy(), amount_strategy()), 5).prop_flat_map(
            |amounts| {
                let records: Vec<StockRecord> = amounts
                    .into_iter()
                    .enumerate()
                    .map(|(i, (purchase, sold))| {
                        let mut r = record(&(i + 1).to_string(), "Item", "0", "0");
                        r.purchase_amount = purchase;
                        r.sold_amount = sold;
                        r
                    })
                    .collect();
                Just(records).prop_shuffle()
            },
        )
    }

    fn entries_strategy() -> impl Strategy<Value = Vec<DailyEntry>> {
        prop::collection::btree_set(1u32..=28, 0..6).prop_flat_map(|days| {
            let days: Vec<u32> = days.into_iter().collect();
            let n = days.len();
            prop::collection::vec(records_strategy(), n).prop_map(move |records| {
                days.iter()
                    .zip(records)
                    .map(|(d, records)| entry(*d, records))
                    .collect::<Vec<_>>()
            })
        })
    }

    fn threshold_strategy() -> impl Strategy<Value = Decimal> {
        (-2000i64..=2000i64).prop_map(|n| Decimal::new(n, 1))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Dates without an entry always yield empty analysis
        #[test]
        fn prop_missing_date_is_empty(entries in entries_strategy(), day in 1u32..=28) {
            prop_assume!(!entries.iter().any(|e| e.date == date(day)));
            prop_assert!(daily_analysis(date(day), &bakery_recipes(), &entries).is_empty());
        }

        /// Zero theoretical consumption always means zero loss rate
        #[test]
        fn prop_zero_theoretical_zero_loss(entries in entries_strategy()) {
            let analysis = range_analysis(date(1), date(28), &bakery_recipes(), &entries);
            for item in analysis.iter().filter(|a| a.theoretical_consumption.is_zero()) {
                prop_assert_eq!(item.loss_rate, Decimal::ZERO);
            }
        }

        /// A single-day range equals the daily analysis for that day
        #[test]
        fn prop_single_day_range_matches_daily(entries in entries_strategy(), day in 1u32..=28) {
            let recipes = bakery_recipes();
            prop_assert_eq!(
                range_analysis(date(day), date(day), &recipes, &entries),
                daily_analysis(date(day), &recipes, &entries)
            );
        }

        /// Every analysis record belongs to an entry inside the range
        #[test]
        fn prop_range_respects_bounds(
            entries in entries_strategy(),
            a in 1u32..=28,
            b in 1u32..=28
        ) {
            let analysis = range_analysis(date(a), date(b), &bakery_recipes(), &entries);
            let expected: usize = entries
                .iter()
                .filter(|e| e.date >= date(a) && e.date <= date(b))
                .map(|e| e.records.len())
                .sum();
            prop_assert_eq!(analysis.len(), expected);
            for item in &analysis {
                prop_assert!(item.date >= date(a) && item.date <= date(b));
            }
        }

        /// Filtering is an order-preserving subset strictly above the threshold
        #[test]
        fn prop_filter_abnormal_subset(
            entries in entries_strategy(),
            threshold in threshold_strategy()
        ) {
            let analysis = range_analysis(date(1), date(28), &bakery_recipes(), &entries);
            let abnormal = filter_abnormal(&analysis, threshold);

            prop_assert!(abnormal.iter().all(|a| a.loss_rate > threshold));

            let expected: Vec<InventoryAnalysis> = analysis
                .iter()
                .filter(|a| a.loss_rate > threshold)
                .cloned()
                .collect();
            prop_assert_eq!(abnormal, expected);
        }

        /// Extreme thresholds keep everything or nothing
        #[test]
        fn prop_filter_abnormal_extremes(entries in entries_strategy()) {
            let analysis = range_analysis(date(1), date(28), &bakery_recipes(), &entries);
            prop_assert_eq!(filter_abnormal(&analysis, Decimal::MIN).len(), analysis.len());
            prop_assert!(filter_abnormal(&analysis, Decimal::MAX).is_empty());
        }
    }
}
