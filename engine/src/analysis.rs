//! Analysis aggregation over daily entries
//!
//! Builds one [`InventoryAnalysis`] per stock record for a date or an
//! inclusive date range, and surfaces records whose loss rate exceeds a
//! caller-supplied threshold.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    entry_for_date, validate_daily_entries, validate_recipe, DailyEntry, DateRange,
    InventoryAnalysis, Recipe,
};

use crate::consumption::{actual_consumption, loss_rate, theoretical_consumption};
use crate::error::EngineResult;

/// Analysis of every record in the entry for `date`; empty when none exists
pub fn daily_analysis(
    date: NaiveDate,
    recipes: &[Recipe],
    daily_entries: &[DailyEntry],
) -> Vec<InventoryAnalysis> {
    let Some(entry) = entry_for_date(daily_entries, date) else {
        tracing::debug!("No daily entry for {}", date);
        return Vec::new();
    };

    let analysis: Vec<InventoryAnalysis> = entry
        .records
        .iter()
        .map(|record| {
            let theoretical =
                theoretical_consumption(date, &record.ingredient_id, recipes, daily_entries);
            let actual = actual_consumption(record.purchase_amount, record.sold_amount);

            InventoryAnalysis {
                date,
                ingredient_id: record.ingredient_id.clone(),
                ingredient_name: record.ingredient_name.clone(),
                theoretical_consumption: theoretical,
                actual_consumption: actual,
                loss_rate: loss_rate(theoretical, actual),
                unit: record.unit.clone(),
            }
        })
        .collect();

    tracing::debug!("Analyzed {} records for {}", analysis.len(), date);
    analysis
}

/// Concatenated daily analysis of every entry dated within `[start, end]`,
/// in entry order then record order
pub fn range_analysis(
    start: NaiveDate,
    end: NaiveDate,
    recipes: &[Recipe],
    daily_entries: &[DailyEntry],
) -> Vec<InventoryAnalysis> {
    let range = DateRange::new(start, end);

    daily_entries
        .iter()
        .filter(|entry| range.contains(entry.date))
        .flat_map(|entry| daily_analysis(entry.date, recipes, daily_entries))
        .collect()
}

/// Records whose loss rate is strictly above `threshold`, order preserved
pub fn filter_abnormal(analysis: &[InventoryAnalysis], threshold: Decimal) -> Vec<InventoryAnalysis> {
    analysis
        .iter()
        .filter(|item| item.loss_rate > threshold)
        .cloned()
        .collect()
}

/// [`daily_analysis`] after checking recipes and entries for contract violations
pub fn validated_daily_analysis(
    date: NaiveDate,
    recipes: &[Recipe],
    daily_entries: &[DailyEntry],
) -> EngineResult<Vec<InventoryAnalysis>> {
    validate_inputs(recipes, daily_entries)?;
    Ok(daily_analysis(date, recipes, daily_entries))
}

/// [`range_analysis`] after checking recipes and entries for contract violations
pub fn validated_range_analysis(
    start: NaiveDate,
    end: NaiveDate,
    recipes: &[Recipe],
    daily_entries: &[DailyEntry],
) -> EngineResult<Vec<InventoryAnalysis>> {
    validate_inputs(recipes, daily_entries)?;
    Ok(range_analysis(start, end, recipes, daily_entries))
}

fn validate_inputs(recipes: &[Recipe], daily_entries: &[DailyEntry]) -> EngineResult<()> {
    recipes.iter().try_for_each(validate_recipe)?;
    validate_daily_entries(daily_entries)?;
    Ok(())
}

/// Aggregate figures for a set of analysis records
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisSummary {
    pub record_count: usize,
    /// Mean loss rate; 0 for an empty set
    pub average_loss_rate: Decimal,
    pub threshold: Decimal,
    pub abnormal_count: usize,
    pub abnormal: Vec<InventoryAnalysis>,
}

pub fn summarize(analysis: &[InventoryAnalysis], threshold: Decimal) -> AnalysisSummary {
    let average_loss_rate = if analysis.is_empty() {
        Decimal::ZERO
    } else {
        let total: Decimal = analysis.iter().map(|item| item.loss_rate).sum();
        total / Decimal::from(analysis.len())
    };
    let abnormal = filter_abnormal(analysis, threshold);

    AnalysisSummary {
        record_count: analysis.len(),
        average_loss_rate,
        threshold,
        abnormal_count: abnormal.len(),
        abnormal,
    }
}

/// Reporting window relative to a reference date
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "period", rename_all = "snake_case")]
pub enum ReportPeriod {
    Day,
    /// Monday through Sunday
    Week,
    Month,
    Custom { start: NaiveDate, end: NaiveDate },
}

impl ReportPeriod {
    pub fn resolve(&self, reference: NaiveDate) -> DateRange {
        match self {
            ReportPeriod::Day => DateRange::day(reference),
            ReportPeriod::Week => DateRange::week_of(reference),
            ReportPeriod::Month => DateRange::month_of(reference),
            ReportPeriod::Custom { start, end } => DateRange::new(*start, *end),
        }
    }
}
