//! Analysis service: loads recipes and entries and runs the aggregator

use std::sync::Arc;

use chrono::NaiveDate;
use inventory_engine::{summarize, validated_daily_analysis, validated_range_analysis, AnalysisSummary, ReportPeriod};
use serde::{Deserialize, Serialize};
use shared::{DateRange, InventoryAnalysis};

use crate::error::{AppError, AppResult};
use crate::store::InventoryStore;

/// Report window kind as accepted on the query string
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    Day,
    Week,
    Month,
    Custom,
}

/// Query for a loss report
#[derive(Debug, Clone, Deserialize)]
pub struct ReportQuery {
    pub period: PeriodKind,
    /// Reference date for day, week and month; defaults to today
    pub date: Option<NaiveDate>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl ReportQuery {
    pub fn resolve(&self, today: NaiveDate) -> AppResult<DateRange> {
        let reference = self.date.unwrap_or(today);
        let period = match self.period {
            PeriodKind::Day => ReportPeriod::Day,
            PeriodKind::Week => ReportPeriod::Week,
            PeriodKind::Month => ReportPeriod::Month,
            PeriodKind::Custom => match (self.start, self.end) {
                (Some(start), Some(end)) => ReportPeriod::Custom { start, end },
                _ => {
                    return Err(AppError::Validation {
                        field: "start".to_string(),
                        message: "A custom report needs both start and end".to_string(),
                    })
                }
            },
        };
        Ok(period.resolve(reference))
    }
}

/// Loss report over a resolved window
#[derive(Debug, Clone, Serialize)]
pub struct LossReport {
    pub range: DateRange,
    pub summary: AnalysisSummary,
    pub analysis: Vec<InventoryAnalysis>,
}

pub struct AnalysisService {
    store: Arc<dyn InventoryStore>,
}

impl AnalysisService {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    pub fn daily(&self, date: NaiveDate) -> AppResult<Vec<InventoryAnalysis>> {
        let recipes = self.store.load_recipes()?;
        let entries = self.store.load_daily_entries()?;
        Ok(validated_daily_analysis(date, &recipes, &entries)?)
    }

    pub fn range(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<InventoryAnalysis>> {
        let recipes = self.store.load_recipes()?;
        let entries = self.store.load_daily_entries()?;
        Ok(validated_range_analysis(start, end, &recipes, &entries)?)
    }

    /// Analysis over the window plus a summary against the saved threshold
    pub fn report(&self, range: DateRange) -> AppResult<LossReport> {
        let analysis = self.range(range.start, range.end)?;
        let threshold = self.store.load_settings()?.loss_rate_threshold;
        let summary = summarize(&analysis, threshold);

        tracing::debug!(
            "Report {} to {}: {} records, {} abnormal",
            range.start,
            range.end,
            summary.record_count,
            summary.abnormal_count
        );

        Ok(LossReport {
            range,
            summary,
            analysis,
        })
    }
}
