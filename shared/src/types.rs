//! Common types used across the platform

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Inclusive calendar date range for queries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A range covering a single day
    pub fn day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// Monday through Sunday of the week containing `date`
    pub fn week_of(date: NaiveDate) -> Self {
        let offset = u64::from(date.weekday().num_days_from_monday());
        let start = date - Days::new(offset);
        Self::new(start, start + Days::new(6))
    }

    /// First through last day of the month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(date);
        Self::new(start, end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}
