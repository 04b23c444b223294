//! HTTP handlers for loss analysis endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use shared::InventoryAnalysis;

use super::blocking;
use crate::error::AppResult;
use crate::services::analysis::{LossReport, ReportQuery};
use crate::services::AnalysisService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Analysis for one date
pub async fn get_daily_analysis(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> AppResult<Json<Vec<InventoryAnalysis>>> {
    let service = AnalysisService::new(state.store);
    Ok(Json(blocking(move || service.daily(date)).await?))
}

/// Analysis for an inclusive date range
pub async fn get_range_analysis(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<Vec<InventoryAnalysis>>> {
    let service = AnalysisService::new(state.store);
    Ok(Json(blocking(move || service.range(query.start, query.end)).await?))
}

/// Loss report for a day, week, month or custom window
pub async fn get_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<LossReport>> {
    let range = query.resolve(Utc::now().date_naive())?;
    let service = AnalysisService::new(state.store);
    Ok(Json(blocking(move || service.report(range)).await?))
}
