//! Month handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use smart_budget_core::{BudgetStats, MonthDashboard, MonthData, MonthKey};

use crate::{parse_month, AppError, AppState};

/// A stored month with its totals
#[derive(Serialize)]
pub struct MonthSummary {
    pub month: MonthKey,
    pub label: String,
    pub stats: BudgetStats,
}

#[derive(Serialize)]
pub struct MonthResponse {
    pub month: MonthKey,
    pub label: String,
    pub days_in_month: u32,
    #[serde(flatten)]
    pub data: MonthData,
    pub stats: BudgetStats,
}

/// Query parameters for the dashboard
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Day-of-month timeline filter
    pub day: Option<u32>,
}

/// GET /api/months - Stored months, oldest first
pub async fn list_months(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MonthSummary>>, AppError> {
    let months = state.db.list_months().map_err(AppError::from_core)?;

    let mut summaries = Vec::with_capacity(months.len());
    for month in months {
        summaries.push(MonthSummary {
            month,
            label: month.label(),
            stats: state.db.month_stats(month).map_err(AppError::from_core)?,
        });
    }

    Ok(Json(summaries))
}

/// GET /api/months/:month - Raw month data (empty when never written)
pub async fn get_month(
    State(state): State<Arc<AppState>>,
    Path(month): Path<String>,
) -> Result<Json<MonthResponse>, AppError> {
    let month = parse_month(&month)?;
    let data = state.db.get_month_data(month).map_err(AppError::from_core)?;
    let stats = data.stats();

    Ok(Json(MonthResponse {
        month,
        label: month.label(),
        days_in_month: month.days_in_month(),
        data,
        stats,
    }))
}

/// GET /api/months/:month/dashboard - Everything the month screen shows
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Path(month): Path<String>,
    Query(params): Query<DashboardQuery>,
) -> Result<Json<MonthDashboard>, AppError> {
    let month = parse_month(&month)?;

    let mut view = state.db.load_view_config().map_err(AppError::from_core)?;
    view.current_month = month;
    let view = view
        .with_selected_day(params.day)
        .map_err(AppError::from_core)?;

    let dashboard =
        MonthDashboard::build(&state.db, &view, &state.engine).map_err(AppError::from_core)?;
    Ok(Json(dashboard))
}
