//! Budget limit handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use smart_budget_core::{calculate_budget_status, BudgetStatusResult, MonthKey};

use crate::{parse_month, AppError, AppState};

/// Request body for setting a month's budget limit
#[derive(Debug, Deserialize)]
pub struct SetBudgetRequest {
    /// 0 clears the limit
    pub limit: f64,
}

#[derive(Serialize)]
pub struct BudgetResponse {
    pub month: MonthKey,
    pub budget_limit: f64,
    pub status: BudgetStatusResult,
}

/// PUT /api/months/:month/budget - Set the spending limit
pub async fn set_budget(
    State(state): State<Arc<AppState>>,
    Path(month): Path<String>,
    Json(req): Json<SetBudgetRequest>,
) -> Result<Json<BudgetResponse>, AppError> {
    let month = parse_month(&month)?;

    state
        .db
        .set_budget_limit(month, req.limit)
        .map_err(AppError::from_core)?;
    let stats = state.db.month_stats(month).map_err(AppError::from_core)?;

    info!(month = %month, limit = req.limit, "Budget limit updated");
    Ok(Json(BudgetResponse {
        month,
        budget_limit: stats.budget_limit,
        status: calculate_budget_status(stats.total_expense, stats.budget_limit),
    }))
}
