//! Insight, health, and tip handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use smart_budget_core::ai::get_budget_tip;
use smart_budget_core::{
    calculate_budget_status, calculate_category_breakdown, calculate_financial_health,
    BudgetStatusResult, CategoryTotal, HealthResult, InsightResult, MonthKey, PeriodFigures,
    PreviousPeriodFigures,
};

use crate::{parse_month, AppError, AppState};

#[derive(Serialize)]
pub struct InsightsResponse {
    pub month: MonthKey,
    pub insights: InsightResult,
    pub health: HealthResult,
    pub budget: BudgetStatusResult,
    pub breakdown: Vec<CategoryTotal>,
    /// Figures the month was compared against, when the previous month exists
    pub previous: Option<PreviousPeriodFigures>,
}

#[derive(Serialize)]
pub struct TipResponse {
    pub tip: String,
    pub ai_enabled: bool,
}

/// GET /api/months/:month/insights - Rule-based analysis of a month
///
/// Unlike the dashboard this always runs the engine, even for an empty month.
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
    Path(month): Path<String>,
) -> Result<Json<InsightsResponse>, AppError> {
    let month = parse_month(&month)?;
    let data = state.db.get_month_data(month).map_err(AppError::from_core)?;
    let stats = data.stats();
    let breakdown = calculate_category_breakdown(&data.transactions);
    let previous = state
        .db
        .previous_period_figures(month)
        .map_err(AppError::from_core)?;

    let insights = state.engine.generate(
        PeriodFigures::new(stats.total_income, stats.total_expense, stats.budget_limit),
        &breakdown,
        previous,
    );

    Ok(Json(InsightsResponse {
        month,
        insights,
        health: calculate_financial_health(
            stats.total_income,
            stats.total_expense,
            stats.budget_limit,
        ),
        budget: calculate_budget_status(stats.total_expense, stats.budget_limit),
        breakdown,
        previous,
    }))
}

/// GET /api/months/:month/tip - One-line AI budgeting tip
///
/// Always 200: failures come back as a fallback tip.
pub async fn get_tip(
    State(state): State<Arc<AppState>>,
    Path(month): Path<String>,
) -> Result<Json<TipResponse>, AppError> {
    let month = parse_month(&month)?;
    let transactions = state
        .db
        .list_transactions(month, None)
        .map_err(AppError::from_core)?;

    let tip = get_budget_tip(state.ai.as_ref(), &transactions).await;
    Ok(Json(TipResponse {
        tip,
        ai_enabled: state.ai.is_some(),
    }))
}
