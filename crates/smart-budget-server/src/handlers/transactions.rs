//! Transaction handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use smart_budget_core::{NewTransaction, Transaction, TransactionType};

use crate::{parse_month, AppError, AppState, SuccessResponse};

/// Query parameters for listing a month's transactions
#[derive(Debug, Deserialize)]
pub struct TransactionQuery {
    /// Day-of-month filter
    pub day: Option<u32>,
}

/// Request body for recording a transaction
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub title: String,
    pub amount: f64,
    /// "income" or "expense"
    #[serde(rename = "type")]
    pub tx_type: String,
    pub category: Option<String>,
    /// Explicit timestamp inside the month; wins over `day`
    pub date: Option<DateTime<Utc>>,
    /// Day of month to file the transaction under
    pub day: Option<u32>,
}

/// GET /api/months/:month/transactions - Newest first
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Path(month): Path<String>,
    Query(params): Query<TransactionQuery>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let month = parse_month(&month)?;
    if let Some(day) = params.day {
        if day == 0 || day > month.days_in_month() {
            return Err(AppError::bad_request("Day is outside the month"));
        }
    }

    let transactions = state
        .db
        .list_transactions(month, params.day)
        .map_err(AppError::from_core)?;
    Ok(Json(transactions))
}

/// POST /api/months/:month/transactions - Record a transaction
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Path(month): Path<String>,
    Json(req): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<Transaction>), AppError> {
    let month = parse_month(&month)?;
    let tx_type: TransactionType = req
        .tx_type
        .parse()
        .map_err(|e: String| AppError::bad_request(&e))?;

    let mut new_tx = NewTransaction::new(req.title, req.amount, tx_type);
    if let Some(category) = req.category {
        new_tx = new_tx.with_category(category);
    }
    if let Some(date) = req.date {
        new_tx = new_tx.with_date(date);
    }

    let tx = state
        .db
        .insert_transaction(month, new_tx, req.day, Utc::now())
        .map_err(AppError::from_core)?;

    info!(id = %tx.id, month = %month, "Transaction recorded");
    Ok((StatusCode::CREATED, Json(tx)))
}

/// DELETE /api/transactions/:id
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    let deleted = state
        .db
        .delete_transaction(&id)
        .map_err(AppError::from_core)?;

    if !deleted {
        return Err(AppError::not_found("Transaction not found"));
    }

    info!(id = %id, "Transaction deleted");
    Ok(Json(SuccessResponse { success: true }))
}
