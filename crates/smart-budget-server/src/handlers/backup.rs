//! Backup export/import handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use tracing::info;

use smart_budget_core::export::{export_store_json, import_store_json};
use smart_budget_core::{backup_file_name, Error, ImportStats};

use crate::{AppError, AppState};

/// GET /api/export - Download every month as a JSON backup
pub async fn export_backup(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let json = export_store_json(&state.db).map_err(AppError::from_core)?;
    let file_name = backup_file_name(Utc::now().date_naive());

    info!(file = %file_name, "Backup exported");
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        json,
    )
        .into_response())
}

/// POST /api/import - Replace the store with a backup
///
/// The body is the backup file itself.
pub async fn import_backup(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<ImportStats>, AppError> {
    let stats = import_store_json(&state.db, &body).map_err(|e| match e {
        Error::Json(e) => AppError::bad_request(&format!("Invalid backup JSON: {}", e)),
        other => AppError::from_core(other),
    })?;
    Ok(Json(stats))
}
