//! View settings handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;

use smart_budget_core::ViewConfig;

use crate::{parse_month, AppError, AppState};

/// Partial update of the persisted view settings
#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub dark_mode: Option<bool>,
    /// `YYYY-MM`
    pub current_month: Option<String>,
}

/// GET /api/settings
pub async fn get_settings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ViewConfig>, AppError> {
    let view = state.db.load_view_config().map_err(AppError::from_core)?;
    Ok(Json(view))
}

/// PUT /api/settings - Returns the settings after the update
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateSettingsRequest>,
) -> Result<Json<ViewConfig>, AppError> {
    let mut view = state.db.load_view_config().map_err(AppError::from_core)?;

    if let Some(dark_mode) = req.dark_mode {
        view.dark_mode = dark_mode;
    }
    if let Some(month) = req.current_month.as_deref() {
        view.current_month = parse_month(month)?;
    }

    state
        .db
        .save_view_config(&view)
        .map_err(AppError::from_core)?;
    Ok(Json(view))
}
