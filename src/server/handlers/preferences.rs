//! Preference API handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::field::ChequeField;
use crate::prefs::{MULTIPLIER_STEP, Preferences};

use super::super::state::AppState;
use super::error_response;

/// GET /api/preferences - Current preferences.
pub async fn get(State(state): State<Arc<AppState>>) -> Json<Preferences> {
    Json(*state.prefs.read().await.current())
}

/// Request body for the A4 toggle.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct A4Request {
    pub print_on_a4: bool,
}

/// PUT /api/preferences/a4 - Set the A4 toggle.
pub async fn set_a4(
    State(state): State<Arc<AppState>>,
    Json(req): Json<A4Request>,
) -> Result<Json<Preferences>, (StatusCode, String)> {
    let mut prefs = state.prefs.write().await;
    prefs.set_print_on_a4(req.print_on_a4).map_err(error_response)?;
    Ok(Json(*prefs.current()))
}

fn default_step() -> f64 {
    MULTIPLIER_STEP
}

/// Request body for a font size adjustment.
#[derive(Debug, Deserialize)]
pub struct AdjustRequest {
    /// Signed increment (default: one step up)
    #[serde(default = "default_step")]
    pub step: f64,
}

/// POST /api/preferences/font-size/:field - Adjust one multiplier.
pub async fn adjust_font_size(
    State(state): State<Arc<AppState>>,
    Path(field): Path<String>,
    Json(req): Json<AdjustRequest>,
) -> Result<Json<Preferences>, (StatusCode, String)> {
    let field: ChequeField = field.parse().map_err(error_response)?;
    let mut prefs = state.prefs.write().await;
    prefs.adjust_font_size(field, req.step).map_err(error_response)?;
    Ok(Json(*prefs.current()))
}

/// DELETE /api/preferences - Restore defaults.
pub async fn reset(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Preferences>, (StatusCode, String)> {
    let mut prefs = state.prefs.write().await;
    prefs.reset().map_err(error_response)?;
    Ok(Json(*prefs.current()))
}
