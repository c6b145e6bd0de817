//! Layout and print-document handlers.
//!
//! The browser is the print surface: `POST /api/print` returns a complete
//! HTML page that prints itself on load and closes afterwards.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::Html,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::format::ChequeDetails;
use crate::layout::{FontTables, Placement, PrintMode, native_scale_factor, place_all};

use super::super::state::AppState;
use super::error_response;

/// Request body shared by the layout and print endpoints.
#[derive(Debug, Deserialize)]
pub struct PrintRequest {
    pub bank: String,
    pub model: String,
    #[serde(default)]
    pub details: ChequeDetails,
    /// Overrides the stored A4 preference for this request
    #[serde(default)]
    pub mode: Option<PrintMode>,
}

/// Placements for the live view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResponse {
    pub mode: PrintMode,
    pub native_scale: f64,
    pub placements: Vec<Placement>,
    pub texts: Vec<String>,
}

/// POST /api/layout - Box placements and display text.
pub async fn layout(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PrintRequest>,
) -> Result<Json<LayoutResponse>, (StatusCode, String)> {
    let template = state
        .templates
        .lookup(&req.bank, &req.model)
        .map_err(error_response)?;
    let prefs = *state.prefs.read().await.current();
    let mode = req.mode.unwrap_or_default();

    let config = &state.composer.config;
    let fonts = FontTables::for_template(template, prefs.font_multipliers.table());
    let placements = place_all(template, mode, &fonts, config);
    let texts = placements
        .iter()
        .map(|p| state.composer.formatter.display(p.label, &req.details))
        .collect();

    Ok(Json(LayoutResponse {
        mode,
        native_scale: native_scale_factor(template, config),
        placements,
        texts,
    }))
}

/// POST /api/print - Self-printing HTML document.
pub async fn document(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PrintRequest>,
) -> Result<Html<String>, (StatusCode, String)> {
    let template = state
        .templates
        .lookup(&req.bank, &req.model)
        .map_err(error_response)?;
    let prefs = *state.prefs.read().await.current();
    let mode = req
        .mode
        .unwrap_or_else(|| PrintMode::from_a4_flag(prefs.print_on_a4));

    let doc = state
        .composer
        .compose_with_mode(template, &req.details, &prefs, mode);
    tracing::info!(bank = %req.bank, model = %req.model, ?mode, "composed print document");
    Ok(Html(doc.to_html()))
}
