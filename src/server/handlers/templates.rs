//! Template API handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Serialize;
use std::sync::Arc;

use crate::preview;
use crate::template::ChequeTemplate;

use super::super::state::AppState;
use super::error_response;

/// One entry of the template picker.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary {
    pub bank_id: String,
    pub model_id: String,
    pub bank_name: String,
    pub model_name: String,
}

/// GET /api/templates - List available templates in store order.
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<TemplateSummary>> {
    let summaries = state
        .templates
        .list_available()
        .into_iter()
        .filter_map(|(bank, model)| state.templates.lookup(&bank, &model).ok())
        .map(|t| TemplateSummary {
            bank_id: t.bank_id.clone(),
            model_id: t.model_id.clone(),
            bank_name: t.bank_name.clone(),
            model_name: t.model_name.clone(),
        })
        .collect();
    Json(summaries)
}

/// GET /api/templates/:bank/:model - Full template geometry.
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path((bank, model)): Path<(String, String)>,
) -> Result<Json<ChequeTemplate>, (StatusCode, String)> {
    let template = state.templates.lookup(&bank, &model).map_err(error_response)?;
    Ok(Json(template.clone()))
}

/// GET /api/templates/:bank/:model/preview.png - Box outlines as PNG.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    Path((bank, model)): Path<(String, String)>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let template = state.templates.lookup(&bank, &model).map_err(error_response)?;
    let png_bytes = preview::render_outline_png(template).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Preview render failed: {}", e),
        )
    })?;
    Ok(([(header::CONTENT_TYPE, "image/png")], png_bytes))
}
