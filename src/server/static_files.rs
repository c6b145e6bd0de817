//! Static file serving for the frontend.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use include_dir::{Dir, include_dir};
use std::sync::Arc;

use crate::field::ChequeField;
use crate::prefs::{MAX_MULTIPLIER, MIN_MULTIPLIER, MULTIPLIER_STEP};

use super::state::AppState;

/// Embedded frontend distribution files.
static FRONTEND_DIST: Dir = include_dir!("$CARGO_MANIFEST_DIR/frontend/dist");

/// Serve index.html with a cache-busting parameter and the field list injected.
pub async fn index_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match FRONTEND_DIST.get_file("index.html") {
        Some(file) => {
            let contents = String::from_utf8_lossy(file.contents());
            let cache_bust = format!("?v={}", state.boot_time);
            let busted = contents
                .replace(".js\"", &format!(".js{}\"", cache_bust))
                .replace(".css\"", &format!(".css{}\"", cache_bust));

            // Field labels and multiplier limits as static data (avoids an API round-trip)
            let fields: Vec<&str> = ChequeField::ALL.iter().map(|f| f.as_str()).collect();
            let config = serde_json::json!({
                "fields": fields,
                "minMultiplier": MIN_MULTIPLIER,
                "maxMultiplier": MAX_MULTIPLIER,
                "step": MULTIPLIER_STEP,
            });
            let script = format!("<script>window.__CHEQUE_CONFIG={}</script></head>", config);
            let busted = busted.replace("</head>", &script);

            Html(busted).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Frontend not built").into_response(),
    }
}

/// Cache policy for an asset. Script and style URLs carry the boot-time
/// version from [`index_handler`]; anything else may be replaced in place.
fn cache_control(name: &str) -> &'static str {
    if name.ends_with(".js") || name.ends_with(".css") {
        "public, max-age=31536000, immutable"
    } else {
        "public, max-age=3600"
    }
}

/// GET /assets/*path - Embedded UI assets, served without copying.
pub async fn asset_handler(Path(path): Path<String>) -> Response {
    // Strip the cache-busting query if a client forwards it in the path
    let name = path.split('?').next().unwrap_or_default();

    let Some(file) = FRONTEND_DIST.get_file(format!("assets/{}", name)) else {
        return (StatusCode::NOT_FOUND, format!("No such asset: {}", name)).into_response();
    };

    let mime = mime_guess::from_path(name).first_or_octet_stream().to_string();
    (
        [
            (header::CONTENT_TYPE, mime),
            (header::CACHE_CONTROL, cache_control(name).to_string()),
        ],
        Body::from(file.contents()),
    )
        .into_response()
}
