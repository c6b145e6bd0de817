//! # HTTP Server for Cheque Printing
//!
//! Serves the cheque editor UI and a JSON API around the layout engine.
//!
//! ## Usage
//!
//! ```bash
//! chequeprint serve --listen 0.0.0.0:8080 --prefs chequeprint-prefs.json
//! ```
//!
//! Then open http://localhost:8080 in a browser.
//!
//! ## Routes
//!
//! | Method | Path | Purpose |
//! |--------|------|---------|
//! | GET | `/api/templates` | Template picker entries |
//! | GET | `/api/templates/:bank/:model` | Template geometry |
//! | GET | `/api/templates/:bank/:model/preview.png` | Box outlines |
//! | GET / DELETE | `/api/preferences` | Read / reset preferences |
//! | PUT | `/api/preferences/a4` | A4 toggle |
//! | POST | `/api/preferences/font-size/:field` | Adjust a font multiplier |
//! | POST | `/api/layout` | Live-view placements |
//! | POST | `/api/print` | Self-printing HTML document |

mod handlers;
mod state;
mod static_files;

pub use state::{AppState, ServerConfig};

use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::error::ChequeError;
use crate::print::PrintComposer;
use crate::template::TemplateStore;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Frontend
        .route("/", get(static_files::index_handler))
        .route("/assets/*path", get(static_files::asset_handler))
        // Template API
        .route("/api/templates", get(handlers::templates::list))
        .route("/api/templates/:bank/:model", get(handlers::templates::get))
        .route(
            "/api/templates/:bank/:model/preview.png",
            get(handlers::templates::preview),
        )
        // Preference API
        .route(
            "/api/preferences",
            get(handlers::preferences::get).delete(handlers::preferences::reset),
        )
        .route("/api/preferences/a4", put(handlers::preferences::set_a4))
        .route(
            "/api/preferences/font-size/:field",
            post(handlers::preferences::adjust_font_size),
        )
        // Layout and print API
        .route("/api/layout", post(handlers::print::layout))
        .route("/api/print", post(handlers::print::document))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use chequeprint::server::{serve, ServerConfig};
/// use chequeprint::print::PrintComposer;
/// use chequeprint::template::TemplateStore;
///
/// # async fn example() -> Result<(), chequeprint::ChequeError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
///     prefs_path: None,
/// };
///
/// serve(config, TemplateStore::builtin(), PrintComposer::default()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(
    config: ServerConfig,
    templates: TemplateStore,
    composer: PrintComposer,
) -> Result<(), ChequeError> {
    let app_state = Arc::new(AppState::new(&config, templates, composer));
    let app = router(app_state);

    tracing::info!(listen = %config.listen_addr, "chequeprint HTTP server starting");
    match &config.prefs_path {
        Some(path) => tracing::info!(path = %path.display(), "preferences file"),
        None => tracing::info!("preferences kept in memory"),
    }

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| ChequeError::Server(format!("Failed to bind to {}: {}", config.listen_addr, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| ChequeError::Server(format!("Server error: {}", e)))?;

    Ok(())
}
