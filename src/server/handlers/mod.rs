//! HTTP handlers for the server.

pub mod preferences;
pub mod print;
pub mod templates;

use axum::http::StatusCode;

use crate::error::ChequeError;

/// Map a library error to a status code and message.
pub(crate) fn error_response(e: ChequeError) -> (StatusCode, String) {
    let status = match &e {
        ChequeError::TemplateNotFound { .. } => StatusCode::NOT_FOUND,
        ChequeError::UnknownField(_)
        | ChequeError::InvalidTemplate { .. }
        | ChequeError::InvalidBox { .. } => StatusCode::BAD_REQUEST,
        ChequeError::PrintSurfaceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, e.to_string())
}
