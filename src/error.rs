//! # Error Types
//!
//! This module defines error types used throughout the chequeprint library.

use thiserror::Error;

/// Main error type for chequeprint operations
#[derive(Debug, Error)]
pub enum ChequeError {
    /// No template is registered under the requested (bank, model) key
    #[error("Template not found: {bank}/{model}")]
    TemplateNotFound { bank: String, model: String },

    /// A label outside the recognised field enumeration
    #[error("Unknown field label: {0}")]
    UnknownField(String),

    /// Template geometry or typography failed validation
    #[error("Invalid template '{id}': {reason}")]
    InvalidTemplate { id: String, reason: String },

    /// A field box that cannot be placed (zero area, non-finite coordinates)
    #[error("Invalid box '{label}' in template '{template}': {reason}")]
    InvalidBox {
        template: String,
        label: String,
        reason: String,
    },

    /// The platform refused to open a surface to print on
    #[error("Print surface unavailable: {0}")]
    PrintSurfaceUnavailable(String),

    /// Preview rendering error
    #[error("Preview error: {0}")]
    Preview(#[from] crate::preview::PreviewError),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP server error
    #[error("Server error: {0}")]
    Server(String),
}

impl ChequeError {
    /// Shorthand for [`ChequeError::TemplateNotFound`].
    pub fn template_not_found(bank: &str, model: &str) -> Self {
        Self::TemplateNotFound {
            bank: bank.to_string(),
            model: model.to_string(),
        }
    }
}
