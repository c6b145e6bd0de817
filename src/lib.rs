//! # Chequeprint - Cheque Field Layout and Printing
//!
//! Chequeprint positions field values (cheque number, payee, amount, date,
//! ...) on scanned bank cheque templates and compiles a print-ready document
//! at physical paper size. It provides:
//!
//! - **Templates**: reference-image geometry, physical size and field boxes per (bank, model)
//! - **Layout**: box placement in pixels (native) or millimetres (A4)
//! - **Formatting**: amount framing and the crossing mark
//! - **Preferences**: per-field font multipliers and the A4 toggle, persisted
//! - **Printing**: a pure print-document model, HTML codegen and surface adapters
//!
//! ## Quick Start
//!
//! ```
//! use chequeprint::{
//!     field::ChequeField,
//!     format::ChequeDetails,
//!     prefs::Preferences,
//!     print::{MemorySurfaceProvider, PrintSession},
//!     template::TemplateStore,
//! };
//!
//! let store = TemplateStore::builtin();
//! let details = ChequeDetails::new()
//!     .with(ChequeField::Number, "123456")
//!     .with(ChequeField::Amount, "1,000.00 EGP")
//!     .with(ChequeField::Crossing, true);
//!
//! let mut provider = MemorySurfaceProvider::new();
//! let mut session = PrintSession::default();
//! session.request_print(&mut provider, &store, "AAIB", "Standard", &details, &Preferences::default())?;
//!
//! assert!(provider.printed()[0].html.contains("# 1,000.00EGP #"));
//! # Ok::<(), chequeprint::ChequeError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`field`] | Field labels and per-field tables |
//! | [`template`] | Templates and the template store |
//! | [`layout`] | Coordinate transform |
//! | [`format`] | Display values |
//! | [`prefs`] | Preferences and their persistence |
//! | [`print`] | Print documents, HTML, print session |
//! | [`preview`] | PNG outline preview |
//! | [`server`] | HTTP server and web UI |
//! | [`error`] | Error types |

pub mod error;
pub mod field;
pub mod format;
pub mod layout;
pub mod prefs;
pub mod preview;
pub mod print;
pub mod server;
pub mod template;

// Re-exports for convenience
pub use error::ChequeError;
pub use field::ChequeField;
pub use template::{ChequeTemplate, TemplateStore};
