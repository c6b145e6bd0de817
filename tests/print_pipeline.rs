//! # Print Pipeline Tests
//!
//! End-to-end checks from template lookup to the HTML written on a print
//! surface, using the bundled AAIB and CIB templates.
//!
//! ## Test Coverage
//!
//! - **Native mode**: raw pixel geometry and the cheque-size page
//! - **A4 mode**: millimetre geometry, bottom-centred container
//! - **Formatting**: amount framing and the crossing mark
//! - **Failures**: unknown templates and unavailable surfaces reach the caller
//! - **Preferences**: file persistence and fallback on bad stored data

use chequeprint::field::ChequeField;
use chequeprint::format::ChequeDetails;
use chequeprint::layout::{PrintMode, Unit};
use chequeprint::prefs::{
    JsonFileRepository, PreferenceRepository, PreferenceSession, Preferences,
};
use chequeprint::print::{
    FileSurfaceProvider, MemorySurfaceProvider, PrintComposer, PrintOutcome, PrintSession,
    PrintState,
};
use chequeprint::{ChequeError, TemplateStore};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn sample_details() -> ChequeDetails {
    ChequeDetails::new()
        .with(ChequeField::Number, "123456")
        .with(ChequeField::SupplierName, "ACME Trading")
        .with(ChequeField::Amount, "1,000.00 EGP")
        .with(ChequeField::Date, "2024-03-20")
        .with(ChequeField::Crossing, true)
}

fn a4_prefs() -> Preferences {
    Preferences {
        print_on_a4: true,
        ..Preferences::default()
    }
}

/// A fresh path under the system temp dir, unique per test.
fn temp_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("chequeprint-it-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let _ = std::fs::remove_file(&path);
    path
}

fn print_to_memory(bank: &str, model: &str, prefs: &Preferences) -> String {
    let store = TemplateStore::builtin();
    let mut provider = MemorySurfaceProvider::new();
    let mut session = PrintSession::default();
    let outcome = session
        .request_print(&mut provider, &store, bank, model, &sample_details(), prefs)
        .unwrap();
    assert_eq!(outcome, PrintOutcome::Accepted);
    assert_eq!(session.state(), PrintState::Closed);

    let printed = provider.printed();
    assert_eq!(printed.len(), 1);
    assert!(printed[0].closed);
    printed[0].html.clone()
}

// ============================================================================
// NATIVE MODE
// ============================================================================

#[test]
fn test_native_print_uses_raw_pixels() {
    let html = print_to_memory("AAIB", "Standard", &Preferences::default());

    assert!(html.contains("@page { size: 172mm 82mm; margin: 0; }"));
    assert!(html.contains("<title>Print Cheque - AAIB Standard</title>"));
    assert!(html.contains(
        "data-label=\"check-no\" style=\"left: 151.87px; top: 43.72px; width: 190.65px; height: 32.9px;\""
    ));
    // 16px default x 1.5 default multiplier
    assert!(html.contains("font-size: 24px;"));
    assert!(html.contains(">123456</span>"));
    assert!(html.contains(">ACME Trading</span>"));
}

#[test]
fn test_native_scale_factor_fits_physical_width() {
    let store = TemplateStore::builtin();
    let template = store.lookup("AAIB", "Standard").unwrap();
    let doc = PrintComposer::default().compose(template, &sample_details(), &Preferences::default());

    assert_eq!(doc.mode, PrintMode::Native);
    assert_eq!(doc.container.unit, Unit::Px);
    let scale = doc.container.scale.unwrap();
    assert!((scale * template.image_width - 172.0 * 3.7795275591).abs() < 1e-9);
}

// ============================================================================
// A4 MODE
// ============================================================================

#[test]
fn test_a4_print_uses_millimetres() {
    let html = print_to_memory("AAIB", "Standard", &a4_prefs());

    assert!(html.contains("@page { size: A4; margin: 0; }"));
    assert!(html.contains("class=\"a4-print-area\""));
    assert!(html.contains("class=\"cheque-bottom-align\""));
    // 151.87 * 172 / 1300
    assert!(html.contains("data-label=\"check-no\" style=\"left: 20.0936mm;"));
    // 24px x 0.13
    assert!(html.contains("font-size: 3.12mm;"));
    assert!(!html.contains("transform: scale("));
}

#[test]
fn test_a4_axes_scale_independently() {
    let store = TemplateStore::builtin();
    let template = store.lookup("CIB", "Standard").unwrap();
    let doc = PrintComposer::default().compose(template, &sample_details(), &a4_prefs());

    let number = doc.element(ChequeField::Number).unwrap();
    let source = template.box_for(ChequeField::Number).unwrap();
    let sx = template.print_width / template.image_width;
    let sy = template.print_height / template.image_height;
    assert!((number.rect.left - source.xtl * sx).abs() < 1e-9);
    assert!((number.rect.top - source.ytl * sy).abs() < 1e-9);
    assert!((number.rect.height - source.height() * sy).abs() < 1e-9);
}

// ============================================================================
// FORMATTING
// ============================================================================

#[test]
fn test_amount_and_crossing_on_cib() {
    let html = print_to_memory("CIB", "Standard", &Preferences::default());

    assert!(html.contains("># 1,000.00EGP #</span>"));
    assert!(html.contains(">//</span>"));
    // crossing base is double the default size
    assert!(html.contains("font-size: 48px;"));
}

#[test]
fn test_uncrossed_cheque_has_empty_crossing() {
    let store = TemplateStore::builtin();
    let template = store.lookup("CIB", "Standard").unwrap();
    let mut details = sample_details();
    details.set_crossing(false);

    let doc = PrintComposer::default().compose(template, &details, &Preferences::default());
    assert_eq!(doc.element(ChequeField::Crossing).unwrap().text, "");
}

#[test]
fn test_template_without_box_omits_field() {
    let store = TemplateStore::builtin();
    let template = store.lookup("AAIB", "Standard").unwrap();
    let doc = PrintComposer::default().compose(template, &sample_details(), &Preferences::default());

    assert!(doc.element(ChequeField::Crossing).is_none());
    assert_eq!(doc.elements.len(), template.boxes.len());
}

// ============================================================================
// FAILURES
// ============================================================================

#[test]
fn test_unknown_template_is_reported() {
    let store = TemplateStore::builtin();
    let mut provider = MemorySurfaceProvider::new();
    let mut session = PrintSession::default();

    let result = session.request_print(
        &mut provider,
        &store,
        "Nonexistent-Bank",
        "Standard",
        &sample_details(),
        &Preferences::default(),
    );

    assert!(matches!(
        result,
        Err(ChequeError::TemplateNotFound { ref bank, .. }) if bank == "Nonexistent-Bank"
    ));
    assert_eq!(session.state(), PrintState::Idle);
    assert!(provider.printed().is_empty());
}

#[test]
fn test_unwritable_file_surface_is_reported() {
    let store = TemplateStore::builtin();
    let missing_dir = temp_path("no-such-dir").join("cheque.html");
    let mut provider = FileSurfaceProvider::new(&missing_dir);
    let mut session = PrintSession::default();

    let result = session.request_print(
        &mut provider,
        &store,
        "AAIB",
        "Standard",
        &sample_details(),
        &Preferences::default(),
    );

    assert!(matches!(result, Err(ChequeError::PrintSurfaceUnavailable(_))));
    assert_eq!(session.state(), PrintState::Idle);
}

#[test]
fn test_file_surface_writes_document() {
    let store = TemplateStore::builtin();
    let out = temp_path("cheque.html");
    let mut provider = FileSurfaceProvider::new(&out);
    let mut session = PrintSession::default();

    let outcome = session
        .request_print(&mut provider, &store, "CIB", "Standard", &sample_details(), &a4_prefs())
        .unwrap();

    assert_eq!(outcome, PrintOutcome::Accepted);
    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("window.print();"));
}

// ============================================================================
// PREFERENCES
// ============================================================================

#[test]
fn test_preferences_persist_across_sessions() {
    let path = temp_path("prefs-roundtrip.json");

    let mut session = PreferenceSession::open(Box::new(JsonFileRepository::new(&path)));
    session.adjust_font_size(ChequeField::Amount, 0.5).unwrap();
    session.set_print_on_a4(true).unwrap();

    let reloaded = JsonFileRepository::new(&path).load();
    assert_eq!(reloaded.font_multipliers.get(ChequeField::Amount), 2.0);
    assert_eq!(reloaded.font_multipliers.get(ChequeField::Number), 1.5);
    assert!(reloaded.print_on_a4);
}

#[test]
fn test_bad_font_mapping_falls_back_to_defaults() {
    let path = temp_path("prefs-bad.json");
    std::fs::write(
        &path,
        r#"{"chequeFontSizes": {"check-no": 2.0}, "printOnA4": true, "theme": "dark"}"#,
    )
    .unwrap();

    let prefs = JsonFileRepository::new(&path).load();
    assert_eq!(prefs.font_multipliers.get(ChequeField::Number), 1.5);
    assert!(prefs.print_on_a4);

    // Saving keeps unrelated keys.
    JsonFileRepository::new(&path).save(&prefs).unwrap();
    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(stored["theme"], "dark");
    assert_eq!(stored["chequeFontSizes"]["check_debitor"], serde_json::json!(1.5));
}

#[test]
fn test_multiplier_changes_printed_size() {
    let mut prefs = Preferences::default();
    prefs.font_multipliers.adjust(ChequeField::Number, 1.0);

    let store = TemplateStore::builtin();
    let template = store.lookup("AAIB", "Standard").unwrap();
    let doc = PrintComposer::default().compose(template, &sample_details(), &prefs);

    assert_eq!(doc.element(ChequeField::Number).unwrap().font_size, 40.0);
    assert_eq!(doc.element(ChequeField::Amount).unwrap().font_size, 24.0);
}
