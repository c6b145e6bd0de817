//! # Field Formatting
//!
//! Turns raw cheque details into the text written inside each box.
//!
//! | Field | Value | Displayed |
//! |-------|-------|-----------|
//! | `check-amount` | `"1,000.00 EGP"` | `"# 1,000.00EGP #"` |
//! | `check-crossing` | `true` | `"//"` |
//! | `check-crossing` | `false` / missing | `""` |
//! | anything else | text | text, unchanged |
//!
//! The amount delimiter stands in for a currency mark the print font lacks,
//! so it is configurable ([`FieldFormatter::with_currency_glyph`]).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::field::ChequeField;

/// The crossing mark printed for crossed cheques.
pub const CROSSING_MARK: &str = "//";

/// Default amount delimiter.
pub const DEFAULT_CURRENCY_GLYPH: &str = "#";

/// A single detail value: free text, or a flag (crossing only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DetailValue {
    Flag(bool),
    Text(String),
}

impl From<&str> for DetailValue {
    fn from(s: &str) -> Self {
        DetailValue::Text(s.to_string())
    }
}

impl From<bool> for DetailValue {
    fn from(b: bool) -> Self {
        DetailValue::Flag(b)
    }
}

/// Field values for one rendering session, keyed by wire label.
///
/// Unknown keys are kept but never rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChequeDetails {
    values: HashMap<String, DetailValue>,
}

impl ChequeDetails {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: ChequeField, value: impl Into<DetailValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: ChequeField, value: impl Into<DetailValue>) {
        self.values.insert(field.as_str().to_string(), value.into());
    }

    pub fn get(&self, field: ChequeField) -> Option<&DetailValue> {
        self.values.get(field.as_str())
    }

    /// Toggle the crossing mark.
    pub fn set_crossing(&mut self, crossed: bool) {
        self.set(ChequeField::Crossing, crossed);
    }

    pub fn is_crossed(&self) -> bool {
        matches!(self.get(ChequeField::Crossing), Some(DetailValue::Flag(true)))
    }
}

/// Derives display strings from detail values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFormatter {
    currency_glyph: String,
}

impl Default for FieldFormatter {
    fn default() -> Self {
        Self {
            currency_glyph: DEFAULT_CURRENCY_GLYPH.to_string(),
        }
    }
}

impl FieldFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different amount delimiter (e.g. `"£"` with a font that maps it).
    pub fn with_currency_glyph(glyph: impl Into<String>) -> Self {
        Self {
            currency_glyph: glyph.into(),
        }
    }

    pub fn currency_glyph(&self) -> &str {
        &self.currency_glyph
    }

    /// Frame an amount as `"<glyph> <amount> <glyph>"`.
    ///
    /// Existing currency markers and all whitespace are stripped first, so
    /// formatting twice gives the same result. An amount that is empty after
    /// stripping renders empty.
    pub fn format_amount(&self, amount: &str) -> String {
        let clean: String = amount
            .chars()
            .filter(|c| !self.is_currency_marker(*c) && !c.is_whitespace())
            .collect();
        if clean.is_empty() {
            return String::new();
        }
        format!("{g} {clean} {g}", g = self.currency_glyph)
    }

    fn is_currency_marker(&self, c: char) -> bool {
        c == '£' || c == '#' || self.currency_glyph.contains(c)
    }

    /// Text to draw for `field`. Never fails; missing values render empty.
    pub fn display_value(&self, field: ChequeField, value: Option<&DetailValue>) -> String {
        match (field, value) {
            (ChequeField::Crossing, Some(DetailValue::Flag(true))) => CROSSING_MARK.to_string(),
            (ChequeField::Crossing, _) => String::new(),
            (ChequeField::Amount, Some(DetailValue::Text(amount))) => self.format_amount(amount),
            (_, Some(DetailValue::Text(text))) => text.clone(),
            (_, Some(DetailValue::Flag(_))) | (_, None) => String::new(),
        }
    }

    /// Display text for `field` looked up in `details`.
    pub fn display(&self, field: ChequeField, details: &ChequeDetails) -> String {
        self.display_value(field, details.get(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_is_framed() {
        let f = FieldFormatter::new();
        assert_eq!(f.format_amount("1,000.00 EGP"), "# 1,000.00EGP #");
        assert_eq!(f.format_amount("£ 250"), "# 250 #");
    }

    #[test]
    fn test_format_amount_idempotent() {
        let f = FieldFormatter::new();
        for input in ["1,000.00 EGP", "# 5 #", "  12.50\t", "££#7#", ""] {
            let once = f.format_amount(input);
            assert_eq!(f.format_amount(&once), once, "input {:?}", input);
        }
    }

    #[test]
    fn test_custom_glyph_idempotent() {
        let f = FieldFormatter::with_currency_glyph("=");
        let once = f.format_amount("# 99 #");
        assert_eq!(once, "= 99 =");
        assert_eq!(f.format_amount(&once), once);
    }

    #[test]
    fn test_crossing_mark() {
        let f = FieldFormatter::new();
        let mut details = ChequeDetails::new();
        assert_eq!(f.display(ChequeField::Crossing, &details), "");

        details.set_crossing(true);
        assert!(details.is_crossed());
        assert_eq!(f.display(ChequeField::Crossing, &details), "//");

        details.set_crossing(false);
        assert_eq!(f.display(ChequeField::Crossing, &details), "");
    }

    #[test]
    fn test_plain_fields_unchanged_and_missing_empty() {
        let f = FieldFormatter::new();
        let details = ChequeDetails::new().with(ChequeField::SupplierName, "  Supplier Name ");
        assert_eq!(f.display(ChequeField::SupplierName, &details), "  Supplier Name ");
        assert_eq!(f.display(ChequeField::Date, &details), "");
        assert_eq!(f.display(ChequeField::Amount, &details), "");
    }

    #[test]
    fn test_details_json_mixed_values() {
        let json = r#"{"check-no": "123456", "check-crossing": true, "check-extra": "x"}"#;
        let details: ChequeDetails = serde_json::from_str(json).unwrap();
        assert_eq!(
            details.get(ChequeField::Number),
            Some(&DetailValue::Text("123456".to_string()))
        );
        assert!(details.is_crossed());
    }
}
