//! # Field Labels
//!
//! The closed set of logical cheque fields a template box can be bound to,
//! and [`FieldTable`], a total per-field lookup table.
//!
//! | Label | Meaning |
//! |-------|---------|
//! | `check-no` | Cheque number |
//! | `check-suppliername` | Payee |
//! | `check-amount` | Amount in figures |
//! | `check-amount-words` | Amount in words |
//! | `check-micr` | MICR line |
//! | `check-date` | Date |
//! | `check-signature` | Signature |
//! | `check_debitor` | Account holder |
//! | `check-crossing` | Crossing mark |
//!
//! The labels are wire strings shared with stored preferences and template
//! files, so their spelling (including the underscore in `check_debitor`)
//! must not change.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use crate::error::ChequeError;

/// A logical cheque field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChequeField {
    #[serde(rename = "check-no")]
    Number,
    #[serde(rename = "check-suppliername")]
    SupplierName,
    #[serde(rename = "check-amount")]
    Amount,
    #[serde(rename = "check-amount-words")]
    AmountWords,
    #[serde(rename = "check-micr")]
    Micr,
    #[serde(rename = "check-date")]
    Date,
    #[serde(rename = "check-signature")]
    Signature,
    #[serde(rename = "check_debitor")]
    Debitor,
    #[serde(rename = "check-crossing")]
    Crossing,
}

impl ChequeField {
    /// Every field, in canonical order.
    pub const ALL: [ChequeField; 9] = [
        ChequeField::Number,
        ChequeField::SupplierName,
        ChequeField::Amount,
        ChequeField::AmountWords,
        ChequeField::Micr,
        ChequeField::Date,
        ChequeField::Signature,
        ChequeField::Debitor,
        ChequeField::Crossing,
    ];

    /// The wire label for this field.
    pub fn as_str(self) -> &'static str {
        match self {
            ChequeField::Number => "check-no",
            ChequeField::SupplierName => "check-suppliername",
            ChequeField::Amount => "check-amount",
            ChequeField::AmountWords => "check-amount-words",
            ChequeField::Micr => "check-micr",
            ChequeField::Date => "check-date",
            ChequeField::Signature => "check-signature",
            ChequeField::Debitor => "check_debitor",
            ChequeField::Crossing => "check-crossing",
        }
    }

    /// Position of this field in [`ChequeField::ALL`].
    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ChequeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChequeField {
    type Err = ChequeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChequeField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ChequeError::UnknownField(s.to_string()))
    }
}

// ============================================================================
// FIELD TABLE
// ============================================================================

/// A value for every [`ChequeField`].
///
/// Lookups cannot miss: a table is only constructible with all nine entries.
/// Serializes as a JSON object keyed by wire label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldTable<T> {
    values: [T; 9],
}

impl<T: Copy> FieldTable<T> {
    /// A table with the same value for every field.
    pub fn splat(value: T) -> Self {
        Self { values: [value; 9] }
    }
}

impl<T> FieldTable<T> {
    /// Build a table by evaluating `f` once per field.
    pub fn from_fn(mut f: impl FnMut(ChequeField) -> T) -> Self {
        Self {
            values: ChequeField::ALL.map(&mut f),
        }
    }

    /// Iterate `(field, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (ChequeField, &T)> {
        ChequeField::ALL.into_iter().zip(self.values.iter())
    }
}

impl<T> Index<ChequeField> for FieldTable<T> {
    type Output = T;

    fn index(&self, field: ChequeField) -> &T {
        &self.values[field.index()]
    }
}

impl<T> IndexMut<ChequeField> for FieldTable<T> {
    fn index_mut(&mut self, field: ChequeField) -> &mut T {
        &mut self.values[field.index()]
    }
}

impl<T: Serialize> Serialize for FieldTable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.as_str(), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip_through_from_str() {
        for field in ChequeField::ALL {
            assert_eq!(field.as_str().parse::<ChequeField>().unwrap(), field);
        }
    }

    #[test]
    fn test_serde_label_matches_as_str() {
        for field in ChequeField::ALL {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.as_str()));
        }
    }

    #[test]
    fn test_debitor_uses_underscore() {
        assert_eq!(ChequeField::Debitor.as_str(), "check_debitor");
        assert!("check-debitor".parse::<ChequeField>().is_err());
    }

    #[test]
    fn test_unknown_label_is_error() {
        let err = "check-iban".parse::<ChequeField>().unwrap_err();
        assert!(matches!(err, ChequeError::UnknownField(ref s) if s == "check-iban"));
    }

    #[test]
    fn test_field_table_index_and_serialize() {
        let mut table = FieldTable::splat(1.0f32);
        table[ChequeField::Crossing] = 2.0;
        assert_eq!(table[ChequeField::Crossing], 2.0);
        assert_eq!(table[ChequeField::Number], 1.0);

        let value = serde_json::to_value(table).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 9);
        assert_eq!(obj["check-crossing"], serde_json::json!(2.0));
    }

    #[test]
    fn test_from_fn_visits_in_canonical_order() {
        let table = FieldTable::from_fn(|f| f.as_str().len());
        let order: Vec<_> = table.iter().map(|(f, _)| f).collect();
        assert_eq!(order, ChequeField::ALL.to_vec());
    }
}
