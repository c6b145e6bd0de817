//! # User Preferences
//!
//! Two settings survive between sessions:
//!
//! | Key | Value |
//! |-----|-------|
//! | `chequeFontSizes` | object mapping all nine field labels to a multiplier in `[0.5, 3.0]` |
//! | `printOnA4` | boolean |
//!
//! Stored data is validated as a whole. A font-size mapping that misses a
//! label, holds a non-number, or holds an out-of-range multiplier is discarded
//! and the defaults are used for every field. Rejections are logged, never
//! surfaced.
//!
//! Persistence goes through [`PreferenceRepository`] so layout code never
//! touches storage.

mod repository;

pub use repository::{DEFAULT_PREFS_FILE, JsonFileRepository, MemoryRepository, PreferenceRepository};

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::error::ChequeError;
use crate::field::{ChequeField, FieldTable};

/// Storage key for the font multipliers.
pub const FONT_SIZES_KEY: &str = "chequeFontSizes";

/// Storage key for the A4 toggle.
pub const PRINT_ON_A4_KEY: &str = "printOnA4";

pub const MIN_MULTIPLIER: f64 = 0.5;
pub const MAX_MULTIPLIER: f64 = 3.0;
pub const DEFAULT_MULTIPLIER: f64 = 1.5;

/// Increment used by the UI's +/- controls.
pub const MULTIPLIER_STEP: f64 = 0.1;

/// Why stored preference data was discarded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PreferenceRejection {
    #[error("expected a JSON object, got {0}")]
    NotAnObject(String),

    #[error("missing multiplier for '{0}'")]
    MissingField(ChequeField),

    #[error("multiplier for '{0}' is not a number")]
    NotANumber(ChequeField),

    #[error("multiplier for '{field}' is outside [0.5, 3.0]: {value}")]
    OutOfRange { field: ChequeField, value: f64 },

    #[error("printOnA4 must be a boolean, got {0}")]
    NotABoolean(String),

    #[error("stored value is not valid JSON: {0}")]
    InvalidJson(String),
}

// ============================================================================
// FONT MULTIPLIERS
// ============================================================================

/// Per-field font size multipliers, always within `[0.5, 3.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FontMultipliers(FieldTable<f64>);

impl Default for FontMultipliers {
    fn default() -> Self {
        Self(FieldTable::splat(DEFAULT_MULTIPLIER))
    }
}

impl FontMultipliers {
    pub fn get(&self, field: ChequeField) -> f64 {
        self.0[field]
    }

    /// Add `step` to a field's multiplier and clamp. Returns the new value.
    ///
    /// Non-finite steps are ignored.
    pub fn adjust(&mut self, field: ChequeField, step: f64) -> f64 {
        if step.is_finite() {
            let next = self.0[field] + step;
            self.0[field] = next.clamp(MIN_MULTIPLIER, MAX_MULTIPLIER);
        }
        self.0[field]
    }

    /// The underlying table.
    pub fn table(&self) -> FieldTable<f64> {
        self.0
    }

    /// Validate a stored mapping. All nine labels are required.
    pub fn validate(value: &Value) -> Result<Self, PreferenceRejection> {
        let value = decode_stored(value)?;
        let obj = value
            .as_object()
            .ok_or_else(|| PreferenceRejection::NotAnObject(value.to_string()))?;

        let mut table = FieldTable::splat(DEFAULT_MULTIPLIER);
        for field in ChequeField::ALL {
            let raw = obj
                .get(field.as_str())
                .ok_or(PreferenceRejection::MissingField(field))?;
            let n = raw.as_f64().ok_or(PreferenceRejection::NotANumber(field))?;
            if !(MIN_MULTIPLIER..=MAX_MULTIPLIER).contains(&n) {
                return Err(PreferenceRejection::OutOfRange { field, value: n });
            }
            table[field] = n;
        }
        Ok(Self(table))
    }
}

/// Browser storage keeps values as JSON-encoded strings; accept both forms.
fn decode_stored(value: &Value) -> Result<Value, PreferenceRejection> {
    match value {
        Value::String(s) => {
            serde_json::from_str(s).map_err(|e| PreferenceRejection::InvalidJson(e.to_string()))
        }
        other => Ok(other.clone()),
    }
}

// ============================================================================
// PREFERENCES
// ============================================================================

/// All persisted user settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub font_multipliers: FontMultipliers,
    pub print_on_a4: bool,
}

impl Preferences {
    /// Decode stored key-value data. Each key falls back to its default
    /// independently; a rejected key is logged and otherwise ignored.
    pub fn from_stored(stored: &Map<String, Value>) -> Self {
        let mut prefs = Self::default();

        if let Some(value) = stored.get(FONT_SIZES_KEY) {
            match FontMultipliers::validate(value) {
                Ok(multipliers) => prefs.font_multipliers = multipliers,
                Err(reason) => {
                    tracing::warn!(key = FONT_SIZES_KEY, %reason, "discarding stored preference")
                }
            }
        }

        if let Some(value) = stored.get(PRINT_ON_A4_KEY) {
            match decode_stored(value).and_then(|v| {
                v.as_bool()
                    .ok_or_else(|| PreferenceRejection::NotABoolean(v.to_string()))
            }) {
                Ok(flag) => prefs.print_on_a4 = flag,
                Err(reason) => {
                    tracing::warn!(key = PRINT_ON_A4_KEY, %reason, "discarding stored preference")
                }
            }
        }

        prefs
    }

    /// Encode for storage.
    pub fn to_stored(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(
            FONT_SIZES_KEY.to_string(),
            serde_json::to_value(self.font_multipliers).unwrap_or(Value::Null),
        );
        map.insert(PRINT_ON_A4_KEY.to_string(), Value::Bool(self.print_on_a4));
        map
    }
}

// ============================================================================
// SESSION
// ============================================================================

/// In-memory preferences backed by a repository.
///
/// Each mutation is a read-modify-persist sequence.
pub struct PreferenceSession {
    repository: Box<dyn PreferenceRepository>,
    current: Preferences,
}

impl PreferenceSession {
    /// Load preferences from `repository`.
    pub fn open(repository: Box<dyn PreferenceRepository>) -> Self {
        let current = repository.load();
        Self {
            repository,
            current,
        }
    }

    pub fn current(&self) -> &Preferences {
        &self.current
    }

    /// Adjust one multiplier by `step`, clamp, persist. Returns the new value.
    pub fn adjust_font_size(&mut self, field: ChequeField, step: f64) -> Result<f64, ChequeError> {
        let mut next = self.current;
        let value = next.font_multipliers.adjust(field, step);
        self.commit(next)?;
        Ok(value)
    }

    /// Set the A4 toggle and persist.
    pub fn set_print_on_a4(&mut self, print_on_a4: bool) -> Result<(), ChequeError> {
        let next = Preferences {
            print_on_a4,
            ..self.current
        };
        self.commit(next)
    }

    /// Restore defaults and persist.
    pub fn reset(&mut self) -> Result<(), ChequeError> {
        self.commit(Preferences::default())
    }

    /// `current` only changes once the repository has accepted `next`.
    fn commit(&mut self, next: Preferences) -> Result<(), ChequeError> {
        self.repository.save(&next)?;
        self.current = next;
        Ok(())
    }
}
