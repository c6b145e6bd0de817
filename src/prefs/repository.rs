//! Preference persistence backends.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::Preferences;
use crate::error::ChequeError;

/// Loads and saves [`Preferences`].
///
/// `load` never fails: unreadable or invalid data yields defaults.
pub trait PreferenceRepository: Send + Sync {
    fn load(&self) -> Preferences;
    fn save(&self, prefs: &Preferences) -> Result<(), ChequeError>;
}

// ============================================================================
// MEMORY
// ============================================================================

/// Key-value store held in memory. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    stored: Arc<Mutex<Map<String, Value>>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from raw stored data (possibly malformed).
    pub fn from_stored(stored: Map<String, Value>) -> Self {
        Self {
            stored: Arc::new(Mutex::new(stored)),
        }
    }

    /// Snapshot of the raw stored data.
    pub fn stored(&self) -> Map<String, Value> {
        self.stored
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl PreferenceRepository for MemoryRepository {
    fn load(&self) -> Preferences {
        Preferences::from_stored(&self.stored())
    }

    fn save(&self, prefs: &Preferences) -> Result<(), ChequeError> {
        let mut stored = self
            .stored
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        stored.extend(prefs.to_stored());
        Ok(())
    }
}

// ============================================================================
// JSON FILE
// ============================================================================

/// Default preferences file name, relative to the working directory.
pub const DEFAULT_PREFS_FILE: &str = "chequeprint-prefs.json";

/// Key-value store in a JSON object file.
///
/// Keys other than the two preference keys are preserved on save.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_stored(&self) -> Option<Map<String, Value>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no preferences file, using defaults");
                return None;
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "cannot read preferences");
                return None;
            }
        };

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => Some(map),
            Ok(other) => {
                tracing::warn!(path = %self.path.display(), "preferences file is not an object: {}", other);
                None
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "preferences file is not valid JSON");
                None
            }
        }
    }
}

impl PreferenceRepository for JsonFileRepository {
    fn load(&self) -> Preferences {
        self.read_stored()
            .map(|stored| Preferences::from_stored(&stored))
            .unwrap_or_default()
    }

    fn save(&self, prefs: &Preferences) -> Result<(), ChequeError> {
        let mut stored = self.read_stored().unwrap_or_default();
        stored.extend(prefs.to_stored());

        let json = serde_json::to_string_pretty(&Value::Object(stored))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "saved preferences");
        Ok(())
    }
}
