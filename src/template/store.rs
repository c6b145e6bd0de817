//! # Template Store
//!
//! Maps (bank, model) keys to [`ChequeTemplate`]s. The store keeps insertion
//! order; the first active entry is the default selection.
//!
//! ## Usage
//!
//! ```
//! use chequeprint::template::TemplateStore;
//!
//! let store = TemplateStore::builtin();
//! let template = store.lookup("AAIB", "Standard")?;
//! assert_eq!(template.print_width, 172.0);
//!
//! assert!(store.lookup("Nonexistent-Bank", "Standard").is_err());
//! # Ok::<(), chequeprint::ChequeError>(())
//! ```

use std::path::Path;

use super::{ChequeTemplate, RawTemplate};
use crate::error::ChequeError;

/// Compiled-in template data.
pub const BUILTIN_TEMPLATES: &str = include_str!("builtin.json");

/// Ordered collection of cheque templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    templates: Vec<ChequeTemplate>,
}

impl TemplateStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled templates.
    pub fn builtin() -> Self {
        Self::from_json_str(BUILTIN_TEMPLATES).expect("bundled templates are valid")
    }

    /// Parse and validate a JSON array of templates.
    pub fn from_json_str(json: &str) -> Result<Self, ChequeError> {
        let raw: Vec<RawTemplate> = serde_json::from_str(json)?;
        let mut store = Self::new();
        for template in raw {
            store.insert(ChequeTemplate::try_from(template)?);
        }
        Ok(store)
    }

    /// Read templates from a JSON file.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, ChequeError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let store = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), count = store.len(), "loaded templates");
        Ok(store)
    }

    /// Add a template. A template with the same key is replaced in place.
    pub fn insert(&mut self, template: ChequeTemplate) {
        match self.templates.iter_mut().find(|t| t.key() == template.key()) {
            Some(slot) => *slot = template,
            None => self.templates.push(template),
        }
    }

    /// Merge another store into this one (later keys win).
    pub fn extend(&mut self, other: TemplateStore) {
        for template in other.templates {
            self.insert(template);
        }
    }

    /// Find the template for a (bank, model) key.
    ///
    /// Fails with [`ChequeError::TemplateNotFound`]; never falls back to
    /// another template.
    pub fn lookup(&self, bank_id: &str, model_id: &str) -> Result<&ChequeTemplate, ChequeError> {
        self.templates
            .iter()
            .find(|t| t.bank_id == bank_id && t.model_id == model_id)
            .ok_or_else(|| ChequeError::template_not_found(bank_id, model_id))
    }

    /// Active (bank, model) keys in insertion order.
    pub fn list_available(&self) -> Vec<(String, String)> {
        self.templates
            .iter()
            .filter(|t| t.is_active)
            .map(|t| (t.bank_id.clone(), t.model_id.clone()))
            .collect()
    }

    /// The default selection: the first available key.
    pub fn default_key(&self) -> Option<(String, String)> {
        self.list_available().into_iter().next()
    }

    /// All templates, including inactive ones.
    pub fn templates(&self) -> &[ChequeTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
