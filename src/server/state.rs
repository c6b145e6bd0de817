//! Server state and configuration.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;

use crate::prefs::{JsonFileRepository, MemoryRepository, PreferenceRepository, PreferenceSession};
use crate::print::PrintComposer;
use crate::template::TemplateStore;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Preferences file; `None` keeps preferences in memory only
    pub prefs_path: Option<PathBuf>,
}

/// Application state shared across handlers.
pub struct AppState {
    pub templates: TemplateStore,
    pub composer: PrintComposer,
    pub prefs: RwLock<PreferenceSession>,
    /// Unix timestamp of server boot for cache busting.
    pub boot_time: u64,
}

impl AppState {
    pub fn new(config: &ServerConfig, templates: TemplateStore, composer: PrintComposer) -> Self {
        let repository: Box<dyn PreferenceRepository> = match &config.prefs_path {
            Some(path) => Box::new(JsonFileRepository::new(path)),
            None => Box::new(MemoryRepository::new()),
        };
        Self::with_repository(templates, composer, repository)
    }

    pub fn with_repository(
        templates: TemplateStore,
        composer: PrintComposer,
        repository: Box<dyn PreferenceRepository>,
    ) -> Self {
        let boot_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self {
            templates,
            composer,
            prefs: RwLock::new(PreferenceSession::open(repository)),
            boot_time,
        }
    }
}
