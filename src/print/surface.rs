//! Surface adapters: HTML files handed to the system browser, and an
//! in-memory recorder.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, Mutex};

use super::session::{PrintOutcome, PrintSurface, SurfaceProvider};
use crate::error::ChequeError;

// ============================================================================
// FILE
// ============================================================================

/// Writes each print document to an HTML file.
///
/// With `launch` set, the print action opens the file with the system
/// browser, whose embedded script shows the print dialog and closes the tab.
/// Otherwise the file itself is the artifact.
#[derive(Debug, Clone)]
pub struct FileSurfaceProvider {
    path: PathBuf,
    launch: bool,
}

impl FileSurfaceProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            launch: false,
        }
    }

    /// Open the written file in the system browser when printing.
    pub fn launch_browser(mut self, launch: bool) -> Self {
        self.launch = launch;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SurfaceProvider for FileSurfaceProvider {
    type Surface = FileSurface;

    fn open(&mut self, title: &str) -> Result<FileSurface, ChequeError> {
        std::fs::File::create(&self.path).map_err(|e| {
            ChequeError::PrintSurfaceUnavailable(format!(
                "cannot create {}: {}",
                self.path.display(),
                e
            ))
        })?;
        tracing::debug!(path = %self.path.display(), title, "opened file surface");
        Ok(FileSurface {
            path: self.path.clone(),
            launch: self.launch,
        })
    }
}

/// An HTML file on disk.
#[derive(Debug)]
pub struct FileSurface {
    path: PathBuf,
    launch: bool,
}

impl PrintSurface for FileSurface {
    fn write_document(&mut self, html: &str) -> Result<(), ChequeError> {
        std::fs::write(&self.path, html)?;
        Ok(())
    }

    fn print(&mut self) -> Result<PrintOutcome, ChequeError> {
        if self.launch {
            open_in_browser(&self.path)?;
        }
        Ok(PrintOutcome::Accepted)
    }

    fn close(&mut self) {
        tracing::debug!(path = %self.path.display(), "closed file surface");
    }
}

fn open_in_browser(path: &Path) -> Result<(), ChequeError> {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else {
        Command::new("xdg-open")
    };

    command.arg(path).spawn().map(|_| ()).map_err(|e| {
        ChequeError::PrintSurfaceUnavailable(format!("cannot launch browser: {}", e))
    })
}

// ============================================================================
// MEMORY
// ============================================================================

/// A document captured by [`MemorySurfaceProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintedDocument {
    pub title: String,
    pub html: String,
    pub closed: bool,
}

/// Records every document it is asked to print. Clones share the record.
#[derive(Debug, Clone)]
pub struct MemorySurfaceProvider {
    printed: Arc<Mutex<Vec<PrintedDocument>>>,
    outcome: PrintOutcome,
}

impl Default for MemorySurfaceProvider {
    fn default() -> Self {
        Self {
            printed: Arc::default(),
            outcome: PrintOutcome::Accepted,
        }
    }
}

impl MemorySurfaceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every print action with `outcome`.
    pub fn with_outcome(outcome: PrintOutcome) -> Self {
        Self {
            outcome,
            ..Self::default()
        }
    }

    /// Documents printed so far.
    pub fn printed(&self) -> Vec<PrintedDocument> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<PrintedDocument>> {
        self.printed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SurfaceProvider for MemorySurfaceProvider {
    type Surface = MemorySurface;

    fn open(&mut self, title: &str) -> Result<MemorySurface, ChequeError> {
        let mut printed = self.lock();
        printed.push(PrintedDocument {
            title: title.to_string(),
            html: String::new(),
            closed: false,
        });
        Ok(MemorySurface {
            printed: self.printed.clone(),
            index: printed.len() - 1,
            outcome: self.outcome,
        })
    }
}

/// Surface backed by a [`MemorySurfaceProvider`] record.
#[derive(Debug)]
pub struct MemorySurface {
    printed: Arc<Mutex<Vec<PrintedDocument>>>,
    index: usize,
    outcome: PrintOutcome,
}

impl MemorySurface {
    fn update(&self, f: impl FnOnce(&mut PrintedDocument)) {
        let mut printed = self
            .printed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(doc) = printed.get_mut(self.index) {
            f(doc);
        }
    }
}

impl PrintSurface for MemorySurface {
    fn write_document(&mut self, html: &str) -> Result<(), ChequeError> {
        self.update(|doc| doc.html = html.to_string());
        Ok(())
    }

    fn print(&mut self) -> Result<PrintOutcome, ChequeError> {
        Ok(self.outcome)
    }

    fn close(&mut self) {
        self.update(|doc| doc.closed = true);
    }
}
