//! # Print Session
//!
//! Drives one print request through its states:
//!
//! ```text
//!  Idle ──request──► Composing ──surface opened──► AwaitingPrint ──print done──► Closed
//!   ▲                    │
//!   └──── error ─────────┘   (template missing, surface unavailable, write failed)
//! ```
//!
//! The surface is closed by the session after the print action returns,
//! whether the user accepted or cancelled the dialog. Callers never clean up.
//! Failures are returned to the caller so they can be shown to the user.

use super::PrintComposer;
use crate::error::ChequeError;
use crate::format::ChequeDetails;
use crate::prefs::Preferences;
use crate::template::TemplateStore;

/// Lifecycle state of a [`PrintSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintState {
    Idle,
    Composing,
    AwaitingPrint,
    Closed,
}

/// How the platform print action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintOutcome {
    Accepted,
    Cancelled,
}

/// A rendering surface holding one print document.
pub trait PrintSurface {
    /// Load the composed markup into the surface.
    fn write_document(&mut self, html: &str) -> Result<(), ChequeError>;

    /// Run the platform print action once the surface has loaded.
    fn print(&mut self) -> Result<PrintOutcome, ChequeError>;

    /// Release the surface.
    fn close(&mut self);
}

/// Opens rendering surfaces (a browser window, a file, ...).
pub trait SurfaceProvider {
    type Surface: PrintSurface;

    /// Open a fresh surface. Fails with
    /// [`ChequeError::PrintSurfaceUnavailable`] when the platform refuses.
    fn open(&mut self, title: &str) -> Result<Self::Surface, ChequeError>;
}

/// Print request state machine.
#[derive(Debug)]
pub struct PrintSession {
    composer: PrintComposer,
    state: PrintState,
}

impl PrintSession {
    pub fn new(composer: PrintComposer) -> Self {
        Self {
            composer,
            state: PrintState::Idle,
        }
    }

    pub fn state(&self) -> PrintState {
        self.state
    }

    pub fn composer(&self) -> &PrintComposer {
        &self.composer
    }

    fn transition(&mut self, to: PrintState) {
        tracing::debug!(from = ?self.state, to = ?to, "print session");
        self.state = to;
    }

    /// Compose the cheque for `(bank, model)` and print it on a new surface.
    pub fn request_print<P: SurfaceProvider>(
        &mut self,
        provider: &mut P,
        store: &TemplateStore,
        bank_id: &str,
        model_id: &str,
        details: &ChequeDetails,
        prefs: &Preferences,
    ) -> Result<PrintOutcome, ChequeError> {
        // Requests are sequential (`&mut self`): entry is Idle or Closed.
        if self.state == PrintState::Closed {
            self.transition(PrintState::Idle);
        }

        self.transition(PrintState::Composing);

        let template = match store.lookup(bank_id, model_id) {
            Ok(template) => template,
            Err(e) => {
                self.transition(PrintState::Idle);
                return Err(e);
            }
        };
        let document = self.composer.compose(template, details, prefs);
        let html = document.to_html();

        let mut surface = match provider.open(&document.title) {
            Ok(surface) => surface,
            Err(e) => {
                tracing::warn!(error = %e, "could not open print surface");
                self.transition(PrintState::Idle);
                return Err(e);
            }
        };

        if let Err(e) = surface.write_document(&html) {
            surface.close();
            self.transition(PrintState::Idle);
            return Err(e);
        }

        self.transition(PrintState::AwaitingPrint);
        let outcome = surface.print();
        surface.close();
        self.transition(PrintState::Closed);

        if let Ok(outcome) = &outcome {
            tracing::info!(bank = bank_id, model = model_id, ?outcome, "print finished");
        }
        outcome
    }
}

impl Default for PrintSession {
    fn default() -> Self {
        Self::new(PrintComposer::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::print::MemorySurfaceProvider;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Surface that records calls and returns a scripted outcome.
    struct ScriptedSurface {
        log: Rc<RefCell<Vec<&'static str>>>,
        outcome: Option<PrintOutcome>,
    }

    impl PrintSurface for ScriptedSurface {
        fn write_document(&mut self, _html: &str) -> Result<(), ChequeError> {
            self.log.borrow_mut().push("write");
            Ok(())
        }

        fn print(&mut self) -> Result<PrintOutcome, ChequeError> {
            self.log.borrow_mut().push("print");
            self.outcome
                .ok_or_else(|| ChequeError::PrintSurfaceUnavailable("dialog crashed".into()))
        }

        fn close(&mut self) {
            self.log.borrow_mut().push("close");
        }
    }

    struct ScriptedProvider {
        log: Rc<RefCell<Vec<&'static str>>>,
        available: bool,
        outcome: Option<PrintOutcome>,
    }

    impl ScriptedProvider {
        fn new(available: bool, outcome: Option<PrintOutcome>) -> Self {
            Self {
                log: Rc::default(),
                available,
                outcome,
            }
        }
    }

    impl SurfaceProvider for ScriptedProvider {
        type Surface = ScriptedSurface;

        fn open(&mut self, _title: &str) -> Result<ScriptedSurface, ChequeError> {
            if !self.available {
                return Err(ChequeError::PrintSurfaceUnavailable("pop-up blocked".into()));
            }
            self.log.borrow_mut().push("open");
            Ok(ScriptedSurface {
                log: self.log.clone(),
                outcome: self.outcome,
            })
        }
    }

    fn request(session: &mut PrintSession, provider: &mut impl SurfaceProvider, bank: &str) -> Result<PrintOutcome, ChequeError> {
        session.request_print(
            provider,
            &TemplateStore::builtin(),
            bank,
            "Standard",
            &ChequeDetails::new(),
            &Preferences::default(),
        )
    }

    #[test]
    fn test_accepted_print_closes_surface() {
        let mut session = PrintSession::default();
        let mut provider = ScriptedProvider::new(true, Some(PrintOutcome::Accepted));
        let outcome = request(&mut session, &mut provider, "AAIB").unwrap();

        assert_eq!(outcome, PrintOutcome::Accepted);
        assert_eq!(session.state(), PrintState::Closed);
        assert_eq!(*provider.log.borrow(), vec!["open", "write", "print", "close"]);
    }

    #[test]
    fn test_cancelled_print_still_closes() {
        let mut session = PrintSession::default();
        let mut provider = ScriptedProvider::new(true, Some(PrintOutcome::Cancelled));
        assert_eq!(
            request(&mut session, &mut provider, "AAIB").unwrap(),
            PrintOutcome::Cancelled
        );
        assert_eq!(provider.log.borrow().last(), Some(&"close"));
        assert_eq!(session.state(), PrintState::Closed);
    }

    #[test]
    fn test_failed_print_action_still_closes() {
        let mut session = PrintSession::default();
        let mut provider = ScriptedProvider::new(true, None);
        assert!(request(&mut session, &mut provider, "AAIB").is_err());
        assert_eq!(provider.log.borrow().last(), Some(&"close"));
    }

    #[test]
    fn test_surface_unavailable_is_reported_and_resets() {
        let mut session = PrintSession::default();
        let mut provider = ScriptedProvider::new(false, Some(PrintOutcome::Accepted));
        let err = request(&mut session, &mut provider, "AAIB").unwrap_err();

        assert!(matches!(err, ChequeError::PrintSurfaceUnavailable(_)));
        assert_eq!(session.state(), PrintState::Idle);
        assert!(provider.log.borrow().is_empty());
    }

    #[test]
    fn test_missing_template_never_opens_surface() {
        let mut session = PrintSession::default();
        let mut provider = ScriptedProvider::new(true, Some(PrintOutcome::Accepted));
        let err = request(&mut session, &mut provider, "Nonexistent-Bank").unwrap_err();

        assert!(matches!(err, ChequeError::TemplateNotFound { .. }));
        assert_eq!(session.state(), PrintState::Idle);
        assert!(provider.log.borrow().is_empty());
    }

    #[test]
    fn test_session_can_print_again_after_close() {
        let mut session = PrintSession::default();
        let mut provider = MemorySurfaceProvider::new();
        request(&mut session, &mut provider, "AAIB").unwrap();
        request(&mut session, &mut provider, "CIB").unwrap();

        let printed = provider.printed();
        assert_eq!(printed.len(), 2);
        assert!(printed.iter().all(|p| p.closed));
        assert_eq!(printed[1].title, "Print Cheque - CIB Standard");
    }
}
