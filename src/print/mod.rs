//! # Print Documents
//!
//! Compiles a template, the cheque details and the user's preferences into a
//! [`PrintDocument`]: an explicit description of the page, the cheque
//! container and one positioned element per field box. Nothing here touches
//! a live rendering surface.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────┐   ┌────────┐   ┌───────────────┐   ┌──────┐   ┌─────────┐
//! │ Template │──►│ Layout │──►│ PrintDocument │──►│ HTML │──►│ Surface │
//! │ Details  │   │ Format │   │  (inspectable)│   │      │   │ (print) │
//! └──────────┘   └────────┘   └───────────────┘   └──────┘   └─────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use chequeprint::field::ChequeField;
//! use chequeprint::format::ChequeDetails;
//! use chequeprint::prefs::Preferences;
//! use chequeprint::print::PrintComposer;
//! use chequeprint::template::TemplateStore;
//!
//! let store = TemplateStore::builtin();
//! let template = store.lookup("AAIB", "Standard")?;
//! let details = ChequeDetails::new().with(ChequeField::Amount, "1,000.00");
//!
//! let doc = PrintComposer::default().compose(template, &details, &Preferences::default());
//! assert_eq!(doc.page.width_mm, 172.0);
//!
//! let html = doc.to_html();
//! assert!(html.contains("# 1,000.00 #"));
//! # Ok::<(), chequeprint::ChequeError>(())
//! ```

mod html;
mod session;
mod surface;

pub use session::{PrintOutcome, PrintSession, PrintState, PrintSurface, SurfaceProvider};
pub use surface::{FileSurfaceProvider, MemorySurfaceProvider, PrintedDocument};

use serde::Serialize;

use crate::field::ChequeField;
use crate::format::{ChequeDetails, FieldFormatter};
use crate::layout::{
    FontTables, LayoutConfig, PageSize, PrintMode, Rect, ResolvedFont, Unit, native_scale_factor,
    place_all,
};
use crate::prefs::Preferences;
use crate::template::ChequeTemplate;

/// Where the cheque container sits on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    TopLeft,
    BottomCenter,
}

/// The block holding every field element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Container {
    pub width: f64,
    pub height: f64,
    pub unit: Unit,
    /// Uniform scale applied from the top-left corner (native mode only).
    pub scale: Option<f64>,
    pub anchor: Anchor,
}

/// One positioned piece of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrintElement {
    pub label: ChequeField,
    pub rect: Rect,
    pub unit: Unit,
    pub font_size: f64,
    pub font: ResolvedFont,
    pub text: String,
}

/// A complete, platform-independent print layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrintDocument {
    pub title: String,
    pub mode: PrintMode,
    pub page: PageSize,
    pub container: Container,
    pub elements: Vec<PrintElement>,
}

impl PrintDocument {
    /// The element for `field`, if the template has a box for it.
    pub fn element(&self, field: ChequeField) -> Option<&PrintElement> {
        self.elements.iter().find(|e| e.label == field)
    }
}

/// Builds [`PrintDocument`]s.
#[derive(Debug, Clone, Default)]
pub struct PrintComposer {
    pub config: LayoutConfig,
    pub formatter: FieldFormatter,
}

impl PrintComposer {
    pub fn new(config: LayoutConfig, formatter: FieldFormatter) -> Self {
        Self { config, formatter }
    }

    /// Compose using the mode selected in `prefs`.
    pub fn compose(
        &self,
        template: &ChequeTemplate,
        details: &ChequeDetails,
        prefs: &Preferences,
    ) -> PrintDocument {
        let mode = PrintMode::from_a4_flag(prefs.print_on_a4);
        self.compose_with_mode(template, details, prefs, mode)
    }

    /// Compose for an explicit mode.
    pub fn compose_with_mode(
        &self,
        template: &ChequeTemplate,
        details: &ChequeDetails,
        prefs: &Preferences,
        mode: PrintMode,
    ) -> PrintDocument {
        let fonts = FontTables::for_template(template, prefs.font_multipliers.table());

        let elements = place_all(template, mode, &fonts, &self.config)
            .into_iter()
            .map(|p| PrintElement {
                text: self.formatter.display(p.label, details),
                label: p.label,
                rect: p.rect,
                unit: p.unit,
                font_size: p.font_size,
                font: p.font,
            })
            .collect();

        let (page, container) = match mode {
            PrintMode::Native => (
                PageSize {
                    width_mm: template.print_width,
                    height_mm: template.print_height,
                },
                Container {
                    width: template.image_width,
                    height: template.image_height,
                    unit: Unit::Px,
                    scale: Some(native_scale_factor(template, &self.config)),
                    anchor: Anchor::TopLeft,
                },
            ),
            PrintMode::A4 => (
                self.config.a4_page,
                Container {
                    width: template.print_width,
                    height: template.print_height,
                    unit: Unit::Mm,
                    scale: None,
                    anchor: Anchor::BottomCenter,
                },
            ),
        };

        PrintDocument {
            title: format!("Print Cheque - {} {}", template.bank_name, template.model_name),
            mode,
            page,
            container,
            elements,
        }
    }
}
