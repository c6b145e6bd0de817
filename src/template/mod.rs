//! # Cheque Templates
//!
//! A template describes one cheque model of one bank: the pixel size of the
//! scanned reference image, the physical size of the cheque in millimetres,
//! default typography, and the boxes where each field is written.
//!
//! ## Box Coordinates
//!
//! Boxes are given as top-left / bottom-right corners in reference-image
//! pixels:
//!
//! ```text
//! (xtl, ytl) ┌──────────────┐
//!            │  check-no    │
//!            └──────────────┘ (xbr, ybr)
//! ```
//!
//! Some template data has transposed corners (`xbr < xtl`). Those boxes are
//! normalised by swapping at load time. Boxes with zero width or height are
//! rejected.
//!
//! ## File Format
//!
//! Templates are read from JSON with camelCase keys, matching the bundled
//! [`store::BUILTIN_TEMPLATES`] file.

pub mod store;

pub use store::TemplateStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ChequeError;
use crate::field::ChequeField;
use crate::layout::Rect;

// ============================================================================
// TYPOGRAPHY
// ============================================================================

/// Default text styling of a template.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub font_family: String,
    pub font_weight: u16,
    /// Base font size in pixels, before per-field multipliers.
    pub font_size: f64,
    pub text_color: String,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_weight: 500,
            font_size: 16.0,
            text_color: "#000000".to_string(),
        }
    }
}

/// Optional per-box overrides of the template typography.
///
/// Font size is deliberately absent: it is always recomputed from the base
/// size and the user's multiplier.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
}

// ============================================================================
// FIELD BOX
// ============================================================================

/// A labelled rectangle in reference-image pixel space.
///
/// Invariant: `xbr > xtl` and `ybr > ytl`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldBox {
    pub label: ChequeField,
    pub xtl: f64,
    pub ytl: f64,
    pub xbr: f64,
    pub ybr: f64,
    #[serde(flatten)]
    pub style: BoxStyle,
}

impl FieldBox {
    /// Create an unstyled box. Corners are normalised, zero-area boxes rejected.
    pub fn new(label: ChequeField, xtl: f64, ytl: f64, xbr: f64, ybr: f64) -> Result<Self, ChequeError> {
        let raw = RawBox {
            label: label.as_str().to_string(),
            xtl,
            ytl,
            xbr,
            ybr,
            font_family: None,
            font_size: None,
            font_weight: None,
            text_color: None,
        };
        Self::from_raw(raw, "<inline>")
    }

    /// Box width in pixels.
    pub fn width(&self) -> f64 {
        self.xbr - self.xtl
    }

    /// Box height in pixels.
    pub fn height(&self) -> f64 {
        self.ybr - self.ytl
    }

    /// The box as a pixel rectangle.
    pub fn rect(&self) -> Rect {
        Rect {
            left: self.xtl,
            top: self.ytl,
            width: self.width(),
            height: self.height(),
        }
    }

    fn from_raw(raw: RawBox, template_id: &str) -> Result<Self, ChequeError> {
        let label: ChequeField = raw.label.parse()?;
        let invalid = |reason: String| ChequeError::InvalidBox {
            template: template_id.to_string(),
            label: label.to_string(),
            reason,
        };

        if ![raw.xtl, raw.ytl, raw.xbr, raw.ybr].iter().all(|v| v.is_finite()) {
            return Err(invalid("coordinates must be finite".to_string()));
        }
        if raw.xtl == raw.xbr || raw.ytl == raw.ybr {
            return Err(invalid(format!(
                "zero-area box ({}, {}) - ({}, {})",
                raw.xtl, raw.ytl, raw.xbr, raw.ybr
            )));
        }

        let (xtl, xbr) = ordered(raw.xtl, raw.xbr);
        let (ytl, ybr) = ordered(raw.ytl, raw.ybr);
        if (xtl, ytl, xbr, ybr) != (raw.xtl, raw.ytl, raw.xbr, raw.ybr) {
            tracing::warn!(
                template = template_id,
                label = %label,
                "normalised transposed box corners ({}, {}) - ({}, {})",
                raw.xtl,
                raw.ytl,
                raw.xbr,
                raw.ybr
            );
        }

        Ok(Self {
            label,
            xtl,
            ytl,
            xbr,
            ybr,
            style: BoxStyle {
                font_family: raw.font_family,
                font_weight: raw.font_weight,
                text_color: raw.text_color,
            },
        })
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

// ============================================================================
// CHEQUE TEMPLATE
// ============================================================================

/// Geometry and styling for one (bank, model) cheque.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChequeTemplate {
    pub id: String,
    pub bank_id: String,
    pub model_id: String,
    pub bank_name: String,
    pub model_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Reference image width in pixels
    pub image_width: f64,
    /// Reference image height in pixels
    pub image_height: f64,
    /// Physical cheque width in millimetres
    pub print_width: f64,
    /// Physical cheque height in millimetres
    pub print_height: f64,
    pub typography: Typography,
    pub boxes: Vec<FieldBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl ChequeTemplate {
    /// The (bank, model) key this template is stored under.
    pub fn key(&self) -> (&str, &str) {
        (&self.bank_id, &self.model_id)
    }

    /// The first box bound to `field`, if the template has one.
    pub fn box_for(&self, field: ChequeField) -> Option<&FieldBox> {
        self.boxes.iter().find(|b| b.label == field)
    }
}

impl TryFrom<RawTemplate> for ChequeTemplate {
    type Error = ChequeError;

    fn try_from(raw: RawTemplate) -> Result<Self, Self::Error> {
        let id = raw
            .id
            .unwrap_or_else(|| format!("{}-{}", raw.bank_id, raw.model_id).to_lowercase());

        let dims = [
            ("imageWidth", raw.image_width),
            ("imageHeight", raw.image_height),
            ("printWidth", raw.print_width),
            ("printHeight", raw.print_height),
        ];
        for (name, value) in dims {
            if !(value.is_finite() && value > 0.0) {
                return Err(ChequeError::InvalidTemplate {
                    id,
                    reason: format!("{} must be a positive number, got {}", name, value),
                });
            }
        }

        let defaults = Typography::default();
        let typography = Typography {
            font_family: raw.default_font_family.unwrap_or(defaults.font_family),
            font_weight: raw.default_font_weight.unwrap_or(defaults.font_weight),
            font_size: raw.default_font_size.unwrap_or(defaults.font_size),
            text_color: raw.default_text_color.unwrap_or(defaults.text_color),
        };
        if !(typography.font_size.is_finite() && typography.font_size > 0.0) {
            return Err(ChequeError::InvalidTemplate {
                id,
                reason: format!("defaultFontSize must be positive, got {}", typography.font_size),
            });
        }

        let boxes = raw
            .boxes
            .into_iter()
            .map(|b| FieldBox::from_raw(b, &id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            bank_name: raw.bank_name.unwrap_or_else(|| raw.bank_id.clone()),
            model_name: raw.model_name.unwrap_or_else(|| raw.model_id.clone()),
            id,
            bank_id: raw.bank_id,
            model_id: raw.model_id,
            image_url: raw.image_url,
            image_width: raw.image_width,
            image_height: raw.image_height,
            print_width: raw.print_width,
            print_height: raw.print_height,
            typography,
            boxes,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
            is_active: raw.is_active,
        })
    }
}

// ============================================================================
// WIRE FORMAT
// ============================================================================

fn default_true() -> bool {
    true
}

/// Template as read from JSON, before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawTemplate {
    #[serde(default)]
    id: Option<String>,
    bank_id: String,
    model_id: String,
    #[serde(default)]
    bank_name: Option<String>,
    #[serde(default)]
    model_name: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(alias = "width")]
    image_width: f64,
    #[serde(alias = "height")]
    image_height: f64,
    print_width: f64,
    print_height: f64,
    #[serde(default)]
    default_font_size: Option<f64>,
    #[serde(default)]
    default_font_family: Option<String>,
    #[serde(default)]
    default_font_weight: Option<u16>,
    #[serde(default)]
    default_text_color: Option<String>,
    #[serde(default)]
    boxes: Vec<RawBox>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    is_active: bool,
}

/// Box as read from JSON. Accepts both camelCase and PascalCase style keys.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawBox {
    #[serde(alias = "Label")]
    label: String,
    xtl: f64,
    ytl: f64,
    xbr: f64,
    ybr: f64,
    #[serde(default, alias = "FontFamily")]
    font_family: Option<String>,
    /// Accepted for compatibility; sizes are always recomputed.
    #[serde(default, alias = "FontSize")]
    #[allow(dead_code)]
    font_size: Option<f64>,
    #[serde(default, alias = "FontWeight")]
    font_weight: Option<u16>,
    #[serde(default, alias = "TextColor")]
    text_color: Option<String>,
}
