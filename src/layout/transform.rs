//! Box placement for native and A4 print modes.

use serde::Serialize;

use super::{LayoutConfig, PrintMode, Rect, Unit};
use crate::field::{ChequeField, FieldTable};
use crate::template::{ChequeTemplate, FieldBox};

/// Base font sizes and user multipliers, per field.
#[derive(Debug, Clone, PartialEq)]
pub struct FontTables {
    /// Base size in pixels.
    pub base: FieldTable<f64>,
    pub multipliers: FieldTable<f64>,
}

impl FontTables {
    /// Base sizes derived from a template default: every field uses the
    /// default, the crossing mark twice that.
    pub fn base_sizes(default_px: f64) -> FieldTable<f64> {
        FieldTable::from_fn(|field| match field {
            ChequeField::Crossing => default_px * 2.0,
            _ => default_px,
        })
    }

    /// Tables for a template with the given user multipliers.
    pub fn for_template(template: &ChequeTemplate, multipliers: FieldTable<f64>) -> Self {
        Self {
            base: Self::base_sizes(template.typography.font_size),
            multipliers,
        }
    }

    /// Effective font size in pixels: base x multiplier.
    pub fn font_px(&self, field: ChequeField) -> f64 {
        self.base[field] * self.multipliers[field]
    }
}

/// Font family, weight and colour after applying box overrides.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedFont {
    pub family: String,
    pub weight: u16,
    pub color: String,
}

impl ResolvedFont {
    fn resolve(template: &ChequeTemplate, field_box: &FieldBox) -> Self {
        let style = &field_box.style;
        let defaults = &template.typography;
        Self {
            family: style
                .font_family
                .clone()
                .unwrap_or_else(|| defaults.font_family.clone()),
            weight: style.font_weight.unwrap_or(defaults.font_weight),
            color: style
                .text_color
                .clone()
                .unwrap_or_else(|| defaults.text_color.clone()),
        }
    }
}

/// Where and how one box is drawn on a print target.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub label: ChequeField,
    pub rect: Rect,
    pub unit: Unit,
    /// Font size, in `unit`.
    pub font_size: f64,
    pub font: ResolvedFont,
}

/// Millimetres per reference pixel on each axis: `(x, y)`.
pub fn axis_scale(template: &ChequeTemplate) -> (f64, f64) {
    (
        template.print_width / template.image_width,
        template.print_height / template.image_height,
    )
}

/// Uniform scale that renders reference pixels at physical size:
/// `print_width * pixels_per_mm / image_width`.
pub fn native_scale_factor(template: &ChequeTemplate, config: &LayoutConfig) -> f64 {
    (template.print_width * config.pixels_per_mm) / template.image_width
}

/// Place a single box.
pub fn place(
    template: &ChequeTemplate,
    field_box: &FieldBox,
    mode: PrintMode,
    fonts: &FontTables,
    config: &LayoutConfig,
) -> Placement {
    let font_px = fonts.font_px(field_box.label);
    let font = ResolvedFont::resolve(template, field_box);

    match mode {
        PrintMode::Native => Placement {
            label: field_box.label,
            rect: field_box.rect(),
            unit: Unit::Px,
            font_size: font_px,
            font,
        },
        PrintMode::A4 => {
            let (sx, sy) = axis_scale(template);
            Placement {
                label: field_box.label,
                rect: field_box.rect().scale(sx, sy),
                unit: Unit::Mm,
                font_size: font_px * config.a4_font_mm_per_px,
                font,
            }
        }
    }
}

/// Place every box of a template, in template order.
pub fn place_all(
    template: &ChequeTemplate,
    mode: PrintMode,
    fonts: &FontTables,
    config: &LayoutConfig,
) -> Vec<Placement> {
    template
        .boxes
        .iter()
        .map(|b| place(template, b, mode, fonts, config))
        .collect()
}
