//! # Layout
//!
//! Maps template boxes from reference-image pixels to the units of a print
//! target.
//!
//! ## Print Modes
//!
//! | Mode | Placement unit | Font unit | Page |
//! |------|----------------|-----------|------|
//! | Native | px (raw box rect) | px | cheque `printWidth x printHeight` mm |
//! | A4 | mm (per-axis scale) | mm (calibrated) | 210 x 297 mm |
//!
//! In native mode the whole cheque is later scaled uniformly by
//! [`native_scale_factor`] so that reference pixels land at physical size.
//! In A4 mode each axis is scaled independently:
//!
//! ```text
//! mm_per_px_x = print_width  / image_width
//! mm_per_px_y = print_height / image_height
//! ```
//!
//! Fonts do not follow the box scale in A4 mode. The pixel size is converted
//! with a fixed calibration constant ([`LayoutConfig::a4_font_mm_per_px`]).

mod transform;

pub use transform::{FontTables, Placement, ResolvedFont, axis_scale, native_scale_factor, place, place_all};

use serde::{Deserialize, Serialize};
use std::fmt;

/// CSS pixels per millimetre (96 DPI).
pub const PIXELS_PER_MM: f64 = 3.7795275591;

/// Millimetres of A4 font size per pixel of native font size.
pub const A4_FONT_MM_PER_PX: f64 = 0.13;

/// Print target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintMode {
    /// Cheque-sized page, uniform scale.
    #[default]
    Native,
    /// Cheque at true size, bottom-centred on an A4 page.
    A4,
}

impl PrintMode {
    pub fn from_a4_flag(print_on_a4: bool) -> Self {
        if print_on_a4 { Self::A4 } else { Self::Native }
    }
}

/// Length unit of a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Px,
    Mm,
}

impl Unit {
    /// CSS unit suffix.
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Px => "px",
            Unit::Mm => "mm",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Scale each axis independently.
    pub fn scale(self, sx: f64, sy: f64) -> Self {
        Self {
            left: self.left * sx,
            top: self.top * sy,
            width: self.width * sx,
            height: self.height * sy,
        }
    }
}

/// Physical page size in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PageSize {
    pub const A4: Self = Self {
        width_mm: 210.0,
        height_mm: 297.0,
    };
}

/// Constants used by the coordinate transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// CSS pixels per millimetre, for the native-mode scale factor.
    pub pixels_per_mm: f64,
    /// Font calibration for A4 mode (mm per native px).
    pub a4_font_mm_per_px: f64,
    /// Page used in A4 mode.
    pub a4_page: PageSize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            pixels_per_mm: PIXELS_PER_MM,
            a4_font_mm_per_px: A4_FONT_MM_PER_PX,
            a4_page: PageSize::A4,
        }
    }
}
