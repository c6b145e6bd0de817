//! # Template Preview
//!
//! Draws a template's boxes as outlines in reference-image pixel space and
//! encodes the result as PNG. Used when authoring or checking templates:
//! every box should sit over the matching area of the scanned cheque.

use image::{ImageEncoder, Rgb, RgbImage};
use thiserror::Error;

use crate::field::ChequeField;
use crate::template::ChequeTemplate;

/// Largest preview edge, in pixels.
pub const MAX_PREVIEW_EDGE: u32 = 8192;

/// Errors that can occur during preview rendering.
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("Image encoding error: {0}")]
    ImageEncode(String),

    #[error("Preview too large: {0}x{1}")]
    TooLarge(u32, u32),
}

fn field_color(field: ChequeField) -> Rgb<u8> {
    match field {
        ChequeField::Number => Rgb([200, 30, 30]),
        ChequeField::SupplierName => Rgb([30, 120, 200]),
        ChequeField::Amount => Rgb([20, 150, 60]),
        ChequeField::AmountWords => Rgb([120, 170, 40]),
        ChequeField::Micr => Rgb([90, 90, 90]),
        ChequeField::Date => Rgb([210, 120, 0]),
        ChequeField::Signature => Rgb([140, 40, 160]),
        ChequeField::Debitor => Rgb([0, 140, 140]),
        ChequeField::Crossing => Rgb([0, 0, 0]),
    }
}

/// Render the box outlines of `template` onto a white canvas.
pub fn render_outline(template: &ChequeTemplate) -> Result<RgbImage, PreviewError> {
    let width = template.image_width.ceil() as u32;
    let height = template.image_height.ceil() as u32;
    if width > MAX_PREVIEW_EDGE || height > MAX_PREVIEW_EDGE {
        return Err(PreviewError::TooLarge(width, height));
    }

    let mut img = RgbImage::from_pixel(width.max(1), height.max(1), Rgb([255, 255, 255]));
    for field_box in &template.boxes {
        let color = field_color(field_box.label);
        let (max_x, max_y) = (f64::from(img.width() - 1), f64::from(img.height() - 1));

        // Edges outside the canvas are not drawn; spans are clamped to it.
        let left = field_box.xtl.floor();
        let top = field_box.ytl.floor();
        let right = field_box.xbr.ceil();
        let bottom = field_box.ybr.ceil();
        if right < 0.0 || bottom < 0.0 || left > max_x || top > max_y {
            continue;
        }
        let x0 = left.clamp(0.0, max_x) as u32;
        let x1 = right.clamp(0.0, max_x) as u32;
        let y0 = top.clamp(0.0, max_y) as u32;
        let y1 = bottom.clamp(0.0, max_y) as u32;

        for x in x0..=x1 {
            if top >= 0.0 {
                img.put_pixel(x, y0, color);
            }
            if bottom <= max_y {
                img.put_pixel(x, y1, color);
            }
        }
        for y in y0..=y1 {
            if left >= 0.0 {
                img.put_pixel(x0, y, color);
            }
            if right <= max_x {
                img.put_pixel(x1, y, color);
            }
        }
    }
    Ok(img)
}

/// Render the box outlines of `template` as PNG bytes.
pub fn render_outline_png(template: &ChequeTemplate) -> Result<Vec<u8>, PreviewError> {
    let img = render_outline(template)?;
    let mut png_bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
    encoder
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e: image::ImageError| PreviewError::ImageEncode(e.to_string()))?;
    Ok(png_bytes)
}
