//! # HTML Codegen
//!
//! Renders a [`PrintDocument`] as a standalone HTML page: page-size
//! directive, positioned container and elements, and a script that prints on
//! load and closes the window once printing finishes.

use std::fmt::Write;

use super::{Anchor, PrintDocument, PrintElement};
use crate::layout::{PrintMode, Unit};

/// Runs the print dialog once loaded, then closes the window whether the
/// dialog was accepted or cancelled.
const PRINT_SCRIPT: &str = "window.onload = function() {\n  window.onafterprint = function() { window.close(); };\n  window.print();\n};";

impl PrintDocument {
    /// Render the print page.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(out, "<title>{}</title>", escape_html(&self.title));
        let _ = writeln!(out, "<style>\n{}</style>", self.stylesheet());
        out.push_str("</head>\n<body>\n");

        let cheque = self.cheque_markup();
        match self.container.anchor {
            Anchor::TopLeft => out.push_str(&cheque),
            Anchor::BottomCenter => {
                out.push_str("<div class=\"a4-print-area\"><div class=\"cheque-bottom-align\">\n");
                out.push_str(&cheque);
                out.push_str("</div></div>\n");
            }
        }

        let _ = writeln!(out, "<script>\n{}\n</script>", PRINT_SCRIPT);
        out.push_str("</body>\n</html>\n");
        out
    }

    /// The `@page` size value.
    pub fn page_size_directive(&self) -> String {
        match self.mode {
            PrintMode::A4 => "A4".to_string(),
            PrintMode::Native => format!(
                "{}mm {}mm",
                num(self.page.width_mm),
                num(self.page.height_mm)
            ),
        }
    }

    fn stylesheet(&self) -> String {
        let mut css = String::new();
        let page_w = num(self.page.width_mm);
        let page_h = num(self.page.height_mm);

        let _ = writeln!(css, "@page {{ size: {}; margin: 0; }}", self.page_size_directive());
        let _ = writeln!(
            css,
            "html, body {{ margin: 0; padding: 0; width: {}mm; height: {}mm; overflow: hidden; }}",
            page_w, page_h
        );

        let unit = self.container.unit;
        let _ = write!(
            css,
            ".cheque-container {{ position: relative; width: {}; height: {};",
            len(self.container.width, unit),
            len(self.container.height, unit)
        );
        match self.container.scale {
            Some(scale) => {
                let _ = writeln!(
                    css,
                    " transform-origin: top left; transform: scale({}); }}",
                    scale
                );
            }
            None => css.push_str(" transform: none; }\n"),
        }

        if self.container.anchor == Anchor::BottomCenter {
            let _ = writeln!(
                css,
                ".a4-print-area {{ position: relative; width: {}mm; height: {}mm; }}",
                page_w, page_h
            );
            css.push_str(
                ".cheque-bottom-align { position: absolute; left: 50%; bottom: 0; transform: translateX(-50%); }\n",
            );
        }

        css.push_str(".annotation-box { position: absolute; border: none; }\n");
        css.push_str(
            ".cheque-value { position: absolute; background: none; padding: 0; white-space: nowrap; }\n",
        );
        css
    }

    fn cheque_markup(&self) -> String {
        let mut out = String::from("<div class=\"cheque-container\">\n");
        for element in &self.elements {
            out.push_str(&element_markup(element));
        }
        out.push_str("</div>\n");
        out
    }
}

fn element_markup(e: &PrintElement) -> String {
    let box_style = format!(
        "left: {}; top: {}; width: {}; height: {};",
        len(e.rect.left, e.unit),
        len(e.rect.top, e.unit),
        len(e.rect.width, e.unit),
        len(e.rect.height, e.unit)
    );
    let text_style = format!(
        "font-size: {}; font-family: {}; font-weight: {}; color: {};",
        len(e.font_size, e.unit),
        e.font.family,
        e.font.weight,
        e.font.color
    );
    format!(
        "<div class=\"annotation-box\" data-label=\"{}\" style=\"{}\"><span class=\"cheque-value\" style=\"{}\">{}</span></div>\n",
        e.label,
        escape_html(&box_style),
        escape_html(&text_style),
        escape_html(&e.text)
    )
}

/// A number with at most four decimals and no trailing zeros.
fn num(value: f64) -> String {
    let s = format!("{:.4}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn len(value: f64, unit: Unit) -> String {
    format!("{}{}", num(value), unit)
}

/// Escape text for HTML content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ChequeField;
    use crate::format::ChequeDetails;
    use crate::prefs::Preferences;
    use crate::print::PrintComposer;
    use crate::template::TemplateStore;

    fn html(mode: PrintMode, details: &ChequeDetails) -> String {
        let store = TemplateStore::builtin();
        let template = store.lookup("AAIB", "Standard").unwrap();
        PrintComposer::default()
            .compose_with_mode(template, details, &Preferences::default(), mode)
            .to_html()
    }

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(172.0), "172");
        assert_eq!(num(20.093646), "20.0936");
        assert_eq!(num(0.5), "0.5");
        assert_eq!(num(-0.00001), "0");
    }

    #[test]
    fn test_native_page_and_scale() {
        let out = html(PrintMode::Native, &ChequeDetails::new());
        assert!(out.contains("@page { size: 172mm 82mm; margin: 0; }"));
        assert!(out.contains("transform-origin: top left; transform: scale(0.5000"));
        assert!(out.contains("width: 1300px; height: 624px;"));
        assert!(!out.contains("a4-print-area"));
    }

    #[test]
    fn test_a4_page_and_anchor() {
        let out = html(PrintMode::A4, &ChequeDetails::new());
        assert!(out.contains("@page { size: A4; margin: 0; }"));
        assert!(out.contains("width: 210mm; height: 297mm;"));
        assert!(out.contains("<div class=\"a4-print-area\"><div class=\"cheque-bottom-align\">"));
        assert!(out.contains(".cheque-container { position: relative; width: 172mm; height: 82mm; transform: none; }"));
        assert!(out.contains("data-label=\"check-no\" style=\"left: 20.0936mm;"));
    }

    #[test]
    fn test_print_then_close_script() {
        let out = html(PrintMode::Native, &ChequeDetails::new());
        let close = out.find("window.onafterprint").unwrap();
        let print = out.find("window.print()").unwrap();
        assert!(close < print);
        assert!(out.contains("window.close()"));
    }

    #[test]
    fn test_text_is_escaped() {
        let details = ChequeDetails::new().with(ChequeField::SupplierName, "<Smith & \"Sons\">");
        let out = html(PrintMode::Native, &details);
        assert!(out.contains("&lt;Smith &amp; &quot;Sons&quot;&gt;"));
        assert!(!out.contains("<Smith"));
    }

    #[test]
    fn test_no_reference_image_or_labels() {
        let out = html(PrintMode::Native, &ChequeDetails::new());
        assert!(!out.contains("<img"));
        assert!(!out.contains("class=\"label\""));
        assert!(!out.contains("<button"));
    }
}
