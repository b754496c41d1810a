//! Barcode rendering seam.
//!
//! Drawing the bars is not our job. A [`BarcodeRenderer`] takes a code and a
//! few density knobs and returns a markup fragment that fills one label. The
//! default, [`JsBarcodeMarkup`], emits an empty `<svg>` tagged with
//! `jsbarcode-*` attributes which the JsBarcode script in the print sheet
//! draws as CODE128 when the page loads.

use crate::config::LabelConfig;
use minijinja::HtmlEscape;

/// Rendering parameters handed to the renderer, taken from [`LabelConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct BarcodeParams {
    pub bar_width: f64,
    pub height_px: u32,
    pub font_size: u32,
    pub display_text: bool,
}

impl From<&LabelConfig> for BarcodeParams {
    fn from(config: &LabelConfig) -> Self {
        Self {
            bar_width: config.bar_width,
            height_px: config.barcode_height,
            font_size: config.font_size,
            display_text: config.show_text,
        }
    }
}

pub trait BarcodeRenderer {
    /// Markup for one barcode. Must be safe to embed in HTML as-is.
    fn render(&self, code: &str, params: &BarcodeParams) -> String;

    /// Markup that has to appear once per document, e.g. a script include.
    fn document_head(&self) -> String {
        String::new()
    }

    /// Markup that has to appear once at the end of the document body.
    fn document_tail(&self) -> String {
        String::new()
    }
}

pub const JSBARCODE_SRC: &str =
    "https://cdn.jsdelivr.net/npm/jsbarcode@3.11.6/dist/JsBarcode.all.min.js";

/// Defers drawing to the JsBarcode browser library.
#[derive(Debug, Clone)]
pub struct JsBarcodeMarkup {
    pub script_src: String,
    pub format: String,
}

impl Default for JsBarcodeMarkup {
    fn default() -> Self {
        Self {
            script_src: JSBARCODE_SRC.to_string(),
            format: "CODE128".to_string(),
        }
    }
}

impl BarcodeRenderer for JsBarcodeMarkup {
    fn render(&self, code: &str, params: &BarcodeParams) -> String {
        format!(
            concat!(
                "<svg class=\"barcode\"",
                " jsbarcode-format=\"{format}\"",
                " jsbarcode-value=\"{value}\"",
                " jsbarcode-width=\"{width}\"",
                " jsbarcode-height=\"{height}\"",
                " jsbarcode-fontsize=\"{font}\"",
                " jsbarcode-displayvalue=\"{display}\"",
                " jsbarcode-margin=\"0\"",
                " jsbarcode-textmargin=\"4\"",
                " jsbarcode-fontoptions=\"bold\"",
                " jsbarcode-background=\"transparent\"></svg>"
            ),
            format = HtmlEscape(&self.format),
            value = HtmlEscape(code),
            width = params.bar_width,
            height = params.height_px,
            font = params.font_size,
            display = params.display_text,
        )
    }

    fn document_head(&self) -> String {
        format!("<script src=\"{}\"></script>", HtmlEscape(&self.script_src))
    }

    fn document_tail(&self) -> String {
        "<script>JsBarcode(\"svg.barcode\").init();</script>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_follow_config() {
        let params = BarcodeParams::from(&LabelConfig::default());
        assert_eq!(params.bar_width, 1.5);
        assert_eq!(params.height_px, 60);
        assert_eq!(params.font_size, 20);
        assert!(params.display_text);
    }

    #[test]
    fn markup_carries_value_and_knobs() {
        let markup = JsBarcodeMarkup::default().render(
            "A.1.6S",
            &BarcodeParams {
                bar_width: 2.0,
                height_px: 48,
                font_size: 12,
                display_text: false,
            },
        );
        assert!(markup.contains("jsbarcode-value=\"A.1.6S\""));
        assert!(markup.contains("jsbarcode-width=\"2\""));
        assert!(markup.contains("jsbarcode-height=\"48\""));
        assert!(markup.contains("jsbarcode-displayvalue=\"false\""));
        assert!(markup.contains("jsbarcode-format=\"CODE128\""));
    }

    #[test]
    fn markup_escapes_hostile_codes() {
        let markup = JsBarcodeMarkup::default()
            .render("\"><script>x</script>", &BarcodeParams::from(&LabelConfig::default()));
        assert!(!markup.contains("<script>"));
        assert!(markup.contains("&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn markup_escapes_quotes_in_value_and_format() {
        let renderer = JsBarcodeMarkup {
            format: "CODE128\" onload=\"x".to_string(),
            ..Default::default()
        };
        let markup = renderer.render("A'1&2", &BarcodeParams::from(&LabelConfig::default()));
        assert!(markup.contains("jsbarcode-value=\"A&#x27;1&amp;2\""));
        assert!(!markup.contains("\" onload="));
    }

    #[test]
    fn head_includes_script() {
        let head = JsBarcodeMarkup::default().document_head();
        assert!(head.starts_with("<script src=\"https:"));
        assert!(head.contains("JsBarcode.all.min.js"));
        assert!(head.ends_with("></script>"));
    }
}
