//! # Print Sheet
//!
//! Renders a [`Layout`] into a standalone HTML document for the browser's
//! print pipeline. Each page is a fixed 290mm block holding one row of strips,
//! with a forced page break after every page but the last. Barcodes come from
//! a [`BarcodeRenderer`].
//!
//! The physical dimensions are fixed constants. [`fit_warnings`] reports when
//! a label configuration would overflow the page, which is when the
//! one-row-per-page policy in [`crate::layout`] stops holding.

use crate::barcode::{BarcodeParams, BarcodeRenderer};
use crate::config::{format_mm, LabelConfig};
use crate::error::Result;
use crate::layout::{Layout, STRIP_SIZE};
use minijinja::Environment;
use serde::Serialize;

pub const A4_WIDTH_MM: f64 = 210.0;
pub const A4_HEIGHT_MM: f64 = 297.0;
/// Height budget per printed page, just under A4 so rounding never spills.
pub const PAGE_CONTENT_HEIGHT_MM: f64 = 290.0;
/// Top and left safe margin.
pub const PAGE_MARGIN_MM: f64 = 5.0;
pub const STRIP_PADDING_MM: f64 = 1.0;
pub const LABEL_PADDING_MM: f64 = 2.0;

const SHEET_TEMPLATE: &str = include_str!("templates/sheet.html");

#[derive(Debug, Clone)]
pub struct SheetOptions {
    pub title: String,
    /// Open the print dialog as soon as the document has loaded.
    pub auto_print: bool,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            title: "Location labels".to_string(),
            auto_print: false,
        }
    }
}

#[derive(Serialize)]
struct LabelData {
    code: String,
    markup: String,
}

#[derive(Serialize)]
struct StripData {
    labels: Vec<LabelData>,
}

#[derive(Serialize)]
struct PageData {
    strips: Vec<StripData>,
    break_after: bool,
}

#[derive(Serialize)]
struct SheetData {
    title: String,
    generated_at: String,
    head: String,
    tail: String,
    auto_print: bool,
    columns: usize,
    // Dimensions are pre-formatted so whole millimeters print without a ".0"
    gap: String,
    margin: String,
    page_height: String,
    strip_padding: String,
    label_padding: String,
    label_width: String,
    label_height: String,
    pages: Vec<PageData>,
}

/// Height of a full strip in mm, padding included.
pub fn strip_height_mm(config: &LabelConfig) -> f64 {
    STRIP_SIZE as f64 * config.height + 2.0 * STRIP_PADDING_MM
}

/// Width of one row of `columns` strips in mm, margin included.
pub fn row_width_mm(config: &LabelConfig) -> f64 {
    let columns = config.columns.max(1) as f64;
    PAGE_MARGIN_MM
        + columns * (config.width + 2.0 * STRIP_PADDING_MM)
        + (columns - 1.0) * config.gap
}

pub fn fit_warnings(config: &LabelConfig) -> Vec<String> {
    let mut warnings = Vec::new();
    let height = strip_height_mm(config);
    if height > PAGE_CONTENT_HEIGHT_MM - PAGE_MARGIN_MM {
        warnings.push(format!(
            "A strip of {} labels is {:.0}mm tall and will not fit on one page ({:.0}mm available)",
            STRIP_SIZE,
            height,
            PAGE_CONTENT_HEIGHT_MM - PAGE_MARGIN_MM
        ));
    }
    let width = row_width_mm(config);
    if width > A4_WIDTH_MM {
        warnings.push(format!(
            "{} columns need {:.0}mm but an A4 page is {:.0}mm wide",
            config.columns, width, A4_WIDTH_MM
        ));
    }
    warnings
}

pub fn render_sheet<R: BarcodeRenderer + ?Sized>(
    layout: &Layout<'_>,
    config: &LabelConfig,
    renderer: &R,
    options: &SheetOptions,
) -> Result<String> {
    let params = BarcodeParams::from(config);
    let pages = layout.pages();
    let page_count = pages.len();

    let pages = pages
        .into_iter()
        .enumerate()
        .map(|(i, page)| PageData {
            strips: page
                .into_iter()
                .map(|strip| StripData {
                    labels: strip
                        .iter()
                        .map(|label| LabelData {
                            code: label.code.clone(),
                            markup: renderer.render(&label.code, &params),
                        })
                        .collect(),
                })
                .collect(),
            break_after: i + 1 < page_count,
        })
        .collect();

    let data = SheetData {
        title: options.title.clone(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        head: renderer.document_head(),
        tail: renderer.document_tail(),
        auto_print: options.auto_print,
        columns: layout.strips_per_page(),
        gap: format_mm(config.gap),
        margin: format_mm(PAGE_MARGIN_MM),
        page_height: format_mm(PAGE_CONTENT_HEIGHT_MM),
        strip_padding: format_mm(STRIP_PADDING_MM),
        label_padding: format_mm(LABEL_PADDING_MM),
        label_width: format_mm(config.width),
        label_height: format_mm(config.height),
        pages,
    };

    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_template("sheet.html", SHEET_TEMPLATE)?;
    let html = env.get_template("sheet.html")?.render(&data)?;
    tracing::debug!(pages = page_count, bytes = html.len(), "rendered print sheet");
    Ok(html)
}
