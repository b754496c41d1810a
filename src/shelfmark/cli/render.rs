//! # Rendering Module
//!
//! Terminal output for the CLI, rendered from the templates in `templates/` with a `style`
//! filter backed by [`SHELFMARK_THEME`].
//!
//! Column math (code widths, padding between strips) stays here because it needs
//! unicode-aware measuring. Templates only choose styles and emit lines.
//!
//! ## Preview Layout
//!
//! Each page is printed as its strips side by side, one column per strip, so the preview
//! reads like the printed sheet:
//!
//! ```text
//! Page 1 of 1
//! #1      #2
//! A.2.6   A.1.6
//! A.2.5   A.1.5
//! ...
//! ```

use super::styles::{names, SHELFMARK_THEME};
use super::templates::{CONFIG_TEMPLATE, MESSAGES_TEMPLATE, PREVIEW_TEMPLATE, RULES_TEMPLATE};
use console::Term;
use minijinja::{Environment, Value};
use serde::Serialize;
use shelfmark::api::{CmdMessage, MessageLevel};
use shelfmark::config::LabelConfig;
use shelfmark::layout::{Layout, STRIP_SIZE};
use shelfmark::model::{CustomRule, SortOrder};
use unicode_width::UnicodeWidthStr;

/// Spaces between two strip columns in the preview.
pub const COLUMN_GAP: usize = 3;

#[derive(Serialize)]
struct Cell {
    text: String,
    style: &'static str,
    padding: String,
}

#[derive(Serialize)]
struct PageView {
    title: String,
    rows: Vec<Vec<Cell>>,
}

#[derive(Serialize)]
struct PreviewData {
    pages: Vec<PageView>,
    summary: String,
}

#[derive(Serialize)]
struct ConfigEntry {
    key: String,
    padding: String,
    value: String,
}

#[derive(Serialize)]
struct ConfigData {
    entries: Vec<ConfigEntry>,
}

#[derive(Serialize)]
struct RuleLine {
    index: usize,
    text: String,
}

#[derive(Serialize)]
struct RulesData {
    rules: Vec<RuleLine>,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: String,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

pub(super) fn use_color() -> bool {
    Term::stdout().features().colors_supported()
}

fn render_with_color<T: Serialize>(
    template: &'static str,
    data: &T,
    use_color: bool,
) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.add_filter("style", move |value: Value, name: String| -> String {
        SHELFMARK_THEME.apply(&name, &value.to_string(), use_color)
    });
    env.add_template("_inline", template)?;
    env.get_template("_inline")?.render(data)
}

/// Renders the strips of every page side by side.
pub fn render_preview(layout: &Layout<'_>, order: SortOrder) -> String {
    render_preview_internal(layout, order, use_color())
}

pub(super) fn render_preview_internal(layout: &Layout<'_>, order: SortOrder, use_color: bool) -> String {
    if layout.is_empty() {
        return "No labels yet.\n".to_string();
    }

    let pages = layout.pages();
    let total_pages = pages.len();
    let mut strip_number = 0;
    let mut views = Vec::with_capacity(total_pages);

    for (page_idx, page) in pages.iter().enumerate() {
        let headers: Vec<String> = page
            .iter()
            .map(|_| {
                strip_number += 1;
                format!("#{}", strip_number)
            })
            .collect();

        let width = page
            .iter()
            .flat_map(|strip| strip.iter())
            .map(|label| label.code.width())
            .chain(headers.iter().map(|h| h.width()))
            .max()
            .unwrap_or(0);

        let mut rows = Vec::with_capacity(STRIP_SIZE + 1);
        rows.push(build_row(
            headers
                .into_iter()
                .map(|h| (h, names::STRIP_HEADER))
                .collect(),
            width,
        ));
        for slot in 0..STRIP_SIZE {
            let texts: Vec<(String, &'static str)> = page
                .iter()
                .map(|strip| match strip.get(slot) {
                    Some(label) => (label.code.clone(), names::CODE),
                    None => (String::new(), names::INFO),
                })
                .collect();
            let row = build_row(texts, width);
            if row.is_empty() {
                break;
            }
            rows.push(row);
        }

        views.push(PageView {
            title: format!("Page {} of {}", page_idx + 1, total_pages),
            rows,
        });
    }

    let data = PreviewData {
        pages: views,
        summary: format!(
            "{} labels in {} strips on {} pages, sorted {}, {} strips per page.",
            layout.sorted().len(),
            layout.strip_count(),
            layout.page_count(),
            order,
            layout.strips_per_page()
        ),
    };

    render_with_color(PREVIEW_TEMPLATE, &data, use_color)
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

/// Pads every cell to `width`, dropping trailing blank cells so lines end cleanly.
fn build_row(texts: Vec<(String, &'static str)>, width: usize) -> Vec<Cell> {
    let mut cells: Vec<Cell> = texts
        .into_iter()
        .map(|(text, style)| {
            let padding = " ".repeat(width.saturating_sub(text.width()) + COLUMN_GAP);
            Cell {
                text,
                style,
                padding,
            }
        })
        .collect();
    while cells.last().is_some_and(|c| c.text.is_empty()) {
        cells.pop();
    }
    if let Some(last) = cells.last_mut() {
        last.padding.clear();
    }
    cells
}

pub fn render_config(config: &LabelConfig) -> String {
    render_config_internal(config, use_color())
}

pub(super) fn render_config_internal(config: &LabelConfig, use_color: bool) -> String {
    let entries = config.entries();
    let key_width = entries.iter().map(|(k, _)| k.width()).max().unwrap_or(0);
    let data = ConfigData {
        entries: entries
            .into_iter()
            .map(|(key, value)| ConfigEntry {
                key: key.to_string(),
                padding: " ".repeat(key_width - key.width()),
                value,
            })
            .collect(),
    };
    render_with_color(CONFIG_TEMPLATE, &data, use_color)
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

pub(super) fn render_rules_internal(rules: &[CustomRule], use_color: bool) -> String {
    let data = RulesData {
        rules: rules
            .iter()
            .enumerate()
            .map(|(i, rule)| RuleLine {
                index: i + 1,
                text: rule.to_string(),
            })
            .collect(),
    };
    render_with_color(RULES_TEMPLATE, &data, use_color)
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    render_messages_internal(messages, use_color())
}

pub(super) fn render_messages_internal(messages: &[CmdMessage], use_color: bool) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let data = MessagesData {
        messages: messages
            .iter()
            .map(|msg| {
                let style = match msg.level {
                    MessageLevel::Info => names::INFO,
                    MessageLevel::Success => names::SUCCESS,
                    MessageLevel::Warning => names::WARNING,
                    MessageLevel::Error => names::ERROR,
                };
                MessageData {
                    content: msg.content.clone(),
                    style: style.to_string(),
                }
            })
            .collect(),
    };

    render_with_color(MESSAGES_TEMPLATE, &data, use_color).unwrap_or_else(|_| {
        messages
            .iter()
            .map(|m| format!("{}\n", m.content))
            .collect()
    })
}

/// Prints command messages to stdout.
pub fn print_messages(messages: &[CmdMessage]) {
    let output = render_messages(messages);
    if !output.is_empty() {
        print!("{}", output);
    }
}
