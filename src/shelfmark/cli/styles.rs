//! Styles for the shelfmark CLI.
//!
//! Templates never name colors. They tag text with a semantic style (`{{ code | style("code") }}`)
//! and this module decides what that style looks like. Changing the look of the preview
//! means editing this file, not the templates.

use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub mod names {
    pub const PAGE_HEADER: &str = "page_header";
    pub const STRIP_HEADER: &str = "strip_header";
    pub const CODE: &str = "code";
    pub const MUTED: &str = "muted";
    pub const KEY: &str = "key";
    pub const INFO: &str = "info";
    pub const SUCCESS: &str = "success";
    pub const WARNING: &str = "warning";
    pub const ERROR: &str = "error";
}

pub struct Theme {
    styles: HashMap<&'static str, Style>,
}

impl Theme {
    fn new() -> Self {
        Self {
            styles: HashMap::new(),
        }
    }

    fn add(mut self, name: &'static str, style: Style) -> Self {
        self.styles.insert(name, style);
        self
    }

    /// Styled text, or the text unchanged when colors are off or the style is unknown.
    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style.clone().force_styling(true).apply_to(text).to_string(),
            _ => text.to_string(),
        }
    }
}

pub static SHELFMARK_THEME: Lazy<Theme> = Lazy::new(|| {
    Theme::new()
        .add(names::PAGE_HEADER, Style::new().bold().underlined())
        .add(names::STRIP_HEADER, Style::new().color256(246))
        .add(names::CODE, Style::new().cyan())
        .add(names::MUTED, Style::new().color256(246).italic())
        .add(names::KEY, Style::new().yellow())
        .add(names::INFO, Style::new())
        .add(names::SUCCESS, Style::new().green())
        .add(names::WARNING, Style::new().yellow())
        .add(names::ERROR, Style::new().red().bold())
});
