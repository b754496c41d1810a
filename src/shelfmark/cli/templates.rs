//! # CLI Templates
//!
//! Terminal output is rendered from minijinja templates kept as stand-alone files, which
//! makes them easier to edit and diff than string literals. They are embedded here at
//! compile time.
//!
//! Layout math (column widths, padding) stays in Rust because it needs unicode-aware
//! measuring. Templates pick styles and decide what gets printed. Line breaks are explicit
//! (`{{ "\n" }}`) so blank lines never come from loop or conditional whitespace.

pub const PREVIEW_TEMPLATE: &str = include_str!("templates/preview.tmp");
pub const CONFIG_TEMPLATE: &str = include_str!("templates/config.tmp");
pub const RULES_TEMPLATE: &str = include_str!("templates/rules.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
