//! # Label Configuration
//!
//! Physical label size, barcode rendering knobs and sheet layout. Values are
//! resolved in this order, later wins:
//!
//! 1. Compiled defaults ([`LabelConfig::default`])
//! 2. A JSON file passed with `--config` (or `SHELFMARK_CONFIG`)
//! 3. `--set key=value` overrides on the command line
//! 4. `config <key> <value>` inside a session
//!
//! Nothing is ever written back; a new process starts from the defaults again.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `width` | `60` | Label width in mm |
//! | `height` | `40` | Label height in mm |
//! | `font-size` | `20` | Human-readable text size |
//! | `barcode-height` | `60` | Bar height handed to the renderer |
//! | `bar-width` | `1.5` | Width of a single bar |
//! | `show-text` | `true` | Print the code under the bars |
//! | `columns` | `3` | Strips per row, and so strips per page |
//! | `gap` | `4` | Space between strips in mm |

use crate::error::{Result, ShelfmarkError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const KEYS: &[&str] = &[
    "width",
    "height",
    "font-size",
    "barcode-height",
    "bar-width",
    "show-text",
    "columns",
    "gap",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelConfig {
    pub width: f64,
    pub height: f64,
    pub font_size: u32,
    pub barcode_height: u32,
    pub bar_width: f64,
    pub show_text: bool,
    pub columns: u32,
    pub gap: f64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            width: 60.0,
            height: 40.0,
            font_size: 20,
            barcode_height: 60,
            bar_width: 1.5,
            show_text: true,
            columns: 3,
            gap: 4.0,
        }
    }
}

impl LabelConfig {
    /// Load config from a JSON file. Missing keys fall back to defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(ShelfmarkError::Io)?;
        let config: LabelConfig =
            serde_json::from_str(&content).map_err(ShelfmarkError::Serialization)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.columns < 1 {
            return Err(ShelfmarkError::Config(
                "columns must be at least 1".to_string(),
            ));
        }
        for (key, value) in [
            ("width", self.width),
            ("height", self.height),
            ("bar-width", self.bar_width),
            ("gap", self.gap),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ShelfmarkError::Config(format!(
                    "{} must be a non-negative number",
                    key
                )));
            }
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match normalize_key(key).as_str() {
            "width" => Some(format_mm(self.width)),
            "height" => Some(format_mm(self.height)),
            "font-size" => Some(self.font_size.to_string()),
            "barcode-height" => Some(self.barcode_height.to_string()),
            "bar-width" => Some(format_mm(self.bar_width)),
            "show-text" => Some(self.show_text.to_string()),
            "columns" => Some(self.columns.to_string()),
            "gap" => Some(format_mm(self.gap)),
            _ => None,
        }
    }

    /// Set a single key from its textual form. On error the config is unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let mut next = self.clone();
        let value = value.trim();
        match normalize_key(key).as_str() {
            "width" => next.width = parse_number(key, value)?,
            "height" => next.height = parse_number(key, value)?,
            "font-size" => next.font_size = parse_integer(key, value)?,
            "barcode-height" => next.barcode_height = parse_integer(key, value)?,
            "bar-width" => next.bar_width = parse_number(key, value)?,
            "show-text" => next.show_text = parse_bool(key, value)?,
            "columns" => next.columns = parse_integer(key, value)?,
            "gap" => next.gap = parse_number(key, value)?,
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        next.validate().map_err(|e| match e {
            ShelfmarkError::Config(msg) => msg,
            other => other.to_string(),
        })?;
        *self = next;
        Ok(())
    }

    /// All keys with their current values, in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .filter_map(|key| self.get(key).map(|v| (*key, v)))
            .collect()
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase().replace('_', "-")
}

pub(crate) fn format_mm(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn parse_number(key: &str, value: &str) -> std::result::Result<f64, String> {
    value
        .parse::<f64>()
        .map_err(|_| format!("Invalid value for {}: {}", key, value))
}

fn parse_integer(key: &str, value: &str) -> std::result::Result<u32, String> {
    value
        .parse::<u32>()
        .map_err(|_| format!("Invalid value for {}: {}", key, value))
}

fn parse_bool(key: &str, value: &str) -> std::result::Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(format!("Invalid value for {}: {}", key, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LabelConfig::default();
        assert_eq!(config.width, 60.0);
        assert_eq!(config.height, 40.0);
        assert_eq!(config.font_size, 20);
        assert_eq!(config.barcode_height, 60);
        assert!(config.show_text);
        assert_eq!(config.columns, 3);
        assert_eq!(config.gap, 4.0);
        assert_eq!(config.bar_width, 1.5);
    }

    #[test]
    fn test_set_accepts_underscores_and_dashes() {
        let mut config = LabelConfig::default();
        config.set("font_size", "14").unwrap();
        config.set("bar-width", "2.25").unwrap();
        assert_eq!(config.font_size, 14);
        assert_eq!(config.get("bar_width").as_deref(), Some("2.25"));
    }

    #[test]
    fn test_zero_columns_rejected() {
        let mut config = LabelConfig::default();
        let err = config.set("columns", "0").unwrap_err();
        assert!(err.contains("at least 1"));
        assert_eq!(config.columns, 3);
    }

    #[test]
    fn test_invalid_value_leaves_config_unchanged() {
        let mut config = LabelConfig::default();
        assert!(config.set("width", "wide").is_err());
        assert!(config.set("show-text", "maybe").is_err());
        assert!(config.set("colour", "red").is_err());
        assert_eq!(config, LabelConfig::default());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.json");
        fs::write(&path, r#"{ "columns": 2, "showText": false }"#).unwrap();

        let config = LabelConfig::load(&path).unwrap();
        assert_eq!(config.columns, 2);
        assert!(!config.show_text);
        assert_eq!(config.width, 60.0);
    }

    #[test]
    fn test_load_rejects_zero_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.json");
        fs::write(&path, r#"{ "columns": 0 }"#).unwrap();

        assert!(matches!(
            LabelConfig::load(&path),
            Err(ShelfmarkError::Config(_))
        ));
    }

    #[test]
    fn test_entries_cover_all_keys() {
        let entries = LabelConfig::default().entries();
        assert_eq!(entries.len(), KEYS.len());
        assert_eq!(entries[0], ("width", "60".to_string()));
    }
}
