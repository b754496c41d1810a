//! # Code Generator
//!
//! Turns user input into batches of location codes. Everything here is a pure
//! function: no store, no config, no I/O.
//!
//! Series codes look like `{aisle}.{pos}.{level}{suffix}`, e.g. `A.3.6S`, and
//! are emitted position-major, level-minor. That is insertion order only; the
//! layout engine applies its own display order later.

use crate::model::{CustomRule, SeriesSpec};

/// Largest series accepted in one request.
pub const MAX_SERIES_LABELS: u64 = 100_000;

/// Number of codes [`generate_series`] will emit for `spec`, never negative.
pub fn planned_count(spec: &SeriesSpec) -> u64 {
    if spec.end_pos < spec.start_pos || spec.levels <= 0 {
        return 0;
    }
    let positions = (spec.end_pos as i128 - spec.start_pos as i128 + 1) as u128;
    let total = positions.saturating_mul(spec.levels as u128);
    u64::try_from(total).unwrap_or(u64::MAX)
}

/// Suffix for one cell: the first rule in insertion order that matches wins.
pub fn resolve_suffix(rules: &[CustomRule], pos: i64, level: i64) -> &str {
    rules
        .iter()
        .find(|rule| rule.applies_to(pos, level))
        .map(|rule| rule.suffix.as_str())
        .unwrap_or("")
}

pub fn generate_series(spec: &SeriesSpec, rules: &[CustomRule]) -> Vec<String> {
    if planned_count(spec) == 0 {
        return Vec::new();
    }

    let mut codes = Vec::new();
    for pos in spec.start_pos..=spec.end_pos {
        for level in 1..=spec.levels {
            let suffix = resolve_suffix(rules, pos, level);
            codes.push(format!("{}.{}.{}{}", spec.aisle, pos, level, suffix));
        }
    }
    codes
}

/// One code per non-blank line, trimmed, otherwise kept verbatim.
pub fn parse_manual(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
