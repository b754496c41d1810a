use crate::assist::CodeAssistant;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::generator::{generate_series, parse_manual, planned_count, MAX_SERIES_LABELS};
use crate::model::{CustomRule, SeriesSpec};
use crate::store::LabelStore;

/// Appends a batch of codes, whatever produced them.
pub fn append_codes<S: LabelStore>(store: &mut S, codes: Vec<String>) -> CmdResult {
    let added = store.append_batch(codes);
    let mut result = CmdResult::default();
    if added.is_empty() {
        result.add_message(CmdMessage::info("No labels added."));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Added {} label{} ({} total).",
            added.len(),
            if added.len() == 1 { "" } else { "s" },
            store.count()
        )));
    }
    tracing::debug!(added = added.len(), total = store.count(), "appended batch");
    result.with_added_labels(added)
}

pub fn series<S: LabelStore>(store: &mut S, spec: &SeriesSpec, rules: &[CustomRule]) -> CmdResult {
    let planned = planned_count(spec);
    if planned > MAX_SERIES_LABELS {
        tracing::warn!(aisle = %spec.aisle, planned, "series too large");
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::error(format!(
            "Series of {} labels is too large (limit {}).",
            planned, MAX_SERIES_LABELS
        )));
        return result;
    }
    let codes = generate_series(spec, rules);
    tracing::debug!(
        aisle = %spec.aisle,
        start = spec.start_pos,
        end = spec.end_pos,
        levels = spec.levels,
        rules = rules.len(),
        codes = codes.len(),
        "generated series"
    );
    append_codes(store, codes)
}

pub fn manual<S: LabelStore>(store: &mut S, text: &str) -> CmdResult {
    append_codes(store, parse_manual(text))
}

/// Asks the assistant for codes. On failure the store is left untouched.
pub fn assisted<S: LabelStore, A: CodeAssistant + ?Sized>(
    store: &mut S,
    assistant: &A,
    prompt: &str,
) -> Result<CmdResult> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("Nothing to ask the assistant."));
        return Ok(result);
    }
    let codes = assistant.generate(prompt)?;
    Ok(append_codes(store, codes))
}
