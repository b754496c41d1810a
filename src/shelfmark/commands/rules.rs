use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, ShelfmarkError};
use crate::model::RuleDraft;
use crate::rules::{RuleSelector, RuleSet};

/// Adds a rule. Invalid input is rejected silently: no rule, no message.
pub fn add(rules: &mut RuleSet, draft: &RuleDraft) -> CmdResult {
    let mut result = CmdResult::default();
    match rules.add(draft) {
        Some(rule) => {
            result.add_message(CmdMessage::success(format!("Rule added: {}", rule)));
            result.rules.push(rule.clone());
        }
        None => tracing::debug!(?draft, "rule draft rejected"),
    }
    result
}

/// Removes rules. Selectors are resolved up front so display indexes refer
/// to the list as it was before anything was removed.
pub fn remove(rules: &mut RuleSet, selectors: &[RuleSelector]) -> Result<CmdResult> {
    let ids = selectors
        .iter()
        .map(|s| {
            rules
                .resolve(s)
                .ok_or_else(|| ShelfmarkError::Api(format!("Rule {} not found", s)))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut result = CmdResult::default();
    for id in ids {
        if let Some(rule) = rules.remove(&id) {
            result.add_message(CmdMessage::success(format!("Rule removed: {}", rule)));
            result.rules.push(rule);
        }
    }
    Ok(result)
}

pub fn list(rules: &RuleSet) -> CmdResult {
    let mut result = CmdResult::default().with_rules(rules.as_slice().to_vec());
    if rules.is_empty() {
        result.add_message(CmdMessage::info("No custom rules."));
    }
    result
}
