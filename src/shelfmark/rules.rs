//! # Custom Rules
//!
//! Suffix overrides for series generation. Rules are kept in insertion order,
//! which is also their precedence: when two rules match the same cell, the one
//! added first wins. There is no "most specific wins" policy.
//!
//! Rules are addressed either by their stable id or, for humans, by a 1-based
//! display index into the current list (`1`, `2`, ...).

use crate::model::{CustomRule, RuleDraft, RuleTarget};
use std::str::FromStr;
use uuid::Uuid;

/// Turns raw form input into a rule.
///
/// Blank position or level means "all". Anything else has to parse as an
/// integer, and the suffix has to be non-blank. Returns `None` otherwise.
pub fn validate(draft: &RuleDraft) -> Option<CustomRule> {
    let pos = parse_target(&draft.pos)?;
    let level = parse_target(&draft.level)?;
    let suffix = draft.suffix.trim();
    if suffix.is_empty() {
        return None;
    }
    Some(CustomRule::new(pos, level, suffix))
}

fn parse_target(raw: &str) -> Option<RuleTarget> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(RuleTarget::Any);
    }
    raw.parse::<i64>().ok().map(RuleTarget::Exact)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<CustomRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and appends. Invalid drafts leave the set untouched.
    pub fn add(&mut self, draft: &RuleDraft) -> Option<&CustomRule> {
        let rule = validate(draft)?;
        self.rules.push(rule);
        self.rules.last()
    }

    pub fn remove(&mut self, id: &Uuid) -> Option<CustomRule> {
        let pos = self.rules.iter().position(|r| &r.id == id)?;
        Some(self.rules.remove(pos))
    }

    pub fn as_slice(&self) -> &[CustomRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Maps a selector to the id of the rule it currently points at.
    pub fn resolve(&self, selector: &RuleSelector) -> Option<Uuid> {
        match selector {
            RuleSelector::Index(n) => n
                .checked_sub(1)
                .and_then(|i| self.rules.get(i))
                .map(|r| r.id),
            RuleSelector::Id(id) => self.rules.iter().find(|r| &r.id == id).map(|r| r.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSelector {
    Index(usize),
    Id(Uuid),
}

impl std::fmt::Display for RuleSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleSelector::Index(n) => write!(f, "{}", n),
            RuleSelector::Id(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for RuleSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            return Ok(RuleSelector::Index(n));
        }
        if let Ok(id) = Uuid::parse_str(s) {
            return Ok(RuleSelector::Id(id));
        }
        Err(format!("Invalid rule selector: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_become_wildcards() {
        let rule = validate(&RuleDraft::new("", "  ", "S")).unwrap();
        assert_eq!(rule.pos, RuleTarget::Any);
        assert_eq!(rule.level, RuleTarget::Any);
        assert_eq!(rule.suffix, "S");
    }

    #[test]
    fn numbers_become_exact_targets() {
        let rule = validate(&RuleDraft::new(" 3 ", "6", " TOP ")).unwrap();
        assert_eq!(rule.pos, RuleTarget::Exact(3));
        assert_eq!(rule.level, RuleTarget::Exact(6));
        assert_eq!(rule.suffix, "TOP");
    }

    #[test]
    fn rejects_non_numeric_position_or_level() {
        assert!(validate(&RuleDraft::new("x", "", "S")).is_none());
        assert!(validate(&RuleDraft::new("", "1.5", "S")).is_none());
        assert!(validate(&RuleDraft::new("3a", "1", "S")).is_none());
    }

    #[test]
    fn rejects_blank_suffix() {
        assert!(validate(&RuleDraft::new("1", "1", "")).is_none());
        assert!(validate(&RuleDraft::new("1", "1", "   ")).is_none());
    }

    #[test]
    fn invalid_add_is_a_no_op() {
        let mut set = RuleSet::new();
        set.add(&RuleDraft::new("1", "", "A")).unwrap();
        let before = set.clone();

        assert!(set.add(&RuleDraft::new("one", "", "B")).is_none());
        assert_eq!(set, before);
    }

    #[test]
    fn keeps_insertion_order() {
        let mut set = RuleSet::new();
        set.add(&RuleDraft::new("1", "", "A"));
        set.add(&RuleDraft::new("", "", "B"));
        set.add(&RuleDraft::new("2", "3", "C"));
        let suffixes: Vec<_> = set.as_slice().iter().map(|r| r.suffix.as_str()).collect();
        assert_eq!(suffixes, vec!["A", "B", "C"]);
    }

    #[test]
    fn removes_by_id() {
        let mut set = RuleSet::new();
        let first = set.add(&RuleDraft::new("1", "", "A")).unwrap().id;
        set.add(&RuleDraft::new("2", "", "B"));

        let removed = set.remove(&first).unwrap();
        assert_eq!(removed.suffix, "A");
        assert_eq!(set.len(), 1);
        assert!(set.remove(&first).is_none());
    }

    #[test]
    fn resolves_display_index_and_id() {
        let mut set = RuleSet::new();
        set.add(&RuleDraft::new("1", "", "A"));
        let second = set.add(&RuleDraft::new("2", "", "B")).unwrap().id;

        assert_eq!(set.resolve(&RuleSelector::Index(2)), Some(second));
        assert_eq!(set.resolve(&RuleSelector::Id(second)), Some(second));
        assert_eq!(set.resolve(&RuleSelector::Index(0)), None);
        assert_eq!(set.resolve(&RuleSelector::Index(3)), None);
    }

    #[test]
    fn parses_selectors() {
        assert_eq!("2".parse::<RuleSelector>(), Ok(RuleSelector::Index(2)));
        let id = Uuid::new_v4();
        assert_eq!(
            id.to_string().parse::<RuleSelector>(),
            Ok(RuleSelector::Id(id))
        );
        assert!("second".parse::<RuleSelector>().is_err());
    }
}
