use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A single label: one location code, one barcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelItem {
    pub id: Uuid,
    pub code: String,
}

impl LabelItem {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
        }
    }
}

/// Which side of a rule a generated cell has to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleTarget {
    Any,
    Exact(i64),
}

impl RuleTarget {
    pub fn matches(&self, value: i64) -> bool {
        match self {
            RuleTarget::Any => true,
            RuleTarget::Exact(n) => *n == value,
        }
    }
}

impl fmt::Display for RuleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleTarget::Any => write!(f, "all"),
            RuleTarget::Exact(n) => write!(f, "{}", n),
        }
    }
}

/// Suffix override applied to generated cells matching `pos` and `level`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomRule {
    pub id: Uuid,
    pub pos: RuleTarget,
    pub level: RuleTarget,
    pub suffix: String,
}

impl CustomRule {
    pub fn new(pos: RuleTarget, level: RuleTarget, suffix: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            pos,
            level,
            suffix: suffix.into(),
        }
    }

    pub fn applies_to(&self, pos: i64, level: i64) -> bool {
        self.pos.matches(pos) && self.level.matches(level)
    }
}

impl fmt::Display for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pos {} . level {} -> +\"{}\"", self.pos, self.level, self.suffix)
    }
}

/// Raw rule input as typed by the user, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleDraft {
    pub pos: String,
    pub level: String,
    pub suffix: String,
}

impl RuleDraft {
    pub fn new(pos: impl Into<String>, level: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            pos: pos.into(),
            level: level.into(),
            suffix: suffix.into(),
        }
    }
}

/// A position range times a level count within one aisle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub aisle: String,
    pub start_pos: i64,
    pub end_pos: i64,
    pub levels: i64,
}

impl Default for SeriesSpec {
    fn default() -> Self {
        Self {
            aisle: "A".to_string(),
            start_pos: 1,
            end_pos: 1,
            levels: 6,
        }
    }
}

impl SeriesSpec {
    pub fn new(aisle: impl Into<String>, start_pos: i64, end_pos: i64, levels: i64) -> Self {
        Self {
            aisle: aisle.into(),
            start_pos,
            end_pos,
            levels,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "A-Z"),
            SortOrder::Descending => write!(f, "Z-A"),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" | "a-z" => Ok(SortOrder::Ascending),
            "desc" | "descending" | "z-a" => Ok(SortOrder::Descending),
            other => Err(format!("Unknown sort order: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_target_matches_everything() {
        assert!(RuleTarget::Any.matches(0));
        assert!(RuleTarget::Any.matches(-3));
        assert!(RuleTarget::Exact(2).matches(2));
        assert!(!RuleTarget::Exact(2).matches(3));
    }

    #[test]
    fn rule_needs_both_sides_to_match() {
        let rule = CustomRule::new(RuleTarget::Exact(1), RuleTarget::Exact(6), "S");
        assert!(rule.applies_to(1, 6));
        assert!(!rule.applies_to(1, 5));
        assert!(!rule.applies_to(2, 6));
    }

    #[test]
    fn label_ids_are_unique() {
        let a = LabelItem::new("A.1.1");
        let b = LabelItem::new("A.1.1");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn default_sort_is_descending() {
        assert_eq!(SortOrder::default(), SortOrder::Descending);
        assert_eq!(SortOrder::Descending.toggled(), SortOrder::Ascending);
    }

    #[test]
    fn parses_sort_order() {
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Ascending);
        assert_eq!("Z-A".parse::<SortOrder>().unwrap(), SortOrder::Descending);
        assert!("sideways".parse::<SortOrder>().is_err());
    }
}
