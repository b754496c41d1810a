//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry point
//! for all shelfmark operations, whatever the UI.
//!
//! [`ShelfmarkApi`] is also the application state: it owns the label store, the label
//! config, the custom rules and the current sort order. The code generator and the
//! layout engine stay stateless; every call hands them what they need and gets a fresh
//! result back.
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O operations**: No stdout, stderr, or file writing
//! - **Presentation concerns**: Returns data structures, not strings
//!
//! ## Generic Over LabelStore
//!
//! `ShelfmarkApi<S: LabelStore>` is generic over the storage backend. The CLI uses
//! `ShelfmarkApi<InMemoryStore>`.

use crate::assist::CodeAssistant;
use crate::barcode::BarcodeRenderer;
use crate::commands;
use crate::config::LabelConfig;
use crate::error::{Result, ShelfmarkError};
use crate::generator::planned_count;
use crate::layout::Layout;
use crate::model::{CustomRule, LabelItem, RuleDraft, SeriesSpec, SortOrder};
use crate::rules::{RuleSelector, RuleSet};
use crate::sheet::SheetOptions;
use crate::store::LabelStore;
use std::str::FromStr;

pub struct ShelfmarkApi<S: LabelStore> {
    store: S,
    config: LabelConfig,
    rules: RuleSet,
    order: SortOrder,
}

impl<S: LabelStore> ShelfmarkApi<S> {
    pub fn new(store: S, config: LabelConfig) -> Self {
        Self {
            store,
            config,
            rules: RuleSet::new(),
            order: SortOrder::default(),
        }
    }

    pub fn generate_series(&mut self, spec: &SeriesSpec) -> commands::CmdResult {
        commands::add::series(&mut self.store, spec, self.rules.as_slice())
    }

    /// How many labels [`Self::generate_series`] would add right now.
    pub fn planned_series_count(&self, spec: &SeriesSpec) -> u64 {
        planned_count(spec)
    }

    pub fn add_manual(&mut self, text: &str) -> commands::CmdResult {
        commands::add::manual(&mut self.store, text)
    }

    pub fn add_codes(&mut self, codes: Vec<String>) -> commands::CmdResult {
        commands::add::append_codes(&mut self.store, codes)
    }

    pub fn add_assisted<A: CodeAssistant + ?Sized>(
        &mut self,
        assistant: &A,
        prompt: &str,
    ) -> Result<commands::CmdResult> {
        commands::add::assisted(&mut self.store, assistant, prompt)
    }

    pub fn add_rule(&mut self, draft: &RuleDraft) -> commands::CmdResult {
        commands::rules::add(&mut self.rules, draft)
    }

    pub fn remove_rules<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::rules::remove(&mut self.rules, &selectors)
    }

    pub fn list_rules(&self) -> commands::CmdResult {
        commands::rules::list(&self.rules)
    }

    pub fn rules(&self) -> &[CustomRule] {
        self.rules.as_slice()
    }

    pub fn clear_labels(&mut self) -> commands::CmdResult {
        commands::clear::run(&mut self.store)
    }

    pub fn labels(&self) -> &[LabelItem] {
        self.store.labels()
    }

    pub fn label_count(&self) -> usize {
        self.store.count()
    }

    pub fn sort_order(&self) -> SortOrder {
        self.order
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.order = order;
    }

    pub fn toggle_sort_order(&mut self) -> SortOrder {
        self.order = self.order.toggled();
        self.order
    }

    pub fn config(&mut self, action: commands::config::ConfigAction) -> commands::CmdResult {
        commands::config::run(&mut self.config, action)
    }

    pub fn label_config(&self) -> &LabelConfig {
        &self.config
    }

    /// Fresh layout of the current labels. Rebuild it after any change.
    pub fn layout(&self) -> Layout<'_> {
        Layout::new(self.store.labels(), self.order, &self.config)
    }

    pub fn print_sheet<R: BarcodeRenderer + ?Sized>(
        &self,
        renderer: &R,
        options: &SheetOptions,
    ) -> Result<commands::CmdResult> {
        commands::print::run(&self.store, &self.config, self.order, renderer, options)
    }
}

fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<RuleSelector>> {
    inputs
        .iter()
        .map(|s| RuleSelector::from_str(s.as_ref()).map_err(ShelfmarkError::Api))
        .collect()
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assist::StaticAssistant;
    use crate::barcode::JsBarcodeMarkup;
    use crate::store::memory::InMemoryStore;

    fn api() -> ShelfmarkApi<InMemoryStore> {
        ShelfmarkApi::new(InMemoryStore::new(), LabelConfig::default())
    }

    #[test]
    fn series_uses_current_rules() {
        let mut api = api();
        api.add_rule(&RuleDraft::new("2", "", "X"));
        let result = api.generate_series(&SeriesSpec::new("A", 1, 2, 1));
        let codes: Vec<_> = result.added_labels.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, vec!["A.1.1", "A.2.1X"]);
    }

    #[test]
    fn removing_rule_by_index_affects_later_series() {
        let mut api = api();
        api.add_rule(&RuleDraft::new("", "", "Z"));
        api.remove_rules(&["1"]).unwrap();
        let result = api.generate_series(&SeriesSpec::new("A", 1, 1, 1));
        assert_eq!(result.added_labels[0].code, "A.1.1");
        assert!(api.rules().is_empty());
    }

    #[test]
    fn bad_selector_is_an_api_error() {
        let mut api = api();
        assert!(matches!(
            api.remove_rules(&["first"]),
            Err(ShelfmarkError::Api(_))
        ));
    }

    #[test]
    fn planned_count_does_not_touch_store() {
        let api = api();
        assert_eq!(api.planned_series_count(&SeriesSpec::new("A", 1, 10, 6)), 60);
        assert_eq!(api.label_count(), 0);
    }

    #[test]
    fn layout_follows_sort_order_and_columns() {
        let mut api = api();
        api.add_manual("A.2.1\nA.10.1\nA.1.1");
        assert_eq!(api.sort_order(), SortOrder::Descending);
        assert_eq!(api.layout().sorted()[0].code, "A.10.1");

        api.toggle_sort_order();
        assert_eq!(api.layout().sorted()[0].code, "A.1.1");

        api.generate_series(&SeriesSpec::new("B", 1, 6, 6));
        api.config(ConfigAction::Set("columns".into(), "2".into()));
        let layout = api.layout();
        assert_eq!(layout.strip_count(), 7);
        assert_eq!(layout.page_count(), 4);
    }

    #[test]
    fn config_changes_never_touch_labels() {
        let mut api = api();
        api.add_manual("A.1.1\nA.1.2");
        let before: Vec<_> = api.labels().to_vec();
        api.config(ConfigAction::Set("width".into(), "50".into()));
        api.config(ConfigAction::Set("columns".into(), "1".into()));
        assert_eq!(api.labels(), before.as_slice());
    }

    #[test]
    fn assisted_codes_join_the_store() {
        let mut api = api();
        api.add_assisted(&StaticAssistant::new(["C.1.1"]), "aisle C").unwrap();
        assert_eq!(api.label_count(), 1);
    }

    #[test]
    fn clear_then_print_has_no_document() {
        let mut api = api();
        api.add_manual("A.1.1");
        api.clear_labels();
        let result = api
            .print_sheet(&JsBarcodeMarkup::default(), &SheetOptions::default())
            .unwrap();
        assert!(result.document.is_none());
        assert_eq!(api.layout().page_count(), 0);
    }
}
