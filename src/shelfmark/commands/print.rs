use crate::barcode::BarcodeRenderer;
use crate::commands::{CmdMessage, CmdResult};
use crate::config::LabelConfig;
use crate::error::Result;
use crate::layout::Layout;
use crate::model::SortOrder;
use crate::sheet::{fit_warnings, render_sheet, SheetOptions};
use crate::store::LabelStore;

pub fn run<S: LabelStore, R: BarcodeRenderer + ?Sized>(
    store: &S,
    config: &LabelConfig,
    order: SortOrder,
    renderer: &R,
    options: &SheetOptions,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if store.count() == 0 {
        result.add_message(CmdMessage::info("No labels to print."));
        return Ok(result);
    }

    for warning in fit_warnings(config) {
        tracing::warn!("{}", warning);
        result.add_message(CmdMessage::warning(warning));
    }

    let layout = Layout::new(store.labels(), order, config);
    let document = render_sheet(&layout, config, renderer, options)?;
    result.add_message(CmdMessage::success(format!(
        "{} labels in {} strips on {} pages.",
        layout.sorted().len(),
        layout.strip_count(),
        layout.page_count()
    )));
    Ok(result.with_document(document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::barcode::JsBarcodeMarkup;
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn empty_store_prints_nothing() {
        let store = StoreFixture::new().store;
        let result = run(
            &store,
            &LabelConfig::default(),
            SortOrder::Descending,
            &JsBarcodeMarkup::default(),
            &SheetOptions::default(),
        )
        .unwrap();
        assert!(result.document.is_none());
    }

    #[test]
    fn renders_document_with_summary() {
        let store = StoreFixture::new().with_series("A", 2, 6).store;
        let result = run(
            &store,
            &LabelConfig::default(),
            SortOrder::Descending,
            &JsBarcodeMarkup::default(),
            &SheetOptions::default(),
        )
        .unwrap();

        let doc = result.document.unwrap();
        assert!(doc.contains("jsbarcode-value=\"A.2.6\""));
        assert_eq!(
            result.messages.last().unwrap().content,
            "12 labels in 2 strips on 1 pages."
        );
    }

    #[test]
    fn descending_puts_highest_code_first() {
        let store = StoreFixture::new().with_codes(&["A.2.1", "A.10.1", "A.1.1"]).store;
        let result = run(
            &store,
            &LabelConfig::default(),
            SortOrder::Descending,
            &JsBarcodeMarkup::default(),
            &SheetOptions::default(),
        )
        .unwrap();
        let doc = result.document.unwrap();
        let first = doc.find("A.10.1").unwrap();
        let second = doc.find("A.2.1").unwrap();
        let third = doc.find("A.1.1").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn oversized_labels_warn_but_still_render() {
        let store = StoreFixture::new().with_codes(&["A.1.1"]).store;
        let config = LabelConfig {
            height: 60.0,
            ..Default::default()
        };
        let result = run(
            &store,
            &config,
            SortOrder::Ascending,
            &JsBarcodeMarkup::default(),
            &SheetOptions::default(),
        )
        .unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert!(result.document.is_some());
    }
}
