//! # Sort & Layout Engine
//!
//! Three pure transforms over the label store's contents:
//!
//! ```text
//! labels ──sort──▶ sorted ──chunk(STRIP_SIZE)──▶ strips ──chunk(strips_per_page)──▶ pages
//! ```
//!
//! Nothing is cached. A [`Layout`] borrows the labels it was built from and
//! hands out slices, so strips and pages never own or copy a label. Build a
//! new one whenever the labels, the sort order or the column count change.
//!
//! ## Page capacity
//!
//! A strip of six labels at the default 40mm label height is about 240mm tall,
//! which leaves no room for a second row of strips on a 297mm A4 page. Page
//! capacity is therefore counted in strip *columns*: one row of strips per
//! page. That is a fixed policy, see [`strips_per_page`], and not derived from
//! the label height. The print sheet warns when a strip no longer fits.

use crate::collate::natural_cmp;
use crate::config::LabelConfig;
use crate::model::{LabelItem, SortOrder};

/// Labels per strip.
pub const STRIP_SIZE: usize = 6;

/// How many strips a single printed page holds: one row of `columns` strips.
pub fn strips_per_page(config: &LabelConfig) -> usize {
    config.columns.max(1) as usize
}

/// Stable sort into a new list of references. The input order is untouched.
pub fn sort_labels(labels: &[LabelItem], order: SortOrder) -> Vec<&LabelItem> {
    let mut sorted: Vec<&LabelItem> = labels.iter().collect();
    sorted.sort_by(|a, b| {
        let ordering = natural_cmp(&a.code, &b.code);
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
    sorted
}

/// Consecutive strips of [`STRIP_SIZE`]; the last one holds the remainder.
pub fn chunk_strips<T>(items: &[T]) -> Vec<&[T]> {
    items.chunks(STRIP_SIZE).collect()
}

/// Consecutive pages of `per_page` strips; the last one holds the remainder.
pub fn chunk_pages<T>(strips: &[T], per_page: usize) -> Vec<&[T]> {
    strips.chunks(per_page.max(1)).collect()
}

/// Sorted, chunked view over a set of labels.
#[derive(Debug, Clone)]
pub struct Layout<'a> {
    sorted: Vec<&'a LabelItem>,
    per_page: usize,
}

impl<'a> Layout<'a> {
    pub fn new(labels: &'a [LabelItem], order: SortOrder, config: &LabelConfig) -> Self {
        let sorted = sort_labels(labels, order);
        tracing::debug!(labels = sorted.len(), ?order, "laying out labels");
        Self {
            sorted,
            per_page: strips_per_page(config),
        }
    }

    pub fn sorted(&self) -> &[&'a LabelItem] {
        &self.sorted
    }

    pub fn strips(&self) -> Vec<&[&'a LabelItem]> {
        chunk_strips(&self.sorted)
    }

    pub fn pages(&self) -> Vec<Vec<&[&'a LabelItem]>> {
        let strips = self.strips();
        chunk_pages(&strips, self.per_page)
            .into_iter()
            .map(|page| page.to_vec())
            .collect()
    }

    pub fn strip_count(&self) -> usize {
        self.sorted.len().div_ceil(STRIP_SIZE)
    }

    pub fn page_count(&self) -> usize {
        self.strip_count().div_ceil(self.per_page)
    }

    pub fn strips_per_page(&self) -> usize {
        self.per_page
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(codes: &[&str]) -> Vec<LabelItem> {
        codes.iter().map(|c| LabelItem::new(*c)).collect()
    }

    fn codes(sorted: &[&LabelItem]) -> Vec<String> {
        sorted.iter().map(|l| l.code.clone()).collect()
    }

    #[test]
    fn ascending_is_natural() {
        let items = labels(&["A.2.1", "A.10.1", "A.1.1"]);
        let sorted = sort_labels(&items, SortOrder::Ascending);
        assert_eq!(codes(&sorted), vec!["A.1.1", "A.2.1", "A.10.1"]);
    }

    #[test]
    fn descending_is_exact_reverse() {
        let items = labels(&["A.2.1", "A.10.1", "A.1.1", "B.3.2", "a.7.7"]);
        let asc = codes(&sort_labels(&items, SortOrder::Ascending));
        let mut desc = codes(&sort_labels(&items, SortOrder::Descending));
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn sort_is_stable_and_non_destructive() {
        let items = labels(&["B.1", "a.1", "A.1"]);
        let sorted = sort_labels(&items, SortOrder::Ascending);
        // a.1 and A.1 compare equal and keep their insertion order
        assert_eq!(sorted[0].id, items[1].id);
        assert_eq!(sorted[1].id, items[2].id);
        assert_eq!(items[0].code, "B.1");
    }

    #[test]
    fn thirteen_items_make_three_strips() {
        let items: Vec<u32> = (0..13).collect();
        let strips = chunk_strips(&items);
        let sizes: Vec<usize> = strips.iter().map(|s| s.len()).collect();
        assert_eq!(sizes, vec![6, 6, 1]);
        assert_eq!(strips[1], &[6, 7, 8, 9, 10, 11]);
        assert_eq!(strips[2], &[12]);
    }

    #[test]
    fn exact_multiple_has_no_partial_strip() {
        let items: Vec<u32> = (0..12).collect();
        assert_eq!(chunk_strips(&items).len(), 2);
        assert!(chunk_strips::<u32>(&[]).is_empty());
    }

    #[test]
    fn seven_strips_three_columns() {
        let strips: Vec<u32> = (0..7).collect();
        let pages = chunk_pages(&strips, 3);
        let sizes: Vec<usize> = pages.iter().map(|p| p.len()).collect();
        assert_eq!(sizes, vec![3, 3, 1]);
    }

    #[test]
    fn zero_columns_fall_back_to_one() {
        let strips: Vec<u32> = (0..2).collect();
        assert_eq!(chunk_pages(&strips, 0).len(), 2);
        let config = LabelConfig {
            columns: 0,
            ..Default::default()
        };
        assert_eq!(strips_per_page(&config), 1);
    }

    #[test]
    fn layout_builds_strips_and_pages() {
        let items: Vec<LabelItem> = (1..=40).map(|i| LabelItem::new(format!("A.{}.1", i))).collect();
        let layout = Layout::new(&items, SortOrder::Ascending, &LabelConfig::default());

        assert_eq!(layout.strip_count(), 7);
        assert_eq!(layout.page_count(), 3);
        let pages = layout.pages();
        let sizes: Vec<usize> = pages.iter().map(|p| p.len()).collect();
        assert_eq!(sizes, vec![3, 3, 1]);
        assert_eq!(pages[0][0][0].code, "A.1.1");
        assert_eq!(pages[2][0].len(), 4);
        assert_eq!(pages[2][0][3].code, "A.40.1");
    }

    #[test]
    fn layout_is_idempotent() {
        let items = labels(&["C.2", "A.10", "A.9", "B.1", "A.1", "C.1", "B.22", "B.3"]);
        let config = LabelConfig {
            columns: 1,
            ..Default::default()
        };
        let first = Layout::new(&items, SortOrder::Descending, &config);
        let second = Layout::new(&items, SortOrder::Descending, &config);

        let ids = |layout: &Layout| -> Vec<Vec<Vec<uuid::Uuid>>> {
            layout
                .pages()
                .iter()
                .map(|page| page.iter().map(|s| s.iter().map(|l| l.id).collect()).collect())
                .collect()
        };
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn empty_layout() {
        let layout = Layout::new(&[], SortOrder::Descending, &LabelConfig::default());
        assert!(layout.is_empty());
        assert!(layout.strips().is_empty());
        assert!(layout.pages().is_empty());
        assert_eq!(layout.page_count(), 0);
    }
}
