use super::LabelStore;
use crate::model::LabelItem;

/// In-memory label store. Does NOT persist data.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    labels: Vec<LabelItem>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LabelStore for InMemoryStore {
    fn push(&mut self, item: LabelItem) {
        self.labels.push(item);
    }

    fn clear(&mut self) {
        self.labels.clear();
    }

    fn labels(&self) -> &[LabelItem] {
        &self.labels
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_codes(mut self, codes: &[&str]) -> Self {
            self.store
                .append_batch(codes.iter().map(|c| c.to_string()));
            self
        }

        pub fn with_series(mut self, aisle: &str, positions: i64, levels: i64) -> Self {
            for pos in 1..=positions {
                for level in 1..=levels {
                    self.store
                        .push(LabelItem::new(format!("{}.{}.{}", aisle, pos, level)));
                }
            }
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use super::*;

    #[test]
    fn append_preserves_batch_order_after_existing() {
        let mut store = StoreFixture::new().with_codes(&["Z.1"]).store;
        let added = store.append_batch(vec!["B.1".to_string(), "A.1".to_string()]);

        assert_eq!(added.len(), 2);
        let codes: Vec<_> = store.labels().iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, vec!["Z.1", "B.1", "A.1"]);
        assert_eq!(store.labels()[1].id, added[0].id);
    }

    #[test]
    fn append_mints_fresh_ids_for_duplicates() {
        let mut store = InMemoryStore::new();
        let added = store.append_batch(vec!["A.1".to_string(), "A.1".to_string()]);
        assert_ne!(added[0].id, added[1].id);
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn clear_empties_everything() {
        let mut store = StoreFixture::new().with_series("A", 3, 6).store;
        assert_eq!(store.count(), 18);
        store.clear();
        assert_eq!(store.count(), 0);
        assert!(store.labels().is_empty());
    }

    #[test]
    fn empty_batch_is_harmless() {
        let mut store = InMemoryStore::new();
        assert!(store.append_batch(Vec::<String>::new()).is_empty());
        assert_eq!(store.count(), 0);
    }
}
