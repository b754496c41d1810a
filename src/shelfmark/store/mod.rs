//! # Storage Layer
//!
//! The label store is the single owner of every [`LabelItem`]. It is
//! append-only: batches go in at the end, in their given order, and the only
//! way anything leaves is [`LabelStore::clear`]. Strips and pages are views
//! computed by the layout engine from [`LabelStore::labels`]; the store
//! knows nothing about them.
//!
//! Labels live for the duration of a session only. [`memory::InMemoryStore`]
//! is the one implementation; the trait exists so the API and commands can be
//! exercised against any backing collection.

use crate::model::LabelItem;

pub mod memory;

pub trait LabelStore {
    /// Append one label after all existing entries.
    fn push(&mut self, item: LabelItem);

    /// Remove every label.
    fn clear(&mut self);

    /// All labels in insertion order.
    fn labels(&self) -> &[LabelItem];

    fn count(&self) -> usize {
        self.labels().len()
    }

    /// Mint a fresh label for every code and append them, keeping batch order.
    fn append_batch<I>(&mut self, codes: I) -> Vec<LabelItem>
    where
        I: IntoIterator<Item = String>,
        Self: Sized,
    {
        let items: Vec<LabelItem> = codes.into_iter().map(LabelItem::new).collect();
        for item in &items {
            self.push(item.clone());
        }
        items
    }
}
