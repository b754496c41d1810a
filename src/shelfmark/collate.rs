//! Natural ordering for location codes.
//!
//! Codes are compared with the root Unicode collation at primary strength and
//! numeric ordering on. Runs of digits compare by value, so `A.2.1` sorts
//! before `A.10.1`. Case and accents are ignored, so `é.1` equals `E.1` and
//! `Đ.1` files next to `D.1` rather than after `Z`. Punctuation sorts ahead of
//! digits and digits ahead of letters.

use icu_collator::options::{CollatorOptions, Strength};
use icu_collator::preferences::CollationNumericOrdering;
use icu_collator::{Collator, CollatorBorrowed, CollatorPreferences};
use once_cell::sync::Lazy;
use std::cmp::Ordering;

static COLLATOR: Lazy<Option<CollatorBorrowed<'static>>> = Lazy::new(|| {
    let mut prefs = CollatorPreferences::default();
    prefs.numeric_ordering = Some(CollationNumericOrdering::True);
    let mut options = CollatorOptions::default();
    options.strength = Some(Strength::Primary);

    match Collator::try_new(prefs, options) {
        Ok(collator) => Some(collator),
        Err(e) => {
            tracing::error!(error = %e, "collator unavailable, falling back to code point order");
            None
        }
    }
});

pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    match COLLATOR.as_ref() {
        Some(collator) => collator.compare(a, b),
        None => a.cmp(b),
    }
}
