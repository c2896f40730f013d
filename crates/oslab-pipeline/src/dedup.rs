//! Run-scoped content deduplication.
//!
//! The key is the normalized text, not the URL: the same wording posted on two
//! platforms is stored once, from whichever source was collected first.
//! Keys are compared case-insensitively, so "Great new AI tool" and
//! "great new ai tool" are one item. Cross-run repeats are the store's concern
//! (URL uniqueness).

use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<String>,
}

impl Deduplicator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time `text` is offered, `false` afterwards.
    pub fn admit(&mut self, text: &str) -> bool {
        self.seen.insert(text.to_lowercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
