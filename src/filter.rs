//! Monitored-book membership filter.

use std::collections::BTreeSet;

/// Read-only set of monitored book ids, built once at startup.
///
/// Pages belonging to other books are acknowledged as ignored and never
/// processed.
#[derive(Debug, Clone)]
pub struct BookFilter {
    monitored: BTreeSet<i64>,
}

impl BookFilter {
    /// Build a filter over the given book ids. Duplicates are collapsed.
    pub fn new(book_ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            monitored: book_ids.into_iter().collect(),
        }
    }

    /// Whether the page's containing book is monitored.
    pub fn is_monitored(&self, book_id: i64) -> bool {
        self.monitored.contains(&book_id)
    }

    /// Monitored book ids in ascending order, for status endpoints.
    pub fn monitored_books(&self) -> Vec<i64> {
        self.monitored.iter().copied().collect()
    }

    /// Number of monitored books.
    pub fn len(&self) -> usize {
        self.monitored.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monitored.is_empty()
    }
}
