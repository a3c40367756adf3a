//! Request history domain model
//!
//! A bounded, newest-first activity log of dispatched request snapshots.

use std::collections::VecDeque;

use crate::request::Request;

/// Maximum number of history entries kept.
pub const HISTORY_LIMIT: usize = 50;

/// Request history with a maximum size limit.
///
/// Entries are not deduplicated: sending the same request twice logs it twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHistory {
    /// Snapshots, newest first.
    entries: VecDeque<Request>,
    /// Maximum number of entries to keep.
    max_entries: usize,
}

impl RequestHistory {
    /// Creates an empty history holding at most `max_entries` entries.
    #[must_use]
    pub const fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries,
        }
    }

    /// Restores a history from newest-first snapshots, dropping any overflow.
    #[must_use]
    pub fn from_entries(entries: Vec<Request>, max_entries: usize) -> Self {
        let mut entries = VecDeque::from(entries);
        entries.truncate(max_entries);
        Self {
            entries,
            max_entries,
        }
    }

    /// Adds a snapshot at the front, evicting the oldest beyond the limit.
    pub fn add(&mut self, request: Request) {
        self.entries.push_front(request);
        self.entries.truncate(self.max_entries);
    }

    /// Returns all entries, newest first.
    #[must_use]
    pub const fn entries(&self) -> &VecDeque<Request> {
        &self.entries
    }

    /// Returns the entry at `index` (0 is the newest).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Request> {
        self.entries.get(index)
    }

    /// Clears all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the configured limit.
    #[must_use]
    pub const fn max_entries(&self) -> usize {
        self.max_entries
    }
}

impl Default for RequestHistory {
    fn default() -> Self {
        Self::new(HISTORY_LIMIT)
    }
}
