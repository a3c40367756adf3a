//! History log of dispatched requests, newest first.

use tracing::debug;
use workbench_domain::{HISTORY_LIMIT, Request, RequestHistory};

/// Bounded log of every dispatch attempt.
///
/// Holds at most [`HISTORY_LIMIT`] request snapshots; recording past the cap
/// evicts the oldest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryLog {
    history: RequestHistory,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            history: RequestHistory::new(HISTORY_LIMIT),
        }
    }

    /// Restores a log from persisted entries, newest first.
    #[must_use]
    pub fn from_entries(entries: Vec<Request>) -> Self {
        Self {
            history: RequestHistory::from_entries(entries, HISTORY_LIMIT),
        }
    }

    /// Records a request snapshot at the front.
    pub fn record(&mut self, request: Request) {
        debug!(request_id = %request.id, url = %request.url, "recorded history entry");
        self.history.add(request);
    }

    /// Returns an entry by position, 0 being the newest.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Request> {
        self.history.get(index)
    }

    /// Returns all entries, newest first.
    #[must_use]
    pub fn entries(&self) -> Vec<Request> {
        self.history.entries().iter().cloned().collect()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
