//! Calculation history.
//!
//! A bounded, newest-first list of [`HistoryEntry`] values. Recording an
//! entry past capacity evicts the oldest one.

mod entry;

pub use entry::HistoryEntry;

use std::collections::VecDeque;

use crate::calculator::Action;

/// Entries kept when history lives on the local device only.
pub const LOCAL_HISTORY_LIMIT: usize = 10;

/// Bounded newest-first history.
#[derive(Clone, Debug)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::local()
    }
}

impl HistoryLog {
    /// Create an empty log holding at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// The log used in local-only mode.
    pub fn local() -> Self {
        Self::with_capacity(LOCAL_HISTORY_LIMIT)
    }

    /// Get the maximum number of entries kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no calculation has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a calculation at the front.
    pub fn record(&mut self, calculation: impl Into<String>, result: f64) -> &HistoryEntry {
        self.push(HistoryEntry::new(calculation, result))
    }

    /// Insert an already-built entry at the front.
    pub fn push(&mut self, entry: HistoryEntry) -> &HistoryEntry {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
        &self.entries[0]
    }

    /// Replace the contents with entries loaded from storage, newest first.
    pub fn replace(&mut self, entries: impl IntoIterator<Item = HistoryEntry>) {
        self.entries = entries.into_iter().take(self.capacity).collect();
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entry at `index`, where 0 is the newest.
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Iterate newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// The keypad action that loads the result of the entry at `index`.
    pub fn recall(&self, index: usize) -> Option<Action> {
        self.get(index).map(HistoryEntry::recall)
    }
}
