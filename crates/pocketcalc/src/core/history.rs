//! Calculation history
//!
//! A fixed-capacity, most-recent-first record of completed computations.
//! Entries are never mutated; inserting into a full history evicts the
//! oldest entry.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A single entry in the calculation history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The expression that was evaluated, e.g. `5 × 3` or `sin(45°)`
    pub expression: String,
    /// The result numeral as it appeared on the display
    pub result: String,
    /// Creation time (Unix epoch millis)
    pub timestamp: u64,
}

impl HistoryEntry {
    /// Creates a history entry stamped with the current time
    #[must_use]
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self::with_timestamp(expression, result, current_timestamp())
    }

    /// Creates a history entry with a specific timestamp
    #[must_use]
    pub fn with_timestamp(
        expression: impl Into<String>,
        result: impl Into<String>,
        timestamp: u64,
    ) -> Self {
        Self {
            expression: expression.into(),
            result: result.into(),
            timestamp,
        }
    }

    /// Returns a formatted display string
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} = {}", self.expression, self.result)
    }
}

/// Returns the current wall-clock time in milliseconds
#[must_use]
pub fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Bounded calculation history, newest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    /// Entries, index 0 is the most recent
    entries: VecDeque<HistoryEntry>,
    /// Maximum number of entries to keep
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Number of entries a calculator keeps
    pub const DEFAULT_CAPACITY: usize = 10;

    /// Creates an empty history holding up to [`Self::DEFAULT_CAPACITY`] entries
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates an empty history with a custom capacity
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepends an entry, evicting the oldest one when full
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(entry);
    }

    /// Records a completed computation
    pub fn record(
        &mut self,
        expression: impl Into<String>,
        result: impl Into<String>,
        timestamp: u64,
    ) {
        self.push(HistoryEntry::with_timestamp(expression, result, timestamp));
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the history is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of entries
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates entries newest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Returns the most recent entry
    #[must_use]
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Returns the oldest entry still kept
    #[must_use]
    pub fn oldest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Returns the entry at `index` (0 = most recent)
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Serializes the entries (newest first) to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// Exports the history as `expression = result` lines, newest first
    #[must_use]
    pub fn export_formatted(&self) -> String {
        self.entries
            .iter()
            .map(HistoryEntry::display)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntry;
    type IntoIter = std::collections::vec_deque::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
