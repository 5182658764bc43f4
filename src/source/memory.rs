//! In-memory entry source.

use std::collections::HashMap;

use crate::calculation::candidate_window;
use crate::models::{TimeEntry, User};

use super::{EntrySource, FetchError};

/// An [`EntrySource`] backed by a map of user ID to entries.
///
/// Returns the entries of a user that overlap the candidate window of the
/// requested year. Unknown users have no entries.
///
/// # Example
///
/// ```
/// use working_time_engine::models::{TimeEntry, User};
/// use working_time_engine::source::{EntrySource, InMemoryEntrySource};
/// use chrono::NaiveDateTime;
///
/// let mut source = InMemoryEntrySource::new();
/// source.insert(
///     "user_001",
///     vec![TimeEntry {
///         id: "entry_001".to_string(),
///         begin: NaiveDateTime::parse_from_str("2026-01-15 10:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///         end: NaiveDateTime::parse_from_str("2026-01-15 11:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///         break_seconds: 0,
///     }],
/// );
///
/// let entries = source.fetch_candidate_entries(&User::new("user_001"), 2026).unwrap();
/// assert_eq!(entries.len(), 1);
/// let entries = source.fetch_candidate_entries(&User::new("user_001"), 2024).unwrap();
/// assert!(entries.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryEntrySource {
    entries: HashMap<String, Vec<TimeEntry>>,
}

impl InMemoryEntrySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source holding the entries of a single user.
    pub fn for_user(user_id: impl Into<String>, entries: Vec<TimeEntry>) -> Self {
        let mut source = Self::new();
        source.insert(user_id, entries);
        source
    }

    /// Adds entries for a user, keeping any already stored.
    pub fn insert(&mut self, user_id: impl Into<String>, entries: Vec<TimeEntry>) {
        self.entries.entry(user_id.into()).or_default().extend(entries);
    }
}

impl EntrySource for InMemoryEntrySource {
    fn fetch_candidate_entries(
        &self,
        user: &User,
        year: i32,
    ) -> Result<Vec<TimeEntry>, FetchError> {
        let (window_start, window_end) = candidate_window(year)?;

        Ok(self
            .entries
            .get(&user.id)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|e| e.end > window_start && e.begin < window_end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
