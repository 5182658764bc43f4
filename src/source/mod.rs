//! Entry sources for the time span calculator.
//!
//! The calculator never reads storage itself; it asks an [`EntrySource`] for
//! every entry that could intersect the requested year. The window such a
//! source must cover is given by [`candidate_window`](crate::calculation::candidate_window).

mod memory;

use std::sync::Arc;

use crate::models::{TimeEntry, User};

pub use memory::InMemoryEntrySource;

/// Error reported by an entry source, passed through to the caller unchanged.
pub type FetchError = Box<dyn std::error::Error + Send + Sync>;

/// Supplies candidate entries for one user and year.
///
/// Implementations must return every entry overlapping the candidate window
/// of `year`, with begin and end already resolved to the user's local time.
/// They are shared across concurrent calculations and must be safe for
/// concurrent reads.
pub trait EntrySource: Send + Sync {
    /// Fetches all entries of `user` that could contribute to `year`.
    fn fetch_candidate_entries(&self, user: &User, year: i32)
    -> Result<Vec<TimeEntry>, FetchError>;
}

impl<S: EntrySource + ?Sized> EntrySource for Arc<S> {
    fn fetch_candidate_entries(
        &self,
        user: &User,
        year: i32,
    ) -> Result<Vec<TimeEntry>, FetchError> {
        (**self).fetch_candidate_entries(user, year)
    }
}

impl<S: EntrySource + ?Sized> EntrySource for &S {
    fn fetch_candidate_entries(
        &self,
        user: &User,
        year: i32,
    ) -> Result<Vec<TimeEntry>, FetchError> {
        (**self).fetch_candidate_entries(user, year)
    }
}
