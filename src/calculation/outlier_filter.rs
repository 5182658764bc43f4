//! Entry validation and outlier filtering.
//!
//! Entries longer than the maximum duration almost always come from a timer
//! that was never stopped. They are removed before merging so that they
//! cannot pull neighbouring entries into one oversized span.

use chrono::Duration;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::TimeEntry;

/// The outcome of filtering candidate entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlierFilterResult {
    /// Entries within the maximum duration, in input order.
    pub kept: Vec<TimeEntry>,
    /// Entries discarded for exceeding the maximum duration, in input order.
    pub discarded: Vec<TimeEntry>,
}

/// Validates every entry against the entry source contract.
///
/// The first malformed entry rejects the whole set; see [`TimeEntry::validate`].
pub fn validate_entries(entries: &[TimeEntry]) -> EngineResult<()> {
    entries.iter().try_for_each(TimeEntry::validate)
}

/// Splits entries into those kept and those whose raw duration exceeds `max_duration`.
///
/// An entry of exactly `max_duration` is kept. Breaks are not taken into
/// account; the raw wall-clock length decides.
///
/// # Example
///
/// ```
/// use working_time_engine::calculation::filter_outliers;
/// use working_time_engine::models::TimeEntry;
/// use chrono::{Duration, NaiveDateTime};
///
/// let parse = |s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let entries = vec![
///     TimeEntry {
///         id: "forgotten".to_string(),
///         begin: parse("2026-01-15 08:00:00"),
///         end: parse("2026-01-16 02:00:00"),
///         break_seconds: 0,
///     },
///     TimeEntry {
///         id: "meeting".to_string(),
///         begin: parse("2026-01-15 10:00:00"),
///         end: parse("2026-01-15 11:00:00"),
///         break_seconds: 0,
///     },
/// ];
///
/// let result = filter_outliers(entries, Duration::hours(16));
/// assert_eq!(result.kept.len(), 1);
/// assert_eq!(result.discarded[0].id, "forgotten");
/// ```
pub fn filter_outliers(entries: Vec<TimeEntry>, max_duration: Duration) -> OutlierFilterResult {
    let (kept, discarded): (Vec<_>, Vec<_>) = entries
        .into_iter()
        .partition(|e| e.raw_duration() <= max_duration);

    for entry in &discarded {
        debug!(
            entry_id = %entry.id,
            begin = %entry.begin,
            end = %entry.end,
            raw_seconds = entry.raw_seconds(),
            "Discarding entry exceeding maximum duration"
        );
    }

    OutlierFilterResult { kept, discarded }
}
