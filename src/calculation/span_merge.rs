//! Merging time entries into continuous spans.
//!
//! Entries are folded, in `begin` order, into spans: an entry joins the
//! current span when it begins no later than the span's end plus the gap
//! tolerance, otherwise it starts a new span.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::TimeEntry;

/// The state of a span right after one entry was folded into it.
///
/// Checkpoints are the only places a span may later be cut when it is
/// longer than the maximum duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanCheckpoint {
    /// The entry folded at this checkpoint.
    pub entry_id: String,
    /// The break of that entry, in seconds.
    pub break_seconds: i64,
    /// The span end after folding the entry.
    pub accumulated_end: NaiveDateTime,
}

/// A maximal block of continuous or near-continuous recorded activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Begin of the first folded entry.
    pub start: NaiveDateTime,
    /// Latest end of any folded entry.
    pub end: NaiveDateTime,
    /// Sum of the breaks of all folded entries.
    pub break_total: i64,
    /// One checkpoint per folded entry, in fold order.
    pub checkpoints: Vec<SpanCheckpoint>,
}

impl Span {
    fn open(entry: &TimeEntry) -> Self {
        Self {
            start: entry.begin,
            end: entry.end,
            break_total: entry.break_seconds,
            checkpoints: vec![SpanCheckpoint {
                entry_id: entry.id.clone(),
                break_seconds: entry.break_seconds,
                accumulated_end: entry.end,
            }],
        }
    }

    fn accepts(&self, entry: &TimeEntry, gap_tolerance: Duration) -> bool {
        entry.begin <= self.end + gap_tolerance
    }

    fn extend(&mut self, entry: &TimeEntry) {
        self.end = self.end.max(entry.end);
        self.break_total += entry.break_seconds;
        self.checkpoints.push(SpanCheckpoint {
            entry_id: entry.id.clone(),
            break_seconds: entry.break_seconds,
            accumulated_end: self.end,
        });
    }

    /// Wall-clock length of the span.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Wall-clock length minus all breaks, floored at zero.
    pub fn effective_seconds(&self) -> i64 {
        (self.duration().num_seconds() - self.break_total).max(0)
    }

    /// IDs of the folded entries, in fold order.
    pub fn entry_ids(&self) -> Vec<String> {
        self.checkpoints.iter().map(|c| c.entry_id.clone()).collect()
    }
}

/// Sorts entries by `begin`, then by `end`, then by id.
pub fn sort_entries(entries: &mut [TimeEntry]) {
    entries.sort_by(|a, b| {
        a.begin
            .cmp(&b.begin)
            .then(a.end.cmp(&b.end))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Merges entries, which must already be sorted with [`sort_entries`], into spans.
///
/// Two entries separated by exactly `gap_tolerance` are merged; overlapping
/// entries always are.
///
/// # Example
///
/// ```
/// use working_time_engine::calculation::merge_entries;
/// use working_time_engine::models::TimeEntry;
/// use chrono::{Duration, NaiveDateTime};
///
/// let parse = |s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let entries = vec![
///     TimeEntry {
///         id: "a".to_string(),
///         begin: parse("2026-01-15 10:00:00"),
///         end: parse("2026-01-15 11:00:00"),
///         break_seconds: 0,
///     },
///     TimeEntry {
///         id: "b".to_string(),
///         begin: parse("2026-01-15 11:03:00"),
///         end: parse("2026-01-15 12:00:00"),
///         break_seconds: 0,
///     },
/// ];
///
/// let spans = merge_entries(&entries, Duration::minutes(3));
/// assert_eq!(spans.len(), 1);
/// assert_eq!(spans[0].duration(), Duration::hours(2));
/// ```
pub fn merge_entries(entries: &[TimeEntry], gap_tolerance: Duration) -> Vec<Span> {
    entries.iter().fold(Vec::new(), |mut spans: Vec<Span>, entry| {
        match spans.last_mut() {
            Some(open) if open.accepts(entry, gap_tolerance) => open.extend(entry),
            _ => spans.push(Span::open(entry)),
        }
        spans
    })
}
