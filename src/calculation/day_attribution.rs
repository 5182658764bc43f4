//! Attribution of merged spans to calendar days.
//!
//! A span no longer than the maximum duration counts entirely towards the
//! day it started on, even when it runs past midnight. A longer span is cut
//! into a leading segment and a carry-over segment attributed to the next day.
//!
//! # Cut rule
//!
//! A span is only ever cut at one of its checkpoints, i.e. at the accumulated
//! end right after some contributing entry was folded in. The cut is placed at
//! the last checkpoint that keeps the segment at or under the maximum
//! duration. Entries up to and including that checkpoint, and their breaks,
//! stay on the segment; the remaining wall-clock time up to the span end,
//! together with the breaks of the remaining entries, is carried over to the
//! following day. A carry-over still longer than the maximum duration is cut
//! again by the same rule, one day further on.
//!
//! Every segment holds at least one entry, so an entry is never divided
//! between days. The first segment always fits because oversized entries are
//! filtered out before merging; a carry-over whose first entry starts after
//! the cut (within the gap tolerance) may exceed the maximum by at most the
//! gap tolerance.
//!
//! The span's effective time (wall-clock minus all breaks, floored at zero)
//! is shared out across its segments, so the segments always add up to the
//! span total even when the breaks of one segment exceed its wall-clock
//! length.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::span_merge::{Span, SpanCheckpoint};

/// A part of a span attributed to a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySegment {
    /// The day this segment counts towards.
    pub date: NaiveDate,
    /// Wall-clock start of the segment.
    pub start: NaiveDateTime,
    /// Wall-clock end of the segment.
    pub end: NaiveDateTime,
    /// Breaks of the entries reported on this segment.
    pub break_seconds: i64,
    /// Whether this segment is the tail of a split span.
    pub carry_over: bool,
    /// The share of the span's effective seconds counted on `date`.
    pub effective_seconds: i64,
}

impl DaySegment {
    /// Wall-clock length of the segment in seconds.
    pub fn wall_seconds(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }
}

/// Attributes a span to one or more calendar days.
///
/// # Example
///
/// ```
/// use working_time_engine::calculation::{attribute_span, merge_entries};
/// use working_time_engine::models::TimeEntry;
/// use chrono::{Duration, NaiveDate, NaiveDateTime};
///
/// let parse = |s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let entries = vec![TimeEntry {
///     id: "late".to_string(),
///     begin: parse("2026-01-15 23:45:00"),
///     end: parse("2026-01-16 01:15:00"),
///     break_seconds: 0,
/// }];
///
/// let spans = merge_entries(&entries, Duration::minutes(3));
/// let segments = attribute_span(&spans[0], Duration::hours(16)).unwrap();
/// assert_eq!(segments.len(), 1);
/// assert_eq!(segments[0].date, NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
/// assert_eq!(segments[0].effective_seconds, 5400);
/// ```
pub fn attribute_span(span: &Span, max_duration: Duration) -> EngineResult<Vec<DaySegment>> {
    let mut segments = Vec::new();
    let mut date = span.start.date();
    let mut segment_start = span.start;
    let mut remaining: &[SpanCheckpoint] = &span.checkpoints;
    let mut carry_over = false;

    loop {
        let fits = span.end - segment_start <= max_duration;
        let cut = remaining
            .iter()
            .take_while(|c| c.accumulated_end - segment_start <= max_duration)
            .count()
            .max(1);

        if fits || cut >= remaining.len() {
            segments.push(DaySegment {
                date,
                start: segment_start,
                end: span.end,
                break_seconds: break_sum(remaining),
                carry_over,
                effective_seconds: 0,
            });
            break;
        }

        let (head, tail) = remaining.split_at(cut);
        let cut_point = head[cut - 1].accumulated_end;
        debug!(
            span_start = %span.start,
            span_end = %span.end,
            %date,
            %cut_point,
            "Splitting span exceeding maximum duration"
        );

        segments.push(DaySegment {
            date,
            start: segment_start,
            end: cut_point,
            break_seconds: break_sum(head),
            carry_over,
            effective_seconds: 0,
        });

        date = date.succ_opt().ok_or_else(|| EngineError::CalculationError {
            message: format!("no calendar day follows {}", date),
        })?;
        segment_start = cut_point;
        remaining = tail;
        carry_over = true;
    }

    share_effective_seconds(&mut segments, span.effective_seconds());
    Ok(segments)
}

/// Gives each leading segment its wall-clock minus breaks, clamped to what is
/// left of `span_effective`; the last segment takes the remainder.
fn share_effective_seconds(segments: &mut [DaySegment], span_effective: i64) {
    let Some((last, leading)) = segments.split_last_mut() else {
        return;
    };
    let mut remaining = span_effective;
    for segment in leading {
        segment.effective_seconds =
            (segment.wall_seconds() - segment.break_seconds).clamp(0, remaining);
        remaining -= segment.effective_seconds;
    }
    last.effective_seconds = remaining;
}

fn break_sum(checkpoints: &[SpanCheckpoint]) -> i64 {
    checkpoints.iter().map(|c| c.break_seconds).sum()
}
