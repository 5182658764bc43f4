//! Year boundaries and trimming of day attributions to a calendar year.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::error::{EngineError, EngineResult};

use super::day_attribution::DaySegment;

/// Returns the first and last day of `year`.
pub fn year_bounds(year: i32) -> EngineResult<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1);
    let last = NaiveDate::from_ymd_opt(year, 12, 31);
    match (first, last) {
        (Some(first), Some(last)) => Ok((first, last)),
        _ => Err(EngineError::InvalidYear { year }),
    }
}

/// Returns the half-open window `[start, end)` an entry source must cover for `year`.
///
/// The window runs from midnight of the last day of the previous year up to
/// midnight ending the first day of the next year, so that spans crossing
/// either year boundary are merged before they are trimmed.
///
/// Results are exact only when no merged chain of entries starts before the
/// window. A carry-over can itself be split again onto a later day, so a
/// chain reaching back past Dec 31 can shift what lands on Jan 1; such
/// entries lie outside the window and are not seen.
///
/// # Example
///
/// ```
/// use working_time_engine::calculation::candidate_window;
/// use chrono::NaiveDate;
///
/// let (start, end) = candidate_window(2026).unwrap();
/// assert_eq!(start, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap().and_hms_opt(0, 0, 0).unwrap());
/// assert_eq!(end, NaiveDate::from_ymd_opt(2027, 1, 2).unwrap().and_hms_opt(0, 0, 0).unwrap());
/// ```
pub fn candidate_window(year: i32) -> EngineResult<(NaiveDateTime, NaiveDateTime)> {
    let (first, last) = year_bounds(year)?;
    let start = first.pred_opt().and_then(|d| d.and_hms_opt(0, 0, 0));
    let end = last
        .succ_opt()
        .and_then(|d| d.succ_opt())
        .and_then(|d| d.and_hms_opt(0, 0, 0));
    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(EngineError::InvalidYear { year }),
    }
}

/// Sums the effective seconds of the segments falling in `year`, per day.
///
/// Days whose total is zero are omitted.
pub fn trim_to_year<'a, I>(segments: I, year: i32) -> BTreeMap<NaiveDate, i64>
where
    I: IntoIterator<Item = &'a DaySegment>,
{
    let mut days = BTreeMap::new();
    for segment in segments.into_iter().filter(|s| s.date.year() == year) {
        *days.entry(segment.date).or_insert(0) += segment.effective_seconds;
    }
    days.retain(|_, seconds| *seconds > 0);
    days
}
