//! The time span calculator.
//!
//! Turns a user's raw time entries into effective seconds worked per day of
//! a calendar year:
//!
//! 1. fetch candidate entries from the [`EntrySource`]
//! 2. validate them and discard entries longer than the maximum duration
//! 3. sort by begin, then end
//! 4. merge into spans using the gap tolerance
//! 5. attribute each span to days, splitting spans longer than the maximum duration
//! 6. keep only days inside the requested year
//!
//! Every call is independent and holds no state beyond its return value.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::CalculatorSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, SegmentAttribution, SpanAttribution, TimeEntry, User,
    WorkingTimeResult, seconds_to_hours,
};
use crate::source::EntrySource;

use super::day_attribution::{DaySegment, attribute_span};
use super::outlier_filter::{filter_outliers, validate_entries};
use super::span_merge::{Span, merge_entries, sort_entries};
use super::year_trim::{candidate_window, trim_to_year, year_bounds};

/// Computes per-day working time for one user and year.
///
/// The calculator owns read-only settings and an entry source; it is
/// `Send + Sync` whenever the source is and may be shared across threads.
///
/// # Example
///
/// ```
/// use working_time_engine::calculation::TimeSpanCalculator;
/// use working_time_engine::config::CalculatorSettings;
/// use working_time_engine::models::{TimeEntry, User};
/// use working_time_engine::source::InMemoryEntrySource;
/// use chrono::{NaiveDate, NaiveDateTime};
///
/// let parse = |s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let source = InMemoryEntrySource::for_user(
///     "user_001",
///     vec![
///         TimeEntry {
///             id: "a".to_string(),
///             begin: parse("2026-01-15 10:00:00"),
///             end: parse("2026-01-15 11:00:00"),
///             break_seconds: 0,
///         },
///         TimeEntry {
///             id: "b".to_string(),
///             begin: parse("2026-01-15 11:03:00"),
///             end: parse("2026-01-15 12:00:00"),
///             break_seconds: 0,
///         },
///     ],
/// );
///
/// let calculator = TimeSpanCalculator::new(source, CalculatorSettings::default());
/// let days = calculator.calculate_for_year(&User::new("user_001"), 2026).unwrap();
/// assert_eq!(days[&NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()], 7200);
/// ```
#[derive(Debug, Clone)]
pub struct TimeSpanCalculator<S> {
    source: S,
    settings: CalculatorSettings,
}

impl<S: EntrySource> TimeSpanCalculator<S> {
    /// Creates a calculator reading entries from `source`.
    pub fn new(source: S, settings: CalculatorSettings) -> Self {
        Self { source, settings }
    }

    /// Returns the settings this calculator runs with.
    pub fn settings(&self) -> &CalculatorSettings {
        &self.settings
    }

    /// Returns effective seconds worked per day of `year`.
    ///
    /// Every key lies within `year` and every value is positive; days without
    /// work are absent. A failing entry source or a malformed entry aborts the
    /// whole call.
    pub fn calculate_for_year(
        &self,
        user: &User,
        year: i32,
    ) -> EngineResult<BTreeMap<NaiveDate, i64>> {
        let entries = self.fetch(user, year)?;
        let days = calculate_days(entries, year, &self.settings)?;

        info!(
            user_id = %user.id,
            year,
            days = days.len(),
            total_seconds = days.values().sum::<i64>(),
            "Working time calculated"
        );
        Ok(days)
    }

    /// Like [`calculate_for_year`](Self::calculate_for_year), but also returns
    /// per-span attributions and an audit trace of every stage.
    pub fn calculate_with_trace(
        &self,
        user: &User,
        year: i32,
    ) -> EngineResult<WorkingTimeResult> {
        let started = Instant::now();
        let (window_start, window_end) = candidate_window(year)?;
        let entries = self.fetch(user, year)?;
        let fetched = entries.len();
        let run = run_pipeline(entries, year, &self.settings)?;

        let segment_count: usize = run.spans.iter().map(|(_, s)| s.len()).sum();
        let carry_overs = run
            .spans
            .iter()
            .flat_map(|(_, s)| s.iter())
            .filter(|s| s.carry_over)
            .count();
        let total_seconds: i64 = run.days.values().sum();

        let steps = vec![
            AuditStep {
                step_number: 1,
                rule_id: "candidate_fetch".to_string(),
                rule_name: "Candidate Entry Fetch".to_string(),
                input: serde_json::json!({
                    "user_id": user.id,
                    "year": year,
                    "window_start": window_start.to_string(),
                    "window_end": window_end.to_string()
                }),
                output: serde_json::json!({ "entries": fetched }),
                reasoning: format!(
                    "Fetched {} candidate entries overlapping {} to {}",
                    fetched, window_start, window_end
                ),
            },
            AuditStep {
                step_number: 2,
                rule_id: "outlier_filter".to_string(),
                rule_name: "Maximum Duration Filter".to_string(),
                input: serde_json::json!({
                    "entries": fetched,
                    "max_duration_hours": self.settings.max_duration_hours
                }),
                output: serde_json::json!({
                    "kept": run.kept,
                    "discarded": run.discarded.iter().map(|e| e.id.as_str()).collect::<Vec<_>>()
                }),
                reasoning: format!(
                    "{} entries longer than {} hours discarded",
                    run.discarded.len(),
                    self.settings.max_duration_hours
                ),
            },
            AuditStep {
                step_number: 3,
                rule_id: "span_merge".to_string(),
                rule_name: "Span Merge".to_string(),
                input: serde_json::json!({
                    "entries": run.kept,
                    "gap_tolerance_minutes": self.settings.gap_tolerance_minutes
                }),
                output: serde_json::json!({ "spans": run.spans.len() }),
                reasoning: format!(
                    "{} entries merged into {} spans with a gap tolerance of {} minutes",
                    run.kept,
                    run.spans.len(),
                    self.settings.gap_tolerance_minutes
                ),
            },
            AuditStep {
                step_number: 4,
                rule_id: "day_attribution".to_string(),
                rule_name: "Day Attribution".to_string(),
                input: serde_json::json!({
                    "spans": run.spans.len(),
                    "max_duration_hours": self.settings.max_duration_hours
                }),
                output: serde_json::json!({
                    "segments": segment_count,
                    "carry_overs": carry_overs
                }),
                reasoning: format!(
                    "{} spans attributed as {} day segments, {} carried over to a following day",
                    run.spans.len(),
                    segment_count,
                    carry_overs
                ),
            },
            AuditStep {
                step_number: 5,
                rule_id: "year_trim".to_string(),
                rule_name: "Year Trim".to_string(),
                input: serde_json::json!({ "year": year, "segments": segment_count }),
                output: serde_json::json!({
                    "days": run.days.len(),
                    "total_seconds": total_seconds
                }),
                reasoning: format!(
                    "{} days of {} with {} effective seconds",
                    run.days.len(),
                    year,
                    total_seconds
                ),
            },
        ];

        let mut warnings: Vec<AuditWarning> = run
            .discarded
            .iter()
            .map(|e| AuditWarning {
                code: "ENTRY_DISCARDED".to_string(),
                message: format!(
                    "Entry '{}' ({} to {}) exceeds {} hours and was ignored",
                    e.id, e.begin, e.end, self.settings.max_duration_hours
                ),
                severity: "medium".to_string(),
            })
            .collect();

        let (first_day, last_day) = year_bounds(year)?;
        let in_year = |date: NaiveDate| date >= first_day && date <= last_day;
        warnings.extend(
            run.spans
                .iter()
                .flat_map(|(_, s)| s.iter())
                .filter(|s| s.carry_over && !in_year(s.date))
                .map(|s| AuditWarning {
                    code: "CARRY_OVER_OUTSIDE_YEAR".to_string(),
                    message: format!(
                        "Carry-over of {} seconds attributed to {} falls outside {}",
                        s.effective_seconds,
                        s.date,
                        year
                    ),
                    severity: "low".to_string(),
                }),
        );

        let spans = run
            .spans
            .iter()
            .map(|(span, segments)| SpanAttribution {
                start: span.start,
                end: span.end,
                entry_ids: span.entry_ids(),
                break_total: span.break_total,
                segments: segments
                    .iter()
                    .map(|s| SegmentAttribution {
                        date: s.date,
                        start: s.start,
                        end: s.end,
                        wall_seconds: s.wall_seconds(),
                        break_seconds: s.break_seconds,
                        effective_seconds: s.effective_seconds,
                        carry_over: s.carry_over,
                        in_year: in_year(s.date),
                    })
                    .collect(),
            })
            .collect();

        Ok(WorkingTimeResult {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            user_id: user.id.clone(),
            year,
            settings: self.settings,
            days: run.days,
            total_seconds,
            total_hours: seconds_to_hours(total_seconds),
            spans,
            audit_trace: AuditTrace {
                steps,
                warnings,
                duration_us: started.elapsed().as_micros() as u64,
            },
        })
    }

    fn fetch(&self, user: &User, year: i32) -> EngineResult<Vec<TimeEntry>> {
        year_bounds(year)?;
        self.source
            .fetch_candidate_entries(user, year)
            .map_err(|source| EngineError::EntrySourceFailed {
                user_id: user.id.clone(),
                source,
            })
    }
}

/// Computes per-day working time of `year` from entries already fetched.
///
/// This is the calculation behind
/// [`TimeSpanCalculator::calculate_for_year`] for callers holding entries
/// themselves. `entries` should cover the candidate window of `year`; see
/// [`candidate_window`](super::candidate_window).
pub fn calculate_days(
    entries: Vec<TimeEntry>,
    year: i32,
    settings: &CalculatorSettings,
) -> EngineResult<BTreeMap<NaiveDate, i64>> {
    Ok(run_pipeline(entries, year, settings)?.days)
}

/// Intermediate results of one calculation.
struct PipelineRun {
    kept: usize,
    discarded: Vec<TimeEntry>,
    spans: Vec<(Span, Vec<DaySegment>)>,
    days: BTreeMap<NaiveDate, i64>,
}

fn run_pipeline(
    entries: Vec<TimeEntry>,
    year: i32,
    settings: &CalculatorSettings,
) -> EngineResult<PipelineRun> {
    year_bounds(year)?;
    validate_entries(&entries)?;

    let filtered = filter_outliers(entries, settings.max_duration());
    let mut kept = filtered.kept;
    sort_entries(&mut kept);

    let spans = merge_entries(&kept, settings.gap_tolerance())
        .into_iter()
        .map(|span| {
            let segments = attribute_span(&span, settings.max_duration())?;
            Ok((span, segments))
        })
        .collect::<EngineResult<Vec<_>>>()?;

    let days = trim_to_year(spans.iter().flat_map(|(_, segments)| segments.iter()), year);

    debug!(
        year,
        kept = kept.len(),
        discarded = filtered.discarded.len(),
        spans = spans.len(),
        days = days.len(),
        "Pipeline finished"
    );

    Ok(PipelineRun {
        kept: kept.len(),
        discarded: filtered.discarded,
        spans,
        days,
    })
}
