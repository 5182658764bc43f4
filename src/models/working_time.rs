//! Working time result models for the Working Time Engine.
//!
//! This module contains the [`WorkingTimeResult`] type and its associated structures
//! that capture all outputs from a yearly calculation, including the per-day map,
//! per-span attributions, totals, and audit traces.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::CalculatorSettings;

/// Converts seconds to hours, rounded to two decimal places.
///
/// # Example
///
/// ```
/// use working_time_engine::models::seconds_to_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(seconds_to_hours(5400), Decimal::new(150, 2)); // 1.50 hours
/// assert_eq!(seconds_to_hours(1000), Decimal::new(28, 2)); // 0.28 hours
/// ```
pub fn seconds_to_hours(seconds: i64) -> Decimal {
    (Decimal::new(seconds, 0) / Decimal::new(3600, 0)).round_dp(2)
}

/// A single piece of a span attributed to one calendar day.
///
/// Spans within the maximum duration produce exactly one segment; longer
/// spans produce a leading segment plus one or more carry-over segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentAttribution {
    /// The day this segment counts towards.
    pub date: NaiveDate,
    /// Wall-clock start of the segment.
    pub start: NaiveDateTime,
    /// Wall-clock end of the segment.
    pub end: NaiveDateTime,
    /// Wall-clock length in seconds.
    pub wall_seconds: i64,
    /// Break seconds of the entries reported on this segment.
    pub break_seconds: i64,
    /// Wall-clock length minus breaks, floored at zero.
    pub effective_seconds: i64,
    /// Whether this segment is the tail of a split span.
    pub carry_over: bool,
    /// Whether the segment's day lies in the requested year.
    pub in_year: bool,
}

/// How one merged span was attributed to calendar days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanAttribution {
    /// Start of the merged span.
    pub start: NaiveDateTime,
    /// End of the merged span.
    pub end: NaiveDateTime,
    /// IDs of the entries folded into the span, in merge order.
    pub entry_ids: Vec<String>,
    /// Sum of the breaks of all folded entries.
    pub break_total: i64,
    /// The day segments, in chronological order.
    pub segments: Vec<SegmentAttribution>,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a stage of the calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate data that was excluded from the result but may
/// require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use working_time_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a yearly working time calculation.
///
/// `days` is the per-day map returned by
/// [`TimeSpanCalculator::calculate_for_year`](crate::calculation::TimeSpanCalculator::calculate_for_year);
/// everything else explains how it was derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingTimeResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The user the calculation is for.
    pub user_id: String,
    /// The requested calendar year.
    pub year: i32,
    /// The settings the calculation ran with.
    pub settings: CalculatorSettings,
    /// Effective seconds worked per day of `year`; days without work are absent.
    pub days: BTreeMap<NaiveDate, i64>,
    /// Sum of all values in `days`.
    pub total_seconds: i64,
    /// `total_seconds` expressed in hours.
    pub total_hours: Decimal,
    /// Per-span attribution details, including segments trimmed from the year.
    pub spans: Vec<SpanAttribution>,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
