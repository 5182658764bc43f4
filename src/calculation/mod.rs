//! Calculation logic for the Working Time Engine.
//!
//! This module contains the stages of the time span calculation: entry
//! validation and outlier filtering, merging entries into spans with a gap
//! tolerance, attributing spans to calendar days (splitting spans longer than
//! the maximum duration), trimming to the requested year, and the
//! [`TimeSpanCalculator`] tying them together.

mod calculator;
mod day_attribution;
mod outlier_filter;
mod span_merge;
mod year_trim;

pub use calculator::{TimeSpanCalculator, calculate_days};
pub use day_attribution::{DaySegment, attribute_span};
pub use outlier_filter::{OutlierFilterResult, filter_outliers, validate_entries};
pub use span_merge::{Span, SpanCheckpoint, merge_entries, sort_entries};
pub use year_trim::{candidate_window, trim_to_year, year_bounds};
