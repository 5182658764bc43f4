//! Time entry model.
//!
//! This module defines the [`TimeEntry`] struct, the raw recorded block of
//! time the calculator consumes.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A raw recorded time entry in the user's local wall-clock time.
///
/// Entries are independent of each other and may overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Unique identifier for the entry.
    pub id: String,
    /// Inclusive start of the entry.
    pub begin: NaiveDateTime,
    /// Exclusive end of the entry.
    pub end: NaiveDateTime,
    /// Seconds within the entry that were not actually worked.
    #[serde(default)]
    pub break_seconds: i64,
}

impl TimeEntry {
    /// Wall-clock length of the entry, before break subtraction.
    pub fn raw_duration(&self) -> Duration {
        self.end - self.begin
    }

    /// Wall-clock length of the entry in seconds.
    pub fn raw_seconds(&self) -> i64 {
        self.raw_duration().num_seconds()
    }

    /// Seconds actually worked, i.e. raw length minus the break, floored at zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use working_time_engine::models::TimeEntry;
    /// use chrono::NaiveDateTime;
    ///
    /// let entry = TimeEntry {
    ///     id: "entry_001".to_string(),
    ///     begin: NaiveDateTime::parse_from_str("2026-01-15 10:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     end: NaiveDateTime::parse_from_str("2026-01-15 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     break_seconds: 1800,
    /// };
    /// assert_eq!(entry.effective_seconds(), 5400);
    /// ```
    pub fn effective_seconds(&self) -> i64 {
        (self.raw_seconds() - self.break_seconds).max(0)
    }

    /// Checks the entry against the entry source contract.
    ///
    /// An entry must end after it begins, and its break must be non-negative
    /// and no longer than the entry itself.
    pub fn validate(&self) -> EngineResult<()> {
        if self.end <= self.begin {
            return Err(EngineError::InvalidEntry {
                entry_id: self.id.clone(),
                message: format!("end {} is not after begin {}", self.end, self.begin),
            });
        }
        if self.break_seconds < 0 {
            return Err(EngineError::InvalidEntry {
                entry_id: self.id.clone(),
                message: format!("break of {} seconds is negative", self.break_seconds),
            });
        }
        if self.break_seconds > self.raw_seconds() {
            return Err(EngineError::InvalidEntry {
                entry_id: self.id.clone(),
                message: format!(
                    "break of {} seconds exceeds entry duration of {} seconds",
                    self.break_seconds,
                    self.raw_seconds()
                ),
            });
        }
        Ok(())
    }
}
