//! Configuration types for the time span calculator.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the `calculator.yaml` configuration file.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default idle gap, in minutes, under which two entries are merged.
pub const DEFAULT_GAP_TOLERANCE_MINUTES: u32 = 3;

/// Default maximum duration, in hours, of a single entry or day segment.
pub const DEFAULT_MAX_DURATION_HOURS: u32 = 16;

/// The two tunables of the time span calculator.
///
/// # Example
///
/// ```
/// use working_time_engine::config::CalculatorSettings;
/// use chrono::Duration;
///
/// let settings = CalculatorSettings::default();
/// assert_eq!(settings.gap_tolerance(), Duration::minutes(3));
/// assert_eq!(settings.max_duration(), Duration::hours(16));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorSettings {
    /// Maximum idle gap between two entries for them to be merged into one span.
    #[serde(default = "default_gap_tolerance_minutes")]
    pub gap_tolerance_minutes: u32,
    /// Entries longer than this are discarded; spans longer than this are split.
    #[serde(default = "default_max_duration_hours")]
    pub max_duration_hours: u32,
}

fn default_gap_tolerance_minutes() -> u32 {
    DEFAULT_GAP_TOLERANCE_MINUTES
}

fn default_max_duration_hours() -> u32 {
    DEFAULT_MAX_DURATION_HOURS
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        Self {
            gap_tolerance_minutes: DEFAULT_GAP_TOLERANCE_MINUTES,
            max_duration_hours: DEFAULT_MAX_DURATION_HOURS,
        }
    }
}

impl CalculatorSettings {
    /// Returns the gap tolerance as a duration.
    pub fn gap_tolerance(&self) -> Duration {
        Duration::minutes(i64::from(self.gap_tolerance_minutes))
    }

    /// Returns the maximum duration as a duration.
    pub fn max_duration(&self) -> Duration {
        Duration::hours(i64::from(self.max_duration_hours))
    }

    /// Applies a partial tenant override on top of these settings.
    pub fn with_override(self, tenant: &SettingsOverride) -> Self {
        Self {
            gap_tolerance_minutes: tenant
                .gap_tolerance_minutes
                .unwrap_or(self.gap_tolerance_minutes),
            max_duration_hours: tenant.max_duration_hours.unwrap_or(self.max_duration_hours),
        }
    }
}

/// A partial set of settings applied for a single tenant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SettingsOverride {
    /// Overrides the gap tolerance when present.
    #[serde(default)]
    pub gap_tolerance_minutes: Option<u32>,
    /// Overrides the maximum duration when present.
    #[serde(default)]
    pub max_duration_hours: Option<u32>,
}

/// Structure of `calculator.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalculatorConfig {
    /// Settings used when no tenant override applies.
    #[serde(default)]
    pub defaults: CalculatorSettings,
    /// Per-tenant partial overrides keyed by tenant name.
    #[serde(default)]
    pub tenants: HashMap<String, SettingsOverride>,
}
