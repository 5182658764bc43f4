//! Configuration loading and management for the Working Time Engine.
//!
//! This module provides functionality to load calculator settings (gap
//! tolerance and maximum duration) from YAML, with optional per-tenant
//! overrides.
//!
//! # Example
//!
//! ```no_run
//! use working_time_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Gap tolerance: {} minutes", config.defaults().gap_tolerance_minutes);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CalculatorConfig, CalculatorSettings, DEFAULT_GAP_TOLERANCE_MINUTES,
    DEFAULT_MAX_DURATION_HOURS, SettingsOverride,
};
