//! Error types for the Working Time Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing working time.

use thiserror::Error;

use crate::source::FetchError;

/// The main error type for the Working Time Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use working_time_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/calculator.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/calculator.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but contains a value the calculator cannot use.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A time entry violated the entry source contract.
    #[error("Invalid entry '{entry_id}': {message}")]
    InvalidEntry {
        /// The ID of the invalid entry.
        entry_id: String,
        /// A description of what made the entry invalid.
        message: String,
    },

    /// The requested year cannot be represented as calendar dates.
    #[error("Invalid year: {year}")]
    InvalidYear {
        /// The requested year.
        year: i32,
    },

    /// The entry source failed to deliver candidate entries.
    #[error("Failed to fetch entries for user '{user_id}': {source}")]
    EntrySourceFailed {
        /// The user whose entries were requested.
        user_id: String,
        /// The error reported by the entry source.
        #[source]
        source: FetchError,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
