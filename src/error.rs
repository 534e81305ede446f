//! Error types for the Attendance Valuation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while recording and valuing
//! attendance.

use thiserror::Error;

/// The main error type for the Attendance Valuation Engine.
///
/// Lookups of absent employees or records are not errors at the store and
/// engine layer; they return `None`. [`EngineError::EmployeeNotFound`] is only
/// raised where a caller needs a hard failure, such as the HTTP API.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::InvalidTime {
///     value: "25:00 PM".to_string(),
///     message: "hour must be between 1 and 12".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid time '25:00 PM': hour must be between 1 and 12"
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

    /// An employee was required but is not known to the store.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The employee id that was looked up.
        id: String,
    },

    /// A check-in or check-out time could not be parsed.
    #[error("Invalid time '{value}': {message}")]
    InvalidTime {
        /// The raw time string.
        value: String,
        /// A description of what made the time invalid.
        message: String,
    },

    /// A rule set contained an out-of-range value.
    #[error("Invalid attendance rule '{field}': {message}")]
    InvalidRules {
        /// The rule field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A record update carried an out-of-range value.
    #[error("Invalid attendance record field '{field}': {message}")]
    InvalidRecord {
        /// The record field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A persisted collection could not be read or written.
    #[error("Persistence error for '{key}': {message}")]
    Persistence {
        /// The collection key being accessed.
        key: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
