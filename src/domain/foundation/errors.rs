//! Error types for the analytics layer.

use std::fmt;
use thiserror::Error;

/// Error codes surfaced to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidInput,
    OutOfRange,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
        };
        write!(f, "{}", s)
    }
}

/// Errors raised by the analytics calculators.
///
/// Both kinds indicate a data bug upstream. Legitimate edge cases (an empty
/// cohort, a flat series, an undefined ratio) never produce an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    /// Structurally impossible input, e.g. a confusion matrix with no observations.
    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    /// A value violates a documented domain bound.
    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },
}

impl AnalyticsError {
    /// Creates an invalid input error.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AnalyticsError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an out of range error.
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        AnalyticsError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Returns the code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AnalyticsError::InvalidInput { .. } => ErrorCode::InvalidInput,
            AnalyticsError::OutOfRange { .. } => ErrorCode::OutOfRange,
        }
    }

    /// Returns the name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            AnalyticsError::InvalidInput { field, .. } => field,
            AnalyticsError::OutOfRange { field, .. } => field,
        }
    }
}

/// Checks that `value` lies within `[0, 1]`. NaN is rejected.
pub(crate) fn ensure_unit_interval(field: &str, value: f64) -> Result<f64, AnalyticsError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(AnalyticsError::out_of_range(field, 0.0, 1.0, value))
    }
}
