//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Risk thresholds must satisfy 0 <= medium < high <= 1 (got high={high}, medium={medium})")]
    InvalidRiskThresholds { high: f64, medium: f64 },

    #[error("Impact thresholds must satisfy 0 <= medium < high <= 1 (got high={high}, medium={medium})")]
    InvalidImpactThresholds { high: f64, medium: f64 },

    #[error("Trend slope tolerance must be a non-negative finite number (got {0})")]
    InvalidSlopeTolerance(f64),

    #[error("Display precision exceeds maximum of {max} decimal places (got {actual})")]
    InvalidDecimalPlaces { max: u8, actual: u8 },

    #[error("Invalid log filter directive: {0}")]
    InvalidLogLevel(String),
}
