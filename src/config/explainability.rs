//! Feature importance and trend configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::analytics::{
    ImpactThresholds, DEFAULT_HIGH_IMPACT_THRESHOLD, DEFAULT_MEDIUM_IMPACT_THRESHOLD,
};

/// Impact tier boundaries, applied to raw importance
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ImpactConfig {
    /// Importance at or above this is high impact
    #[serde(default = "default_high_threshold")]
    pub high_threshold: f64,

    /// Importance at or above this (and not high) is medium impact
    #[serde(default = "default_medium_threshold")]
    pub medium_threshold: f64,
}

impl ImpactConfig {
    /// Build validated thresholds for the ranker
    pub fn thresholds(&self) -> Result<ImpactThresholds, ValidationError> {
        ImpactThresholds::try_new(self.high_threshold, self.medium_threshold).map_err(|_| {
            ValidationError::InvalidImpactThresholds {
                high: self.high_threshold,
                medium: self.medium_threshold,
            }
        })
    }

    /// Validate impact configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.thresholds().map(|_| ())
    }
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self {
            high_threshold: default_high_threshold(),
            medium_threshold: default_medium_threshold(),
        }
    }
}

/// Trend classification settings
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct TrendConfig {
    /// Numeric slopes within this distance of zero are stable
    #[serde(default)]
    pub slope_tolerance: f64,
}

impl TrendConfig {
    /// Validate trend configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.slope_tolerance.is_finite() || self.slope_tolerance < 0.0 {
            return Err(ValidationError::InvalidSlopeTolerance(self.slope_tolerance));
        }
        Ok(())
    }
}

fn default_high_threshold() -> f64 {
    DEFAULT_HIGH_IMPACT_THRESHOLD
}

fn default_medium_threshold() -> f64 {
    DEFAULT_MEDIUM_IMPACT_THRESHOLD
}
