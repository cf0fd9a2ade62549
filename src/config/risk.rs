//! Risk stratification configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::analytics::{
    RiskThresholds, DEFAULT_HIGH_RISK_THRESHOLD, DEFAULT_MEDIUM_RISK_THRESHOLD,
};

/// Risk tier boundaries
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RiskConfig {
    /// Scores strictly above this are high risk
    #[serde(default = "default_high_threshold")]
    pub high_threshold: f64,

    /// Scores strictly above this (and not high) are medium risk
    #[serde(default = "default_medium_threshold")]
    pub medium_threshold: f64,
}

impl RiskConfig {
    /// Build validated thresholds for the stratifier
    pub fn thresholds(&self) -> Result<RiskThresholds, ValidationError> {
        RiskThresholds::try_new(self.high_threshold, self.medium_threshold).map_err(|_| {
            ValidationError::InvalidRiskThresholds {
                high: self.high_threshold,
                medium: self.medium_threshold,
            }
        })
    }

    /// Validate risk configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.thresholds().map(|_| ())
    }
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            high_threshold: default_high_threshold(),
            medium_threshold: default_medium_threshold(),
        }
    }
}

fn default_high_threshold() -> f64 {
    DEFAULT_HIGH_RISK_THRESHOLD
}

fn default_medium_threshold() -> f64 {
    DEFAULT_MEDIUM_RISK_THRESHOLD
}
