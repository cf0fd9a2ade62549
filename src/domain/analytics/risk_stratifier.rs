//! Risk Stratifier - Buckets a patient population into risk tiers.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

use crate::domain::foundation::{ensure_unit_interval, AnalyticsError, PatientId, Percentage};

/// Default lower bound (exclusive) of the high tier.
pub const DEFAULT_HIGH_RISK_THRESHOLD: f64 = 0.7;

/// Default lower bound (exclusive) of the medium tier.
pub const DEFAULT_MEDIUM_RISK_THRESHOLD: f64 = 0.4;

/// Discretized bucket of a patient's predicted deterioration likelihood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    High,
    Medium,
    Low,
}

impl RiskTier {
    /// All tiers, highest first.
    pub const ALL: [RiskTier; 3] = [RiskTier::High, RiskTier::Medium, RiskTier::Low];

    /// Returns the display label for this tier.
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::High => "High Risk",
            RiskTier::Medium => "Medium Risk",
            RiskTier::Low => "Low Risk",
        }
    }
}

/// A patient with a model-assigned risk score.
///
/// The analytics layer only ever reads `risk_score`; other fields supplied by
/// the patient-data service are carried through untouched in `attributes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRiskRecord {
    pub id: PatientId,
    pub risk_score: f64,
    #[serde(flatten, default)]
    pub attributes: BTreeMap<String, JsonValue>,
}

impl PatientRiskRecord {
    /// Creates a record with no extra attributes.
    pub fn new(id: PatientId, risk_score: f64) -> Self {
        Self {
            id,
            risk_score,
            attributes: BTreeMap::new(),
        }
    }

    /// Adds a pass-through attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Tier boundaries. Each boundary belongs to the lower tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskThresholds {
    high: f64,
    medium: f64,
}

impl RiskThresholds {
    /// Creates thresholds, requiring `0 <= medium < high <= 1`.
    pub fn try_new(high: f64, medium: f64) -> Result<Self, AnalyticsError> {
        ensure_unit_interval("high_risk_threshold", high)?;
        ensure_unit_interval("medium_risk_threshold", medium)?;
        if medium >= high {
            return Err(AnalyticsError::out_of_range(
                "medium_risk_threshold",
                0.0,
                high,
                medium,
            ));
        }
        Ok(Self { high, medium })
    }

    /// Scores strictly above this are high risk.
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Scores strictly above this (and not high) are medium risk.
    pub fn medium(&self) -> f64 {
        self.medium
    }
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high: DEFAULT_HIGH_RISK_THRESHOLD,
            medium: DEFAULT_MEDIUM_RISK_THRESHOLD,
        }
    }
}

/// Tier counts over a population. `high + medium + low` is the population size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskTierCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl RiskTierCounts {
    /// Creates counts from the three tiers.
    pub fn new(high: usize, medium: usize, low: usize) -> Self {
        Self { high, medium, low }
    }

    /// Size of the population, `None` if the counts sum past `usize::MAX`.
    pub fn total(&self) -> Option<usize> {
        self.high.checked_add(self.medium)?.checked_add(self.low)
    }

    /// Count for one tier.
    pub fn count(&self, tier: RiskTier) -> usize {
        match tier {
            RiskTier::High => self.high,
            RiskTier::Medium => self.medium,
            RiskTier::Low => self.low,
        }
    }

    /// Share of the population in a tier; 0% for an empty population.
    pub fn percentage(&self, tier: RiskTier) -> Percentage {
        Percentage::from_fraction(self.share(self.count(tier)))
    }

    /// `count` as a fraction of the population, summed in `f64` so it
    /// cannot overflow; 0 for an empty population.
    pub(crate) fn share(&self, count: usize) -> f64 {
        let total = self.high as f64 + self.medium as f64 + self.low as f64;
        if total == 0.0 {
            0.0
        } else {
            count as f64 / total
        }
    }

    fn record(&mut self, tier: RiskTier) {
        match tier {
            RiskTier::High => self.high += 1,
            RiskTier::Medium => self.medium += 1,
            RiskTier::Low => self.low += 1,
        }
    }
}

/// Risk tier assignment for patient populations.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RiskStratifier {
    thresholds: RiskThresholds,
}

impl RiskStratifier {
    /// Creates a stratifier with the given boundaries.
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    /// Returns the boundaries in use.
    pub fn thresholds(&self) -> RiskThresholds {
        self.thresholds
    }

    /// Assigns a tier to a single risk score.
    ///
    /// With default thresholds: `> 0.7` high, `(0.4, 0.7]` medium, `<= 0.4` low.
    ///
    /// # Errors
    /// `OutOfRange` when the score is outside `[0, 1]` or NaN. Scores are
    /// never clamped.
    pub fn tier_of(&self, risk_score: f64) -> Result<RiskTier, AnalyticsError> {
        let score = ensure_unit_interval("risk_score", risk_score)?;

        let tier = if score > self.thresholds.high {
            RiskTier::High
        } else if score > self.thresholds.medium {
            RiskTier::Medium
        } else {
            RiskTier::Low
        };
        Ok(tier)
    }

    /// Counts the population per tier.
    ///
    /// # Edge Cases
    /// - Empty population: all counts zero
    /// - Any out-of-range score: the whole call fails
    pub fn stratify(&self, patients: &[PatientRiskRecord]) -> Result<RiskTierCounts, AnalyticsError> {
        patients.iter().try_fold(RiskTierCounts::default(), |mut counts, patient| {
            counts.record(self.tier_of(patient.risk_score)?);
            Ok(counts)
        })
    }

    /// Mean risk score of the population, `None` for an empty population.
    pub fn mean_risk_score(&self, patients: &[PatientRiskRecord]) -> Result<Option<f64>, AnalyticsError> {
        if patients.is_empty() {
            return Ok(None);
        }

        let sum = patients.iter().try_fold(0.0, |acc, patient| {
            ensure_unit_interval("risk_score", patient.risk_score).map(|score| acc + score)
        })?;

        Ok(Some(sum / patients.len() as f64))
    }

    /// Patients in the given tier, in input order. `None` keeps everyone.
    pub fn filter_by_tier<'a>(
        &self,
        patients: &'a [PatientRiskRecord],
        tier: Option<RiskTier>,
    ) -> Result<Vec<&'a PatientRiskRecord>, AnalyticsError> {
        let mut selected = Vec::with_capacity(patients.len());
        for patient in patients {
            let patient_tier = self.tier_of(patient.risk_score)?;
            if tier.map_or(true, |wanted| wanted == patient_tier) {
                selected.push(patient);
            }
        }
        Ok(selected)
    }
}

#[cfg(test)]
#[path = "risk_stratifier_test.rs"]
mod risk_stratifier_test;
