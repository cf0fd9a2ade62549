//! Feature Importance Ranker - Bar normalization, impact tiers and trend direction.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::foundation::{ensure_unit_interval, AnalyticsError, Percentage};

/// Default lower bound (inclusive) of the high impact tier.
pub const DEFAULT_HIGH_IMPACT_THRESHOLD: f64 = 0.20;

/// Default lower bound (inclusive) of the medium impact tier.
pub const DEFAULT_MEDIUM_IMPACT_THRESHOLD: f64 = 0.05;

/// Discretized bucket of a feature's contribution magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactTier {
    High,
    Medium,
    Low,
}

impl ImpactTier {
    /// Returns the badge label for this tier.
    pub fn label(&self) -> &'static str {
        match self {
            ImpactTier::High => "HIGH",
            ImpactTier::Medium => "MEDIUM",
            ImpactTier::Low => "LOW",
        }
    }
}

/// Direction a feature is moving in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    #[default]
    Stable,
}

/// Trend signal supplied by the model-explanation service.
///
/// Either a categorical label (`"increasing"`, `"decreases"`, ...) or a
/// numeric slope. Any other JSON shape is kept as `Other` and read as stable,
/// so one malformed trend never rejects the whole feature list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrendSignal {
    Slope(f64),
    Label(String),
    Other(JsonValue),
}

impl From<&str> for TrendSignal {
    fn from(label: &str) -> Self {
        TrendSignal::Label(label.to_string())
    }
}

impl From<f64> for TrendSignal {
    fn from(slope: f64) -> Self {
        TrendSignal::Slope(slope)
    }
}

/// A feature and its relative weight in the model.
///
/// `feature` is expected to be unique within one call; this is not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureImportanceRecord {
    pub feature: String,
    pub importance: f64,
    #[serde(default)]
    pub trend: Option<TrendSignal>,
    #[serde(default)]
    pub description: Option<String>,
}

impl FeatureImportanceRecord {
    /// Creates a record with no trend and no description.
    pub fn new(feature: impl Into<String>, importance: f64) -> Self {
        Self {
            feature: feature.into(),
            importance,
            trend: None,
            description: None,
        }
    }

    /// Sets the trend signal.
    pub fn with_trend(mut self, trend: impl Into<TrendSignal>) -> Self {
        self.trend = Some(trend.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A feature ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedFeature {
    pub feature: String,
    pub importance: f64,
    /// Raw importance shown as a percentage.
    pub importance_share: Percentage,
    /// Bar length relative to the strongest feature, 0-100.
    pub bar_length: f64,
    pub impact: ImpactTier,
    pub trend: TrendDirection,
    pub description: Option<String>,
}

/// Number of features per impact tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactTierCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Impact tier boundaries, applied to raw importance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactThresholds {
    high: f64,
    medium: f64,
}

impl ImpactThresholds {
    /// Creates thresholds, requiring `0 <= medium < high <= 1`.
    pub fn try_new(high: f64, medium: f64) -> Result<Self, AnalyticsError> {
        ensure_unit_interval("high_impact_threshold", high)?;
        ensure_unit_interval("medium_impact_threshold", medium)?;
        if medium >= high {
            return Err(AnalyticsError::out_of_range(
                "medium_impact_threshold",
                0.0,
                high,
                medium,
            ));
        }
        Ok(Self { high, medium })
    }

    /// Importance at or above this is high impact.
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Importance at or above this (and not high) is medium impact.
    pub fn medium(&self) -> f64 {
        self.medium
    }
}

impl Default for ImpactThresholds {
    fn default() -> Self {
        Self {
            high: DEFAULT_HIGH_IMPACT_THRESHOLD,
            medium: DEFAULT_MEDIUM_IMPACT_THRESHOLD,
        }
    }
}

/// Feature importance ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FeatureImportanceRanker {
    thresholds: ImpactThresholds,
    slope_tolerance: f64,
}

impl FeatureImportanceRanker {
    /// Creates a ranker.
    ///
    /// Numeric trend slopes within `slope_tolerance` of zero count as stable.
    /// A negative or non-finite tolerance is treated as zero.
    pub fn new(thresholds: ImpactThresholds, slope_tolerance: f64) -> Self {
        let slope_tolerance = if slope_tolerance.is_finite() {
            slope_tolerance.max(0.0)
        } else {
            0.0
        };
        Self {
            thresholds,
            slope_tolerance,
        }
    }

    /// Returns the impact boundaries in use.
    pub fn thresholds(&self) -> ImpactThresholds {
        self.thresholds
    }

    /// Tiers a raw importance value. Independent of any other feature.
    pub fn classify_impact(&self, importance: f64) -> ImpactTier {
        if importance >= self.thresholds.high {
            ImpactTier::High
        } else if importance >= self.thresholds.medium {
            ImpactTier::Medium
        } else {
            ImpactTier::Low
        }
    }

    /// Maps a trend signal onto a direction.
    ///
    /// Unknown labels, NaN slopes and a missing signal are all `Stable`.
    pub fn classify_trend(&self, signal: Option<&TrendSignal>) -> TrendDirection {
        match signal {
            Some(TrendSignal::Label(label)) => Self::direction_from_label(label),
            Some(TrendSignal::Slope(slope)) if *slope > self.slope_tolerance => {
                TrendDirection::Increasing
            }
            Some(TrendSignal::Slope(slope)) if *slope < -self.slope_tolerance => {
                TrendDirection::Decreasing
            }
            _ => TrendDirection::Stable,
        }
    }

    fn direction_from_label(label: &str) -> TrendDirection {
        match label.trim().to_ascii_lowercase().as_str() {
            "increasing" | "increases" | "increase" | "up" | "rising" => TrendDirection::Increasing,
            "decreasing" | "decreases" | "decrease" | "down" | "falling" => {
                TrendDirection::Decreasing
            }
            _ => TrendDirection::Stable,
        }
    }

    /// Ranks features for display, preserving input order.
    ///
    /// # Algorithm
    /// bar_length = importance / max(importance) * 100
    ///
    /// # Errors
    /// `OutOfRange` when an importance is outside `[0, 1]` or NaN.
    ///
    /// # Edge Cases
    /// - Empty input: Returns empty Vec
    /// - All importances zero: every bar is 0
    pub fn rank(&self, features: &[FeatureImportanceRecord]) -> Result<Vec<RankedFeature>, AnalyticsError> {
        let mut max_importance: f64 = 0.0;
        for record in features {
            let importance = ensure_unit_interval("importance", record.importance)?;
            max_importance = max_importance.max(importance);
        }

        let ranked = features
            .iter()
            .map(|record| {
                let bar_length = if max_importance > 0.0 {
                    record.importance / max_importance * 100.0
                } else {
                    0.0
                };

                RankedFeature {
                    feature: record.feature.clone(),
                    importance: record.importance,
                    importance_share: Percentage::from_fraction(record.importance),
                    bar_length,
                    impact: self.classify_impact(record.importance),
                    trend: self.classify_trend(record.trend.as_ref()),
                    description: record.description.clone(),
                }
            })
            .collect();

        Ok(ranked)
    }

    /// Counts ranked features per impact tier.
    pub fn count_by_impact(ranked: &[RankedFeature]) -> ImpactTierCounts {
        ranked.iter().fold(ImpactTierCounts::default(), |mut counts, feature| {
            match feature.impact {
                ImpactTier::High => counts.high += 1,
                ImpactTier::Medium => counts.medium += 1,
                ImpactTier::Low => counts.low += 1,
            }
            counts
        })
    }
}
