use serde::Serialize;

use crate::domain::analytics::{ImpactTier, ImpactTierCounts, RiskTier, TrendDirection};
use crate::domain::foundation::Timestamp;

/// Model performance panel. Percentages are rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetricsPanel {
    pub total_predictions: u64,
    pub accuracy: f64,
    /// `None` when no positive predictions were made
    pub precision: Option<f64>,
    /// `None` when there were no actual positives
    pub recall: Option<f64>,
    /// `None` when there were no actual negatives
    pub specificity: Option<f64>,
    /// On the 0-1 scale, rounded to two more places than the percentages
    pub f1_score: Option<f64>,
    pub cells: Vec<MatrixCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixCell {
    pub label: &'static str,
    pub count: u64,
    pub percentage: f64,
    /// True for TP and TN
    pub correct: bool,
}

/// Patient population by risk tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskOverviewPanel {
    pub total_patients: usize,
    pub tiers: Vec<TierSummary>,
    /// Mean risk score as a percentage; `None` for an empty population
    pub average_risk: Option<f64>,
    /// Tier boundaries as percentages, for the legend
    pub high_threshold: f64,
    pub medium_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierSummary {
    pub tier: RiskTier,
    pub label: &'static str,
    pub count: usize,
    pub percentage: f64,
}

/// Global feature importance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainabilityPanel {
    pub features: Vec<FeatureBar>,
    pub impact_counts: ImpactTierCounts,
    /// Impact boundaries as percentages of importance
    pub high_impact_threshold: f64,
    pub medium_impact_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureBar {
    pub feature: String,
    pub importance: f64,
    pub bar_length: f64,
    pub impact: ImpactTier,
    /// Badge text for `impact`
    pub impact_label: &'static str,
    pub trend: TrendDirection,
    pub description: Option<String>,
}

/// One clinical metric over time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPanel {
    pub metric: String,
    pub points: Vec<TrendBar>,
    pub reference: Option<ReferenceMarker>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendBar {
    pub timestamp: Timestamp,
    pub value: f64,
    /// Bar height, 0-100
    pub height: f64,
}

/// Caller-supplied target line placed on the series scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceMarker {
    pub value: f64,
    /// Height on the same 0-100 scale as the bars; may fall outside it
    pub position: f64,
}

/// Intervention outcomes and risk distribution over time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomesPanel {
    pub interventions: Vec<InterventionRow>,
    pub overall_rate: Option<f64>,
    pub total_successful: u64,
    pub total_attempts: u64,
    pub risk_distribution: Vec<StackedBar>,
    pub high_risk_change: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterventionRow {
    #[serde(rename = "type")]
    pub intervention_type: String,
    pub successful: u64,
    pub total: u64,
    pub rate: f64,
}

/// Stacked bar widths are percentages of the period's patients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackedBar {
    pub label: String,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub high_width: f64,
    pub medium_width: f64,
    pub low_width: f64,
}

#[cfg(test)]
#[path = "panels_test.rs"]
mod panels_test;
