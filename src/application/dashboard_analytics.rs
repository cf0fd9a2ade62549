//! DashboardAnalytics - Assembles dashboard panels from the analytics calculators.
//!
//! Each panel method runs one calculator and applies display rounding exactly
//! once, on the way out:
//! - Model metrics → `MetricsCalculator` → `ModelMetricsPanel`
//! - Patient list → `RiskStratifier` → `RiskOverviewPanel`
//! - Global explanations → `FeatureImportanceRanker` → `ExplainabilityPanel`
//! - Visit history → `TimeSeriesNormalizer` → `TrendPanel`
//! - Care operations → `CohortAggregator` → `OutcomesPanel`

use tracing::{debug, warn};

use crate::config::{AppConfig, ValidationError};
use crate::domain::analytics::{
    ClinicalObservation, CohortAggregator, ConfusionCounts, FeatureImportanceRanker,
    FeatureImportanceRecord, InterventionOutcome, MetricValue, MetricsCalculator,
    PatientRiskRecord, RiskPeriod, RiskStratifier, RiskTier, TimeSeriesNormalizer,
};
use crate::domain::dashboard::{
    ExplainabilityPanel, FeatureBar, InterventionRow, MatrixCell, ModelMetricsPanel,
    OutcomesPanel, ReferenceMarker, RiskOverviewPanel, StackedBar, TierSummary, TrendBar,
    TrendPanel,
};
use crate::domain::foundation::{
    AnalyticsError, DisplayPrecision, Percentage, MAX_DECIMAL_PLACES,
};

/// Builds presentation panels. Holds only validated settings, so one instance
/// can be shared across threads and re-used on every render.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DashboardAnalytics {
    stratifier: RiskStratifier,
    ranker: FeatureImportanceRanker,
    precision: DisplayPrecision,
}

impl DashboardAnalytics {
    /// Creates the service from its parts.
    pub fn new(
        stratifier: RiskStratifier,
        ranker: FeatureImportanceRanker,
        precision: DisplayPrecision,
    ) -> Self {
        Self {
            stratifier,
            ranker,
            precision,
        }
    }

    /// Creates the service from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any analytics section is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, ValidationError> {
        config.trend.validate()?;
        let stratifier = RiskStratifier::new(config.risk.thresholds()?);
        let ranker = FeatureImportanceRanker::new(
            config.impact.thresholds()?,
            config.trend.slope_tolerance,
        );
        let precision = config.display.precision()?;

        Ok(Self::new(stratifier, ranker, precision))
    }

    /// Display precision in use.
    pub fn precision(&self) -> DisplayPrecision {
        self.precision
    }

    fn as_percent(&self, fraction: f64) -> f64 {
        Percentage::from_fraction(fraction).rounded(self.precision)
    }

    /// Model performance panel, or `None` when no confusion matrix is available.
    pub fn model_metrics_panel(
        &self,
        counts: Option<&ConfusionCounts>,
    ) -> Result<Option<ModelMetricsPanel>, AnalyticsError> {
        let Some(counts) = counts else {
            debug!("No confusion matrix supplied, model metrics panel omitted");
            return Ok(None);
        };
        let metrics = MetricsCalculator::compute(counts).map_err(rejected("model_metrics"))?;
        let shares = counts.cell_shares().map_err(rejected("model_metrics"))?;

        let percent =
            |metric: MetricValue| metric.as_percentage().map(|p| p.rounded(self.precision));
        let score_precision = DisplayPrecision::try_new(
            (self.precision.decimal_places() + 2).min(MAX_DECIMAL_PLACES),
        )
        .unwrap_or(self.precision);

        let cells = vec![
            MatrixCell {
                label: "True Negative",
                count: counts.true_negative,
                percentage: shares.true_negative.rounded(self.precision),
                correct: true,
            },
            MatrixCell {
                label: "False Positive",
                count: counts.false_positive,
                percentage: shares.false_positive.rounded(self.precision),
                correct: false,
            },
            MatrixCell {
                label: "False Negative",
                count: counts.false_negative,
                percentage: shares.false_negative.rounded(self.precision),
                correct: false,
            },
            MatrixCell {
                label: "True Positive",
                count: counts.true_positive,
                percentage: shares.true_positive.rounded(self.precision),
                correct: true,
            },
        ];

        debug!(
            total = metrics.total,
            precision_computable = metrics.precision.is_computable(),
            recall_computable = metrics.recall.is_computable(),
            "Computed classifier metrics"
        );

        Ok(Some(ModelMetricsPanel {
            total_predictions: metrics.total,
            accuracy: Percentage::from_fraction(metrics.accuracy).rounded(self.precision),
            precision: percent(metrics.precision),
            recall: percent(metrics.recall),
            specificity: percent(metrics.specificity),
            f1_score: metrics.f1_score.value().map(|f1| score_precision.round(f1)),
            cells,
        }))
    }

    /// Population split by risk tier.
    pub fn risk_overview_panel(
        &self,
        patients: &[PatientRiskRecord],
    ) -> Result<RiskOverviewPanel, AnalyticsError> {
        let counts = self
            .stratifier
            .stratify(patients)
            .map_err(rejected("risk_overview"))?;
        let mean = self
            .stratifier
            .mean_risk_score(patients)
            .map_err(rejected("risk_overview"))?;

        let thresholds = self.stratifier.thresholds();
        let tiers = RiskTier::ALL
            .iter()
            .map(|tier| TierSummary {
                tier: *tier,
                label: tier.label(),
                count: counts.count(*tier),
                percentage: counts.percentage(*tier).rounded(self.precision),
            })
            .collect();

        debug!(
            patients = patients.len(),
            high = counts.high,
            medium = counts.medium,
            low = counts.low,
            "Stratified patient population"
        );

        Ok(RiskOverviewPanel {
            total_patients: patients.len(),
            tiers,
            average_risk: mean.map(|m| Percentage::from_fraction(m).rounded(self.precision)),
            high_threshold: self.as_percent(thresholds.high()),
            medium_threshold: self.as_percent(thresholds.medium()),
        })
    }

    /// Global feature importance bars, in input order.
    pub fn explainability_panel(
        &self,
        features: &[FeatureImportanceRecord],
    ) -> Result<ExplainabilityPanel, AnalyticsError> {
        let ranked = self.ranker.rank(features).map_err(rejected("explainability"))?;
        let impact_counts = FeatureImportanceRanker::count_by_impact(&ranked);
        let thresholds = self.ranker.thresholds();

        debug!(
            features = ranked.len(),
            high_impact = impact_counts.high,
            "Ranked feature importance"
        );

        let features = ranked
            .into_iter()
            .map(|f| FeatureBar {
                importance: f.importance_share.rounded(self.precision),
                bar_length: self.precision.round(f.bar_length),
                feature: f.feature,
                impact: f.impact,
                impact_label: f.impact.label(),
                trend: f.trend,
                description: f.description,
            })
            .collect();

        Ok(ExplainabilityPanel {
            features,
            impact_counts,
            high_impact_threshold: self.as_percent(thresholds.high()),
            medium_impact_threshold: self.as_percent(thresholds.medium()),
        })
    }

    /// One metric from a patient's visit history, scaled for a bar chart.
    ///
    /// `reference` is an optional target (e.g. HbA1c 7.0) drawn on the same
    /// scale; it is omitted when the series is empty.
    pub fn trend_panel(
        &self,
        observations: &[ClinicalObservation],
        metric: &str,
        reference: Option<f64>,
    ) -> Result<TrendPanel, AnalyticsError> {
        let series = TimeSeriesNormalizer::extract_series(observations, metric);
        let normalized = TimeSeriesNormalizer::normalize(&series).map_err(rejected("trend"))?;
        let range = TimeSeriesNormalizer::series_range(&series).map_err(rejected("trend"))?;

        let reference = match (reference, range) {
            (Some(value), Some(range)) => Some(ReferenceMarker {
                value,
                position: self.precision.round(range.position_of(value) * 100.0),
            }),
            _ => None,
        };

        debug!(
            metric,
            observations = observations.len(),
            points = normalized.len(),
            "Normalized clinical trend"
        );

        Ok(TrendPanel {
            metric: metric.to_string(),
            points: normalized
                .into_iter()
                .map(|p| TrendBar {
                    timestamp: p.timestamp,
                    value: p.value,
                    height: self.precision.round(p.normalized_value * 100.0),
                })
                .collect(),
            reference,
        })
    }

    /// Intervention success rates and monthly risk distribution.
    pub fn outcomes_panel(
        &self,
        outcomes: &[InterventionOutcome],
        periods: &[RiskPeriod],
    ) -> Result<OutcomesPanel, AnalyticsError> {
        let summary =
            CohortAggregator::summarize_outcomes(outcomes).map_err(rejected("outcomes"))?;
        let trend = CohortAggregator::aggregate_risk_over_time(periods);

        debug!(
            interventions = summary.interventions.len(),
            periods = trend.periods.len(),
            high_risk_change = ?trend.high_risk_change,
            "Aggregated cohort outcomes"
        );


        Ok(OutcomesPanel {
            interventions: summary
                .interventions
                .into_iter()
                .map(|r| InterventionRow {
                    rate: r.rate.rounded(self.precision),
                    intervention_type: r.intervention_type,
                    successful: r.successful,
                    total: r.total,
                })
                .collect(),
            overall_rate: summary.overall_rate.map(|r| r.rounded(self.precision)),
            total_successful: summary.total_successful,
            total_attempts: summary.total_attempts,
            risk_distribution: trend
                .periods
                .into_iter()
                .map(|p| StackedBar {
                    high: p.counts.high,
                    medium: p.counts.medium,
                    low: p.counts.low,
                    high_width: self.as_percent(p.high_width),
                    medium_width: self.as_percent(p.medium_width),
                    low_width: self.as_percent(p.low_width),
                    label: p.label,
                })
                .collect(),
            high_risk_change: trend.high_risk_change,
        })
    }
}

fn rejected(panel: &'static str) -> impl Fn(AnalyticsError) -> AnalyticsError {
    move |err| {
        warn!(
            panel,
            code = %err.code(),
            field = err.field(),
            "Rejected analytics input: {}",
            err
        );
        err
    }
}

#[cfg(test)]
#[path = "dashboard_analytics_test.rs"]
mod dashboard_analytics_test;
