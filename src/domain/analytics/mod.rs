//! Analytics Module - Pure domain services for model evaluation and cohort analytics.
//!
//! This module contains stateless functions that turn raw patient records and
//! model outputs into the derived quantities the dashboard renders.
//!
//! # Components
//!
//! - `MetricsCalculator` - Accuracy, precision, recall, specificity, F1 from a confusion matrix
//! - `RiskStratifier` - Risk tiers over a patient population
//! - `FeatureImportanceRanker` - Importance bars, impact tiers, trend directions
//! - `TimeSeriesNormalizer` - Min-max scaling of clinical measurement series
//! - `CohortAggregator` - Intervention success rates and risk tiers over time
//!
//! # Design Philosophy
//!
//! All functions are pure (no side effects) and stateless. They borrow their
//! inputs, never mutate them, and return freshly built results, so they are
//! safe to call concurrently and as often as the views re-render. None of the
//! components depends on another's output.

mod cohort_aggregator;
mod feature_ranker;
mod metrics_calculator;
mod risk_stratifier;
mod time_series;

// Re-export all public types
pub use cohort_aggregator::{
    CohortAggregator, CohortSummary, CohortTrendSummary, InterventionOutcome, OutcomeRate,
    PeriodSegments, RiskPeriod,
};
pub use feature_ranker::{
    FeatureImportanceRanker, FeatureImportanceRecord, ImpactThresholds, ImpactTier,
    ImpactTierCounts, RankedFeature, TrendDirection, TrendSignal, DEFAULT_HIGH_IMPACT_THRESHOLD,
    DEFAULT_MEDIUM_IMPACT_THRESHOLD,
};
pub use metrics_calculator::{
    ClassifierMetrics, ConfusionCellShares, ConfusionCounts, MetricValue, MetricsCalculator,
};
pub use risk_stratifier::{
    PatientRiskRecord, RiskStratifier, RiskThresholds, RiskTier, RiskTierCounts,
    DEFAULT_HIGH_RISK_THRESHOLD, DEFAULT_MEDIUM_RISK_THRESHOLD,
};
pub use time_series::{
    ClinicalObservation, NormalizedPoint, SeriesRange, TimeSeriesNormalizer, TimeSeriesPoint,
    FLAT_SERIES_MIDPOINT,
};
