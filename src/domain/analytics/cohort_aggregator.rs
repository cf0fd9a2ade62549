//! Cohort Aggregator - Intervention outcome rates and risk tiers over time.

use serde::{Deserialize, Serialize};

use super::RiskTierCounts;
use crate::domain::foundation::{AnalyticsError, Percentage};

/// Tally of one intervention type. `successful` never exceeds `total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterventionOutcome {
    #[serde(rename = "type")]
    pub intervention_type: String,
    pub successful: u64,
    pub total: u64,
}

impl InterventionOutcome {
    /// Creates an outcome row.
    pub fn new(intervention_type: impl Into<String>, successful: u64, total: u64) -> Self {
        Self {
            intervention_type: intervention_type.into(),
            successful,
            total,
        }
    }
}

/// Success rate of one intervention type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeRate {
    #[serde(rename = "type")]
    pub intervention_type: String,
    pub successful: u64,
    pub total: u64,
    /// Full precision; round at the presentation boundary.
    pub rate: Percentage,
}

/// Roll-up across every intervention type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortSummary {
    pub interventions: Vec<OutcomeRate>,
    pub total_successful: u64,
    pub total_attempts: u64,
    /// `None` when there are no rows.
    pub overall_rate: Option<Percentage>,
}

/// Tier counts for one reporting period (typically a month).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskPeriod {
    #[serde(alias = "month")]
    pub label: String,
    #[serde(flatten)]
    pub counts: RiskTierCounts,
}

impl RiskPeriod {
    /// Creates a period.
    pub fn new(label: impl Into<String>, counts: RiskTierCounts) -> Self {
        Self {
            label: label.into(),
            counts,
        }
    }
}

/// A period's tiers as proportional widths of a stacked bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSegments {
    pub label: String,
    pub counts: RiskTierCounts,
    pub high_width: f64,
    pub medium_width: f64,
    pub low_width: f64,
}

/// Risk distribution across periods, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortTrendSummary {
    pub periods: Vec<PeriodSegments>,
    /// High-tier count of the last period minus that of the one before it.
    pub high_risk_change: Option<i64>,
}

/// Cohort roll-ups.
pub struct CohortAggregator;

impl CohortAggregator {
    /// Computes the success rate of each intervention type.
    ///
    /// # Algorithm
    /// rate = successful / total * 100
    ///
    /// # Errors
    /// - `InvalidInput` when a row has `total == 0`; callers must filter such
    ///   rows or mark them as not applicable themselves
    /// - `OutOfRange` when `successful > total`
    pub fn aggregate_outcomes(outcomes: &[InterventionOutcome]) -> Result<Vec<OutcomeRate>, AnalyticsError> {
        outcomes.iter().map(Self::outcome_rate).collect()
    }

    /// Per-type rates plus the pooled rate across all types.
    ///
    /// # Errors
    /// As [`CohortAggregator::aggregate_outcomes`], plus `InvalidInput` when
    /// the pooled counts overflow `u64`.
    pub fn summarize_outcomes(outcomes: &[InterventionOutcome]) -> Result<CohortSummary, AnalyticsError> {
        let mut interventions = Vec::with_capacity(outcomes.len());
        let mut total_successful: u64 = 0;
        let mut total_attempts: u64 = 0;

        for outcome in outcomes {
            interventions.push(Self::outcome_rate(outcome)?);
            total_successful = total_successful
                .checked_add(outcome.successful)
                .ok_or_else(count_overflow)?;
            total_attempts = total_attempts
                .checked_add(outcome.total)
                .ok_or_else(count_overflow)?;
        }

        Ok(CohortSummary {
            interventions,
            total_successful,
            total_attempts,
            overall_rate: Percentage::from_ratio(total_successful, total_attempts),
        })
    }

    fn outcome_rate(outcome: &InterventionOutcome) -> Result<OutcomeRate, AnalyticsError> {
        if outcome.total == 0 {
            return Err(AnalyticsError::invalid_input(
                "total",
                format!("intervention '{}' has no attempts", outcome.intervention_type),
            ));
        }
        if outcome.successful > outcome.total {
            return Err(AnalyticsError::out_of_range(
                "successful",
                0.0,
                outcome.total as f64,
                outcome.successful as f64,
            ));
        }

        Ok(OutcomeRate {
            intervention_type: outcome.intervention_type.clone(),
            successful: outcome.successful,
            total: outcome.total,
            rate: Percentage::from_fraction(outcome.successful as f64 / outcome.total as f64),
        })
    }

    /// Converts each period's tier counts into stacked-bar widths.
    ///
    /// # Algorithm
    /// width = count / (high + medium + low)
    ///
    /// # Edge Cases
    /// - Period with no patients: three zero widths
    /// - Fewer than two periods: no high-risk change
    /// - Change beyond the `i64` range saturates
    pub fn aggregate_risk_over_time(periods: &[RiskPeriod]) -> CohortTrendSummary {
        let segments = periods
            .iter()
            .map(|period| PeriodSegments {
                label: period.label.clone(),
                counts: period.counts,
                high_width: period.counts.share(period.counts.high),
                medium_width: period.counts.share(period.counts.medium),
                low_width: period.counts.share(period.counts.low),
            })
            .collect();

        let high_risk_change = match periods {
            [.., previous, current] => Some(signed_change(previous.counts.high, current.counts.high)),
            _ => None,
        };

        CohortTrendSummary {
            periods: segments,
            high_risk_change,
        }
    }
}

fn count_overflow() -> AnalyticsError {
    AnalyticsError::invalid_input("total", "count overflow")
}

fn signed_change(previous: usize, current: usize) -> i64 {
    if current >= previous {
        i64::try_from(current - previous).unwrap_or(i64::MAX)
    } else {
        i64::try_from(previous - current).map_or(i64::MIN, |drop| -drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_outcomes() -> Vec<InterventionOutcome> {
        vec![
            InterventionOutcome::new("Medication Adherence", 34, 38),
            InterventionOutcome::new("Lifestyle Counseling", 28, 31),
            InterventionOutcome::new("Emergency Consultations", 15, 16),
            InterventionOutcome::new("Care Plan Adjustments", 10, 10),
        ]
    }

    fn reference_periods() -> Vec<RiskPeriod> {
        vec![
            RiskPeriod::new("Jun", RiskTierCounts::new(18, 45, 67)),
            RiskPeriod::new("Jul", RiskTierCounts::new(21, 48, 71)),
            RiskPeriod::new("Aug", RiskTierCounts::new(19, 52, 74)),
            RiskPeriod::new("Sep", RiskTierCounts::new(23, 47, 78)),
        ]
    }

    #[test]
    fn outcome_rates_match_reference_table() {
        let rates = CohortAggregator::aggregate_outcomes(&reference_outcomes()).unwrap();
        let rounded: Vec<_> = rates
            .iter()
            .map(|r| r.rate.rounded(Default::default()))
            .collect();
        assert_eq!(rounded, vec![89.5, 90.3, 93.8, 100.0]);
    }

    #[test]
    fn outcome_rates_preserve_order() {
        let rates = CohortAggregator::aggregate_outcomes(&reference_outcomes()).unwrap();
        assert_eq!(rates[0].intervention_type, "Medication Adherence");
        assert_eq!(rates[3].intervention_type, "Care Plan Adjustments");
    }

    #[test]
    fn zero_total_row_is_invalid_input() {
        let err = CohortAggregator::aggregate_outcomes(&[InterventionOutcome::new("X", 10, 0)])
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidInput { .. }));
    }

    #[test]
    fn more_successes_than_attempts_is_out_of_range() {
        let err = CohortAggregator::aggregate_outcomes(&[InterventionOutcome::new("X", 11, 10)])
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::OutOfRange { .. }));
    }

    #[test]
    fn empty_outcomes_give_empty_rates() {
        assert!(CohortAggregator::aggregate_outcomes(&[]).unwrap().is_empty());
        let summary = CohortAggregator::summarize_outcomes(&[]).unwrap();
        assert_eq!(summary.overall_rate, None);
    }

    #[test]
    fn summary_pools_all_interventions() {
        let summary = CohortAggregator::summarize_outcomes(&reference_outcomes()).unwrap();
        assert_eq!(summary.total_successful, 87);
        assert_eq!(summary.total_attempts, 95);
        assert_eq!(
            summary.overall_rate.unwrap().rounded(Default::default()),
            91.6
        );
        assert_eq!(summary.interventions.len(), 4);
    }

    #[test]
    fn risk_segments_are_proportional() {
        let summary = CohortAggregator::aggregate_risk_over_time(&reference_periods());
        assert_eq!(summary.periods.len(), 4);

        let june = &summary.periods[0];
        assert_eq!(june.label, "Jun");
        assert!((june.high_width - 18.0 / 130.0).abs() < 1e-12);
        assert!((june.high_width + june.medium_width + june.low_width - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_period_has_zero_widths() {
        let summary = CohortAggregator::aggregate_risk_over_time(&[RiskPeriod::new(
            "Oct",
            RiskTierCounts::default(),
        )]);
        let oct = &summary.periods[0];
        assert_eq!((oct.high_width, oct.medium_width, oct.low_width), (0.0, 0.0, 0.0));
    }

    #[test]
    fn high_risk_change_compares_last_two_periods() {
        let summary = CohortAggregator::aggregate_risk_over_time(&reference_periods());
        assert_eq!(summary.high_risk_change, Some(4));

        let single = CohortAggregator::aggregate_risk_over_time(&reference_periods()[..1]);
        assert_eq!(single.high_risk_change, None);

        let falling = CohortAggregator::aggregate_risk_over_time(&reference_periods()[1..3]);
        assert_eq!(falling.high_risk_change, Some(-2));
    }

    #[test]
    fn periods_deserialize_from_month_rows() {
        let json = r#"{"month": "Jun", "high": 18, "medium": 45, "low": 67}"#;
        let period: RiskPeriod = serde_json::from_str(json).unwrap();
        assert_eq!(period.label, "Jun");
        assert_eq!(period.counts.total(), Some(130));
    }

    #[test]
    fn pooled_counts_overflow_is_invalid_input() {
        let outcomes = vec![
            InterventionOutcome::new("A", u64::MAX, u64::MAX),
            InterventionOutcome::new("B", 1, 1),
        ];
        let err = CohortAggregator::summarize_outcomes(&outcomes).unwrap_err();
        assert_eq!(err, AnalyticsError::invalid_input("total", "count overflow"));

        // Per-row rates never pool, so they stay available
        let rates = CohortAggregator::aggregate_outcomes(&outcomes).unwrap();
        assert_eq!(rates.len(), 2);
    }

    #[test]
    fn huge_period_counts_do_not_overflow_widths() {
        let summary = CohortAggregator::aggregate_risk_over_time(&[
            RiskPeriod::new("Jan", RiskTierCounts::new(0, 0, 0)),
            RiskPeriod::new("Feb", RiskTierCounts::new(usize::MAX, usize::MAX, 0)),
        ]);
        let feb = &summary.periods[1];
        assert_eq!(feb.counts.total(), None);
        assert!((feb.high_width - 0.5).abs() < 1e-12);
        assert!((feb.high_width + feb.medium_width + feb.low_width - 1.0).abs() < 1e-12);
        assert_eq!(summary.high_risk_change, Some(i64::MAX));
    }

    #[test]
    fn outcome_serializes_type_field() {
        let json = serde_json::to_string(&InterventionOutcome::new("X", 1, 2)).unwrap();
        assert_eq!(json, r#"{"type":"X","successful":1,"total":2}"#);
    }
}
