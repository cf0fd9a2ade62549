//! Metrics Calculator - Classifier metrics from a binary confusion matrix.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AnalyticsError, Percentage};

/// 2x2 tally of predicted vs. actual outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfusionCounts {
    pub true_positive: u64,
    pub false_positive: u64,
    pub true_negative: u64,
    pub false_negative: u64,
}

impl ConfusionCounts {
    /// Creates a confusion matrix from its four cells.
    pub fn new(true_positive: u64, false_positive: u64, true_negative: u64, false_negative: u64) -> Self {
        Self {
            true_positive,
            false_positive,
            true_negative,
            false_negative,
        }
    }

    /// Total number of observations, `None` if the sum overflows `u64`.
    pub fn total(&self) -> Option<u64> {
        checked_sum(&[
            self.true_positive,
            self.false_positive,
            self.true_negative,
            self.false_negative,
        ])
    }

    /// Number of positive predictions (TP + FP), `None` on overflow.
    pub fn predicted_positive(&self) -> Option<u64> {
        self.true_positive.checked_add(self.false_positive)
    }

    /// Number of actual positives (TP + FN), `None` on overflow.
    pub fn actual_positive(&self) -> Option<u64> {
        self.true_positive.checked_add(self.false_negative)
    }

    /// Number of actual negatives (TN + FP), `None` on overflow.
    pub fn actual_negative(&self) -> Option<u64> {
        self.true_negative.checked_add(self.false_positive)
    }

    /// Number of correct predictions (TP + TN), `None` on overflow.
    pub fn correct(&self) -> Option<u64> {
        self.true_positive.checked_add(self.true_negative)
    }

    /// Share of the total held by each cell.
    ///
    /// # Errors
    /// `InvalidInput` when the matrix holds no observations.
    pub fn cell_shares(&self) -> Result<ConfusionCellShares, AnalyticsError> {
        let total = self.non_zero_total()?;
        let share = |count: u64| Percentage::from_fraction(count as f64 / total as f64);

        Ok(ConfusionCellShares {
            true_positive: share(self.true_positive),
            false_positive: share(self.false_positive),
            true_negative: share(self.true_negative),
            false_negative: share(self.false_negative),
        })
    }

    fn non_zero_total(&self) -> Result<u64, AnalyticsError> {
        match self.total() {
            None => Err(count_overflow()),
            Some(0) => Err(AnalyticsError::invalid_input(
                "confusion_counts",
                "confusion matrix has no observations",
            )),
            Some(total) => Ok(total),
        }
    }
}

fn checked_sum(cells: &[u64]) -> Option<u64> {
    cells.iter().try_fold(0u64, |acc, cell| acc.checked_add(*cell))
}

fn count_overflow() -> AnalyticsError {
    AnalyticsError::invalid_input("total", "count overflow")
}

/// Each confusion-matrix cell as a percentage of all observations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfusionCellShares {
    pub true_positive: Percentage,
    pub false_positive: Percentage,
    pub true_negative: Percentage,
    pub false_negative: Percentage,
}

/// A ratio metric that may be undefined.
///
/// `NotComputable` means the denominator was zero (for example precision when
/// the model made no positive predictions). It is distinct from a metric
/// whose value is zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "camelCase")]
pub enum MetricValue {
    Computable(f64),
    NotComputable,
}

impl MetricValue {
    /// Computes `numerator / denominator`, or `NotComputable` on a zero denominator.
    pub fn ratio(numerator: u64, denominator: u64) -> Self {
        if denominator == 0 {
            MetricValue::NotComputable
        } else {
            MetricValue::Computable(numerator as f64 / denominator as f64)
        }
    }

    /// Returns the value if defined.
    pub fn value(&self) -> Option<f64> {
        match self {
            MetricValue::Computable(v) => Some(*v),
            MetricValue::NotComputable => None,
        }
    }

    /// Returns the value, or NaN when not computable.
    pub fn as_f64(&self) -> f64 {
        self.value().unwrap_or(f64::NAN)
    }

    /// Returns true if the metric has a defined value.
    pub fn is_computable(&self) -> bool {
        matches!(self, MetricValue::Computable(_))
    }

    /// Returns the value as a percentage if defined.
    pub fn as_percentage(&self) -> Option<Percentage> {
        self.value().map(Percentage::from_fraction)
    }
}

/// Derived classifier metrics, all as full-precision fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierMetrics {
    pub total: u64,
    /// Always defined since the total is non-zero.
    pub accuracy: f64,
    pub precision: MetricValue,
    pub recall: MetricValue,
    pub specificity: MetricValue,
    pub f1_score: MetricValue,
}

/// Classifier metric computation.
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Computes accuracy, precision, recall, specificity and F1.
    ///
    /// # Algorithm
    /// - accuracy = (TP + TN) / total
    /// - precision = TP / (TP + FP)
    /// - recall = TP / (TP + FN)
    /// - specificity = TN / (TN + FP)
    /// - F1 = 2PR / (P + R), from the unrounded precision and recall
    ///
    /// # Errors
    /// `InvalidInput` when the matrix holds no observations or its cells sum
    /// past `u64::MAX`.
    ///
    /// # Edge Cases
    /// - Zero denominator: that metric is `NotComputable`
    /// - Precision or recall not computable: F1 is `NotComputable`
    /// - Precision and recall both zero: F1 is `NotComputable`
    pub fn compute(counts: &ConfusionCounts) -> Result<ClassifierMetrics, AnalyticsError> {
        let total = counts.non_zero_total()?;

        // Every partial sum is bounded by the already-checked total
        let correct = counts.correct().ok_or_else(count_overflow)?;
        let predicted_positive = counts.predicted_positive().ok_or_else(count_overflow)?;
        let actual_positive = counts.actual_positive().ok_or_else(count_overflow)?;
        let actual_negative = counts.actual_negative().ok_or_else(count_overflow)?;

        let accuracy = correct as f64 / total as f64;
        let precision = MetricValue::ratio(counts.true_positive, predicted_positive);
        let recall = MetricValue::ratio(counts.true_positive, actual_positive);
        let specificity = MetricValue::ratio(counts.true_negative, actual_negative);
        let f1_score = Self::f1(precision, recall);

        Ok(ClassifierMetrics {
            total,
            accuracy,
            precision,
            recall,
            specificity,
            f1_score,
        })
    }

    /// Like [`MetricsCalculator::compute`], but an absent matrix yields `Ok(None)`.
    pub fn compute_optional(
        counts: Option<&ConfusionCounts>,
    ) -> Result<Option<ClassifierMetrics>, AnalyticsError> {
        counts.map(Self::compute).transpose()
    }

    fn f1(precision: MetricValue, recall: MetricValue) -> MetricValue {
        match (precision, recall) {
            (MetricValue::Computable(p), MetricValue::Computable(r)) if p + r > 0.0 => {
                MetricValue::Computable(2.0 * p * r / (p + r))
            }
            _ => MetricValue::NotComputable,
        }
    }
}
