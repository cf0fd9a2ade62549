//! Time Series Normalizer - Min-max scaling of clinical measurement series.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{AnalyticsError, Timestamp};

/// Normalized value given to every point of a flat series.
pub const FLAT_SERIES_MIDPOINT: f64 = 0.5;

/// A single measurement of a clinical metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    pub timestamp: Timestamp,
    pub value: f64,
}

impl TimeSeriesPoint {
    /// Creates a point.
    pub fn new(timestamp: Timestamp, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// A measurement scaled into `[0, 1]` for charting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPoint {
    pub timestamp: Timestamp,
    /// Original measurement, kept for point labels.
    pub value: f64,
    pub normalized_value: f64,
}

/// Observed bounds of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesRange {
    pub min: f64,
    pub max: f64,
}

impl SeriesRange {
    /// Difference between max and min. Infinite when the bounds are more
    /// than `f64::MAX` apart.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Position of `value` on the series' 0-1 scale.
    ///
    /// Used to place caller-supplied reference lines (a clinical target, for
    /// instance) on the same scale as the series. Not clamped: a target above
    /// every measurement lands above 1. A flat series maps everything to the
    /// midpoint.
    ///
    /// Operands are halved before subtracting so that finite bounds at the
    /// edges of the `f64` range never produce an infinite span.
    pub fn position_of(&self, value: f64) -> f64 {
        let half_span = self.max / 2.0 - self.min / 2.0;
        if half_span == 0.0 {
            FLAT_SERIES_MIDPOINT
        } else {
            (value / 2.0 - self.min / 2.0) / half_span
        }
    }
}

/// One visit's worth of measurements, keyed by metric name (`hba1c`, `weight`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalObservation {
    pub date: Timestamp,
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
}

impl ClinicalObservation {
    /// Creates an observation with no measurements.
    pub fn new(date: Timestamp) -> Self {
        Self {
            date,
            metrics: BTreeMap::new(),
        }
    }

    /// Adds a measurement.
    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(name.into(), value);
        self
    }
}

/// Time-series normalization for charts.
pub struct TimeSeriesNormalizer;

impl TimeSeriesNormalizer {
    /// Min-max scales a series after sorting it by timestamp.
    ///
    /// # Algorithm
    /// normalized = (value - min) / (max - min)
    ///
    /// The sort is stable: points sharing a timestamp keep their input order.
    ///
    /// # Errors
    /// `InvalidInput` when a value is NaN or infinite.
    ///
    /// # Edge Cases
    /// - Empty input: Returns empty Vec
    /// - All values equal: every point is 0.5
    pub fn normalize(points: &[TimeSeriesPoint]) -> Result<Vec<NormalizedPoint>, AnalyticsError> {
        let range = match Self::series_range(points)? {
            Some(range) => range,
            None => return Ok(Vec::new()),
        };

        let mut sorted = points.to_vec();
        sorted.sort_by_key(|p| p.timestamp);

        Ok(sorted
            .into_iter()
            .map(|p| NormalizedPoint {
                timestamp: p.timestamp,
                value: p.value,
                normalized_value: range.position_of(p.value),
            })
            .collect())
    }

    /// Min and max of the series, `None` when empty.
    ///
    /// # Errors
    /// `InvalidInput` when a value is NaN or infinite.
    pub fn series_range(points: &[TimeSeriesPoint]) -> Result<Option<SeriesRange>, AnalyticsError> {
        let mut range: Option<SeriesRange> = None;

        for point in points {
            if !point.value.is_finite() {
                return Err(AnalyticsError::invalid_input(
                    "value",
                    format!("non-finite measurement at {}", point.timestamp),
                ));
            }
            range = Some(match range {
                None => SeriesRange {
                    min: point.value,
                    max: point.value,
                },
                Some(r) => SeriesRange {
                    min: r.min.min(point.value),
                    max: r.max.max(point.value),
                },
            });
        }

        Ok(range)
    }

    /// Pulls one metric out of a list of visits.
    ///
    /// Visits that did not record the metric are skipped rather than read as 0.
    pub fn extract_series(observations: &[ClinicalObservation], metric: &str) -> Vec<TimeSeriesPoint> {
        observations
            .iter()
            .filter_map(|obs| {
                obs.metrics
                    .get(metric)
                    .map(|value| TimeSeriesPoint::new(obs.date, *value))
            })
            .collect()
    }
}
