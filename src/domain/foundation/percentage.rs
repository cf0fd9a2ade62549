//! Percentage value object (0-100 scale) and display precision.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::AnalyticsError;

/// Upper bound on display decimal places.
pub const MAX_DECIMAL_PLACES: u8 = 6;

/// A percentage held at full precision.
///
/// Rounding is only applied through [`Percentage::rounded`], so chained
/// computations never see truncated intermediates.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(f64);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0.0);

    /// Creates a percentage from a fraction (0.25 -> 25%).
    pub fn from_fraction(fraction: f64) -> Self {
        Self(fraction * 100.0)
    }

    /// Creates `part / whole` as a percentage, or `None` when `whole` is zero.
    pub fn from_ratio(part: u64, whole: u64) -> Option<Self> {
        if whole == 0 {
            return None;
        }
        Some(Self::from_fraction(part as f64 / whole as f64))
    }

    /// Returns the value on the 0-100 scale.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns the value as a fraction.
    pub fn as_fraction(&self) -> f64 {
        self.0 / 100.0
    }

    /// Returns the value rounded for display.
    pub fn rounded(&self, precision: DisplayPrecision) -> f64 {
        precision.round(self.0)
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let places = f.precision().unwrap_or(1);
        write!(f, "{:.*}%", places, self.0)
    }
}

/// Number of decimal places used when a value reaches the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DisplayPrecision(u8);

impl DisplayPrecision {
    /// Creates a precision, returning error above [`MAX_DECIMAL_PLACES`].
    pub fn try_new(decimal_places: u8) -> Result<Self, AnalyticsError> {
        if decimal_places > MAX_DECIMAL_PLACES {
            return Err(AnalyticsError::out_of_range(
                "decimal_places",
                0.0,
                f64::from(MAX_DECIMAL_PLACES),
                f64::from(decimal_places),
            ));
        }
        Ok(Self(decimal_places))
    }

    /// Returns the number of decimal places.
    pub fn decimal_places(&self) -> u8 {
        self.0
    }

    /// Rounds half away from zero to this precision.
    ///
    /// Non-finite values pass through unchanged.
    pub fn round(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return value;
        }
        let factor = 10f64.powi(i32::from(self.0));
        (value * factor).round() / factor
    }
}

impl Default for DisplayPrecision {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<u8> for DisplayPrecision {
    type Error = AnalyticsError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<DisplayPrecision> for u8 {
    fn from(precision: DisplayPrecision) -> Self {
        precision.0
    }
}
