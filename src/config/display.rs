//! Display configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::{DisplayPrecision, MAX_DECIMAL_PLACES};

/// Presentation-boundary settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Decimal places for percentages handed to the views
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u8,
}

impl DisplayConfig {
    /// Build the validated display precision
    pub fn precision(&self) -> Result<DisplayPrecision, ValidationError> {
        DisplayPrecision::try_new(self.decimal_places).map_err(|_| {
            ValidationError::InvalidDecimalPlaces {
                max: MAX_DECIMAL_PLACES,
                actual: self.decimal_places,
            }
        })
    }

    /// Validate display configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.precision().map(|_| ())
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            decimal_places: default_decimal_places(),
        }
    }
}

fn default_decimal_places() -> u8 {
    1
}
