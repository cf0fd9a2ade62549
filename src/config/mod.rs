//! Application configuration module
//!
//! This module provides type-safe configuration loading using the `config`
//! and `dotenvy` crates. Values come from an optional TOML file and from
//! environment variables with the `CARE_ANALYTICS` prefix; nested values use
//! double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use care_risk_analytics::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("High risk above {}", config.risk.high_threshold);
//! ```

mod display;
mod error;
mod explainability;
mod logging;
mod risk;

pub use display::DisplayConfig;
pub use error::{ConfigError, ValidationError};
pub use explainability::{ImpactConfig, TrendConfig};
pub use logging::{LogFormat, LoggingConfig};
pub use risk::RiskConfig;

use serde::Deserialize;
use std::path::Path;

/// Environment variable naming an optional TOML configuration file
pub const CONFIG_FILE_ENV: &str = "CARE_ANALYTICS_CONFIG_FILE";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a valid
/// configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    /// Risk tier boundaries
    #[serde(default)]
    pub risk: RiskConfig,

    /// Impact tier boundaries
    #[serde(default)]
    pub impact: ImpactConfig,

    /// Trend classification
    #[serde(default)]
    pub trend: TrendConfig,

    /// Presentation rounding
    #[serde(default)]
    pub display: DisplayConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the environment
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads the TOML file named by `CARE_ANALYTICS_CONFIG_FILE`, if set
    /// 3. Overlays environment variables with `CARE_ANALYTICS` prefix
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CARE_ANALYTICS__RISK__HIGH_THRESHOLD=0.75` -> `risk.high_threshold = 0.75`
    /// - `CARE_ANALYTICS__LOGGING__FORMAT=json` -> `logging.format = json`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or values cannot be
    /// parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let file = std::env::var(CONFIG_FILE_ENV).ok();
        Self::load_from(file.as_deref().map(Path::new))
    }

    /// Load configuration from an explicit file plus the environment
    ///
    /// Environment variables take precedence over file values.
    pub fn load_from(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("CARE_ANALYTICS")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.risk.validate()?;
        self.impact.validate()?;
        self.trend.validate()?;
        self.display.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
