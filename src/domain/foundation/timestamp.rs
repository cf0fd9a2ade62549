//! Timestamp value object for clinical observations.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::AnalyticsError;

/// Immutable point in time, always UTC.
///
/// Serializes as RFC 3339. Deserializes from RFC 3339 or a bare `YYYY-MM-DD`
/// visit date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp at midnight UTC of the given calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.and_time(chrono::NaiveTime::MIN).and_utc())
    }

    /// Parses an RFC 3339 timestamp or a `YYYY-MM-DD` visit date.
    pub fn parse(s: &str) -> Result<Self, AnalyticsError> {
        match DateTime::parse_from_rfc3339(s) {
            Ok(dt) => Ok(Self(dt.with_timezone(&Utc))),
            Err(_) => Self::parse_date(s),
        }
    }

    /// Parses a `YYYY-MM-DD` visit date.
    pub fn parse_date(s: &str) -> Result<Self, AnalyticsError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self::from_date)
            .map_err(|e| AnalyticsError::invalid_input("date", format!("'{}': {}", s, e)))
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the calendar date of this timestamp.
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
