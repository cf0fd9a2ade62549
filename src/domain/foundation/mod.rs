//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the analytics layer.

mod errors;
mod ids;
mod percentage;
mod timestamp;

pub use errors::{AnalyticsError, ErrorCode};
pub(crate) use errors::ensure_unit_interval;
pub use ids::PatientId;
pub use percentage::{DisplayPrecision, Percentage, MAX_DECIMAL_PLACES};
pub use timestamp::Timestamp;
