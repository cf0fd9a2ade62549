//! Domain layer containing analytics logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `analytics` - Pure domain services for model metrics, risk tiers and cohort trends
//! - `dashboard` - Serialisable panel types rendered by the dashboard views

pub mod analytics;
pub mod dashboard;
pub mod foundation;
