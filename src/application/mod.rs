//! Application layer - Dashboard panel assembly.
//!
//! This layer wires configuration into the domain analytics services and
//! shapes their results into display-ready panels.

mod dashboard_analytics;

pub use dashboard_analytics::DashboardAnalytics;
