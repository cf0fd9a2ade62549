//! Care Risk Analytics - Analytics core for a clinical risk dashboard
//!
//! This crate turns model evaluation counts, patient risk scores, feature
//! importances, visit histories and intervention outcomes into the derived
//! quantities and display panels a care-management dashboard renders.

pub mod application;
pub mod config;
pub mod domain;
pub mod telemetry;
