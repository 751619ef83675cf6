//! Welfare scheme eligibility matching.
//!
//! The [`eligibility`] module holds the pure evaluation engine together with the thin
//! collaborators (catalog loading, profile intake, CSV import, HTTP router) that feed it.

pub mod config;
pub mod eligibility;
pub mod error;
pub mod telemetry;
