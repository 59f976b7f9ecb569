//! Error types for validation failures.
//!
//! This module provides [`Violation`] for raw schema violations,
//! [`Violations`] for accumulating them, [`ReportedError`] for the
//! human-readable report built from them, and [`ConfigError`] for the typed
//! config conversion.

mod config_error;
mod report;
mod violation;

pub use config_error::ConfigError;
pub use report::ReportedError;
pub use violation::{Keyword, Violation, ViolationParams, Violations};
