//! Errors from converting raw JSON into the typed config model.

use crate::error::ReportedError;

/// Why a config document could not be turned into a
/// [`ConfigDocument`](crate::config::ConfigDocument).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The input is not syntactically valid JSON.
    #[error("config is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// The document violates the config schema.
    #[error("config failed validation with {} error(s):\n{}", .0.len(), render(.0))]
    Invalid(Vec<ReportedError>),

    /// The document passed the schema but still could not be deserialized.
    #[error("config could not be converted: {0}")]
    Malformed(#[source] serde_json::Error),
}

impl ConfigError {
    /// Returns the validation reports if this is an `Invalid` error.
    pub fn reports(&self) -> &[ReportedError] {
        match self {
            ConfigError::Invalid(reports) => reports,
            _ => &[],
        }
    }
}

fn render(reports: &[ReportedError]) -> String {
    reports
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
