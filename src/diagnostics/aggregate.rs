//! Turning raw violations into readable reports.

use std::sync::OnceLock;

use indexmap::IndexMap;
use rayon::prelude::*;
use serde_json::Value;

use crate::config::schema::config_schema;
use crate::diagnostics::{classify, resolve};
use crate::document::SchemaDocument;
use crate::error::{ReportedError, Violation};
use crate::path::{JsonPath, SchemaPath};
use crate::registry::RegistryError;

/// Validates config documents and builds their diagnostic reports.
///
/// A validator owns a compiled [`SchemaDocument`] and can be shared across
/// threads. Most callers use the process-wide instance through [`validate`]
/// and [`aggregate`].
pub struct ConfigValidator {
    schema: SchemaDocument,
}

impl ConfigValidator {
    /// Builds a validator for the built-in config schema.
    pub fn new() -> Result<Self, RegistryError> {
        Ok(Self::with_schema(config_schema()?))
    }

    /// Builds a validator for a custom schema that follows the branch naming convention.
    pub fn with_schema(schema: SchemaDocument) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &SchemaDocument {
        &self.schema
    }

    /// Runs the schema pass, returning every raw violation.
    pub fn violations(&self, document: &Value) -> Vec<Violation> {
        let violations = self.schema.validate(document);
        tracing::trace!(count = violations.len(), "schema pass finished");
        violations
    }

    /// Validates `document` and returns one report per offending instance.
    pub fn aggregate(&self, document: &Value) -> Vec<ReportedError> {
        let violations = self.violations(document);
        aggregate_violations(document, &violations)
    }

    /// Aggregates several documents in parallel, one result per document in input order.
    pub fn aggregate_many(&self, documents: &[Value]) -> Vec<Vec<ReportedError>> {
        documents
            .par_iter()
            .map(|document| self.aggregate(document))
            .collect()
    }
}

/// Groups `violations` found in `document` into reports.
///
/// Violations are grouped by instance path, then by schema path, both in
/// first-occurrence order. Schema-path groups describing a variant the
/// object does not use are dropped, and instances left with no groups
/// produce no report.
pub fn aggregate_violations(document: &Value, violations: &[Violation]) -> Vec<ReportedError> {
    let mut by_instance: IndexMap<&JsonPath, IndexMap<&SchemaPath, Vec<&Violation>>> =
        IndexMap::new();
    for violation in violations {
        by_instance
            .entry(&violation.instance_path)
            .or_default()
            .entry(&violation.schema_path)
            .or_default()
            .push(violation);
    }

    let mut reports = Vec::new();
    for (instance, branches) in by_instance {
        let location = resolve(document, instance);
        let mut report = ReportedError::new(format!(
            "In {} (in {}):",
            instance, location.formatted_name
        ));

        for (schema_path, grouped) in branches {
            let descriptor = classify(schema_path, &location);
            if descriptor.is_extraneous {
                tracing::debug!(
                    instance = %instance,
                    schema_path = %schema_path,
                    skipped = grouped.len(),
                    "dropping violations from non-matching branch"
                );
                continue;
            }

            report.add_sub_entry(&descriptor.description, 1);
            for violation in grouped {
                report.add_sub_entry(violation.detail(), 2);
            }
        }

        if report.has_entries() {
            reports.push(report);
        }
    }

    reports
}

/// Returns the process-wide validator for the built-in schema.
pub fn shared() -> &'static ConfigValidator {
    static VALIDATOR: OnceLock<ConfigValidator> = OnceLock::new();
    VALIDATOR.get_or_init(|| ConfigValidator::new().expect("built-in config schema is consistent"))
}

/// Runs the built-in schema over `document`, returning every raw violation.
pub fn validate(document: &Value) -> Vec<Violation> {
    shared().violations(document)
}

/// Validates `document` against the built-in schema and builds its reports.
///
/// ```rust
/// use serde_json::json;
///
/// let reports = formcheck::aggregate(&json!({
///     "pages": [{"name": "Auto", "widgets": [{"type": "text", "name": "Notes", "min": 5}]}]
/// }));
///
/// assert_eq!(reports.len(), 1);
/// assert_eq!(reports[0].header(), "In /pages/0/widgets/0 (in Auto > Notes):");
/// assert!(reports[0].sub_entries().iter().all(|entry| !entry.contains("widgetNumber")));
/// ```
pub fn aggregate(document: &Value) -> Vec<ReportedError> {
    shared().aggregate(document)
}
