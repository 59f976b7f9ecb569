//! Traits for schema polymorphism.
//!
//! This module provides the [`SchemaLike`] trait that lets different schema
//! types (string, number, object, etc.) be composed for nested validation.

use serde_json::Value;
use stillwater::Validation;

use crate::context::ValidationContext;
use crate::error::{Keyword, Violation, ViolationParams, Violations};
use crate::interop::ToJsonSchema;
use crate::path::{JsonPath, SchemaPath};

/// A schema that can check a JSON value and report every violation.
///
/// `instance` is where `value` sits in the document; `schema` is where this
/// schema sits in the schema document. Implementations append their keyword
/// to `schema` when they report a violation, and never stop at the first one
/// except where a type mismatch makes the remaining keywords meaningless.
///
/// The `Send + Sync` bounds allow schemas to be shared across threads
/// behind `Arc<dyn SchemaLike>`.
pub trait SchemaLike: ToJsonSchema + Send + Sync {
    /// Validates a value against this schema.
    fn validate(
        &self,
        value: &Value,
        instance: &JsonPath,
        schema: &SchemaPath,
        context: &ValidationContext,
    ) -> Validation<(), Violations>;

    /// Collects the names of all definitions this schema references.
    fn collect_refs(&self, _refs: &mut Vec<String>) {}
}

/// Turns accumulated violations into a validation result.
pub(crate) fn outcome(violations: Vec<Violation>) -> Validation<(), Violations> {
    match Violations::from_vec(violations) {
        Some(errors) => Validation::Failure(errors),
        None => Validation::Success(()),
    }
}

/// Moves the violations of a failed result into `into`.
pub(crate) fn absorb(result: Validation<(), Violations>, into: &mut Vec<Violation>) {
    if let Validation::Failure(errors) = result {
        into.extend(errors);
    }
}

/// Builds the violation for a value of the wrong JSON type.
pub(crate) fn type_violation(
    instance: &JsonPath,
    schema: &SchemaPath,
    expected: &'static str,
) -> Violation {
    Violation::new(
        instance.clone(),
        schema.push(Keyword::Type),
        Keyword::Type,
        format!("must be {}", expected),
    )
    .with_params(ViolationParams::Type(expected))
}
