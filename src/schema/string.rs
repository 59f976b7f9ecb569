//! String schema validation.
//!
//! This module provides [`StringSchema`] for validating string values with
//! length, constant, and enumeration constraints.

use serde_json::{json, Value};
use stillwater::Validation;

use crate::context::ValidationContext;
use crate::error::{Keyword, Violation, ViolationParams, Violations};
use crate::interop::ToJsonSchema;
use crate::path::{JsonPath, SchemaPath};

use super::traits::{outcome, type_violation, SchemaLike};

/// A constraint applied to string values.
#[derive(Clone)]
enum StringConstraint {
    MinLength(usize),
    Const(String),
    Enum(Vec<String>),
}

/// A schema for validating string values.
///
/// A non-string value yields a single `type` violation; otherwise every
/// failing constraint is reported.
///
/// # Example
///
/// ```rust
/// use formcheck::{Schema, SchemaDocument, SchemaRegistry};
/// use serde_json::json;
///
/// let align = Schema::string().one_of(["left", "center", "right"]);
/// let document = SchemaDocument::new(align, SchemaRegistry::new());
///
/// assert!(document.validate(&json!("left")).is_empty());
/// assert_eq!(
///     document.validate(&json!("middle"))[0].message,
///     "must be equal to one of the allowed values"
/// );
/// ```
#[derive(Clone, Default)]
pub struct StringSchema {
    constraints: Vec<StringConstraint>,
}

impl StringSchema {
    /// Creates a new string schema with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires at least `min` characters.
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints.push(StringConstraint::MinLength(min));
        self
    }

    /// Requires the string to be at least one character long.
    pub fn non_empty(self) -> Self {
        self.min_len(1)
    }

    /// Requires the string to equal `value` exactly.
    pub fn constant(mut self, value: impl Into<String>) -> Self {
        self.constraints.push(StringConstraint::Const(value.into()));
        self
    }

    /// Requires the string to be one of `values`.
    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints.push(StringConstraint::Enum(
            values.into_iter().map(Into::into).collect(),
        ));
        self
    }

    fn check(&self, s: &str, instance: &JsonPath, schema: &SchemaPath) -> Vec<Violation> {
        let mut violations = Vec::new();

        for constraint in &self.constraints {
            match constraint {
                StringConstraint::MinLength(min) => {
                    if s.chars().count() < *min {
                        violations.push(
                            Violation::new(
                                instance.clone(),
                                schema.push(Keyword::MinLength),
                                Keyword::MinLength,
                                format!("must NOT have fewer than {} characters", min),
                            )
                            .with_params(ViolationParams::Count(*min)),
                        );
                    }
                }
                StringConstraint::Const(expected) => {
                    if s != expected {
                        violations.push(
                            Violation::new(
                                instance.clone(),
                                schema.push(Keyword::Const),
                                Keyword::Const,
                                "must be equal to constant",
                            )
                            .with_params(ViolationParams::AllowedValue(json!(expected))),
                        );
                    }
                }
                StringConstraint::Enum(allowed) => {
                    if !allowed.iter().any(|candidate| candidate == s) {
                        violations.push(
                            Violation::new(
                                instance.clone(),
                                schema.push(Keyword::Enum),
                                Keyword::Enum,
                                "must be equal to one of the allowed values",
                            )
                            .with_params(ViolationParams::AllowedValues(
                                allowed.iter().map(|a| json!(a)).collect(),
                            )),
                        );
                    }
                }
            }
        }

        violations
    }
}

impl SchemaLike for StringSchema {
    fn validate(
        &self,
        value: &Value,
        instance: &JsonPath,
        schema: &SchemaPath,
        _context: &ValidationContext,
    ) -> Validation<(), Violations> {
        match value.as_str() {
            Some(s) => outcome(self.check(s, instance, schema)),
            None => Validation::Failure(Violations::single(type_violation(
                instance, schema, "string",
            ))),
        }
    }
}

impl ToJsonSchema for StringSchema {
    fn to_json_schema(&self) -> Value {
        let mut schema = json!({ "type": "string" });

        for constraint in &self.constraints {
            match constraint {
                StringConstraint::MinLength(min) => schema["minLength"] = json!(min),
                StringConstraint::Const(value) => schema["const"] = json!(value),
                StringConstraint::Enum(values) => schema["enum"] = json!(values),
            }
        }

        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SchemaRegistry;

    fn run(schema: &StringSchema, value: &Value) -> Vec<Violation> {
        let context = SchemaRegistry::new().context();
        let path = SchemaPath::definition("widgetText")
            .push("properties")
            .push("type");
        match schema.validate(value, &JsonPath::parse("/type"), &path, &context) {
            Validation::Success(()) => Vec::new(),
            Validation::Failure(errors) => errors.into_vec(),
        }
    }

    #[test]
    fn test_rejects_non_string() {
        let violations = run(&StringSchema::new().constant("text"), &json!(5));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].keyword, Keyword::Type);
        assert_eq!(
            violations[0].schema_path.to_string(),
            "#/$defs/widgetText/properties/type/type"
        );
    }

    #[test]
    fn test_constant() {
        let schema = StringSchema::new().constant("text");
        assert!(run(&schema, &json!("text")).is_empty());

        let violations = run(&schema, &json!("number"));
        assert_eq!(violations[0].keyword, Keyword::Const);
        assert_eq!(
            violations[0].schema_path.to_string(),
            "#/$defs/widgetText/properties/type/const"
        );
        assert_eq!(
            violations[0].params,
            ViolationParams::AllowedValue(json!("text"))
        );
    }

    #[test]
    fn test_enum() {
        let schema = StringSchema::new().one_of(["less", "greater"]);
        assert!(run(&schema, &json!("less")).is_empty());

        let violations = run(&schema, &json!("inRange"));
        assert_eq!(
            violations[0].params,
            ViolationParams::AllowedValues(vec![json!("less"), json!("greater")])
        );
    }

    #[test]
    fn test_min_len_counts_characters() {
        let schema = StringSchema::new().non_empty();
        assert!(run(&schema, &json!("é")).is_empty());

        let violations = run(&schema, &json!(""));
        assert_eq!(violations[0].message, "must NOT have fewer than 1 characters");
    }

    #[test]
    fn test_to_json_schema() {
        let json = StringSchema::new().min_len(1).one_of(["a", "b"]).to_json_schema();
        assert_eq!(json["type"], "string");
        assert_eq!(json["minLength"], 1);
        assert_eq!(json["enum"], json!(["a", "b"]));
    }
}
