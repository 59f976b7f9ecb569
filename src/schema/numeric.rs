//! Numeric schema validation.
//!
//! This module provides [`NumberSchema`] for validating numbers and integers
//! with inclusive minimum/maximum bounds.

use serde_json::{json, Value};
use stillwater::Validation;

use crate::context::ValidationContext;
use crate::error::{Keyword, Violation, ViolationParams, Violations};
use crate::interop::ToJsonSchema;
use crate::path::{JsonPath, SchemaPath};

use super::traits::{outcome, type_violation, SchemaLike};

/// A constraint applied to numeric values.
#[derive(Clone, Copy)]
enum NumericConstraint {
    Min(f64),
    Max(f64),
}

/// A schema for validating numeric values.
///
/// Integer schemas accept any number without a fractional part, so `3.0`
/// counts as an integer just as it does in JSON Schema.
///
/// # Example
///
/// ```rust
/// use formcheck::{Schema, SchemaDocument, SchemaRegistry};
/// use serde_json::json;
///
/// let span = Schema::integer().min(1);
/// let document = SchemaDocument::new(span, SchemaRegistry::new());
///
/// assert!(document.validate(&json!(2)).is_empty());
/// assert_eq!(document.validate(&json!(0))[0].message, "must be >= 1");
/// assert_eq!(document.validate(&json!(1.5))[0].message, "must be integer");
/// ```
#[derive(Clone)]
pub struct NumberSchema {
    integer: bool,
    constraints: Vec<NumericConstraint>,
}

impl NumberSchema {
    /// Creates a schema accepting any number.
    pub fn number() -> Self {
        Self {
            integer: false,
            constraints: Vec::new(),
        }
    }

    /// Creates a schema accepting only integers.
    pub fn integer() -> Self {
        Self {
            integer: true,
            constraints: Vec::new(),
        }
    }

    /// Adds an inclusive minimum.
    pub fn min(mut self, value: impl Into<f64>) -> Self {
        self.constraints.push(NumericConstraint::Min(value.into()));
        self
    }

    /// Adds an inclusive maximum.
    pub fn max(mut self, value: impl Into<f64>) -> Self {
        self.constraints.push(NumericConstraint::Max(value.into()));
        self
    }

    /// Requires a value of at least zero.
    pub fn non_negative(self) -> Self {
        self.min(0)
    }

    fn type_name(&self) -> &'static str {
        if self.integer {
            "integer"
        } else {
            "number"
        }
    }

    fn check(&self, n: f64, instance: &JsonPath, schema: &SchemaPath) -> Vec<Violation> {
        self.constraints
            .iter()
            .filter_map(|constraint| {
                let (keyword, comparison, limit, ok) = match *constraint {
                    NumericConstraint::Min(limit) => (Keyword::Minimum, ">=", limit, n >= limit),
                    NumericConstraint::Max(limit) => (Keyword::Maximum, "<=", limit, n <= limit),
                };
                (!ok).then(|| {
                    Violation::new(
                        instance.clone(),
                        schema.push(keyword),
                        keyword,
                        format!("must be {} {}", comparison, format_number(limit)),
                    )
                    .with_params(ViolationParams::Limit { comparison, limit })
                })
            })
            .collect()
    }
}

impl SchemaLike for NumberSchema {
    fn validate(
        &self,
        value: &Value,
        instance: &JsonPath,
        schema: &SchemaPath,
        _context: &ValidationContext,
    ) -> Validation<(), Violations> {
        match value.as_f64() {
            Some(n) if !self.integer || n.fract() == 0.0 => {
                outcome(self.check(n, instance, schema))
            }
            _ => Validation::Failure(Violations::single(type_violation(
                instance,
                schema,
                self.type_name(),
            ))),
        }
    }
}

impl ToJsonSchema for NumberSchema {
    fn to_json_schema(&self) -> Value {
        let mut schema = json!({ "type": self.type_name() });

        for constraint in &self.constraints {
            match *constraint {
                NumericConstraint::Min(limit) => schema["minimum"] = number_value(limit),
                NumericConstraint::Max(limit) => schema["maximum"] = number_value(limit),
            }
        }

        schema
    }
}

/// Formats a bound without a trailing `.0` for whole numbers.
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        json!(n as i64)
    } else {
        json!(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SchemaRegistry;

    fn run(schema: &NumberSchema, value: &Value) -> Vec<Violation> {
        let context = SchemaRegistry::new().context();
        match schema.validate(value, &JsonPath::root(), &SchemaPath::root(), &context) {
            Validation::Success(()) => Vec::new(),
            Validation::Failure(errors) => errors.into_vec(),
        }
    }

    #[test]
    fn test_number_accepts_floats_and_integers() {
        let schema = NumberSchema::number();
        assert!(run(&schema, &json!(1)).is_empty());
        assert!(run(&schema, &json!(-2.5)).is_empty());
        assert_eq!(run(&schema, &json!("1"))[0].message, "must be number");
    }

    #[test]
    fn test_integer_rejects_fractions() {
        let schema = NumberSchema::integer();
        assert!(run(&schema, &json!(4)).is_empty());
        assert!(run(&schema, &json!(4.0)).is_empty());

        let violations = run(&schema, &json!(4.5));
        assert_eq!(violations[0].message, "must be integer");
        assert_eq!(violations[0].params, ViolationParams::Type("integer"));
    }

    #[test]
    fn test_bounds_accumulate() {
        let schema = NumberSchema::integer().min(5).max(1);
        let violations = run(&schema, &json!(3));

        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].message, "must be >= 5");
        assert_eq!(violations[0].schema_path.to_string(), "#/minimum");
        assert_eq!(violations[1].message, "must be <= 1");
        assert_eq!(violations[1].keyword, Keyword::Maximum);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(0.25), "0.25");
    }

    #[test]
    fn test_to_json_schema() {
        let json = NumberSchema::integer().non_negative().to_json_schema();
        assert_eq!(json, json!({"type": "integer", "minimum": 0}));
        assert_eq!(NumberSchema::number().to_json_schema()["type"], "number");
    }
}
