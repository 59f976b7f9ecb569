//! Schema combinators for composing validation logic.
//!
//! - `any_of`: at least one schema must match (discriminated unions)
//! - `all_of`: every schema must match (shared constraints plus a union)
//!
//! Unlike a short-circuiting union, `any_of` evaluates every branch and, when
//! none matches, reports the violations of *all* branches followed by its own
//! `anyOf` violation. Downstream diagnostics rely on seeing every branch.

use serde_json::{json, Value};
use stillwater::Validation;

use crate::context::ValidationContext;
use crate::error::{Keyword, Violation, Violations};
use crate::interop::ToJsonSchema;
use crate::path::{JsonPath, SchemaPath};

use super::traits::{absorb, outcome, SchemaLike};

/// Schema combinators.
pub enum CombinatorSchema {
    /// At least one schema must match.
    AnyOf(Vec<Box<dyn SchemaLike>>),

    /// All schemas must match.
    AllOf(Vec<Box<dyn SchemaLike>>),
}

impl CombinatorSchema {
    fn validate_any_of(
        schemas: &[Box<dyn SchemaLike>],
        value: &Value,
        instance: &JsonPath,
        schema: &SchemaPath,
        context: &ValidationContext,
    ) -> Validation<(), Violations> {
        let base = schema.push(Keyword::AnyOf);
        let mut violations = Vec::new();

        for (index, branch) in schemas.iter().enumerate() {
            match branch.validate(value, instance, &base.push(index), context) {
                Validation::Success(()) => return Validation::Success(()),
                Validation::Failure(errors) => violations.extend(errors),
            }
        }

        violations.push(Violation::new(
            instance.clone(),
            base,
            Keyword::AnyOf,
            "must match a schema in anyOf",
        ));
        outcome(violations)
    }

    fn validate_all_of(
        schemas: &[Box<dyn SchemaLike>],
        value: &Value,
        instance: &JsonPath,
        schema: &SchemaPath,
        context: &ValidationContext,
    ) -> Validation<(), Violations> {
        let base = schema.push("allOf");
        let mut violations = Vec::new();

        for (index, branch) in schemas.iter().enumerate() {
            absorb(
                branch.validate(value, instance, &base.push(index), context),
                &mut violations,
            );
        }

        outcome(violations)
    }

    fn branches(&self) -> &[Box<dyn SchemaLike>] {
        match self {
            CombinatorSchema::AnyOf(schemas) | CombinatorSchema::AllOf(schemas) => schemas,
        }
    }
}

impl SchemaLike for CombinatorSchema {
    fn validate(
        &self,
        value: &Value,
        instance: &JsonPath,
        schema: &SchemaPath,
        context: &ValidationContext,
    ) -> Validation<(), Violations> {
        match self {
            CombinatorSchema::AnyOf(schemas) => {
                Self::validate_any_of(schemas, value, instance, schema, context)
            }
            CombinatorSchema::AllOf(schemas) => {
                Self::validate_all_of(schemas, value, instance, schema, context)
            }
        }
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        for schema in self.branches() {
            schema.collect_refs(refs);
        }
    }
}

impl ToJsonSchema for CombinatorSchema {
    fn to_json_schema(&self) -> Value {
        let branches: Vec<Value> = self
            .branches()
            .iter()
            .map(|schema| schema.to_json_schema())
            .collect();

        match self {
            CombinatorSchema::AnyOf(_) => json!({ "anyOf": branches }),
            CombinatorSchema::AllOf(_) => json!({ "allOf": branches }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SchemaRegistry;
    use crate::schema::Schema;

    fn run(schema: &CombinatorSchema, value: &Value) -> Vec<Violation> {
        let context = SchemaRegistry::new().context();
        match schema.validate(value, &JsonPath::root(), &SchemaPath::root(), &context) {
            Validation::Success(()) => Vec::new(),
            Validation::Failure(errors) => errors.into_vec(),
        }
    }

    fn id_schema() -> CombinatorSchema {
        Schema::any_of(vec![
            Box::new(Schema::string().non_empty()) as Box<dyn SchemaLike>,
            Box::new(Schema::integer().min(1)) as Box<dyn SchemaLike>,
        ])
    }

    #[test]
    fn test_any_of_first_match() {
        assert!(run(&id_schema(), &json!("abc")).is_empty());
    }

    #[test]
    fn test_any_of_later_match() {
        assert!(run(&id_schema(), &json!(5)).is_empty());
    }

    #[test]
    fn test_any_of_reports_every_branch() {
        let violations = run(&id_schema(), &json!(0));
        let paths: Vec<String> = violations
            .iter()
            .map(|v| v.schema_path.to_string())
            .collect();

        assert_eq!(paths, vec!["#/anyOf/0/type", "#/anyOf/1/minimum", "#/anyOf"]);
        assert_eq!(violations[2].keyword, Keyword::AnyOf);
        assert_eq!(violations[2].message, "must match a schema in anyOf");
    }

    #[test]
    fn test_all_of_accumulates() {
        let schema = Schema::all_of(vec![
            Box::new(Schema::object().field("type", Schema::string())) as Box<dyn SchemaLike>,
            Box::new(Schema::object().field("name", Schema::string())) as Box<dyn SchemaLike>,
        ]);

        assert!(run(&schema, &json!({"type": "a", "name": "b"})).is_empty());

        let violations = run(&schema, &json!({}));
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].schema_path.to_string(), "#/allOf/0/required");
        assert_eq!(violations[1].schema_path.to_string(), "#/allOf/1/required");
    }

    #[test]
    fn test_to_json_schema() {
        let json = id_schema().to_json_schema();
        assert_eq!(json["anyOf"][0]["type"], "string");
        assert_eq!(json["anyOf"][1]["type"], "integer");
    }
}
