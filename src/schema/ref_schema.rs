//! Schema reference type for registry-based validation.
//!
//! This module provides [`RefSchema`], a reference to a named definition in a
//! [`SchemaRegistry`](crate::SchemaRegistry). Violations raised inside the
//! referenced definition carry schema paths rooted at `#/$defs/<name>`, which
//! is what lets diagnostics tell variant branches apart.

use serde_json::{json, Value};
use stillwater::Validation;

use crate::context::ValidationContext;
use crate::error::{Keyword, Violation, ViolationParams, Violations};
use crate::interop::ToJsonSchema;
use crate::path::{JsonPath, SchemaPath};

use super::traits::SchemaLike;

/// A schema that references a named definition.
///
/// # Example
///
/// ```rust
/// use formcheck::{Schema, SchemaDocument, SchemaRegistry};
/// use serde_json::json;
///
/// let registry = SchemaRegistry::new();
/// registry.register("label", Schema::string().non_empty()).unwrap();
///
/// let document = SchemaDocument::new(
///     Schema::object().field("name", Schema::ref_("label")),
///     registry,
/// );
///
/// let violations = document.validate(&json!({"name": ""}));
/// assert_eq!(violations[0].schema_path.to_string(), "#/$defs/label/minLength");
/// ```
pub struct RefSchema {
    name: String,
}

impl RefSchema {
    /// Creates a new schema reference.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the name of the referenced definition.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn unresolved(&self, instance: &JsonPath, schema: &SchemaPath, message: String) -> Violation {
        Violation::new(instance.clone(), schema.push(Keyword::Ref), Keyword::Ref, message)
            .with_params(ViolationParams::Reference(self.name.clone()))
    }
}

impl SchemaLike for RefSchema {
    fn validate(
        &self,
        value: &Value,
        instance: &JsonPath,
        schema: &SchemaPath,
        context: &ValidationContext,
    ) -> Validation<(), Violations> {
        if context.depth() >= context.max_depth() {
            return Validation::Failure(Violations::single(self.unresolved(
                instance,
                schema,
                format!(
                    "maximum reference depth {} exceeded resolving '{}'",
                    context.max_depth(),
                    self.name
                ),
            )));
        }

        let Some(definition) = context.registry().get_schema(&self.name) else {
            return Validation::Failure(Violations::single(self.unresolved(
                instance,
                schema,
                format!("can't resolve reference #/$defs/{}", self.name),
            )));
        };

        definition.validate(
            value,
            instance,
            &SchemaPath::definition(&self.name),
            &context.increment_depth(),
        )
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        refs.push(self.name.clone());
    }
}

impl ToJsonSchema for RefSchema {
    fn to_json_schema(&self) -> Value {
        json!({ "$ref": format!("#/$defs/{}", self.name) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SchemaRegistry;
    use crate::schema::Schema;

    fn run(registry: &SchemaRegistry, schema: &RefSchema, value: &Value) -> Vec<Violation> {
        let context = registry.context();
        match schema.validate(value, &JsonPath::root(), &SchemaPath::root(), &context) {
            Validation::Success(()) => Vec::new(),
            Validation::Failure(errors) => errors.into_vec(),
        }
    }

    #[test]
    fn test_missing_definition() {
        let violations = run(&SchemaRegistry::new(), &RefSchema::new("page"), &json!({}));

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].keyword, Keyword::Ref);
        assert_eq!(violations[0].message, "can't resolve reference #/$defs/page");
        assert_eq!(violations[0].schema_path.to_string(), "#/$ref");
    }

    #[test]
    fn test_schema_path_restarts_at_definition() {
        let registry = SchemaRegistry::new();
        registry
            .register("widgetText", Schema::object().field("name", Schema::string()))
            .unwrap();

        let violations = run(&registry, &RefSchema::new("widgetText"), &json!({}));
        assert_eq!(
            violations[0].schema_path.to_string(),
            "#/$defs/widgetText/required"
        );
    }

    #[test]
    fn test_depth_limit() {
        let registry = SchemaRegistry::new().with_max_depth(3);
        registry
            .register(
                "node",
                Schema::object().optional("child", Schema::ref_("node")),
            )
            .unwrap();

        let value = json!({"child": {"child": {"child": {"child": {}}}}});
        let violations = run(&registry, &RefSchema::new("node"), &value);

        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("maximum reference depth 3"));
        assert_eq!(violations[0].instance_path.to_string(), "/child/child/child");
    }

    #[test]
    fn test_to_json_schema() {
        assert_eq!(
            RefSchema::new("page").to_json_schema(),
            json!({"$ref": "#/$defs/page"})
        );
    }
}
