//! Object schema validation.
//!
//! This module provides [`ObjectSchema`] for validating JSON objects with
//! typed properties, required properties, and additional property handling.

use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use stillwater::Validation;

use crate::context::ValidationContext;
use crate::error::{Keyword, Violation, ViolationParams, Violations};
use crate::interop::ToJsonSchema;
use crate::path::{JsonPath, SchemaPath};

use super::traits::{absorb, outcome, type_violation, SchemaLike};

/// Definition of a property within an object schema.
struct PropertyDef {
    schema: Box<dyn SchemaLike>,
    required: bool,
}

/// A schema for validating JSON objects.
///
/// Properties are checked in declaration order. Unknown properties are
/// allowed unless `additional_properties(false)` is set, in which case each
/// one produces its own `additionalProperties` violation at the object's
/// path, the way JSON Schema validators report them.
///
/// # Example
///
/// ```rust
/// use formcheck::{Schema, SchemaDocument, SchemaRegistry};
/// use serde_json::json;
///
/// let page = Schema::object()
///     .optional("name", Schema::string())
///     .field("widgets", Schema::array(Schema::object()))
///     .additional_properties(false);
///
/// let document = SchemaDocument::new(page, SchemaRegistry::new());
/// assert!(document.validate(&json!({"widgets": []})).is_empty());
///
/// let violations = document.validate(&json!({"name": "Auto", "extra": 1}));
/// assert_eq!(violations.len(), 2);
/// ```
pub struct ObjectSchema {
    properties: IndexMap<String, PropertyDef>,
    additional_properties: bool,
}

impl ObjectSchema {
    /// Creates a new object schema with no properties.
    pub fn new() -> Self {
        Self {
            properties: IndexMap::new(),
            additional_properties: true,
        }
    }

    /// Adds a required property.
    pub fn field<S>(mut self, name: impl Into<String>, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.properties.insert(
            name.into(),
            PropertyDef {
                schema: Box::new(schema),
                required: true,
            },
        );
        self
    }

    /// Adds an optional property.
    pub fn optional<S>(mut self, name: impl Into<String>, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.properties.insert(
            name.into(),
            PropertyDef {
                schema: Box::new(schema),
                required: false,
            },
        );
        self
    }

    /// Allows or rejects properties that are not declared.
    pub fn additional_properties(mut self, allow: bool) -> Self {
        self.additional_properties = allow;
        self
    }

    /// Returns true if a property with this name is declared.
    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    fn check(
        &self,
        obj: &Map<String, Value>,
        instance: &JsonPath,
        schema: &SchemaPath,
        context: &ValidationContext,
    ) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (name, def) in &self.properties {
            if def.required && !obj.contains_key(name) {
                violations.push(
                    Violation::new(
                        instance.clone(),
                        schema.push(Keyword::Required),
                        Keyword::Required,
                        format!("must have required property '{}'", name),
                    )
                    .with_params(ViolationParams::MissingProperty(name.clone())),
                );
            }
        }

        if !self.additional_properties {
            for key in obj.keys().filter(|key| !self.properties.contains_key(*key)) {
                violations.push(
                    Violation::new(
                        instance.clone(),
                        schema.push(Keyword::AdditionalProperties),
                        Keyword::AdditionalProperties,
                        "must NOT have additional properties",
                    )
                    .with_params(ViolationParams::AdditionalProperty(key.clone())),
                );
            }
        }

        let properties_path = schema.push("properties");
        for (name, def) in &self.properties {
            if let Some(property) = obj.get(name) {
                absorb(
                    def.schema.validate(
                        property,
                        &instance.push_field(name),
                        &properties_path.push(name),
                        context,
                    ),
                    &mut violations,
                );
            }
        }

        violations
    }
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for ObjectSchema {
    fn validate(
        &self,
        value: &Value,
        instance: &JsonPath,
        schema: &SchemaPath,
        context: &ValidationContext,
    ) -> Validation<(), Violations> {
        match value.as_object() {
            Some(obj) => outcome(self.check(obj, instance, schema, context)),
            None => Validation::Failure(Violations::single(type_violation(
                instance, schema, "object",
            ))),
        }
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        for def in self.properties.values() {
            def.schema.collect_refs(refs);
        }
    }
}

impl ToJsonSchema for ObjectSchema {
    fn to_json_schema(&self) -> Value {
        let mut schema = json!({ "type": "object" });

        if !self.properties.is_empty() {
            let properties: Map<String, Value> = self
                .properties
                .iter()
                .map(|(name, def)| (name.clone(), def.schema.to_json_schema()))
                .collect();
            schema["properties"] = Value::Object(properties);
        }

        let required: Vec<&String> = self
            .properties
            .iter()
            .filter(|(_, def)| def.required)
            .map(|(name, _)| name)
            .collect();
        if !required.is_empty() {
            schema["required"] = json!(required);
        }

        if !self.additional_properties {
            schema["additionalProperties"] = json!(false);
        }

        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SchemaRegistry;
    use crate::schema::Schema;
    use serde_json::json;

    fn run(schema: &ObjectSchema, value: &Value) -> Vec<Violation> {
        let context = SchemaRegistry::new().context();
        match schema.validate(value, &JsonPath::root(), &SchemaPath::root(), &context) {
            Validation::Success(()) => Vec::new(),
            Validation::Failure(errors) => errors.into_vec(),
        }
    }

    #[test]
    fn test_empty_object_schema() {
        assert!(run(&ObjectSchema::new(), &json!({})).is_empty());
    }

    #[test]
    fn test_rejects_non_object() {
        let schema = ObjectSchema::new().field("name", Schema::string());

        for value in [json!("x"), json!(42), json!(null), json!([1, 2])] {
            let violations = run(&schema, &value);
            assert_eq!(violations.len(), 1);
            assert_eq!(violations[0].keyword, Keyword::Type);
            assert_eq!(violations[0].message, "must be object");
            assert_eq!(violations[0].schema_path.to_string(), "#/type");
        }
    }

    #[test]
    fn test_required_property() {
        let schema = ObjectSchema::new().field("name", Schema::string());
        let violations = run(&schema, &json!({}));

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].keyword, Keyword::Required);
        assert_eq!(violations[0].message, "must have required property 'name'");
        assert!(violations[0].instance_path.is_root());
        assert_eq!(violations[0].schema_path.to_string(), "#/required");
    }

    #[test]
    fn test_optional_property_may_be_absent() {
        let schema = ObjectSchema::new().optional("name", Schema::string());
        assert!(run(&schema, &json!({})).is_empty());
        assert_eq!(run(&schema, &json!({"name": 3})).len(), 1);
    }

    #[test]
    fn test_nested_paths() {
        let schema = ObjectSchema::new().field("name", Schema::string());
        let violations = run(&schema, &json!({"name": 3}));

        assert_eq!(violations[0].instance_path.to_string(), "/name");
        assert_eq!(
            violations[0].schema_path.to_string(),
            "#/properties/name/type"
        );
    }

    #[test]
    fn test_additional_properties_reported_per_key() {
        let schema = ObjectSchema::new()
            .optional("name", Schema::string())
            .additional_properties(false);
        let violations = run(&schema, &json!({"name": "a", "min": 1, "max": 2}));

        assert_eq!(violations.len(), 2);
        assert!(violations
            .iter()
            .all(|v| v.keyword == Keyword::AdditionalProperties && v.instance_path.is_root()));
        assert_eq!(
            violations[0].params,
            ViolationParams::AdditionalProperty("min".to_string())
        );
    }

    #[test]
    fn test_additional_properties_allowed_by_default() {
        let schema = ObjectSchema::new().optional("name", Schema::string());
        assert!(run(&schema, &json!({"other": true})).is_empty());
    }

    #[test]
    fn test_accumulates_all_violations() {
        let schema = ObjectSchema::new()
            .field("name", Schema::string())
            .field("file", Schema::string())
            .optional("width", Schema::integer())
            .additional_properties(false);
        let violations = run(&schema, &json!({"width": "wide", "extra": 1}));

        assert_eq!(violations.len(), 4);
    }

    #[test]
    fn test_to_json_schema() {
        let schema = ObjectSchema::new()
            .field("name", Schema::string())
            .optional("row", Schema::integer())
            .additional_properties(false);
        let json = schema.to_json_schema();

        assert_eq!(json["type"], "object");
        assert_eq!(json["required"], json!(["name"]));
        assert_eq!(json["properties"]["row"]["type"], "integer");
        assert_eq!(json["additionalProperties"], json!(false));
        assert!(schema.has_property("row"));
    }
}
