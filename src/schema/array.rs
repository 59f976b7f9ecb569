//! Array schema validation.
//!
//! This module provides [`ArraySchema`] for validating arrays with an item
//! schema and item-count constraints.

use serde_json::{json, Value};
use stillwater::Validation;

use crate::context::ValidationContext;
use crate::error::{Keyword, Violation, ViolationParams, Violations};
use crate::interop::ToJsonSchema;
use crate::path::{JsonPath, SchemaPath};

use super::traits::{absorb, outcome, type_violation, SchemaLike};

/// A schema for validating arrays.
///
/// Item-count violations are reported at the array's own path; item
/// violations at each item's path under the `items` schema path.
///
/// # Example
///
/// ```rust
/// use formcheck::{Schema, SchemaDocument, SchemaRegistry};
/// use serde_json::json;
///
/// let bounds = Schema::array(Schema::number()).min_len(2).max_len(2);
/// let document = SchemaDocument::new(bounds, SchemaRegistry::new());
///
/// assert!(document.validate(&json!([10, 2])).is_empty());
/// assert_eq!(
///     document.validate(&json!([1]))[0].message,
///     "must NOT have fewer than 2 items"
/// );
/// ```
pub struct ArraySchema {
    items: Box<dyn SchemaLike>,
    min_items: Option<usize>,
    max_items: Option<usize>,
}

impl ArraySchema {
    /// Creates a new array schema with the given item schema.
    pub fn new<S>(items: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        Self {
            items: Box::new(items),
            min_items: None,
            max_items: None,
        }
    }

    /// Requires at least `min` items.
    pub fn min_len(mut self, min: usize) -> Self {
        self.min_items = Some(min);
        self
    }

    /// Requires at most `max` items.
    pub fn max_len(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    /// Requires at least one item.
    pub fn non_empty(self) -> Self {
        self.min_len(1)
    }

    fn check(
        &self,
        items: &[Value],
        instance: &JsonPath,
        schema: &SchemaPath,
        context: &ValidationContext,
    ) -> Vec<Violation> {
        let mut violations = Vec::new();

        if let Some(min) = self.min_items.filter(|min| items.len() < *min) {
            violations.push(
                Violation::new(
                    instance.clone(),
                    schema.push(Keyword::MinItems),
                    Keyword::MinItems,
                    format!("must NOT have fewer than {} items", min),
                )
                .with_params(ViolationParams::Count(min)),
            );
        }

        if let Some(max) = self.max_items.filter(|max| items.len() > *max) {
            violations.push(
                Violation::new(
                    instance.clone(),
                    schema.push(Keyword::MaxItems),
                    Keyword::MaxItems,
                    format!("must NOT have more than {} items", max),
                )
                .with_params(ViolationParams::Count(max)),
            );
        }

        let items_path = schema.push("items");
        for (index, item) in items.iter().enumerate() {
            absorb(
                self.items
                    .validate(item, &instance.push_index(index), &items_path, context),
                &mut violations,
            );
        }

        violations
    }
}

impl SchemaLike for ArraySchema {
    fn validate(
        &self,
        value: &Value,
        instance: &JsonPath,
        schema: &SchemaPath,
        context: &ValidationContext,
    ) -> Validation<(), Violations> {
        match value.as_array() {
            Some(items) => outcome(self.check(items, instance, schema, context)),
            None => Validation::Failure(Violations::single(type_violation(
                instance, schema, "array",
            ))),
        }
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        self.items.collect_refs(refs);
    }
}

impl ToJsonSchema for ArraySchema {
    fn to_json_schema(&self) -> Value {
        let mut schema = json!({
            "type": "array",
            "items": self.items.to_json_schema(),
        });

        if let Some(min) = self.min_items {
            schema["minItems"] = json!(min);
        }
        if let Some(max) = self.max_items {
            schema["maxItems"] = json!(max);
        }

        schema
    }
}
