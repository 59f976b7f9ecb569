//! Boolean schema validation.

use serde_json::{json, Value};
use stillwater::Validation;

use crate::context::ValidationContext;
use crate::error::Violations;
use crate::interop::ToJsonSchema;
use crate::path::{JsonPath, SchemaPath};

use super::traits::{type_violation, SchemaLike};

/// A schema accepting `true` or `false`.
#[derive(Clone, Copy, Default)]
pub struct BooleanSchema;

impl SchemaLike for BooleanSchema {
    fn validate(
        &self,
        value: &Value,
        instance: &JsonPath,
        schema: &SchemaPath,
        _context: &ValidationContext,
    ) -> Validation<(), Violations> {
        if value.is_boolean() {
            Validation::Success(())
        } else {
            Validation::Failure(Violations::single(type_violation(
                instance, schema, "boolean",
            )))
        }
    }
}

impl ToJsonSchema for BooleanSchema {
    fn to_json_schema(&self) -> Value {
        json!({ "type": "boolean" })
    }
}
