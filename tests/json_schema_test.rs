//! Tests for exporting schemas as JSON Schema documents.

use formcheck::{
    config_schema, parse_branch, Schema, SchemaDocument, SchemaLike, SchemaRegistry, ToJsonSchema,
    SCHEMA_DIALECT,
};
use serde_json::json;

#[test]
fn test_config_schema_export_shape() {
    let exported = config_schema().unwrap().to_json_schema();

    assert_eq!(exported["$schema"], SCHEMA_DIALECT);
    assert_eq!(exported["type"], "object");
    assert_eq!(exported["required"], json!(["pages"]));
    assert_eq!(exported["additionalProperties"], json!(false));
    assert_eq!(exported["properties"]["skipTeamSelection"], json!({"type": "boolean"}));
}

#[test]
fn test_every_variant_definition_parses_as_a_branch() {
    let exported = config_schema().unwrap().to_json_schema();
    let defs = exported["$defs"].as_object().unwrap();

    let mut variants = Vec::new();
    for name in defs.keys() {
        if let Some(branch) = parse_branch(&format!("#/$defs/{name}/required")) {
            variants.push(format!("{}:{}", branch.kind, branch.variant));
        }
    }

    assert_eq!(
        variants,
        [
            "widget:header",
            "widget:text",
            "widget:checkbox",
            "widget:number",
            "widget:dropdown",
            "widget:radio",
            "widget:image",
            "widget:field",
            "widget:timer",
            "widget:spacing",
            "validation:inequality",
            "validation:range",
        ]
    );
}

#[test]
fn test_widget_union_export() {
    let exported = config_schema().unwrap().to_json_schema();
    let widget = &exported["$defs"]["widget"];

    assert_eq!(widget["allOf"][0]["required"], json!(["type"]));
    assert_eq!(widget["allOf"][1]["anyOf"][0], json!({"$ref": "#/$defs/widgetHeader"}));
    assert_eq!(widget["allOf"][1]["anyOf"].as_array().unwrap().len(), 10);

    let number = &exported["$defs"]["widgetNumber"];
    assert_eq!(number["properties"]["validation"], json!({"$ref": "#/$defs/validation"}));
    assert_eq!(number["properties"]["row"], json!({"type": "integer", "minimum": 1}));
    assert_eq!(number["additionalProperties"], json!(false));
}

#[test]
fn test_validation_export() {
    let exported = config_schema().unwrap().to_json_schema();
    let defs = &exported["$defs"];

    assert_eq!(
        defs["validationInequality"]["properties"]["comparison"]["enum"],
        json!(["less", "lessOrEqual", "greater", "greaterOrEqual", "equal"])
    );
    assert_eq!(
        defs["validationRange"]["properties"]["value"],
        json!({"type": "array", "items": {"type": "number"}, "minItems": 2, "maxItems": 2})
    );
}

#[test]
fn test_custom_document_export() {
    let registry = SchemaRegistry::new();
    registry
        .register("option", Schema::string().non_empty())
        .unwrap();

    let document = SchemaDocument::checked(
        Schema::object()
            .field("options", Schema::array(Schema::ref_("option")).non_empty())
            .optional("choice", Schema::any_of(vec![
                Box::new(Schema::integer().non_negative()) as Box<dyn SchemaLike>,
                Box::new(Schema::ref_("option")) as Box<dyn SchemaLike>,
            ])),
        registry,
    )
    .unwrap();

    assert_eq!(
        document.to_json_schema(),
        json!({
            "$schema": SCHEMA_DIALECT,
            "type": "object",
            "properties": {
                "options": {"type": "array", "items": {"$ref": "#/$defs/option"}, "minItems": 1},
                "choice": {"anyOf": [
                    {"type": "integer", "minimum": 0},
                    {"$ref": "#/$defs/option"}
                ]}
            },
            "required": ["options"],
            "$defs": {"option": {"type": "string", "minLength": 1}}
        })
    );
}
