//! The built-in config schema.
//!
//! Definitions follow the `<kind><Variant>` naming convention
//! (`widgetText`, `validationRange`, ...). The diagnostics matcher reads
//! variant names back out of schema paths, so every branch of a
//! discriminated union must be registered under that convention.

use crate::config::discriminant::{ComparisonFamily, DiscriminantKind};
use crate::config::model::{Align, WidgetKind};
use crate::document::SchemaDocument;
use crate::registry::{RegistryError, SchemaRegistry};
use crate::schema::{ObjectSchema, Schema, SchemaLike};

/// Definition name of a page.
pub const PAGE_DEF: &str = "page";

/// Builds the config schema document.
///
/// # Errors
///
/// Returns a `RegistryError` if a definition is registered twice or a
/// reference does not resolve.
///
/// ```rust
/// use formcheck::config_schema;
///
/// let schema = config_schema().unwrap();
/// let names = schema.registry().names();
/// assert!(names.iter().any(|name| name == "widgetTimer"));
/// assert!(names.iter().any(|name| name == "validationRange"));
/// ```
pub fn config_schema() -> Result<SchemaDocument, RegistryError> {
    let registry = SchemaRegistry::new();

    registry.register(
        PAGE_DEF,
        Schema::object()
            .optional("name", Schema::string())
            .field("widgets", Schema::array(Schema::ref_(DiscriminantKind::Widget.name())))
            .additional_properties(false),
    )?;

    registry.register(DiscriminantKind::Widget.name(), widget_union())?;
    for kind in WidgetKind::ALL {
        registry.register(
            DiscriminantKind::Widget.branch_name(kind.name()),
            widget_branch(kind),
        )?;
    }

    registry.register(DiscriminantKind::Validation.name(), validation_union())?;
    for family in ComparisonFamily::ALL {
        registry.register(
            DiscriminantKind::Validation.branch_name(family.name()),
            validation_branch(family),
        )?;
    }

    let root = Schema::object()
        .optional("$schema", Schema::string())
        .optional("heading", Schema::string())
        .optional("logo", Schema::string())
        .optional("skipTeamSelection", Schema::boolean())
        .optional("forceQualifiers", Schema::boolean())
        .field("pages", Schema::array(Schema::ref_(PAGE_DEF)))
        .additional_properties(false);

    SchemaDocument::checked(root, registry)
}

fn widget_union() -> impl SchemaLike {
    let branches: Vec<Box<dyn SchemaLike>> = WidgetKind::ALL
        .into_iter()
        .map(|kind| {
            Box::new(Schema::ref_(DiscriminantKind::Widget.branch_name(kind.name())))
                as Box<dyn SchemaLike>
        })
        .collect();

    let discriminant =
        Schema::object().field("type", Schema::string().one_of(WidgetKind::ALL.map(|k| k.name())));

    Schema::all_of(vec![
        Box::new(discriminant) as Box<dyn SchemaLike>,
        Box::new(Schema::any_of(branches)),
    ])
}

fn widget_branch(kind: WidgetKind) -> ObjectSchema {
    let branch = with_layout(
        Schema::object().field("type", Schema::string().constant(kind.name())),
    );

    let branch = match kind {
        WidgetKind::Header | WidgetKind::Text | WidgetKind::Checkbox => {
            branch.field("name", Schema::string().non_empty())
        }
        WidgetKind::Number => branch
            .field("name", Schema::string().non_empty())
            .optional("default", Schema::number())
            .optional("min", Schema::number())
            .optional("max", Schema::number())
            .optional("allowKeyboardInput", Schema::boolean())
            .optional("validation", Schema::ref_(DiscriminantKind::Validation.name())),
        WidgetKind::Dropdown | WidgetKind::Radio => branch
            .field("name", Schema::string().non_empty())
            .field("options", Schema::array(Schema::string()).non_empty())
            .optional("defaultOption", Schema::boolean()),
        WidgetKind::Image => branch
            .field("file", Schema::string().non_empty())
            .optional("width", Schema::integer().non_negative())
            .optional("height", Schema::integer().non_negative()),
        WidgetKind::Field => branch
            .field("name", Schema::string().non_empty())
            .field("file", Schema::string().non_empty())
            .optional("width", Schema::integer().non_negative())
            .optional("height", Schema::integer().non_negative())
            .optional("allowMultiple", Schema::boolean())
            .optional("selectRadius", Schema::integer().min(1))
            .optional("selectColor", Schema::string()),
        WidgetKind::Timer => branch
            .field("name", Schema::string().non_empty())
            .optional("startLabel", Schema::string())
            .optional("lapLabel", Schema::string())
            .optional("stopLabel", Schema::string())
            .optional("maxLaps", Schema::integer().min(1)),
        WidgetKind::Spacing => branch,
    };

    branch.additional_properties(false)
}

fn with_layout(schema: ObjectSchema) -> ObjectSchema {
    schema
        .optional("prefix", Schema::string())
        .optional("align", Schema::string().one_of(Align::ALL.map(|a| a.name())))
        .optional("noLabel", Schema::boolean())
        .optional("row", Schema::integer().min(1))
        .optional("col", Schema::integer().min(1))
        .optional("rowspan", Schema::integer().min(1))
        .optional("colspan", Schema::integer().min(1))
        .optional("labelColspan", Schema::integer().min(1))
}

fn validation_union() -> impl SchemaLike {
    let all_names: Vec<&'static str> = ComparisonFamily::ALL
        .iter()
        .flat_map(ComparisonFamily::comparison_names)
        .collect();

    let branches: Vec<Box<dyn SchemaLike>> = ComparisonFamily::ALL
        .into_iter()
        .map(|family| {
            Box::new(Schema::ref_(DiscriminantKind::Validation.branch_name(family.name())))
                as Box<dyn SchemaLike>
        })
        .collect();

    let discriminant = Schema::object().field("comparison", Schema::string().one_of(all_names));

    Schema::all_of(vec![
        Box::new(discriminant) as Box<dyn SchemaLike>,
        Box::new(Schema::any_of(branches)),
    ])
}

fn validation_branch(family: ComparisonFamily) -> ObjectSchema {
    let comparison = Schema::string().one_of(family.comparison_names());
    let branch = Schema::object().field("comparison", comparison);

    let branch = match family {
        ComparisonFamily::Inequality => branch.field("value", Schema::number()),
        ComparisonFamily::Range => branch.field(
            "value",
            Schema::array(Schema::number()).min_len(2).max_len(2),
        ),
    };

    branch.additional_properties(false)
}
