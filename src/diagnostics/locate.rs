//! Resolving instance paths to pages and widgets.

use serde_json::Value;

use crate::config::model::{UNNAMED_PAGE, UNNAMED_WIDGET};
use crate::path::JsonPath;

/// Label used for violations outside any page.
pub const ROOT_LABEL: &str = "[document root]";

/// Position of the page index in an instance path (`/pages/<page>`).
const PAGE_SEGMENT: usize = 1;
/// Position of the widget index in an instance path (`/pages/<page>/widgets/<widget>`).
const WIDGET_SEGMENT: usize = 3;

/// Where in the document a violation occurred.
///
/// All values are borrowed from the validated document.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation<'a> {
    /// `"<page> > <widget>"`, the page label alone, or [`ROOT_LABEL`].
    pub formatted_name: String,
    /// The addressed object, or the parent of an addressed array or scalar.
    pub containing_object: Option<&'a Value>,
    /// The widget the path points into, if any.
    pub containing_widget: Option<&'a Value>,
}

impl ResolvedLocation<'_> {
    /// The location of anything not inside a page.
    pub fn document_root() -> Self {
        Self {
            formatted_name: ROOT_LABEL.to_string(),
            containing_object: None,
            containing_widget: None,
        }
    }
}

/// Resolves `path` against `document`.
///
/// ```rust
/// use formcheck::{resolve, JsonPath};
/// use serde_json::json;
///
/// let config = json!({"pages": [{"name": "Auto", "widgets": [{"type": "text"}]}]});
///
/// let location = resolve(&config, &JsonPath::parse("/pages/0/widgets/0/name"));
/// assert_eq!(location.formatted_name, "Auto > [Unnamed widget]");
/// assert_eq!(location.containing_widget, Some(&json!({"type": "text"})));
///
/// assert_eq!(resolve(&config, &JsonPath::parse("/pages/4")).formatted_name, "[document root]");
/// ```
pub fn resolve<'a>(document: &'a Value, path: &JsonPath) -> ResolvedLocation<'a> {
    let Some(page) = element(document.get("pages"), path, PAGE_SEGMENT) else {
        return ResolvedLocation::document_root();
    };
    let widget = element(page.get("widgets"), path, WIDGET_SEGMENT);

    let mut formatted_name = label(page, UNNAMED_PAGE);
    if let Some(widget) = widget {
        formatted_name.push_str(" > ");
        formatted_name.push_str(&label(widget, UNNAMED_WIDGET));
    }

    let containing_object = match path.lookup(document) {
        Some(value @ Value::Object(_)) => Some(value),
        _ => path.parent().and_then(|parent| parent.lookup(document)),
    };

    ResolvedLocation {
        formatted_name,
        containing_object,
        containing_widget: widget,
    }
}

/// Indexes `array` by the path segment at `position`.
///
/// Falsy entries (`null`, `false`, `0`, `""`) count as absent.
fn element<'a>(array: Option<&'a Value>, path: &JsonPath, position: usize) -> Option<&'a Value> {
    let index = path.get(position)?.as_index()?;
    array?.as_array()?.get(index).filter(|value| is_truthy(value))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn label(entity: &Value, placeholder: &str) -> String {
    match entity.get("name") {
        None | Some(Value::Null) => placeholder.to_string(),
        Some(Value::String(name)) => name.clone(),
        Some(other) => other.to_string(),
    }
}
