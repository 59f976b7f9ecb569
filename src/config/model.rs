//! Typed config model.
//!
//! The document is modelled as real discriminated unions: each [`Widget`]
//! case carries only the fields legal for its `type`, and a
//! [`WidgetValidation`] is either a single-bound or a range comparison.
//! Raw JSON only becomes a [`ConfigDocument`] through
//! [`ConfigDocument::from_value`], which runs the schema diagnostics first.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::discriminant::{InequalityComparison, RangeComparison};
use crate::diagnostics;
use crate::error::ConfigError;

/// Label shown for a page without a name.
pub const UNNAMED_PAGE: &str = "[Unnamed page]";
/// Label shown for a widget without a name.
pub const UNNAMED_WIDGET: &str = "[Unnamed widget]";

/// A complete form config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_team_selection: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_qualifiers: Option<bool>,
    pub pages: Vec<Page>,
}

impl ConfigDocument {
    /// Converts a raw JSON document, validating it against the config schema first.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` with every report when the schema pass
    /// finds problems, or `ConfigError::Malformed` if deserialization still fails.
    ///
    /// ```rust
    /// use formcheck::{ConfigDocument, ConfigError, Widget};
    /// use serde_json::json;
    ///
    /// let config = ConfigDocument::from_value(json!({
    ///     "pages": [{"name": "Auto", "widgets": [{"type": "checkbox", "name": "Moved"}]}]
    /// })).unwrap();
    /// assert!(matches!(config.pages[0].widgets[0], Widget::Checkbox(_)));
    ///
    /// let err = ConfigDocument::from_value(json!({"pages": [{"widgets": [{"type": "clock"}]}]}));
    /// assert!(matches!(err, Err(ConfigError::Invalid(_))));
    /// ```
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let reports = diagnostics::aggregate(&value);
        if !reports.is_empty() {
            return Err(ConfigError::Invalid(reports));
        }
        serde_json::from_value(value).map_err(ConfigError::Malformed)
    }

    /// Parses and converts a JSON string.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(input).map_err(ConfigError::Parse)?;
        Self::from_value(value)
    }

    /// Iterates over every widget of every page, in document order.
    pub fn widgets(&self) -> impl Iterator<Item = &Widget> {
        self.pages.iter().flat_map(|page| page.widgets.iter())
    }
}

impl FromStr for ConfigDocument {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json_str(s)
    }
}

/// An ordered group of widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub widgets: Vec<Widget>,
}

impl Page {
    /// Returns the page name, or the unnamed placeholder.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED_PAGE)
    }
}

/// Horizontal alignment of a widget in its grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    pub const ALL: [Align; 3] = [Align::Left, Align::Center, Align::Right];

    pub fn name(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

/// Layout hints accepted by every widget type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_label: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rowspan: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colspan: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_colspan: Option<u32>,
}

/// The widget types a config may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Header,
    Text,
    Checkbox,
    Number,
    Dropdown,
    Radio,
    Image,
    Field,
    Timer,
    Spacing,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 10] = [
        WidgetKind::Header,
        WidgetKind::Text,
        WidgetKind::Checkbox,
        WidgetKind::Number,
        WidgetKind::Dropdown,
        WidgetKind::Radio,
        WidgetKind::Image,
        WidgetKind::Field,
        WidgetKind::Timer,
        WidgetKind::Spacing,
    ];

    /// Returns the `type` value of this widget kind.
    pub fn name(&self) -> &'static str {
        match self {
            WidgetKind::Header => "header",
            WidgetKind::Text => "text",
            WidgetKind::Checkbox => "checkbox",
            WidgetKind::Number => "number",
            WidgetKind::Dropdown => "dropdown",
            WidgetKind::Radio => "radio",
            WidgetKind::Image => "image",
            WidgetKind::Field => "field",
            WidgetKind::Timer => "timer",
            WidgetKind::Spacing => "spacing",
        }
    }

    /// Looks a kind up by its exact `type` value.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A form widget, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Widget {
    Header(LabelWidget),
    Text(LabelWidget),
    Checkbox(LabelWidget),
    Number(NumberWidget),
    Dropdown(ChoiceWidget),
    Radio(ChoiceWidget),
    Image(ImageWidget),
    Field(FieldWidget),
    Timer(TimerWidget),
    Spacing(SpacingWidget),
}

impl Widget {
    /// Returns the kind of this widget.
    pub fn kind(&self) -> WidgetKind {
        match self {
            Widget::Header(_) => WidgetKind::Header,
            Widget::Text(_) => WidgetKind::Text,
            Widget::Checkbox(_) => WidgetKind::Checkbox,
            Widget::Number(_) => WidgetKind::Number,
            Widget::Dropdown(_) => WidgetKind::Dropdown,
            Widget::Radio(_) => WidgetKind::Radio,
            Widget::Image(_) => WidgetKind::Image,
            Widget::Field(_) => WidgetKind::Field,
            Widget::Timer(_) => WidgetKind::Timer,
            Widget::Spacing(_) => WidgetKind::Spacing,
        }
    }

    /// Returns the widget's name, if its type has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Widget::Header(w) | Widget::Text(w) | Widget::Checkbox(w) => Some(&w.name),
            Widget::Number(w) => Some(&w.name),
            Widget::Dropdown(w) | Widget::Radio(w) => Some(&w.name),
            Widget::Field(w) => Some(&w.name),
            Widget::Timer(w) => Some(&w.name),
            Widget::Image(_) | Widget::Spacing(_) => None,
        }
    }

    /// Returns the widget name, or the unnamed placeholder.
    pub fn label(&self) -> &str {
        self.name().unwrap_or(UNNAMED_WIDGET)
    }

    /// Returns the layout hints shared by every widget type.
    pub fn layout(&self) -> &Layout {
        match self {
            Widget::Header(w) | Widget::Text(w) | Widget::Checkbox(w) => &w.layout,
            Widget::Number(w) => &w.layout,
            Widget::Dropdown(w) | Widget::Radio(w) => &w.layout,
            Widget::Image(w) => &w.layout,
            Widget::Field(w) => &w.layout,
            Widget::Timer(w) => &w.layout,
            Widget::Spacing(w) => &w.layout,
        }
    }
}

/// A widget that only carries a name (headers, text inputs, checkboxes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelWidget {
    pub name: String,
    #[serde(flatten)]
    pub layout: Layout,
}

/// A numeric input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberWidget {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_keyboard_input: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<WidgetValidation>,
    #[serde(flatten)]
    pub layout: Layout,
}

impl NumberWidget {
    /// Returns true if `value` lies within the widget's bounds and passes its validation.
    pub fn accepts(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min)
            && self.max.map_or(true, |max| value <= max)
            && self
                .validation
                .as_ref()
                .map_or(true, |validation| validation.accepts(value))
    }
}

/// A widget offering a fixed list of options (dropdowns, radio buttons).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceWidget {
    pub name: String,
    pub options: Vec<String>,
    /// Adds an empty placeholder option ahead of `options`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_option: Option<bool>,
    #[serde(flatten)]
    pub layout: Layout,
}

/// A static image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageWidget {
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(flatten)]
    pub layout: Layout,
}

/// An image on which the scout marks one or more positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldWidget {
    pub name: String,
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_multiple: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select_radius: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select_color: Option<String>,
    #[serde(flatten)]
    pub layout: Layout,
}

/// A stopwatch with lap recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerWidget {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lap_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_laps: Option<u32>,
    #[serde(flatten)]
    pub layout: Layout,
}

/// Empty grid space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpacingWidget {
    #[serde(flatten)]
    pub layout: Layout,
}

/// A check applied to a numeric widget's value, discriminated by `comparison`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WidgetValidation {
    Inequality {
        comparison: InequalityComparison,
        value: f64,
    },
    Range {
        comparison: RangeComparison,
        value: [f64; 2],
    },
}

impl WidgetValidation {
    /// Returns true if `observed` satisfies the comparison.
    ///
    /// ```rust
    /// use formcheck::{RangeComparison, WidgetValidation};
    ///
    /// let check = WidgetValidation::Range {
    ///     comparison: RangeComparison::InRange,
    ///     value: [10.0, 2.0],
    /// };
    /// assert!(check.accepts(7.0));
    /// assert!(!check.accepts(11.0));
    /// ```
    pub fn accepts(&self, observed: f64) -> bool {
        match self {
            WidgetValidation::Inequality { comparison, value } => comparison.test(observed, *value),
            WidgetValidation::Range { comparison, value } => comparison.test(observed, *value),
        }
    }

    /// Returns the config name of the comparison.
    pub fn comparison_name(&self) -> &'static str {
        match self {
            WidgetValidation::Inequality { comparison, .. } => comparison.name(),
            WidgetValidation::Range { comparison, .. } => comparison.name(),
        }
    }
}
