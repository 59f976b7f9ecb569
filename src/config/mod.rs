//! Form config domain: discriminant tables, the built-in schema and the typed model.

pub mod discriminant;
pub mod model;
pub mod schema;

pub use discriminant::{
    Comparison, ComparisonFamily, DiscriminantKind, InequalityComparison, RangeComparison,
};
pub use model::{
    Align, ChoiceWidget, ConfigDocument, FieldWidget, ImageWidget, LabelWidget, Layout,
    NumberWidget, Page, SpacingWidget, TimerWidget, Widget, WidgetKind, WidgetValidation,
    UNNAMED_PAGE, UNNAMED_WIDGET,
};
pub use schema::{config_schema, PAGE_DEF};
