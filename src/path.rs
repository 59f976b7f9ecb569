//! Instance and schema path representation.
//!
//! This module provides [`JsonPath`] for locating values inside a config
//! document and [`SchemaPath`] for locating constraints inside the schema.
//! Both render as JSON Pointers: instance paths like `/pages/0/widgets/1`
//! (the root is the empty string) and schema paths as URI fragments like
//! `#/$defs/widgetText/properties/name/type` (the root is `#`).

use std::fmt::{self, Display};

use serde_json::Value;

/// A segment of a JSON path.
///
/// Paths are built from segments that represent either field access or array indexing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A field/property access (e.g., `pages`, `name`)
    Field(String),
    /// An array index access (e.g., `0`, `42`)
    Index(usize),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }

    /// Interprets the segment as an array index.
    ///
    /// Field segments made only of digits count as indices, matching how a
    /// pointer string carries no type information.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathSegment::Index(idx) => Some(*idx),
            PathSegment::Field(name) => name.parse().ok(),
        }
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, "{}", name),
            PathSegment::Index(idx) => write!(f, "{}", idx),
        }
    }
}

/// A path to a value in a config document.
///
/// `JsonPath` is immutable: the `push_*` methods return new paths so that a
/// single base path can be shared between sibling fields.
///
/// # Example
///
/// ```rust
/// use formcheck::JsonPath;
///
/// let path = JsonPath::root()
///     .push_field("pages")
///     .push_index(0)
///     .push_field("widgets");
///
/// assert_eq!(path.to_string(), "/pages/0/widgets");
/// assert_eq!(JsonPath::parse("/pages/0/widgets"), path);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// Creates an empty path representing the document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses a JSON Pointer (`/a/0/b`).
    ///
    /// Numeric segments become indices, `~1` and `~0` are unescaped. The
    /// empty string and a lone `/`-less string both denote the root.
    pub fn parse(pointer: &str) -> Self {
        let Some(rest) = pointer.strip_prefix('/') else {
            return Self::root();
        };

        let segments = rest
            .split('/')
            .map(|raw| {
                let token = unescape(raw);
                match token.parse::<usize>() {
                    Ok(idx) if idx.to_string() == token => PathSegment::Index(idx),
                    _ => PathSegment::Field(token),
                }
            })
            .collect();

        Self { segments }
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the segment at `position`, if any.
    pub fn get(&self, position: usize) -> Option<&PathSegment> {
        self.segments.get(position)
    }

    /// Returns the parent path (all segments except the last), or None if this is root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Walks the path into `document`, returning the addressed value.
    pub fn lookup<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(document, |current, segment| match current {
                Value::Array(items) => segment.as_index().and_then(|idx| items.get(idx)),
                Value::Object(map) => map.get(&segment.to_string()),
                _ => None,
            })
    }
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{}", escape(&segment.to_string()))?;
        }
        Ok(())
    }
}

/// A path to a constraint inside a schema document.
///
/// Schema paths always start from a resource root: `#` for the document
/// itself or `#/$defs/<name>` once a reference has been followed.
///
/// ```rust
/// use formcheck::SchemaPath;
///
/// let path = SchemaPath::definition("widgetText").push("properties").push("name");
/// assert_eq!(path.to_string(), "#/$defs/widgetText/properties/name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SchemaPath {
    segments: Vec<String>,
}

impl SchemaPath {
    /// The schema document root (`#`).
    pub fn root() -> Self {
        Self::default()
    }

    /// The root of a named definition (`#/$defs/<name>`).
    pub fn definition(name: impl Into<String>) -> Self {
        Self {
            segments: vec!["$defs".to_string(), name.into()],
        }
    }

    /// Returns a new path with `segment` appended.
    pub fn push(&self, segment: impl ToString) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Self { segments }
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }
}

impl Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#")?;
        for segment in &self.segments {
            write!(f, "/{}", escape(segment))?;
        }
        Ok(())
    }
}

fn escape(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

fn unescape(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_path_is_empty() {
        let path = JsonPath::root();
        assert!(path.is_root());
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn test_pointer_display() {
        let path = JsonPath::root()
            .push_field("pages")
            .push_index(2)
            .push_field("widgets")
            .push_index(0)
            .push_field("validation");
        assert_eq!(path.to_string(), "/pages/2/widgets/0/validation");
    }

    #[test]
    fn test_parse_round_trips_display() {
        let path = JsonPath::parse("/pages/1/widgets/3/options/0");
        assert_eq!(path.to_string(), "/pages/1/widgets/3/options/0");
        assert_eq!(path.get(1), Some(&PathSegment::Index(1)));
        assert_eq!(path.get(2), Some(&PathSegment::field("widgets")));
    }

    #[test]
    fn test_parse_root_forms() {
        assert!(JsonPath::parse("").is_root());
        assert!(JsonPath::parse("pages").is_root());
    }

    #[test]
    fn test_parse_keeps_leading_zero_as_field() {
        let path = JsonPath::parse("/07");
        assert_eq!(path.last(), Some(&PathSegment::field("07")));
        assert_eq!(path.last().and_then(PathSegment::as_index), Some(7));
    }

    #[test]
    fn test_escaping() {
        let path = JsonPath::root().push_field("a/b").push_field("c~d");
        assert_eq!(path.to_string(), "/a~1b/c~0d");
        assert_eq!(JsonPath::parse("/a~1b/c~0d"), path);
    }

    #[test]
    fn test_path_immutability() {
        let base = JsonPath::root().push_field("pages");
        let path_a = base.push_index(0);
        let path_b = base.push_index(1);

        assert_eq!(base.to_string(), "/pages");
        assert_eq!(path_a.to_string(), "/pages/0");
        assert_eq!(path_b.to_string(), "/pages/1");
    }

    #[test]
    fn test_parent_path() {
        let path = JsonPath::parse("/pages/0/name");

        let parent = path.parent().unwrap();
        assert_eq!(parent.to_string(), "/pages/0");

        let root = parent.parent().unwrap().parent().unwrap();
        assert!(root.is_root());
        assert!(root.parent().is_none());
    }

    #[test]
    fn test_lookup() {
        let doc = json!({"pages": [{"name": "Auto", "widgets": [{"type": "text"}]}]});

        assert_eq!(
            JsonPath::parse("/pages/0/widgets/0/type").lookup(&doc),
            Some(&json!("text"))
        );
        assert_eq!(JsonPath::root().lookup(&doc), Some(&doc));
        assert_eq!(JsonPath::parse("/pages/4").lookup(&doc), None);
        assert_eq!(JsonPath::parse("/pages/0/name/x").lookup(&doc), None);
    }

    #[test]
    fn test_schema_path_display() {
        assert_eq!(SchemaPath::root().to_string(), "#");
        assert_eq!(
            SchemaPath::root().push("properties").push("pages").to_string(),
            "#/properties/pages"
        );
        assert_eq!(
            SchemaPath::definition("validationRange")
                .push("properties")
                .push("value")
                .push("type")
                .to_string(),
            "#/$defs/validationRange/properties/value/type"
        );
    }

    #[test]
    fn test_schema_path_segments() {
        let path = SchemaPath::definition("widget").push("anyOf").push(3);
        let segments: Vec<_> = path.segments().collect();
        assert_eq!(segments, vec!["$defs", "widget", "anyOf", "3"]);
    }
}
