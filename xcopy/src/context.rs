//! Field path tracking during a copy.

use std::fmt;

use crate::value::Value;

/// Placeholder rendered for keys the converter cannot stringify.
pub const UNKNOWN_SEGMENT: &str = "<unknown>";

/// Identifies one step into a composite value.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldId {
    /// A struct field, or a renamed key.
    Name(String),
    /// A sequence position.
    Index(usize),
    /// A mapping key.
    Key(Value),
}

impl FieldId {
    /// The identifier as a value suitable for key conversion.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Name(name) => Value::from(name.as_str()),
            Self::Index(index) => Value::from(u64::try_from(*index).unwrap_or(u64::MAX)),
            Self::Key(key) => key.clone(),
        }
    }
}

/// Snapshot of a [`Context`] path, ordered root to leaf.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Builds a path from rendered segments.
    #[must_use]
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Rendered segments, root first.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Whether the path points at the root.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

#[derive(Clone, Debug)]
struct Segment {
    id: FieldId,
    label: String,
}

/// Stack of fields entered while walking the source.
///
/// Each entry keeps the identifier and its rendered label so that error
/// paths and field-map lookups agree on the spelling of every step.
#[derive(Clone, Debug, Default)]
pub struct Context {
    segments: Vec<Segment>,
}

impl Context {
    /// An empty context positioned at the root.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Enters `id`, rendered as `label`.
    pub fn push(&mut self, id: FieldId, label: impl Into<String>) {
        self.segments.push(Segment {
            id,
            label: label.into(),
        });
    }

    /// Leaves the innermost field.
    pub fn pop(&mut self) -> Option<FieldId> {
        self.segments.pop().map(|segment| segment.id)
    }

    /// Innermost field, if any.
    #[must_use]
    pub fn current(&self) -> Option<&FieldId> {
        self.segments.last().map(|segment| &segment.id)
    }

    /// Number of fields entered.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Snapshot of the current path.
    #[must_use]
    pub fn path(&self) -> FieldPath {
        FieldPath(self.labels().map(str::to_owned).collect())
    }

    /// Current path joined with dots, root first.
    #[must_use]
    pub fn path_string(&self) -> String {
        self.labels().collect::<Vec<_>>().join(".")
    }

    /// Current path with `label` appended as an extra leaf.
    #[must_use]
    pub fn path_appending(&self, label: &str) -> String {
        self.labels()
            .chain(std::iter::once(label))
            .collect::<Vec<_>>()
            .join(".")
    }

    fn labels(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(|segment| segment.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{Context, FieldId, FieldPath};
    use crate::value::Value;

    #[test]
    fn paths_render_root_to_leaf() {
        let mut ctx = Context::new();
        ctx.push(FieldId::Name("Outer".into()), "Outer");
        ctx.push(FieldId::Key(Value::from(7_i64)), "7");
        ctx.push(FieldId::Index(2), "2");

        assert_eq!(ctx.path_string(), "Outer.7.2");
        assert_eq!(ctx.path_appending("Leaf"), "Outer.7.2.Leaf");
        assert_eq!(ctx.path(), FieldPath::new(["Outer", "7", "2"]));
        assert_eq!(ctx.depth(), 3);
    }

    #[test]
    fn snapshots_are_independent_of_later_pushes() {
        let mut ctx = Context::new();
        ctx.push(FieldId::Name("A".into()), "A");
        let snapshot = ctx.path();
        ctx.push(FieldId::Name("B".into()), "B");
        assert_eq!(snapshot.to_string(), "A");
        assert_eq!(ctx.pop(), Some(FieldId::Name("B".into())));
        assert_eq!(ctx.current(), Some(&FieldId::Name("A".into())));
    }

    #[test]
    fn root_path_is_empty() {
        let ctx = Context::new();
        assert!(ctx.path().is_empty());
        assert_eq!(ctx.path_appending("Value2"), "Value2");
    }
}
