//! Path-keyed field renames.

use std::{collections::HashMap, sync::Arc};

/// Override applied to one source path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldMapEntry {
    field_name: Option<String>,
}

impl FieldMapEntry {
    /// An entry that leaves the target name unchanged.
    #[must_use]
    pub const fn new() -> Self {
        Self { field_name: None }
    }

    /// An entry renaming the target field to `name`.
    #[must_use]
    pub fn renamed(name: impl Into<String>) -> Self {
        Self {
            field_name: Some(name.into()),
        }
    }

    /// Replacement target name, if any.
    #[must_use]
    pub fn field_name(&self) -> Option<&str> {
        self.field_name.as_deref()
    }
}

/// Renames keyed by the dotted source path of a field, root first.
///
/// A path such as `Outer.XValue2` matches the `XValue2` field reached through
/// `Outer`. Cloning a map shares its entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: HashMap<String, Arc<FieldMapEntry>>,
}

impl FieldMap {
    /// An empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `entry` for `path`, replacing any previous entry.
    pub fn insert(&mut self, path: impl Into<String>, entry: FieldMapEntry) {
        self.entries.insert(path.into(), Arc::new(entry));
    }

    /// Stores a rename of `path` to `name`.
    pub fn rename(&mut self, path: impl Into<String>, name: impl Into<String>) {
        self.insert(path, FieldMapEntry::renamed(name));
    }

    /// Entry stored for `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&FieldMapEntry> {
        self.entries.get(path).map(AsRef::as_ref)
    }

    /// Replacement name stored for `path`.
    #[must_use]
    pub fn renamed(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(FieldMapEntry::field_name)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<P: Into<String>, N: Into<String>> FromIterator<(P, N)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (P, N)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (path, name) in iter {
            map.rename(path, name);
        }
        map
    }
}
