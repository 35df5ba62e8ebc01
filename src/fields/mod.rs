//! Field resolution for title templates.
//!
//! A render starts by turning the host's view of the world (vault, workspace,
//! active file, its front-matter) into a [`FieldMap`]: an ordered list of
//! placeholder names and their values. The map is rebuilt from scratch for
//! every render.
//!
//! # Field names
//!
//! | Field | Present | Value |
//! |-------|---------|-------|
//! | `vault` | always | Vault (container) name |
//! | `workspace` | always | Active named workspace, empty if unavailable |
//! | `version` | always | Host version parsed from the baseline title, empty if none |
//! | `filepath` | regular file active | Vault-relative path |
//! | `filename` | regular file active | Name with extension |
//! | `basename` | regular file active | Name without extension (native documents only) |
//! | `extension` | regular file active | Extension without the dot |
//! | `frontmatter.<key>` | file has front-matter | Stringified value |
//!
//! Built-in fields are inserted first and the map is first-writer-wins, so a
//! front-matter key can never shadow a built-in.

mod descriptor;
mod resolver;

pub use descriptor::{FileDescriptor, FileKind};
pub use resolver::{FieldResolver, FieldSource, parse_host_version};

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered mapping from field name to an optional value.
///
/// Insertion order is preserved and keys are unique: inserting a key that is
/// already present leaves the existing entry untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, Option<String>)>,
}

impl FieldMap {
    /// Create an empty field map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field unless the name is already taken.
    ///
    /// Returns `true` if the entry was added.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            tracing::trace!("field '{}' already set, keeping first value", name);
            return false;
        }
        self.entries.push((name, value));
        true
    }

    /// Insert a field with a present value. See [`insert`](Self::insert).
    pub fn insert_value(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        self.insert(name, Some(value.into()))
    }

    /// Whether a field with this exact name exists, filled or not.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    /// Raw lookup: `None` when the field is missing, `Some(None)` when it is present but absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.entries.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_deref())
    }

    /// The value of a field if it is present and non-empty.
    ///
    /// Missing fields, absent values and empty strings all count as unfilled.
    #[must_use]
    pub fn filled(&self, name: &str) -> Option<&str> {
        self.get(name).flatten().filter(|value| !value.is_empty())
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value.as_deref()))
    }

    /// Iterate the entries that have a non-empty value, in insertion order.
    pub fn iter_filled(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter_map(|(key, value)| match value {
            Some(value) if !value.is_empty() => Some((key, value)),
            _ => None,
        })
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

/// Serializes as a map in insertion order; unset values become `null`.
impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<K, V> FromIterator<(K, V)> for FieldMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert_value(key, value);
        }
        map
    }
}
