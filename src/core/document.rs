//! Ordered frontmatter document
//!
//! Keys keep their insertion order because the serialized text is what later
//! tooling compares. Lookups are linear; frontmatter blocks are small.

use crate::core::value::Value;

/// The reserved key naming other keys to exclude
pub const DELETE_KEY: &str = "delete";

/// An ordered mapping from key to [`Value`] with unique, case-sensitive keys
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontmatterDocument {
    entries: Vec<(String, Value)>,
}

impl FrontmatterDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the document has no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Check if a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Insert or overwrite a value.
    ///
    /// An existing key keeps its position; a new key is appended.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Remove a key, returning its value
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Keep only the entries for which the predicate holds
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &Value) -> bool,
    {
        self.entries.retain(|(k, v)| keep(k, v));
    }

    /// Keys in document order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether the reserved `delete` key has been consumed
    pub fn is_clean(&self) -> bool {
        !self.contains_key(DELETE_KEY)
    }

    /// Drop the reserved `delete` key if present
    pub fn strip_delete_key(&mut self) -> Option<Value> {
        self.remove(DELETE_KEY)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for FrontmatterDocument {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        let mut doc = Self::new();
        for (k, v) in iter {
            doc.insert(k, v);
        }
        doc
    }
}

impl IntoIterator for FrontmatterDocument {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
