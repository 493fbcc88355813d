//! Merge engine
//!
//! One primitive serves both directions of precedence: `incoming` always wins
//! scalar conflicts, so callers pick who goes in which slot. Folding a
//! template chain puts the ancestor in `base`; merging templates into a file
//! puts the file in `incoming`, so the file keeps its own values.

use crate::core::block;
use crate::core::codec;
use crate::core::document::FrontmatterDocument;
use crate::core::value::Value;
use log::debug;
use std::collections::HashSet;

/// Outcome of merging two documents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeResult {
    /// The merged document
    pub merged: FrontmatterDocument,
    /// Keys present on both sides, in `incoming` order
    pub conflicts: Vec<String>,
    /// Keys only `incoming` had, in `incoming` order
    pub added: Vec<String>,
}

impl MergeResult {
    /// Serialize the merged document
    pub fn merged_text(&self) -> String {
        codec::serialize(&self.merged)
    }

    /// Check if anything conflicted or was added
    pub fn is_noop(&self) -> bool {
        self.conflicts.is_empty() && self.added.is_empty()
    }
}

/// Merge two parsed documents
///
/// For each key in `incoming`:
/// - absent from `base`: added
/// - array-like on both sides: concatenated, `base` items first, deduplicated
/// - otherwise `incoming` overwrites
pub fn merge_documents(base: &FrontmatterDocument, incoming: &FrontmatterDocument) -> MergeResult {
    let mut merged = base.clone();
    let mut conflicts = Vec::new();
    let mut added = Vec::new();

    for (key, incoming_value) in incoming.iter() {
        let Some(base_value) = base.get(key) else {
            merged.insert(key, incoming_value.clone());
            added.push(key.to_string());
            continue;
        };

        let value = if base_value.is_array_like() && incoming_value.is_array_like() {
            concat_lists(base_value, incoming_value)
        } else {
            incoming_value.clone()
        };
        debug!("Merge conflict on {:?}", key);
        merged.insert(key, value);
        conflicts.push(key.to_string());
    }

    MergeResult {
        merged,
        conflicts,
        added,
    }
}

/// Concatenate two array-like values, dropping structural duplicates while
/// keeping first-occurrence order
fn concat_lists(base: &Value, incoming: &Value) -> Value {
    if !base.is_list() && !incoming.is_list() {
        // Identical blanks merge to themselves
        return if base == incoming {
            incoming.clone()
        } else {
            Value::Empty
        };
    }

    let mut seen = HashSet::new();
    let items = base
        .list_items()
        .iter()
        .chain(incoming.list_items())
        .filter(|item| seen.insert(item.canonical_key()))
        .cloned()
        .collect();
    Value::List(items)
}

/// Parse both sides and merge them
pub fn merge_frontmatter(base: &str, incoming: &str) -> MergeResult {
    merge_documents(&codec::parse(base), &codec::parse(incoming))
}

/// Merge template frontmatter into a file's own frontmatter; the file wins
/// scalar conflicts.
///
/// `added` lists the template keys the file did not have yet, in template
/// order, since those are what the template contributed.
pub fn merge_with_file(file_text: &str, template_frontmatter: &str) -> MergeResult {
    let file = codec::parse(block::extract_frontmatter(file_text).unwrap_or(""));
    let template = codec::parse(template_frontmatter);

    let mut result = merge_documents(&template, &file);
    result.added = template
        .keys()
        .filter(|key| !file.contains_key(key))
        .map(String::from)
        .collect();
    result
}

/// Replace the file's frontmatter block with the merged text, or prepend a
/// new block, leaving the body untouched
pub fn apply_to_file(file_text: &str, merged_frontmatter: &str) -> String {
    block::replace_frontmatter(file_text, merged_frontmatter)
}
