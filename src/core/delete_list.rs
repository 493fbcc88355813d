//! Delete lists
//!
//! A template may carry a reserved `delete` key whose list names keys to drop
//! from what its ancestors contributed. The exclusions cascade down the chain
//! until some descendant defines the key again, which both keeps the key and
//! takes it off the cumulative list.

use crate::core::codec;
use crate::core::document::{FrontmatterDocument, DELETE_KEY};
use crate::core::merge::merge_documents;
use crate::core::value::Value;
use log::debug;
use std::collections::HashSet;

/// Output of processing one template against the cumulative delete list
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedFrontmatter {
    /// The template's frontmatter with exclusions applied and `delete` removed
    pub processed_content: String,
    /// The cumulative delete list to hand to the next template
    pub new_delete_list: Vec<String>,
}

/// Read the string entries of a document's `delete` list
///
/// `None` when the key is missing, not a list, or has no string entries.
pub fn delete_list_of(doc: &FrontmatterDocument) -> Option<Vec<String>> {
    let items = doc.get(DELETE_KEY)?.as_list()?;
    let keys: Vec<String> = items
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect();
    if keys.is_empty() {
        None
    } else {
        Some(keys)
    }
}

/// Parse frontmatter text and read its `delete` list
pub fn extract_delete_list(frontmatter: &str) -> Option<Vec<String>> {
    delete_list_of(&codec::parse(frontmatter))
}

/// Keys a document defines itself, excluding `delete`
pub fn explicit_keys(doc: &FrontmatterDocument) -> HashSet<String> {
    doc.keys()
        .filter(|k| *k != DELETE_KEY)
        .map(str::to_string)
        .collect()
}

/// Drop `delete` and every listed key not explicitly defined
pub fn apply_delete_list_to(
    doc: &mut FrontmatterDocument,
    delete_list: &[String],
    explicitly_defined: Option<&HashSet<String>>,
) {
    doc.retain(|key, _| {
        if key == DELETE_KEY {
            return false;
        }
        let listed = delete_list.iter().any(|d| d == key);
        let exempt = explicitly_defined.is_some_and(|explicit| explicit.contains(key));
        !listed || exempt
    });
}

/// Parse, apply a delete list, and serialize again
pub fn apply_delete_list(
    frontmatter: &str,
    delete_list: &[String],
    explicitly_defined: Option<&HashSet<String>>,
) -> String {
    let mut doc = codec::parse(frontmatter);
    apply_delete_list_to(&mut doc, delete_list, explicitly_defined);
    codec::serialize(&doc)
}

/// Document-level form of [`process_with_delete_list`]
fn process_document(
    doc: &FrontmatterDocument,
    cumulative: &[String],
) -> (FrontmatterDocument, Vec<String>, HashSet<String>) {
    let explicit = explicit_keys(doc);

    let mut processed = doc.clone();
    apply_delete_list_to(&mut processed, cumulative, Some(&explicit));

    // A redefined key is no longer excluded further down the chain
    let mut next: Vec<String> = cumulative
        .iter()
        .filter(|k| !explicit.contains(*k))
        .cloned()
        .collect();
    for key in delete_list_of(doc).unwrap_or_default() {
        if !explicit.contains(&key) && !next.contains(&key) {
            next.push(key);
        }
    }

    (processed, next, explicit)
}

/// Apply the cumulative list to one template and extend it with the
/// template's own `delete` entries
pub fn process_with_delete_list(frontmatter: &str, cumulative: &[String]) -> ProcessedFrontmatter {
    let (processed, new_delete_list, _) = process_document(&codec::parse(frontmatter), cumulative);
    ProcessedFrontmatter {
        processed_content: codec::serialize(&processed),
        new_delete_list,
    }
}

/// Root-to-leaf fold of template frontmatter through the delete-list rules.
///
/// Each step consumes the fold and returns the next one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteListFold {
    accumulated: Option<FrontmatterDocument>,
    delete_list: Vec<String>,
    steps: usize,
}

impl DeleteListFold {
    /// Start an empty fold
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one template's frontmatter text into the accumulation
    pub fn step(self, frontmatter: &str) -> Self {
        self.step_document(&codec::parse(frontmatter))
    }

    /// Fold one parsed template document into the accumulation
    pub fn step_document(self, doc: &FrontmatterDocument) -> Self {
        let (processed, delete_list, explicit) = process_document(doc, &self.delete_list);

        let accumulated = match self.accumulated {
            None => processed,
            Some(accumulated) => {
                let mut merged = merge_documents(&accumulated, &processed).merged;
                // Retract what ancestors contributed; this step's own keys are exempt
                apply_delete_list_to(&mut merged, &delete_list, Some(&explicit));
                merged
            }
        };

        debug!(
            "Fold step {}: {} keys, delete list {:?}",
            self.steps + 1,
            accumulated.len(),
            delete_list
        );

        Self {
            accumulated: Some(accumulated),
            delete_list,
            steps: self.steps + 1,
        }
    }

    /// The accumulated document, empty before the first step
    pub fn accumulated(&self) -> FrontmatterDocument {
        self.accumulated.clone().unwrap_or_default()
    }

    /// The cumulative delete list
    pub fn delete_list(&self) -> &[String] {
        &self.delete_list
    }

    /// Number of templates folded so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Finish the fold, returning the clean accumulated document
    pub fn finish(self) -> (FrontmatterDocument, Vec<String>) {
        let mut doc = self.accumulated.unwrap_or_default();
        doc.strip_delete_key();
        (doc, self.delete_list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn keys(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extract_delete_list() {
        assert_eq!(
            extract_delete_list("delete: [author, tags]"),
            Some(keys(&["author", "tags"]))
        );
        assert_eq!(
            extract_delete_list("delete:\n  - author\n  - 3\n  - true"),
            Some(keys(&["author"]))
        );
    }

    #[test]
    fn test_extract_delete_list_invalid_shapes() {
        assert_eq!(extract_delete_list("title: x"), None);
        assert_eq!(extract_delete_list("delete: author"), None);
        assert_eq!(extract_delete_list("delete: []"), None);
        assert_eq!(extract_delete_list("delete: [1, 2]"), None);
        assert_eq!(extract_delete_list("delete:"), None);
    }

    #[test]
    fn test_apply_delete_list() {
        let out = apply_delete_list(
            "title: T\nauthor: A\ndelete: [title]",
            &keys(&["author"]),
            None,
        );
        assert_eq!(out, "title: T\n");
    }

    #[test]
    fn test_apply_delete_list_respects_explicit_keys() {
        let explicit: HashSet<String> = ["author".to_string()].into_iter().collect();
        let out = apply_delete_list(
            "author: A\nstatus: s\ndelete: [x]",
            &keys(&["author", "status"]),
            Some(&explicit),
        );
        assert_eq!(out, "author: A\n");
    }

    #[test]
    fn test_explicit_redefinition_wins_scenario() {
        let result = process_with_delete_list("author: John\ndelete: [author]", &[]);
        assert_eq!(result.processed_content, "author: John\n");
        assert!(!result.new_delete_list.contains(&"author".to_string()));
    }

    #[test]
    fn test_process_extends_cumulative_list() {
        let result = process_with_delete_list("title: T\ndelete: [tags, status, tags]", &keys(&["status"]));
        assert_eq!(result.processed_content, "title: T\n");
        assert_eq!(result.new_delete_list, keys(&["status", "tags"]));
    }

    #[test]
    fn test_process_removes_redefined_keys_from_list() {
        let result = process_with_delete_list("status: active", &keys(&["status", "author"]));
        assert_eq!(result.processed_content, "status: active\n");
        assert_eq!(result.new_delete_list, keys(&["author"]));
    }

    #[test]
    fn test_fold_three_level_tags() {
        let fold = DeleteListFold::new()
            .step("tags: [base]")
            .step("tags: [mid]")
            .step("tags: [leaf]");
        let (doc, _) = fold.finish();
        assert_eq!(
            codec::serialize(&doc),
            "tags:\n  - base\n  - mid\n  - leaf\n"
        );
    }

    #[test]
    fn test_fold_descendant_retracts_ancestor_key() {
        let fold = DeleteListFold::new()
            .step("author: Root\nstatus: draft")
            .step("category: work\ndelete: [author]");
        assert_eq!(fold.delete_list(), &keys(&["author"])[..]);

        let (doc, _) = fold.finish();
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["status", "category"]);
    }

    #[test]
    fn test_fold_grandchild_restores_deleted_key() {
        let fold = DeleteListFold::new()
            .step("author: Root")
            .step("delete: [author]")
            .step("author: Leaf");
        assert!(fold.delete_list().is_empty());
        assert_eq!(fold.steps(), 3);

        let (doc, _) = fold.finish();
        assert_eq!(doc.get("author"), Some(&Value::from("Leaf")));
    }

    #[test]
    fn test_fold_delete_key_never_survives() {
        let fold = DeleteListFold::new()
            .step("delete: [a]\nb: 1")
            .step("delete: [b]\nc: 2");
        let accumulated = fold.accumulated();
        assert!(accumulated.is_clean());
        let (doc, list) = fold.finish();
        assert!(doc.is_clean());
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["c"]);
        assert_eq!(list, keys(&["a", "b"]));
    }

    #[test]
    fn test_explicit_keys_never_excluded_in_same_step() {
        let cumulative = keys(&["a", "b", "c"]);
        let doc = codec::parse("a: 1\nb: 2\ndelete: [c]");
        let explicit = explicit_keys(&doc);
        let result = process_with_delete_list("a: 1\nb: 2\ndelete: [c]", &cumulative);
        let processed = codec::parse(&result.processed_content);
        for key in &explicit {
            assert!(processed.contains_key(key));
            assert!(!result.new_delete_list.contains(key));
        }
        assert!(processed.is_clean());
    }
}
