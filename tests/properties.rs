//! Behavioral properties of the codec, merge engine, and delete lists,
//! exercised through the public API only.

use matterfold::*;
use pretty_assertions::assert_eq;
use std::collections::HashSet;

const SAMPLES: &[&str] = &[
    "title: Plain\ncount: 3\ndone: false",
    "tags: [a, b, \"c, d\"]\nempty:\nnothing: null",
    "summary: |\n  first line\n\n  third line\nafter: x",
    "nested:\n  - [1, 2]\n  - solo\nquoted: \"true\"",
    "",
    "# only a comment\nweird line without colon\nkey: value",
];

#[test]
fn test_round_trip_over_samples() {
    for sample in SAMPLES {
        let doc = parse(sample);
        assert_eq!(parse(&serialize(&doc)), doc, "sample: {:?}", sample);
    }
}

#[test]
fn test_self_merge_is_identity() {
    for sample in SAMPLES {
        let doc = parse(sample);
        let result = merge_frontmatter(sample, sample);
        assert_eq!(result.merged, doc, "sample: {:?}", sample);
        assert!(result.added.is_empty());
        assert_eq!(result.conflicts.len(), doc.len());
    }
}

#[test]
fn test_incoming_scalar_always_wins() {
    let pairs = [
        ("k: 1", "k: 2"),
        ("k: [a]", "k: text"),
        ("k: text", "k: [a]"),
        ("k: true", "k:"),
        ("k: null", "k: 0"),
    ];
    for (base, incoming) in pairs {
        let result = merge_frontmatter(base, incoming);
        let base_value = parse(base).get("k").cloned().unwrap();
        let incoming_value = parse(incoming).get("k").cloned().unwrap();
        if !(base_value.is_array_like() && incoming_value.is_array_like()) {
            assert_eq!(result.merged.get("k"), Some(&incoming_value), "{} / {}", base, incoming);
        }
    }
}

#[test]
fn test_list_concatenation_keeps_base_prefix() {
    let result = merge_frontmatter("k: [a, b, a, c]", "k: [c, d, b, e]");
    assert_eq!(
        result.merged.get("k"),
        Some(&Value::string_list(["a", "b", "c", "d", "e"]))
    );
}

#[test]
fn test_list_scenario_text() {
    let result = merge_frontmatter("tags: [project, important]", "tags: [template, default]");
    assert!(result
        .merged_text()
        .contains("tags:\n  - project\n  - important\n  - template\n  - default"));
    assert_eq!(result.conflicts, vec!["tags"]);
}

#[test]
fn test_merge_with_file_scenario() {
    let result = merge_with_file("---\ntitle: Original\n---", "title: Template\nauthor: Jane");
    assert_eq!(result.merged.get("title"), Some(&Value::from("Original")));
    assert_eq!(result.merged.get("author"), Some(&Value::from("Jane")));
    assert_eq!(result.conflicts, vec!["title"]);
    assert_eq!(result.added, vec!["author"]);
}

#[test]
fn test_apply_to_file_preserves_body_exactly() {
    let bodies = ["", "text", "\n\n  indented\n", "---\nnot a block\n---\n"];
    for body in bodies {
        let file = format!("---\nold: 1\n---\n{}", body);
        let applied = apply_to_file(&file, "new: 2\n");
        assert_eq!(applied, format!("---\nnew: 2\n---\n{}", body));
    }
}

#[test]
fn test_delete_key_never_survives_and_explicit_keys_do() {
    let inputs = [
        ("a: 1\nb: 2\ndelete: [a, b]", vec!["a", "b"]),
        ("delete: [x]\nx: kept", vec!["x"]),
        ("delete: notalist\na: 1", vec!["a"]),
        ("a: 1", vec![]),
    ];
    for (text, list) in inputs {
        let list: Vec<String> = list.into_iter().map(String::from).collect();
        let explicit: HashSet<String> = ["a".to_string()].into_iter().collect();

        let out = parse(&apply_delete_list(text, &list, Some(&explicit)));
        assert!(!out.contains_key(DELETE_KEY), "input: {:?}", text);
        if parse(text).contains_key("a") {
            assert!(out.contains_key("a"), "input: {:?}", text);
        }
    }
}

#[test]
fn test_invalid_delete_lists_are_absent() {
    assert_eq!(extract_delete_list("delete: author"), None);
    assert_eq!(extract_delete_list("delete: [1, true]"), None);
    assert_eq!(extract_delete_list("title: x"), None);
    assert_eq!(
        extract_delete_list("delete: [1, author]"),
        Some(vec!["author".to_string()])
    );
}

#[test]
fn test_explicit_redefinition_scenario() {
    let processed = process_with_delete_list("author: John\ndelete: [author]", &[]);
    assert_eq!(processed.processed_content, "author: John\n");
    assert!(processed.new_delete_list.is_empty());
}

#[test]
fn test_three_level_tags_chain() {
    let chain = TemplateChain::new(vec![
        TemplateChainItem::new("base.md", "", 0).with_content("---\ntags: [base]\n---\n"),
        TemplateChainItem::new("mid.md", "a", 1).with_content("---\ntags: [mid]\n---\n"),
        TemplateChainItem::new("leaf.md", "a/b", 2).with_content("---\ntags: [leaf]\n---\n"),
    ]);
    let accumulated = accumulate_chain(&chain);
    assert_eq!(
        accumulated.frontmatter_text(),
        "tags:\n  - base\n  - mid\n  - leaf\n"
    );
}

#[test]
fn test_descendant_can_restore_retracted_key() {
    let chain = TemplateChain::new(vec![
        TemplateChainItem::new("root.md", "", 0).with_content("---\nauthor: Root\n---\n"),
        TemplateChainItem::new("mid.md", "a", 1).with_content("---\ndelete: [author]\n---\n"),
        TemplateChainItem::new("leaf.md", "a/b", 2).with_content("---\nauthor: Leaf\n---\n"),
    ]);
    let accumulated = accumulate_chain(&chain);
    assert_eq!(accumulated.frontmatter_text(), "author: Leaf\n");
    assert!(accumulated.delete_list.is_empty());
}

#[test]
fn test_readme_exclusion_scenario() {
    let mut resolver = ChainResolver::new(vec![
        ("", TemplateMapping::Path("root.md".into())),
        (
            "docs",
            TemplateMapping::Config {
                template_path: "docs.md".into(),
                exclude_patterns: vec!["README.md".into()],
            },
        ),
    ]);
    let chain = resolver.get_template_chain("docs/README.md");
    let paths: Vec<_> = chain.templates.iter().map(|t| t.path.as_str()).collect();
    assert_eq!(paths, vec!["root.md"]);
}
