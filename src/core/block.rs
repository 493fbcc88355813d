//! Frontmatter block delimiters
//!
//! A block is recognized only at the very start of a text: a line of exactly
//! three dashes, optional content, and another line of exactly three dashes.
//! Anything else means the text has no frontmatter.

use regex::Regex;
use std::sync::OnceLock;

fn block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)\A(---\r?\n(?:(.*?)\r?\n)?---)(?:\r?\n|\z)").expect("valid block regex")
    })
}

/// A text split around its frontmatter block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitDocument<'a> {
    /// Content between the delimiters, if a block exists
    pub frontmatter: Option<&'a str>,
    /// Everything after the closing delimiter line
    pub body: &'a str,
    /// Byte offset just past the closing `---` (0 without a block)
    block_end: usize,
}

impl<'a> SplitDocument<'a> {
    /// Check if the text started with a frontmatter block
    pub fn has_frontmatter(&self) -> bool {
        self.frontmatter.is_some()
    }
}

/// Split a text into its frontmatter content and body
pub fn split(text: &str) -> SplitDocument<'_> {
    match block_re().captures(text) {
        Some(caps) => {
            let whole = caps.get(0).map(|m| m.end()).unwrap_or(0);
            let block_end = caps.get(1).map(|m| m.end()).unwrap_or(0);
            SplitDocument {
                frontmatter: Some(caps.get(2).map(|m| m.as_str()).unwrap_or("")),
                body: &text[whole..],
                block_end,
            }
        }
        None => SplitDocument {
            frontmatter: None,
            body: text,
            block_end: 0,
        },
    }
}

/// Extract the frontmatter content of a text, if it has a block
pub fn extract_frontmatter(text: &str) -> Option<&str> {
    split(text).frontmatter
}

/// Render `---\n<frontmatter>---`, adding the newline before the closing
/// delimiter when the content lacks one
pub fn render_block(frontmatter: &str) -> String {
    if frontmatter.is_empty() || frontmatter.ends_with('\n') {
        format!("---\n{}---", frontmatter)
    } else {
        format!("---\n{}\n---", frontmatter)
    }
}

/// Replace the text's frontmatter block, or prepend one if it has none.
///
/// The body is preserved byte for byte. A text without a block and an empty
/// replacement is returned unchanged.
pub fn replace_frontmatter(text: &str, frontmatter: &str) -> String {
    let parts = split(text);
    if parts.has_frontmatter() {
        format!("{}{}", render_block(frontmatter), &text[parts.block_end..])
    } else if frontmatter.trim().is_empty() {
        text.to_string()
    } else if text.is_empty() {
        format!("{}\n", render_block(frontmatter))
    } else {
        format!("{}\n{}", render_block(frontmatter), text)
    }
}
