//! Glob patterns for template exclusion
//!
//! `*` matches a run of non-separator characters, `?` one character, and `**`
//! any run including separators (`**/` may also match nothing). Patterns are
//! compiled to anchored regexes once and cached by pattern string, since a
//! batch run checks the same patterns for every file in a folder.

use crate::error::Result;
use log::warn;
use regex::Regex;
use std::collections::HashMap;

/// Translate a glob pattern into an anchored regex source
pub fn glob_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2 + 2);
    out.push('^');

    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                if chars.peek() == Some(&'/') {
                    chars.next();
                    out.push_str("(?:.*/)?");
                } else {
                    out.push_str(".*");
                }
            }
            '*' => out.push_str("[^/]*"),
            '?' => out.push('.'),
            other => out.push_str(&regex::escape(&other.to_string())),
        }
    }

    out.push('$');
    out
}

/// Compiled glob patterns keyed by their source text
#[derive(Debug, Default)]
pub struct PatternCache {
    compiled: HashMap<String, Regex>,
}

impl PatternCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct patterns compiled so far
    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    /// Check if nothing has been compiled yet
    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    /// Compile a pattern, reusing the cached regex when there is one
    pub fn compile(&mut self, pattern: &str) -> Result<&Regex> {
        if !self.compiled.contains_key(pattern) {
            let regex = Regex::new(&glob_to_regex(pattern))?;
            self.compiled.insert(pattern.to_string(), regex);
        }
        Ok(&self.compiled[pattern])
    }

    /// Check a single pattern against a path
    ///
    /// A pattern that fails to compile never matches.
    pub fn is_match(&mut self, pattern: &str, path: &str) -> bool {
        match self.compile(pattern) {
            Ok(re) => re.is_match(path),
            Err(e) => {
                warn!("Ignoring invalid exclude pattern {:?}: {}", pattern, e);
                false
            }
        }
    }

    /// Check whether any pattern matches the relative path or its bare
    /// file name
    pub fn excludes(&mut self, patterns: &[String], relative_path: &str) -> bool {
        let file_name = relative_path.rsplit('/').next().unwrap_or(relative_path);
        patterns
            .iter()
            .any(|p| self.is_match(p, relative_path) || self.is_match(p, file_name))
    }
}
