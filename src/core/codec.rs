//! Frontmatter codec
//!
//! A line-oriented parser for the YAML subset used in note templates, and a
//! serializer producing one canonical text form. This is deliberately not a
//! YAML implementation: no anchors, tags, flow mappings, or nesting beyond
//! lists of scalars.
//!
//! Parsing never fails. Lines that match nothing are skipped and logged at
//! `debug` level.

use crate::core::document::FrontmatterDocument;
use crate::core::value::{format_number, Value};
use log::debug;
use regex::Regex;
use std::sync::OnceLock;

fn key_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\w+):\s*(.*)$").expect("valid key regex"))
}

fn list_item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*-(?:\s+(.*))?$").expect("valid list item regex"))
}

fn number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("valid number regex"))
}

/// Characters that force a scalar string into double quotes
const QUOTE_TRIGGERS: &[char] = &[':', '[', ']', '{', '}', ',', '>', '|'];

/// Parser state between lines
enum State {
    Scanning,
    /// `key:` seen; may become a list or stay empty
    Pending { key: String, items: Vec<Value> },
    /// `key: |` seen; indented lines are collected verbatim
    Literal {
        key: String,
        lines: Vec<String>,
        blank_run: usize,
    },
}

/// Parse frontmatter text (without the `---` delimiters) into a document
pub fn parse(text: &str) -> FrontmatterDocument {
    let mut doc = FrontmatterDocument::new();
    let mut state = State::Scanning;

    for raw in text.split('\n') {
        let line = raw.strip_suffix('\r').unwrap_or(raw);

        state = match state {
            State::Scanning => scan_line(line, &mut doc),
            State::Pending { key, mut items } => {
                if let Some(item) = parse_list_item(line) {
                    items.push(item);
                    State::Pending { key, items }
                } else if is_skippable(line) {
                    State::Pending { key, items }
                } else {
                    flush(State::Pending { key, items }, &mut doc);
                    scan_line(line, &mut doc)
                }
            }
            State::Literal {
                key,
                mut lines,
                mut blank_run,
            } => {
                if let Some(content) = line.strip_prefix("  ") {
                    lines.extend(std::iter::repeat(String::new()).take(blank_run));
                    lines.push(content.to_string());
                    State::Literal {
                        key,
                        lines,
                        blank_run: 0,
                    }
                } else if line.trim().is_empty() {
                    // Only kept if more indented content follows
                    blank_run += 1;
                    State::Literal {
                        key,
                        lines,
                        blank_run,
                    }
                } else {
                    flush(
                        State::Literal {
                            key,
                            lines,
                            blank_run,
                        },
                        &mut doc,
                    );
                    scan_line(line, &mut doc)
                }
            }
        };
    }

    flush(state, &mut doc);
    doc
}

fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

fn scan_line(line: &str, doc: &mut FrontmatterDocument) -> State {
    if is_skippable(line) {
        return State::Scanning;
    }

    let Some(caps) = key_line_re().captures(line) else {
        debug!("Skipping malformed frontmatter line: {:?}", line);
        return State::Scanning;
    };

    let key = caps[1].to_string();
    let rest = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");

    match rest {
        "|" => State::Literal {
            key,
            lines: Vec::new(),
            blank_run: 0,
        },
        "" => State::Pending {
            key,
            items: Vec::new(),
        },
        _ => {
            doc.insert(key, parse_scalar(rest));
            State::Scanning
        }
    }
}

fn parse_list_item(line: &str) -> Option<Value> {
    let caps = list_item_re().captures(line)?;
    let item = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
    if item.is_empty() {
        Some(Value::String(String::new()))
    } else {
        Some(parse_scalar(item))
    }
}

fn flush(state: State, doc: &mut FrontmatterDocument) {
    match state {
        State::Scanning => {}
        State::Pending { key, items } => {
            let value = if items.is_empty() {
                Value::Empty
            } else {
                Value::List(items)
            };
            doc.insert(key, value);
        }
        State::Literal { key, lines, .. } => {
            doc.insert(key, Value::String(lines.join("\n")));
        }
    }
}

/// Parse a single scalar or inline array
///
/// First match wins: quoted string, boolean, null, number, inline array,
/// otherwise the raw (trimmed) text.
pub fn parse_scalar(raw: &str) -> Value {
    let s = raw.trim();

    if let Some(inner) = strip_matching_quotes(s) {
        return Value::String(inner.replace("\\\"", "\""));
    }

    match s {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "null" | "~" => return Value::Null,
        _ => {}
    }

    if number_re().is_match(s) {
        if let Ok(n) = s.parse::<f64>() {
            return Value::Number(n);
        }
    }

    if let Some(inner) = s.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        let items = split_inline_items(inner)
            .into_iter()
            .filter(|item| !item.is_empty())
            .map(parse_scalar)
            .collect();
        return Value::List(items);
    }

    Value::String(s.to_string())
}

fn strip_matching_quotes(s: &str) -> Option<&str> {
    if s.len() < 2 {
        return None;
    }
    ['"', '\'']
        .into_iter()
        .find(|q| s.starts_with(*q) && s.ends_with(*q))
        .map(|_| &s[1..s.len() - 1])
}

/// Split the inside of `[...]` on top-level commas, respecting quotes and
/// nested brackets
fn split_inline_items(inner: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in inner.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                items.push(inner[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    items.push(inner[start..].trim());
    items
}

/// Serialize a document to canonical text, one entry per key, ending with a
/// newline after the last key
pub fn serialize(doc: &FrontmatterDocument) -> String {
    let mut out = String::new();
    for (key, value) in doc.iter() {
        write_entry(&mut out, key, value);
    }
    out
}

fn write_entry(out: &mut String, key: &str, value: &Value) {
    match value {
        Value::Null => out.push_str(&format!("{}: null\n", key)),
        Value::Empty => out.push_str(&format!("{}: \n", key)),
        Value::Bool(b) => out.push_str(&format!("{}: {}\n", key, b)),
        Value::Number(n) => out.push_str(&format!("{}: {}\n", key, format_number(*n))),
        Value::List(items) if items.is_empty() => out.push_str(&format!("{}: []\n", key)),
        Value::List(items) => {
            out.push_str(&format!("{}:\n", key));
            for item in items {
                out.push_str(&format!("  - {}\n", format_item(item)));
            }
        }
        Value::String(s) if s.contains('\n') => {
            out.push_str(&format!("{}: |\n", key));
            for line in s.split('\n') {
                out.push_str(&format!("  {}\n", line));
            }
        }
        Value::String(s) => out.push_str(&format!("{}: {}\n", key, format_scalar(s))),
    }
}

/// Format one list item; nested lists fall back to inline brackets
fn format_item(item: &Value) -> String {
    match item {
        Value::Null => "null".to_string(),
        Value::Empty => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(*n),
        Value::String(s) => format_scalar(s),
        Value::List(items) => format!(
            "[{}]",
            items.iter().map(format_item).collect::<Vec<_>>().join(", ")
        ),
    }
}

/// Format a string scalar, double-quoting it only when needed
///
/// Content that itself starts and ends with a quote gets wrapped again, so
/// the quotes survive a reparse.
pub fn format_scalar(s: &str) -> String {
    if needs_quoting(s) {
        format!("\"{}\"", s.replace('"', "\\\""))
    } else {
        s.to_string()
    }
}

fn needs_quoting(s: &str) -> bool {
    if s.is_empty() || s.contains(QUOTE_TRIGGERS) {
        return true;
    }
    // Bare `true`, `42`, `~` and friends would come back as another type
    !matches!(parse_scalar(s), Value::String(ref parsed) if parsed == s)
}
