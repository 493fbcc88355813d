//! Core value type for frontmatter entries
//!
//! A closed set of variants covering everything the frontmatter subset can
//! express. `Empty` is a key written with nothing after the colon and stays
//! distinct from both `Null` and an empty list.

use std::fmt;

/// One frontmatter entry's content
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `key: null` or `key: ~`
    Null,
    /// `key: true` / `key: false`
    Bool(bool),
    /// `key: 42` or `key: -1.5`
    Number(f64),
    /// Any other scalar, quoted or bare, or a literal block
    String(String),
    /// Dash notation or inline `[a, b]`
    List(Vec<Value>),
    /// `key:` with no value and no list items
    Empty,
}

impl Value {
    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    /// Create a list of string values
    pub fn string_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(|s| Self::String(s.into())).collect())
    }

    /// Check if this value is a list
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Check if this value carries no content (`Null` or `Empty`)
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null | Self::Empty => true,
            Self::String(s) => s.is_empty(),
            Self::Bool(_) | Self::Number(_) | Self::List(_) => false,
        }
    }

    /// Whether merging treats this value as a list.
    ///
    /// Blank values count as an empty list here, and only here.
    pub fn is_array_like(&self) -> bool {
        self.is_list() || self.is_blank()
    }

    /// Items of a list, or nothing for a blank value
    pub fn list_items(&self) -> &[Value] {
        match self {
            Self::List(items) => items,
            _ => &[],
        }
    }

    /// Try to get a string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get list items
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// JSON view of this value, used for structural equality of list items
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null | Self::Empty => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
        }
    }

    /// Canonical string form; two values are duplicates iff these match.
    ///
    /// Parsing has already coerced types, so `1` and `"1"` stay distinct.
    pub fn canonical_key(&self) -> String {
        self.to_json().to_string()
    }
}

/// Render a number the way it was most likely written
pub(crate) fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Empty => Ok(()),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::String(s) => write!(f, "{}", s),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}
