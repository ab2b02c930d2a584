//! Rows supplied by a content source
//!
//! A [`Row`] is plain data: a path, a kind and any number of named fields.
//! The `path` and `kind` members are addressable as columns alongside the
//! named fields, so filtering and sorting treat them uniformly.

use crate::path::PathKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Column holding the row path; also the default sort column
pub const PATH_COLUMN: &str = "path";

/// Column holding the row kind
pub const KIND_COLUMN: &str = "kind";

/// Kind string that marks a directory
pub const DIR_KIND: &str = "dir";

/// A typed column value
///
/// Deserialization is untagged: booleans, numbers and arrays of strings map
/// to `Bool`, `Number` and `Path`; strings that parse as RFC 3339 timestamps
/// become `Date`, every other string is `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(f64),
    Path(PathKey),
    Date(DateTime<Utc>),
    Text(String),
}

impl Value {
    /// Numeric view used by the sort comparator
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            #[allow(clippy::cast_precision_loss)]
            Self::Date(d) => Some(d.timestamp_millis() as f64),
            Self::Path(_) | Self::Text(_) => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
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

impl From<u64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: u64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Self::Date(d)
    }
}

impl From<PathKey> for Value {
    fn from(p: PathKey) -> Self {
        Self::Path(p)
    }
}

/// One entry of hierarchical content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Full path from the top of the content source
    pub path: PathKey,

    /// Entry kind; `"dir"` marks a directory
    pub kind: String,

    /// Additional named columns (modified time, size, ...)
    #[serde(default, flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl Row {
    #[must_use]
    pub fn new(path: impl Into<PathKey>, kind: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: kind.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Directory row
    #[must_use]
    pub fn dir(path: impl Into<PathKey>) -> Self {
        Self::new(path, DIR_KIND)
    }

    /// Builder-style field setter
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == DIR_KIND
    }

    /// Joined path identity
    #[must_use]
    pub fn path_string(&self) -> String {
        self.path.joined()
    }

    /// Look up a column value; `None` when the row has no such column
    #[must_use]
    pub fn value(&self, column: &str) -> Option<Cow<'_, Value>> {
        match column {
            PATH_COLUMN => Some(Cow::Owned(Value::Path(self.path.clone()))),
            KIND_COLUMN => Some(Cow::Owned(Value::Text(self.kind.clone()))),
            _ => self.fields.get(column).map(Cow::Borrowed),
        }
    }

    /// Every column name of this row, `path` and `kind` first
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        [PATH_COLUMN, KIND_COLUMN]
            .into_iter()
            .chain(self.fields.keys().map(String::as_str))
    }
}
