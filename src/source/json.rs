//! Static JSON tree source
//!
//! The document is a single nested entry:
//!
//! ```json
//! {
//!   "name": "project",
//!   "children": [
//!     { "name": "src", "children": [ { "name": "main.rs", "size": 120 } ] },
//!     { "name": "README.md", "kind": "markdown", "modified": "2024-05-01T00:00:00Z" }
//!   ]
//! }
//! ```
//!
//! Entries with a `children` array are directories; other entries default to
//! kind `"file"`. Any further keys become row fields.

use super::fs::FILE_KIND;
use super::traits::{ContentSource, SourceKind};
use crate::content::{DIR_KIND, FetchError, Row, Value};
use crate::path::PathKey;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct JsonEntry {
    name: String,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    children: Option<Vec<JsonEntry>>,
    #[serde(flatten)]
    fields: BTreeMap<String, Value>,
}

/// Serves listings from an in-memory tree parsed from JSON
#[derive(Debug, Clone)]
pub struct JsonSource {
    root: Row,
    listings: HashMap<String, Vec<Row>>,
}

impl JsonSource {
    /// Parse a JSON tree document
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Source` if the document is not a valid tree.
    pub fn parse(document: &str) -> Result<Self, FetchError> {
        let entry: JsonEntry = serde_json::from_str(document)?;
        let mut listings = HashMap::new();
        let root = Self::index(entry, &PathKey::root(), &mut listings);
        Ok(Self { root, listings })
    }

    /// Read and parse a JSON tree document from disk
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the file cannot be read or parsed.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, FetchError> {
        let document = tokio::fs::read_to_string(path).await?;
        Self::parse(&document)
    }

    /// Row for the top-level entry
    #[must_use]
    pub const fn root_row(&self) -> &Row {
        &self.root
    }

    fn index(entry: JsonEntry, parent: &PathKey, listings: &mut HashMap<String, Vec<Row>>) -> Row {
        let path = parent.child(entry.name);
        let kind = entry.kind.unwrap_or_else(|| {
            if entry.children.is_some() {
                DIR_KIND.to_string()
            } else {
                FILE_KIND.to_string()
            }
        });

        let row = Row {
            path,
            kind,
            fields: entry.fields,
        };

        if let Some(children) = entry.children {
            let rows = children
                .into_iter()
                .map(|child| Self::index(child, &row.path, listings))
                .collect();
            listings.insert(row.path_string(), rows);
        }

        row
    }
}

#[async_trait]
impl ContentSource for JsonSource {
    async fn fetch_children(&self, row: &Row) -> Result<Vec<Row>, FetchError> {
        if !row.is_dir() {
            return Err(FetchError::NotADirectory(row.path_string()));
        }
        self.listings
            .get(&row.path_string())
            .cloned()
            .ok_or_else(|| FetchError::NotFound(row.path_string()))
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Json
    }
}
