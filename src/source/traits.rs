use async_trait::async_trait;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::content::{FetchError, Row};

/// Kind of content source implementation
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Real directories on the local filesystem
    #[default]
    Fs,
    /// A nested JSON tree document
    Json,
    /// Generated, infinitely deep mock content
    Mock,
}

/// Trait for backends that list the children of a directory row
///
/// Implementations are only asked about rows whose kind is `"dir"`. An empty
/// directory is `Ok(vec![])`, never an error.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// List the direct children of `row`.
    ///
    /// # Errors
    /// Returns `FetchError` if the listing cannot be produced.
    async fn fetch_children(&self, row: &Row) -> Result<Vec<Row>, FetchError>;

    /// Get the kind of source implementation
    #[must_use]
    fn kind(&self) -> SourceKind;
}
