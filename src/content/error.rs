//! Error types for content fetching
//!
//! A [`FetchError`] is raised when a content source cannot list the children
//! of a directory. Nodes recover from it locally: the previous child cache is
//! kept and the node stays dirty so the next call retries.

use thiserror::Error;

/// Errors that can occur while listing a directory
#[derive(Debug, Error)]
pub enum FetchError {
    /// I/O error from the backing store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The directory no longer exists
    #[error("Path '{0}' not found")]
    NotFound(String),

    /// A child listing was requested for a non-directory row
    #[error("'{0}' is not a directory")]
    NotADirectory(String),

    /// Any other failure reported by a content source
    #[error("Content source error: {0}")]
    Source(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Source(err.to_string())
    }
}
