//! Model error types
//!
//! Intents only fail when a content source does. Bad row indices and unknown
//! columns are not errors: index-based intents report `Ok(false)` and unknown
//! columns are skipped by the filter and sort.

use crate::content::FetchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// A child listing needed by the intent failed
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),
}

/// Result type for model intents
pub type Result<T> = std::result::Result<T, ModelError>;
