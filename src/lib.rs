//! Treefinder - a lazily loaded, sortable and filterable tree model
//!
//! This library models hierarchical content (directories, JSON documents,
//! generated trees) as a tree of nodes whose children are fetched on demand
//! from a [`source::ContentSource`]. A [`model::TreeModel`] keeps the expanded
//! part of the tree flattened into display rows, applying multi-column
//! filters and sorts, and tracks selection for a view layer.

use thiserror::Error;

pub mod cli;
pub mod commands;
pub mod config;
pub mod content;
pub mod filtersort;
pub mod format;
pub mod model;
pub mod output;
pub mod path;
pub mod source;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum TreefinderError {
    /// Tree model error
    #[error("Model error: {0}")]
    ModelError(#[from] model::ModelError),
    /// Content source error
    #[error("Source error: {0}")]
    FetchError(#[from] content::FetchError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// JSON output error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
