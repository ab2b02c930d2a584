//! Content sources
//!
//! A content source lists the children of a directory row. The tree model
//! never knows where rows come from; it only awaits
//! [`ContentSource::fetch_children`].
//!
//! # Implementations
//!
//! - [`FsSource`]: the local filesystem, via `tokio::fs`
//! - [`JsonSource`]: a nested JSON document loaded up front
//! - [`MockSource`]: generated, infinitely deep content for demos and tests

pub mod fs;
pub mod json;
pub mod mock;
pub mod traits;

pub use fs::FsSource;
pub use json::JsonSource;
pub use mock::{MockOptions, MockSource};
pub use traits::{ContentSource, SourceKind};
