//! Content rows and the lazily-loaded node tree
//!
//! - `row`: [`Row`] and [`Value`], the data handed over by a content source
//! - `node`: [`Node`], the cached, expandable wrapper around one row
//! - `error`: [`FetchError`], raised when a child listing fails

pub mod error;
pub mod node;
pub mod row;

pub use error::FetchError;
pub use node::Node;
pub use row::{DIR_KIND, KIND_COLUMN, PATH_COLUMN, Row, Value};
