//! Filtering, sorting and flattening of the visible tree
//!
//! - [`FilterSpec`]: per-column patterns, ANDed together
//! - [`SortSpec`]: ordered multi-column sort with the asc → desc → off cycle
//! - [`flatten`]: turns the expanded part of a tree into display rows

mod filter;
mod flatten;
mod sort;

pub use filter::{FilterSpec, value_matches};
pub use flatten::{flatten, flatten_cached};
pub use sort::{SortDirection, SortEntry, SortSpec, compare_values, locale_cmp, update_sort};
