//! Depth-first flattening of the expanded part of a tree
//!
//! Flattening runs in two phases. The async phase walks the expanded nodes,
//! fetching any stale or missing listings and re-sorting each child list in
//! place. The sync phase then emits nodes in pre-order, descending only into
//! expanded directories, and drops rows the filter rejects.

use super::filter::FilterSpec;
use super::sort::SortSpec;
use crate::content::{FetchError, Node};
use crate::source::ContentSource;
use futures::FutureExt;
use futures::future::BoxFuture;

/// Visible rows below `root`, in display order
///
/// The root itself is not emitted. A root that has never been fetched yields
/// nothing; fetching it is the caller's job. `path_depth` is the number of
/// leading path segments stripped before path filters are matched.
///
/// # Errors
///
/// Returns the first `FetchError` met while refreshing an expanded node.
pub async fn flatten<'a>(
    root: &'a mut Node,
    source: &dyn ContentSource,
    filter: &FilterSpec,
    sort: &SortSpec,
    path_depth: usize,
) -> Result<Vec<&'a Node>, FetchError> {
    if root.is_fetched() {
        prepare(root, source, sort).await?;
    }
    Ok(flatten_cached(root, filter, path_depth))
}

/// Sync half of [`flatten`]: no fetching, no sorting
#[must_use]
pub fn flatten_cached<'a>(root: &'a Node, filter: &FilterSpec, path_depth: usize) -> Vec<&'a Node> {
    let mut out = Vec::new();
    collect(root, &mut out);

    if filter.any() {
        out.retain(|node| filter.matches(node.row(), path_depth));
    }
    out
}

fn prepare<'a>(
    node: &'a mut Node,
    source: &'a dyn ContentSource,
    sort: &'a SortSpec,
) -> BoxFuture<'a, Result<(), FetchError>> {
    async move {
        node.get_children(source, false).await?;
        node.sort_children_by(|l, r| sort.compare(l, r));

        for child in node.children_mut() {
            if child.is_expanded() {
                prepare(child, source, sort).await?;
            }
        }
        Ok(())
    }
    .boxed()
}

fn collect<'a>(node: &'a Node, out: &mut Vec<&'a Node>) {
    for child in node.children() {
        out.push(child);
        if child.is_expanded() {
            collect(child, out);
        }
    }
}
