//! The recursive node type of the tree
//!
//! A [`Node`] wraps one [`Row`] and adds the browsing state on top of it:
//! the expand flag, the lazily-fetched child cache and the dirty flags that
//! drive refetching. Children are owned exclusively by their parent; every
//! other part of the model refers to nodes by path.

use super::error::FetchError;
use super::row::Row;
use crate::path::PathKey;
use crate::source::ContentSource;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, warn};

/// A row plus its cached children and expand state
#[derive(Debug, Clone)]
pub struct Node {
    row: Row,
    is_dir: bool,
    is_expanded: bool,
    children: Option<Vec<Node>>,
    child_index: HashMap<String, usize>,
    children_dirty: bool,
    sort_dirty: bool,
}

impl Node {
    #[must_use]
    pub fn new(row: Row) -> Self {
        Self {
            is_dir: row.is_dir(),
            row,
            is_expanded: false,
            children: None,
            child_index: HashMap::new(),
            children_dirty: true,
            sort_dirty: false,
        }
    }

    /// Replace the wrapped row, keeping expand state and the child cache
    ///
    /// A node whose row stops being a directory loses its cache and expand
    /// flag, since leaves never hold children.
    pub fn reinit(&mut self, row: Row) {
        self.is_dir = row.is_dir();
        self.row = row;

        if !self.is_dir {
            self.is_expanded = false;
            self.children = None;
            self.child_index.clear();
        }
    }

    #[must_use]
    pub const fn row(&self) -> &Row {
        &self.row
    }

    #[must_use]
    pub const fn path(&self) -> &PathKey {
        &self.row.path
    }

    /// Joined path identity
    #[must_use]
    pub fn path_string(&self) -> String {
        self.row.path.joined()
    }

    /// Last path segment, empty at the root
    #[must_use]
    pub fn name(&self) -> &str {
        self.row.path.name()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.row.path.depth()
    }

    #[must_use]
    pub const fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Whether this node can hold children at all
    #[must_use]
    pub const fn has_children(&self) -> bool {
        self.is_dir
    }

    #[must_use]
    pub const fn is_expanded(&self) -> bool {
        self.is_expanded
    }

    /// True until the next successful fetch after creation or invalidation
    #[must_use]
    pub const fn is_children_dirty(&self) -> bool {
        self.children_dirty
    }

    /// True when the children changed since they were last sorted
    #[must_use]
    pub const fn is_sort_dirty(&self) -> bool {
        self.sort_dirty
    }

    /// Whether the child cache has been filled at least once
    #[must_use]
    pub const fn is_fetched(&self) -> bool {
        self.children.is_some()
    }

    /// Cached children, empty when nothing was fetched yet
    #[must_use]
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Node] {
        self.children.as_deref_mut().unwrap_or(&mut [])
    }

    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.as_ref().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn equal_path(&self, other: &PathKey) -> bool {
        self.row.path == *other
    }

    /// Path below `depth`, optionally with every parent segment replaced by `fill`
    #[must_use]
    pub fn path_at_depth(&self, depth: usize, fill: Option<&str>) -> Vec<String> {
        match fill {
            Some(fill) => self.row.path.at_depth_filled(depth, fill),
            None => self.row.path.at_depth(depth).to_vec(),
        }
    }

    /// Fetch the children if needed and return them
    ///
    /// Leaves return an empty slice without touching the source. A fetched,
    /// clean cache is returned as-is unless `force_refresh` is set.
    ///
    /// # Errors
    ///
    /// Returns the source's `FetchError`. The previous cache is kept and the
    /// node stays dirty, so the next call retries.
    pub async fn get_children(
        &mut self,
        source: &dyn ContentSource,
        force_refresh: bool,
    ) -> Result<&[Node], FetchError> {
        if !self.is_dir {
            return Ok(&[]);
        }

        let cached = self.children.is_some() && !self.children_dirty;
        if cached && !force_refresh {
            return Ok(self.children());
        }

        match source.fetch_children(&self.row).await {
            Ok(rows) => {
                self.reseat(rows);
                Ok(self.children())
            }
            Err(e) => {
                warn!(path = %self.row.path, error = %e, "child listing failed");
                self.children_dirty = true;
                Err(e)
            }
        }
    }

    /// Look up a direct child by name, fetching first
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` if the listing fails.
    pub async fn get_child(
        &mut self,
        source: &dyn ContentSource,
        name: &str,
        refresh: bool,
    ) -> Result<Option<&Node>, FetchError> {
        let children = self.get_children(source, refresh).await?;
        Ok(children.iter().find(|c| c.name() == name))
    }

    /// Mark expanded and fetch the children
    ///
    /// Leaves ignore the call. The node stays expanded if the fetch fails so
    /// a later flatten retries it.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` if the listing fails.
    pub async fn expand(&mut self, source: &dyn ContentSource) -> Result<(), FetchError> {
        if !self.is_dir {
            return Ok(());
        }
        self.is_expanded = true;
        self.get_children(source, false).await?;
        Ok(())
    }

    /// Clear the expand flag; the child cache is kept
    pub fn collapse(&mut self) {
        self.is_expanded = false;
    }

    /// Force the next `get_children` to refetch
    pub fn invalidate(&mut self, recursive: bool) {
        self.children_dirty = true;

        if recursive && let Some(children) = self.children.as_mut() {
            for child in children {
                child.invalidate(true);
            }
        }
    }

    /// Stable-sort the cached children by their rows
    ///
    /// The path index is rebuilt afterwards, so [`Node::find`] and the next
    /// reseat see the new positions.
    pub fn sort_children_by(&mut self, mut compare: impl FnMut(&Row, &Row) -> Ordering) {
        if let Some(children) = self.children.as_mut() {
            children.sort_by(|l, r| compare(&l.row, &r.row));
        }
        self.rebuild_index();
        self.sort_dirty = false;
    }

    /// Find a cached descendant (or self) by path
    #[must_use]
    pub fn find(&self, key: &PathKey) -> Option<&Node> {
        if self.row.path == *key {
            return Some(self);
        }
        let ix = self.child_slot(key)?;
        self.children.as_ref()?.get(ix)?.find(key)
    }

    /// Mutable variant of [`Node::find`]
    pub fn find_mut(&mut self, key: &PathKey) -> Option<&mut Node> {
        if self.row.path == *key {
            return Some(self);
        }
        let ix = self.child_slot(key)?;
        self.children.as_mut()?.get_mut(ix)?.find_mut(key)
    }

    /// Apply `f` to this node and every cached descendant, expanded or not
    pub fn for_each_cached_mut(&mut self, f: &mut impl FnMut(&mut Node)) {
        f(self);
        if let Some(children) = self.children.as_mut() {
            for child in children {
                child.for_each_cached_mut(f);
            }
        }
    }

    /// Position of the child on the way to `key`
    fn child_slot(&self, key: &PathKey) -> Option<usize> {
        let depth = self.depth();
        if key.depth() <= depth || !key.starts_with(&self.row.path) {
            return None;
        }
        let child_key = key.segments()[..=depth].join("/");
        self.child_index.get(&child_key).copied()
    }

    /// Replace the child cache with freshly fetched rows
    ///
    /// Rows whose path matches an existing child keep that child's node, so
    /// expand state and nested caches survive a refresh. Children absent from
    /// the new listing are dropped.
    fn reseat(&mut self, rows: Vec<Row>) {
        let mut previous: Vec<Option<Node>> = self
            .children
            .take()
            .unwrap_or_default()
            .into_iter()
            .map(Some)
            .collect();

        let mut reseated = 0usize;
        let mut children = Vec::with_capacity(rows.len());
        for row in rows {
            let existing = self
                .child_index
                .get(&row.path_string())
                .and_then(|&ix| previous.get_mut(ix))
                .and_then(Option::take);

            let node = match existing {
                Some(mut node) => {
                    node.reinit(row);
                    reseated += 1;
                    node
                }
                None => Self::new(row),
            };
            children.push(node);
        }

        debug!(
            path = %self.row.path,
            count = children.len(),
            reseated,
            "children fetched"
        );

        self.children = Some(children);
        self.rebuild_index();
        self.children_dirty = false;
        self.sort_dirty = true;
    }

    fn rebuild_index(&mut self) {
        self.child_index = self
            .children()
            .iter()
            .enumerate()
            .map(|(ix, child)| (child.path_string(), ix))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSource;

    fn text(path: &[&str]) -> Row {
        Row::new(path, "text")
    }

    fn source() -> RecordingSource {
        RecordingSource::new()
            .with_listing(&["r"], vec![Row::dir(["r", "a"]), text(&["r", "b"])])
            .with_listing(&["r", "a"], vec![text(&["r", "a", "x"])])
    }

    #[tokio::test]
    async fn test_leaf_never_caches_children() {
        let src = source();
        let mut leaf = Node::new(text(&["r", "b"]));

        assert!(leaf.get_children(&src, true).await.unwrap().is_empty());
        assert!(!leaf.is_fetched());
        assert_eq!(src.fetch_count("r/b"), 0);

        leaf.expand(&src).await.unwrap();
        assert!(!leaf.is_expanded());
        assert!(!leaf.is_fetched());
    }

    #[tokio::test]
    async fn test_get_children_fetches_once() {
        let src = source();
        let mut root = Node::new(Row::dir(["r"]));

        assert_eq!(root.get_children(&src, false).await.unwrap().len(), 2);
        assert_eq!(root.get_children(&src, false).await.unwrap().len(), 2);
        assert_eq!(src.fetch_count("r"), 1);
        assert!(!root.is_children_dirty());
    }

    #[tokio::test]
    async fn test_force_refresh_refetches() {
        let src = source();
        let mut root = Node::new(Row::dir(["r"]));

        root.get_children(&src, false).await.unwrap();
        root.get_children(&src, true).await.unwrap();
        assert_eq!(src.fetch_count("r"), 2);
    }

    #[tokio::test]
    async fn test_invalidate_triggers_refetch() {
        let src = source();
        let mut root = Node::new(Row::dir(["r"]));

        root.get_children(&src, false).await.unwrap();
        root.invalidate(false);
        assert!(root.is_children_dirty());
        root.get_children(&src, false).await.unwrap();
        assert_eq!(src.fetch_count("r"), 2);
    }

    #[tokio::test]
    async fn test_recursive_invalidate_reaches_cached_children() {
        let src = source();
        let mut root = Node::new(Row::dir(["r"]));
        root.expand(&src).await.unwrap();
        root.find_mut(&PathKey::from(["r", "a"]))
            .unwrap()
            .expand(&src)
            .await
            .unwrap();

        root.invalidate(true);
        let a = root.find(&PathKey::from(["r", "a"])).unwrap();
        assert!(a.is_children_dirty());
    }

    #[tokio::test]
    async fn test_reseat_preserves_expand_state() {
        let src = source();
        let mut root = Node::new(Row::dir(["r"]));
        root.expand(&src).await.unwrap();

        let a_key = PathKey::from(["r", "a"]);
        root.find_mut(&a_key).unwrap().expand(&src).await.unwrap();

        src.set_listing(
            &["r"],
            vec![
                Row::dir(["r", "a"]).with_field("size", 10u64),
                text(&["r", "c"]),
            ],
        );
        root.invalidate(false);
        let names: Vec<String> = root
            .get_children(&src, false)
            .await
            .unwrap()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["a", "c"]);

        let a = root.find(&a_key).unwrap();
        assert!(a.is_expanded());
        assert_eq!(a.child_count(), 1);
        assert!(a.row().fields.contains_key("size"));
        assert!(root.find(&PathKey::from(["r", "b"])).is_none());
    }

    #[tokio::test]
    async fn test_sorted_children_stay_reachable_by_path() {
        let src = RecordingSource::new()
            .with_listing(&["r"], vec![text(&["r", "b"]), Row::dir(["r", "a"])])
            .with_listing(&["r", "a"], vec![text(&["r", "a", "x"])]);
        let mut root = Node::new(Row::dir(["r"]));
        root.expand(&src).await.unwrap();

        let a_key = PathKey::from(["r", "a"]);
        root.sort_children_by(|l, r| l.path.name().cmp(r.path.name()));
        assert!(!root.is_sort_dirty());
        assert_eq!(root.children()[0].name(), "a");
        root.find_mut(&a_key).unwrap().expand(&src).await.unwrap();

        root.sort_children_by(|l, r| r.path.name().cmp(l.path.name()));
        assert_eq!(root.find(&a_key).map(Node::child_count), Some(1));
        assert_eq!(
            root.find(&PathKey::from(["r", "b"])).map(Node::path_string),
            Some("r/b".to_string())
        );

        // the refetch arrives in source order and must match nodes by path
        root.invalidate(false);
        root.get_children(&src, false).await.unwrap();
        let a = root.find(&a_key).unwrap();
        assert!(a.is_expanded());
        assert_eq!(a.child_count(), 1);
        assert!(!root.find(&PathKey::from(["r", "b"])).unwrap().is_expanded());
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_previous_cache() {
        let src = source();
        let mut root = Node::new(Row::dir(["r"]));
        root.get_children(&src, false).await.unwrap();

        src.fail_on(&["r"]);
        root.invalidate(false);
        assert!(root.get_children(&src, false).await.is_err());
        assert_eq!(root.child_count(), 2);
        assert!(root.is_children_dirty());

        src.clear_failures();
        root.get_children(&src, false).await.unwrap();
        assert!(!root.is_children_dirty());
        assert_eq!(src.fetch_count("r"), 3);
    }

    #[tokio::test]
    async fn test_first_fetch_failure_leaves_cache_empty() {
        let src = source();
        src.fail_on(&["r"]);
        let mut root = Node::new(Row::dir(["r"]));

        assert!(root.expand(&src).await.is_err());
        assert!(root.is_expanded());
        assert!(!root.is_fetched());
    }

    #[tokio::test]
    async fn test_get_child_by_name() {
        let src = source();
        let mut root = Node::new(Row::dir(["r"]));

        let b = root.get_child(&src, "b", false).await.unwrap();
        assert_eq!(b.map(Node::path_string), Some("r/b".to_string()));
        assert!(root.get_child(&src, "zzz", false).await.unwrap().is_none());
    }

    #[test]
    fn test_accessors() {
        let node = Node::new(Row::dir(["r", "a"]));
        assert_eq!(node.name(), "a");
        assert_eq!(node.path_string(), "r/a");
        assert!(node.has_children());
        assert_eq!(node.child_count(), 0);
        assert!(node.equal_path(&PathKey::from(["r", "a"])));
        assert_eq!(node.path_at_depth(1, None), vec!["a".to_string()]);
    }

    #[test]
    fn test_reinit_to_leaf_drops_cache() {
        let mut node = Node::new(Row::dir(["r", "a"]));
        node.is_expanded = true;
        node.children = Some(Vec::new());

        node.reinit(text(&["r", "a"]));
        assert!(!node.is_dir());
        assert!(!node.is_expanded());
        assert!(!node.is_fetched());
    }
}
