//! Aggregate tree model
//!
//! [`TreeModel`] owns the root [`Node`] together with the current filter,
//! sort and selection, and keeps a flattened list of visible row keys in
//! sync with them. Intents that change what is visible end with a
//! re-flatten and a [`ModelEvent`] sent to every listener.
//!
//! The visible list stores [`PathKey`]s rather than references, so the tree
//! can be mutated freely between reads; [`TreeModel::visible_rows`] resolves
//! the keys on demand.

mod clipboard;
mod crumbs;
mod error;
mod renamer;
mod selection;

pub use clipboard::{ClipMode, ClipboardModel, PasteRequest};
pub use crumbs::CrumbModel;
pub use error::{ModelError, Result};
pub use renamer::Renamer;
pub use selection::{SelectionModel, find_range};

use crate::content::{FetchError, Node, PATH_COLUMN, Row};
use crate::filtersort::{FilterSpec, SortSpec, flatten};
use crate::path::PathKey;
use crate::source::ContentSource;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// Behaviour switches for a [`TreeModel`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelOptions {
    /// Explicit column list; derived from the root row when unset
    #[serde(default)]
    pub column_names: Option<Vec<String>>,

    /// Refetch listings on every expand, filter and sort
    #[serde(default)]
    pub do_refetch: bool,
}

/// What triggered a change notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Opened,
    Expanded,
    Collapsed,
    Filtered,
    Sorted,
    Refreshed,
    Selection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelEvent {
    pub kind: ChangeKind,
    /// Column widths should be recomputed
    pub autosize: bool,
}

pub type Listener = Box<dyn FnMut(&ModelEvent) + Send>;

pub struct TreeModel {
    source: Arc<dyn ContentSource>,
    options: ModelOptions,
    root: Option<Node>,
    columns: Vec<String>,
    filter: FilterSpec,
    sort: SortSpec,
    selection: SelectionModel,
    visible: Vec<PathKey>,
    parents: HashMap<String, Row>,
    crumbs: CrumbModel,
    clipboard: ClipboardModel,
    renamer_path: Option<PathKey>,
    listeners: Vec<Listener>,
}

impl TreeModel {
    /// Create an empty model; call [`TreeModel::open`] to load a root
    #[must_use]
    pub fn new(source: Arc<dyn ContentSource>, options: ModelOptions) -> Self {
        Self {
            source,
            options,
            root: None,
            columns: Vec::new(),
            filter: FilterSpec::default(),
            sort: SortSpec::default(),
            selection: SelectionModel::default(),
            visible: Vec::new(),
            parents: HashMap::new(),
            crumbs: CrumbModel::default(),
            clipboard: ClipboardModel::default(),
            renamer_path: None,
            listeners: Vec::new(),
        }
    }

    /// Register a listener called after every recomputation
    pub fn on_change(&mut self, listener: impl FnMut(&ModelEvent) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    #[must_use]
    pub const fn options(&self) -> &ModelOptions {
        &self.options
    }

    #[must_use]
    pub const fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// Data columns, not including the leading path column
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Display position of `column`; the path column is 0
    #[must_use]
    pub fn column_index(&self, column: &str) -> Option<usize> {
        if column == PATH_COLUMN {
            return Some(0);
        }
        self.columns.iter().position(|c| c == column).map(|ix| ix + 1)
    }

    #[must_use]
    pub const fn filter_spec(&self) -> &FilterSpec {
        &self.filter
    }

    #[must_use]
    pub const fn sort_spec(&self) -> &SortSpec {
        &self.sort
    }

    #[must_use]
    pub const fn crumbs(&self) -> &CrumbModel {
        &self.crumbs
    }

    #[must_use]
    pub const fn clipboard(&self) -> &ClipboardModel {
        &self.clipboard
    }

    #[must_use]
    pub const fn selection_model(&self) -> &SelectionModel {
        &self.selection
    }

    /// Number of path segments of the current root
    #[must_use]
    pub fn path_depth(&self) -> usize {
        self.root.as_ref().map_or(0, Node::depth)
    }

    #[must_use]
    pub fn visible_keys(&self) -> &[PathKey] {
        &self.visible
    }

    /// Current display rows, in order
    #[must_use]
    pub fn visible_rows(&self) -> Vec<&Node> {
        let Some(root) = self.root.as_ref() else {
            return Vec::new();
        };
        self.visible.iter().filter_map(|key| root.find(key)).collect()
    }

    /// The display row at `ix`
    #[must_use]
    pub fn row(&self, ix: usize) -> Option<&Node> {
        let key = self.visible.get(ix)?;
        self.root.as_ref()?.find(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// A root is open but nothing is visible
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.visible.is_empty() && !self.columns.is_empty()
    }

    /// Row of the directory that listed `key`, if it was expanded in this view
    #[must_use]
    pub fn parent_of(&self, key: &PathKey) -> Option<&Row> {
        self.parents.get(&key.joined())
    }

    /// Make `row` the new root
    ///
    /// The breadcrumb trail is extended with every known ancestor of `row`
    /// below the current root, then `row` itself. Sort, filter and selection
    /// are reset. Returns `Ok(false)` for non-directory rows.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Fetch` if the root listing fails; the model is
    /// left unchanged.
    pub async fn open(&mut self, row: Row) -> Result<bool> {
        if !row.is_dir() {
            debug!(path = %row.path, "ignoring open of non-directory");
            return Ok(false);
        }

        let trail = self.ancestor_trail(row.clone());
        let (root, visible) = load_root(self.source.as_ref(), row).await?;

        self.crumbs.extend(trail);
        self.install_root(root, visible);
        Ok(true)
    }

    /// Reopen the breadcrumb at `ix`, dropping every crumb after it
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Fetch` if the listing fails; crumbs are unchanged.
    pub async fn revert_crumb(&mut self, ix: usize) -> Result<bool> {
        let Some(row) = self.crumbs.get(ix).cloned() else {
            warn!(ix, len = self.crumbs.len(), "revert to missing crumb");
            return Ok(false);
        };

        let (root, visible) = load_root(self.source.as_ref(), row).await?;

        if let Some(row) = self.crumbs.revert(ix) {
            self.crumbs.extend([row]);
        }
        self.install_root(root, visible);
        Ok(true)
    }

    /// Expand the directory at display row `ix` and show its subtree
    ///
    /// Leaves, expanded rows and out-of-range indices are no-ops returning
    /// `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Fetch` if a listing fails; the row stays collapsed.
    pub async fn expand_row(&mut self, ix: usize) -> Result<bool> {
        let Some(key) = self.visible.get(ix).cloned() else {
            warn!(ix, len = self.visible.len(), "expand on stale row index");
            return Ok(false);
        };
        let depth = self.path_depth();
        let refetch = self.options.do_refetch;
        let source = self.source.as_ref();

        let Some(node) = self.root.as_mut().and_then(|root| root.find_mut(&key)) else {
            return Ok(false);
        };
        if !node.is_dir() || node.is_expanded() {
            return Ok(false);
        }

        if refetch {
            node.invalidate(false);
        }
        let subtree = match expand_subtree(node, source, &self.filter, &self.sort, depth).await {
            Ok(keys) => keys,
            Err(e) => {
                node.collapse();
                return Err(e.into());
            }
        };

        for child in node.children() {
            self.parents.insert(child.path_string(), node.row().clone());
        }

        debug!(path = %key, count = subtree.len(), "row expanded");
        self.visible.splice(ix + 1..ix + 1, subtree);
        self.notify(ChangeKind::Expanded, true);
        Ok(true)
    }

    /// Collapse display row `ix` and hide everything below it
    ///
    /// The row's child cache is kept. Returns `false` for an out-of-range
    /// index.
    pub fn collapse_row(&mut self, ix: usize) -> bool {
        let Some(key) = self.visible.get(ix).cloned() else {
            warn!(ix, len = self.visible.len(), "collapse on stale row index");
            return false;
        };

        let depth = key.depth();
        let end = self.visible[ix + 1..]
            .iter()
            .position(|k| k.depth() <= depth)
            .map_or(self.visible.len(), |offset| ix + 1 + offset);
        self.visible.drain(ix + 1..end);

        if let Some(node) = self.root.as_mut().and_then(|root| root.find_mut(&key)) {
            node.collapse();
        }

        self.notify(ChangeKind::Collapsed, true);
        true
    }

    /// Set (or with an empty pattern, clear) the filter on `column`
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Fetch` if a visible listing fails to refresh.
    pub async fn set_filter(&mut self, column: &str, pattern: &str) -> Result<()> {
        if self.column_index(column).is_none() {
            debug!(column, "filter on a column the root does not have");
        }

        let mut filter = self.filter.clone();
        filter.set(column, pattern);
        let sort = self.sort.clone();
        self.recompute(filter, sort, ChangeKind::Filtered, true).await
    }

    /// Advance the sort on `column`, or just re-sort with `None`
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Fetch` if a visible listing fails to refresh.
    pub async fn sort(&mut self, column: Option<&str>, multisort: bool) -> Result<()> {
        let sort = column.map_or_else(|| self.sort.clone(), |c| self.sort.updated(c, multisort));
        let filter = self.filter.clone();
        self.recompute(filter, sort, ChangeKind::Sorted, false).await
    }

    /// Mark cached listings stale without refetching
    ///
    /// `None` marks the whole tree. Otherwise each directory row marks
    /// itself and each leaf marks its parent; rows that are not cached are
    /// skipped.
    pub fn invalidate(&mut self, rows: Option<&[Row]>) {
        let Some(root) = self.root.as_mut() else {
            return;
        };

        let Some(rows) = rows else {
            root.invalidate(true);
            return;
        };

        let dirs: HashSet<String> = rows
            .iter()
            .map(|row| {
                if row.is_dir() {
                    row.path_string()
                } else {
                    row.path.parent().unwrap_or_default().joined()
                }
            })
            .collect();

        let mut marked = 0usize;
        root.for_each_cached_mut(&mut |node: &mut Node| {
            if dirs.contains(&node.path_string()) {
                node.invalidate(false);
                marked += 1;
            }
        });
        debug!(requested = dirs.len(), marked, "listings invalidated");
    }

    /// [`TreeModel::invalidate`] followed by a re-flatten
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Fetch` if a visible listing fails to refresh.
    pub async fn refresh(&mut self, rows: Option<&[Row]>) -> Result<()> {
        self.invalidate(rows);
        let filter = self.filter.clone();
        let sort = self.sort.clone();
        self.recompute(filter, sort, ChangeKind::Refreshed, false).await
    }

    /// Click (or ctrl-click with `additive`) on display row `ix`
    pub fn toggle_select(&mut self, ix: usize, additive: bool) -> bool {
        let Some(key) = self.visible.get(ix).map(PathKey::joined) else {
            warn!(ix, len = self.visible.len(), "select on stale row index");
            return false;
        };

        self.selection.toggle(&key, additive);
        self.notify(ChangeKind::Selection, false);
        true
    }

    /// Shift-click on display row `ix`
    pub fn select_range(&mut self, ix: usize) -> bool {
        let Some(end) = self.visible.get(ix).map(PathKey::joined) else {
            warn!(ix, len = self.visible.len(), "range select on stale row index");
            return false;
        };

        let keys: Vec<String> = self.visible.iter().map(PathKey::joined).collect();
        self.selection.select_range(&end, &keys);
        self.notify(ChangeKind::Selection, false);
        true
    }

    /// Selected rows that are currently visible, in display order
    #[must_use]
    pub fn selection(&self) -> Vec<&Node> {
        self.selection.selected(&self.visible_rows())
    }

    #[must_use]
    pub fn selected_last(&self) -> Option<&Node> {
        self.selection.last_selected(&self.visible_rows())
    }

    /// Begin renaming display row `ix`
    pub fn start_rename(&mut self, ix: usize) -> Option<Renamer> {
        let key = self.visible.get(ix)?.clone();
        let renamer = Renamer::new(self.root.as_ref()?.find(&key)?);
        self.renamer_path = Some(key);
        Some(renamer)
    }

    pub fn set_renamer_path(&mut self, path: Option<PathKey>) {
        self.renamer_path = path;
    }

    #[must_use]
    pub const fn renamer_path(&self) -> Option<&PathKey> {
        self.renamer_path.as_ref()
    }

    /// Whether `node` is the one being renamed
    #[must_use]
    pub fn is_renaming(&self, node: &Node) -> bool {
        self.renamer_path
            .as_ref()
            .is_some_and(|path| node.equal_path(path))
    }

    /// Copy the selected rows to the clipboard, returning how many
    pub fn copy_selection(&mut self) -> usize {
        let rows = self.selected_rows();
        let count = rows.len();
        self.clipboard.copy(rows);
        count
    }

    /// Cut the selected rows to the clipboard, returning how many
    pub fn cut_selection(&mut self) -> usize {
        let rows = self.selected_rows();
        let count = rows.len();
        self.clipboard.cut(rows);
        count
    }

    /// Paste request targeting display row `ix`
    ///
    /// A directory row is the destination itself; a leaf pastes into its
    /// parent.
    #[must_use]
    pub fn paste_into(&self, ix: usize) -> Option<PasteRequest> {
        let node = self.row(ix)?;
        let destination = if node.is_dir() {
            node.row().clone()
        } else {
            let parent = node.path().parent()?;
            self.root.as_ref()?.find(&parent)?.row().clone()
        };
        self.clipboard.paste(destination)
    }

    fn selected_rows(&self) -> Vec<Row> {
        self.selection()
            .into_iter()
            .map(|node| node.row().clone())
            .collect()
    }

    fn ancestor_trail(&self, row: Row) -> Vec<Row> {
        let mut trail = vec![row];
        while let Some(parent) = trail
            .last()
            .and_then(|last| self.parents.get(&last.path_string()))
        {
            trail.push(parent.clone());
        }
        trail.reverse();
        trail
    }

    fn install_root(&mut self, root: Node, visible: Vec<PathKey>) {
        self.columns = match &self.options.column_names {
            Some(names) => names
                .iter()
                .filter(|c| c.as_str() != PATH_COLUMN)
                .cloned()
                .collect(),
            None => root
                .row()
                .column_names()
                .filter(|c| *c != PATH_COLUMN)
                .map(str::to_string)
                .collect(),
        };

        debug!(
            path = %root.path(),
            columns = self.columns.len(),
            visible = visible.len(),
            "root opened"
        );

        self.parents.clear();
        self.root = Some(root);
        self.filter.clear();
        self.sort = SortSpec::default();
        self.selection.clear();
        self.renamer_path = None;
        self.visible = visible;
        self.notify(ChangeKind::Opened, true);
    }

    /// Refresh the root and rebuild the whole visible list
    ///
    /// `filter` and `sort` are only committed if every fetch succeeds.
    async fn recompute(
        &mut self,
        filter: FilterSpec,
        sort: SortSpec,
        kind: ChangeKind,
        autosize: bool,
    ) -> Result<()> {
        let depth = self.path_depth();
        let refetch = self.options.do_refetch;
        let source = self.source.as_ref();

        if let Some(root) = self.root.as_mut() {
            if refetch {
                root.invalidate(false);
            }
            root.expand(source).await?;
            self.visible = keys_of(&flatten(root, source, &filter, &sort, depth).await?);
        }

        self.filter = filter;
        self.sort = sort;
        self.notify(kind, autosize);
        Ok(())
    }

    fn notify(&mut self, kind: ChangeKind, autosize: bool) {
        let event = ModelEvent { kind, autosize };
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

async fn load_root(source: &dyn ContentSource, row: Row) -> Result<(Node, Vec<PathKey>)> {
    let mut root = Node::new(row);
    root.expand(source).await?;

    let depth = root.depth();
    let visible = keys_of(
        &flatten(&mut root, source, &FilterSpec::default(), &SortSpec::default(), depth).await?,
    );
    Ok((root, visible))
}

async fn expand_subtree(
    node: &mut Node,
    source: &dyn ContentSource,
    filter: &FilterSpec,
    sort: &SortSpec,
    path_depth: usize,
) -> std::result::Result<Vec<PathKey>, FetchError> {
    node.expand(source).await?;
    Ok(keys_of(&flatten(node, source, filter, sort, path_depth).await?))
}

fn keys_of(nodes: &[&Node]) -> Vec<PathKey> {
    nodes.iter().map(|node| node.path().clone()).collect()
}
