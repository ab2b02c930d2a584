//! Multi-row selection with shift-click range semantics
//!
//! Rows are identified by their joined path strings, so a selection
//! survives re-sorting and refetches. The pivot anchors range selection and
//! is always a member of the set (or `None` when the set is empty).

use crate::content::Node;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionModel {
    selected: HashSet<String>,
    pivot: Option<String>,
    last_touched: Option<String>,
    last_range: Vec<String>,
}

impl SelectionModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.pivot = None;
        self.last_touched = None;
        self.last_range.clear();
    }

    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.selected.contains(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    #[must_use]
    pub fn pivot(&self) -> Option<&str> {
        self.pivot.as_deref()
    }

    #[must_use]
    pub fn last_touched(&self) -> Option<&str> {
        self.last_touched.as_deref()
    }

    /// Click (`additive = false`) or ctrl-click (`additive = true`) on `key`
    ///
    /// A plain click replaces the selection. A ctrl-click keeps everything
    /// selected so far, including the last range. Selecting a row makes it
    /// the pivot; deselecting the pivot leaves no pivot until the next one.
    pub fn toggle(&mut self, key: &str, additive: bool) {
        if additive {
            self.last_range.clear();
        } else {
            self.clear();
        }

        if self.selected.remove(key) {
            // the pivot always names a selected row
            if self.pivot.as_deref().is_some_and(|p| !self.selected.contains(p)) {
                self.pivot = None;
            }
        } else {
            self.selected.insert(key.to_string());
            self.pivot = Some(key.to_string());
        }
        self.last_touched = Some(key.to_string());
    }

    /// Shift-click on `end_key`
    ///
    /// The previous range is dropped first, so repeated shift-clicks move
    /// the range end instead of growing the selection. The pivot and the
    /// last-touched row are left alone.
    pub fn select_range(&mut self, end_key: &str, visible_keys: &[String]) {
        for key in self.last_range.drain(..) {
            self.selected.remove(&key);
        }

        let range = find_range(self.pivot.as_deref(), end_key, visible_keys);
        self.selected.extend(range.iter().cloned());
        self.last_range = range;
    }

    /// Selected nodes, in `visible` order
    #[must_use]
    pub fn selected<'a>(&self, visible: &[&'a Node]) -> Vec<&'a Node> {
        visible
            .iter()
            .filter(|node| self.has(&node.path_string()))
            .copied()
            .collect()
    }

    /// The node last clicked, if still visible
    #[must_use]
    pub fn last_selected<'a>(&self, visible: &[&'a Node]) -> Option<&'a Node> {
        let last = self.last_touched.as_deref()?;
        visible.iter().find(|node| node.path_string() == last).copied()
    }
}

/// Keys strictly after the pivot up to and including `end`, in display order
///
/// When `end` comes before the pivot the run is `end` up to (not including)
/// the pivot. A missing pivot counts as "before the first row". An `end`
/// that is not in `ordered` yields nothing.
#[must_use]
pub fn find_range(pivot: Option<&str>, end: &str, ordered: &[String]) -> Vec<String> {
    if pivot == Some(end) {
        return Vec::new();
    }
    let Some(end_ix) = ordered.iter().position(|k| k == end) else {
        return Vec::new();
    };

    match pivot.and_then(|p| ordered.iter().position(|k| k == p)) {
        Some(pivot_ix) if pivot_ix > end_ix => ordered[end_ix..pivot_ix].to_vec(),
        Some(pivot_ix) => ordered[pivot_ix + 1..=end_ix].to_vec(),
        None => ordered[..=end_ix].to_vec(),
    }
}
