//! Breadcrumb trail of opened directories

use crate::content::Row;

/// Rows of every directory opened on the way to the current root
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrumbModel {
    rows: Vec<Row>,
}

impl CrumbModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `rows` and return the new last crumb
    pub fn extend(&mut self, rows: impl IntoIterator<Item = Row>) -> Option<&Row> {
        self.rows.extend(rows);
        self.rows.last()
    }

    /// Keep crumbs `0..=ix`, then pop and return the last one
    ///
    /// The returned row is meant to be reopened, which pushes it back.
    pub fn revert(&mut self, ix: usize) -> Option<Row> {
        self.rows.truncate(ix + 1);
        self.rows.pop()
    }

    #[must_use]
    pub fn get(&self, ix: usize) -> Option<&Row> {
        self.rows.get(ix)
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Display name of each crumb
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.path.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_and_names() {
        let mut crumbs = CrumbModel::new();
        let last = crumbs.extend([Row::dir(["r"]), Row::dir(["r", "a"])]).cloned();

        assert_eq!(last, Some(Row::dir(["r", "a"])));
        assert_eq!(crumbs.names(), vec!["r", "a"]);
    }

    #[test]
    fn test_revert() {
        let mut crumbs = CrumbModel::new();
        crumbs.extend([Row::dir(["r"]), Row::dir(["r", "a"]), Row::dir(["r", "a", "b"])]);

        assert_eq!(crumbs.revert(1), Some(Row::dir(["r", "a"])));
        assert_eq!(crumbs.names(), vec!["r"]);
    }

    #[test]
    fn test_revert_past_end() {
        let mut crumbs = CrumbModel::new();
        crumbs.extend([Row::dir(["r"])]);

        assert_eq!(crumbs.revert(5), Some(Row::dir(["r"])));
        assert!(crumbs.is_empty());
        assert_eq!(crumbs.revert(0), None);
    }
}
