//! Copy / cut / paste bookkeeping
//!
//! The model never moves content itself: a paste produces a
//! [`PasteRequest`] for the host to carry out against its backend.

use crate::content::Row;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipMode {
    Copy,
    Cut,
}

/// What the host should do on paste
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PasteRequest {
    pub destination: Row,
    pub memo: Vec<Row>,
    pub mode: ClipMode,
}

#[derive(Debug, Clone, Default)]
pub struct ClipboardModel {
    memo: Vec<Row>,
    mode: Option<ClipMode>,
}

impl ClipboardModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copy(&mut self, rows: Vec<Row>) {
        self.memo = rows;
        self.mode = Some(ClipMode::Copy);
    }

    pub fn cut(&mut self, rows: Vec<Row>) {
        self.memo = rows;
        self.mode = Some(ClipMode::Cut);
    }

    /// Build a paste into `destination`; `None` when nothing was copied or cut
    ///
    /// The memo is kept, so a copy can be pasted repeatedly.
    #[must_use]
    pub fn paste(&self, destination: Row) -> Option<PasteRequest> {
        let mode = self.mode?;
        Some(PasteRequest {
            destination,
            memo: self.memo.clone(),
            mode,
        })
    }

    #[must_use]
    pub fn memo(&self) -> &[Row] {
        &self.memo
    }

    #[must_use]
    pub const fn mode(&self) -> Option<ClipMode> {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paste_without_memo() {
        let clipboard = ClipboardModel::new();
        assert!(clipboard.paste(Row::dir(["r"])).is_none());
    }

    #[test]
    fn test_copy_then_paste() {
        let mut clipboard = ClipboardModel::new();
        clipboard.copy(vec![Row::new(["r", "a.txt"], "text")]);

        let request = clipboard.paste(Row::dir(["r", "b"])).unwrap();
        assert_eq!(request.mode, ClipMode::Copy);
        assert_eq!(request.memo.len(), 1);
        assert_eq!(request.destination, Row::dir(["r", "b"]));

        // still pasteable
        assert!(clipboard.paste(Row::dir(["r", "c"])).is_some());
    }

    #[test]
    fn test_cut_replaces_memo() {
        let mut clipboard = ClipboardModel::new();
        clipboard.copy(vec![Row::new(["r", "a"], "text")]);
        clipboard.cut(vec![Row::new(["r", "b"], "text"), Row::new(["r", "c"], "text")]);

        assert_eq!(clipboard.mode(), Some(ClipMode::Cut));
        assert_eq!(clipboard.memo().len(), 2);
    }
}
