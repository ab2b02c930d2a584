//! Filesystem content source
//!
//! Rows are keyed by a path whose first segment names the base directory;
//! the remaining segments are resolved below it. Each row carries a
//! `modified` date, a `size` (files only) and a `writable` flag.

use super::traits::{ContentSource, SourceKind};
use crate::content::{DIR_KIND, FetchError, Row};
use crate::path::PathKey;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Kind string for regular files
pub const FILE_KIND: &str = "file";

/// Kind string for symbolic links
pub const SYMLINK_KIND: &str = "symlink";

/// Lists directories on the local filesystem
#[derive(Debug, Clone)]
pub struct FsSource {
    base: PathBuf,
    show_hidden: bool,
}

impl FsSource {
    #[must_use]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            show_hidden: false,
        }
    }

    /// Include dot-files in listings
    #[must_use]
    pub const fn with_hidden(mut self, show_hidden: bool) -> Self {
        self.show_hidden = show_hidden;
        self
    }

    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Row for the base directory itself
    #[must_use]
    pub fn root_row(&self) -> Row {
        let name = self
            .base
            .file_name()
            .map_or_else(|| self.base.display().to_string(), |n| n.to_string_lossy().to_string());
        Row::dir(PathKey::new(vec![name]))
    }

    /// Map a row path back onto the filesystem
    #[must_use]
    pub fn resolve(&self, key: &PathKey) -> PathBuf {
        key.at_depth(1)
            .iter()
            .fold(self.base.clone(), |path, segment| path.join(segment))
    }

    async fn entry_row(parent: &PathKey, entry: &tokio::fs::DirEntry) -> Result<Row, FetchError> {
        let name = entry.file_name().to_string_lossy().to_string();
        let metadata = entry.metadata().await?;

        let kind = if metadata.is_dir() {
            DIR_KIND
        } else if metadata.file_type().is_symlink() {
            SYMLINK_KIND
        } else {
            FILE_KIND
        };

        let mut row = Row::new(parent.child(name), kind)
            .with_field("writable", !metadata.permissions().readonly());

        if let Ok(modified) = metadata.modified() {
            row = row.with_field("modified", DateTime::<Utc>::from(modified));
        }
        if metadata.is_file() {
            row = row.with_field("size", metadata.len());
        }

        Ok(row)
    }
}

#[async_trait]
impl ContentSource for FsSource {
    async fn fetch_children(&self, row: &Row) -> Result<Vec<Row>, FetchError> {
        if !row.is_dir() {
            return Err(FetchError::NotADirectory(row.path_string()));
        }

        let dir = self.resolve(&row.path);
        let mut entries = tokio::fs::read_dir(&dir).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => FetchError::NotFound(dir.display().to_string()),
            _ => FetchError::Io(e),
        })?;

        let mut rows = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !self.show_hidden && entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }
            rows.push(Self::entry_row(&row.path, &entry).await?);
        }
        rows.sort_by(|l, r| l.path.name().cmp(r.path.name()));

        debug!(dir = %dir.display(), count = rows.len(), "listed directory");
        Ok(rows)
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Fs
    }
}
