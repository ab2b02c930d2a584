//! Testing utilities for treefinder
//!
//! Provides [`RecordingSource`], a scripted content source that counts
//! fetches per directory and can be told to fail, plus small row builders.
//!
//! Only available when compiled with `cfg(test)`.

use crate::content::{FetchError, Row};
use crate::path::PathKey;
use crate::source::{ContentSource, SourceKind};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Scripted content source with per-path fetch counters
///
/// Directories without a listing are empty. Listings can be replaced at any
/// time to simulate external changes.
///
/// # Examples
/// ```ignore
/// let source = RecordingSource::new().with_listing(&["r"], vec![Row::dir(["r", "a"])]);
/// ```
#[derive(Debug, Default)]
pub struct RecordingSource {
    listings: Mutex<HashMap<String, Vec<Row>>>,
    fetches: Mutex<HashMap<String, usize>>,
    failing: Mutex<HashSet<String>>,
}

impl RecordingSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`RecordingSource::set_listing`]
    #[must_use]
    pub fn with_listing(self, dir: &[&str], rows: Vec<Row>) -> Self {
        self.set_listing(dir, rows);
        self
    }

    /// Replace the listing returned for `dir`
    pub fn set_listing(&self, dir: &[&str], rows: Vec<Row>) {
        self.listings
            .lock()
            .unwrap()
            .insert(PathKey::from(dir).joined(), rows);
    }

    /// Make every fetch of `dir` fail until [`RecordingSource::clear_failures`]
    pub fn fail_on(&self, dir: &[&str]) {
        self.failing
            .lock()
            .unwrap()
            .insert(PathKey::from(dir).joined());
    }

    pub fn clear_failures(&self) {
        self.failing.lock().unwrap().clear();
    }

    /// Number of fetch attempts for `dir`, failed ones included
    pub fn fetch_count(&self, dir: &str) -> usize {
        self.fetches.lock().unwrap().get(dir).copied().unwrap_or(0)
    }
}

#[async_trait]
impl ContentSource for RecordingSource {
    async fn fetch_children(&self, row: &Row) -> Result<Vec<Row>, FetchError> {
        let key = row.path_string();
        *self.fetches.lock().unwrap().entry(key.clone()).or_default() += 1;

        if self.failing.lock().unwrap().contains(&key) {
            return Err(FetchError::Source(format!("scripted failure for '{key}'")));
        }

        Ok(self
            .listings
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_default())
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Mock
    }
}

/// Leaf row of kind `"text"`
pub fn text_row(path: &[&str]) -> Row {
    Row::new(path, "text")
}

/// Small two-level tree used across model tests
///
/// ```text
/// r/
///   a/        (dir)
///     x       (text)
///   b         (text)
/// ```
pub fn sample_source() -> RecordingSource {
    RecordingSource::new()
        .with_listing(&["r"], vec![Row::dir(["r", "a"]), text_row(&["r", "b"])])
        .with_listing(&["r", "a"], vec![text_row(&["r", "a", "x"])])
}
