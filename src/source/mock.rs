//! Generated mock content
//!
//! Every directory lists `n_children` entries: the first `n_directories` are
//! subdirectories named after the allied phonetic alphabet, the rest are
//! `file_NNNNNNN.txt` text files numbered across the whole tree. The tree is
//! infinitely deep. Listings are cached per path (up to [`CACHE_CAPACITY`]
//! directories), so repeated fetches return identical rows. A listing evicted
//! from the cache is generated again: its directories keep their names while
//! its files get new numbers, and every row gets a new date.

use super::traits::{ContentSource, SourceKind};
use crate::content::{DIR_KIND, FetchError, Row};
use crate::path::PathKey;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use moka::sync::Cache;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

/// Directory names used by the generator
///
/// ref: <https://en.wikipedia.org/wiki/Allied_military_phonetic_spelling_alphabets>
pub const ALLIED_PHONETIC: [&str; 26] = [
    "able", "baker", "charlie", "dog", "easy", "fox", "george", "how", "item", "jig", "king",
    "love", "mike", "nan", "oboe", "peter", "queen", "roger", "sugar", "tare", "uncle", "victor",
    "william", "xray", "yoke", "zebra",
];

/// Kind string of generated files
pub const MOCK_FILE_KIND: &str = "text";

/// Directory listings kept before the oldest are evicted
pub const CACHE_CAPACITY: u64 = 10_000;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Shape of the generated tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockOptions {
    /// Entries per directory
    #[serde(default = "default_n_children")]
    pub n_children: usize,

    /// How many of those entries are directories
    #[serde(default = "default_n_directories")]
    pub n_directories: usize,
}

const fn default_n_children() -> usize {
    100
}

const fn default_n_directories() -> usize {
    10
}

impl Default for MockOptions {
    fn default() -> Self {
        Self {
            n_children: default_n_children(),
            n_directories: default_n_directories(),
        }
    }
}

/// Infinite mock tree with cached listings
pub struct MockSource {
    options: MockOptions,
    cache: Cache<String, Vec<Row>>,
    next_file_ix: AtomicU64,
    next_mod_day: AtomicI64,
}

impl MockSource {
    #[must_use]
    pub fn new(options: MockOptions) -> Self {
        Self {
            options,
            cache: Cache::builder().max_capacity(CACHE_CAPACITY).build(),
            next_file_ix: AtomicU64::new(0),
            next_mod_day: AtomicI64::new(-1),
        }
    }

    /// A top-level directory row
    #[must_use]
    pub fn root_row(&self, name: &str) -> Row {
        self.mock_row(PathKey::new(vec![name.to_string()]), DIR_KIND)
    }

    #[must_use]
    pub const fn options(&self) -> MockOptions {
        self.options
    }

    fn mock_row(&self, path: PathKey, kind: &str) -> Row {
        let days = self.next_mod_day.fetch_add(1, Ordering::Relaxed);
        let modified = DateTime::<Utc>::from_timestamp(days * SECONDS_PER_DAY, 0).unwrap_or_default();

        Row::new(path, kind)
            .with_field("modified", modified)
            .with_field("writable", false)
    }

    fn directory_name(ix: usize) -> String {
        let name = ALLIED_PHONETIC[ix % ALLIED_PHONETIC.len()];
        match ix / ALLIED_PHONETIC.len() {
            0 => name.to_string(),
            round => format!("{name}{round}"),
        }
    }

    fn generate(&self, parent: &PathKey) -> Vec<Row> {
        (0..self.options.n_children)
            .map(|i| {
                if i < self.options.n_directories {
                    self.mock_row(parent.child(Self::directory_name(i)), DIR_KIND)
                } else {
                    let ix = self.next_file_ix.fetch_add(1, Ordering::Relaxed);
                    self.mock_row(parent.child(format!("file_{ix:07}.txt")), MOCK_FILE_KIND)
                }
            })
            .collect()
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new(MockOptions::default())
    }
}

#[async_trait]
impl ContentSource for MockSource {
    async fn fetch_children(&self, row: &Row) -> Result<Vec<Row>, FetchError> {
        if !row.is_dir() {
            return Err(FetchError::NotADirectory(row.path_string()));
        }
        let key = row.path_string();
        Ok(self.cache.get_with(key, || self.generate(&row.path)))
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Mock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> MockSource {
        MockSource::new(MockOptions {
            n_children: 5,
            n_directories: 2,
        })
    }

    #[tokio::test]
    async fn test_listing_shape() {
        let source = small();
        let rows = source.fetch_children(&source.root_row("mock")).await.unwrap();

        assert_eq!(rows.len(), 5);
        assert_eq!(rows.iter().filter(|r| r.is_dir()).count(), 2);
        assert_eq!(rows[0].path, PathKey::from(["mock", "able"]));
        assert_eq!(rows[1].path, PathKey::from(["mock", "baker"]));
        assert_eq!(rows[2].path.name(), "file_0000000.txt");
        assert_eq!(rows[2].kind, MOCK_FILE_KIND);
        assert!(rows[2].fields.contains_key("modified"));
    }

    #[tokio::test]
    async fn test_listing_is_cached() {
        let source = small();
        let root = source.root_row("mock");

        let first = source.fetch_children(&root).await.unwrap();
        let second = source.fetch_children(&root).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_evicted_listing_renumbers_files() {
        let source = small();
        let root = source.root_row("mock");

        let first = source.fetch_children(&root).await.unwrap();
        source.cache.invalidate(&root.path_string());
        let second = source.fetch_children(&root).await.unwrap();

        let paths = |rows: &[Row]| rows.iter().map(Row::path_string).collect::<Vec<_>>();
        assert_eq!(paths(&first)[..2], paths(&second)[..2]);
        assert_eq!(second[2].path.name(), "file_0000003.txt");
    }

    #[tokio::test]
    async fn test_tree_is_deep() {
        let source = small();
        let able = Row::dir(["mock", "able"]);
        let rows = source.fetch_children(&able).await.unwrap();
        assert_eq!(rows[0].path, PathKey::from(["mock", "able", "able"]));
    }

    #[test]
    fn test_directory_names_wrap() {
        assert_eq!(MockSource::directory_name(0), "able");
        assert_eq!(MockSource::directory_name(25), "zebra");
        assert_eq!(MockSource::directory_name(26), "able1");
    }
}
