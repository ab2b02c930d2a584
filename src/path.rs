//! Hierarchical path keys
//!
//! A [`PathKey`] is an ordered list of segment names. The root of a tree is
//! the empty key. The `/`-joined form returned by [`PathKey::joined`] is the
//! identity used for child lookup, parent maps and selection.
//!
//! # Examples
//! ```
//! # use treefinder::path::PathKey;
//! let key = PathKey::from(["home", "docs", "notes.md"]);
//! assert_eq!(key.joined(), "home/docs/notes.md");
//! assert_eq!(key.name(), "notes.md");
//! assert_eq!(key.parent(), Some(PathKey::from(["home", "docs"])));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator used by the joined identity form
pub const SEPARATOR: char = '/';

/// Canonical hierarchical path
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathKey(Vec<String>);

impl PathKey {
    /// The root key (no segments)
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a key from its segments
    #[must_use]
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// Parse a `/`-joined key. The empty string is the root.
    #[must_use]
    pub fn parse(joined: &str) -> Self {
        if joined.is_empty() {
            return Self::root();
        }
        Self(joined.split(SEPARATOR).map(str::to_string).collect())
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of segments
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Last segment, or `""` at the root
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.last().map_or("", String::as_str)
    }

    /// Key of the containing directory, `None` at the root
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Key of a direct child named `name`
    #[must_use]
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.into());
        Self(segments)
    }

    /// Segments joined by `/`
    #[must_use]
    pub fn joined(&self) -> String {
        self.0.join("/")
    }

    /// True when every segment of `prefix` leads this key
    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.0.len() >= prefix.0.len() && self.0.iter().zip(&prefix.0).all(|(l, r)| l == r)
    }

    /// Segment-wise equality against a raw segment list
    #[must_use]
    pub fn equal(&self, other: &[String]) -> bool {
        self.0.len() == other.len() && self.0.iter().zip(other).all(|(l, r)| l == r)
    }

    /// Segments left after dropping the first `depth` ones
    #[must_use]
    pub fn at_depth(&self, depth: usize) -> &[String] {
        self.0.get(depth..).unwrap_or(&[])
    }

    /// Like [`PathKey::at_depth`], with every segment but the last replaced by `fill`
    ///
    /// Used to indent relative paths in a tree display.
    ///
    /// ```
    /// # use treefinder::path::PathKey;
    /// let key = PathKey::from(["a", "b", "c"]);
    /// assert_eq!(key.at_depth_filled(0, "  "), vec!["  ", "  ", "c"]);
    /// assert_eq!(key.at_depth_filled(2, "  "), vec!["c"]);
    /// ```
    #[must_use]
    pub fn at_depth_filled(&self, depth: usize, fill: &str) -> Vec<String> {
        let rest = self.at_depth(depth);
        match rest.split_last() {
            Some((last, init)) if !init.is_empty() => init
                .iter()
                .map(|_| fill.to_string())
                .chain(std::iter::once(last.clone()))
                .collect(),
            _ => rest.to_vec(),
        }
    }

    /// True when no segment is empty, except possibly the leading drive segment
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.0.iter().skip(1).all(|s| !s.is_empty())
    }

    /// Drive-style display form: the first segment is a drive prefix
    ///
    /// ```
    /// # use treefinder::path::PathKey;
    /// assert_eq!(PathKey::from(["c", "users", "me"]).to_drive_string(), "c:users/me");
    /// assert_eq!(PathKey::from(["", "tmp"]).to_drive_string(), "tmp");
    /// ```
    #[must_use]
    pub fn to_drive_string(&self) -> String {
        match self.0.split_first() {
            Some((drive, rest)) => {
                let drive = if drive.is_empty() {
                    String::new()
                } else {
                    format!("{drive}:")
                };
                format!("{drive}{}", rest.join("/"))
            }
            None => String::new(),
        }
    }

    /// Inverse of [`PathKey::to_drive_string`]; accepts `/` and `\` separators
    ///
    /// ```
    /// # use treefinder::path::PathKey;
    /// assert_eq!(PathKey::from_drive_string("c:users\\me"), PathKey::from(["c", "users", "me"]));
    /// assert_eq!(PathKey::from_drive_string("tmp/x"), PathKey::from(["", "tmp", "x"]));
    /// ```
    #[must_use]
    pub fn from_drive_string(s: &str) -> Self {
        let (drive, local) = match s.split_once(':') {
            Some((drive, local)) => (drive, local),
            None => ("", s),
        };

        let mut segments = vec![drive.to_string()];
        if !local.is_empty() {
            segments.extend(local.split(['/', '\\']).map(str::to_string));
        }
        Self(segments)
    }
}

/// Strip every forward and back slash from `s`
#[must_use]
pub fn trim_slash(s: &str) -> String {
    s.chars().filter(|c| *c != '/' && *c != '\\').collect()
}

/// Strip slashes, then add a single trailing `/` if requested
#[must_use]
pub fn norm_slash(s: &str, trailing: bool) -> String {
    let mut out = trim_slash(s);
    if trailing {
        out.push('/');
    }
    out
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

impl From<Vec<String>> for PathKey {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl<const N: usize> From<[&str; N]> for PathKey {
    fn from(segments: [&str; N]) -> Self {
        Self(segments.iter().map(|s| (*s).to_string()).collect())
    }
}

impl From<&[&str]> for PathKey {
    fn from(segments: &[&str]) -> Self {
        Self(segments.iter().map(|s| (*s).to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_key() {
        let root = PathKey::root();
        assert!(root.is_root());
        assert_eq!(root.name(), "");
        assert_eq!(root.joined(), "");
        assert_eq!(root.parent(), None);
        assert_eq!(PathKey::parse(""), root);
    }

    #[test]
    fn test_equality_is_segment_wise() {
        let a = PathKey::from(["a", "b"]);
        assert_eq!(a, PathKey::from(["a", "b"]));
        assert_ne!(a, PathKey::from(["a"]));
        assert_ne!(a, PathKey::from(["b", "a"]));
        assert!(a.equal(&["a".to_string(), "b".to_string()]));
        assert!(!a.equal(&["a".to_string()]));
    }

    #[test]
    fn test_parse_and_join() {
        let key = PathKey::parse("a/b/c");
        assert_eq!(key.depth(), 3);
        assert_eq!(key.joined(), "a/b/c");
        assert_eq!(key.to_string(), "a/b/c");
    }

    #[test]
    fn test_child_and_parent() {
        let dir = PathKey::from(["a"]);
        let child = dir.child("x");
        assert_eq!(child, PathKey::from(["a", "x"]));
        assert_eq!(child.parent(), Some(dir.clone()));
        assert!(child.starts_with(&dir));
        assert!(!dir.starts_with(&child));
    }

    #[test]
    fn test_at_depth() {
        let key = PathKey::from(["root", "a", "b"]);
        assert_eq!(key.at_depth(1), &["a".to_string(), "b".to_string()]);
        assert!(key.at_depth(5).is_empty());
    }

    #[test]
    fn test_well_formed() {
        assert!(PathKey::from(["", "tmp"]).is_well_formed());
        assert!(!PathKey::from(["tmp", ""]).is_well_formed());
    }

    #[test]
    fn test_slash_helpers() {
        assert_eq!(trim_slash("/a\\b/"), "ab");
        assert_eq!(norm_slash("dir/", true), "dir/");
        assert_eq!(norm_slash("file", false), "file");
    }

    #[test]
    fn test_ordering_follows_segments() {
        let mut keys = vec![PathKey::from(["b"]), PathKey::from(["a", "z"]), PathKey::from(["a"])];
        keys.sort();
        assert_eq!(
            keys,
            vec![PathKey::from(["a"]), PathKey::from(["a", "z"]), PathKey::from(["b"])]
        );
    }
}
