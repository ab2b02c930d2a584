//! Per-column filter patterns
//!
//! A [`FilterSpec`] maps column names to patterns. A row passes when it
//! matches every entry; how a pattern matches depends on the type of the
//! row's value in that column (see [`value_matches`]).

use crate::content::{Row, Value};
use crate::format;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Column → pattern mapping; absent columns are unfiltered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    patterns: BTreeMap<String, String>,
}

impl FilterSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pattern for `column`; an empty pattern removes the entry
    pub fn set(&mut self, column: impl Into<String>, pattern: impl Into<String>) {
        let column = column.into();
        let pattern = pattern.into();

        if pattern.is_empty() {
            self.patterns.remove(&column);
        } else {
            self.patterns.insert(column, pattern);
        }
    }

    /// Builder-style variant of [`FilterSpec::set`]
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.set(column, pattern);
        self
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.patterns.get(column).map(String::as_str)
    }

    /// True when at least one column is filtered
    #[must_use]
    pub fn any(&self) -> bool {
        !self.patterns.is_empty()
    }

    pub fn patterns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.patterns.iter().map(|(c, p)| (c.as_str(), p.as_str()))
    }

    pub fn clear(&mut self) {
        self.patterns.clear();
    }

    /// Whether `row` satisfies every entry
    ///
    /// `path_depth` leading path segments are ignored when matching path
    /// values, so patterns apply to paths relative to the opened root. A
    /// column the row does not have is skipped rather than failing the row.
    #[must_use]
    pub fn matches(&self, row: &Row, path_depth: usize) -> bool {
        self.patterns.iter().all(|(column, pattern)| {
            row.value(column)
                .is_none_or(|value| value_matches(&value, pattern, path_depth))
        })
    }
}

/// Type-directed pattern match against a single value
///
/// - paths: relative segments joined by `/`, substring match
/// - text: substring match
/// - booleans: the pattern as a number equals 0/1, or `"true"`/`"false"` contains it
/// - dates: the `M/D/YYYY` form contains the pattern
/// - numbers: numeric equality with the parsed pattern
#[must_use]
pub fn value_matches(value: &Value, pattern: &str, path_depth: usize) -> bool {
    match value {
        Value::Path(path) => path.at_depth(path_depth).join("/").contains(pattern),
        Value::Text(text) => text.contains(pattern),
        Value::Bool(b) => {
            let numeric = if *b { 1.0 } else { 0.0 };
            parse_number(pattern) == Some(numeric) || b.to_string().contains(pattern)
        }
        Value::Date(date) => format::date_to_str(date).contains(pattern),
        Value::Number(n) => parse_number(pattern) == Some(*n),
    }
}

fn parse_number(pattern: &str) -> Option<f64> {
    pattern.trim().parse::<f64>().ok().filter(|n| !n.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathKey;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_set_and_remove() {
        let mut spec = FilterSpec::new();
        assert!(!spec.any());

        spec.set("kind", "dir");
        assert!(spec.any());
        assert_eq!(spec.get("kind"), Some("dir"));

        spec.set("kind", "");
        assert!(!spec.any());
        assert_eq!(spec.get("kind"), None);
    }

    #[test]
    fn test_and_semantics() {
        let spec = FilterSpec::new().with("kind", "dir").with("path", "foo");

        let dir = Row::dir(["root", "foobar"]);
        let text = Row::new(["root", "foobar"], "text");
        assert!(spec.matches(&dir, 1));
        assert!(!spec.matches(&text, 1));
    }

    #[test]
    fn test_path_matches_relative_to_depth() {
        let spec = FilterSpec::new().with("path", "home");
        let row = Row::new(["home", "docs", "a.txt"], "text");

        assert!(spec.matches(&row, 0));
        assert!(!spec.matches(&row, 1));

        let spec = FilterSpec::new().with("path", "docs/a");
        assert!(spec.matches(&row, 1));
    }

    #[test]
    fn test_path_match_is_case_sensitive() {
        let spec = FilterSpec::new().with("path", "Foo");
        assert!(!spec.matches(&Row::dir(["foo"]), 0));
    }

    #[test]
    fn test_missing_column_is_ignored() {
        let spec = FilterSpec::new().with("owner", "me");
        assert!(spec.matches(&Row::dir(["a"]), 0));
    }

    #[test]
    fn test_bool_matching() {
        let t = Value::Bool(true);
        let f = Value::Bool(false);

        assert!(value_matches(&t, "1", 0));
        assert!(value_matches(&t, "tr", 0));
        assert!(!value_matches(&t, "0", 0));
        assert!(value_matches(&f, "0", 0));
        assert!(value_matches(&f, "als", 0));
        assert!(!value_matches(&f, "true", 0));
    }

    #[test]
    fn test_number_matching() {
        let n = Value::Number(42.0);
        assert!(value_matches(&n, "42", 0));
        assert!(value_matches(&n, " 42.0 ", 0));
        assert!(!value_matches(&n, "4", 0));
        assert!(!value_matches(&n, "abc", 0));
    }

    #[test]
    fn test_date_matching() {
        let date = Value::Date(Utc.with_ymd_and_hms(2021, 3, 7, 12, 0, 0).unwrap());
        assert!(value_matches(&date, "3/7/2021", 0));
        assert!(value_matches(&date, "2021", 0));
        assert!(!value_matches(&date, "03/07", 0));
    }

    #[test]
    fn test_path_valued_field() {
        let value = Value::Path(PathKey::from(["a", "b", "c"]));
        assert!(value_matches(&value, "b/c", 1));
        assert!(!value_matches(&value, "a/b", 1));
    }
}
