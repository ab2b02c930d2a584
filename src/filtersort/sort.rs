//! Ordered multi-column sort

use crate::content::{PATH_COLUMN, Row, Value};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Next state in the click cycle; `None` means "drop this column"
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Ascending => Some(Self::Descending),
            Self::Descending => None,
        }
    }

    const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortEntry {
    pub column: String,
    pub direction: SortDirection,
}

impl SortEntry {
    #[must_use]
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Ascending,
        }
    }

    #[must_use]
    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Sort keys in priority order
///
/// Never empty: an order that would lose its last entry falls back to
/// ascending by path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    entries: Vec<SortEntry>,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            entries: vec![SortEntry::ascending(PATH_COLUMN)],
        }
    }
}

impl SortSpec {
    /// Build from explicit entries
    ///
    /// Later duplicates of a column are dropped; an empty list yields the
    /// default order.
    #[must_use]
    pub fn new(entries: Vec<SortEntry>) -> Self {
        let mut unique: Vec<SortEntry> = Vec::with_capacity(entries.len());
        for entry in entries {
            if !unique.iter().any(|e| e.column == entry.column) {
                unique.push(entry);
            }
        }

        if unique.is_empty() {
            Self::default()
        } else {
            Self { entries: unique }
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[SortEntry] {
        &self.entries
    }

    /// Priority of `column` (0 = primary), if sorted on
    #[must_use]
    pub fn position(&self, column: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.column == column)
    }

    #[must_use]
    pub fn direction_of(&self, column: &str) -> Option<SortDirection> {
        self.entries
            .iter()
            .find(|e| e.column == column)
            .map(|e| e.direction)
    }

    /// Apply a header click on `column`
    ///
    /// A sorted column advances ascending → descending → removed. An
    /// unsorted column is appended as ascending when `multisort` is set and
    /// replaces the whole order otherwise.
    #[must_use]
    pub fn updated(&self, column: &str, multisort: bool) -> Self {
        let mut entries = self.entries.clone();

        if let Some(ix) = self.position(column) {
            match entries[ix].direction.next() {
                Some(direction) => entries[ix].direction = direction,
                None => {
                    entries.remove(ix);
                }
            }
        } else if multisort {
            entries.push(SortEntry::ascending(column));
        } else {
            entries = vec![SortEntry::ascending(column)];
        }

        Self::new(entries)
    }

    /// Compare two rows entry by entry; the first non-equal result wins
    #[must_use]
    pub fn compare(&self, l: &Row, r: &Row) -> Ordering {
        for entry in &self.entries {
            let ordering = match (l.value(&entry.column), r.value(&entry.column)) {
                (Some(lv), Some(rv)) => compare_values(&lv, &rv),
                _ => Ordering::Equal,
            };
            if ordering != Ordering::Equal {
                return entry.direction.apply(ordering);
            }
        }
        Ordering::Equal
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|e| format!("{} {}", e.column, e.direction))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// Free-function form of [`SortSpec::updated`]
#[must_use]
pub fn update_sort(spec: &SortSpec, column: &str, multisort: bool) -> SortSpec {
    spec.updated(column, multisort)
}

/// Ascending comparison of two column values
///
/// Paths compare by their last segment and text by [`locale_cmp`]; anything
/// else is compared numerically. Values that cannot be ordered are equal.
#[must_use]
pub fn compare_values(l: &Value, r: &Value) -> Ordering {
    match (as_text(l), as_text(r)) {
        (Some(lt), Some(rt)) => locale_cmp(lt, rt),
        _ => match (l.as_number(), r.as_number()) {
            (Some(ln), Some(rn)) => ln.partial_cmp(&rn).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
    }
}

fn as_text(value: &Value) -> Option<&str> {
    match value {
        Value::Path(path) => Some(path.name()),
        Value::Text(text) => Some(text),
        _ => None,
    }
}

/// Case-insensitive string order with lowercase before uppercase on ties
///
/// `"apple" < "Banana" < "banana2"` and `"a" < "A"`.
#[must_use]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded.then_with(|| {
        a.chars()
            .zip(b.chars())
            .find(|(x, y)| x != y)
            .map_or_else(
                || a.len().cmp(&b.len()),
                |(x, y)| match (x.is_lowercase(), y.is_lowercase()) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    _ => x.cmp(&y),
                },
            )
    })
}
