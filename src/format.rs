//! Display helpers for cell values

use crate::content::Value;
use byte_unit::{Byte, UnitType};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Date layout used for filter matching, e.g. `3/7/2021`
pub const FILTER_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Human-readable size, e.g. `1.5 KiB` (or `1.5 KB` with `si`)
///
/// Zero renders as `--`; anything below one unit is shown in plain bytes.
#[must_use]
pub fn bytes_to_human_readable(bytes: u64, si: bool, dp: usize) -> String {
    if bytes == 0 {
        return "--".to_string();
    }

    let (threshold, unit_type) = if si {
        (1000, UnitType::Decimal)
    } else {
        (1024, UnitType::Binary)
    };
    if bytes < threshold {
        return format!("{bytes} B");
    }

    let adjusted = Byte::from_u64(bytes).get_appropriate_unit(unit_type);
    format!("{adjusted:.dp$}")
}

/// Date in `M/D/YYYY` form
#[must_use]
pub fn date_to_str(date: &DateTime<Utc>) -> String {
    date.format(FILTER_DATE_FORMAT).to_string()
}

/// Whether the `M/D/YYYY` form of `date` contains `pattern`
#[must_use]
pub fn date_matches(date: &DateTime<Utc>, pattern: &str) -> bool {
    date_to_str(date).contains(pattern)
}

/// Whether `format` is a chrono format string without bad specifiers
#[must_use]
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Coarse age of `date` relative to `now`, e.g. `3 days`
#[must_use]
pub fn time_since(date: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    const UNITS: [(i64, &str); 5] = [
        (31_536_000, "years"),
        (2_592_000, "months"),
        (86_400, "days"),
        (3_600, "hours"),
        (60, "minutes"),
    ];

    let seconds = (*now - *date).num_seconds();
    for (span, name) in UNITS {
        if seconds > span {
            return format!("{} {name}", seconds / span);
        }
    }
    format!("{seconds} seconds")
}

/// Render a cell for terminal output
///
/// Sizes use binary units, dates `date_format` (a chrono format string).
/// A date format chrono cannot render falls back to `M/D/YYYY`.
#[must_use]
pub fn cell(column: &str, value: &Value, date_format: &str) -> String {
    match value {
        Value::Number(n) if column == "size" && *n >= 0.0 => {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let bytes = *n as u64;
            bytes_to_human_readable(bytes, false, 1)
        }
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Date(date) => {
            let mut out = String::new();
            match write!(out, "{}", date.format(date_format)) {
                Ok(()) => out,
                Err(_) => date_to_str(date),
            }
        }
        Value::Path(path) => path.name().to_string(),
        Value::Text(text) => text.clone(),
    }
}
