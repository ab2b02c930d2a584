//! Output formatting for CLI display
//!
//! Turns visible rows into indented tree lines, optionally followed by
//! aligned data columns. Quiet mode prints bare relative paths so the
//! output can be piped.

use crate::content::{Node, Row};
use crate::format;
use colored::Colorize;

const INDENT: &str = "  ";

/// Path of `node` below the opened root, joined by `/`
#[must_use]
pub fn relative_path(node: &Node, path_depth: usize) -> String {
    node.path_at_depth(path_depth, None).join("/")
}

/// Indented name with an expand marker for directories
#[must_use]
pub fn tree_label(node: &Node, path_depth: usize) -> String {
    let level = node.depth().saturating_sub(path_depth + 1);
    let indent = INDENT.repeat(level);

    if node.is_dir() {
        let marker = if node.is_expanded() { "▾" } else { "▸" };
        format!("{indent}{marker} {}", node.name().blue().bold())
    } else {
        format!("{indent}  {}", node.name())
    }
}

/// Cell text of every column of `row`, empty for columns it lacks
#[must_use]
pub fn cells(row: &Row, columns: &[String], date_format: &str) -> Vec<String> {
    columns
        .iter()
        .map(|column| {
            row.value(column)
                .map(|value| format::cell(column, &value, date_format))
                .unwrap_or_default()
        })
        .collect()
}

/// Lines for `nodes`, one per row
///
/// With `columns`, cells are left-aligned under a header line.
#[must_use]
pub fn tree_lines(
    nodes: &[&Node],
    path_depth: usize,
    columns: Option<&[String]>,
    date_format: &str,
    quiet: bool,
) -> Vec<String> {
    if quiet {
        return nodes.iter().map(|n| relative_path(n, path_depth)).collect();
    }

    let labels: Vec<String> = nodes.iter().map(|n| tree_label(n, path_depth)).collect();
    let Some(columns) = columns.filter(|c| !c.is_empty()) else {
        return labels;
    };

    let rows: Vec<Vec<String>> = nodes
        .iter()
        .map(|n| cells(n.row(), columns, date_format))
        .collect();

    // widths are measured on uncolored text
    let label_width = nodes
        .iter()
        .map(|n| plain_label_width(n, path_depth))
        .max()
        .unwrap_or(0)
        .max("path".len());
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(ix, column)| {
            rows.iter()
                .map(|cells| cells[ix].chars().count())
                .max()
                .unwrap_or(0)
                .max(column.chars().count())
        })
        .collect();

    let mut lines = Vec::with_capacity(nodes.len() + 1);
    let mut header = format!("{:label_width$}", "path");
    for (column, width) in columns.iter().zip(&widths) {
        header.push_str(&format!("  {column:width$}"));
    }
    lines.push(header.trim_end().bold().to_string());

    for ((node, label), cells) in nodes.iter().zip(labels).zip(rows) {
        let pad = label_width - plain_label_width(node, path_depth);
        let mut line = format!("{label}{}", " ".repeat(pad));
        for (cell, width) in cells.iter().zip(&widths) {
            line.push_str(&format!("  {}", format!("{cell:width$}").dimmed()));
        }
        lines.push(line.trim_end().to_string());
    }
    lines
}

/// Breadcrumb trail, e.g. `home / me / src`
#[must_use]
pub fn crumbs_line(names: &[&str]) -> String {
    names.join(" / ")
}

fn plain_label_width(node: &Node, path_depth: usize) -> usize {
    let level = node.depth().saturating_sub(path_depth + 1);
    INDENT.len() * level + 2 + node.name().chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Row;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_relative_path() {
        let node = Node::new(Row::new(["root", "a", "b.txt"], "text"));
        assert_eq!(relative_path(&node, 1), "a/b.txt");
    }

    #[test]
    fn test_tree_label() {
        plain();
        let dir = Node::new(Row::dir(["root", "a"]));
        let file = Node::new(Row::new(["root", "a", "b.txt"], "text"));

        assert_eq!(tree_label(&dir, 1), "▸ a");
        assert_eq!(tree_label(&file, 1), "    b.txt");
    }

    #[test]
    fn test_quiet_lines() {
        let a = Node::new(Row::dir(["root", "a"]));
        let b = Node::new(Row::new(["root", "a", "b"], "text"));

        let lines = tree_lines(&[&a, &b], 1, None, "%F", true);
        assert_eq!(lines, vec!["a", "a/b"]);
    }

    #[test]
    fn test_column_lines() {
        plain();
        let a = Node::new(Row::dir(["root", "a"]));
        let b = Node::new(Row::new(["root", "bee"], "text").with_field("size", 2048u64));
        let columns = vec!["kind".to_string(), "size".to_string()];

        let lines = tree_lines(&[&a, &b], 1, Some(&columns), "%F", false);
        assert_eq!(lines[0], "path   kind  size");
        assert_eq!(lines[1], "▸ a    dir");
        assert_eq!(lines[2], "  bee  text  2.0 KiB");
    }

    #[test]
    fn test_crumbs_line() {
        assert_eq!(crumbs_line(&["home", "me"]), "home / me");
    }
}
