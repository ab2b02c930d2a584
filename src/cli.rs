//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for treefinder using the `clap` crate.
//!
//! # Commands
//!
//! - **list**: Open a root, apply expands, sorts and filters, print the visible rows (default)
//! - **config**: Read and change configuration values
//!
//! # Examples
//!
//! ```bash
//! # Current directory, top level only
//! treefinder
//!
//! # Expand two levels, newest first, only rust files
//! treefinder list ~/src/project -d 2 -o modified -o modified -f path=.rs -c
//!
//! # Browse a generated tree
//! treefinder list -s mock -e able -e able/baker
//! ```

use crate::source::SourceKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., default_source=mock)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., quiet)
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Print every configuration value
    Show,
}

/// Arguments of the `list` command
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Directory (fs), JSON document (json) or root name (mock)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Content source (overrides config)
    #[arg(short = 's', long = "source", value_enum)]
    pub source: Option<SourceKind>,

    /// Expand a directory, given relative to the root (e.g. -e src -e src/model)
    #[arg(short = 'e', long = "expand", value_name = "PATH")]
    pub expand: Vec<String>,

    /// Expand every directory down to this depth
    #[arg(short = 'd', long = "expand-all-depth", value_name = "N")]
    pub expand_depth: Option<usize>,

    /// Filter rows by COLUMN=PATTERN; every filter must match
    #[arg(short = 'f', long = "filter", value_name = "COLUMN=PATTERN", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Sort by column; later columns break ties, repeating a column flips it
    #[arg(short = 'o', long = "sort", value_name = "COLUMN")]
    pub sort: Vec<String>,

    /// Show data columns next to each row
    #[arg(short = 'c', long = "columns")]
    pub columns: bool,

    /// Print one JSON object per visible row
    #[arg(long = "json", conflicts_with = "columns")]
    pub json: bool,

    /// Include dot-files (fs source; overrides config)
    #[arg(long = "hidden")]
    pub hidden: bool,
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "treefinder")]
#[command(about = "Browse hierarchical content as a sorted, filtered tree", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Use this configuration file instead of the default one
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the visible tree (default)
    #[command(visible_alias = "l")]
    List(ListArgs),

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to `list` if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::List(ListArgs::default()))
    }
}

/// Parse a `COLUMN=PATTERN` filter argument
///
/// # Errors
///
/// Returns a message if there is no `=` or the column is empty.
pub fn parse_filter(s: &str) -> Result<(String, String), String> {
    let (column, pattern) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid filter '{s}': expected COLUMN=PATTERN"))?;

    let column = column.trim();
    if column.is_empty() {
        return Err(format!("invalid filter '{s}': empty column name"));
    }
    Ok((column.to_string(), pattern.to_string()))
}
