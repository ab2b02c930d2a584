//! Treefinder CLI application entry point
//!
//! Opens a directory, JSON document or generated mock tree, applies the
//! requested expands, sorts and filters, and prints the visible rows.
//!
//! # Usage
//!
//! ```bash
//! # Current directory (default command)
//! treefinder
//! treefinder list
//!
//! # Expand everything two levels deep and show columns
//! treefinder list ~/src -d 2 -c
//!
//! # Sort by size, largest first, keep only directories
//! treefinder list -o size -o size -f kind=dir
//!
//! # A JSON tree, as JSON lines
//! treefinder list -s json tree.json -e docs --json
//!
//! # Configuration
//! treefinder config set default_source=mock
//! treefinder config get default_source
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/treefinder/config.toml` on Linux) and created with defaults on
//! first run. `--config FILE` uses another file instead.
//!
//! # Logging
//!
//! Diagnostics go to stderr, filtered by `TREEFINDER_LOG` (default `warn`),
//! e.g. `TREEFINDER_LOG=treefinder=debug`.

use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use treefinder::{
    TreefinderError,
    cli::{Cli, Commands},
    commands,
    config::TreefinderConfig,
};

type Result<T> = std::result::Result<T, TreefinderError>;

const LOG_ENV: &str = "TREEFINDER_LOG";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Load the configuration named on the command line, or the default one
fn load_config(explicit: Option<&PathBuf>) -> Result<(TreefinderConfig, PathBuf)> {
    match explicit {
        Some(path) => Ok((TreefinderConfig::load_from(path)?, path.clone())),
        None => Ok((TreefinderConfig::load()?, TreefinderConfig::config_path()?)),
    }
}

/// Main entry point for the treefinder application
///
/// Loads configuration, parses command-line arguments, and dispatches to the
/// appropriate command handler.
///
/// # Errors
///
/// Returns `TreefinderError` if configuration loading fails or the command
/// handler returns an error.
#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse_args();
    let (mut config, config_path) = load_config(cli.config.as_ref())?;

    let quiet = cli.quiet || config.quiet;

    match cli.get_command() {
        Commands::List(args) => commands::list(&args, &config, quiet).await?,
        Commands::Config { command } => commands::config(&mut config, &command, &config_path, quiet)?,
    }

    Ok(())
}
