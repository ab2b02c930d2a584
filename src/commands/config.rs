//! Config command - read and change configuration values

use crate::{
    TreefinderError,
    cli::ConfigCommands,
    config::{KEYS, TreefinderConfig},
};
use std::path::Path;

type Result<T> = std::result::Result<T, TreefinderError>;

/// Execute a config subcommand; `set` writes the change back to `config_path`
///
/// # Errors
///
/// Returns `TreefinderError::InvalidInput` for malformed settings or unknown
/// keys, and `TreefinderError::ConfigError` if a value is invalid or the
/// file cannot be written.
pub fn execute(
    config: &mut TreefinderConfig,
    command: &ConfigCommands,
    config_path: &Path,
    quiet: bool,
) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            let (key, value) = setting.split_once('=').ok_or_else(|| {
                TreefinderError::InvalidInput("Invalid format. Use: treefinder config set key=value".into())
            })?;
            let key = check_key(key.trim())?;

            config.set_value(key, value.trim())?;
            config.save_to(config_path)?;

            if !quiet {
                println!("Set {key} = {}", config.get_value(key)?);
            }
        }
        ConfigCommands::Get { key } => {
            let key = check_key(key)?;
            println!("{}", config.get_value(key)?);
        }
        ConfigCommands::Show => {
            for key in KEYS {
                println!("{key} = {}", config.get_value(key)?);
            }
        }
    }
    Ok(())
}

fn check_key(key: &str) -> Result<&str> {
    if KEYS.contains(&key) {
        Ok(key)
    } else {
        Err(TreefinderError::InvalidInput(format!(
            "Unknown configuration key: '{key}'. Available keys: {}",
            KEYS.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = TreefinderConfig::default();

        let command = ConfigCommands::Set {
            setting: "show_hidden = true".into(),
        };
        execute(&mut config, &command, &path, true).unwrap();

        assert!(config.show_hidden);
        assert!(TreefinderConfig::load_from(&path).unwrap().show_hidden);
    }

    #[test]
    fn test_unknown_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = TreefinderConfig::default();

        let command = ConfigCommands::Get { key: "colour".into() };
        let err = execute(&mut config, &command, &path, true).unwrap_err();
        assert!(matches!(err, TreefinderError::InvalidInput(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_malformed_setting() {
        let dir = TempDir::new().unwrap();
        let mut config = TreefinderConfig::default();

        let command = ConfigCommands::Set { setting: "quiet".into() };
        assert!(execute(&mut config, &command, &dir.path().join("c.toml"), true).is_err());
    }
}
