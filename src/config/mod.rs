//! Configuration module for treefinder
//!
//! Holds the defaults used by the CLI: which content source to open, how the
//! tree model behaves, and how values are displayed. Configuration is stored
//! in the user's config directory (`~/.config/treefinder/config.toml` on
//! Linux) and can be overridden per run with `--config FILE`.

use crate::format;
use crate::model::ModelOptions;
use crate::source::{MockOptions, SourceKind};
use clap::ValueEnum;
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Keys accepted by [`TreefinderConfig::get_value`] and [`TreefinderConfig::set_value`]
pub const KEYS: [&str; 8] = [
    "quiet",
    "default_source",
    "show_hidden",
    "date_format",
    "do_refetch",
    "column_names",
    "mock.n_children",
    "mock.n_directories",
];

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TreefinderConfig {
    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Source used when `list` is run without `--source`
    #[serde(default)]
    pub default_source: SourceKind,

    /// Include dot-files when listing the filesystem
    #[serde(default)]
    pub show_hidden: bool,

    /// chrono format string for date columns
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Refetch listings on every expand, filter and sort
    #[serde(default)]
    pub do_refetch: bool,

    /// Explicit column list; derived from the root row when unset
    #[serde(default)]
    pub column_names: Option<Vec<String>>,

    /// Shape of the generated mock tree
    #[serde(default)]
    pub mock: MockOptions,
}

impl Default for TreefinderConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            default_source: SourceKind::default(),
            show_hidden: false,
            date_format: default_date_format(),
            do_refetch: false,
            column_names: None,
            mock: MockOptions::default(),
        }
    }
}

impl TreefinderConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("treefinder").join("config.toml"))
    }

    /// Load configuration from the default location, creating it if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save_to(&config_path)?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing or cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        parse_date_format(&config.date_format)?;
        Ok(config)
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Model options derived from this configuration
    #[must_use]
    pub fn model_options(&self) -> ModelOptions {
        ModelOptions {
            column_names: self.column_names.clone(),
            do_refetch: self.do_refetch,
        }
    }

    /// Read a setting as display text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for unknown keys.
    pub fn get_value(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "quiet" => self.quiet.to_string(),
            "default_source" => source_name(self.default_source),
            "show_hidden" => self.show_hidden.to_string(),
            "date_format" => self.date_format.clone(),
            "do_refetch" => self.do_refetch.to_string(),
            "column_names" => self.column_names.as_ref().map_or_else(String::new, |c| c.join(",")),
            "mock.n_children" => self.mock.n_children.to_string(),
            "mock.n_directories" => self.mock.n_directories.to_string(),
            _ => return Err(ConfigError::NotFound(key.to_string())),
        };
        Ok(value)
    }

    /// Update a setting from text; the change is not saved
    ///
    /// `column_names` takes a comma separated list, empty to unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for unknown keys and
    /// `ConfigError::Message` for values that do not parse.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "quiet" => self.quiet = parse_bool(key, value)?,
            "default_source" => {
                self.default_source = SourceKind::from_str(value, true).map_err(|_| {
                    ConfigError::Message(format!(
                        "Invalid value for default_source: '{value}'. Use 'fs', 'json' or 'mock'"
                    ))
                })?;
            }
            "show_hidden" => self.show_hidden = parse_bool(key, value)?,
            "date_format" => self.date_format = parse_date_format(value)?,
            "do_refetch" => self.do_refetch = parse_bool(key, value)?,
            "column_names" => {
                let names: Vec<String> = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
                self.column_names = (!names.is_empty()).then_some(names);
            }
            "mock.n_children" => self.mock.n_children = parse_count(key, value)?,
            "mock.n_directories" => self.mock.n_directories = parse_count(key, value)?,
            _ => return Err(ConfigError::NotFound(key.to_string())),
        }
        Ok(())
    }
}

fn source_name(kind: SourceKind) -> String {
    kind.to_possible_value()
        .map_or_else(String::new, |v| v.get_name().to_string())
}

fn parse_date_format(value: &str) -> Result<String, ConfigError> {
    if format::is_valid_date_format(value) {
        Ok(value.to_string())
    } else {
        Err(ConfigError::Message(format!(
            "Invalid value for date_format: '{value}'. Use a chrono format string such as '%Y-%m-%d %H:%M'"
        )))
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.parse::<bool>().map_err(|_| {
        ConfigError::Message(format!("Invalid value for {key}: '{value}'. Use 'true' or 'false'"))
    })
}

fn parse_count(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.parse::<usize>().map_err(|_| {
        ConfigError::Message(format!("Invalid value for {key}: '{value}'. Use a whole number"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = TreefinderConfig::default();
        assert!(!config.quiet);
        assert_eq!(config.default_source, SourceKind::Fs);
        assert_eq!(config.date_format, "%Y-%m-%d %H:%M");
        assert_eq!(config.mock.n_children, 100);
        assert_eq!(config.model_options(), ModelOptions::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = TreefinderConfig::default();
        config.default_source = SourceKind::Mock;
        config.column_names = Some(vec!["kind".into(), "size".into()]);
        config.mock.n_directories = 3;
        config.save_to(&path).unwrap();

        let loaded = TreefinderConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_rejects_bad_date_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = TreefinderConfig::default();

        assert!(config.set_value("date_format", "%Q").is_err());
        assert_eq!(config.date_format, "%Y-%m-%d %H:%M");
        config.set_value("date_format", "%d.%m.%Y").unwrap();
        assert_eq!(config.date_format, "%d.%m.%Y");

        fs::write(&path, "date_format = \"%Q\"\n").unwrap();
        assert!(TreefinderConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "quiet = true\n[mock]\nn_children = 7\n").unwrap();

        let config = TreefinderConfig::load_from(&path).unwrap();
        assert!(config.quiet);
        assert_eq!(config.mock.n_children, 7);
        assert_eq!(config.mock.n_directories, 10);
        assert_eq!(config.date_format, "%Y-%m-%d %H:%M");
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = TempDir::new().unwrap();
        assert!(TreefinderConfig::load_from(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_set_and_get_values() {
        let mut config = TreefinderConfig::default();

        config.set_value("default_source", "JSON").unwrap();
        assert_eq!(config.get_value("default_source").unwrap(), "json");

        config.set_value("column_names", "kind, size").unwrap();
        assert_eq!(config.get_value("column_names").unwrap(), "kind,size");
        config.set_value("column_names", "").unwrap();
        assert_eq!(config.column_names, None);

        config.set_value("mock.n_children", "12").unwrap();
        assert_eq!(config.mock.n_children, 12);

        config.set_value("do_refetch", "true").unwrap();
        assert!(config.model_options().do_refetch);
    }

    #[test]
    fn test_invalid_values() {
        let mut config = TreefinderConfig::default();
        assert!(config.set_value("quiet", "yes").is_err());
        assert!(config.set_value("default_source", "ftp").is_err());
        assert!(config.set_value("mock.n_children", "-1").is_err());
        assert!(matches!(config.set_value("colour", "red"), Err(ConfigError::NotFound(_))));
        assert!(config.get_value("colour").is_err());
    }

    #[test]
    fn test_every_key_is_readable() {
        let config = TreefinderConfig::default();
        for key in KEYS {
            assert!(config.get_value(key).is_ok(), "{key}");
        }
    }
}
