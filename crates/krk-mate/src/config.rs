//! Configuration file loading for krk-mate.
//!
//! Settings are read from `krk.toml` in the current directory, or from the
//! file given with `--config`. Command-line flags take precedence.

use krk_engine::HuntConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Top-level configuration file.
///
/// ```toml
/// [hunt]
/// depth = 11
/// max_plies = 25
/// clear_table_each_move = true
/// ```
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
pub struct MateConfig {
    /// Settings for `hunt`; `depth` is also the default for `best`.
    #[serde(default)]
    pub hunt: HuntConfig,
}

impl MateConfig {
    /// Loads the configuration.
    ///
    /// An explicit `path` must exist. Without one, `krk.toml` is read if
    /// present and defaults are used otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default_path = Self::config_path();
                if !default_path.exists() {
                    return Ok(Self::default());
                }
                default_path
            }
        };

        tracing::debug!("Loading config from {:?}", config_path);
        let content = std::fs::read_to_string(&config_path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Returns the default path of the configuration file.
    pub fn config_path() -> PathBuf {
        PathBuf::from("krk.toml")
    }

    /// Returns the hunt settings with command-line overrides applied.
    pub fn hunt_with(&self, depth: Option<u32>, max_plies: Option<u32>) -> HuntConfig {
        HuntConfig {
            depth: depth.unwrap_or(self.hunt.depth),
            max_plies: max_plies.unwrap_or(self.hunt.max_plies),
            ..self.hunt.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[hunt]
depth = 7
max_plies = 40
clear_table_each_move = false
"#;

        let config: MateConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.hunt.depth, 7);
        assert_eq!(config.hunt.max_plies, 40);
        assert!(!config.hunt.clear_table_each_move);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: MateConfig = toml::from_str("").unwrap();
        assert_eq!(config, MateConfig::default());

        let config: MateConfig = toml::from_str("[hunt]\nmax_plies = 11\n").unwrap();
        assert_eq!(config.hunt.depth, 11);
        assert_eq!(config.hunt.max_plies, 11);
        assert!(config.hunt.clear_table_each_move);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let path = std::env::temp_dir().join(format!("krk-mate-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "[hunt\ndepth = ").unwrap();

        let result = MateConfig::load(Some(&path));
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_explicit_missing_file_is_read_error() {
        let path = Path::new("/nonexistent/krk-mate/config.toml");
        assert!(matches!(
            MateConfig::load(Some(path)),
            Err(ConfigError::ReadError(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("krk-mate-ok-{}.toml", std::process::id()));
        std::fs::write(&path, "[hunt]\ndepth = 5\n").unwrap();

        let config = MateConfig::load(Some(&path));
        std::fs::remove_file(&path).ok();

        assert_eq!(config.unwrap().hunt.depth, 5);
    }

    #[test]
    fn test_cli_overrides() {
        let config = MateConfig::default();
        let hunt = config.hunt_with(Some(4), None);
        assert_eq!(hunt.depth, 4);
        assert_eq!(hunt.max_plies, 25);

        let hunt = config.hunt_with(None, Some(3));
        assert_eq!(hunt.depth, 11);
        assert_eq!(hunt.max_plies, 3);
    }
}
