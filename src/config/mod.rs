//! Configuration file loading and saving.
//!
//! This module handles loading the configuration file from disk and
//! parsing it into validated, type-safe structures, plus writing the
//! file back when a command persists its last-used parameters.
//!
//! # Configuration File Locations
//!
//! The configuration file is searched in the following order:
//!
//! 1. Path passed by the hosting add-in
//! 2. Default location:
//!    - **Linux/macOS:** `~/.mep-splice-engine/config.json`
//!    - **Windows:** `%USERPROFILE%\.mep-splice-engine\config.json`

mod settings;

pub use settings::{Config, CopyDefaults, LoggingConfig};

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Returns the default configuration directory.
///
/// - **Linux/macOS:** `~/.mep-splice-engine/`
/// - **Windows:** `%USERPROFILE%\.mep-splice-engine\`
#[must_use]
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".mep-splice-engine"))
}

/// Returns the platform-specific default configuration file path.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    default_config_dir().map(|p| p.join("config.json"))
}

/// Loads and parses the configuration file.
///
/// If `path` is `None`, uses the platform-specific default location.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration file cannot be found
/// - The file cannot be read
/// - The JSON is malformed
/// - Required fields are missing or invalid
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path().ok_or_else(|| ConfigError::NotFound {
            path: PathBuf::from("<default config path>"),
        })?,
    };

    if !config_path.exists() {
        return Err(ConfigError::NotFound { path: config_path });
    }

    let contents = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;

    let config: Config = serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: config_path.clone(),
        source: e,
    })?;

    // Validate the configuration
    config.validate()?;

    Ok(config)
}

/// Writes the configuration to the given path.
///
/// Used by commands that persist their last-used parameters as the next
/// run's defaults.
///
/// # Errors
///
/// Returns an error when the configuration fails validation or the file
/// cannot be written.
pub fn save_config(config: &Config, path: &Path) -> Result<(), ConfigError> {
    config.validate()?;

    let contents =
        serde_json::to_string_pretty(config).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

    std::fs::write(path, contents).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_dir_exists() {
        assert!(default_config_dir().is_some());
    }

    #[test]
    fn default_config_path_exists() {
        let path = default_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("config.json"));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.copy.default_step = 11.5;
        config.copy.default_count = 4;
        save_config(&config, &path).unwrap();

        let loaded = load_config(Some(&path)).unwrap();
        assert!((loaded.copy.default_step - 11.5).abs() < f64::EPSILON);
        assert_eq!(loaded.copy.default_count, 4);
    }

    #[test]
    fn save_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.copy.default_count = 0;
        let err = save_config(&config, &path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
        assert!(!path.exists());
    }
}
