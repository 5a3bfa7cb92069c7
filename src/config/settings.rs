//! Configuration structures for serialisation.
//!
//! These structures map directly to the JSON configuration file format,
//! which persists the command defaults the dialogs were last run with.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default, skip_serializing_if = "Option::is_none")]
    _comment: Option<String>,

    /// Persisted copy-command defaults.
    #[serde(default)]
    pub copy: CopyDefaults,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.copy.default_step.is_finite() || self.copy.default_step <= 0.0 {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Invalid default step {}. Must be a positive distance",
                    self.copy.default_step
                ),
            });
        }
        if self.copy.default_count == 0 {
            return Err(ConfigError::ValidationError {
                message: "Invalid default count 0. At least one copy is required".to_string(),
            });
        }
        if !self.copy.upward && !self.copy.downward {
            return Err(ConfigError::ValidationError {
                message: "At least one copy direction must be enabled".to_string(),
            });
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                ),
            });
        }
        Ok(())
    }
}

/// Persisted defaults for the copy commands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopyDefaults {
    /// Default step distance in internal length units.
    /// Default: 8.0 (one storey)
    #[serde(default = "default_step")]
    pub default_step: f64,

    /// Default number of copies per direction.
    /// Default: 1
    #[serde(default = "default_count")]
    pub default_count: u32,

    /// Copy upward by default.
    #[serde(default = "default_true")]
    pub upward: bool,

    /// Copy downward by default.
    #[serde(default)]
    pub downward: bool,
}

impl Default for CopyDefaults {
    fn default() -> Self {
        Self {
            default_step: default_step(),
            default_count: default_count(),
            upward: default_true(),
            downward: false,
        }
    }
}

fn default_step() -> f64 {
    8.0
}

const fn default_count() -> u32 {
    1
}

const fn default_true() -> bool {
    true
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let json = r"{}";
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert!((config.copy.default_step - 8.0).abs() < f64::EPSILON);
        assert_eq!(config.copy.default_count, 1);
        assert!(config.copy.upward);
        assert!(!config.copy.downward);
    }

    #[test]
    fn parse_full_config() {
        let json = r#"{
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "_comment": "Test config",
            "copy": {
                "default_step": 11.5,
                "default_count": 3,
                "upward": false,
                "downward": true
            },
            "logging": {
                "level": "debug"
            }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert!((config.copy.default_step - 11.5).abs() < f64::EPSILON);
        assert_eq!(config.copy.default_count, 3);
        assert!(config.copy.downward);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn reject_non_positive_step() {
        let json = r#"{ "copy": { "default_step": 0.0 } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_zero_count() {
        let json = r#"{ "copy": { "default_count": 0 } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_no_direction() {
        let json = r#"{ "copy": { "upward": false, "downward": false } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_unknown_log_level() {
        let json = r#"{ "logging": { "level": "verbose" } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }
}
