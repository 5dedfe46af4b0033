//! Configuration schema types
//!
//! This module defines the configuration structure that maps to the TOML file.

use crate::adapters::automation::PublishFormat;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Automation backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AutomationBackend {
    /// Directory-backed service
    #[default]
    Local,
}

/// Main converter configuration
///
/// This is the root configuration structure that maps to the TOML file. Every
/// section is optional; missing sections take their defaults so that CLI flags
/// alone can drive a conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// What to convert and where to
    #[serde(default)]
    pub conversion: ConversionConfig,

    /// Hierarchy load retry policy
    #[serde(default)]
    pub retry: RetryConfig,

    /// Automation service backend
    #[serde(default)]
    pub automation: AutomationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConverterConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.conversion.validate()?;
        self.retry.validate()?;
        self.automation.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (load hierarchies, export nothing)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Conversion settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Directory holding one sub-directory per source notebook
    #[serde(default)]
    pub source_path: String,

    /// Directory that receives one sub-directory per converted notebook
    #[serde(default)]
    pub destination_path: String,

    /// Regular expression over notebook directory names; empty selects all
    #[serde(default)]
    pub filter: String,

    /// Target section format
    #[serde(default)]
    pub format: PublishFormat,

    /// Close notebooks without syncing them back
    #[serde(default)]
    pub close_force: bool,
}

impl ConversionConfig {
    fn validate(&self) -> Result<(), String> {
        if self.source_path.trim().is_empty() {
            return Err("conversion.source_path cannot be empty".to_string());
        }
        if self.destination_path.trim().is_empty() {
            return Err("conversion.destination_path cannot be empty".to_string());
        }
        if !self.filter.is_empty() {
            Regex::new(&self.filter)
                .map_err(|e| format!("Invalid conversion.filter '{}': {}", self.filter, e))?;
        }
        Ok(())
    }
}

/// Retry policy for hierarchy loads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Pause between attempts in milliseconds
    #[serde(default = "default_wait_interval_ms")]
    pub wait_interval_ms: u64,

    /// Attempts before giving up on a notebook
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

impl RetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.wait_interval_ms == 0 {
            return Err("retry.wait_interval_ms must be greater than 0".to_string());
        }
        if self.max_attempts == 0 {
            return Err("retry.max_attempts must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            wait_interval_ms: default_wait_interval_ms(),
            max_attempts: default_max_attempts(),
        }
    }
}

/// Automation service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationConfig {
    /// Backend implementation
    #[serde(default)]
    pub backend: AutomationBackend,

    /// Section file extension, including the leading dot
    #[serde(default = "default_section_extension")]
    pub section_extension: String,
}

impl AutomationConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.section_extension.starts_with('.') || self.section_extension.len() < 2 {
            return Err(format!(
                "Invalid automation.section_extension '{}'. Must look like '.one'",
                self.section_extension
            ));
        }
        Ok(())
    }
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            backend: AutomationBackend::default(),
            section_extension: default_section_extension(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled = true".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_wait_interval_ms() -> u64 {
    3000
}

fn default_max_attempts() -> usize {
    20
}

fn default_section_extension() -> String {
    ".one".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ConverterConfig {
        let mut config = ConverterConfig::default();
        config.conversion.source_path = "/data/notebooks".to_string();
        config.conversion.destination_path = "/data/converted".to_string();
        config
    }

    #[test]
    fn test_defaults() {
        let config = ConverterConfig::default();
        assert_eq!(config.application.log_level, "info");
        assert!(!config.application.dry_run);
        assert_eq!(config.retry.wait_interval_ms, 3000);
        assert_eq!(config.retry.max_attempts, 20);
        assert_eq!(config.automation.section_extension, ".one");
        assert_eq!(config.conversion.format, PublishFormat::Current);
        assert!(!config.logging.local_enabled);
    }

    #[test]
    fn test_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_missing_paths_rejected() {
        let config = ConverterConfig::default();
        let err = config.validate().unwrap_err();
        assert!(err.contains("source_path"));
    }

    #[test]
    fn test_invalid_filter_rejected() {
        let mut config = valid_config();
        config.conversion.filter = "^(BRA".to_string();
        assert!(config.validate().unwrap_err().contains("conversion.filter"));
    }

    #[test]
    fn test_zero_retry_values_rejected() {
        let mut config = valid_config();
        config.retry.max_attempts = 0;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.retry.wait_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = valid_config();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_extension_rejected() {
        let mut config = valid_config();
        config.automation.section_extension = "one".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let config: ConverterConfig = toml::from_str(
            r#"
[conversion]
source_path = "/in"
destination_path = "/out"
format = "legacy"
"#,
        )
        .unwrap();

        assert_eq!(config.conversion.format, PublishFormat::Legacy);
        assert_eq!(config.retry.max_attempts, 20);
        assert_eq!(config.automation.backend, AutomationBackend::Local);
    }
}
