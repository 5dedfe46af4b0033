//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ConverterConfig;
use crate::adapters::automation::PublishFormat;
use crate::domain::errors::ConverterError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Prefix of environment variables that override configuration values
pub const ENV_PREFIX: &str = "NBCONV";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ConverterConfig
/// 4. Applies environment variable overrides (NBCONV_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use notebook_converter::config::loader::load_config;
///
/// let config = load_config("notebook-converter.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ConverterConfig> {
    let config = read_config(path)?;

    config.validate().map_err(|e| {
        ConverterError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Loads configuration without validating it
///
/// Used by commands that apply CLI overrides before validation.
pub fn read_config(path: impl AsRef<Path>) -> Result<ConverterConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConverterError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ConverterError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: ConverterConfig = toml::from_str(&contents)
        .map_err(|e| ConverterError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied unchanged.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ConverterError::Configuration(e.to_string()))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ConverterError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env_override(key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}_{key}")).ok()
}

/// Applies environment variable overrides using the NBCONV_* prefix
///
/// Environment variables follow the pattern: NBCONV_<SECTION>_<KEY>
/// For example: NBCONV_CONVERSION_SOURCE_PATH, NBCONV_RETRY_MAX_ATTEMPTS
fn apply_env_overrides(config: &mut ConverterConfig) -> Result<()> {
    // Application overrides
    if let Some(val) = env_override("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Some(val) = env_override("APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Conversion overrides
    if let Some(val) = env_override("CONVERSION_SOURCE_PATH") {
        config.conversion.source_path = val;
    }
    if let Some(val) = env_override("CONVERSION_DESTINATION_PATH") {
        config.conversion.destination_path = val;
    }
    if let Some(val) = env_override("CONVERSION_FILTER") {
        config.conversion.filter = val;
    }
    if let Some(val) = env_override("CONVERSION_FORMAT") {
        config.conversion.format = PublishFormat::from_str(&val)?;
    }
    if let Some(val) = env_override("CONVERSION_CLOSE_FORCE") {
        config.conversion.close_force = val.parse().unwrap_or(false);
    }

    // Retry overrides
    if let Some(val) = env_override("RETRY_WAIT_INTERVAL_MS") {
        if let Ok(ms) = val.parse() {
            config.retry.wait_interval_ms = ms;
        }
    }
    if let Some(val) = env_override("RETRY_MAX_ATTEMPTS") {
        if let Ok(attempts) = val.parse() {
            config.retry.max_attempts = attempts;
        }
    }

    // Automation overrides
    if let Some(val) = env_override("AUTOMATION_SECTION_EXTENSION") {
        config.automation.section_extension = val;
    }

    // Logging overrides
    if let Some(val) = env_override("LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Some(val) = env_override("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = env_override("LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
