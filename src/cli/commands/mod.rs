//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod convert;
pub mod init;
pub mod list;
pub mod show;
pub mod validate;

use crate::adapters::automation::PublishFormat;
use crate::config::{read_config, ConverterConfig};
use crate::domain::{AutomationError, ConverterError};
use clap::Args;
use std::str::FromStr;

/// Conversion settings that can be overridden on the command line
#[derive(Args, Debug, Default, Clone)]
pub struct ConversionOverrides {
    /// Directory containing the source notebooks
    #[arg(long)]
    pub source: Option<String>,

    /// Directory receiving the converted notebooks
    #[arg(long)]
    pub destination: Option<String>,

    /// Regular expression selecting notebook names
    #[arg(long)]
    pub filter: Option<String>,

    /// Target format (current or legacy)
    #[arg(long)]
    pub format: Option<String>,
}

impl ConversionOverrides {
    /// Applies the overrides to a loaded configuration
    pub fn apply(&self, config: &mut ConverterConfig) -> Result<(), ConverterError> {
        if let Some(source) = &self.source {
            tracing::info!(source = %source, "Overriding source path from CLI");
            config.conversion.source_path = source.clone();
        }
        if let Some(destination) = &self.destination {
            tracing::info!(destination = %destination, "Overriding destination path from CLI");
            config.conversion.destination_path = destination.clone();
        }
        if let Some(filter) = &self.filter {
            tracing::info!(filter = %filter, "Overriding notebook filter from CLI");
            config.conversion.filter = filter.clone();
        }
        if let Some(format) = &self.format {
            config.conversion.format = PublishFormat::from_str(format)?;
        }
        Ok(())
    }
}

/// Reads the configuration, applies CLI overrides and validates the result
///
/// Prints the failure and returns `Err(2)` on any configuration error.
pub(crate) fn load_with_overrides(
    config_path: &str,
    overrides: &ConversionOverrides,
) -> Result<ConverterConfig, i32> {
    let mut config = match read_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            eprintln!("Failed to load configuration: {e}");
            return Err(2);
        }
    };

    if let Err(e) = overrides.apply(&mut config) {
        eprintln!("Invalid command line option: {e}");
        return Err(2);
    }

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Configuration validation failed");
        eprintln!("Configuration validation failed: {e}");
        return Err(2);
    }

    Ok(config)
}

/// Process exit code for an error that stopped a command
///
/// - 2: configuration or path problem
/// - 4: automation backend unavailable
/// - 5: any other fatal error
pub fn exit_code_for(error: &ConverterError) -> i32 {
    match error {
        ConverterError::InvalidPath(_)
        | ConverterError::InvalidConfiguration(_)
        | ConverterError::Configuration(_)
        | ConverterError::Validation(_) => 2,
        ConverterError::Automation(AutomationError::Unavailable(_)) => 4,
        _ => 5,
    }
}
