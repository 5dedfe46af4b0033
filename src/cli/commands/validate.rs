//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the converter configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Source: {}", config.conversion.source_path);
        println!("  Destination: {}", config.conversion.destination_path);
        println!(
            "  Filter: {}",
            if config.conversion.filter.is_empty() {
                "(all notebooks)"
            } else {
                config.conversion.filter.as_str()
            }
        );
        println!("  Format: {}", config.conversion.format);
        println!(
            "  Retry: {} attempts, {} ms apart",
            config.retry.max_attempts, config.retry.wait_interval_ms
        );
        println!("  Automation Backend: {:?}", config.automation.backend);
        println!("  Section Extension: {}", config.automation.section_extension);
        println!();
        Ok(0)
    }
}
