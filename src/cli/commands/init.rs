//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "notebook-converter.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing converter configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} and set source_path and destination_path", self.output);
                println!("  2. Validate configuration: notebook-converter validate-config");
                println!("  3. Preview the run: notebook-converter convert --dry-run");
                println!("  4. Convert: notebook-converter convert");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Notebook Converter Configuration File

[application]
log_level = "info"
dry_run = false

[conversion]
source_path = "${NBCONV_SOURCE}"
destination_path = "${NBCONV_DESTINATION}"
filter = ""
format = "current"
close_force = false

[retry]
wait_interval_ms = 3000
max_attempts = 20

[automation]
backend = "local"
section_extension = ".one"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Notebook Converter Configuration File
#
# Every value can be overridden with an environment variable named
# NBCONV_<SECTION>_<KEY>, e.g. NBCONV_CONVERSION_FILTER="^BRA".
# ${VAR} placeholders are replaced with environment variables on load.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Dry run mode (load hierarchies, export nothing)
dry_run = false

# ============================================================================
# Conversion
# ============================================================================
[conversion]
# Directory with one sub-directory per notebook
source_path = "D:/Notebooks"

# Directory receiving one sub-directory per converted notebook
destination_path = "D:/Converted"

# Regular expression over notebook names (empty = all notebooks)
filter = "^BRA"

# Target format
# - current: current section format; section order and colours are restored
# - legacy: legacy section format
format = "current"

# Close notebooks without syncing them back
close_force = false

# ============================================================================
# Hierarchy Loading
# ============================================================================
[retry]
# Pause between hierarchy loads while pages are still arriving
wait_interval_ms = 3000

# Loads before the notebook is reported as failed
max_attempts = 20

# ============================================================================
# Automation Service
# ============================================================================
[automation]
# Backend (local = plain directories of section files)
backend = "local"

# Section file extension
section_extension = ".one"

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local JSON file logging
local_enabled = true

# Local log directory
local_path = "logs"

# Log rotation (daily, hourly or never)
local_rotation = "daily"
"#
        .to_string()
    }
}
