//! Configuration management.
//!
//! TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! The converter reads a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `NBCONV_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation after load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level and dry-run mode
//! - [`ConversionConfig`] - source and destination directories, name filter, target format
//! - [`RetryConfig`] - pause and attempt budget for hierarchy loads
//! - [`AutomationConfig`] - automation backend and section file extension
//! - [`LoggingConfig`] - optional rolling file log
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [conversion]
//! source_path = "D:/Notebooks"
//! destination_path = "D:/Converted"
//! filter = "^BRA"
//! format = "current"
//!
//! [retry]
//! wait_interval_ms = 3000
//! max_attempts = 20
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use notebook_converter::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("notebook-converter.toml")?;
//! println!("Converting from {}", config.conversion.source_path);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, read_config};
pub use schema::{
    ApplicationConfig, AutomationBackend, AutomationConfig, ConversionConfig, ConverterConfig,
    LoggingConfig, RetryConfig,
};
