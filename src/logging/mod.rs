//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console logs on stderr
//! - Configurable log levels (`RUST_LOG` overrides the configured level)
//! - JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use notebook_converter::logging::init_logging;
//! use notebook_converter::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a notebook conversion
///
/// # Example
///
/// ```no_run
/// use notebook_converter::log_notebook_start;
///
/// log_notebook_start!("Work", "D:/Notebooks/Work");
/// ```
#[macro_export]
macro_rules! log_notebook_start {
    ($notebook:expr, $path:expr) => {
        tracing::info!(
            notebook = %$notebook,
            path = %$path,
            "Starting notebook"
        );
    };
}

/// Log the completion of a notebook conversion
///
/// # Example
///
/// ```no_run
/// use notebook_converter::log_notebook_complete;
/// use std::time::Duration;
///
/// log_notebook_complete!("Work", 12, Duration::from_secs(4));
/// ```
#[macro_export]
macro_rules! log_notebook_complete {
    ($notebook:expr, $sections:expr, $duration:expr) => {
        tracing::info!(
            notebook = %$notebook,
            sections = $sections,
            duration_ms = $duration.as_millis() as u64,
            "Notebook converted"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use notebook_converter::log_error_with_context;
/// use notebook_converter::domain::ConverterError;
///
/// let error = ConverterError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = %$context,
            "Error occurred"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use notebook_converter::log_retry_attempt;
///
/// log_retry_attempt!(2, 20, "pages still loading in Inbox");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = $reason,
            "Hierarchy not ready, retrying"
        );
    };
}
