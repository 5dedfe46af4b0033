//! Domain error types
//!
//! This module defines the error hierarchy for the converter. Transient
//! hierarchy errors are kept apart from data-integrity and programmer errors
//! so the batch driver can decide what to recover from.

use thiserror::Error;

/// Main converter error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// The automation service has not finished populating the hierarchy yet
    #[error("Hierarchy not ready: {0}")]
    HierarchyNotReady(String),

    /// The destination holds a section the source notebook cannot account for
    #[error("Reconciliation mismatch: destination section '{section}' is unknown to the source notebook")]
    ReconciliationMismatch { section: String },

    /// More steps were reported than were announced
    #[error("Progress overrun: step {current} exceeds total of {total}")]
    ProgressOverrun { current: usize, total: usize },

    /// A step was reported before any total was announced
    #[error("Progress not initialized: increase the total before reporting steps")]
    ProgressNotInitialized,

    /// Invalid argument passed to an operation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid retry policy or probe setup
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A required source or destination path is missing
    #[error("Path not accessible: {0}")]
    InvalidPath(String),

    /// The notebook has been closed and can no longer be used
    #[error("Notebook has been closed: {0}")]
    NotebookClosed(String),

    /// The operation needs a notebook identity that has not been established
    #[error("Notebook is not open: {0}")]
    NotebookNotOpen(String),

    /// Automation service errors
    #[error("Automation error: {0}")]
    Automation(#[from] AutomationError),

    /// Hierarchy markup could not be parsed or rendered
    #[error("Markup error: {0}")]
    Markup(String),

    /// Configuration file errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl ConverterError {
    /// Whether the batch may report this error and continue with the next notebook
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ConverterError::HierarchyNotReady(_))
    }
}

/// Automation service errors
///
/// Failures reported by the document automation service. The variants do not
/// expose any backend-specific types.
#[derive(Debug, Error)]
pub enum AutomationError {
    /// The path could not be opened as a notebook
    #[error("Failed to open notebook at {path}: {message}")]
    OpenFailed { path: String, message: String },

    /// The notebook ID is not known to the service
    #[error("Unknown notebook: {0}")]
    UnknownNotebook(String),

    /// The hierarchy could not be retrieved
    #[error("Failed to get hierarchy: {0}")]
    HierarchyQueryFailed(String),

    /// The hierarchy update was rejected
    #[error("Failed to update hierarchy: {0}")]
    UpdateFailed(String),

    /// A section could not be exported
    #[error("Failed to export section {section}: {message}")]
    ExportFailed { section: String, message: String },

    /// Navigation failed
    #[error("Failed to navigate to {0}")]
    NavigateFailed(String),

    /// The notebook could not be closed
    #[error("Failed to close notebook {0}")]
    CloseFailed(String),

    /// The requested backend is not available on this platform
    #[error("Automation backend unavailable: {0}")]
    Unavailable(String),
}

/// Conversion from std::io::Error
impl From<std::io::Error> for ConverterError {
    fn from(err: std::io::Error) -> Self {
        ConverterError::Io(err.to_string())
    }
}

/// Conversion from serde_json::Error
impl From<serde_json::Error> for ConverterError {
    fn from(err: serde_json::Error) -> Self {
        ConverterError::Serialization(err.to_string())
    }
}

/// Conversion from toml parse errors
impl From<toml::de::Error> for ConverterError {
    fn from(err: toml::de::Error) -> Self {
        ConverterError::Configuration(format!("TOML parse error: {err}"))
    }
}

/// Conversion from quick-xml errors
impl From<quick_xml::Error> for ConverterError {
    fn from(err: quick_xml::Error) -> Self {
        ConverterError::Markup(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for ConverterError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        ConverterError::Markup(err.to_string())
    }
}
