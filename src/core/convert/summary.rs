//! Conversion summary and reporting
//!
//! This module defines structures for tracking and reporting conversion results.

use crate::domain::ConverterError;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Summary of a conversion run
#[derive(Debug, Clone)]
pub struct ConversionSummary {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Notebooks selected by the filter
    pub total_notebooks: usize,

    /// Notebooks published without error
    pub converted_notebooks: usize,

    /// Notebooks that failed with a recoverable error
    pub failed_notebooks: usize,

    /// Notebooks never started because the run was interrupted
    pub skipped_notebooks: usize,

    /// Sections exported across all notebooks
    pub sections_exported: usize,

    /// Empty sections skipped across all notebooks
    pub sections_skipped: usize,

    /// Duration of the conversion
    pub duration: Duration,

    /// Errors encountered during conversion
    pub errors: Vec<ConversionError>,

    /// Whether a shutdown signal stopped the run early
    pub interrupted: bool,
}

impl ConversionSummary {
    /// Create a new empty summary
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            total_notebooks: 0,
            converted_notebooks: 0,
            failed_notebooks: 0,
            skipped_notebooks: 0,
            sections_exported: 0,
            sections_skipped: 0,
            duration: Duration::from_secs(0),
            errors: Vec::new(),
            interrupted: false,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add an error
    pub fn add_error(&mut self, error: ConversionError) {
        self.errors.push(error);
    }

    /// No notebook failed and the run was not interrupted
    pub fn is_successful(&self) -> bool {
        self.failed_notebooks == 0 && self.errors.is_empty() && !self.interrupted
    }

    /// Get success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_notebooks == 0 {
            return 100.0;
        }
        (self.converted_notebooks as f64 / self.total_notebooks as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            started_at = %self.started_at.to_rfc3339(),
            total_notebooks = self.total_notebooks,
            converted = self.converted_notebooks,
            failed = self.failed_notebooks,
            skipped = self.skipped_notebooks,
            sections_exported = self.sections_exported,
            sections_skipped = self.sections_skipped,
            duration_secs = self.duration.as_secs(),
            success_rate = format!("{:.2}%", self.success_rate()),
            interrupted = self.interrupted,
            "Conversion completed"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Conversion completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    message = %error.message,
                    context = ?error.context,
                    "Conversion error"
                );
            }
        }
    }
}

impl Default for ConversionSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Type of conversion error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionErrorType {
    /// The hierarchy never settled within the retry budget
    HierarchyNotReady,
    /// Destination sections could not be matched to the source
    Reconciliation,
    /// The automation service failed
    Automation,
    /// Filesystem error
    Io,
    /// Unknown error
    Unknown,
}

impl From<&ConverterError> for ConversionErrorType {
    fn from(error: &ConverterError) -> Self {
        match error {
            ConverterError::HierarchyNotReady(_) => Self::HierarchyNotReady,
            ConverterError::ReconciliationMismatch { .. } => Self::Reconciliation,
            ConverterError::Automation(_) => Self::Automation,
            ConverterError::Io(_) => Self::Io,
            _ => Self::Unknown,
        }
    }
}

/// Conversion error with context
#[derive(Debug, Clone)]
pub struct ConversionError {
    /// Type of error
    pub error_type: ConversionErrorType,

    /// Error message
    pub message: String,

    /// Optional context (e.g., notebook name)
    pub context: Option<String>,
}

impl ConversionError {
    /// Create a new conversion error
    pub fn new(error_type: ConversionErrorType, message: String) -> Self {
        Self {
            error_type,
            message,
            context: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: String) -> Self {
        self.context = Some(context);
        self
    }
}

impl From<&ConverterError> for ConversionError {
    fn from(error: &ConverterError) -> Self {
        Self::new(ConversionErrorType::from(error), error.to_string())
    }
}
