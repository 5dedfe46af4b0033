//! Automation backend factory
//!
//! Builds the automation service selected in configuration.

use super::local::LocalAutomation;
use super::traits::AutomationService;
use crate::config::schema::{AutomationBackend, AutomationConfig};
use crate::domain::Result;
use std::sync::Arc;

/// Creates the automation service for the configured backend
///
/// # Errors
///
/// Returns an error if the backend cannot be initialised on this machine.
pub fn create_automation(config: &AutomationConfig) -> Result<Arc<dyn AutomationService>> {
    match config.backend {
        AutomationBackend::Local => {
            tracing::info!(
                extension = %config.section_extension,
                "Using directory-backed automation service"
            );
            Ok(Arc::new(LocalAutomation::new(
                config.section_extension.clone(),
            )))
        }
    }
}
