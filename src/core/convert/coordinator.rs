//! Conversion coordinator - drives a batch of notebooks through the publisher
//!
//! Each notebook below the source directory is opened, published into a
//! directory of the same name under the destination, and closed. A notebook
//! whose hierarchy never settles is reported and skipped; any other failure
//! stops the batch.

use super::discovery::list_notebooks;
use super::summary::{ConversionError, ConversionSummary};
use crate::adapters::automation::{AutomationService, PublishFormat};
use crate::config::ConverterConfig;
use crate::core::notebook::Notebook;
use crate::core::progress::ProgressReporter;
use crate::core::publish::{PublishReport, Publisher};
use crate::core::retry::RetryPolicy;
use crate::domain::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Conversion coordinator
pub struct ConversionCoordinator {
    automation: Arc<dyn AutomationService>,
    source: PathBuf,
    destination: PathBuf,
    filter: String,
    format: PublishFormat,
    close_force: bool,
    retry_policy: RetryPolicy,
    dry_run: bool,
    shutdown_signal: Option<watch::Receiver<bool>>,
}

impl ConversionCoordinator {
    /// Create a coordinator from the loaded configuration
    pub fn new(config: &ConverterConfig, automation: Arc<dyn AutomationService>) -> Result<Self> {
        Ok(Self {
            automation,
            source: PathBuf::from(&config.conversion.source_path),
            destination: PathBuf::from(&config.conversion.destination_path),
            filter: config.conversion.filter.clone(),
            format: config.conversion.format,
            close_force: config.conversion.close_force,
            retry_policy: RetryPolicy::from_config(&config.retry)?,
            dry_run: config.application.dry_run,
            shutdown_signal: None,
        })
    }

    /// Stop before the next notebook once `signal` turns true
    pub fn with_shutdown_signal(mut self, signal: watch::Receiver<bool>) -> Self {
        self.shutdown_signal = Some(signal);
        self
    }

    fn shutdown_requested(&self) -> bool {
        self.shutdown_signal
            .as_ref()
            .map(|signal| *signal.borrow())
            .unwrap_or(false)
    }

    /// Execute the conversion
    ///
    /// This is the main entry point for a batch. It:
    /// 1. Validates the source and destination directories
    /// 2. Lists the notebooks matching the filter
    /// 3. For each notebook:
    ///    - Reports start and indents nested steps
    ///    - Publishes into `<destination>/<notebook name>`
    ///    - Closes the source notebook
    ///    - Reports the outcome
    /// 4. Completes the progress and returns the summary
    ///
    /// # Errors
    ///
    /// Path and filter errors are returned before any notebook is touched.
    /// A non-recoverable error while converting a notebook closes that
    /// notebook and is returned.
    pub async fn execute(&self, progress: &mut ProgressReporter) -> Result<ConversionSummary> {
        let start_time = Instant::now();
        let mut summary = ConversionSummary::new();

        let notebooks = list_notebooks(&self.source, &self.destination, &self.filter).await?;
        summary.total_notebooks = notebooks.len();

        tracing::info!(
            source = %self.source.display(),
            destination = %self.destination.display(),
            notebook_count = notebooks.len(),
            format = %self.format,
            dry_run = self.dry_run,
            "Starting conversion"
        );

        progress.increase_total(notebooks.len().saturating_mul(2))?;
        let publisher = Publisher::new(self.automation.clone())
            .with_retry_policy(self.retry_policy)
            .with_dry_run(self.dry_run);

        for (index, path) in notebooks.iter().enumerate() {
            if self.shutdown_requested() {
                tracing::warn!(
                    remaining = notebooks.len() - index,
                    "Shutdown requested, stopping conversion"
                );
                summary.interrupted = true;
                summary.skipped_notebooks = notebooks.len() - index;
                break;
            }

            self.convert_notebook(&publisher, path, progress, &mut summary)
                .await?;
        }

        progress.complete("Conversion finished");

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    async fn convert_notebook(
        &self,
        publisher: &Publisher,
        path: &Path,
        progress: &mut ProgressReporter,
        summary: &mut ConversionSummary,
    ) -> Result<()> {
        let mut notebook =
            Notebook::new(self.automation.clone(), path).with_retry_policy(self.retry_policy);
        let name = notebook.name();
        let target = self.destination.join(&name);
        let started = Instant::now();
        crate::log_notebook_start!(&name, path.display());

        progress.report_step(format!("Starting notebook '{name}'"))?;
        progress.push_indent();
        let mut report = PublishReport::default();
        let outcome = publisher
            .publish_into(&mut notebook, &target, self.format, progress, &mut report)
            .await;
        progress.pop_indent();

        // files already written stay on disk even when the notebook fails later
        summary.sections_exported += report.exported;
        summary.sections_skipped += report.skipped;

        match outcome {
            Ok(()) => {
                summary.converted_notebooks += 1;
                crate::log_notebook_complete!(&name, report.exported, started.elapsed());
                self.close_notebook(&mut notebook).await?;
            }
            Err(e) if e.is_recoverable() => {
                crate::log_error_with_context!(&e, format!("notebook={name}"));
                summary.failed_notebooks += 1;
                summary.add_error(ConversionError::from(&e).with_context(format!("notebook={name}")));
                progress.increase_total(1)?;
                progress.report_step(format!("Error notebook '{name}'"))?;
                self.close_notebook(&mut notebook).await?;
            }
            Err(e) => {
                crate::log_error_with_context!(&e, format!("notebook={name}"));
                if let Err(close_error) = self.close_notebook(&mut notebook).await {
                    tracing::warn!(
                        notebook = %name,
                        error = %close_error,
                        "Failed to close notebook after error"
                    );
                }
                return Err(e);
            }
        }

        progress.report_step(format!("Finished notebook '{name}'"))?;
        Ok(())
    }

    async fn close_notebook(&self, notebook: &mut Notebook) -> Result<()> {
        if notebook.is_closed() {
            return Ok(());
        }
        notebook.close(self.close_force).await
    }
}
