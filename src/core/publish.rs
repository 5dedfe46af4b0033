//! Publishing a notebook section by section
//!
//! Every section with pages is exported to `<destination>/<name><ext>`; empty
//! sections are skipped. The current format loses the authoring order and
//! colours of the sections, so after a current-format publish the destination
//! notebook is opened and its hierarchy is rewritten to match the source.

use super::notebook::Notebook;
use super::progress::ProgressReporter;
use super::retry::RetryPolicy;
use crate::adapters::automation::{AutomationService, PublishFormat};
use crate::domain::{ConverterError, Result, SectionMap};
use std::path::Path;
use std::sync::Arc;

/// Counts of what a publish did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Sections exported to the destination
    pub exported: usize,
    /// Sections without pages that were skipped
    pub skipped: usize,
    /// Whether the destination hierarchy was reordered
    pub reordered: bool,
}

/// Publishes notebooks through an automation service
pub struct Publisher {
    automation: Arc<dyn AutomationService>,
    retry_policy: RetryPolicy,
    dry_run: bool,
}

impl Publisher {
    pub fn new(automation: Arc<dyn AutomationService>) -> Self {
        Self {
            automation,
            retry_policy: RetryPolicy::HIERARCHY,
            dry_run: false,
        }
    }

    /// Retry policy for the destination hierarchy load
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Loads hierarchies and reports steps without exporting anything
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Publishes `notebook` into the `destination` directory
    ///
    /// Reports 3 setup steps, one step per section and, for the current
    /// format, one ordering step. Each batch of steps is announced to
    /// `progress` before it is reported.
    pub async fn publish(
        &self,
        notebook: &mut Notebook,
        destination: &Path,
        format: PublishFormat,
        progress: &mut ProgressReporter,
    ) -> Result<PublishReport> {
        let mut report = PublishReport::default();
        self.publish_into(notebook, destination, format, progress, &mut report)
            .await?;
        Ok(report)
    }

    /// Same as [`Publisher::publish`], counting into `report` as it goes
    ///
    /// If reordering fails after the export, `report` still tells how many
    /// section files reached the destination.
    pub async fn publish_into(
        &self,
        notebook: &mut Notebook,
        destination: &Path,
        format: PublishFormat,
        progress: &mut ProgressReporter,
        report: &mut PublishReport,
    ) -> Result<()> {
        progress.increase_total(3)?;
        progress.report_step("Loading notebook")?;
        notebook.establish_identity().await?;

        progress.report_step("Loading sections and pages")?;
        notebook.load_hierarchy().await?;

        progress.report_step("Starting exporting")?;
        self.export_sections(notebook, destination, format, progress, report)
            .await?;

        if format.requires_reordering() {
            progress.increase_total(1)?;
            progress.report_step("Ordering sections")?;
            if !self.dry_run {
                self.reorder_sections(notebook.sections(), destination).await?;
                report.reordered = true;
            }
        }

        tracing::info!(
            notebook = %notebook.name(),
            format = %format,
            exported = report.exported,
            skipped = report.skipped,
            reordered = report.reordered,
            "Notebook published"
        );
        Ok(())
    }

    /// Publishes in the current format, then restores section order and colours
    pub async fn publish_current(
        &self,
        notebook: &mut Notebook,
        destination: &Path,
        progress: &mut ProgressReporter,
    ) -> Result<PublishReport> {
        self.publish(notebook, destination, PublishFormat::Current, progress)
            .await
    }

    /// Publishes in the legacy format; no reordering is needed
    pub async fn publish_legacy(
        &self,
        notebook: &mut Notebook,
        destination: &Path,
        progress: &mut ProgressReporter,
    ) -> Result<PublishReport> {
        self.publish(notebook, destination, PublishFormat::Legacy, progress)
            .await
    }

    async fn export_sections(
        &self,
        notebook: &Notebook,
        destination: &Path,
        format: PublishFormat,
        progress: &mut ProgressReporter,
        report: &mut PublishReport,
    ) -> Result<()> {
        let sections = notebook.sections();
        progress.increase_total(sections.len())?;

        if !self.dry_run {
            tokio::fs::create_dir_all(destination).await?;
        }

        let extension = self.automation.section_extension();
        for section in sections {
            if !section.has_pages {
                progress.report_step(format!("Skipping empty section '{}'", section.name))?;
                report.skipped += 1;
                continue;
            }

            progress.report_step(format!("Starting converting section '{}'", section.name))?;
            if self.dry_run {
                continue;
            }

            let id = section.id.as_ref().ok_or_else(|| {
                ConverterError::Other(format!("section '{}' has no identifier", section.name))
            })?;
            let target = destination.join(format!("{}{}", section.name, extension));
            self.automation.publish(id, &target, format).await?;
            report.exported += 1;
        }

        Ok(())
    }

    /// Rewrites the destination hierarchy in source order with source colours
    ///
    /// The destination notebook is closed whether or not reconciliation
    /// succeeds.
    async fn reorder_sections(&self, source: &SectionMap, destination: &Path) -> Result<()> {
        let mut target = Notebook::new(self.automation.clone(), destination)
            .with_retry_policy(self.retry_policy);

        let outcome = Self::apply_source_order(&mut target, source).await;
        let closed = target.close(false).await;

        outcome?;
        closed
    }

    async fn apply_source_order(target: &mut Notebook, source: &SectionMap) -> Result<()> {
        target.establish_identity().await?;
        target.load_hierarchy().await?;
        let reconciled = reconcile_sections(source, target.sections())?;
        target.replace_sections(reconciled);
        target.update_sections_hierarchy().await
    }
}

/// Combines source order and attributes with destination identifiers
///
/// The result lists the source sections in source order, each carrying the
/// identifier of the destination section with the same name. Source sections
/// with no destination counterpart keep no identifier.
///
/// # Errors
///
/// Returns [`ConverterError::ReconciliationMismatch`] if the destination has a
/// section whose name is not in the source.
pub fn reconcile_sections(source: &SectionMap, destination: &SectionMap) -> Result<SectionMap> {
    let mut merged: SectionMap = source.iter().map(|s| s.duplicate_unbound()).collect();

    for section in destination {
        let entry = merged
            .get_mut(&section.name)
            .ok_or_else(|| ConverterError::ReconciliationMismatch {
                section: section.name.clone(),
            })?;
        entry.id = section.id.clone();
    }

    Ok(merged)
}
