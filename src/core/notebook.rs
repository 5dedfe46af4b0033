//! Notebook handle and hierarchy loading
//!
//! A [`Notebook`] starts as a path with no identity. Opening it through the
//! automation service assigns its [`NotebookId`]; loading the hierarchy fills
//! its [`SectionMap`]. The service populates hierarchies asynchronously after
//! a notebook is opened, so a single read can race it. A snapshot is only
//! accepted when no section reports missing pages and every section file on
//! disk appears in the snapshot; otherwise the load is retried.
//!
//! # Lifecycle
//!
//! ```text
//! new(path) -> establish_identity() -> load_hierarchy() ... -> close()
//! ```
//!
//! After `close()` every operation fails with
//! [`ConverterError::NotebookClosed`].

use super::retry::{Probe, Retrier, RetryPolicy};
use crate::adapters::automation::{
    parse_hierarchy, render_section_update, AutomationService, CreateFileType, HierarchyScope,
    SchemaVersion,
};
use crate::domain::{ConverterError, NotebookId, Result, SectionMap};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A notebook stored at a filesystem location
pub struct Notebook {
    automation: Option<Arc<dyn AutomationService>>,
    path: PathBuf,
    id: Option<NotebookId>,
    sections: SectionMap,
    retry_policy: RetryPolicy,
}

impl Notebook {
    /// Prepares a notebook at `path`; nothing is opened yet
    pub fn new(automation: Arc<dyn AutomationService>, path: impl Into<PathBuf>) -> Self {
        Self {
            automation: Some(automation),
            path: path.into(),
            id: None,
            sections: SectionMap::new(),
            retry_policy: RetryPolicy::HIERARCHY,
        }
    }

    /// Overrides the retry policy used by [`Notebook::load_hierarchy`]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory name of the notebook
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Identifier assigned by the service, once opened
    pub fn id(&self) -> Option<&NotebookId> {
        self.id.as_ref()
    }

    /// Sections from the last successful load, in authoring order
    pub fn sections(&self) -> &SectionMap {
        &self.sections
    }

    pub fn is_closed(&self) -> bool {
        self.automation.is_none()
    }

    pub(crate) fn automation(&self) -> Result<&Arc<dyn AutomationService>> {
        self.automation
            .as_ref()
            .ok_or_else(|| ConverterError::NotebookClosed(self.path.display().to_string()))
    }

    pub(crate) fn replace_sections(&mut self, sections: SectionMap) {
        self.sections = sections;
    }

    /// Opens the notebook if it has no identity yet
    ///
    /// Idempotent: once an identity is stored, the service is not called again.
    pub async fn establish_identity(&mut self) -> Result<NotebookId> {
        if let Some(id) = &self.id {
            return Ok(id.clone());
        }

        let id = self
            .automation()?
            .open_hierarchy(&self.path, CreateFileType::None)
            .await?;
        tracing::debug!(notebook = %self.name(), notebook_id = %id, "Notebook opened");
        self.id = Some(id.clone());
        Ok(id)
    }

    /// Reads one hierarchy snapshot and replaces the section map with it
    ///
    /// # Errors
    ///
    /// Returns [`ConverterError::HierarchyNotReady`] (after storing the
    /// sections) when a section still has pages loading, or when a section
    /// file in the notebook directory is missing from the snapshot.
    pub async fn load_hierarchy_snapshot(&mut self) -> Result<()> {
        let id = self.establish_identity().await?;

        let markup = self
            .automation()?
            .get_hierarchy(&id, HierarchyScope::Pages, SchemaVersion::V2013)
            .await?;
        let snapshot = parse_hierarchy(&markup)?;

        let pending: Vec<String> = snapshot
            .pending_sections()
            .into_iter()
            .map(str::to_string)
            .collect();
        self.sections = snapshot.into_section_map();
        tracing::debug!(
            notebook = %self.name(),
            sections = self.sections.len(),
            "Hierarchy snapshot loaded"
        );

        if !pending.is_empty() {
            return Err(ConverterError::HierarchyNotReady(format!(
                "pages still loading in {}",
                pending.join(", ")
            )));
        }

        self.check_sections_with_filesystem().await
    }

    /// Loads the hierarchy, retrying until the snapshot can be trusted
    pub async fn load_hierarchy(&mut self) -> Result<()> {
        let policy = self.retry_policy;
        Retrier::new(policy)
            .with_probe(SnapshotProbe { notebook: self })
            .execute()
            .await
    }

    /// Every section file in the notebook directory must be in the section map
    async fn check_sections_with_filesystem(&self) -> Result<()> {
        let extension = self.automation()?.section_extension().to_string();
        let mut entries = tokio::fs::read_dir(&self.path).await?;

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let Some(stem) = file_name.strip_suffix(extension.as_str()) else {
                continue;
            };
            if !self.sections.contains(stem) {
                return Err(ConverterError::HierarchyNotReady(format!(
                    "section file '{file_name}' is not in the hierarchy yet"
                )));
            }
        }
        Ok(())
    }

    /// Pushes the current section map back to the service as the full hierarchy
    ///
    /// # Errors
    ///
    /// Returns [`ConverterError::NotebookClosed`] after [`Notebook::close`] and
    /// [`ConverterError::NotebookNotOpen`] before the identity is established.
    pub async fn update_sections_hierarchy(&self) -> Result<()> {
        let automation = self.automation()?;
        let id = self
            .id
            .as_ref()
            .ok_or_else(|| ConverterError::NotebookNotOpen(self.path.display().to_string()))?;
        let markup = render_section_update(id, &self.sections);
        automation
            .update_hierarchy(&markup, SchemaVersion::V2013)
            .await?;
        tracing::debug!(notebook = %self.name(), sections = self.sections.len(), "Hierarchy updated");
        Ok(())
    }

    /// Opens the notebook in the application and navigates to it
    pub async fn show(&mut self) -> Result<()> {
        let id = self.establish_identity().await?;
        self.automation()?.navigate_to(&id).await
    }

    /// Closes the notebook and invalidates this handle
    ///
    /// `force` closes without syncing back. A notebook that was never opened is
    /// invalidated without calling the service.
    pub async fn close(&mut self, force: bool) -> Result<()> {
        let automation = self.automation()?.clone();
        self.automation = None;
        self.sections = SectionMap::new();

        if let Some(id) = self.id.take() {
            automation.close_notebook(&id, force).await?;
            tracing::debug!(notebook = %self.name(), notebook_id = %id, force, "Notebook closed");
        }
        Ok(())
    }
}

struct SnapshotProbe<'a> {
    notebook: &'a mut Notebook,
}

#[async_trait]
impl Probe for SnapshotProbe<'_> {
    type Output = ();

    async fn attempt(&mut self) -> Result<()> {
        self.notebook.load_hierarchy_snapshot().await
    }
}
