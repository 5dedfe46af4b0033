//! Directory-backed automation service
//!
//! A stand-in for the desktop application that works on plain directories, so
//! the converter can run (and be exercised end to end) on machines without
//! it. A notebook is a directory, each `<name><extension>` file inside it is a
//! section, and a non-empty file counts as a section with pages. Section order
//! and colours are kept in a `.hierarchy.json` sidecar that
//! [`AutomationService::update_hierarchy`] rewrites. Export copies the section
//! file verbatim regardless of the requested format.

use super::markup::{parse_section_update, ONENOTE_NAMESPACE};
use super::traits::{AutomationService, CreateFileType, HierarchyScope, PublishFormat, SchemaVersion};
use crate::domain::ids::{NotebookId, SectionId};
use crate::domain::{AutomationError, Result};
use async_trait::async_trait;
use quick_xml::escape::escape;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use uuid::Uuid;

/// Name of the sidecar file holding section order and colours
pub const SIDECAR_FILE: &str = ".hierarchy.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct Sidecar {
    sections: Vec<SidecarEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SidecarEntry {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
}

struct LocalSection {
    name: String,
    path: PathBuf,
    color: Option<String>,
    has_pages: bool,
}

/// Automation service over plain directories
pub struct LocalAutomation {
    extension: String,
    notebooks: Mutex<HashMap<NotebookId, PathBuf>>,
}

impl LocalAutomation {
    /// Creates a backend treating `<name><extension>` files as sections
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            notebooks: Mutex::new(HashMap::new()),
        }
    }

    fn notebook_path(&self, notebook: &NotebookId) -> Result<PathBuf> {
        let notebooks = self
            .notebooks
            .lock()
            .map_err(|_| AutomationError::Unavailable("notebook registry poisoned".to_string()))?;
        notebooks
            .get(notebook)
            .cloned()
            .ok_or_else(|| AutomationError::UnknownNotebook(notebook.to_string()).into())
    }

    async fn read_sidecar(dir: &Path) -> Result<Sidecar> {
        let path = dir.join(SIDECAR_FILE);
        if !tokio::fs::try_exists(&path).await? {
            return Ok(Sidecar::default());
        }
        let contents = tokio::fs::read_to_string(&path).await?;
        Ok(serde_json::from_str(&contents)?)
    }

    async fn list_sections(&self, dir: &Path) -> Result<Vec<LocalSection>> {
        let mut found = Vec::new();
        let mut entries = tokio::fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let Some(name) = file_name.strip_suffix(self.extension.as_str()) else {
                continue;
            };
            if name.is_empty() || !entry.file_type().await?.is_file() {
                continue;
            }
            let has_pages = entry.metadata().await?.len() > 0;
            found.push(LocalSection {
                name: name.to_string(),
                path: entry.path(),
                color: None,
                has_pages,
            });
        }
        found.sort_by(|a, b| a.name.cmp(&b.name));

        // sidecar order first, then anything it does not mention by name
        let sidecar = Self::read_sidecar(dir).await?;
        let mut ordered = Vec::with_capacity(found.len());
        for entry in sidecar.sections {
            if let Some(position) = found.iter().position(|s| s.name == entry.name) {
                let mut section = found.remove(position);
                section.color = entry.color;
                ordered.push(section);
            }
        }
        ordered.extend(found);
        Ok(ordered)
    }
}

#[async_trait]
impl AutomationService for LocalAutomation {
    fn section_extension(&self) -> &str {
        &self.extension
    }

    async fn open_hierarchy(&self, path: &Path, create: CreateFileType) -> Result<NotebookId> {
        if !tokio::fs::try_exists(path).await? {
            if create != CreateFileType::Notebook {
                return Err(AutomationError::OpenFailed {
                    path: path.display().to_string(),
                    message: "no notebook at this path".to_string(),
                }
                .into());
            }
            tokio::fs::create_dir_all(path).await?;
        }
        let path = tokio::fs::canonicalize(path).await?;

        let mut notebooks = self
            .notebooks
            .lock()
            .map_err(|_| AutomationError::Unavailable("notebook registry poisoned".to_string()))?;
        if let Some((id, _)) = notebooks.iter().find(|(_, open)| **open == path) {
            return Ok(id.clone());
        }

        let id = NotebookId::new(format!("{{{}}}", Uuid::new_v4()))
            .map_err(|e| AutomationError::OpenFailed {
                path: path.display().to_string(),
                message: e,
            })?;
        tracing::debug!(notebook_id = %id, path = %path.display(), "Opened local notebook");
        notebooks.insert(id.clone(), path);
        Ok(id)
    }

    async fn get_hierarchy(
        &self,
        notebook: &NotebookId,
        scope: HierarchyScope,
        _schema: SchemaVersion,
    ) -> Result<String> {
        let dir = self.notebook_path(notebook)?;
        let mut markup = format!(
            "<one:Notebook xmlns:one=\"{}\" ID=\"{}\" path=\"{}\">",
            ONENOTE_NAMESPACE,
            escape(notebook.as_str()),
            escape(dir.display().to_string().as_str())
        );

        if scope != HierarchyScope::Notebooks {
            for section in self.list_sections(&dir).await? {
                let path = section.path.display().to_string();
                markup.push_str(&format!(
                    "<one:Section name=\"{}\" ID=\"{}\" path=\"{}\" areAllPagesAvailable=\"true\"",
                    escape(section.name.as_str()),
                    escape(path.as_str()),
                    escape(path.as_str())
                ));
                if let Some(color) = &section.color {
                    markup.push_str(&format!(" color=\"{}\"", escape(color.as_str())));
                }
                if scope == HierarchyScope::Pages && section.has_pages {
                    markup.push_str("><one:Page name=\"Page 1\" /></one:Section>");
                } else {
                    markup.push_str(" />");
                }
            }
        }

        markup.push_str("</one:Notebook>");
        Ok(markup)
    }

    async fn update_hierarchy(&self, markup: &str, _schema: SchemaVersion) -> Result<()> {
        let snapshot = parse_section_update(markup)?;
        let notebook = snapshot
            .notebook_id
            .as_deref()
            .and_then(|id| NotebookId::new(id).ok())
            .ok_or_else(|| AutomationError::UpdateFailed("update has no notebook ID".to_string()))?;
        let dir = self.notebook_path(&notebook)?;

        let mut sidecar = Sidecar::default();
        for entry in snapshot.sections {
            let section = entry.section;
            let expected = dir.join(format!("{}{}", section.name, self.extension));
            match &section.id {
                Some(id) if Path::new(id.as_str()) != expected => {
                    return Err(AutomationError::UpdateFailed(format!(
                        "section '{}' does not belong to {}",
                        section.name, notebook
                    ))
                    .into());
                }
                Some(_) => {}
                None => {
                    if !tokio::fs::try_exists(&expected).await? {
                        tokio::fs::write(&expected, b"").await?;
                    }
                }
            }
            sidecar.sections.push(SidecarEntry {
                name: section.name,
                color: section.color,
            });
        }

        let contents = serde_json::to_string_pretty(&sidecar)?;
        tokio::fs::write(dir.join(SIDECAR_FILE), contents).await?;
        tracing::debug!(notebook_id = %notebook, sections = sidecar.sections.len(), "Hierarchy updated");
        Ok(())
    }

    async fn publish(
        &self,
        section: &SectionId,
        destination: &Path,
        format: PublishFormat,
    ) -> Result<()> {
        let source = Path::new(section.as_str());
        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::copy(source, destination)
            .await
            .map_err(|e| AutomationError::ExportFailed {
                section: section.to_string(),
                message: e.to_string(),
            })?;
        tracing::debug!(
            section = %section,
            destination = %destination.display(),
            format = %format,
            "Section exported"
        );
        Ok(())
    }

    async fn navigate_to(&self, notebook: &NotebookId) -> Result<()> {
        let dir = self.notebook_path(notebook)?;
        tracing::info!(notebook_id = %notebook, path = %dir.display(), "Navigated to notebook");
        Ok(())
    }

    async fn close_notebook(&self, notebook: &NotebookId, force: bool) -> Result<()> {
        let mut notebooks = self
            .notebooks
            .lock()
            .map_err(|_| AutomationError::Unavailable("notebook registry poisoned".to_string()))?;
        if notebooks.remove(notebook).is_none() {
            return Err(AutomationError::CloseFailed(notebook.to_string()).into());
        }
        tracing::debug!(notebook_id = %notebook, force, "Closed local notebook");
        Ok(())
    }
}
