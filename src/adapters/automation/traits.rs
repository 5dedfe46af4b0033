//! Document automation service trait
//!
//! This module defines the capability interface the converter needs from the
//! desktop application that actually owns notebook content: open a notebook,
//! read and replace its hierarchy, export a section, navigate, close. Native
//! interop or RPC bindings live behind this trait.

use crate::domain::ids::{NotebookId, SectionId};
use crate::domain::{ConverterError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Target container format for exported sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PublishFormat {
    /// Current section format; section order has to be restored afterwards
    #[default]
    Current,
    /// Legacy section format; no cross-file ordering is kept
    Legacy,
}

impl PublishFormat {
    /// Whether section order in the destination must be fixed up after export
    pub fn requires_reordering(self) -> bool {
        matches!(self, PublishFormat::Current)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PublishFormat::Current => "current",
            PublishFormat::Legacy => "legacy",
        }
    }
}

impl fmt::Display for PublishFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublishFormat {
    type Err = ConverterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "current" | "2013" => Ok(PublishFormat::Current),
            "legacy" | "2007" => Ok(PublishFormat::Legacy),
            other => Err(ConverterError::Validation(format!(
                "Invalid format '{other}'. Must be one of: current, legacy"
            ))),
        }
    }
}

/// How much of the hierarchy a snapshot should contain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HierarchyScope {
    /// Notebook element only
    Notebooks,
    /// Notebook and its sections
    Sections,
    /// Notebook, sections and their pages
    Pages,
}

/// Schema revision of the hierarchy markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaVersion {
    #[default]
    V2013,
}

/// What the service should create when the opened path does not exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreateFileType {
    /// Only open existing notebooks
    #[default]
    None,
    /// Create a notebook at the path
    Notebook,
}

/// Capability interface of the document automation service
///
/// Every method may block on the external application; implementations must
/// keep that work off the async executor threads (for example with
/// `tokio::task::spawn_blocking`).
#[async_trait]
pub trait AutomationService: Send + Sync {
    /// File extension (including the dot) the service uses for one section file
    fn section_extension(&self) -> &str;

    /// Opens the notebook stored at `path` and returns its identifier
    ///
    /// # Errors
    ///
    /// Fails if `path` is not a notebook the service can open.
    async fn open_hierarchy(&self, path: &Path, create: CreateFileType) -> Result<NotebookId>;

    /// Returns the hierarchy markup of an opened notebook
    async fn get_hierarchy(
        &self,
        notebook: &NotebookId,
        scope: HierarchyScope,
        schema: SchemaVersion,
    ) -> Result<String>;

    /// Replaces the hierarchy of a previously opened notebook
    ///
    /// Section order in `markup` becomes the order stored on disk.
    async fn update_hierarchy(&self, markup: &str, schema: SchemaVersion) -> Result<()>;

    /// Exports one section to `destination` in the given format
    async fn publish(
        &self,
        section: &SectionId,
        destination: &Path,
        format: PublishFormat,
    ) -> Result<()>;

    /// Brings the notebook to the front in the application
    async fn navigate_to(&self, notebook: &NotebookId) -> Result<()>;

    /// Closes an opened notebook; `force` skips syncing it back
    async fn close_notebook(&self, notebook: &NotebookId, force: bool) -> Result<()>;
}
