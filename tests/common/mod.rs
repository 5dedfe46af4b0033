//! Shared helpers for integration tests
//!
//! [`FakeAutomation`] stands in for the automation service: hierarchy
//! snapshots are scripted per notebook path and every call is recorded.

#![allow(dead_code)]

use async_trait::async_trait;
use notebook_converter::adapters::automation::{
    AutomationService, CreateFileType, HierarchyScope, PublishFormat, SchemaVersion,
    ONENOTE_NAMESPACE,
};
use notebook_converter::core::retry::RetryPolicy;
use notebook_converter::domain::{AutomationError, NotebookId, Result, SectionId};
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

/// Retry policy short enough for tests that do not pause time
pub fn fast_retry(max_attempts: usize) -> RetryPolicy {
    RetryPolicy::new(Duration::from_millis(1), max_attempts).unwrap()
}

/// A section in a scripted snapshot
#[derive(Debug, Clone)]
pub struct SectionFixture {
    pub name: String,
    pub id: String,
    pub color: Option<String>,
    pub pages: usize,
    pub ready: bool,
}

/// Section with one page, ready, no colour
pub fn section(name: &str, id: &str) -> SectionFixture {
    SectionFixture {
        name: name.to_string(),
        id: id.to_string(),
        color: None,
        pages: 1,
        ready: true,
    }
}

impl SectionFixture {
    pub fn color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn empty(mut self) -> Self {
        self.pages = 0;
        self
    }

    pub fn loading(mut self) -> Self {
        self.ready = false;
        self
    }
}

/// Renders a hierarchy snapshot the way the service reports it
pub fn notebook_markup(notebook_id: &str, sections: &[SectionFixture]) -> String {
    let mut markup = format!(
        "<?xml version=\"1.0\"?><one:Notebook xmlns:one=\"{ONENOTE_NAMESPACE}\" ID=\"{notebook_id}\">"
    );
    for entry in sections {
        markup.push_str(&format!(
            "<one:Section name=\"{}\" ID=\"{}\" areAllPagesAvailable=\"{}\"",
            entry.name, entry.id, entry.ready
        ));
        if let Some(color) = &entry.color {
            markup.push_str(&format!(" color=\"{color}\""));
        }
        markup.push('>');
        for page in 0..entry.pages {
            markup.push_str(&format!("<one:Page ID=\"{}-p{page}\" />", entry.id));
        }
        markup.push_str("</one:Section>");
    }
    markup.push_str("</one:Notebook>");
    markup
}

/// A recorded service call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Open(PathBuf),
    GetHierarchy(String),
    Update(String),
    Publish {
        section: String,
        destination: PathBuf,
        format: PublishFormat,
    },
    Navigate(String),
    Close { notebook: String, force: bool },
}

#[derive(Default)]
struct Script {
    id: String,
    snapshots: VecDeque<String>,
}

#[derive(Default)]
struct FakeState {
    scripts: HashMap<PathBuf, Script>,
    open: HashMap<String, PathBuf>,
    calls: Vec<Call>,
}

/// Scripted automation service
///
/// Each notebook path is scripted with an ID and a queue of snapshots. Every
/// `get_hierarchy` pops the next snapshot; the last one repeats. `publish`
/// writes an empty file at the destination so that the destination directory
/// looks like a published notebook.
pub struct FakeAutomation {
    extension: String,
    state: Mutex<FakeState>,
}

impl FakeAutomation {
    pub fn new() -> Self {
        Self {
            extension: ".one".to_string(),
            state: Mutex::new(FakeState::default()),
        }
    }

    /// Scripts the snapshots returned for the notebook at `path`
    pub fn script(&self, path: &Path, notebook_id: &str, snapshots: Vec<String>) {
        self.state.lock().unwrap().scripts.insert(
            path.to_path_buf(),
            Script {
                id: notebook_id.to_string(),
                snapshots: snapshots.into(),
            },
        );
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|call| predicate(call)).count()
    }

    pub fn open_calls(&self) -> usize {
        self.count(|call| matches!(call, Call::Open(_)))
    }

    pub fn hierarchy_calls(&self) -> usize {
        self.count(|call| matches!(call, Call::GetHierarchy(_)))
    }

    pub fn published(&self) -> Vec<(String, PathBuf, PublishFormat)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Publish {
                    section,
                    destination,
                    format,
                } => Some((section, destination, format)),
                _ => None,
            })
            .collect()
    }

    pub fn updates(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Update(markup) => Some(markup),
                _ => None,
            })
            .collect()
    }

    pub fn closed(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Close { notebook, .. } => Some(notebook),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }
}

#[async_trait]
impl AutomationService for FakeAutomation {
    fn section_extension(&self) -> &str {
        &self.extension
    }

    async fn open_hierarchy(&self, path: &Path, _create: CreateFileType) -> Result<NotebookId> {
        self.record(Call::Open(path.to_path_buf()));
        let mut state = self.state.lock().unwrap();
        let id = state
            .scripts
            .get(path)
            .map(|script| script.id.clone())
            .ok_or_else(|| AutomationError::OpenFailed {
                path: path.display().to_string(),
                message: "not scripted".to_string(),
            })?;
        state.open.insert(id.clone(), path.to_path_buf());
        Ok(NotebookId::new(id).unwrap())
    }

    async fn get_hierarchy(
        &self,
        notebook: &NotebookId,
        _scope: HierarchyScope,
        _schema: SchemaVersion,
    ) -> Result<String> {
        self.record(Call::GetHierarchy(notebook.to_string()));
        let mut state = self.state.lock().unwrap();
        let path = state
            .open
            .get(notebook.as_str())
            .cloned()
            .ok_or_else(|| AutomationError::UnknownNotebook(notebook.to_string()))?;
        let script = state
            .scripts
            .get_mut(&path)
            .ok_or_else(|| AutomationError::UnknownNotebook(notebook.to_string()))?;
        let markup = if script.snapshots.len() > 1 {
            script.snapshots.pop_front()
        } else {
            script.snapshots.front().cloned()
        };
        markup.ok_or_else(|| {
            AutomationError::HierarchyQueryFailed(format!("no snapshot for {notebook}")).into()
        })
    }

    async fn update_hierarchy(&self, markup: &str, _schema: SchemaVersion) -> Result<()> {
        self.record(Call::Update(markup.to_string()));
        Ok(())
    }

    async fn publish(
        &self,
        section: &SectionId,
        destination: &Path,
        format: PublishFormat,
    ) -> Result<()> {
        self.record(Call::Publish {
            section: section.to_string(),
            destination: destination.to_path_buf(),
            format,
        });
        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(destination, b"")?;
        Ok(())
    }

    async fn navigate_to(&self, notebook: &NotebookId) -> Result<()> {
        self.record(Call::Navigate(notebook.to_string()));
        Ok(())
    }

    async fn close_notebook(&self, notebook: &NotebookId, force: bool) -> Result<()> {
        self.record(Call::Close {
            notebook: notebook.to_string(),
            force,
        });
        self.state.lock().unwrap().open.remove(notebook.as_str());
        Ok(())
    }
}
