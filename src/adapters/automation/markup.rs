//! Hierarchy markup codec
//!
//! The automation service describes a notebook as namespaced XML:
//!
//! ```xml
//! <one:Notebook xmlns:one="http://schemas.microsoft.com/office/onenote/2013/onenote" ID="nb">
//!   <one:Section name="Inbox" ID="s1" color="#8AA8E4" areAllPagesAvailable="true">
//!     <one:Page ID="p1" name="Monday" />
//!   </one:Section>
//! </one:Notebook>
//! ```
//!
//! Only sections that are direct children of the notebook element are read;
//! sections nested in section groups are ignored. Elements are matched by local
//! name, so the namespace prefix the service picks does not matter.

use crate::domain::ids::{NotebookId, SectionId};
use crate::domain::{ConverterError, Result, Section, SectionMap};
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;

/// XML namespace of the 2013 hierarchy schema
pub const ONENOTE_NAMESPACE: &str = "http://schemas.microsoft.com/office/onenote/2013/onenote";

const NOTEBOOK: &[u8] = b"Notebook";
const SECTION: &[u8] = b"Section";
const PAGE: &[u8] = b"Page";

/// One section as reported in a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSnapshot {
    pub section: Section,

    /// `false` while the service is still loading this section's pages
    pub all_pages_available: bool,
}

/// Parsed hierarchy snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchySnapshot {
    /// ID attribute of the notebook element
    pub notebook_id: Option<String>,

    /// Sections in document order
    pub sections: Vec<SectionSnapshot>,
}

impl HierarchySnapshot {
    /// Names of sections whose pages are not all available yet
    pub fn pending_sections(&self) -> Vec<&str> {
        self.sections
            .iter()
            .filter(|s| !s.all_pages_available)
            .map(|s| s.section.name.as_str())
            .collect()
    }

    /// Converts the snapshot into an ordered section map
    pub fn into_section_map(self) -> SectionMap {
        self.sections.into_iter().map(|s| s.section).collect()
    }
}

struct PendingSection {
    section: Section,
    all_pages_available: bool,
    pages: usize,
}

/// Parses a hierarchy snapshot
///
/// # Errors
///
/// Returns [`ConverterError::Markup`] if the markup is malformed, has no
/// notebook element, or contains a section without an `ID` attribute.
pub fn parse_hierarchy(markup: &str) -> Result<HierarchySnapshot> {
    parse_markup(markup, true)
}

/// Parses a hierarchy update as rendered by [`render_section_update`]
///
/// Unlike a snapshot, an update may carry sections without an `ID`; they are
/// returned unbound and left for the service to create.
pub fn parse_section_update(markup: &str) -> Result<HierarchySnapshot> {
    parse_markup(markup, false)
}

fn parse_markup(markup: &str, require_ids: bool) -> Result<HierarchySnapshot> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(true);

    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut snapshot = HierarchySnapshot::default();
    let mut saw_notebook = false;
    let mut current: Option<PendingSection> = None;

    loop {
        match reader.read_event()? {
            Event::Start(element) => {
                let name = element.local_name().as_ref().to_vec();
                open_element(&element, &name, &path, require_ids, &mut snapshot, &mut current)?;
                saw_notebook |= path.is_empty() && name == NOTEBOOK;
                path.push(name);
            }
            Event::Empty(element) => {
                let name = element.local_name().as_ref().to_vec();
                open_element(&element, &name, &path, require_ids, &mut snapshot, &mut current)?;
                saw_notebook |= path.is_empty() && name == NOTEBOOK;
                close_element(&name, &path, &mut snapshot, &mut current);
            }
            Event::End(element) => {
                path.pop();
                let name = element.local_name().as_ref().to_vec();
                close_element(&name, &path, &mut snapshot, &mut current);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_notebook {
        return Err(ConverterError::Markup(
            "hierarchy markup has no Notebook element".to_string(),
        ));
    }

    Ok(snapshot)
}

fn open_element(
    element: &BytesStart<'_>,
    name: &[u8],
    path: &[Vec<u8>],
    require_ids: bool,
    snapshot: &mut HierarchySnapshot,
    current: &mut Option<PendingSection>,
) -> Result<()> {
    if path.is_empty() && name == NOTEBOOK {
        snapshot.notebook_id = read_attributes(element)?.remove("ID");
    } else if is_notebook_child(path) && name == SECTION {
        *current = Some(section_from_attributes(read_attributes(element)?, require_ids)?);
    } else if is_section_child(path) && name == PAGE {
        if let Some(pending) = current.as_mut() {
            pending.pages += 1;
        }
    }
    Ok(())
}

fn close_element(
    name: &[u8],
    path: &[Vec<u8>],
    snapshot: &mut HierarchySnapshot,
    current: &mut Option<PendingSection>,
) {
    if is_notebook_child(path) && name == SECTION {
        if let Some(pending) = current.take() {
            snapshot.sections.push(SectionSnapshot {
                section: pending.section.with_pages(pending.pages > 0),
                all_pages_available: pending.all_pages_available,
            });
        }
    }
}

fn is_notebook_child(path: &[Vec<u8>]) -> bool {
    path.len() == 1 && path[0] == NOTEBOOK
}

fn is_section_child(path: &[Vec<u8>]) -> bool {
    path.len() == 2 && path[0] == NOTEBOOK && path[1] == SECTION
}

fn read_attributes(element: &BytesStart<'_>) -> Result<HashMap<String, String>> {
    let mut attributes = HashMap::new();
    for attribute in element.attributes() {
        let attribute = attribute?;
        let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
        let value = attribute.unescape_value()?.into_owned();
        attributes.insert(key, value);
    }
    Ok(attributes)
}

fn section_from_attributes(
    mut attributes: HashMap<String, String>,
    require_id: bool,
) -> Result<PendingSection> {
    let name = attributes.remove("name").unwrap_or_default();
    let id = match attributes.remove("ID") {
        Some(id) => Some(SectionId::new(id).map_err(ConverterError::Markup)?),
        None if require_id => {
            return Err(ConverterError::Markup(format!(
                "section '{name}' has no ID attribute"
            )))
        }
        None => None,
    };
    let color = attributes.remove("color").unwrap_or_default();
    let all_pages_available = attributes
        .get("areAllPagesAvailable")
        .map(|value| value != "false")
        .unwrap_or(true);

    let section = Section {
        id,
        name,
        color: None,
        has_pages: false,
    };

    Ok(PendingSection {
        section: section.with_color(color),
        all_pages_available,
        pages: 0,
    })
}

/// Renders a full hierarchy update for a notebook
///
/// The first section becomes the notebook's first child and every later
/// section follows its predecessor, so document order equals map order.
/// Sections without an identifier are emitted without `ID` and are created
/// by the service.
pub fn render_section_update(notebook: &NotebookId, sections: &SectionMap) -> String {
    let mut markup = format!(
        "<one:Notebook xmlns:one=\"{}\" ID=\"{}\">",
        ONENOTE_NAMESPACE,
        escape(notebook.as_str())
    );

    for section in sections {
        markup.push_str(&format!("<one:Section name=\"{}\"", escape(section.name.as_str())));
        if let Some(id) = &section.id {
            markup.push_str(&format!(" ID=\"{}\"", escape(id.as_str())));
        }
        if let Some(color) = &section.color {
            markup.push_str(&format!(" color=\"{}\"", escape(color.as_str())));
        }
        markup.push_str(" />");
    }

    markup.push_str("</one:Notebook>");
    markup
}
