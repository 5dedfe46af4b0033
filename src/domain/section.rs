//! Notebook section model

use super::ids::SectionId;

/// A named, colourable group of pages inside a notebook
///
/// Sections are plain values: `clone()` yields an independent copy, so the
/// identifier of a duplicate can be rewritten during reconciliation without
/// touching the section it was copied from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Identifier assigned by the automation service; `None` while the section
    /// does not exist in the notebook yet
    pub id: Option<SectionId>,

    /// Section name, unique within its notebook
    pub name: String,

    /// Display colour (for example `#8AA8E4`), if the service reported one
    pub color: Option<String>,

    /// Whether the section holds at least one page
    pub has_pages: bool,
}

impl Section {
    /// Creates a section with an identifier and no colour or pages
    pub fn new(name: impl Into<String>, id: SectionId) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            color: None,
            has_pages: false,
        }
    }

    /// Sets the display colour
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        let color = color.into();
        self.color = if color.is_empty() { None } else { Some(color) };
        self
    }

    /// Sets whether the section holds pages
    pub fn with_pages(mut self, has_pages: bool) -> Self {
        self.has_pages = has_pages;
        self
    }

    /// Returns a copy with the identifier cleared
    ///
    /// Used to stage a section for a notebook where it has not been bound to a
    /// service-side identifier yet.
    pub fn duplicate_unbound(&self) -> Self {
        Self {
            id: None,
            ..self.clone()
        }
    }
}
