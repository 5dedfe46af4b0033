//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers handed out by the automation service.
//! Both are opaque strings; the only rule enforced here is that they are not
//! blank.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Notebook identifier newtype wrapper
///
/// Returned by the automation service when a notebook is opened. Stable for as
/// long as the notebook stays open.
///
/// # Examples
///
/// ```
/// use notebook_converter::domain::ids::NotebookId;
/// use std::str::FromStr;
///
/// let id = NotebookId::from_str("{5A3C8E21-0D4B-4F19-9A77-61D0C2B3E4F5}{1}{B0}").unwrap();
/// assert_eq!(id.as_str(), "{5A3C8E21-0D4B-4F19-9A77-61D0C2B3E4F5}{1}{B0}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotebookId(String);

impl NotebookId {
    /// Creates a new NotebookId from a string
    ///
    /// Returns `Err` if the ID is blank.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Notebook ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the notebook ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NotebookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NotebookId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for NotebookId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Section identifier newtype wrapper
///
/// A section that has not been created in a destination notebook yet has no
/// identifier at all, so callers hold `Option<SectionId>` rather than an
/// empty string.
///
/// # Examples
///
/// ```
/// use notebook_converter::domain::ids::SectionId;
/// use std::str::FromStr;
///
/// let id = SectionId::from_str("{9F1E...}{1}{B0}").unwrap();
/// assert!(SectionId::from_str("  ").is_err());
/// # let _ = id;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectionId(String);

impl SectionId {
    /// Creates a new SectionId from a string
    ///
    /// Returns `Err` if the ID is blank.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Section ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the section ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SectionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for SectionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
