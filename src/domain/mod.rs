//! Domain models and types for the converter.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`NotebookId`], [`SectionId`])
//! - **Hierarchy models** ([`Section`], [`SectionMap`])
//! - **Error types** ([`ConverterError`], [`AutomationError`])
//! - **Result type alias** ([`Result`])
//!
//! # Building a section map
//!
//! ```rust
//! use notebook_converter::domain::{Section, SectionId, SectionMap};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut sections = SectionMap::new();
//! sections.insert(Section::new("Inbox", SectionId::new("s-1")?).with_pages(true));
//! sections.insert(Section::new("Archive", SectionId::new("s-2")?));
//!
//! assert_eq!(sections.names(), vec!["Inbox", "Archive"]);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod hierarchy;
pub mod ids;
pub mod result;
pub mod section;

// Re-export commonly used types for convenience
pub use errors::{AutomationError, ConverterError};
pub use hierarchy::SectionMap;
pub use ids::{NotebookId, SectionId};
pub use result::Result;
pub use section::Section;
