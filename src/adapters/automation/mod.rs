//! Document automation service integration
//!
//! - [`traits`] - the [`AutomationService`] capability trait and its enums
//! - [`markup`] - hierarchy snapshot parsing and update rendering
//! - [`local`] - directory-backed implementation
//! - [`factory`] - backend selection from configuration

pub mod factory;
pub mod local;
pub mod markup;
pub mod traits;

pub use factory::create_automation;
pub use local::LocalAutomation;
pub use markup::{
    parse_hierarchy, parse_section_update, render_section_update, HierarchySnapshot,
    SectionSnapshot, ONENOTE_NAMESPACE,
};
pub use traits::{
    AutomationService, CreateFileType, HierarchyScope, PublishFormat, SchemaVersion,
};
