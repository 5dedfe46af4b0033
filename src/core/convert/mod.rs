//! Batch conversion of notebooks
//!
//! - Notebook discovery in the source directory
//! - Conversion coordination
//! - Summary and reporting

pub mod coordinator;
pub mod discovery;
pub mod summary;

pub use coordinator::ConversionCoordinator;
pub use discovery::{compile_filter, find_notebooks, list_notebooks};
pub use summary::{ConversionError, ConversionErrorType, ConversionSummary};
