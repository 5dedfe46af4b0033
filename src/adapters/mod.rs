//! External system integrations.
//!
//! - [`automation`] - the document automation service that opens notebooks,
//!   reports and updates their hierarchy, and exports sections
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate the external application
//! behind a trait. The core only ever sees `Arc<dyn AutomationService>`, which
//! lets tests substitute a scripted fake.
//!
//! ```rust,no_run
//! use notebook_converter::adapters::automation::{create_automation, HierarchyScope, SchemaVersion, CreateFileType};
//! use notebook_converter::config::AutomationConfig;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let automation = create_automation(&AutomationConfig::default())?;
//! let id = automation
//!     .open_hierarchy(Path::new("/notebooks/Work"), CreateFileType::None)
//!     .await?;
//! let markup = automation
//!     .get_hierarchy(&id, HierarchyScope::Pages, SchemaVersion::V2013)
//!     .await?;
//! println!("{markup}");
//! # Ok(())
//! # }
//! ```

pub mod automation;
