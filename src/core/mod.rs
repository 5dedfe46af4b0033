//! Core conversion logic.
//!
//! # Modules
//!
//! - [`progress`] - step counting, indentation and progress subscribers
//! - [`retry`] - retry of probes that report a not-ready hierarchy
//! - [`notebook`] - notebook handle and hierarchy loading
//! - [`publish`] - section export and section order reconciliation
//! - [`convert`] - batch discovery, coordination and summary
//!
//! # Conversion Workflow
//!
//! For every notebook selected in the source directory:
//!
//! 1. **Open**: Obtain the notebook identifier from the automation service
//! 2. **Load**: Read the hierarchy until every section has settled
//! 3. **Export**: Publish each section that has pages
//! 4. **Reorder** (current format): Rewrite the destination hierarchy in source order
//! 5. **Close**: Release the source notebook
//!
//! # Example
//!
//! ```rust,no_run
//! use notebook_converter::adapters::automation::create_automation;
//! use notebook_converter::config::load_config;
//! use notebook_converter::core::convert::ConversionCoordinator;
//! use notebook_converter::core::progress::ProgressReporter;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("notebook-converter.toml")?;
//! let automation = create_automation(&config.automation)?;
//!
//! let coordinator = ConversionCoordinator::new(&config, automation)?;
//! let mut progress = ProgressReporter::new();
//! let summary = coordinator.execute(&mut progress).await?;
//!
//! println!("Converted: {}", summary.converted_notebooks);
//! println!("Failed: {}", summary.failed_notebooks);
//! # Ok(())
//! # }
//! ```

pub mod convert;
pub mod notebook;
pub mod progress;
pub mod publish;
pub mod retry;
