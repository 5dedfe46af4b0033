// Notebook Converter - batch conversion of notebooks between section formats
// Copyright (c) 2025 Notebook Converter Contributors
// Licensed under the MIT License

//! # Notebook Converter
//!
//! Batch conversion of notebooks held by a document automation service from
//! one section format to another, one notebook directory at a time.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Discovering** notebooks in a source directory by name filter
//! - **Loading** notebook hierarchies, retrying while the service is still populating them
//! - **Publishing** every non-empty section in the target format
//! - **Reordering** the destination sections to match the source order and colours
//! - **Reporting** nested, step-based progress to any number of observers
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Conversion logic (progress, retry, notebook, publish, batch)
//! - [`adapters`] - Automation service trait, hierarchy markup, local backend
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use notebook_converter::adapters::automation::create_automation;
//! use notebook_converter::config::load_config;
//! use notebook_converter::core::convert::ConversionCoordinator;
//! use notebook_converter::core::progress::ProgressReporter;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("notebook-converter.toml")?;
//!     let automation = create_automation(&config.automation)?;
//!
//!     let coordinator = ConversionCoordinator::new(&config, automation)?;
//!     let mut progress = ProgressReporter::new();
//!     let mut events = progress.subscribe();
//!
//!     let summary = coordinator.execute(&mut progress).await?;
//!     while let Ok(event) = events.try_recv() {
//!         println!("{event:?}");
//!     }
//!
//!     println!("Converted {} notebooks", summary.converted_notebooks);
//!     Ok(())
//! }
//! ```
//!
//! ## Publishing a single notebook
//!
//! ```rust,no_run
//! use notebook_converter::adapters::automation::LocalAutomation;
//! use notebook_converter::core::notebook::Notebook;
//! use notebook_converter::core::progress::ProgressReporter;
//! use notebook_converter::core::publish::Publisher;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let automation = Arc::new(LocalAutomation::new(".one"));
//! let mut notebook = Notebook::new(automation.clone(), "D:/Notebooks/Work");
//! let mut progress = ProgressReporter::new();
//!
//! let report = Publisher::new(automation)
//!     .publish_current(&mut notebook, Path::new("D:/Converted/Work"), &mut progress)
//!     .await?;
//! notebook.close(false).await?;
//!
//! println!("Exported {} sections", report.exported);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`]. Only
//! [`domain::ConverterError::HierarchyNotReady`] is recoverable: the batch
//! reports it and moves on to the next notebook.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
