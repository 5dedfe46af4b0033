//! Show command implementation
//!
//! Opens a notebook in the application and navigates to it.

use super::exit_code_for;
use crate::adapters::automation::create_automation;
use crate::config::read_config;
use crate::core::notebook::Notebook;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Notebook directory; relative names are resolved against the source path
    pub notebook: String,
}

impl ShowArgs {
    /// Resolves the notebook path against the configured source directory
    fn resolve(&self, source_path: &str) -> PathBuf {
        let path = PathBuf::from(&self.notebook);
        if path.is_absolute() || source_path.is_empty() {
            path
        } else {
            PathBuf::from(source_path).join(path)
        }
    }

    /// Execute the show command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match read_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        let path = self.resolve(&config.conversion.source_path);
        if !path.is_dir() {
            eprintln!("❌ Notebook directory not found: {}", path.display());
            return Ok(2);
        }

        let automation = match create_automation(&config.automation) {
            Ok(a) => a,
            Err(e) => {
                eprintln!("Failed to initialize automation backend: {e}");
                return Ok(4);
            }
        };

        let mut notebook = Notebook::new(automation, path);
        match notebook.show().await {
            Ok(()) => {
                let id = notebook.id().map(|id| id.to_string()).unwrap_or_default();
                println!("📖 Showing notebook '{}' ({id})", notebook.name());
                Ok(0)
            }
            Err(e) => {
                tracing::error!(notebook = %notebook.name(), error = %e, "Failed to show notebook");
                eprintln!("❌ Failed to show notebook: {e}");
                Ok(exit_code_for(&e))
            }
        }
    }
}
