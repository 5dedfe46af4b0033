//! List command implementation
//!
//! Prints the notebooks a `convert` run would process, optionally with the
//! sections of each one.

use super::{exit_code_for, ConversionOverrides};
use crate::adapters::automation::create_automation;
use crate::config::read_config;
use crate::core::convert::find_notebooks;
use crate::core::notebook::Notebook;
use crate::core::retry::RetryPolicy;
use clap::Args;

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub overrides: ConversionOverrides,

    /// Load each notebook and print its sections
    #[arg(long)]
    pub sections: bool,
}

impl ListArgs {
    /// Execute the list command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mut config = match read_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };
        if let Err(e) = self.overrides.apply(&mut config) {
            eprintln!("Invalid command line option: {e}");
            return Ok(2);
        }

        let source = std::path::PathBuf::from(&config.conversion.source_path);
        let notebooks = match find_notebooks(&source, &config.conversion.filter).await {
            Ok(n) => n,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(exit_code_for(&e));
            }
        };

        println!("📚 {} notebook(s) in {}", notebooks.len(), source.display());
        if !self.sections {
            for path in &notebooks {
                println!("  - {}", path.file_name().unwrap_or_default().to_string_lossy());
            }
            return Ok(0);
        }

        let automation = match create_automation(&config.automation) {
            Ok(a) => a,
            Err(e) => {
                eprintln!("Failed to initialize automation backend: {e}");
                return Ok(4);
            }
        };
        let retry_policy = match RetryPolicy::from_config(&config.retry) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Invalid configuration: {e}");
                return Ok(2);
            }
        };

        let mut exit_code = 0;
        for path in &notebooks {
            let mut notebook = Notebook::new(automation.clone(), path).with_retry_policy(retry_policy);
            println!("  - {}", notebook.name());

            match notebook.load_hierarchy().await {
                Ok(()) => {
                    for section in notebook.sections() {
                        let marker = if section.has_pages { "" } else { " (empty)" };
                        println!("      {}{}", section.name, marker);
                    }
                }
                Err(e) => {
                    tracing::warn!(notebook = %notebook.name(), error = %e, "Failed to load notebook");
                    println!("      ⚠️  {e}");
                    exit_code = 1;
                }
            }

            if let Err(e) = notebook.close(config.conversion.close_force).await {
                tracing::warn!(notebook = %notebook.name(), error = %e, "Failed to close notebook");
            }
        }

        Ok(exit_code)
    }
}
