//! Convert command implementation
//!
//! This module implements the `convert` command, which publishes every
//! selected notebook into the destination directory. The batch runs in a
//! spawned task while this task renders its progress.

use super::{exit_code_for, load_with_overrides, ConversionOverrides};
use crate::adapters::automation::create_automation;
use crate::core::convert::{ConversionCoordinator, ConversionSummary};
use crate::core::progress::{ProgressEvent, ProgressReporter};
use clap::Args;
use tokio::sync::{mpsc, watch};

/// Arguments for the convert command
#[derive(Args, Debug)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub overrides: ConversionOverrides,

    /// Dry run mode - load hierarchies without exporting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Close notebooks without syncing them
    #[arg(long)]
    pub force_close: bool,
}

impl ConvertArgs {
    /// Execute the convert command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting convert command");

        let mut config = match load_with_overrides(config_path, &self.overrides) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }
        if self.force_close {
            config.conversion.close_force = true;
        }

        let automation = match create_automation(&config.automation) {
            Ok(a) => a,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create automation backend");
                eprintln!("Failed to initialize automation backend: {e}");
                return Ok(4); // Backend unavailable exit code
            }
        };

        let coordinator = match ConversionCoordinator::new(&config, automation) {
            Ok(c) => c.with_shutdown_signal(shutdown_signal),
            Err(e) => {
                eprintln!("Invalid configuration: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        if config.application.dry_run {
            tracing::info!("Dry run mode enabled - nothing will be exported");
            println!("🔍 DRY RUN MODE - No sections will be exported");
            println!();
        }

        println!(
            "🚀 Converting notebooks from {} to {} ({})",
            config.conversion.source_path, config.conversion.destination_path, config.conversion.format
        );
        println!();

        let mut progress = ProgressReporter::new();
        let events = progress.subscribe();
        let batch = tokio::spawn(async move {
            let result = coordinator.execute(&mut progress).await;
            drop(progress);
            result
        });

        render_progress(events).await;

        let summary = match batch.await? {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Conversion failed");
                eprintln!("Conversion failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        print_summary(&summary);

        let exit_code = if summary.interrupted {
            println!("⚠️  Conversion interrupted before all notebooks were processed.");
            println!("   Run the same command again to convert the remaining notebooks.");
            println!();
            tracing::info!("Conversion interrupted by user signal");
            130 // SIGINT exit code (standard Unix convention)
        } else if summary.is_successful() {
            println!("✅ Conversion completed successfully!");
            0
        } else {
            println!("⚠️  Conversion completed with failures");
            1 // Partial success
        };

        Ok(exit_code)
    }
}

/// Prints progress events until the batch drops its reporter
async fn render_progress(mut events: mpsc::UnboundedReceiver<ProgressEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            ProgressEvent::Step {
                current,
                total,
                message,
            } => println!("[{current:>4}/{total:<4}] {message}"),
            ProgressEvent::Finished { message } => println!("{message}"),
        }
    }
}

fn print_summary(summary: &ConversionSummary) {
    println!();
    println!("📊 Conversion Summary:");
    println!("  Started: {}", summary.started_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("  Notebooks: {}", summary.total_notebooks);
    println!("  Converted: {}", summary.converted_notebooks);
    println!("  Failed: {}", summary.failed_notebooks);
    println!("  Not started: {}", summary.skipped_notebooks);
    println!("  Sections Exported: {}", summary.sections_exported);
    println!("  Empty Sections Skipped: {}", summary.sections_skipped);
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!("  Success Rate: {:.2}%", summary.success_rate());
    println!();

    if !summary.errors.is_empty() {
        println!("⚠️  Errors encountered:");
        for error in &summary.errors {
            println!("  - {:?}: {}", error.error_type, error.message);
            if let Some(context) = &error.context {
                println!("    Context: {context}");
            }
        }
        println!();
    }
}
