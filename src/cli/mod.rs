//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the converter using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Notebook Converter - batch conversion of notebooks between section formats
#[derive(Parser, Debug)]
#[command(name = "notebook-converter")]
#[command(version, about, long_about = None)]
#[command(author = "Notebook Converter Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "notebook-converter.toml", env = "NBCONV_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "NBCONV_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert every selected notebook into the destination directory
    Convert(commands::convert::ConvertArgs),

    /// List the notebooks a conversion would process
    List(commands::list::ListArgs),

    /// Open a notebook in the application
    Show(commands::show::ShowArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_convert() {
        let cli = Cli::parse_from(["notebook-converter", "convert"]);
        assert_eq!(cli.config, "notebook-converter.toml");
        assert!(matches!(cli.command, Commands::Convert(_)));
    }

    #[test]
    fn test_cli_parse_convert_overrides() {
        let cli = Cli::parse_from([
            "notebook-converter",
            "convert",
            "--source",
            "/in",
            "--destination",
            "/out",
            "--filter",
            "^BRA",
            "--format",
            "legacy",
            "--dry-run",
        ]);
        let Commands::Convert(args) = cli.command else {
            panic!("expected convert command");
        };
        assert_eq!(args.overrides.source.as_deref(), Some("/in"));
        assert_eq!(args.overrides.destination.as_deref(), Some("/out"));
        assert_eq!(args.overrides.filter.as_deref(), Some("^BRA"));
        assert_eq!(args.overrides.format.as_deref(), Some("legacy"));
        assert!(args.dry_run);
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["notebook-converter", "--config", "custom.toml", "convert"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["notebook-converter", "--log-level", "debug", "list"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn test_cli_parse_show() {
        let cli = Cli::parse_from(["notebook-converter", "show", "Work"]);
        let Commands::Show(args) = cli.command else {
            panic!("expected show command");
        };
        assert_eq!(args.notebook, "Work");
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["notebook-converter", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["notebook-converter", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
