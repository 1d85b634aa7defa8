//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for CMS Bootstrap using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CMS Bootstrap - Startup configuration resolver
#[derive(Parser, Debug)]
#[command(name = "cms-bootstrap")]
#[command(version, about, long_about = None)]
#[command(author = "CMS Bootstrap Contributors")]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CMS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Env file to load instead of ./.env; it must exist
    #[arg(short, long)]
    pub env_file: Option<PathBuf>,

    /// Application root; relative SQLite paths resolve against it
    #[arg(long, default_value = ".", env = "CMS_APP_ROOT")]
    pub app_root: PathBuf,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a fresh set of production secrets
    GenerateSecrets(commands::generate::GenerateArgs),

    /// Assemble the configuration and run the startup checks
    Check(commands::check::CheckArgs),

    /// Print the assembled configuration with secrets masked
    Show(commands::show::ShowArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use commands::show::OutputFormat;

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::parse_from(["cms-bootstrap", "check"]);
        assert_eq!(cli.app_root, PathBuf::from("."));
        assert!(cli.env_file.is_none());
        assert!(matches!(cli.command, Commands::Check(_)));
    }

    #[test]
    fn test_cli_parse_with_env_file() {
        let cli = Cli::parse_from(["cms-bootstrap", "--env-file", "prod.env", "check"]);
        assert_eq!(cli.env_file, Some(PathBuf::from("prod.env")));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["cms-bootstrap", "--log-level", "debug", "check"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_with_app_root() {
        let cli = Cli::parse_from(["cms-bootstrap", "--app-root", "/srv/cms", "show"]);
        assert_eq!(cli.app_root, PathBuf::from("/srv/cms"));
    }

    #[test]
    fn test_cli_parse_generate_secrets() {
        let cli = Cli::parse_from(["cms-bootstrap", "generate-secrets", "--quiet"]);
        match cli.command {
            Commands::GenerateSecrets(args) => assert!(args.quiet),
            other => panic!("expected generate-secrets, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_show_format() {
        let cli = Cli::parse_from(["cms-bootstrap", "show", "--format", "json"]);
        match cli.command {
            Commands::Show(args) => assert_eq!(args.format, OutputFormat::Json),
            other => panic!("expected show, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["cms-bootstrap", "show", "--format", "yaml"]).is_err());
    }
}
