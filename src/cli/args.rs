//! CLI argument parsing using clap

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for listing commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON Lines format (one JSON object per line)
    Jsonl,
}

/// Output format for sanitized records
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordFormat {
    /// A single JSON document, shaped like the input
    Json,
    /// One JSON object per line
    Jsonl,
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Automatically detect if terminal supports color
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

/// Sanitize CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "sanitize")]
#[command(about = "Normalize JSON records with declarative field rules")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file
    #[arg(short, long, global = true, default_value = "sanitize.toml")]
    pub config: PathBuf,

    /// Output coloring
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,
}

impl Cli {
    /// Checks argument combinations clap cannot express
    ///
    /// # Errors
    ///
    /// Returns an `ArgumentConflict` error when `--pretty` is combined with
    /// `--format jsonl`.
    pub fn validate(&self) -> Result<(), clap::Error> {
        if let Command::Apply {
            format: RecordFormat::Jsonl,
            pretty: true,
            ..
        } = self.command
        {
            return Err(Cli::command().error(
                ErrorKind::ArgumentConflict,
                "--pretty cannot be used with '--format jsonl'",
            ));
        }
        Ok(())
    }
}

/// Available sanitize subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sanitize JSON records read from a file or stdin
    Apply {
        /// Record schema to apply (from [records.<name>] in the config)
        #[arg(short, long)]
        record: String,

        /// Input file (reads stdin when omitted or "-")
        input: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: RecordFormat,

        /// Pretty-print JSON output (not available with jsonl)
        #[arg(long)]
        pretty: bool,
    },

    /// List all registered rules
    List {
        /// Output format (defaults to `[output] format` of the config, then human)
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Write a starter sanitize.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_cli() {
        // Verify that the CLI struct is properly configured
        Cli::command().debug_assert();
    }

    #[test]
    fn test_apply_minimal() {
        let cli = Cli::parse_from(["sanitize", "apply", "--record", "user"]);
        match cli.command {
            Command::Apply {
                record,
                input,
                format,
                pretty,
            } => {
                assert_eq!(record, "user");
                assert_eq!(input, None);
                assert_eq!(format, RecordFormat::Json);
                assert!(!pretty);
            }
            _ => panic!("Expected Apply command"),
        }
        assert_eq!(cli.config, PathBuf::from("sanitize.toml"));
        assert_eq!(cli.color, ColorChoice::Auto);
    }

    #[test]
    fn test_apply_with_input_and_format() {
        let cli = Cli::parse_from([
            "sanitize", "apply", "-r", "user", "users.json", "--format", "jsonl",
        ]);
        match cli.command {
            Command::Apply { input, format, .. } => {
                assert_eq!(input, Some(PathBuf::from("users.json")));
                assert_eq!(format, RecordFormat::Jsonl);
            }
            _ => panic!("Expected Apply command"),
        }
    }

    #[test]
    fn test_apply_requires_record() {
        let result = Cli::try_parse_from(["sanitize", "apply"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_pretty_rejected_with_jsonl() {
        let cli = Cli::try_parse_from([
            "sanitize", "apply", "-r", "user", "--pretty", "--format", "jsonl",
        ])
        .unwrap();
        let err = cli.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_pretty_allowed_with_json() {
        let cli = Cli::try_parse_from([
            "sanitize", "apply", "-r", "user", "--format", "json", "--pretty",
        ])
        .unwrap();
        assert!(cli.validate().is_ok());
        match cli.command {
            Command::Apply { format, pretty, .. } => {
                assert_eq!(format, RecordFormat::Json);
                assert!(pretty);
            }
            _ => panic!("Expected Apply command"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::parse_from(["sanitize", "list", "--config", "other.toml"]);
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        match cli.command {
            Command::List { format } => assert_eq!(format, None),
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_list_jsonl() {
        let cli = Cli::parse_from(["sanitize", "--color", "never", "list", "-f", "jsonl"]);
        match cli.command {
            Command::List { format } => assert_eq!(format, Some(OutputFormat::Jsonl)),
            _ => panic!("Expected List command"),
        }
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn test_init_with_force() {
        let cli = Cli::parse_from(["sanitize", "init", "--force"]);
        match cli.command {
            Command::Init { force } => assert!(force),
            _ => panic!("Expected Init command"),
        }
    }
}
