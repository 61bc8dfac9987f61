//! List command implementation
//!
//! This module implements the `sanitize list` command, which lists every
//! registered rule (built-ins plus the aliases of sanitize.toml) with its
//! source, in human-readable or JSONL form.

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::cli::common::{
    EXIT_ERROR, EXIT_SUCCESS, build_registry, color_choice, load_optional_config,
};
use crate::config;
use crate::output::{RuleListing, RuleListingHumanFormatter, RuleListingJsonlFormatter};
use std::io::{self, Write};
use std::path::Path;
use termcolor::StandardStream;

/// Error type specific to list command
#[derive(Debug, thiserror::Error)]
enum ListError {
    #[error("Configuration error: {0}")]
    Config(#[from] crate::error::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Run the list command
///
/// # Returns
///
/// Exit code:
/// - 0: Success
/// - 2: Error
pub fn run_list(config_path: &Path, format: Option<OutputFormat>, color: ColorChoice) -> i32 {
    match run_list_inner(config_path, format, color) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    }
}

fn run_list_inner(
    config_path: &Path,
    format: Option<OutputFormat>,
    color: ColorChoice,
) -> Result<(), ListError> {
    let config = load_optional_config(config_path)?;
    let format = format.unwrap_or_else(|| match config.as_ref().map(|c| c.output.format) {
        Some(config::OutputFormat::Jsonl) => OutputFormat::Jsonl,
        _ => OutputFormat::Human,
    });
    let registry = build_registry(config.as_ref())?;
    let listings = RuleListing::collect(&registry, config.as_ref());

    match format {
        OutputFormat::Human => {
            let mut stdout = StandardStream::stdout(color_choice(color, config.as_ref()));
            RuleListingHumanFormatter::new().write(&mut stdout, &listings)?;
            stdout.flush()?;
        }
        OutputFormat::Jsonl => {
            let mut stdout = io::stdout().lock();
            RuleListingJsonlFormatter::new().write(&mut stdout, &listings)?;
            stdout.flush()?;
        }
    }

    Ok(())
}
