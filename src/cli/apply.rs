//! Apply command implementation
//!
//! This module implements the `sanitize apply` command, which:
//! - Loads sanitize.toml and registers its aliases next to the built-ins
//! - Reads a JSON object, or an array of objects, from a file or stdin
//! - Sanitizes every object against the named record schema
//! - Writes the result to stdout as JSON or JSONL

use crate::cli::args::RecordFormat;
use crate::cli::common::{EXIT_ERROR, EXIT_SANITIZE, EXIT_SUCCESS, build_sanitizer, load_config};
use crate::engine::Sanitizer;
use crate::error::{ConfigError, SanitizeError};
use crate::output::JsonlFormatter;
use crate::record::{RecordSchema, SchemaCatalog};
use serde_json::Value;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

/// Error type specific to the apply command
#[derive(Debug, thiserror::Error)]
enum ApplyError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Sanitize(#[from] SanitizeError),

    #[error("record {index}: {source}")]
    SanitizeAt {
        index: usize,
        #[source]
        source: SanitizeError,
    },

    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ApplyError {
    fn exit_code(&self) -> i32 {
        match self {
            ApplyError::Sanitize(_) | ApplyError::SanitizeAt { .. } => EXIT_SANITIZE,
            _ => EXIT_ERROR,
        }
    }
}

/// Run the apply command
///
/// # Arguments
///
/// * `config_path` - Path to sanitize.toml
/// * `record` - Name of the record schema to apply
/// * `input` - Input file; stdin when `None` or `-`
/// * `format` - Output format
/// * `pretty` - Pretty-print JSON output
///
/// # Returns
///
/// Exit code:
/// - 0: Success
/// - 1: A record could not be sanitized
/// - 2: Configuration or I/O error
pub fn run_apply(
    config_path: &Path,
    record: &str,
    input: Option<&Path>,
    format: RecordFormat,
    pretty: bool,
) -> i32 {
    match run_apply_inner(config_path, record, input, format, pretty) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run_apply_inner(
    config_path: &Path,
    record: &str,
    input: Option<&Path>,
    format: RecordFormat,
    pretty: bool,
) -> Result<(), ApplyError> {
    let config = load_config(config_path)?;
    let schema = config.record(record)?;
    let sanitizer = build_sanitizer(&config)?;

    let mut document: Value = serde_json::from_str(&read_input(input)?)?;
    sanitize_document(&sanitizer, schema, config.catalog(), &mut document)?;

    let rendered = render(document, format, pretty)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn read_input(input: Option<&Path>) -> io::Result<String> {
    match input {
        Some(path) if path != Path::new("-") => fs::read_to_string(path),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Sanitize a single object, or every object of a top-level array
fn sanitize_document(
    sanitizer: &Sanitizer,
    schema: &RecordSchema,
    catalog: &SchemaCatalog,
    document: &mut Value,
) -> Result<(), ApplyError> {
    match document {
        Value::Array(items) => {
            tracing::debug!(records = items.len(), "sanitizing record array");
            for (index, item) in items.iter_mut().enumerate() {
                sanitizer
                    .apply_json(item, schema, catalog)
                    .map_err(|source| ApplyError::SanitizeAt { index, source })?;
            }
            Ok(())
        }
        other => Ok(sanitizer.apply_json(other, schema, catalog)?),
    }
}

fn render(document: Value, format: RecordFormat, pretty: bool) -> Result<String, serde_json::Error> {
    match format {
        RecordFormat::Jsonl => {
            let records = match document {
                Value::Array(items) => items,
                single => vec![single],
            };
            JsonlFormatter::new().format(&records)
        }
        RecordFormat::Json => {
            let mut out = if pretty {
                serde_json::to_string_pretty(&document)?
            } else {
                serde_json::to_string(&document)?
            };
            out.push('\n');
            Ok(out)
        }
    }
}
