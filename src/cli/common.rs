//! Common helper functions shared across CLI commands
//!
//! This module provides shared functionality for loading configuration,
//! building the rule registry and choosing output coloring.

use crate::cli::args::ColorChoice;
use crate::config::{ColorOption, Config};
use crate::engine::Sanitizer;
use crate::error::ConfigError;
use crate::rules::Registry;
use std::io::IsTerminal;
use std::path::Path;

pub const EXIT_SUCCESS: i32 = 0;
/// A record could not be sanitized (unsupported rule, transformer failure, bad input)
pub const EXIT_SANITIZE: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Load sanitize.toml from `path`
///
/// # Errors
///
/// Returns `ConfigError::Io` if the file does not exist or cannot be read.
/// Returns `ConfigError::Parse` or `ConfigError::Validation` if it is invalid.
pub(crate) fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!(
                "{} not found. Run 'sanitize init' to create it.",
                path.display()
            ),
        )));
    }

    Config::load(path)
}

/// Load the config if the file exists
pub(crate) fn load_optional_config(path: &Path) -> Result<Option<Config>, ConfigError> {
    if path.exists() {
        Config::load(path).map(Some)
    } else {
        tracing::debug!(path = %path.display(), "no config file, using built-in rules only");
        Ok(None)
    }
}

/// Build a registry holding the built-ins plus the aliases of `config`
pub(crate) fn build_registry(config: Option<&Config>) -> Result<Registry, ConfigError> {
    let mut registry = Registry::with_builtins();
    if let Some(config) = config {
        config.register_aliases(&mut registry)?;
    }
    Ok(registry)
}

/// Build a sanitizer for `config`
pub(crate) fn build_sanitizer(config: &Config) -> Result<Sanitizer, ConfigError> {
    let mut sanitizer = Sanitizer::new();
    config.register_aliases(sanitizer.registry_mut())?;
    Ok(sanitizer)
}

/// Resolve the effective terminal color choice
///
/// An explicit `--color` wins. With `auto`, the config setting decides and
/// coloring is only used when stdout is a terminal.
pub(crate) fn color_choice(cli: ColorChoice, config: Option<&Config>) -> termcolor::ColorChoice {
    let effective = match cli {
        ColorChoice::Always => ColorOption::Always,
        ColorChoice::Never => ColorOption::Never,
        ColorChoice::Auto => config.map(|c| c.output.color).unwrap_or_default(),
    };

    match effective {
        ColorOption::Always => termcolor::ColorChoice::Always,
        ColorOption::Never => termcolor::ColorChoice::Never,
        ColorOption::Auto if std::io::stdout().is_terminal() => termcolor::ColorChoice::Auto,
        ColorOption::Auto => termcolor::ColorChoice::Never,
    }
}
