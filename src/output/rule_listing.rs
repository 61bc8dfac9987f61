#![forbid(unsafe_code)]

//! Rule listing formatters
//!
//! This module provides formatters for displaying the registered rules from
//! the `sanitize list` command. It supports both human-readable and JSONL
//! output formats.

use crate::config::Config;
use crate::rules::builtin;
use crate::rules::{Registry, RuleSource};
use serde::Serialize;
use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

/// One registered rule, ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleListing {
    pub name: String,
    pub source: RuleSource,
    pub description: String,
}

impl RuleListing {
    /// Build listings for every rule in `registry`, sorted by name
    ///
    /// Alias descriptions show the chain they expand to.
    pub fn collect(registry: &Registry, config: Option<&Config>) -> Vec<RuleListing> {
        registry
            .rules()
            .into_iter()
            .map(|(name, source)| {
                let description = match source {
                    RuleSource::Builtin => builtin::description(name).unwrap_or_default().to_string(),
                    RuleSource::Alias => config
                        .and_then(|c| c.aliases.get(name))
                        .map(|chain| format!("expands to {}", chain))
                        .unwrap_or_default(),
                    RuleSource::Custom => String::new(),
                };
                RuleListing {
                    name: name.to_string(),
                    source,
                    description,
                }
            })
            .collect()
    }
}

/// Human-readable formatter for rule listings
pub struct RuleListingHumanFormatter;

impl RuleListingHumanFormatter {
    /// Create a new human formatter
    pub fn new() -> Self {
        RuleListingHumanFormatter
    }

    /// Write the listings, coloring rule sources when `out` supports it
    pub fn write(&self, out: &mut impl WriteColor, listings: &[RuleListing]) -> io::Result<()> {
        writeln!(out, "Rules ({} registered):", listings.len())?;
        writeln!(out)?;

        for listing in listings {
            out.set_color(ColorSpec::new().set_bold(true))?;
            write!(out, "{}", listing.name)?;
            out.reset()?;

            write!(out, " (")?;
            out.set_color(ColorSpec::new().set_fg(Some(source_color(listing.source))))?;
            write!(out, "{}", listing.source)?;
            out.reset()?;
            writeln!(out, ")")?;

            if !listing.description.is_empty() {
                writeln!(out, "  {}", listing.description)?;
            }
        }

        Ok(())
    }
}

impl Default for RuleListingHumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn source_color(source: RuleSource) -> Color {
    match source {
        RuleSource::Builtin => Color::Green,
        RuleSource::Alias => Color::Cyan,
        RuleSource::Custom => Color::Yellow,
    }
}

/// JSONL formatter for rule listings: one object per rule
pub struct RuleListingJsonlFormatter;

impl RuleListingJsonlFormatter {
    pub fn new() -> Self {
        RuleListingJsonlFormatter
    }

    pub fn format(&self, listings: &[RuleListing]) -> String {
        let mut output = String::new();
        for listing in listings {
            if let Ok(json) = serde_json::to_string(listing) {
                output.push_str(&json);
                output.push('\n');
            }
        }
        output
    }

    pub fn write(&self, out: &mut impl Write, listings: &[RuleListing]) -> io::Result<()> {
        out.write_all(self.format(listings).as_bytes())
    }
}

impl Default for RuleListingJsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}
