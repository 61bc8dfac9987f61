//! Parsing and validation for sanitize.toml configuration files

use crate::error::ConfigError;
use crate::record::{RecordSchema, SchemaCatalog};
use crate::rules::{AliasStep, AliasTransformer, DIVE, Registry, RuleSet, RuleSource, SKIP};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Main configuration struct for sanitize.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Sanitize metadata
    pub sanitize: SanitizeMeta,

    /// Composite rules: alias name to rule chain
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,

    /// JSON record schemas
    #[serde(default)]
    pub records: SchemaCatalog,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError> {
        if self.sanitize.version != "1" {
            return Err(ConfigError::Validation(format!(
                "Unsupported configuration version '{}'. Expected '1'",
                self.sanitize.version
            )));
        }

        for (name, chain) in &self.aliases {
            if !is_valid_rule_name(name) {
                return Err(ConfigError::Validation(format!(
                    "Invalid alias name '{}'",
                    name
                )));
            }
            let rules = RuleSet::parse(chain);
            if rules.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "Alias '{}' has an empty rule chain",
                    name
                )));
            }
            if rules.dive() {
                return Err(ConfigError::Validation(format!(
                    "Alias '{}' cannot contain '{}'",
                    name, DIVE
                )));
            }
        }

        for (name, schema) in &self.records {
            schema.validate(name, &self.records)?;
        }

        Ok(())
    }

    /// Schema catalog for JSON records
    pub fn catalog(&self) -> &SchemaCatalog {
        &self.records
    }

    /// Look up a record schema by name
    pub fn record(&self, name: &str) -> Result<&RecordSchema, ConfigError> {
        self.records.get(name).ok_or_else(|| {
            let known: Vec<&str> = self.records.keys().map(String::as_str).collect();
            ConfigError::Validation(format!(
                "Unknown record '{}'. Known records: [{}]",
                name,
                known.join(", ")
            ))
        })
    }

    /// Resolve every alias against `registry` and register it there
    ///
    /// Aliases may refer to other aliases. An alias that reuses the name of an
    /// existing rule (e.g. `lower = "trim_space,lower"`) refers to the previous
    /// definition inside its own chain and replaces it afterwards.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if a chain names an unknown rule or
    /// aliases refer to each other in a cycle.
    pub fn register_aliases(&self, registry: &mut Registry) -> Result<(), ConfigError> {
        let mut done = HashSet::new();
        for name in self.aliases.keys() {
            self.register_alias(name, registry, &mut done, &mut Vec::new())?;
        }
        Ok(())
    }

    fn register_alias<'c>(
        &'c self,
        name: &'c str,
        registry: &mut Registry,
        done: &mut HashSet<&'c str>,
        stack: &mut Vec<&'c str>,
    ) -> Result<(), ConfigError> {
        if done.contains(name) {
            return Ok(());
        }
        if stack.contains(&name) {
            stack.push(name);
            return Err(ConfigError::Validation(format!(
                "Alias cycle: {}",
                stack.join(" -> ")
            )));
        }

        let Some(chain) = self.aliases.get(name) else {
            return Ok(());
        };
        stack.push(name);

        let mut steps = Vec::new();
        for rule in RuleSet::parse(chain).iter() {
            if rule.name != name && self.aliases.contains_key(rule.name) {
                self.register_alias(rule.name, registry, done, stack)?;
            }
            let transformer = registry.lookup(rule.name).ok_or_else(|| {
                ConfigError::Validation(format!(
                    "Alias '{}' references unknown rule '{}'",
                    name, rule.name
                ))
            })?;
            steps.push(AliasStep {
                name: rule.name.to_string(),
                argument: rule.argument.to_string(),
                transformer,
            });
        }

        if let Some(previous) = registry.source(name) {
            tracing::warn!(alias = name, previous = %previous, "alias replaces an existing rule");
        }
        registry.register_arc(name, Arc::new(AliasTransformer::new(steps)), RuleSource::Alias);

        stack.pop();
        done.insert(name);
        Ok(())
    }
}

/// Rule names must be usable inside a rule string
fn is_valid_rule_name(name: &str) -> bool {
    !name.is_empty()
        && name != DIVE
        && name != SKIP
        && !name
            .chars()
            .any(|c| c == ',' || c == '=' || c.is_whitespace())
}

/// Sanitize metadata section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SanitizeMeta {
    /// Configuration version (must be "1")
    pub version: String,
}

/// Output configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Color output setting
    #[serde(default)]
    pub color: ColorOption,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON Lines format
    Jsonl,
}

/// Color output options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorOption {
    /// Auto-detect based on terminal capabilities
    #[default]
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}
