#![forbid(unsafe_code)]

//! Transformer registry
//!
//! The Registry is responsible for:
//! - Mapping rule names to transformers (last registration wins)
//! - Remembering where each rule came from (built-in, alias, custom)
//! - Providing lookups to the traversal engine
//!
//! A process-wide registry seeded with the built-ins backs the free functions
//! [`register`], [`lookup`] and [`snapshot`]. Registrations are expected to
//! happen once at startup, before traversals begin; each global traversal
//! works on a snapshot so an in-flight call never observes a half-applied
//! registration.

use crate::error::TransformError;
use crate::rules::builtin;
use crate::rules::transformer::Transformer;
use crate::types::FieldHandle;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Where a registered rule came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSource {
    Builtin,
    Alias,
    Custom,
}

impl fmt::Display for RuleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSource::Builtin => f.write_str("builtin"),
            RuleSource::Alias => f.write_str("alias"),
            RuleSource::Custom => f.write_str("custom"),
        }
    }
}

#[derive(Clone)]
struct Entry {
    transformer: Arc<dyn Transformer>,
    source: RuleSource,
}

/// Mapping from rule name to transformer
///
/// Cloning is cheap: transformers are reference counted.
#[derive(Clone, Default)]
pub struct Registry {
    entries: HashMap<String, Entry>,
}

impl Registry {
    /// Create a new empty Registry
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Create a Registry holding the built-in transformers
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtin::register_builtins(&mut registry);
        registry
    }

    /// Register a transformer under `name`, replacing any existing entry
    pub fn register<T>(&mut self, name: impl Into<String>, transformer: T)
    where
        T: Transformer + 'static,
    {
        self.register_arc(name, Arc::new(transformer), RuleSource::Custom);
    }

    /// Register a closure as a transformer
    ///
    /// Same as [`Registry::register`], but the closure signature is inferred
    /// without annotations.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&mut FieldHandle<'_>, &str, &str) -> Result<(), TransformError>
            + Send
            + Sync
            + 'static,
    {
        self.register(name, f);
    }

    /// Register a shared transformer with an explicit source
    pub fn register_arc(
        &mut self,
        name: impl Into<String>,
        transformer: Arc<dyn Transformer>,
        source: RuleSource,
    ) {
        let name = name.into();
        if let Some(previous) = self.entries.get(&name) {
            tracing::debug!(
                rule = %name,
                previous = %previous.source,
                replacement = %source,
                "overriding registered rule"
            );
        }
        self.entries.insert(
            name,
            Entry {
                transformer,
                source,
            },
        );
    }

    /// Look up a transformer by rule name
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Transformer>> {
        self.entries.get(name).map(|entry| entry.transformer.clone())
    }

    /// Borrow a transformer by rule name
    pub fn get(&self, name: &str) -> Option<&dyn Transformer> {
        self.entries.get(name).map(|entry| entry.transformer.as_ref())
    }

    /// Source of a registered rule
    pub fn source(&self, name: &str) -> Option<RuleSource> {
        self.entries.get(name).map(|entry| entry.source)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered rule names with their sources, sorted by name
    pub fn rules(&self) -> Vec<(&str, RuleSource)> {
        let mut rules: Vec<(&str, RuleSource)> = self
            .entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry.source))
            .collect();
        rules.sort_by(|a, b| a.0.cmp(b.0));
        rules
    }

    /// Get the number of rules in the registry
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.rules()).finish()
    }
}

static GLOBAL: Lazy<RwLock<Registry>> = Lazy::new(|| RwLock::new(Registry::with_builtins()));

/// Register a transformer in the process-wide registry
///
/// Overwrites any existing rule of the same name, built-ins included.
pub fn register<T>(name: impl Into<String>, transformer: T)
where
    T: Transformer + 'static,
{
    GLOBAL
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register(name, transformer);
}

/// Register a closure in the process-wide registry
pub fn register_fn<F>(name: impl Into<String>, f: F)
where
    F: Fn(&mut FieldHandle<'_>, &str, &str) -> Result<(), TransformError> + Send + Sync + 'static,
{
    register(name, f);
}

/// Look up a transformer in the process-wide registry
pub fn lookup(name: &str) -> Option<Arc<dyn Transformer>> {
    GLOBAL
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .lookup(name)
}

/// Copy of the process-wide registry as it is right now
pub fn snapshot() -> Registry {
    GLOBAL.read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Run `f` with mutable access to the process-wide registry
pub fn with_global<R>(f: impl FnOnce(&mut Registry) -> R) -> R {
    let mut guard = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}
