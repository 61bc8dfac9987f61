#![forbid(unsafe_code)]

//! Traversal engine
//!
//! The [`Sanitizer`] walks a record's fields in declaration order and, for
//! each field carrying rules, either runs the transformer chain on it or
//! descends into it. Traversal is depth-first and stops at the first error;
//! fields changed before that error stay changed.

use crate::error::{SanitizeError, TransformError};
use crate::record::json::json_type_name;
use crate::record::{JsonRecord, Record, RecordSchema, SchemaCatalog, Slot};
use crate::rules::registry::{self, Registry};
use crate::rules::{RuleSet, Transformer, has_dive, is_skipped, strip_dive};
use crate::types::{FieldHandle, FieldKind};
use serde_json::Value;

/// Applies registered rules to records
///
/// Each Sanitizer owns its registry, so independent rule vocabularies can be
/// used side by side. The free functions [`apply`] and [`apply_json`] use the
/// process-wide registry instead.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    registry: Registry,
}

impl Sanitizer {
    /// Creates a Sanitizer with the built-in rules registered
    pub fn new() -> Self {
        Self::with_registry(Registry::with_builtins())
    }

    /// Creates a Sanitizer that knows no rules at all
    pub fn empty() -> Self {
        Self::with_registry(Registry::new())
    }

    pub fn with_registry(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Register a transformer, replacing any rule of the same name
    pub fn register<T>(&mut self, name: impl Into<String>, transformer: T)
    where
        T: Transformer + 'static,
    {
        self.registry.register(name, transformer);
    }

    /// Register a closure as a transformer
    pub fn register_fn<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&mut FieldHandle<'_>, &str, &str) -> Result<(), TransformError>
            + Send
            + Sync
            + 'static,
    {
        self.registry.register_fn(name, f);
    }

    /// Sanitize `record` in place
    ///
    /// # Errors
    ///
    /// Returns `SanitizeError::UnsupportedRule` if a field names a rule that is
    /// not registered, or `SanitizeError::Transform` if a transformer fails.
    pub fn apply<R>(&self, record: &mut R) -> Result<(), SanitizeError>
    where
        R: Record + ?Sized,
    {
        for field in record.fields() {
            let name = field.name();
            let rules = field.rules().trim();

            let Some(slot) = field.into_slot() else {
                tracing::trace!(field = name, "skipping locked field");
                continue;
            };
            if is_skipped(rules) {
                continue;
            }

            match slot {
                Slot::Record(_) | Slot::Optional(_) => self.dive(slot, name, rules)?,
                Slot::Sequence(items) => {
                    if !has_dive(rules) {
                        tracing::trace!(field = name, "sequence without dive left untouched");
                        continue;
                    }
                    tracing::debug!(field = name, len = items.len(), "diving into sequence");
                    for item in items {
                        self.dive(item, name, rules)?;
                    }
                }
                Slot::Leaf(mut handle) => {
                    self.run_chain(&mut handle, name, &RuleSet::parse(rules))?;
                }
            }
        }

        Ok(())
    }

    /// Sanitize a JSON object described by `schema`
    ///
    /// # Errors
    ///
    /// Returns `SanitizeError::InvalidInput` if `value` is null or not an
    /// object, plus any error [`Sanitizer::apply`] can return.
    pub fn apply_json(
        &self,
        value: &mut Value,
        schema: &RecordSchema,
        catalog: &SchemaCatalog,
    ) -> Result<(), SanitizeError> {
        match value {
            Value::Object(object) => self.apply(&mut JsonRecord::new(schema, catalog, object)),
            other => Err(SanitizeError::InvalidInput(format!(
                "expected a JSON object, got {}",
                json_type_name(other)
            ))),
        }
    }

    /// Descend into (or transform) one field value or sequence element
    ///
    /// A record held directly is always descended into. A record behind an
    /// optional is only descended into when `dive` is present; otherwise the
    /// chain runs on it as an opaque value.
    fn dive(&self, slot: Slot<'_>, field: &str, rules: &str) -> Result<(), SanitizeError> {
        match slot {
            Slot::Optional(None) => Ok(()),
            Slot::Optional(Some(inner)) => match *inner {
                Slot::Record(mut record) => {
                    if has_dive(rules) {
                        tracing::debug!(field, "diving into optional record");
                        self.apply(record.as_mut())
                    } else {
                        self.run_opaque(FieldKind::Record, field, rules)
                    }
                }
                Slot::Leaf(mut handle) => {
                    self.run_chain(&mut handle, field, &RuleSet::parse(rules))
                }
                Slot::Sequence(_) => self.run_opaque(FieldKind::Sequence, field, rules),
                Slot::Optional(_) => self.run_opaque(FieldKind::Other, field, rules),
            },
            Slot::Record(mut record) => {
                tracing::debug!(field, "descending into nested record");
                self.apply(record.as_mut())
            }
            Slot::Leaf(mut handle) => {
                self.run_chain(&mut handle, field, &RuleSet::parse(strip_dive(rules)))
            }
            Slot::Sequence(_) => self.run_opaque(FieldKind::Sequence, field, strip_dive(rules)),
        }
    }

    fn run_opaque(&self, kind: FieldKind, field: &str, rules: &str) -> Result<(), SanitizeError> {
        self.run_chain(&mut FieldHandle::Opaque(kind), field, &RuleSet::parse(rules))
    }

    /// Run each rule's transformer in order, stopping at the first failure
    fn run_chain(
        &self,
        handle: &mut FieldHandle<'_>,
        field: &str,
        rules: &RuleSet<'_>,
    ) -> Result<(), SanitizeError> {
        for rule in rules.transforms() {
            let transformer =
                self.registry
                    .get(rule.name)
                    .ok_or_else(|| SanitizeError::UnsupportedRule {
                        rule: rule.name.to_string(),
                        field: field.to_string(),
                    })?;

            tracing::trace!(field, rule = %rule, kind = %handle.kind(), "applying rule");
            transformer
                .transform(handle, rule.name, rule.argument)
                .map_err(|source| SanitizeError::Transform {
                    rule: rule.name.to_string(),
                    field: field.to_string(),
                    source,
                })?;
        }

        Ok(())
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Sanitize `record` in place using the process-wide registry
///
/// The registry is snapshotted on entry; registrations made while the call
/// runs do not affect it.
pub fn apply<R>(record: &mut R) -> Result<(), SanitizeError>
where
    R: Record + ?Sized,
{
    Sanitizer::with_registry(registry::snapshot()).apply(record)
}

/// Sanitize a JSON object using the process-wide registry
pub fn apply_json(
    value: &mut Value,
    schema: &RecordSchema,
    catalog: &SchemaCatalog,
) -> Result<(), SanitizeError> {
    Sanitizer::with_registry(registry::snapshot()).apply_json(value, schema, catalog)
}
