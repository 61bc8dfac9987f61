#![forbid(unsafe_code)]

//! Built-in transformers registered at startup
//!
//! Every built-in works on text fields only and leaves any other kind
//! untouched. None of them can fail.

use crate::error::TransformError;
use crate::rules::registry::{Registry, RuleSource};
use crate::types::FieldHandle;
use std::sync::Arc;

pub const TRIM_SPACE: &str = "trim_space";
pub const STRIP_SPACE: &str = "strip_space";
pub const LOWER: &str = "lower";
pub const UPPER: &str = "upper";
pub const CAPITALIZE: &str = "capitalize";

/// Names of all built-in rules
pub const BUILTIN_RULES: &[&str] = &[TRIM_SPACE, STRIP_SPACE, LOWER, UPPER, CAPITALIZE];

/// One-line description of a built-in rule
pub fn description(name: &str) -> Option<&'static str> {
    match name {
        TRIM_SPACE => Some("Remove leading and trailing whitespace"),
        STRIP_SPACE => Some("Remove every space character"),
        LOWER => Some("Convert to lowercase"),
        UPPER => Some("Convert to uppercase"),
        CAPITALIZE => Some("Lowercase, then uppercase the first character"),
        _ => None,
    }
}

/// Register every built-in transformer into `registry`
pub fn register_builtins(registry: &mut Registry) {
    registry.register_arc(TRIM_SPACE, Arc::new(trim_space), RuleSource::Builtin);
    registry.register_arc(STRIP_SPACE, Arc::new(strip_space), RuleSource::Builtin);
    registry.register_arc(LOWER, Arc::new(lower), RuleSource::Builtin);
    registry.register_arc(UPPER, Arc::new(upper), RuleSource::Builtin);
    registry.register_arc(CAPITALIZE, Arc::new(capitalize), RuleSource::Builtin);
}

/// Removes leading and trailing whitespace
pub fn trim_space(field: &mut FieldHandle<'_>, _: &str, _: &str) -> Result<(), TransformError> {
    field.map_text(|s| s.trim().to_string());
    Ok(())
}

/// Removes every ASCII space character; tabs and newlines are kept
pub fn strip_space(field: &mut FieldHandle<'_>, _: &str, _: &str) -> Result<(), TransformError> {
    field.map_text(|s| s.replace(' ', ""));
    Ok(())
}

pub fn lower(field: &mut FieldHandle<'_>, _: &str, _: &str) -> Result<(), TransformError> {
    field.map_text(str::to_lowercase);
    Ok(())
}

pub fn upper(field: &mut FieldHandle<'_>, _: &str, _: &str) -> Result<(), TransformError> {
    field.map_text(str::to_uppercase);
    Ok(())
}

/// Lowercases the whole string, then uppercases its first character
pub fn capitalize(field: &mut FieldHandle<'_>, _: &str, _: &str) -> Result<(), TransformError> {
    field.map_text(|s| {
        let lowered = s.to_lowercase();
        let mut chars = lowered.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => lowered,
        }
    });
    Ok(())
}
