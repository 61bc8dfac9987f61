#![forbid(unsafe_code)]

//! Core domain types for sanitize
//!
//! A [`FieldHandle`] is the only view a transformer ever gets of a record:
//! read and write access to exactly one leaf value.

use serde::Serialize;
use std::fmt;

/// Runtime kind of a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Integer,
    Float,
    Bool,
    Record,
    Sequence,
    Other,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Bool => "bool",
            FieldKind::Record => "record",
            FieldKind::Sequence => "sequence",
            FieldKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// Mutable access to a single field value
///
/// Values the engine cannot expose for writing are passed as `Opaque` so that
/// transformers can still see what they were invoked on and no-op.
#[derive(Debug)]
pub enum FieldHandle<'a> {
    Text(&'a mut String),
    Integer(&'a mut i64),
    Float(&'a mut f64),
    Bool(&'a mut bool),
    Opaque(FieldKind),
}

impl FieldHandle<'_> {
    /// Returns the runtime kind of the value behind this handle
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldHandle::Text(_) => FieldKind::Text,
            FieldHandle::Integer(_) => FieldKind::Integer,
            FieldHandle::Float(_) => FieldKind::Float,
            FieldHandle::Bool(_) => FieldKind::Bool,
            FieldHandle::Opaque(kind) => *kind,
        }
    }

    /// Returns the string value if this is a text field
    pub fn as_text_mut(&mut self) -> Option<&mut String> {
        match self {
            FieldHandle::Text(s) => Some(&mut **s),
            _ => None,
        }
    }

    /// Replaces the text value through `f`; no-op for non-text fields
    pub fn map_text(&mut self, f: impl FnOnce(&str) -> String) {
        if let Some(s) = self.as_text_mut() {
            let next = f(s.as_str());
            *s = next;
        }
    }
}

impl<'a> From<&'a mut String> for FieldHandle<'a> {
    fn from(value: &'a mut String) -> Self {
        FieldHandle::Text(value)
    }
}

impl<'a> From<&'a mut i64> for FieldHandle<'a> {
    fn from(value: &'a mut i64) -> Self {
        FieldHandle::Integer(value)
    }
}

impl<'a> From<&'a mut f64> for FieldHandle<'a> {
    fn from(value: &'a mut f64) -> Self {
        FieldHandle::Float(value)
    }
}

impl<'a> From<&'a mut bool> for FieldHandle<'a> {
    fn from(value: &'a mut bool) -> Self {
        FieldHandle::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_kinds() {
        let mut s = String::from("x");
        let mut n = 3_i64;
        let mut f = 1.5_f64;
        let mut b = true;

        assert_eq!(FieldHandle::from(&mut s).kind(), FieldKind::Text);
        assert_eq!(FieldHandle::from(&mut n).kind(), FieldKind::Integer);
        assert_eq!(FieldHandle::from(&mut f).kind(), FieldKind::Float);
        assert_eq!(FieldHandle::from(&mut b).kind(), FieldKind::Bool);
        assert_eq!(
            FieldHandle::Opaque(FieldKind::Record).kind(),
            FieldKind::Record
        );
    }

    #[test]
    fn test_map_text_only_touches_text() {
        let mut s = String::from("abc");
        let mut handle = FieldHandle::from(&mut s);
        handle.map_text(|v| v.to_uppercase());
        assert_eq!(s, "ABC");

        let mut n = 7_i64;
        let mut handle = FieldHandle::from(&mut n);
        handle.map_text(|_| unreachable!());
        assert_eq!(n, 7);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(FieldKind::Text.to_string(), "text");
        assert_eq!(FieldKind::Sequence.to_string(), "sequence");
    }
}
