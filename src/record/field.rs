#![forbid(unsafe_code)]

//! Record descriptors
//!
//! A record describes itself as an ordered list of [`Field`]s. Each mutable
//! field exposes a [`Slot`] telling the engine what sits behind it: a leaf
//! value, a nested record, an optional reference, or a sequence.

use crate::types::{FieldHandle, FieldKind};

/// A value made of named fields that can be sanitized in place
pub trait Record {
    /// Field descriptors in declaration order
    fn fields(&mut self) -> Vec<Field<'_>>;
}

impl<R: Record + ?Sized> Record for &mut R {
    fn fields(&mut self) -> Vec<Field<'_>> {
        (**self).fields()
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn fields(&mut self) -> Vec<Field<'_>> {
        (**self).fields()
    }
}

/// One field of a record: its name, raw rule string and value slot
///
/// A field without a slot is not externally mutable and is always skipped,
/// whatever its rules say.
pub struct Field<'a> {
    name: &'a str,
    rules: &'a str,
    slot: Option<Slot<'a>>,
}

impl<'a> Field<'a> {
    pub fn new(name: &'a str, rules: &'a str, slot: Slot<'a>) -> Self {
        Self {
            name,
            rules,
            slot: Some(slot),
        }
    }

    /// A field the engine must not touch
    pub fn locked(name: &'a str, rules: &'a str) -> Self {
        Self {
            name,
            rules,
            slot: None,
        }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn rules(&self) -> &'a str {
        self.rules
    }

    pub fn is_mutable(&self) -> bool {
        self.slot.is_some()
    }

    pub fn into_slot(self) -> Option<Slot<'a>> {
        self.slot
    }
}

impl std::fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("rules", &self.rules)
            .field("kind", &self.slot.as_ref().map(Slot::kind))
            .finish()
    }
}

/// What sits behind a field
pub enum Slot<'a> {
    /// A primitive value
    Leaf(FieldHandle<'a>),
    /// A nested record held directly (always descended into)
    Record(Box<dyn Record + 'a>),
    /// An optional reference; `None` is skipped
    Optional(Option<Box<Slot<'a>>>),
    /// A sequence; elements are only visited when `dive` is requested
    Sequence(Vec<Slot<'a>>),
}

impl<'a> Slot<'a> {
    /// A nested record slot borrowing `record`
    pub fn record<R>(record: &'a mut R) -> Self
    where
        R: Record + ?Sized + 'a,
    {
        Slot::Record(Box::new(record))
    }

    pub fn leaf(handle: impl Into<FieldHandle<'a>>) -> Self {
        Slot::Leaf(handle.into())
    }

    /// Kind of the value behind this slot, looking through optionals
    pub fn kind(&self) -> FieldKind {
        match self {
            Slot::Leaf(handle) => handle.kind(),
            Slot::Record(_) => FieldKind::Record,
            Slot::Optional(Some(inner)) => inner.kind(),
            Slot::Optional(None) => FieldKind::Other,
            Slot::Sequence(_) => FieldKind::Sequence,
        }
    }
}

/// Types that can expose themselves as a field slot
///
/// Record types get this from the [`record!`](crate::record!) macro.
pub trait AsSlot {
    fn as_slot(&mut self) -> Slot<'_>;
}

impl AsSlot for String {
    fn as_slot(&mut self) -> Slot<'_> {
        Slot::Leaf(FieldHandle::Text(self))
    }
}

impl AsSlot for i64 {
    fn as_slot(&mut self) -> Slot<'_> {
        Slot::Leaf(FieldHandle::Integer(self))
    }
}

impl AsSlot for f64 {
    fn as_slot(&mut self) -> Slot<'_> {
        Slot::Leaf(FieldHandle::Float(self))
    }
}

impl AsSlot for bool {
    fn as_slot(&mut self) -> Slot<'_> {
        Slot::Leaf(FieldHandle::Bool(self))
    }
}

impl<T: AsSlot> AsSlot for Option<T> {
    fn as_slot(&mut self) -> Slot<'_> {
        Slot::Optional(self.as_mut().map(|value| Box::new(value.as_slot())))
    }
}

impl<T: AsSlot + ?Sized> AsSlot for Box<T> {
    fn as_slot(&mut self) -> Slot<'_> {
        (**self).as_slot()
    }
}

impl<T: AsSlot> AsSlot for Vec<T> {
    fn as_slot(&mut self) -> Slot<'_> {
        Slot::Sequence(self.iter_mut().map(AsSlot::as_slot).collect())
    }
}

impl<T: AsSlot, const N: usize> AsSlot for [T; N] {
    fn as_slot(&mut self) -> Slot<'_> {
        Slot::Sequence(self.iter_mut().map(AsSlot::as_slot).collect())
    }
}
