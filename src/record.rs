#![forbid(unsafe_code)]

//! Record descriptors: typed structs and schema-driven JSON objects

mod field;
pub mod json;
mod macros;

pub use field::{AsSlot, Field, Record, Slot};
pub use json::{FieldSchema, JsonRecord, RecordSchema, SchemaCatalog};
