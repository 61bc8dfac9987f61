//! Record traversal and rule execution

pub mod executor;

pub use executor::{Sanitizer, apply, apply_json};
