#![forbid(unsafe_code)]

//! Rule parsing, transformers and the transformer registry

pub mod builtin;
pub mod parser;
pub mod registry;
mod transformer;

// Re-export core types
pub use parser::{DIVE, Rule, RuleSet, SKIP, has_dive, is_skipped, strip_dive};
pub use registry::{Registry, RuleSource};
pub use transformer::{AliasStep, AliasTransformer, Transformer};
