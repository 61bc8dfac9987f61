//! Configuration file parsing and validation

pub mod sanitize_toml;

pub use sanitize_toml::{ColorOption, Config, OutputConfig, OutputFormat, SanitizeMeta};
