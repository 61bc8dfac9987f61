//! CLI argument parsing and command dispatch

pub mod apply;
pub mod args;
pub(crate) mod common;
pub mod init;
pub mod list;

// Re-export types for convenient access
pub use args::{Cli, ColorChoice, Command, OutputFormat, RecordFormat};
pub use common::{EXIT_ERROR, EXIT_SANITIZE, EXIT_SUCCESS};
