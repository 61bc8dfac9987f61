#![forbid(unsafe_code)]

//! Sanitize: declarative field normalization
//!
//! Fields of a record carry a rule string such as `"trim_space,lower"`.
//! [`apply`] walks the record, descends into nested records, optionals and
//! (with `dive`) sequences, and runs the named transformers on each field in
//! order.
//!
//! ```
//! use sanitize::record;
//!
//! struct Contact {
//!     name: String,
//!     email: String,
//!     phone: Option<String>,
//! }
//!
//! record!(Contact {
//!     name: "trim_space,capitalize",
//!     email: "trim_space,lower",
//!     phone: "strip_space",
//! });
//!
//! let mut contact = Contact {
//!     name: "  aDA ".to_string(),
//!     email: "Ada@Example.COM ".to_string(),
//!     phone: Some("+44 20 7946 0000".to_string()),
//! };
//! sanitize::apply(&mut contact).unwrap();
//!
//! assert_eq!(contact.name, "Ada");
//! assert_eq!(contact.email, "ada@example.com");
//! assert_eq!(contact.phone.as_deref(), Some("+442079460000"));
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod output;
pub mod record;
pub mod rules;
pub mod types;

// Re-export error types for convenient access
pub use error::{ConfigError, Error, SanitizeError, TransformError};

// Re-export core domain types; the `record!` macro relies on these paths
pub use engine::{Sanitizer, apply, apply_json};
pub use record::{AsSlot, Field, Record, Slot};
pub use rules::registry::{lookup, register, register_fn};
pub use rules::{Registry, RuleSource, Transformer};
pub use types::{FieldHandle, FieldKind};
