//! Initialize a sanitize project
//!
//! Writes a starter sanitize.toml with a few aliases and an example record.

use std::fs;
use std::path::Path;

/// Default content for sanitize.toml
const DEFAULT_SANITIZE_TOML: &str = r#"[sanitize]
version = "1"

# Composite rules, usable anywhere a rule name is accepted.
# Built-ins: trim_space, strip_space, lower, upper, capitalize
[aliases]
person_name = "trim_space,capitalize"
email = "trim_space,lower"
postcode = "trim_space,upper,strip_space"

# JSON record schemas for `sanitize apply --record <name>`.
# Fields run in declaration order; "-" or "" leaves a field alone.
# Nested objects need `record`; arrays of objects need "dive".
[records.address]
fields = [
    { name = "line1", rules = "trim_space" },
    { name = "postcode", rules = "postcode" },
]

[records.user]
fields = [
    { name = "first_name", rules = "person_name" },
    { name = "last_name", rules = "person_name" },
    { name = "email", rules = "email" },
    { name = "tags", rules = "dive,trim_space,lower" },
    { name = "address", rules = "dive", record = "address", optional = true },
    { name = "id", rules = "", locked = true },
]

[output]
format = "human"
color = "auto"
"#;

/// Error type for init command
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Path error
    #[error("Path error: {0}")]
    Path(String),
}

/// Result of init command
#[derive(Debug, Default, PartialEq, Eq)]
pub struct InitResult {
    /// Files that were created
    pub created: Vec<String>,
    /// Files that were skipped (already existed)
    pub skipped: Vec<String>,
    /// Files that were overwritten
    pub overwritten: Vec<String>,
}

/// Run the init command
///
/// # Arguments
/// * `path` - Where to write sanitize.toml
/// * `force` - If true, overwrite an existing file. If false, skip it.
///
/// # Returns
/// * `Ok(InitResult)` - Summary of created/skipped/overwritten files
/// * `Err(InitError)` - If an I/O error occurred
pub fn run_init(path: &Path, force: bool) -> Result<InitResult, InitError> {
    let mut result = InitResult::default();
    handle_file(path, DEFAULT_SANITIZE_TOML, force, &mut result)?;
    Ok(result)
}

/// Handle creation of a single file
fn handle_file(
    path: &Path,
    content: &str,
    force: bool,
    result: &mut InitResult,
) -> Result<(), InitError> {
    let path_str = path_to_string(path)?;

    if path.is_dir() {
        return Err(InitError::Path(format!(
            "Path '{}' exists but is a directory",
            path_str
        )));
    }

    if path.exists() {
        if force {
            fs::write(path, content)?;
            result.overwritten.push(path_str);
        } else {
            result.skipped.push(path_str);
        }
    } else {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        result.created.push(path_str);
    }

    Ok(())
}

/// Convert a path to a string representation
fn path_to_string(path: &Path) -> Result<String, InitError> {
    path.to_str()
        .map(|s| s.to_string())
        .ok_or_else(|| InitError::Path(format!("Invalid UTF-8 in path: {:?}", path)))
}
