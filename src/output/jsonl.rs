#![forbid(unsafe_code)]

//! JSONL output formatter for sanitized records
//!
//! Outputs one compact JSON object per line, in input order.

use serde_json::Value;

/// JSONL output formatter
pub struct JsonlFormatter;

impl JsonlFormatter {
    /// Creates a new JsonlFormatter
    pub fn new() -> Self {
        JsonlFormatter
    }

    /// Format records as JSONL
    pub fn format(&self, records: &[Value]) -> Result<String, serde_json::Error> {
        let mut output = String::new();
        for record in records {
            output.push_str(&serde_json::to_string(record)?);
            output.push('\n');
        }
        Ok(output)
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}
