#![forbid(unsafe_code)]

//! JSON objects as records
//!
//! A [`RecordSchema`] lists the fields of a JSON object in the order they
//! should be visited, with their rule strings. Field kinds are taken from the
//! JSON values themselves.

use crate::error::ConfigError;
use crate::record::field::{Field, Record, Slot};
use crate::types::{FieldHandle, FieldKind};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Named record schemas
pub type SchemaCatalog = BTreeMap<String, RecordSchema>;

/// Ordered field list for one kind of JSON object
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordSchema {
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

/// One field of a JSON record
///
/// Strings and booleans are writable. JSON numbers are read-only: transformers
/// receive them as [`FieldHandle::Opaque`] with [`FieldKind::Integer`] or
/// [`FieldKind::Float`] and cannot change them. Objects without a `record`
/// schema are likewise opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Object key
    pub name: String,

    /// Raw rule string
    #[serde(default)]
    pub rules: String,

    /// Schema used for nested objects (and objects inside arrays)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<String>,

    /// Treat a nested object as an optional reference: it is only descended
    /// into when the rules contain `dive`
    #[serde(default)]
    pub optional: bool,

    /// Never modify this field
    #[serde(default)]
    pub locked: bool,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>, rules: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: rules.into(),
            record: None,
            optional: false,
            locked: false,
        }
    }

    /// Use the named schema for nested objects
    pub fn with_record(mut self, record: impl Into<String>) -> Self {
        self.record = Some(record.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }
}

impl RecordSchema {
    pub fn new(fields: Vec<FieldSchema>) -> Self {
        Self { fields }
    }

    /// Check field names are unique and nested schemas exist in `catalog`
    pub fn validate(&self, name: &str, catalog: &SchemaCatalog) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "Record '{}' has a field with an empty name",
                    name
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "Duplicate field '{}' in record '{}'",
                    field.name, name
                )));
            }
            if let Some(nested) = &field.record
                && !catalog.contains_key(nested)
            {
                return Err(ConfigError::Validation(format!(
                    "Field '{}' in record '{}' references unknown record '{}'",
                    field.name, name, nested
                )));
            }
        }
        Ok(())
    }
}

/// A JSON object viewed through a schema
pub struct JsonRecord<'s, 'v> {
    schema: &'s RecordSchema,
    catalog: &'s SchemaCatalog,
    object: &'v mut Map<String, Value>,
}

impl<'s, 'v> JsonRecord<'s, 'v> {
    pub fn new(
        schema: &'s RecordSchema,
        catalog: &'s SchemaCatalog,
        object: &'v mut Map<String, Value>,
    ) -> Self {
        Self {
            schema,
            catalog,
            object,
        }
    }
}

impl Record for JsonRecord<'_, '_> {
    fn fields(&mut self) -> Vec<Field<'_>> {
        let schema = self.schema;
        let catalog = self.catalog;
        let mut values: HashMap<&str, &mut Value> = self
            .object
            .iter_mut()
            .map(|(key, value)| (key.as_str(), value))
            .collect();

        let mut fields = Vec::with_capacity(schema.fields.len());
        for spec in &schema.fields {
            if spec.locked {
                fields.push(Field::locked(&spec.name, &spec.rules));
                continue;
            }
            // Keys missing from the object are not fields of this instance
            let Some(value) = values.remove(spec.name.as_str()) else {
                continue;
            };
            let nested = spec.record.as_deref().and_then(|name| catalog.get(name));
            fields.push(Field::new(
                &spec.name,
                &spec.rules,
                json_slot(value, nested, spec.optional, catalog),
            ));
        }
        fields
    }
}

fn json_slot<'a>(
    value: &'a mut Value,
    schema: Option<&'a RecordSchema>,
    optional: bool,
    catalog: &'a SchemaCatalog,
) -> Slot<'a> {
    match value {
        Value::String(s) => Slot::Leaf(FieldHandle::Text(s)),
        Value::Bool(b) => Slot::Leaf(FieldHandle::Bool(b)),
        Value::Number(n) if n.is_f64() => Slot::Leaf(FieldHandle::Opaque(FieldKind::Float)),
        Value::Number(_) => Slot::Leaf(FieldHandle::Opaque(FieldKind::Integer)),
        Value::Null => Slot::Optional(None),
        Value::Array(items) => Slot::Sequence(
            items
                .iter_mut()
                .map(|item| json_slot(item, schema, optional, catalog))
                .collect(),
        ),
        Value::Object(object) => match schema {
            Some(schema) => {
                let record = Slot::Record(Box::new(JsonRecord::new(schema, catalog, object)));
                if optional {
                    Slot::Optional(Some(Box::new(record)))
                } else {
                    record
                }
            }
            None => Slot::Leaf(FieldHandle::Opaque(FieldKind::Record)),
        },
    }
}

/// Name of a JSON value's type, for error messages
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
