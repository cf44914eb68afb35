//! FILENAME: engine/src/record.rs
//! PURPOSE: The opaque record type consumed by the view pipeline.
//! CONTEXT: A record is a sparse mapping from field name to value. The
//! pipeline assumes no schema beyond the fields referenced by headers and
//! sort/group keys; reading an absent field yields `Empty`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::value::FieldValue;

const EMPTY: &FieldValue = &FieldValue::Empty;

/// A single schemaless record.
/// Sparse storage: fields that were never set are not stored and read
/// back as `FieldValue::Empty`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    fields: HashMap<String, FieldValue>,
}

impl Record {
    /// Creates a new, empty record.
    pub fn new() -> Self {
        Record {
            fields: HashMap::new(),
        }
    }

    /// Builder-style field assignment, mainly for constructing records
    /// in host code and tests.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Sets a field on the record.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Retrieves a field if it was set.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Reads a field, treating absent fields as `Empty`.
    /// This is the accessor the sort/group/filter stages use.
    pub fn value_of(&self, field: &str) -> &FieldValue {
        self.fields.get(field).unwrap_or(EMPTY)
    }

    /// Removes a field from the record.
    pub fn clear(&mut self, field: &str) {
        self.fields.remove(field);
    }

    /// Iterates over the set fields as (name, value) pairs.
    /// Iteration order is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over the set values.
    pub fn values(&self) -> impl Iterator<Item = &FieldValue> {
        self.fields.values()
    }

    /// Number of set fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
