//! Order-preserving JSON documents.
//!
//! A [`Document`] carries mapping definitions and settings payloads between the
//! facade and the search engine. Field order is kept as inserted so that a
//! mapping read back from the engine can be compared with the one that was sent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ModelError;

/// A JSON object with insertion-ordered keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    fields: Map<String, Value>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from a JSON value.
    ///
    /// Only JSON objects are accepted.
    pub fn from_value(value: Value) -> Result<Self, ModelError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(ModelError::invalid_document(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Parse a document from JSON text.
    pub fn parse(json: &str) -> Result<Self, ModelError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| ModelError::invalid_document(e.to_string()))?;
        Self::from_value(value)
    }

    /// Get a top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Set a top-level field, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    /// Builder-style variant of [`Document::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Remove a top-level field.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    /// Check whether a top-level field is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Iterate the top-level keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    /// Iterate the top-level entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Number of top-level fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the document has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convert into a JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    /// Borrow the underlying JSON map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Serialize to compact JSON text.
    pub fn to_json(&self) -> String {
        Value::Object(self.fields.clone()).to_string()
    }

    /// Flatten nested objects into dotted keys.
    ///
    /// `{"index": {"number_of_shards": "1"}}` becomes
    /// `{"index.number_of_shards": "1"}`. Arrays and scalars are kept as leaves.
    pub fn flatten(&self) -> Document {
        let mut flat = Map::new();
        flatten_into(&mut flat, None, &self.fields);
        Document { fields: flat }
    }

    /// Add every entry of `other` whose key is not already present.
    pub fn merge_missing(&mut self, other: Document) {
        for (key, value) in other.fields {
            self.fields.entry(key).or_insert(value);
        }
    }
}

impl From<Map<String, Value>> for Document {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl From<Document> for Value {
    fn from(document: Document) -> Self {
        document.into_value()
    }
}

impl TryFrom<Value> for Document {
    type Error = ModelError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

fn flatten_into(out: &mut Map<String, Value>, prefix: Option<&str>, fields: &Map<String, Value>) {
    for (key, value) in fields {
        let path = match prefix {
            Some(prefix) => format!("{}.{}", prefix, key),
            None => key.clone(),
        };
        match value {
            Value::Object(nested) if !nested.is_empty() => flatten_into(out, Some(&path), nested),
            other => {
                out.insert(path, other.clone());
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
