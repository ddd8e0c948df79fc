//! Parsing of OpenSearch index API response bodies.

use serde_json::Value;

use crate::errors::IndexError;
use index_admin_shared::Document;

/// Read the `acknowledged` flag of a create / delete / put-mapping response.
pub fn acknowledged(body: &Value) -> bool {
    body.get("acknowledged")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Interpret a delete-index answer.
///
/// A missing index is a normal negative result, not an error.
pub fn index_deleted(status: u16, body: &str) -> Result<bool, IndexError> {
    match status {
        200..=299 => serde_json::from_str::<Value>(body)
            .map(|parsed| acknowledged(&parsed))
            .map_err(|e| IndexError::response(status, format!("invalid delete response: {}", e))),
        404 => Ok(false),
        _ => Err(IndexError::from_response(status, body)),
    }
}

/// Extract the mapping of `index` from a get-mapping response.
///
/// The response is keyed by concrete index name:
/// `{"orders": {"mappings": {...}}}`. When `index` is an alias the single
/// concrete entry is used instead.
pub fn mapping_from_response(body: Value, index: &str) -> Result<Document, IndexError> {
    let mut entry = index_entry(body, index)?;
    match entry.get_mut("mappings").map(Value::take) {
        Some(mappings @ Value::Object(_)) => Ok(Document::from_value(mappings)?),
        Some(Value::Null) | None => Ok(Document::new()),
        Some(_) => Err(IndexError::response(
            200,
            format!("mappings of index {} is not an object", index),
        )),
    }
}

/// Extract the settings of `index` from a get-settings response.
///
/// Explicit settings come from `settings`; with `include_defaults` the
/// `defaults` section is merged in without overriding explicit values. Nested
/// sections are flattened so both shapes of the response yield dotted keys.
pub fn settings_from_response(
    body: Value,
    index: &str,
    include_defaults: bool,
) -> Result<Document, IndexError> {
    let entry = index_entry(body, index)?;

    let mut settings = section(&entry, "settings", index)?;
    if include_defaults {
        settings.merge_missing(section(&entry, "defaults", index)?);
    }
    Ok(settings)
}

/// Total hit count of a search response, for both `"total": 3` and
/// `"total": {"value": 3, "relation": "eq"}` shapes.
pub fn total_hits(body: &Value) -> Option<u64> {
    let total = body.get("hits")?.get("total")?;
    total
        .as_u64()
        .or_else(|| total.get("value").and_then(Value::as_u64))
}

/// Server version number from an info response.
pub fn version_number(body: &Value) -> Option<&str> {
    body.get("version")?.get("number")?.as_str()
}

fn index_entry(body: Value, index: &str) -> Result<Value, IndexError> {
    let Value::Object(mut indices) = body else {
        return Err(IndexError::response(200, "response body is not an object"));
    };

    if let Some(entry) = indices.remove(index) {
        return Ok(entry);
    }

    match indices.len() {
        1 => Ok(indices
            .into_iter()
            .next()
            .map(|(_, entry)| entry)
            .unwrap_or_default()),
        0 => Err(IndexError::not_found(format!("no entry for index {}", index))),
        n => Err(IndexError::response(
            200,
            format!("{} resolves to {} indices", index, n),
        )),
    }
}

fn section(entry: &Value, name: &str, index: &str) -> Result<Document, IndexError> {
    match entry.get(name) {
        Some(Value::Object(fields)) => Ok(Document::from(fields.clone()).flatten()),
        Some(Value::Null) | None => Ok(Document::new()),
        Some(_) => Err(IndexError::response(
            200,
            format!("{} of index {} is not an object", name, index),
        )),
    }
}
