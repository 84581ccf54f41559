//! Boundary parsing for list responses
//!
//! List endpoints answer either with a bare JSON array or with an envelope
//! object carrying the array under `items`. Anything else is a shape error.
//! Inside the array, entries that are not records are skipped with a
//! warning so one bad entry never hides the rest of the list.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::error::{FetchError, FetchResult};

/// Key of the envelope form `{ "items": [...] }`
pub const ITEMS_KEY: &str = "items";

/// Convert a list response body into typed records
pub fn normalize_list<T: DeserializeOwned>(body: Value) -> FetchResult<Vec<T>> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove(ITEMS_KEY) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(FetchError::shape(format!(
                    "'{}' is {}, expected an array",
                    ITEMS_KEY,
                    kind_of(&other)
                )))
            }
            None => {
                return Err(FetchError::shape(format!(
                    "object without an '{}' array",
                    ITEMS_KEY
                )))
            }
        },
        other => {
            return Err(FetchError::shape(format!(
                "expected an array or an '{}' envelope, got {}",
                ITEMS_KEY,
                kind_of(&other)
            )))
        }
    };

    let total = items.len();
    let records: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            if !item.is_object() {
                warn!(index, kind = kind_of(&item), "skipping list entry that is not a record");
                return None;
            }
            serde_json::from_value(item)
                .map_err(|e| warn!(index, error = %e, "skipping undecodable list entry"))
                .ok()
        })
        .collect();
    if records.len() < total {
        warn!(kept = records.len(), total, "list response had unusable entries");
    }
    Ok(records)
}

/// Convert a single-record response body
pub fn normalize_record<T: DeserializeOwned>(body: Value) -> FetchResult<T> {
    if !body.is_object() {
        return Err(FetchError::shape(format!(
            "expected an object, got {}",
            kind_of(&body)
        )));
    }
    serde_json::from_value(body).map_err(|e| FetchError::shape(e.to_string()))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
