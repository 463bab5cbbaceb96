//! Reshaping between keyed collections and record lists.
//!
//! ```text
//! {"a": {"x": 1}}  <--->  [{"x": 1, "id": "a"}]      (key field "id")
//! ```

use serde_json::Value;

use keyedlist_model::{ItemRecord, KeyedCollection, json_type_name};

use crate::error::RenderError;

/// Flatten a keyed collection into a list of records.
///
/// Each record gets its key written under `key_field`, replacing any value
/// already there. Order follows the collection. A value that is not an
/// object is passed through unchanged so the list processor reports it
/// against its position.
#[must_use]
pub fn to_records(collection: KeyedCollection, key_field: &str) -> Vec<Value> {
    collection
        .into_iter()
        .map(|(key, fields)| match fields {
            Value::Object(mut record) => {
                record.insert(key_field.to_owned(), Value::String(key));
                Value::Object(record)
            }
            other => other,
        })
        .collect()
}

/// Rebuild a keyed collection from rendered records.
///
/// Accepts either a list of records or a map whose values are records. The
/// key field is moved out of each record and becomes its key. A later
/// record with the same key replaces the earlier one.
pub fn from_records(rendered: Value, key_field: &str) -> Result<KeyedCollection, RenderError> {
    let records: Vec<Value> = match rendered {
        Value::Array(records) => records,
        Value::Object(map) => map.into_iter().map(|(_, record)| record).collect(),
        other => {
            return Err(RenderError::UnexpectedOutput {
                actual: json_type_name(&other),
            });
        }
    };

    let mut collection = KeyedCollection::with_capacity(records.len());
    for (position, record) in records.into_iter().enumerate() {
        let mut record = match record {
            Value::Object(record) => record,
            other => {
                return Err(RenderError::NotARecord {
                    position,
                    actual: json_type_name(&other),
                });
            }
        };
        let key = take_key(&mut record, key_field, position)?;
        collection.insert(key, Value::Object(record));
    }
    Ok(collection)
}

/// Remove the key field from a record and convert it to an object key.
fn take_key(
    record: &mut ItemRecord,
    key_field: &str,
    position: usize,
) -> Result<String, RenderError> {
    // shift_remove keeps the remaining fields in their rendered order.
    let value = record
        .shift_remove(key_field)
        .ok_or_else(|| RenderError::MissingKey {
            position,
            key_field: key_field.to_owned(),
        })?;
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(RenderError::UnsupportedKey {
            position,
            actual: json_type_name(&other),
        }),
    }
}
