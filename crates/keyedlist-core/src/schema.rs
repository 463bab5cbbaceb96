//! Per-item schemas.
//!
//! An [`ItemSchema`] validates one record into a typed item and renders an
//! item back into a record. It also declares which field carries the item's
//! key in a keyed collection.

use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use keyedlist_model::{ErrorDetail, ErrorTree, ItemRecord, ValidationErrorCode, json_type_name};

/// Validation and rendering of a single item.
pub trait ItemSchema {
    /// Validated item type.
    type Item;

    /// Field that carries the item's key in a keyed collection, if declared.
    fn key_field(&self) -> Option<&str>;

    /// Validate a record into an item.
    fn validate(&self, record: ItemRecord) -> Result<Self::Item, ErrorTree>;

    /// Render an item into a record.
    fn to_record(&self, item: &Self::Item) -> Result<ItemRecord, ErrorTree>;
}

/// [`ItemSchema`] backed by serde derives on `T`.
///
/// A record that fails to deserialize is reported under the non-field key
/// with the `invalid` code.
pub struct SerdeSchema<T> {
    key_field: Option<String>,
    _item: PhantomData<fn() -> T>,
}

impl<T> SerdeSchema<T> {
    /// Create a schema without a declared key field.
    #[must_use]
    pub fn new() -> Self {
        Self {
            key_field: None,
            _item: PhantomData,
        }
    }

    /// Declare the key field.
    #[must_use]
    pub fn with_key_field(mut self, field: impl Into<String>) -> Self {
        self.key_field = Some(field.into());
        self
    }
}

impl<T> Default for SerdeSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SerdeSchema<T> {
    fn clone(&self) -> Self {
        Self {
            key_field: self.key_field.clone(),
            _item: PhantomData,
        }
    }
}

impl<T> fmt::Debug for SerdeSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerdeSchema")
            .field("item", &std::any::type_name::<T>())
            .field("key_field", &self.key_field)
            .finish()
    }
}

impl<T> ItemSchema for SerdeSchema<T>
where
    T: Serialize + DeserializeOwned,
{
    type Item = T;

    fn key_field(&self) -> Option<&str> {
        self.key_field.as_deref()
    }

    fn validate(&self, record: ItemRecord) -> Result<T, ErrorTree> {
        serde_json::from_value(Value::Object(record)).map_err(|e| {
            ErrorTree::non_field(ErrorDetail::new(ValidationErrorCode::Invalid, e.to_string()))
        })
    }

    fn to_record(&self, item: &T) -> Result<ItemRecord, ErrorTree> {
        let value = serde_json::to_value(item).map_err(|e| {
            ErrorTree::non_field(ErrorDetail::new(ValidationErrorCode::Invalid, e.to_string()))
        })?;
        match value {
            Value::Object(record) => Ok(record),
            other => Err(ErrorTree::non_field(ErrorDetail::new(
                ValidationErrorCode::Invalid,
                format!(
                    "Invalid data. Expected a dictionary, but got {}.",
                    json_type_name(&other)
                ),
            ))),
        }
    }
}
