//! Collection shapes exchanged with callers and list processors.

use serde_json::{Map, Value};

/// External shape: key to item fields, in wire order.
///
/// Iteration order follows the order keys appeared in the input document
/// (`serde_json` is built with `preserve_order`).
pub type KeyedCollection = Map<String, Value>;

/// Internal shape of one item: field name to value.
///
/// After inbound reshaping a record always holds its key under the
/// configured key field.
pub type ItemRecord = Map<String, Value>;

/// Returns the name used for a JSON value's type in error messages.
///
/// # Examples
///
/// ```
/// use keyedlist_model::json_type_name;
/// use serde_json::json;
///
/// assert_eq!(json_type_name(&json!([1, 2])), "list");
/// assert_eq!(json_type_name(&json!({"a": 1})), "dict");
/// assert_eq!(json_type_name(&json!(1.5)), "float");
/// ```
#[must_use]
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
