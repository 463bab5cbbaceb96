//! Structured validation errors.
//!
//! Errors mirror the shape of the data that failed: a list of messages for a
//! single value, a map of field name to errors for a record, and a positional
//! sequence for a list of records. Problems that do not belong to any one
//! field are reported under [`NON_FIELD_ERRORS_KEY`].
//!
//! The JSON body of an error keeps only the messages:
//!
//! ```json
//! {"non_field_errors": ["This dict may not be empty."]}
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Error key for problems not attached to a specific field.
pub const NON_FIELD_ERRORS_KEY: &str = "non_field_errors";

/// Well-known validation error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum ValidationErrorCode {
    /// Input was expected to be a keyed collection.
    NotADict,
    /// Input was expected to be a list of items.
    NotAList,
    /// Collection may not be empty.
    Empty,
    /// Fewer items than the configured minimum.
    MinLength,
    /// More items than the configured maximum.
    MaxLength,
    /// Generic malformed value.
    #[default]
    Invalid,
    /// A required field is missing.
    Required,
    /// A field may not be null.
    Null,
}

impl ValidationErrorCode {
    /// Returns the code string used in error payloads.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotADict => "not_a_dict",
            Self::NotAList => "not_a_list",
            Self::Empty => "empty",
            Self::MinLength => "min_length",
            Self::MaxLength => "max_length",
            Self::Invalid => "invalid",
            Self::Required => "required",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for ValidationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One error message with its machine-readable code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    /// Human-readable message.
    pub message: String,
    /// Error code, usually one of [`ValidationErrorCode`].
    pub code: String,
}

impl ErrorDetail {
    /// Create a detail with a well-known code.
    #[must_use]
    pub fn new(code: ValidationErrorCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.as_str().to_owned(),
        }
    }

    /// Create a detail with a schema-specific code.
    #[must_use]
    pub fn custom(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
        }
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Serialize for ErrorDetail {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.message)
    }
}

/// Nested error structure matching the shape of the rejected data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorTree {
    /// Messages for a single value.
    List(Vec<ErrorDetail>),
    /// Errors keyed by field name.
    Map(BTreeMap<String, ErrorTree>),
    /// Errors by position; valid positions hold an empty map.
    Sequence(Vec<ErrorTree>),
}

impl ErrorTree {
    /// An empty map, used for positions that validated cleanly.
    #[must_use]
    pub fn empty() -> Self {
        Self::Map(BTreeMap::new())
    }

    /// A map holding a single field's messages.
    #[must_use]
    pub fn field(name: impl Into<String>, detail: ErrorDetail) -> Self {
        let mut map = BTreeMap::new();
        map.insert(name.into(), Self::List(vec![detail]));
        Self::Map(map)
    }

    /// A map holding a single message under [`NON_FIELD_ERRORS_KEY`].
    #[must_use]
    pub fn non_field(detail: ErrorDetail) -> Self {
        Self::field(NON_FIELD_ERRORS_KEY, detail)
    }

    /// Whether the tree carries no messages at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::List(details) => details.is_empty(),
            Self::Map(map) => map.values().all(Self::is_empty),
            Self::Sequence(items) => items.iter().all(Self::is_empty),
        }
    }

    /// Messages under a field of a map node.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&ErrorTree> {
        match self {
            Self::Map(map) => map.get(field),
            _ => None,
        }
    }

    /// The node at a position of a sequence node.
    #[must_use]
    pub fn at(&self, position: usize) -> Option<&ErrorTree> {
        match self {
            Self::Sequence(items) => items.get(position),
            _ => None,
        }
    }

    /// The messages of a list node.
    #[must_use]
    pub fn details(&self) -> &[ErrorDetail] {
        match self {
            Self::List(details) => details,
            _ => &[],
        }
    }

    /// The same tree with codes in place of messages.
    #[must_use]
    pub fn codes(&self) -> Value {
        match self {
            Self::List(details) => details
                .iter()
                .map(|d| Value::String(d.code.clone()))
                .collect(),
            Self::Map(map) => Value::Object(
                map.iter()
                    .map(|(field, tree)| (field.clone(), tree.codes()))
                    .collect(),
            ),
            Self::Sequence(items) => items.iter().map(Self::codes).collect(),
        }
    }
}

impl Serialize for ErrorTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::List(details) => {
                let mut seq = serializer.serialize_seq(Some(details.len()))?;
                for detail in details {
                    seq.serialize_element(detail)?;
                }
                seq.end()
            }
            Self::Map(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (field, tree) in fields {
                    map.serialize_entry(field, tree)?;
                }
                map.end()
            }
            Self::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// A validation failure reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The structured error detail.
    pub detail: ErrorTree,
    /// Top-level code, when the failure has a single cause.
    pub code: Option<ValidationErrorCode>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self.to_json();
        match self.code {
            Some(code) => write!(f, "ValidationError({code}): {body}"),
            None => write!(f, "ValidationError: {body}"),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    /// Create an error from a detail tree.
    #[must_use]
    pub fn new(detail: ErrorTree) -> Self {
        Self { detail, code: None }
    }

    /// Create an error with a single message under [`NON_FIELD_ERRORS_KEY`].
    #[must_use]
    pub fn non_field(code: ValidationErrorCode, message: impl Into<String>) -> Self {
        Self {
            detail: ErrorTree::non_field(ErrorDetail::new(code, message)),
            code: Some(code),
        }
    }

    /// Set the top-level code.
    #[must_use]
    pub fn with_code(mut self, code: ValidationErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// The messages reported under [`NON_FIELD_ERRORS_KEY`], if any.
    #[must_use]
    pub fn non_field_errors(&self) -> &[ErrorDetail] {
        self.detail
            .get(NON_FIELD_ERRORS_KEY)
            .map_or(&[][..], ErrorTree::details)
    }

    /// The JSON error body.
    #[must_use]
    pub fn to_json(&self) -> Value {
        serde_json::to_value(&self.detail).unwrap_or(Value::Null)
    }

    /// The error body with codes in place of messages.
    #[must_use]
    pub fn codes(&self) -> Value {
        self.detail.codes()
    }

    /// HTTP status for responses carrying this error.
    #[must_use]
    pub fn status_code(&self) -> http::StatusCode {
        http::StatusCode::BAD_REQUEST
    }
}

/// Create a non-field [`ValidationError`] from a code and message.
///
/// # Examples
///
/// ```
/// use keyedlist_model::validation_error;
/// use keyedlist_model::error::ValidationErrorCode;
///
/// let err = validation_error!(Empty, "This dict may not be empty.");
/// assert_eq!(err.code, Some(ValidationErrorCode::Empty));
/// assert_eq!(err.non_field_errors()[0].message, "This dict may not be empty.");
/// ```
#[macro_export]
macro_rules! validation_error {
    ($code:ident, $msg:expr) => {
        $crate::error::ValidationError::non_field($crate::error::ValidationErrorCode::$code, $msg)
    };
}
