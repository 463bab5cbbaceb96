//! Error types for keyed list construction, parsing, and rendering.
//!
//! [`KeyedListError`] converts into the wire-level
//! [`ValidationError`](keyedlist_model::ValidationError) through [`From`]:
//! shape errors land under the non-field key with their code, delegate
//! errors pass through untouched.
//!
//! ```
//! use keyedlist_core::error::KeyedListError;
//! use keyedlist_model::ValidationError;
//!
//! let err: ValidationError = KeyedListError::InvalidShape { input_type: "list" }.into();
//! assert_eq!(
//!     err.non_field_errors()[0].message,
//!     "Expected a dict of items but got type \"list\"."
//! );
//! ```

use keyedlist_model::{ValidationError, ValidationErrorCode};

use crate::config::ListOptions;

/// Invalid transform or processor configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Neither the configuration nor the item schema names a key field.
    #[error("a key field name must be configured or declared by the item schema")]
    MissingKeyField,

    /// Minimum length exceeds maximum length.
    #[error("min_length ({min}) must not exceed max_length ({max})")]
    InvalidLengthBounds {
        /// Configured minimum.
        min: usize,
        /// Configured maximum.
        max: usize,
    },

    /// The configured list rules differ from those the processor applies.
    #[error("configured list options {configured:?} do not match the processor's {processor:?}")]
    ListOptionsMismatch {
        /// Options derived from the transform configuration.
        configured: ListOptions,
        /// Options reported by the list processor.
        processor: ListOptions,
    },
}

/// Inbound failure of a keyed transform.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyedListError {
    /// Input was not a JSON object.
    #[error("Expected a dict of items but got type \"{input_type}\".")]
    InvalidShape {
        /// JSON type name of the rejected input.
        input_type: &'static str,
    },

    /// Input was an empty object and empty collections are disallowed.
    #[error("This dict may not be empty.")]
    EmptyCollection,

    /// The list processor rejected the reshaped items.
    #[error(transparent)]
    Delegate(#[from] ValidationError),
}

impl KeyedListError {
    /// The code reported for this error, if it has a single one.
    #[must_use]
    pub fn code(&self) -> Option<ValidationErrorCode> {
        match self {
            Self::InvalidShape { .. } => Some(ValidationErrorCode::NotADict),
            Self::EmptyCollection => Some(ValidationErrorCode::Empty),
            Self::Delegate(e) => e.code,
        }
    }
}

impl From<KeyedListError> for ValidationError {
    fn from(err: KeyedListError) -> Self {
        match err {
            KeyedListError::Delegate(e) => e,
            other => {
                let code = other.code().unwrap_or_default();
                ValidationError::non_field(code, other.to_string())
            }
        }
    }
}

/// Outbound failure while reshaping rendered records into a collection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// The list processor rejected an item while rendering it.
    #[error(transparent)]
    Delegate(#[from] ValidationError),

    /// The list processor produced something other than a list or map.
    #[error("rendered items must be a list or dict, got {actual}")]
    UnexpectedOutput {
        /// JSON type name of the processor output.
        actual: &'static str,
    },

    /// A rendered item is not a record.
    #[error("rendered item {position} is a {actual}, not a dict")]
    NotARecord {
        /// Position of the item in render order.
        position: usize,
        /// JSON type name of the item.
        actual: &'static str,
    },

    /// A rendered record lacks the key field.
    #[error("rendered item {position} has no '{key_field}' field")]
    MissingKey {
        /// Position of the item in render order.
        position: usize,
        /// Configured key field.
        key_field: String,
    },

    /// The key value cannot be used as an object key.
    #[error("rendered item {position} has a {actual} key, expected a scalar")]
    UnsupportedKey {
        /// Position of the item in render order.
        position: usize,
        /// JSON type name of the key value.
        actual: &'static str,
    },
}
