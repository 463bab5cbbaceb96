//! Wire types for keyed list serialization.
//!
//! A keyed collection travels as a JSON object mapping each key to the
//! fields of one item. Internally the same data is an ordered list of item
//! records, each carrying its key under a designated field. This crate holds
//! both shapes plus the structured validation errors reported to callers.
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod types;

pub use error::{
    ErrorDetail, ErrorTree, NON_FIELD_ERRORS_KEY, ValidationError, ValidationErrorCode,
};
pub use types::{ItemRecord, KeyedCollection, json_type_name};
