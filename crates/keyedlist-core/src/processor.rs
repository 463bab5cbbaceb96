//! List processors.
//!
//! An [`ItemListProcessor`] validates and renders a homogeneous list of
//! items. [`KeyedTransform`](crate::KeyedTransform) delegates to one after
//! reshaping a keyed collection into a list.

use serde_json::Value;
use tracing::trace;

use keyedlist_model::{
    ErrorDetail, ErrorTree, ValidationError, ValidationErrorCode, json_type_name,
};

use crate::config::ListOptions;
use crate::error::ConfigError;
use crate::schema::ItemSchema;

/// Validation and rendering of a list of items.
pub trait ItemListProcessor {
    /// Validated item type.
    type Item;

    /// Key field declared by the item schema, if any.
    fn declared_key_field(&self) -> Option<&str>;

    /// Length rules this processor applies.
    fn list_options(&self) -> ListOptions;

    /// Whether an empty list is accepted.
    fn allow_empty(&self) -> bool {
        self.list_options().allow_empty
    }

    /// Validate a list of records into items.
    fn parse(&self, data: Value) -> Result<Vec<Self::Item>, ValidationError>;

    /// Render items into a JSON list of records.
    fn render(&self, items: &[Self::Item]) -> Result<Value, ValidationError>;
}

/// Default [`ItemListProcessor`]: applies [`ListOptions`] to the list and an
/// [`ItemSchema`] to each element.
///
/// Element errors are collected by position. Positions that validated hold
/// an empty entry so the error body lines up with the input.
#[derive(Debug, Clone)]
pub struct SchemaListProcessor<S> {
    schema: S,
    options: ListOptions,
}

impl<S: ItemSchema> SchemaListProcessor<S> {
    /// Create a processor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLengthBounds`] if `min_length` exceeds
    /// `max_length`.
    pub fn new(schema: S, options: ListOptions) -> Result<Self, ConfigError> {
        if let (Some(min), Some(max)) = (options.min_length, options.max_length) {
            if min > max {
                return Err(ConfigError::InvalidLengthBounds { min, max });
            }
        }
        Ok(Self { schema, options })
    }

    /// The item schema.
    #[must_use]
    pub fn schema(&self) -> &S {
        &self.schema
    }

    /// The list options.
    #[must_use]
    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    fn check_length(&self, len: usize) -> Result<(), ValidationError> {
        if !self.options.allow_empty && len == 0 {
            return Err(ValidationError::non_field(
                ValidationErrorCode::Empty,
                "This list may not be empty.",
            ));
        }
        if let Some(min) = self.options.min_length {
            if len < min {
                return Err(ValidationError::non_field(
                    ValidationErrorCode::MinLength,
                    format!("Ensure this field has at least {min} elements."),
                ));
            }
        }
        if let Some(max) = self.options.max_length {
            if len > max {
                return Err(ValidationError::non_field(
                    ValidationErrorCode::MaxLength,
                    format!("Ensure this field has no more than {max} elements."),
                ));
            }
        }
        Ok(())
    }
}

impl<S: ItemSchema> ItemListProcessor for SchemaListProcessor<S> {
    type Item = S::Item;

    fn declared_key_field(&self) -> Option<&str> {
        self.schema.key_field()
    }

    fn list_options(&self) -> ListOptions {
        self.options
    }

    fn parse(&self, data: Value) -> Result<Vec<S::Item>, ValidationError> {
        let elements = match data {
            Value::Array(elements) => elements,
            other => {
                return Err(ValidationError::non_field(
                    ValidationErrorCode::NotAList,
                    format!(
                        "Expected a list of items but got type \"{}\".",
                        json_type_name(&other)
                    ),
                ));
            }
        };
        self.check_length(elements.len())?;

        let mut items = Vec::with_capacity(elements.len());
        let mut errors = Vec::with_capacity(elements.len());
        let mut failed = false;

        for (position, element) in elements.into_iter().enumerate() {
            let outcome = match element {
                Value::Object(record) => self.schema.validate(record),
                other => Err(ErrorTree::non_field(ErrorDetail::new(
                    ValidationErrorCode::Invalid,
                    format!(
                        "Invalid data. Expected a dictionary, but got {}.",
                        json_type_name(&other)
                    ),
                ))),
            };
            match outcome {
                Ok(item) => {
                    items.push(item);
                    errors.push(ErrorTree::empty());
                }
                Err(tree) => {
                    trace!(position, "list element rejected");
                    failed = true;
                    errors.push(tree);
                }
            }
        }

        if failed {
            return Err(ValidationError::new(ErrorTree::Sequence(errors)));
        }
        Ok(items)
    }

    fn render(&self, items: &[S::Item]) -> Result<Value, ValidationError> {
        let mut records = Vec::with_capacity(items.len());
        let mut errors = Vec::with_capacity(items.len());
        let mut failed = false;

        for item in items {
            match self.schema.to_record(item) {
                Ok(record) => {
                    records.push(Value::Object(record));
                    errors.push(ErrorTree::empty());
                }
                Err(tree) => {
                    failed = true;
                    errors.push(tree);
                }
            }
        }

        if failed {
            return Err(ValidationError::new(ErrorTree::Sequence(errors)));
        }
        Ok(Value::Array(records))
    }
}
