//! The keyed collection transform.
//!
//! [`KeyedTransform`] sits in front of an [`ItemListProcessor`]. Inbound, it
//! checks that the input is a non-empty object (when `strict_shape` is on),
//! flattens it into records carrying their key, and hands the list to the
//! processor. Outbound, it renders items through the processor and folds the
//! records back into a keyed collection.

use serde_json::Value;
use tracing::debug;

use keyedlist_model::{KeyedCollection, json_type_name};

use crate::bound::BoundKeyedList;
use crate::config::KeyedListConfig;
use crate::error::{ConfigError, KeyedListError, RenderError};
use crate::processor::ItemListProcessor;
use crate::reshape;

/// Per-call parse flags inherited from the enclosing serializer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseContext {
    /// Missing values are not errors (e.g. an HTTP `PATCH`).
    pub partial: bool,
    /// The collection is nested inside another serializer.
    pub has_parent: bool,
}

impl ParseContext {
    /// Context for a nested field of a partial update.
    #[must_use]
    pub fn partial_update() -> Self {
        Self {
            partial: true,
            has_parent: true,
        }
    }
}

/// Outcome of a successful parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed<T> {
    /// Validated value.
    Value(T),
    /// Nothing to apply; the field is treated as not provided.
    Skip,
}

impl<T> Parsed<T> {
    /// Whether the parse produced no value.
    #[must_use]
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip)
    }

    /// The validated value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Skip => None,
        }
    }

    /// Consume into the validated value, if any.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Skip => None,
        }
    }
}

/// Converts between `{key: {...fields...}}` and the record list an
/// [`ItemListProcessor`] works on.
///
/// Emptiness rules come from the processor ([`ItemListProcessor::allow_empty`]),
/// which must be built from [`KeyedListConfig::list_options`].
#[derive(Debug, Clone)]
pub struct KeyedTransform<P> {
    processor: P,
    key_field: String,
    strict_shape: bool,
}

impl<P: ItemListProcessor> KeyedTransform<P> {
    /// Create a transform around a list processor.
    ///
    /// The key field is taken from `config`, falling back to the one the
    /// item schema declares.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKeyField`] if neither names a non-empty
    /// key field, and [`ConfigError::ListOptionsMismatch`] if the processor
    /// applies list rules other than `config.list_options()`.
    pub fn new(processor: P, config: &KeyedListConfig) -> Result<Self, ConfigError> {
        let configured = config.list_options();
        let applied = processor.list_options();
        if configured != applied {
            return Err(ConfigError::ListOptionsMismatch {
                configured,
                processor: applied,
            });
        }

        let key_field = config
            .key_field
            .as_deref()
            .or_else(|| processor.declared_key_field())
            .filter(|field| !field.is_empty())
            .ok_or(ConfigError::MissingKeyField)?
            .to_owned();

        debug!(
            key_field = %key_field,
            strict_shape = config.strict_shape,
            "created keyed transform"
        );

        Ok(Self {
            processor,
            key_field,
            strict_shape: config.strict_shape,
        })
    }

    /// The field that carries each item's key.
    #[must_use]
    pub fn key_field(&self) -> &str {
        &self.key_field
    }

    /// Whether shape and emptiness are checked before delegating.
    #[must_use]
    pub fn strict_shape(&self) -> bool {
        self.strict_shape
    }

    /// The wrapped list processor.
    #[must_use]
    pub fn processor(&self) -> &P {
        &self.processor
    }

    /// Validate a keyed collection into items.
    ///
    /// With `strict_shape`, non-object input fails with
    /// [`KeyedListError::InvalidShape`], and an empty object (when the
    /// processor disallows empty lists) fails with
    /// [`KeyedListError::EmptyCollection`] unless `ctx` is a nested partial
    /// update, which yields [`Parsed::Skip`]. Without `strict_shape` the
    /// input reaches the processor as is and its errors surface instead. A
    /// JSON list is therefore parsed as plain records: no key field is
    /// added, so items lacking one later fail to render with
    /// [`RenderError::MissingKey`].
    pub fn parse(
        &self,
        data: Value,
        ctx: &ParseContext,
    ) -> Result<Parsed<Vec<P::Item>>, KeyedListError> {
        let collection = match data {
            Value::Object(collection) => collection,
            other if self.strict_shape => {
                return Err(KeyedListError::InvalidShape {
                    input_type: json_type_name(&other),
                });
            }
            other => {
                debug!(
                    input_type = json_type_name(&other),
                    "passing non-dict input to list processor"
                );
                return Ok(Parsed::Value(self.processor.parse(other)?));
            }
        };

        if self.strict_shape && collection.is_empty() && !self.processor.allow_empty() {
            if ctx.partial && ctx.has_parent {
                debug!("skipping empty keyed collection in partial update");
                return Ok(Parsed::Skip);
            }
            return Err(KeyedListError::EmptyCollection);
        }

        let records = reshape::to_records(collection, &self.key_field);
        debug!(
            key_field = %self.key_field,
            items = records.len(),
            "parsing keyed collection"
        );
        let items = self.processor.parse(Value::Array(records))?;
        Ok(Parsed::Value(items))
    }

    /// Render items into a keyed collection.
    ///
    /// The key field is moved out of each rendered record and becomes its
    /// key. Nothing is validated beyond what the processor does to render.
    pub fn render(&self, items: &[P::Item]) -> Result<KeyedCollection, RenderError> {
        let rendered = self.processor.render(items)?;
        let collection = reshape::from_records(rendered, &self.key_field)?;
        debug!(
            key_field = %self.key_field,
            items = collection.len(),
            "rendered keyed collection"
        );
        Ok(collection)
    }

    /// Bind input data for the `is_valid` / `validated_data` flow.
    #[must_use]
    pub fn bind(&self, data: Value, ctx: ParseContext) -> BoundKeyedList<'_, P> {
        BoundKeyedList::new(self, data, ctx)
    }
}
