//! Bound validation flow.
//!
//! A [`BoundKeyedList`] pairs a transform with one request's input and runs
//! the parse at most once:
//!
//! ```
//! use keyedlist_core::{KeyedListConfig, KeyedTransform, ParseContext, SchemaListProcessor, SerdeSchema};
//! use serde_json::{Value, json};
//!
//! let schema = SerdeSchema::<Value>::new().with_key_field("id");
//! let processor = SchemaListProcessor::new(schema, Default::default()).unwrap();
//! let transform = KeyedTransform::new(processor, &KeyedListConfig::default()).unwrap();
//!
//! let mut bound = transform.bind(json!({"a": {"x": 1}}), ParseContext::default());
//! assert!(bound.is_valid());
//! assert_eq!(bound.validated_data().unwrap()[0]["id"], "a");
//! assert!(bound.errors().is_none());
//! ```

use std::fmt;

use serde_json::Value;
use tracing::debug;

use keyedlist_model::ValidationError;

use crate::processor::ItemListProcessor;
use crate::transform::{KeyedTransform, ParseContext, Parsed};

/// Input bound to a transform, with the cached parse outcome.
pub struct BoundKeyedList<'a, P: ItemListProcessor> {
    transform: &'a KeyedTransform<P>,
    initial: Value,
    ctx: ParseContext,
    outcome: Option<Result<Parsed<Vec<P::Item>>, ValidationError>>,
}

impl<'a, P: ItemListProcessor> BoundKeyedList<'a, P> {
    pub(crate) fn new(
        transform: &'a KeyedTransform<P>,
        initial: Value,
        ctx: ParseContext,
    ) -> Self {
        Self {
            transform,
            initial,
            ctx,
            outcome: None,
        }
    }

    /// The input exactly as bound.
    #[must_use]
    pub fn initial_data(&self) -> &Value {
        &self.initial
    }

    /// Run validation (once) and report whether it passed.
    pub fn is_valid(&mut self) -> bool {
        self.run().is_ok()
    }

    /// Run validation (once), returning the outcome or the errors.
    pub fn validate(&mut self) -> Result<&Parsed<Vec<P::Item>>, &ValidationError> {
        self.run().as_ref()
    }

    /// Validated items, if validation ran, passed, and produced a value.
    #[must_use]
    pub fn validated_data(&self) -> Option<&[P::Item]> {
        match &self.outcome {
            Some(Ok(Parsed::Value(items))) => Some(items),
            _ => None,
        }
    }

    /// Errors, if validation ran and failed.
    #[must_use]
    pub fn errors(&self) -> Option<&ValidationError> {
        match &self.outcome {
            Some(Err(e)) => Some(e),
            _ => None,
        }
    }

    fn run(&mut self) -> &Result<Parsed<Vec<P::Item>>, ValidationError> {
        let transform = self.transform;
        let initial = &self.initial;
        let ctx = self.ctx;
        self.outcome.get_or_insert_with(|| {
            let outcome = transform
                .parse(initial.clone(), &ctx)
                .map_err(ValidationError::from);
            if let Err(e) = &outcome {
                debug!(error = %e, "keyed collection failed validation");
            }
            outcome
        })
    }
}

impl<P: ItemListProcessor> fmt::Debug for BoundKeyedList<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundKeyedList")
            .field("key_field", &self.transform.key_field())
            .field("initial", &self.initial)
            .field("ctx", &self.ctx)
            .field("validated", &self.outcome.is_some())
            .finish_non_exhaustive()
    }
}
