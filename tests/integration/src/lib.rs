//! Integration tests for keyed list serialization.
//!
//! Exercises the public API end to end with two item schemas: a serde-derived
//! [`Listener`] and a hand-written [`QuotaSchema`] that reports per-field
//! errors.
//!
//! Run them with:
//! ```text
//! cargo test -p keyedlist-integration
//! ```

use std::sync::Once;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use keyedlist_core::{
    ItemSchema, KeyedListConfig, KeyedTransform, SchemaListProcessor, SerdeSchema,
};
use keyedlist_model::{ErrorDetail, ErrorTree, ItemRecord, ValidationErrorCode};

static INIT: Once = Once::new();

/// Initialize tracing (once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Transport protocol of a listener.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// TCP.
    #[default]
    Tcp,
    /// UDP.
    Udp,
}

/// A named network listener, keyed by `name` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listener {
    /// Listener name.
    pub name: String,
    /// Port number.
    pub port: u16,
    /// Transport protocol.
    #[serde(default)]
    pub protocol: Protocol,
    /// TLS certificate reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_cert: Option<String>,
}

/// Transform over [`Listener`] items.
pub type ListenerTransform = KeyedTransform<SchemaListProcessor<SerdeSchema<Listener>>>;

/// Build a listener transform; the schema declares `name` as the key field.
pub fn listener_transform(config: &KeyedListConfig) -> anyhow::Result<ListenerTransform> {
    init_tracing();
    let schema = SerdeSchema::<Listener>::new().with_key_field("name");
    let processor = SchemaListProcessor::new(schema, config.list_options())?;
    Ok(KeyedTransform::new(processor, config)?)
}

/// A resource quota.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quota {
    /// Resource name.
    pub resource: String,
    /// Upper bound.
    pub limit: u64,
}

/// Hand-written schema for [`Quota`] with per-field errors.
#[derive(Debug, Clone, Default)]
pub struct QuotaSchema;

impl ItemSchema for QuotaSchema {
    type Item = Quota;

    fn key_field(&self) -> Option<&str> {
        Some("resource")
    }

    fn validate(&self, record: ItemRecord) -> Result<Quota, ErrorTree> {
        let resource = record
            .get("resource")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        let limit = match record.get("limit") {
            None => {
                return Err(ErrorTree::field(
                    "limit",
                    ErrorDetail::new(ValidationErrorCode::Required, "This field is required."),
                ));
            }
            Some(Value::Null) => {
                return Err(ErrorTree::field(
                    "limit",
                    ErrorDetail::new(ValidationErrorCode::Null, "This field may not be null."),
                ));
            }
            Some(v) => v.as_u64().ok_or_else(|| {
                ErrorTree::field(
                    "limit",
                    ErrorDetail::new(ValidationErrorCode::Invalid, "A valid integer is required."),
                )
            })?,
        };
        Ok(Quota { resource, limit })
    }

    fn to_record(&self, item: &Quota) -> Result<ItemRecord, ErrorTree> {
        let mut record = ItemRecord::new();
        record.insert("resource".to_owned(), Value::String(item.resource.clone()));
        record.insert("limit".to_owned(), Value::from(item.limit));
        Ok(record)
    }
}

/// Transform over [`Quota`] items.
pub type QuotaTransform = KeyedTransform<SchemaListProcessor<QuotaSchema>>;

/// Build a quota transform.
pub fn quota_transform(config: &KeyedListConfig) -> anyhow::Result<QuotaTransform> {
    init_tracing();
    let processor = SchemaListProcessor::new(QuotaSchema, config.list_options())?;
    Ok(KeyedTransform::new(processor, config)?)
}

mod test_config;
mod test_partial;
