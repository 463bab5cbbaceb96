//! Keyed collection transform for JSON APIs.
//!
//! [`KeyedTransform`] accepts a collection shaped as `{key: {...fields...}}`,
//! reshapes it into the list of records an [`ItemListProcessor`] validates,
//! and reverses the reshaping when rendering items back to the wire.
//!
//! ```
//! use keyedlist_core::{KeyedListConfig, KeyedTransform, ParseContext, SchemaListProcessor, SerdeSchema};
//! use serde::{Deserialize, Serialize};
//! use serde_json::json;
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct Port {
//!     name: String,
//!     number: u16,
//! }
//!
//! let schema = SerdeSchema::<Port>::new().with_key_field("name");
//! let processor = SchemaListProcessor::new(schema, Default::default()).unwrap();
//! let transform = KeyedTransform::new(processor, &KeyedListConfig::default()).unwrap();
//!
//! let ports = transform
//!     .parse(json!({"http": {"number": 80}}), &ParseContext::default())
//!     .unwrap()
//!     .into_value()
//!     .unwrap();
//! assert_eq!(ports[0].name, "http");
//!
//! let wire = transform.render(&ports).unwrap();
//! assert_eq!(serde_json::Value::Object(wire), json!({"http": {"number": 80}}));
//! ```
#![allow(clippy::module_name_repetitions)]

pub mod bound;
pub mod config;
pub mod error;
pub mod processor;
pub mod reshape;
pub mod schema;
pub mod transform;

pub use bound::BoundKeyedList;
pub use config::{KeyedListConfig, ListOptions};
pub use error::{ConfigError, KeyedListError, RenderError};
pub use processor::{ItemListProcessor, SchemaListProcessor};
pub use schema::{ItemSchema, SerdeSchema};
pub use transform::{KeyedTransform, ParseContext, Parsed};
