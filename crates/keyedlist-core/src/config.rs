//! Keyed list configuration.
//!
//! Provides [`KeyedListConfig`] for the transform itself and [`ListOptions`]
//! for the list processor it wraps. Values can be loaded from environment
//! variables via [`KeyedListConfig::from_env`].

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Keyed transform configuration.
///
/// # Examples
///
/// ```
/// use keyedlist_core::config::KeyedListConfig;
///
/// let config = KeyedListConfig::builder()
///     .key_field(Some("id".into()))
///     .allow_empty(false)
///     .build();
/// assert!(config.strict_shape);
/// assert!(!config.list_options().allow_empty);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyedListConfig {
    /// Field that carries each item's key. Overrides the schema declaration.
    #[builder(default)]
    pub key_field: Option<String>,

    /// Reject non-object input and empty collections before delegating.
    #[builder(default = true)]
    pub strict_shape: bool,

    /// Whether an empty collection is accepted.
    #[builder(default = true)]
    pub allow_empty: bool,

    /// Minimum number of items, if any.
    #[builder(default)]
    pub min_length: Option<usize>,

    /// Maximum number of items, if any.
    #[builder(default)]
    pub max_length: Option<usize>,
}

impl Default for KeyedListConfig {
    fn default() -> Self {
        Self {
            key_field: None,
            strict_shape: true,
            allow_empty: true,
            min_length: None,
            max_length: None,
        }
    }
}

impl KeyedListConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `KEYED_LIST_FIELD` | *(unset, schema declaration used)* |
    /// | `KEYED_LIST_STRICT_SHAPE` | `true` |
    /// | `KEYED_LIST_ALLOW_EMPTY` | `true` |
    /// | `KEYED_LIST_MIN_LENGTH` | *(unset)* |
    /// | `KEYED_LIST_MAX_LENGTH` | *(unset)* |
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from `KEYED_LIST_*` values supplied by `lookup`.
    ///
    /// Unparsable lengths are ignored.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("KEYED_LIST_FIELD") {
            if !v.is_empty() {
                config.key_field = Some(v);
            }
        }
        if let Some(v) = lookup("KEYED_LIST_STRICT_SHAPE") {
            config.strict_shape = parse_bool(&v);
        }
        if let Some(v) = lookup("KEYED_LIST_ALLOW_EMPTY") {
            config.allow_empty = parse_bool(&v);
        }
        if let Some(n) = lookup("KEYED_LIST_MIN_LENGTH").and_then(|v| v.parse().ok()) {
            config.min_length = Some(n);
        }
        if let Some(n) = lookup("KEYED_LIST_MAX_LENGTH").and_then(|v| v.parse().ok()) {
            config.max_length = Some(n);
        }

        config
    }

    /// Options for the list processor this transform wraps.
    #[must_use]
    pub fn list_options(&self) -> ListOptions {
        ListOptions {
            allow_empty: self.allow_empty,
            min_length: self.min_length,
            max_length: self.max_length,
        }
    }
}

/// Length rules applied by a list processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase", default)]
pub struct ListOptions {
    /// Whether an empty list is accepted.
    #[builder(default = true)]
    pub allow_empty: bool,

    /// Minimum number of items, if any.
    #[builder(default)]
    pub min_length: Option<usize>,

    /// Maximum number of items, if any.
    #[builder(default)]
    pub max_length: Option<usize>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            allow_empty: true,
            min_length: None,
            max_length: None,
        }
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
