//! Construction and configuration.

#[cfg(test)]
mod tests {
    use keyedlist_core::{
        ConfigError, KeyedListConfig, KeyedTransform, ListOptions, SchemaListProcessor, SerdeSchema,
    };

    use crate::{Listener, listener_transform};

    #[test]
    fn test_should_fail_without_key_field() {
        let processor =
            SchemaListProcessor::new(SerdeSchema::<Listener>::new(), ListOptions::default())
                .expect("valid options");
        let err = KeyedTransform::new(processor, &KeyedListConfig::default()).unwrap_err();
        assert_eq!(err, ConfigError::MissingKeyField);
    }

    #[test]
    fn test_should_fail_when_processor_ignores_configured_rules() {
        let config = KeyedListConfig::builder().allow_empty(false).build();
        let schema = SerdeSchema::<Listener>::new().with_key_field("name");
        let processor =
            SchemaListProcessor::new(schema, ListOptions::default()).expect("valid options");
        let err = KeyedTransform::new(processor, &config).unwrap_err();
        assert!(matches!(err, ConfigError::ListOptionsMismatch { .. }));
    }

    #[test]
    fn test_should_fail_on_inverted_bounds() {
        let config = KeyedListConfig::builder()
            .min_length(Some(4))
            .max_length(Some(2))
            .build();
        let err = listener_transform(&config).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::InvalidLengthBounds { min: 4, max: 2 })
        );
    }

    #[test]
    fn test_should_load_config_from_json() -> anyhow::Result<()> {
        let config: KeyedListConfig = serde_json::from_str(
            r#"{"keyField": "name", "strictShape": false, "allowEmpty": false,
                "minLength": 1, "maxLength": 10}"#,
        )?;

        let transform = listener_transform(&config)?;
        assert_eq!(transform.key_field(), "name");
        assert!(!transform.strict_shape());
        assert_eq!(
            transform.processor().options(),
            &ListOptions {
                allow_empty: false,
                min_length: Some(1),
                max_length: Some(10),
            }
        );
        Ok(())
    }

    #[test]
    fn test_should_load_config_from_env() -> anyhow::Result<()> {
        let config = KeyedListConfig::from_env();
        let config = KeyedListConfig {
            key_field: config.key_field.or_else(|| Some("name".to_owned())),
            min_length: None,
            max_length: None,
            ..config
        };
        let transform = listener_transform(&config)?;
        assert!(!transform.key_field().is_empty());
        Ok(())
    }
}
