//! Empty collections and partial updates.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use keyedlist_core::{KeyedListConfig, KeyedListError, ParseContext};

    use crate::listener_transform;

    fn non_empty(strict_shape: bool) -> KeyedListConfig {
        KeyedListConfig::builder()
            .allow_empty(false)
            .strict_shape(strict_shape)
            .build()
    }

    #[test]
    fn test_should_skip_empty_collection_in_nested_patch() -> anyhow::Result<()> {
        let transform = listener_transform(&non_empty(true))?;
        let mut bound = transform.bind(json!({}), ParseContext::partial_update());

        assert!(bound.is_valid());
        assert!(bound.validate().is_ok_and(|parsed| parsed.is_skip()));
        assert!(bound.validated_data().is_none());
        Ok(())
    }

    #[test]
    fn test_should_reject_empty_collection_in_top_level_patch() -> anyhow::Result<()> {
        let transform = listener_transform(&non_empty(true))?;
        let ctx = ParseContext {
            partial: true,
            has_parent: false,
        };

        let err = transform.parse(json!({}), &ctx).unwrap_err();
        assert_eq!(err, KeyedListError::EmptyCollection);
        Ok(())
    }

    #[test]
    fn test_should_reject_empty_collection_in_full_update() -> anyhow::Result<()> {
        let transform = listener_transform(&non_empty(true))?;
        let mut bound = transform.bind(json!({}), ParseContext::default());

        assert!(!bound.is_valid());
        assert_eq!(
            bound.errors().map(keyedlist_model::ValidationError::to_json),
            Some(json!({"non_field_errors": ["This dict may not be empty."]}))
        );
        Ok(())
    }

    #[test]
    fn test_should_not_skip_in_lenient_mode() -> anyhow::Result<()> {
        let transform = listener_transform(&non_empty(false))?;
        let mut bound = transform.bind(json!({}), ParseContext::partial_update());

        assert!(!bound.is_valid());
        assert_eq!(
            bound.errors().map(keyedlist_model::ValidationError::codes),
            Some(json!({"non_field_errors": ["empty"]}))
        );
        assert_eq!(
            bound.errors().unwrap().non_field_errors()[0].message,
            "This list may not be empty."
        );
        Ok(())
    }
}
