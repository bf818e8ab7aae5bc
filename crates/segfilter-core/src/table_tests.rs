//! Tests for table module

#[cfg(test)]
mod tests {
    use crate::config::TablesConfig;
    use crate::error::Error;
    use crate::segment::ClassId;
    use crate::table::*;

    #[test]
    fn test_resolve_with_default_prefix() {
        let resolver = PrefixTableResolver::new(["CUSTOMER"]);

        let table = resolver.resolve(&ClassId::new("CUSTOMER"), None).unwrap();

        assert_eq!(table, "object_CUSTOMER");
    }

    #[test]
    fn test_resolve_with_explicit_prefix() {
        let resolver = PrefixTableResolver::new(["CUSTOMER"]);

        let table = resolver
            .resolve(&ClassId::new("CUSTOMER"), Some("object_relations_"))
            .unwrap();

        assert_eq!(table, "object_relations_CUSTOMER");
    }

    #[test]
    fn test_unknown_class_is_unresolved() {
        // Arrange
        let resolver = PrefixTableResolver::new(["CUSTOMER"]);

        // Act
        let result = resolver.resolve(&ClassId::new("PRODUCT"), None);

        // Assert
        assert!(matches!(result, Err(Error::UnresolvedTable(c)) if c == ClassId::new("PRODUCT")));
    }

    #[test]
    fn test_register_and_config_prefix() {
        // Arrange
        let config = TablesConfig {
            object_prefix: "obj_".to_string(),
            ..TablesConfig::default()
        };
        let mut resolver = PrefixTableResolver::new(Vec::<ClassId>::new())
            .with_config(&config)
            .unwrap();

        // Act
        resolver.register("7");

        // Assert
        assert!(resolver.knows(&ClassId::new("7")));
        assert_eq!(resolver.resolve(&ClassId::new("7"), None).unwrap(), "obj_7");
    }

    #[test]
    fn test_config_with_invalid_prefix_is_rejected() {
        let config = TablesConfig {
            object_prefix: "object_; DROP TABLE x; --".to_string(),
            ..TablesConfig::default()
        };

        let result = PrefixTableResolver::new(["CUSTOMER"]).with_config(&config);

        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("tables.object_prefix")));
    }
}
