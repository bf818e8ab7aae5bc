//! Tests for query module

#[cfg(test)]
mod tests {
    use crate::config::TablesConfig;
    use crate::error::Error;
    use crate::query::*;
    use crate::quoting::MariaDbQuoter;
    use crate::table::PrefixTableResolver;

    // =========================================================================
    // SelectQuery
    // =========================================================================

    #[test]
    fn test_add_join_records_inner_join() {
        // Arrange
        let mut query = SelectQuery::new("object_CUSTOMER");

        // Act
        query
            .add_join("r", "object_relations_CUSTOMER", "r.src_id = object_CUSTOMER.o_id", "")
            .unwrap();

        // Assert
        let join = query.join("r").expect("join registered");
        assert_eq!(join.join_type, JoinType::Inner);
        assert_eq!(join.table, "object_relations_CUSTOMER");
        assert_eq!(join.condition, "r.src_id = object_CUSTOMER.o_id");
    }

    #[test]
    fn test_duplicate_alias_is_rejected() {
        // Arrange
        let mut query = SelectQuery::new("object_CUSTOMER");
        query.add_join("r", "t", "1 = 1", "").unwrap();

        // Act
        let result = query.add_join("r", "t", "1 = 1", "");

        // Assert
        assert!(matches!(result, Err(Error::Query(_))));
        assert_eq!(query.joins().len(), 1);
    }

    #[test]
    fn test_alias_equal_to_base_table_is_rejected() {
        let mut query = SelectQuery::new("object_CUSTOMER");

        let result = query.add_join("object_CUSTOMER", "t", "1 = 1", "");

        assert!(result.is_err());
    }

    #[test]
    fn test_to_sql_without_joins() {
        let query = SelectQuery::new("object_CUSTOMER");

        assert_eq!(query.to_sql(), "SELECT object_CUSTOMER.* FROM object_CUSTOMER");
    }

    #[test]
    fn test_to_sql_with_joins_and_predicates() {
        // Arrange
        let mut query = SelectQuery::new("object_CUSTOMER");
        query.and_where("object_CUSTOMER.active = 1");
        query.add_join("a", "rel", "a.x = 1", "").unwrap();
        query.add_join("b", "rel", "b.x = 2", "dest_id").unwrap();

        // Act
        let sql = query.to_string();

        // Assert
        assert_eq!(
            sql,
            "SELECT object_CUSTOMER.*, b.dest_id FROM object_CUSTOMER \
             INNER JOIN rel AS a ON a.x = 1 \
             INNER JOIN rel AS b ON b.x = 2 \
             WHERE object_CUSTOMER.active = 1"
        );
    }

    fn clause(join_type: JoinType, alias: &str) -> JoinClause {
        JoinClause {
            join_type,
            alias: alias.to_string(),
            table: "rel".to_string(),
            condition: format!("{alias}.x = 1"),
            result_alias: String::new(),
        }
    }

    #[test]
    fn test_add_joins_keeps_join_type() {
        // Arrange
        let mut query = SelectQuery::new("object_CUSTOMER");

        // Act
        query
            .add_joins(&[clause(JoinType::Inner, "a"), clause(JoinType::Left, "b")])
            .unwrap();

        // Assert
        assert_eq!(
            query.to_sql(),
            "SELECT object_CUSTOMER.* FROM object_CUSTOMER \
             INNER JOIN rel AS a ON a.x = 1 \
             LEFT JOIN rel AS b ON b.x = 1"
        );
    }

    #[test]
    fn test_add_joins_clash_registers_nothing() {
        // Arrange
        let mut query = SelectQuery::new("object_CUSTOMER");
        query.add_join("b", "t", "1 = 1", "").unwrap();

        // Act
        let result = query.add_joins(&[clause(JoinType::Inner, "a"), clause(JoinType::Inner, "b")]);

        // Assert
        assert!(matches!(result, Err(Error::Query(_))));
        assert_eq!(query.joins().len(), 1);
        assert!(query.join("a").is_none());
    }

    #[test]
    fn test_add_joins_rejects_alias_repeated_in_batch() {
        let mut query = SelectQuery::new("object_CUSTOMER");

        let result = query.add_joins(&[clause(JoinType::Inner, "a"), clause(JoinType::Left, "a")]);

        assert!(matches!(result, Err(Error::Query(msg)) if msg.contains("twice")));
        assert!(query.joins().is_empty());
    }

    #[test]
    fn test_join_type_keywords() {
        assert_eq!(JoinType::default(), JoinType::Inner);
        assert_eq!(JoinType::Inner.keyword(), "INNER JOIN");
        assert_eq!(JoinType::Left.keyword(), "LEFT JOIN");
    }

    // =========================================================================
    // Listing
    // =========================================================================

    #[test]
    fn test_listing_resolves_tables() {
        // Arrange
        let resolver = PrefixTableResolver::new(["CUSTOMER"]);
        let listing = Listing::new("CUSTOMER", &resolver, &MariaDbQuoter);

        // Act & Assert
        assert_eq!(listing.base_table().unwrap(), "object_CUSTOMER");
        assert_eq!(listing.relations_table().unwrap(), "object_relations_CUSTOMER");
        assert_eq!(listing.id_column(), "o_id");
        assert_eq!(listing.class_id().as_str(), "CUSTOMER");
    }

    #[test]
    fn test_listing_with_tables_config() {
        // Arrange
        let resolver = PrefixTableResolver::new(["CUSTOMER"]);
        let config = TablesConfig {
            relations_prefix: "rel_".to_string(),
            id_column: "id".to_string(),
            ..TablesConfig::default()
        };

        // Act
        let listing = Listing::new("CUSTOMER", &resolver, &MariaDbQuoter)
            .with_tables(&config)
            .unwrap();

        // Assert
        assert_eq!(listing.relations_table().unwrap(), "rel_CUSTOMER");
        assert_eq!(listing.id_column(), "id");
        assert!(format!("{listing:?}").contains("rel_"));
    }

    #[test]
    fn test_listing_rejects_invalid_tables_config() {
        let resolver = PrefixTableResolver::new(["CUSTOMER"]);
        let config = TablesConfig {
            id_column: "o_id OR 1=1".to_string(),
            ..TablesConfig::default()
        };

        let result = Listing::new("CUSTOMER", &resolver, &MariaDbQuoter).with_tables(&config);

        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("tables.id_column")));
    }
}
