//! Query-building collaborator.
//!
//! Filters never execute anything: they register joins on a
//! [`QueryBuilder`] owned by the listing infrastructure. [`SelectQuery`] is
//! the in-crate builder used by [`crate::FilterPipeline`] and by tests.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::TablesConfig;
use crate::error::{Error, Result};
use crate::quoting::Quoter;
use crate::segment::ClassId;
use crate::table::TableResolver;

/// Type of SQL JOIN operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JoinType {
    /// INNER JOIN.
    #[default]
    Inner,
    /// LEFT JOIN.
    Left,
}

impl JoinType {
    /// SQL keyword for this join type.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
        }
    }
}

/// A join registered on a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinClause {
    /// Type of join.
    pub join_type: JoinType,
    /// Alias the joined table is known under.
    pub alias: String,
    /// Joined table.
    pub table: String,
    /// ON condition, already quoted.
    pub condition: String,
    /// Column of the joined table to project. Empty for filter-only joins.
    pub result_alias: String,
}

/// Receives the joins a filter wants on the base query.
pub trait QueryBuilder {
    /// Registers an INNER JOIN of `table AS alias ON condition`.
    fn add_join(
        &mut self,
        alias: &str,
        table: &str,
        condition: &str,
        result_alias: &str,
    ) -> Result<()>;

    /// Registers all joins of one filter, or none of them.
    ///
    /// The default forwards to [`Self::add_join`] one join at a time. A
    /// builder whose `add_join` can reject a join must override this and
    /// check the whole batch first, otherwise a rejected join leaves the
    /// earlier ones of the batch on the query.
    fn add_joins(&mut self, joins: &[JoinClause]) -> Result<()> {
        for join in joins {
            self.add_join(&join.alias, &join.table, &join.condition, &join.result_alias)?;
        }
        Ok(())
    }
}

/// Minimal SELECT builder over one base table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    base_table: String,
    joins: Vec<JoinClause>,
    predicates: Vec<String>,
}

impl SelectQuery {
    /// Creates `SELECT <base_table>.* FROM <base_table>`.
    #[must_use]
    pub fn new(base_table: impl Into<String>) -> Self {
        Self {
            base_table: base_table.into(),
            joins: Vec::new(),
            predicates: Vec::new(),
        }
    }

    /// Adds a WHERE predicate, ANDed with the existing ones.
    pub fn and_where(&mut self, predicate: impl Into<String>) -> &mut Self {
        self.predicates.push(predicate.into());
        self
    }

    /// Base table of the query.
    #[must_use]
    pub fn base_table(&self) -> &str {
        &self.base_table
    }

    /// Joins in registration order.
    #[must_use]
    pub fn joins(&self) -> &[JoinClause] {
        &self.joins
    }

    /// Looks up a join by alias.
    #[must_use]
    pub fn join(&self, alias: &str) -> Option<&JoinClause> {
        self.joins.iter().find(|j| j.alias == alias)
    }

    /// Renders the query as SQL text.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut columns = vec![format!("{}.*", self.base_table)];
        columns.extend(
            self.joins
                .iter()
                .filter(|j| !j.result_alias.is_empty())
                .map(|j| format!("{}.{}", j.alias, j.result_alias)),
        );

        let mut sql = format!("SELECT {} FROM {}", columns.join(", "), self.base_table);
        for join in &self.joins {
            sql.push_str(&format!(
                " {} {} AS {} ON {}",
                join.join_type.keyword(),
                join.table,
                join.alias,
                join.condition
            ));
        }
        if !self.predicates.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.predicates.join(" AND "));
        }
        sql
    }
}

impl SelectQuery {
    fn check_alias(&self, alias: &str) -> Result<()> {
        if alias == self.base_table || self.join(alias).is_some() {
            return Err(Error::Query(format!(
                "alias '{alias}' is already used in query on '{}'",
                self.base_table
            )));
        }
        Ok(())
    }
}

impl QueryBuilder for SelectQuery {
    fn add_join(
        &mut self,
        alias: &str,
        table: &str,
        condition: &str,
        result_alias: &str,
    ) -> Result<()> {
        self.check_alias(alias)?;

        self.joins.push(JoinClause {
            join_type: JoinType::Inner,
            alias: alias.to_string(),
            table: table.to_string(),
            condition: condition.to_string(),
            result_alias: result_alias.to_string(),
        });
        Ok(())
    }

    /// Keeps each clause's join type. Nothing is registered if any alias clashes.
    fn add_joins(&mut self, joins: &[JoinClause]) -> Result<()> {
        for (position, join) in joins.iter().enumerate() {
            self.check_alias(&join.alias)?;
            if joins[..position].iter().any(|j| j.alias == join.alias) {
                return Err(Error::Query(format!(
                    "alias '{}' appears twice in one batch",
                    join.alias
                )));
            }
        }

        self.joins.extend_from_slice(joins);
        Ok(())
    }
}

impl fmt::Display for SelectQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

/// The listing a filter is applied for.
///
/// Carries the listed class and lends the table resolver and quoting
/// collaborators to the filters for the duration of query creation.
pub struct Listing<'a> {
    class_id: ClassId,
    resolver: &'a dyn TableResolver,
    quoter: &'a dyn Quoter,
    relations_prefix: String,
    id_column: String,
}

impl<'a> Listing<'a> {
    /// Creates a listing with the default table layout.
    pub fn new(
        class_id: impl Into<ClassId>,
        resolver: &'a dyn TableResolver,
        quoter: &'a dyn Quoter,
    ) -> Self {
        let tables = TablesConfig::default();
        Self {
            class_id: class_id.into(),
            resolver,
            quoter,
            relations_prefix: tables.relations_prefix,
            id_column: tables.id_column,
        }
    }

    /// Uses the relations prefix and id column from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the table section does not validate.
    pub fn with_tables(mut self, config: &TablesConfig) -> Result<Self> {
        config.validate()?;
        self.relations_prefix.clone_from(&config.relations_prefix);
        self.id_column.clone_from(&config.id_column);
        Ok(self)
    }

    /// Class of the listed entities.
    #[must_use]
    pub fn class_id(&self) -> &ClassId {
        &self.class_id
    }

    /// Quoting collaborator.
    #[must_use]
    pub fn quoter(&self) -> &dyn Quoter {
        self.quoter
    }

    /// Id column of the base table.
    #[must_use]
    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    /// Resolves the entity table of the listed class.
    pub fn base_table(&self) -> Result<String> {
        self.resolver.resolve(&self.class_id, None)
    }

    /// Resolves the relations table of the listed class.
    pub fn relations_table(&self) -> Result<String> {
        self.resolver
            .resolve(&self.class_id, Some(&self.relations_prefix))
    }
}

impl fmt::Debug for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listing")
            .field("class_id", &self.class_id)
            .field("relations_prefix", &self.relations_prefix)
            .field("id_column", &self.id_column)
            .finish_non_exhaustive()
    }
}
