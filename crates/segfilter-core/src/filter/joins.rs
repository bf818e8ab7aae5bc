//! Join generation for segment filters.

use std::fmt::Write as _;

use tracing::{debug, trace};

use super::{CombinationMode, DestinationMatch, SegmentFilter};
use crate::error::{Error, Result};
use crate::query::{JoinClause, JoinType, Listing, QueryBuilder};
use crate::quoting::{QuotedList, SqlValue};

/// Tables and quoted relation names shared by every join of one `apply`.
struct JoinTarget {
    base_table: String,
    relations_table: String,
    id_column: String,
    relation_names: QuotedList,
}

impl SegmentFilter {
    /// Registers this filter's joins on `query`.
    ///
    /// An empty filter leaves the query untouched. All joins are computed
    /// first and handed to [`QueryBuilder::add_joins`] as one batch, so a
    /// resolution failure never leaves part of the filter on the query.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::UnresolvedTable`] from the table resolver and any
    /// error returned by the query builder. Returns [`Error::Query`] if the
    /// relation field names were overridden with an empty list.
    pub fn apply(&self, query: &mut dyn QueryBuilder, listing: &Listing<'_>) -> Result<()> {
        let joins = self.plan_joins(listing)?;
        if joins.is_empty() {
            return Ok(());
        }

        query.add_joins(&joins)
    }

    /// Computes the joins `apply` would register, in registration order.
    pub(crate) fn plan_joins(&self, listing: &Listing<'_>) -> Result<Vec<JoinClause>> {
        if self.segments.is_empty() {
            trace!(identifier = %self.identifier, "empty segment filter, query unchanged");
            return Ok(Vec::new());
        }

        if self.relation_field_names.is_empty() {
            return Err(Error::Query(format!(
                "segment filter '{}' has no relation field names to match",
                self.identifier
            )));
        }

        let quoter = listing.quoter();
        let names: Vec<SqlValue> = self
            .relation_field_names
            .iter()
            .map(|name| SqlValue::from(name.as_str()))
            .collect();
        let target = JoinTarget {
            base_table: listing.base_table()?,
            relations_table: listing.relations_table()?,
            id_column: listing.id_column().to_string(),
            relation_names: quoter.quote_list(&names),
        };

        let joins = match self.mode {
            CombinationMode::AnyOf => vec![self.any_of_join(&target, listing)],
            CombinationMode::AllOf => self.all_of_joins(&target, listing),
        };

        debug!(
            identifier = %self.identifier,
            mode = %self.mode,
            joins = joins.len(),
            "segment filter joins planned"
        );

        Ok(joins)
    }

    /// One join matching any of the segment ids.
    fn any_of_join(&self, target: &JoinTarget, listing: &Listing<'_>) -> JoinClause {
        let ids: Vec<SqlValue> = self.segment_ids().map(SqlValue::from).collect();
        let alias = format!("{}_{}", self.identifier, self.mode.alias_tag());

        emit_join(
            target,
            alias,
            &DestinationMatch::AnyOf(listing.quoter().quote_list(&ids)),
        )
    }

    /// One join per segment id; the row must survive all of them.
    fn all_of_joins(&self, target: &JoinTarget, listing: &Listing<'_>) -> Vec<JoinClause> {
        self.segment_ids()
            .enumerate()
            .map(|(index, id)| {
                let alias = format!("{}_{}_{}", self.identifier, self.mode.alias_tag(), index);
                let value = listing.quoter().quote(&SqlValue::from(id));
                emit_join(target, alias, &DestinationMatch::Exactly(value))
            })
            .collect()
    }
}

/// Builds the INNER JOIN of the relations table under `alias`.
fn emit_join(target: &JoinTarget, alias: String, destination: &DestinationMatch) -> JoinClause {
    // relation has one of our field names and points from the listed row
    let mut condition = format!(
        "{alias}.fieldname IN ({names}) AND {alias}.src_id = {base}.{id}",
        names = target.relation_names,
        base = target.base_table,
        id = target.id_column,
    );

    // Writing to a String cannot fail.
    let _ = match destination {
        DestinationMatch::AnyOf(ids) => write!(condition, " AND {alias}.dest_id IN ({ids})"),
        DestinationMatch::Exactly(id) => write!(condition, " AND {alias}.dest_id = {id}"),
    };

    debug!(alias = %alias, table = %target.relations_table, "segment join emitted");

    JoinClause {
        join_type: JoinType::Inner,
        alias,
        table: target.relations_table.clone(),
        condition,
        result_alias: String::new(),
    }
}
