//! Query-creation pipeline.
//!
//! The listing infrastructure builds the base query, then hands it to every
//! registered [`OnCreateQueryFilter`] exactly once, in registration order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SegFilterConfig;
use crate::error::Result;
use crate::filter::{CombinationMode, SegmentFilter};
use crate::query::{Listing, QueryBuilder, SelectQuery};
use crate::segment::{SegmentGroup, SegmentReference};
use crate::sequence::{global_sequence, FilterSequence};

/// A filter that decorates the query while the listing creates it.
pub trait OnCreateQueryFilter: Send + Sync {
    /// Adds this filter's joins or predicates to `query`.
    fn apply_on_create_query(&self, listing: &Listing<'_>, query: &mut dyn QueryBuilder)
        -> Result<()>;
}

impl OnCreateQueryFilter for SegmentFilter {
    fn apply_on_create_query(
        &self,
        listing: &Listing<'_>,
        query: &mut dyn QueryBuilder,
    ) -> Result<()> {
        self.apply(query, listing)
    }
}

/// Ordered set of filters applied to a freshly created query.
#[derive(Default)]
pub struct FilterPipeline {
    filters: Vec<Box<dyn OnCreateQueryFilter>>,
}

impl FilterPipeline {
    /// Creates an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a filter.
    pub fn add_filter(&mut self, filter: impl OnCreateQueryFilter + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Builder form of [`Self::add_filter`].
    #[must_use]
    pub fn with_filter(mut self, filter: impl OnCreateQueryFilter + 'static) -> Self {
        self.add_filter(filter);
        self
    }

    /// Number of registered filters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns true if no filter is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Applies every filter to an existing query.
    ///
    /// Stops at the first failing filter.
    pub fn apply(&self, listing: &Listing<'_>, query: &mut dyn QueryBuilder) -> Result<()> {
        for filter in &self.filters {
            filter.apply_on_create_query(listing, query)?;
        }
        Ok(())
    }

    /// Creates the base query for `listing` and applies every filter to it.
    pub fn build(&self, listing: &Listing<'_>) -> Result<SelectQuery> {
        let mut query = SelectQuery::new(listing.base_table()?);
        self.apply(listing, &mut query)?;

        debug!(
            class_id = %listing.class_id(),
            filters = self.filters.len(),
            joins = query.joins().len(),
            "listing query created"
        );

        Ok(query)
    }
}

impl std::fmt::Debug for FilterPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterPipeline")
            .field("filters", &self.filters.len())
            .finish()
    }
}

/// Segment condition as submitted by a search form.
///
/// ```json
/// {"segments": [{"id": 5, "group": 3}, {"id": 7}], "group": {"id": 3}, "mode": "all_of"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentCondition {
    /// Segments to match.
    pub segments: Vec<SegmentReference>,
    /// Group the condition is bound to.
    #[serde(default)]
    pub group: Option<SegmentGroup>,
    /// Combination mode, ANY-OF when omitted.
    #[serde(default)]
    pub mode: CombinationMode,
    /// Overrides the configured relation field names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_field_names: Option<Vec<String>>,
}

impl SegmentCondition {
    /// Decodes a condition submitted as JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds the filter with default settings and the process-wide sequence.
    pub fn into_filter(self) -> Result<SegmentFilter> {
        self.into_filter_with(&SegFilterConfig::default(), global_sequence())
    }

    /// Builds the filter from `config`, numbered from `sequence`.
    pub fn into_filter_with(
        self,
        config: &SegFilterConfig,
        sequence: &dyn FilterSequence,
    ) -> Result<SegmentFilter> {
        let mut filter = SegmentFilter::from_config(self.segments, self.group, config, sequence)?
            .with_mode(self.mode);

        if let Some(names) = self.relation_field_names {
            filter.set_relation_field_names(names);
        }

        Ok(filter)
    }
}
