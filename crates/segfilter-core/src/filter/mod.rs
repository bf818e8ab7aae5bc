//! Segment membership filters.
//!
//! A [`SegmentFilter`] restricts a listing to entities related to a set of
//! segments through the relations table.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use segfilter_core::{CombinationMode, SegmentFilter, SegmentGroup, SegmentReference};
//!
//! // Customers in segment 5 or 7
//! let any = SegmentFilter::new(
//!     vec![SegmentReference::new(5), SegmentReference::new(7)],
//!     None,
//! )?;
//!
//! // Customers in both segments of group 3
//! let all = SegmentFilter::new(
//!     vec![SegmentReference::in_group(5, 3), SegmentReference::in_group(7, 3)],
//!     Some(SegmentGroup::new(3)),
//! )?
//! .with_mode(CombinationMode::AllOf);
//! ```
//!
//! ANY-OF adds a single join with `dest_id IN (...)`. ALL-OF adds one join
//! per segment with `dest_id = <id>`: every join is an INNER JOIN, so a row
//! survives only if each of them finds a relation.

mod builders;
mod joins;

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::quoting::{QuotedList, QuotedValue};
use crate::segment::{SegmentGroup, SegmentId, SegmentReference};
use crate::sequence::FilterIdentifier;

/// Relation field names matched when the caller does not override them.
pub const DEFAULT_RELATION_FIELD_NAMES: [&str; 2] = ["manualSegments", "calculatedSegments"];

/// How the segments of a filter are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombinationMode {
    /// Entity must be in at least one of the segments.
    #[default]
    #[serde(alias = "or")]
    AnyOf,
    /// Entity must be in every segment.
    #[serde(alias = "and")]
    AllOf,
}

impl CombinationMode {
    /// Tag appended to join aliases generated in this mode.
    #[must_use]
    pub const fn alias_tag(self) -> char {
        match self {
            Self::AnyOf => 'o',
            Self::AllOf => 'a',
        }
    }
}

impl fmt::Display for CombinationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnyOf => f.write_str("any_of"),
            Self::AllOf => f.write_str("all_of"),
        }
    }
}

/// Destination-id predicate of a generated join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinationMatch {
    /// `dest_id IN (...)`
    AnyOf(QuotedList),
    /// `dest_id = ...`
    Exactly(QuotedValue),
}

/// Filter restricting a listing to members of a set of segments.
#[derive(Debug, Clone)]
pub struct SegmentFilter {
    identifier: FilterIdentifier,
    mode: CombinationMode,
    group: Option<SegmentGroup>,
    segments: IndexMap<SegmentId, SegmentReference>,
    relation_field_names: Vec<String>,
}

impl SegmentFilter {
    /// Identifier namespacing this filter's join aliases.
    #[must_use]
    pub fn identifier(&self) -> &FilterIdentifier {
        &self.identifier
    }

    /// Combination mode.
    #[must_use]
    pub fn mode(&self) -> CombinationMode {
        self.mode
    }

    /// Group the filter is bound to.
    #[must_use]
    pub fn group(&self) -> Option<&SegmentGroup> {
        self.group.as_ref()
    }

    /// Segments keyed by id, in insertion order.
    #[must_use]
    pub fn segments(&self) -> &IndexMap<SegmentId, SegmentReference> {
        &self.segments
    }

    /// Segment ids in insertion order.
    pub fn segment_ids(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.segments.keys().copied()
    }

    /// Relation field names the joins match against.
    #[must_use]
    pub fn relation_field_names(&self) -> &[String] {
        &self.relation_field_names
    }

    /// Number of distinct segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the filter has no segment and therefore restricts nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Sets the combination mode.
    pub fn set_mode(&mut self, mode: CombinationMode) -> &mut Self {
        self.mode = mode;
        self
    }

    /// Builder form of [`Self::set_mode`].
    #[must_use]
    pub fn with_mode(mut self, mode: CombinationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replaces the relation field names matched by the joins.
    pub fn set_relation_field_names<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relation_field_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Builder form of [`Self::set_relation_field_names`].
    #[must_use]
    pub fn with_relation_field_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_relation_field_names(names);
        self
    }

    /// Number of joins `apply` registers for the current state.
    #[must_use]
    pub fn expected_join_count(&self) -> usize {
        match (self.mode, self.segments.len()) {
            (_, 0) => 0,
            (CombinationMode::AnyOf, _) => 1,
            (CombinationMode::AllOf, n) => n,
        }
    }
}
