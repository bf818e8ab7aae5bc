//! # `segfilter` Core
//!
//! Segment membership filters for entity/relation query builders.
//!
//! A [`SegmentFilter`] turns "customer belongs to segment A or B" (ANY-OF)
//! or "customer belongs to A and B" (ALL-OF) into INNER JOINs against a
//! relations table and splices them into an externally built query.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use segfilter_core::{
//!     CombinationMode, Listing, MariaDbQuoter, PrefixTableResolver, SegmentFilter,
//!     SegmentReference, SelectQuery,
//! };
//!
//! let resolver = PrefixTableResolver::new(["CUSTOMER"]);
//! let quoter = MariaDbQuoter;
//! let listing = Listing::new("CUSTOMER", &resolver, &quoter);
//!
//! let filter = SegmentFilter::new(
//!     vec![SegmentReference::new(5), SegmentReference::new(7)],
//!     None,
//! )?
//! .with_mode(CombinationMode::AllOf);
//!
//! let mut query = SelectQuery::new(listing.base_table()?);
//! filter.apply(&mut query, &listing)?;
//! println!("{}", query.to_sql());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::uninlined_format_args)]

pub mod config;
pub mod error;
#[cfg(test)]
mod error_tests;
pub mod filter;
pub mod pipeline;
pub mod query;
#[cfg(test)]
mod query_tests;
pub mod quoting;
pub mod segment;
pub mod sequence;
#[cfg(test)]
mod sequence_tests;
pub mod sync;
pub mod table;
#[cfg(test)]
mod table_tests;

pub use config::{
    ConfigError, IdentifierConfig, LoggingConfig, RelationsConfig, SegFilterConfig, TablesConfig,
};
pub use error::{Error, Result};
pub use filter::{CombinationMode, DestinationMatch, SegmentFilter, DEFAULT_RELATION_FIELD_NAMES};
pub use pipeline::{FilterPipeline, OnCreateQueryFilter, SegmentCondition};
pub use query::{JoinClause, JoinType, Listing, QueryBuilder, SelectQuery};
pub use quoting::{MariaDbQuoter, QuotedList, QuotedValue, Quoter, SqlValue};
pub use segment::{ClassId, GroupId, SegmentGroup, SegmentId, SegmentReference};
pub use sequence::{global_sequence, AtomicSequence, FilterIdentifier, FilterSequence};
pub use table::{PrefixTableResolver, TableResolver};
