//! Error types for `segfilter`.
//!
//! A single error type covers filter construction, collaborator failures
//! and configuration problems. Error codes follow the pattern `SEGF-XXX`.

use thiserror::Error;

use crate::segment::{ClassId, GroupId, SegmentId};

/// Result type alias for `segfilter` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or applying segment filters.
#[derive(Error, Debug)]
pub enum Error {
    /// A segment's own group conflicts with the filter's bound group (SEGF-001).
    #[error(
        "[SEGF-001] Segment {segment} does not belong to the defined segment group \
         (expected group {expected_group}, got {actual_group})"
    )]
    InvalidCombination {
        /// Offending segment.
        segment: SegmentId,
        /// Group the filter is bound to.
        expected_group: GroupId,
        /// Group the segment belongs to.
        actual_group: GroupId,
    },

    /// The table resolver has no table for this class id (SEGF-002).
    #[error("[SEGF-002] No table registered for class '{0}'")]
    UnresolvedTable(ClassId),

    /// Configuration error (SEGF-003).
    #[error("[SEGF-003] Configuration error: {0}")]
    Config(String),

    /// The query builder rejected a join or predicate (SEGF-004).
    #[error("[SEGF-004] Query error: {0}")]
    Query(String),

    /// A serialized filter condition could not be decoded (SEGF-005).
    #[error("[SEGF-005] Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Returns the error code (e.g., "SEGF-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidCombination { .. } => "SEGF-001",
            Self::UnresolvedTable(_) => "SEGF-002",
            Self::Config(_) => "SEGF-003",
            Self::Query(_) => "SEGF-004",
            Self::Serialization(_) => "SEGF-005",
        }
    }

    /// Returns true if retrying with the same input could succeed.
    ///
    /// An invalid segment combination is a caller bug and never recoverable.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidCombination { .. })
    }
}

impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
