//! Segment and segment group references.
//!
//! These are pre-resolved values handed over by the entity layer. The
//! filter engine never loads or persists them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a customer segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(pub u64);

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for SegmentId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Identifier of a segment group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub u64);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for GroupId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Class identifier of the entity being listed (e.g. the customer class).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(String);

impl ClassId {
    /// Creates a class id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw class id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ClassId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A segment as seen by the filter: its id and optionally its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentReference {
    /// Segment id.
    pub id: SegmentId,
    /// Group the segment belongs to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupId>,
}

impl SegmentReference {
    /// Creates a reference to an ungrouped segment.
    #[must_use]
    pub fn new(id: impl Into<SegmentId>) -> Self {
        Self {
            id: id.into(),
            group: None,
        }
    }

    /// Creates a reference to a segment inside `group`.
    #[must_use]
    pub fn in_group(id: impl Into<SegmentId>, group: impl Into<GroupId>) -> Self {
        Self {
            id: id.into(),
            group: Some(group.into()),
        }
    }
}

/// A segment group. Only its identity matters here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentGroup {
    /// Group id.
    pub id: GroupId,
}

impl SegmentGroup {
    /// Creates a group reference.
    #[must_use]
    pub fn new(id: impl Into<GroupId>) -> Self {
        Self { id: id.into() }
    }
}
