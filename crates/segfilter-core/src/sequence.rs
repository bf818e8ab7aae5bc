//! Filter identifier allocation.
//!
//! Every filter gets an identifier that prefixes all of its join aliases.
//! Uniqueness across filters that end up on the same query comes from a
//! monotonically increasing [`FilterSequence`]. The process-wide default
//! is [`global_sequence`]; callers that want request-scoped numbering can
//! inject their own [`AtomicSequence`].

use std::fmt;
use std::sync::OnceLock;

use crate::segment::GroupId;
use crate::sync::{Arc, AtomicU64, Ordering};

/// Default identifier prefix.
pub const DEFAULT_IDENTIFIER_PREFIX: &str = "fltr_seg";

/// Label used in place of a group id when the filter is not bound to a group.
pub const DEFAULT_GROUP_LABEL: &str = "default";

/// Source of monotonically increasing filter indexes.
///
/// Implementations must never hand out the same index twice, even when
/// called concurrently.
pub trait FilterSequence: Send + Sync {
    /// Returns the next index and advances the sequence.
    fn next_index(&self) -> u64;
}

/// Atomic counter starting at zero. Clones share the same counter.
#[derive(Clone)]
pub struct AtomicSequence {
    next: Arc<AtomicU64>,
}

impl AtomicSequence {
    /// Creates a sequence whose first index is zero.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Creates a sequence whose first index is `start`.
    #[must_use]
    pub fn starting_at(start: u64) -> Self {
        Self {
            next: Arc::new(AtomicU64::new(start)),
        }
    }

    /// Returns the index the next call to `next_index` will hand out.
    #[must_use]
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

impl Default for AtomicSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AtomicSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomicSequence")
            .field("next", &self.peek())
            .finish()
    }
}

impl FilterSequence for AtomicSequence {
    fn next_index(&self) -> u64 {
        // fetch_add is a single RMW, so concurrent callers never observe the same value.
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

static GLOBAL_SEQUENCE: OnceLock<AtomicSequence> = OnceLock::new();

/// Returns the process-wide sequence used by [`crate::SegmentFilter::new`].
///
/// Initialized to zero on first use and never reset.
pub fn global_sequence() -> &'static AtomicSequence {
    GLOBAL_SEQUENCE.get_or_init(AtomicSequence::new)
}

/// Namespace for the join aliases of one filter, e.g. `fltr_seg_12_3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterIdentifier {
    rendered: String,
    group: Option<GroupId>,
    index: u64,
}

impl FilterIdentifier {
    /// Allocates an identifier with the default prefix and group label.
    pub fn allocate(group: Option<GroupId>, sequence: &dyn FilterSequence) -> Self {
        Self::allocate_with(DEFAULT_IDENTIFIER_PREFIX, DEFAULT_GROUP_LABEL, group, sequence)
    }

    /// Allocates an identifier with a custom prefix and ungrouped label.
    ///
    /// Consumes exactly one index from `sequence`.
    pub fn allocate_with(
        prefix: &str,
        default_group_label: &str,
        group: Option<GroupId>,
        sequence: &dyn FilterSequence,
    ) -> Self {
        let index = sequence.next_index();
        let rendered = match group {
            Some(group) => format!("{prefix}_{group}_{index}"),
            None => format!("{prefix}_{default_group_label}_{index}"),
        };

        Self {
            rendered,
            group,
            index,
        }
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.rendered
    }

    /// Returns the sequence index this identifier was allocated with.
    #[must_use]
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Returns the group the identifier was namespaced with.
    #[must_use]
    pub fn group(&self) -> Option<GroupId> {
        self.group
    }
}

impl fmt::Display for FilterIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl AsRef<str> for FilterIdentifier {
    fn as_ref(&self) -> &str {
        &self.rendered
    }
}
