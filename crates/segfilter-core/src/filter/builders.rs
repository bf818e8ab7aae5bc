//! Construction and validation of segment filters.

use indexmap::IndexMap;
use tracing::{debug, warn};

use super::{CombinationMode, SegmentFilter, DEFAULT_RELATION_FIELD_NAMES};
use crate::config::SegFilterConfig;
use crate::error::{Error, Result};
use crate::segment::{SegmentGroup, SegmentReference};
use crate::sequence::{global_sequence, FilterIdentifier, FilterSequence};

impl SegmentFilter {
    /// Creates an ANY-OF filter numbered from the process-wide sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCombination`] if `group` is set and a segment
    /// belongs to a different group.
    pub fn new<I>(segments: I, group: Option<SegmentGroup>) -> Result<Self>
    where
        I: IntoIterator<Item = SegmentReference>,
    {
        Self::with_sequence(segments, group, global_sequence())
    }

    /// Creates an ANY-OF filter numbered from `sequence`.
    pub fn with_sequence<I>(
        segments: I,
        group: Option<SegmentGroup>,
        sequence: &dyn FilterSequence,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = SegmentReference>,
    {
        let identifier = FilterIdentifier::allocate(group.map(|g| g.id), sequence);
        let relation_field_names = DEFAULT_RELATION_FIELD_NAMES
            .iter()
            .map(|name| (*name).to_string())
            .collect();

        Self::assemble(identifier, group, relation_field_names, segments)
    }

    /// Creates an ANY-OF filter using identifier format and relation names from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `config` does not validate; no identifier
    /// is allocated in that case. Otherwise fails like [`Self::new`].
    pub fn from_config<I>(
        segments: I,
        group: Option<SegmentGroup>,
        config: &SegFilterConfig,
        sequence: &dyn FilterSequence,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = SegmentReference>,
    {
        config.validate()?;

        let identifier = FilterIdentifier::allocate_with(
            &config.identifier.prefix,
            &config.identifier.default_group,
            group.map(|g| g.id),
            sequence,
        );

        Self::assemble(
            identifier,
            group,
            config.relations.field_names.clone(),
            segments,
        )
    }

    fn assemble<I>(
        identifier: FilterIdentifier,
        group: Option<SegmentGroup>,
        relation_field_names: Vec<String>,
        segments: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = SegmentReference>,
    {
        let mut filter = Self {
            identifier,
            mode: CombinationMode::default(),
            group,
            segments: IndexMap::new(),
            relation_field_names,
        };

        for segment in segments {
            filter.add_segment(segment)?;
        }

        debug!(
            identifier = %filter.identifier,
            group = ?filter.group.map(|g| g.id.0),
            segments = filter.segments.len(),
            "segment filter created"
        );

        Ok(filter)
    }

    /// Adds a segment. Adding an id twice overwrites the first entry in place.
    fn add_segment(&mut self, segment: SegmentReference) -> Result<&mut Self> {
        if let (Some(own), Some(bound)) = (segment.group, self.group) {
            if own != bound.id {
                warn!(
                    identifier = %self.identifier,
                    segment = segment.id.0,
                    expected_group = bound.id.0,
                    actual_group = own.0,
                    "segment rejected: group mismatch"
                );
                return Err(Error::InvalidCombination {
                    segment: segment.id,
                    expected_group: bound.id,
                    actual_group: own,
                });
            }
        }

        self.segments.insert(segment.id, segment);
        Ok(self)
    }
}
