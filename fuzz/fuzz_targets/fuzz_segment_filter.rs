//! Fuzz target for segment filter construction and join generation.
//!
//! Arbitrary segments, groups, modes and relation field names must either
//! fail with a typed error or produce exactly `expected_join_count` joins
//! with distinct aliases.

#![no_main]

use std::collections::HashSet;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use segfilter_core::{
    AtomicSequence, CombinationMode, Listing, MariaDbQuoter, PrefixTableResolver, SegmentFilter,
    SegmentGroup, SegmentReference, SelectQuery,
};

/// Cap on segments per input to keep iterations fast.
const MAX_SEGMENTS: usize = 64;

#[derive(Debug, Arbitrary)]
struct Input {
    segments: Vec<(u64, Option<u8>)>,
    group: Option<u8>,
    all_of: bool,
    relation_field_names: Option<Vec<String>>,
}

fuzz_target!(|input: Input| {
    let seq = AtomicSequence::new();
    let refs = input
        .segments
        .iter()
        .take(MAX_SEGMENTS)
        .map(|(id, group)| match group {
            Some(g) => SegmentReference::in_group(*id, u64::from(*g)),
            None => SegmentReference::new(*id),
        });
    let group = input.group.map(|g| SegmentGroup::new(u64::from(g)));

    let Ok(mut filter) = SegmentFilter::with_sequence(refs, group, &seq) else {
        return;
    };
    if input.all_of {
        filter.set_mode(CombinationMode::AllOf);
    }
    if let Some(names) = input.relation_field_names {
        filter.set_relation_field_names(names);
    }

    let resolver = PrefixTableResolver::new(["CUSTOMER"]);
    let listing = Listing::new("CUSTOMER", &resolver, &MariaDbQuoter);
    let mut query = SelectQuery::new("object_CUSTOMER");

    match filter.apply(&mut query, &listing) {
        Ok(()) => {
            assert_eq!(query.joins().len(), filter.expected_join_count());
            let aliases: HashSet<&str> = query.joins().iter().map(|j| j.alias.as_str()).collect();
            assert_eq!(aliases.len(), query.joins().len());
        }
        Err(_) => assert!(query.joins().is_empty()),
    }
});
