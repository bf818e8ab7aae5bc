//! Tests for sequence module

#[cfg(test)]
mod tests {
    use crate::segment::GroupId;
    use crate::sequence::*;
    use serial_test::serial;
    use std::collections::HashSet;

    #[test]
    fn test_sequence_starts_at_zero() {
        let seq = AtomicSequence::new();

        assert_eq!(seq.peek(), 0);
        assert_eq!(seq.next_index(), 0);
        assert_eq!(seq.next_index(), 1);
        assert_eq!(seq.peek(), 2);
    }

    #[test]
    fn test_clones_share_the_counter() {
        // Arrange
        let seq = AtomicSequence::new();
        let clone = seq.clone();

        // Act
        let a = seq.next_index();
        let b = clone.next_index();

        // Assert
        assert_eq!((a, b), (0, 1));
    }

    #[test]
    fn test_identifier_format_without_group() {
        let seq = AtomicSequence::new();

        let id = FilterIdentifier::allocate(None, &seq);

        assert_eq!(id.as_str(), "fltr_seg_default_0");
        assert_eq!(id.index(), 0);
        assert_eq!(id.group(), None);
    }

    #[test]
    fn test_identifier_format_with_group() {
        let seq = AtomicSequence::starting_at(9);

        let id = FilterIdentifier::allocate(Some(GroupId(12)), &seq);

        assert_eq!(id.to_string(), "fltr_seg_12_9");
        assert_eq!(id.group(), Some(GroupId(12)));
    }

    #[test]
    fn test_identifier_with_custom_prefix() {
        let seq = AtomicSequence::new();

        let id = FilterIdentifier::allocate_with("seg", "all", None, &seq);

        assert_eq!(id.as_str(), "seg_all_0");
    }

    #[test]
    fn test_identifiers_never_repeat() {
        // Arrange
        let seq = AtomicSequence::new();

        // Act
        let ids: HashSet<String> = (0..1_000)
            .map(|i| FilterIdentifier::allocate(Some(GroupId(i % 3)), &seq).to_string())
            .collect();

        // Assert
        assert_eq!(ids.len(), 1_000);
    }

    #[test]
    fn test_concurrent_allocation_is_unique() {
        // Arrange
        let seq = AtomicSequence::new();
        let threads = 8;
        let per_thread = 500;

        // Act
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let seq = seq.clone();
                std::thread::spawn(move || {
                    (0..per_thread)
                        .map(|_| seq.next_index())
                        .collect::<Vec<u64>>()
                })
            })
            .collect();
        let all: HashSet<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().expect("thread"))
            .collect();

        // Assert
        assert_eq!(all.len(), threads * per_thread);
        assert_eq!(seq.peek(), (threads * per_thread) as u64);
    }

    #[test]
    #[serial]
    fn test_global_sequence_is_monotonic() {
        // Arrange
        let global = global_sequence();

        // Act
        let a = FilterIdentifier::allocate(None, global);
        let b = FilterIdentifier::allocate(None, global);

        // Assert
        assert_eq!(b.index(), a.index() + 1);
        assert!(std::ptr::eq(global, global_sequence()));
    }
}
