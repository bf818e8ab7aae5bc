//! Tests for `error` module

use super::config::ConfigError;
use super::error::*;
use super::segment::{ClassId, GroupId, SegmentId};

fn all_variants() -> Vec<Error> {
    vec![
        Error::InvalidCombination {
            segment: SegmentId(7),
            expected_group: GroupId(3),
            actual_group: GroupId(4),
        },
        Error::UnresolvedTable(ClassId::new("CUSTOMER")),
        Error::Config("test".into()),
        Error::Query("test".into()),
        Error::Serialization("test".into()),
    ]
}

// -------------------------------------------------------------------------
// Error code tests
// -------------------------------------------------------------------------

#[test]
fn test_error_codes_are_unique() {
    // Arrange
    let errors = all_variants();

    // Act
    let codes: Vec<&str> = errors.iter().map(Error::code).collect();

    // Assert
    let mut unique_codes = codes.clone();
    unique_codes.sort_unstable();
    unique_codes.dedup();
    assert_eq!(codes.len(), unique_codes.len(), "error codes must be unique");
    assert!(codes.iter().all(|c| c.starts_with("SEGF-")));
}

#[test]
fn test_error_message_contains_code() {
    for err in all_variants() {
        let message = err.to_string();
        assert!(
            message.starts_with(&format!("[{}]", err.code())),
            "message '{message}' should start with its code"
        );
    }
}

#[test]
fn test_invalid_combination_message() {
    // Arrange
    let err = Error::InvalidCombination {
        segment: SegmentId(7),
        expected_group: GroupId(3),
        actual_group: GroupId(4),
    };

    // Act
    let message = err.to_string();

    // Assert
    assert!(message.contains("Segment 7 does not belong to the defined segment group"));
    assert!(message.contains("expected group 3, got 4"));
}

#[test]
fn test_unresolved_table_message_names_class() {
    let err = Error::UnresolvedTable(ClassId::new("CUSTOMER"));
    assert_eq!(err.to_string(), "[SEGF-002] No table registered for class 'CUSTOMER'");
}

// -------------------------------------------------------------------------
// Recoverability
// -------------------------------------------------------------------------

#[test]
fn test_only_invalid_combination_is_unrecoverable() {
    let recoverable: Vec<bool> = all_variants().iter().map(Error::is_recoverable).collect();
    assert_eq!(recoverable, vec![false, true, true, true, true]);
}

#[test]
fn test_config_error_conversion() {
    // Arrange
    let config_err = ConfigError::InvalidValue {
        key: "logging.level".into(),
        message: "bad".into(),
    };

    // Act
    let err: Error = config_err.into();

    // Assert
    assert_eq!(err.code(), "SEGF-003");
    assert!(err.to_string().contains("logging.level"));
}

#[test]
fn test_serde_json_error_conversion() {
    let json_err = serde_json::from_str::<u64>("not a number").unwrap_err();

    let err: Error = json_err.into();

    assert_eq!(err.code(), "SEGF-005");
}
