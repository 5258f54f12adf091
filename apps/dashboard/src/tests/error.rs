// Unit tests for error module
// Tests serialization and conversion from core errors

use crate::error::DashboardError;

use safety_core::error::ConfigError;

use common::ErrorLocation;

/// **VALUE**: Errors serialize with their variant tag.
///
/// **WHY THIS MATTERS**: Status output and any future front end receive errors as JSON.
/// If serialization breaks, they get opaque strings.
#[test]
fn given_dashboard_error_when_serialized_then_tagged_json() {
    // GIVEN: An app error
    let err = DashboardError::App {
        message: String::from("Test"),
        location: ErrorLocation::caller(),
    };

    // WHEN: Serializing to JSON
    let json = serde_json::to_string(&err).unwrap();

    // THEN: Variant name and message present
    assert!(json.contains("\"type\":\"App\""), "got {json}");
    assert!(json.contains("Test"));
}

#[test]
fn given_config_error_when_converted_then_core_variant_keeps_message() {
    let config_error = ConfigError::Validation {
        location: ErrorLocation::caller(),
        reason: String::from("Invalid nearby radius"),
    };

    let err = DashboardError::from(config_error);

    match err {
        DashboardError::Core { ref message, .. } => {
            assert!(message.contains("Invalid nearby radius"))
        }
        ref other => panic!("expected Core, got {other:?}"),
    }
    assert!(err.to_string().starts_with("Core Error:"));
}
