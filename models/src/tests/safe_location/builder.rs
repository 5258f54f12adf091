use crate::{Coordinate, LocationCategory, ModelError, SafeLocationBuilder};

fn complete_builder() -> SafeLocationBuilder {
    SafeLocationBuilder::default()
        .with_id("1")
        .with_name("Central Police Station")
        .with_category(LocationCategory::Police)
        .with_address("123 Main Street, Downtown")
        .with_phone("+1-555-POLICE")
        .with_verified(true)
        .with_hours("24/7")
}

/// **VALUE**: Verifies that a fully specified builder produces the entry verbatim.
///
/// **WHY THIS MATTERS**: The catalog is built through this path at startup. Any field
/// that gets dropped or swapped here shows the wrong phone number on a safety screen.
#[test]
fn given_all_fields_when_building_then_returns_safe_location() {
    // GIVEN: A builder with every field set
    let coordinate = Coordinate::new(-1.2833, 36.8167).unwrap();
    let builder = complete_builder().with_coordinate(coordinate);

    // WHEN: Building
    let location = builder.build().unwrap();

    // THEN: Every field is carried through
    assert_eq!(location.id, "1");
    assert_eq!(location.name, "Central Police Station");
    assert_eq!(location.category, LocationCategory::Police);
    assert_eq!(location.address, "123 Main Street, Downtown");
    assert_eq!(location.phone.as_deref(), Some("+1-555-POLICE"));
    assert!(location.verified);
    assert_eq!(location.hours, "24/7");
    assert_eq!(location.coordinate, Some(coordinate));
}

/// **VALUE**: Verifies that a missing id is rejected.
///
/// **BUG THIS CATCHES**: Would catch the builder defaulting the id to an empty string,
/// which breaks the directory's uniqueness check and its tie-breaking by catalog index.
#[test]
fn given_missing_id_when_building_then_returns_validation_error() {
    // GIVEN: Builder without an id
    let builder = SafeLocationBuilder::default()
        .with_name("City General Hospital")
        .with_category(LocationCategory::Hospital)
        .with_address("456 Health Avenue");

    // WHEN: Building
    let result = builder.build();

    // THEN: Validation error naming the id
    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "Location id is required");
        }
        other => panic!("Expected validation error, got {other:?}"),
    }
}

#[test]
fn given_missing_category_when_building_then_returns_validation_error() {
    let builder = SafeLocationBuilder::default()
        .with_id("2")
        .with_name("City General Hospital")
        .with_address("456 Health Avenue");

    let result = builder.build();

    assert!(
        matches!(result, Err(ModelError::Validation { ref message, .. }) if message.contains("Category"))
    );
}

/// **VALUE**: Verifies that whitespace-only names fail validation after assembly.
///
/// **WHY THIS MATTERS**: An entry with a blank name renders as an empty card the user
/// cannot identify in an emergency.
#[test]
fn given_blank_name_when_building_then_returns_validation_error() {
    // GIVEN: A name made of spaces
    let builder = complete_builder().with_name("   ");

    // WHEN: Building
    let result = builder.build();

    // THEN: Rejected
    assert!(matches!(result, Err(ModelError::Validation { .. })));
}

#[test]
fn given_empty_phone_when_building_then_returns_validation_error() {
    let result = complete_builder().with_phone("").build();

    assert!(matches!(result, Err(ModelError::Validation { .. })));
}

/// **VALUE**: Verifies that optional fields default to "not provided".
///
/// **BUG THIS CATCHES**: Would catch `verified` defaulting to `true`, which would badge
/// unvetted places as verified.
#[test]
fn given_only_required_fields_when_building_then_optionals_are_empty() {
    // GIVEN: Only the required fields
    let builder = SafeLocationBuilder::default()
        .with_id("9")
        .with_name("Corner Kiosk")
        .with_category(LocationCategory::SafeSpace)
        .with_address("1 Corner Road");

    // WHEN: Building
    let location = builder.build().unwrap();

    // THEN: Optionals are absent and the entry is unverified
    assert_eq!(location.phone, None);
    assert_eq!(location.coordinate, None);
    assert!(!location.verified);
    assert!(location.hours.is_empty());
}
