use crate::{LocationCategory, ModelError, parse_category_filter};

#[test]
fn given_wire_names_when_parsing_then_maps_each_category() {
    assert_eq!("police".parse::<LocationCategory>().unwrap(), LocationCategory::Police);
    assert_eq!("Hospital".parse::<LocationCategory>().unwrap(), LocationCategory::Hospital);
    assert_eq!(
        " safe_space ".parse::<LocationCategory>().unwrap(),
        LocationCategory::SafeSpace
    );
}

/// **VALUE**: Verifies that `all` and empty input mean "no filter".
///
/// **WHY THIS MATTERS**: The dashboard's "All Locations" control sends `all`. Parsing it
/// as an unknown category would leave the user unable to clear a filter.
#[test]
fn given_all_when_parsing_filter_then_returns_none() {
    // GIVEN / WHEN / THEN
    assert_eq!(parse_category_filter("all").unwrap(), None);
    assert_eq!(parse_category_filter("ALL").unwrap(), None);
    assert_eq!(parse_category_filter("").unwrap(), None);
    assert_eq!(
        parse_category_filter("hospital").unwrap(),
        Some(LocationCategory::Hospital)
    );
}

#[test]
fn given_unknown_name_when_parsing_then_returns_unknown_category_error() {
    let result = "fire_station".parse::<LocationCategory>();

    match result {
        Err(ModelError::UnknownCategory { value, .. }) => assert_eq!(value, "fire_station"),
        other => panic!("Expected UnknownCategory, got {other:?}"),
    }
}

#[test]
fn given_category_when_serialized_then_uses_snake_case() {
    let json = serde_json::to_string(&LocationCategory::SafeSpace).unwrap();

    assert_eq!(json, "\"safe_space\"");
    assert_eq!(LocationCategory::SafeSpace.to_string(), "safe_space");
}
