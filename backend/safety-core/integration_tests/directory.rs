use crate::helpers::{ids, location, north_of_origin, origin};

use safety_core::catalog::BuiltinCatalog;
use safety_core::directory::actions::{dial_uri, directions_url};
use safety_core::directory::{RankedLocation, SafeLocationDirectory, format_distance};
use safety_core::error::CatalogError;

use models::{LocationCategory, PositionState, SafeLocation, SafeLocationBuilder};

use std::time::SystemTime;

fn known_at_origin() -> PositionState {
    PositionState::Known {
        coordinate: origin(),
        acquired_at: SystemTime::now(),
    }
}

fn builtin() -> SafeLocationDirectory {
    SafeLocationDirectory::load(&BuiltinCatalog).expect("builtin catalog loads")
}

fn ranked_ids(ranked: &[RankedLocation<'_>]) -> Vec<String> {
    ranked
        .iter()
        .map(|entry| entry.location.id.clone())
        .collect()
}

// ============================================================================
// Filtering
// ============================================================================

#[test]
fn given_no_filter_when_filtering_then_whole_catalog_in_order() {
    let directory = builtin();

    let all = directory.filter(None);

    assert_eq!(all.len(), directory.list_all().len());
    assert_eq!(ids(&all), vec!["1", "2", "3", "4", "5"]);
}

/// **VALUE**: Category filtering keeps catalog order.
///
/// **BUG THIS CATCHES**: Would catch a filter that sorts by name or id as a side effect,
/// which would make an unranked list jump around when the user switches category.
#[test]
fn given_hospital_filter_when_filtering_then_only_hospitals_in_catalog_order() {
    // GIVEN: The built-in catalog (hospitals are entries 2 and 5)
    let directory = builtin();

    // WHEN: Filtering by hospital
    let hospitals = directory.filter(Some(LocationCategory::Hospital));

    // THEN: Exactly those two, in catalog order
    assert_eq!(ids(&hospitals), vec!["2", "5"]);
    assert!(
        hospitals
            .iter()
            .all(|entry| entry.category == LocationCategory::Hospital)
    );
}

#[test]
fn given_category_with_no_entries_when_filtering_then_empty() {
    let directory = SafeLocationDirectory::from_locations(vec![location(
        "a",
        LocationCategory::Police,
        None,
    )])
    .unwrap();

    assert!(directory.filter(Some(LocationCategory::SafeSpace)).is_empty());
}

// ============================================================================
// Ranking
// ============================================================================

/// **VALUE**: Without a position, ranking is the identity.
///
/// **WHY THIS MATTERS**: Users who deny location access still get the full list, in the
/// order the catalog curators chose, and no made-up distances.
#[test]
fn given_unknown_position_when_ranking_then_input_order_and_no_distances() {
    // GIVEN: The built-in catalog, position unknown and acquiring
    let directory = builtin();

    for position in [PositionState::Unknown, PositionState::Acquiring] {
        // WHEN: Ranking the full catalog
        let ranked = directory.rank(directory.list_all(), &position);

        // THEN: Input order, no distance on any entry
        assert_eq!(ranked_ids(&ranked), vec!["1", "2", "3", "4", "5"]);
        assert!(ranked.iter().all(|entry| entry.distance_km.is_none()));
    }
}

/// **VALUE**: With a known position, entries come back nearest first.
///
/// **BUG THIS CATCHES**: Would catch a sort on the rounded display distance or on a
/// cached distance from an earlier fix.
#[test]
fn given_known_position_when_ranking_then_distances_are_non_decreasing() {
    // GIVEN: Entries deliberately listed far-to-near
    let directory = SafeLocationDirectory::from_locations(vec![
        location("far", LocationCategory::Police, Some(north_of_origin(4.0))),
        location("mid", LocationCategory::Hospital, Some(north_of_origin(2.0))),
        location("near", LocationCategory::SafeSpace, Some(north_of_origin(0.5))),
    ])
    .unwrap();

    // WHEN: Ranking from the origin
    let ranked = directory.ranked(None, &known_at_origin());

    // THEN: Nearest first, every distance known
    assert_eq!(ranked_ids(&ranked), vec!["near", "mid", "far"]);
    let distances: Vec<f64> = ranked
        .iter()
        .map(|entry| entry.distance_km.expect("distance"))
        .collect();
    assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!((distances[0] - 0.5).abs() < 0.01, "got {}", distances[0]);
}

#[test]
fn given_entries_without_coordinates_when_ranking_then_they_sort_last() {
    let directory = SafeLocationDirectory::from_locations(vec![
        location("nowhere-1", LocationCategory::Police, None),
        location("there", LocationCategory::Police, Some(north_of_origin(3.0))),
        location("nowhere-2", LocationCategory::Hospital, None),
        location("here", LocationCategory::SafeSpace, Some(origin())),
    ])
    .unwrap();

    let ranked = directory.ranked(None, &known_at_origin());

    assert_eq!(
        ranked_ids(&ranked),
        vec!["here", "there", "nowhere-1", "nowhere-2"]
    );
    assert_eq!(ranked[2].distance_km, None);
    assert_eq!(ranked[3].distance_km, None);
}

/// **VALUE**: Equal distances fall back to catalog order.
#[test]
fn given_equidistant_entries_when_ranking_then_catalog_order_breaks_ties() {
    // GIVEN: Three entries at the same coordinate
    let spot = north_of_origin(1.0);
    let directory = SafeLocationDirectory::from_locations(vec![
        location("b", LocationCategory::Police, Some(spot)),
        location("a", LocationCategory::Police, Some(spot)),
        location("c", LocationCategory::Police, Some(spot)),
    ])
    .unwrap();

    // WHEN: Ranking a reversed subset
    let subset: Vec<&SafeLocation> = directory.list_all().iter().rev().collect();
    let ranked = directory.rank(subset, &known_at_origin());

    // THEN: Catalog order, not input order
    assert_eq!(ranked_ids(&ranked), vec!["b", "a", "c"]);
}

#[test]
fn given_builtin_catalog_when_ranking_from_city_centre_then_police_station_is_nearest() {
    let directory = builtin();

    let nearest = directory
        .nearest(None, &known_at_origin())
        .expect("a nearest entry");
    let nearest_hospital = directory
        .nearest(Some(LocationCategory::Hospital), &known_at_origin())
        .expect("a nearest hospital");

    assert_eq!(nearest.location.id, "1");
    assert_eq!(nearest_hospital.location.id, "2");
}

#[test]
fn given_unknown_position_when_asking_for_nearest_then_none() {
    let directory = builtin();

    assert!(directory.nearest(None, &PositionState::Unknown).is_none());
}

// ============================================================================
// Display distance
// ============================================================================

#[test]
fn given_distance_when_formatting_then_one_decimal_with_unit() {
    assert_eq!(format_distance(0.5), "0.5 km");
    assert_eq!(format_distance(1.26), "1.3 km");
    assert_eq!(format_distance(12.0), "12.0 km");
}

#[test]
fn given_ranked_entry_when_displaying_then_rounding_is_presentation_only() {
    let directory = SafeLocationDirectory::from_locations(vec![location(
        "x",
        LocationCategory::Police,
        Some(north_of_origin(0.5)),
    )])
    .unwrap();

    let ranked = directory.ranked(None, &known_at_origin());

    assert_eq!(ranked[0].display_distance().as_deref(), Some("0.5 km"));
    assert_ne!(ranked[0].distance_km, Some(0.5));
}

// ============================================================================
// Catalog integrity
// ============================================================================

#[test]
fn given_duplicate_ids_when_building_directory_then_duplicate_id_error() {
    let result = SafeLocationDirectory::from_locations(vec![
        location("1", LocationCategory::Police, None),
        location("1", LocationCategory::Hospital, None),
    ]);

    match result {
        Err(CatalogError::DuplicateId { id, .. }) => assert_eq!(id, "1"),
        other => panic!("expected DuplicateId, got {other:?}"),
    }
}

#[test]
fn given_id_when_looking_up_then_entry_is_returned() {
    let directory = builtin();

    assert_eq!(
        directory.get("3").map(|entry| entry.category),
        Some(LocationCategory::SafeSpace)
    );
    assert!(directory.get("99").is_none());
}

// ============================================================================
// Nearby counts
// ============================================================================

#[test]
fn given_known_position_when_counting_nearby_then_only_entries_within_radius() {
    let directory = SafeLocationDirectory::from_locations(vec![
        location("p", LocationCategory::Police, Some(north_of_origin(1.0))),
        location("h-near", LocationCategory::Hospital, Some(north_of_origin(2.0))),
        location("h-far", LocationCategory::Hospital, Some(north_of_origin(9.0))),
        location("s", LocationCategory::SafeSpace, None),
    ])
    .unwrap();

    let counts = directory.nearby_counts(&known_at_origin(), 5.0);

    assert_eq!(counts.police, 1);
    assert_eq!(counts.hospital, 1);
    assert_eq!(counts.safe_space, 0);
    assert_eq!(counts.total(), 2);
}

#[test]
fn given_unknown_position_when_counting_nearby_then_everything_counts() {
    let directory = builtin();

    let counts = directory.nearby_counts(&PositionState::Unknown, 5.0);

    assert_eq!(counts.get(LocationCategory::Police), 1);
    assert_eq!(counts.get(LocationCategory::Hospital), 2);
    assert_eq!(counts.get(LocationCategory::SafeSpace), 2);
}

// ============================================================================
// Contact actions
// ============================================================================

#[test]
fn given_location_with_phone_when_building_dial_uri_then_tel_scheme() {
    let directory = builtin();
    let police = directory.get("1").unwrap();

    assert_eq!(dial_uri(police).as_deref(), Some("tel:+1-555-POLICE"));
}

#[test]
fn given_location_without_phone_when_building_dial_uri_then_none() {
    let entry = location("7", LocationCategory::SafeSpace, None);

    assert_eq!(dial_uri(&entry), None);
}

#[test]
fn given_address_with_spaces_when_building_directions_then_query_is_encoded() {
    let entry = SafeLocationBuilder::default()
        .with_id("9")
        .with_name("Women's Shelter & Support Center")
        .with_category(LocationCategory::SafeSpace)
        .with_address("789 Safety Street & 2nd")
        .build()
        .unwrap();

    let url = directions_url(&entry).unwrap();

    assert_eq!(url.scheme(), "https");
    assert_eq!(url.host_str(), Some("www.google.com"));
    let query: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    assert!(query.contains(&("query".to_string(), "789 Safety Street & 2nd".to_string())));
}
