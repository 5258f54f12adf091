// Unit tests for the directory's distance ordering

use crate::directory::{CategoryCounts, SafeLocationDirectory};

use models::{Coordinate, LocationCategory, PositionState, SafeLocationBuilder};

use std::time::SystemTime;

fn at(latitude: f64, longitude: f64) -> Coordinate {
    Coordinate::new(latitude, longitude).unwrap()
}

/// **VALUE**: Entries unknown to the catalog keep their input order among themselves.
///
/// **BUG THIS CATCHES**: Would catch an unstable sort, which reorders equal keys and
/// makes the list flicker between renders.
#[test]
fn given_entries_outside_catalog_when_ranking_then_they_follow_catalog_entries_at_equal_distance() {
    let spot = at(0.0, 0.01);
    let make = |id: &str| {
        SafeLocationBuilder::default()
            .with_id(id)
            .with_name(id)
            .with_category(LocationCategory::Police)
            .with_address("here")
            .with_coordinate(spot)
            .build()
            .unwrap()
    };
    let directory = SafeLocationDirectory::from_locations(vec![make("in")]).unwrap();
    let outsiders = [make("x"), make("y")];
    let inside = &directory.list_all()[0];

    let position = PositionState::Known {
        coordinate: at(0.0, 0.0),
        acquired_at: SystemTime::now(),
    };
    let ranked = directory.rank([&outsiders[0], inside, &outsiders[1]], &position);

    let ids: Vec<&str> = ranked.iter().map(|entry| entry.location.id.as_str()).collect();
    assert_eq!(ids, ["in", "x", "y"]);
}

#[test]
fn given_counts_when_reading_by_category_then_fields_match() {
    let counts = CategoryCounts {
        police: 1,
        hospital: 2,
        safe_space: 3,
    };

    assert_eq!(counts.get(LocationCategory::Police), 1);
    assert_eq!(counts.get(LocationCategory::Hospital), 2);
    assert_eq!(counts.get(LocationCategory::SafeSpace), 3);
    assert_eq!(counts.total(), 6);
}
