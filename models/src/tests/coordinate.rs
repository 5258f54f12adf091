use crate::{Coordinate, ModelError};

/// **VALUE**: Pins the haversine implementation against a known city pair.
///
/// **WHY THIS MATTERS**: Ranking is the only thing that decides which hospital is shown
/// first. A sign error or degrees/radians mix-up still produces plausible-looking numbers.
///
/// **BUG THIS CATCHES**: Would catch forgetting `to_radians()` or using the wrong radius.
#[test]
fn given_nairobi_and_mombasa_when_measuring_then_distance_is_about_440_km() {
    // GIVEN: Nairobi and Mombasa city centres
    let nairobi = Coordinate::new(-1.286389, 36.817223).unwrap();
    let mombasa = Coordinate::new(-4.043477, 39.668206).unwrap();

    // WHEN: Measuring
    let distance = nairobi.distance_km(&mombasa);

    // THEN: Roughly 440 km great-circle
    assert!((distance - 440.0).abs() < 5.0, "got {distance}");
}

#[test]
fn given_same_point_when_measuring_then_distance_is_zero() {
    let point = Coordinate::new(51.5, -0.12).unwrap();

    assert_eq!(point.distance_km(&point), 0.0);
}

#[test]
fn given_two_points_when_measuring_both_ways_then_distance_is_symmetric() {
    let a = Coordinate::new(10.0, 20.0).unwrap();
    let b = Coordinate::new(-33.9, 151.2).unwrap();

    assert!((a.distance_km(&b) - b.distance_km(&a)).abs() < 1e-9);
}

/// **VALUE**: Verifies range checks on construction.
///
/// **BUG THIS CATCHES**: Would catch swapped latitude/longitude bounds or NaN slipping
/// through from a misbehaving platform location service.
#[test]
fn given_out_of_range_values_when_constructing_then_returns_validation_error() {
    // GIVEN / WHEN / THEN
    assert!(matches!(Coordinate::new(91.0, 0.0), Err(ModelError::Validation { .. })));
    assert!(matches!(Coordinate::new(0.0, -180.5), Err(ModelError::Validation { .. })));
    assert!(matches!(Coordinate::new(f64::NAN, 0.0), Err(ModelError::Validation { .. })));
    assert!(Coordinate::new(-90.0, 180.0).is_ok());
}

#[test]
fn given_json_with_bad_latitude_when_deserializing_then_fails() {
    let result = serde_json::from_str::<Coordinate>(r#"{"latitude": 120.0, "longitude": 3.0}"#);

    assert!(result.is_err());
}
