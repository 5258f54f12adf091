use crate::{Coordinate, PositionState};

use std::time::SystemTime;

/// **VALUE**: A fresh position cell starts out `Unknown`, never `Acquiring`.
///
/// **BUG THIS CATCHES**: Would catch the default moving to another variant, which
/// would make the first `request_position` look like a duplicate and be ignored.
#[test]
fn given_default_position_state_when_inspected_then_unknown_without_coordinate() {
    let state = PositionState::default();

    assert_eq!(state, PositionState::Unknown);
    assert!(!state.is_acquiring());
    assert!(!state.is_known());
    assert_eq!(state.coordinate(), None);
}

#[test]
fn given_known_state_when_reading_coordinate_then_fix_is_returned() {
    let coordinate = Coordinate::new(-1.2864, 36.8172).unwrap();
    let state = PositionState::Known {
        coordinate,
        acquired_at: SystemTime::now(),
    };

    assert!(state.is_known());
    assert_eq!(state.coordinate(), Some(coordinate));
}
