use crate::Coordinate;

use std::time::SystemTime;

use serde::Serialize;

/// The user's position as last seen by the position provider.
///
/// `Acquiring` is transient: it always resolves to `Known` or falls back to
/// `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub enum PositionState {
    /// Nothing acquired yet, or the last attempt failed.
    #[default]
    Unknown,
    /// A platform query is in flight.
    Acquiring,
    /// Latest successful fix.
    Known {
        coordinate: Coordinate,
        acquired_at: SystemTime,
    },
}

impl PositionState {
    pub fn is_known(&self) -> bool {
        matches!(self, PositionState::Known { .. })
    }

    pub fn is_acquiring(&self) -> bool {
        matches!(self, PositionState::Acquiring)
    }

    /// Coordinate of a `Known` state.
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            PositionState::Known { coordinate, .. } => Some(*coordinate),
            _ => None,
        }
    }
}
