use crate::{ErrorLocation, ModelError};

use std::fmt::{Display, Formatter, Result as FormatResult};

use serde::{Deserialize, Serialize};

/// Mean Earth radius used for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// A WGS84 latitude/longitude pair in decimal degrees.
///
/// Values are validated on construction and never change afterwards. A fresh
/// position fix is a new `Coordinate`, not an update of an old one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = ModelError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    /// Create a coordinate, rejecting non-finite or out-of-range values.
    #[track_caller]
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ModelError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ModelError::Validation {
                message: format!("Latitude out of range: {latitude} (must be -90..=90)"),
                location: ErrorLocation::caller(),
            });
        }

        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ModelError::Validation {
                message: format!("Longitude out of range: {longitude} (must be -180..=180)"),
                location: ErrorLocation::caller(),
            });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in kilometres (haversine).
    ///
    /// The result is unrounded; rounding belongs to presentation.
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        let phi1 = self.latitude.to_radians();
        let phi2 = other.latitude.to_radians();
        let d_phi = (other.latitude - self.latitude).to_radians();
        let d_lambda = (other.longitude - self.longitude).to_radians();

        let a = (d_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
        // Clamp guards asin against a > 1.0 from floating point drift on antipodes
        let c = 2.0 * a.sqrt().min(1.0).asin();

        EARTH_RADIUS_KM * c
    }
}

impl Display for Coordinate {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        write!(formatter, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}
