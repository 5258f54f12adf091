//! Platform location service boundary.
//!
//! The real platform query (browser geolocation, OS location API) lives
//! outside this crate. Anything that can answer "where is the user" plugs in
//! through [`LocationService`]; the two implementations here stand in for the
//! platform during development and tests.

use crate::error::PositionError;

use common::ErrorLocation;
use models::Coordinate;

use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use log::debug;
use tokio::time::sleep as TokioSleep;

/// A single-shot position query against the platform.
///
/// Implementations must not retry internally; retry policy belongs to the
/// caller of `PositionProvider::request_position`.
pub trait LocationService: Send + Sync {
    fn current_position(&self) -> BoxFuture<'_, Result<Coordinate, PositionError>>;
}

/// Answers with a fixed coordinate after a simulated platform latency.
#[derive(Debug, Clone)]
pub struct SimulatedLocationService {
    coordinate: Coordinate,
    latency: Duration,
}

impl SimulatedLocationService {
    pub fn new(coordinate: Coordinate, latency: Duration) -> Self {
        Self {
            coordinate,
            latency,
        }
    }
}

impl LocationService for SimulatedLocationService {
    fn current_position(&self) -> BoxFuture<'_, Result<Coordinate, PositionError>> {
        async move {
            debug!(
                "Simulated location fix {} after {:?}",
                self.coordinate, self.latency
            );
            TokioSleep(self.latency).await;
            Ok(self.coordinate)
        }
        .boxed()
    }
}

/// Always refuses, as a platform does when the user declined location access.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedLocationService;

impl LocationService for DeniedLocationService {
    fn current_position(&self) -> BoxFuture<'_, Result<Coordinate, PositionError>> {
        let location = ErrorLocation::caller();
        async move {
            Err(PositionError::PermissionDenied {
                message: String::from("Location access is not granted on this device"),
                location,
            })
        }
        .boxed()
    }
}
