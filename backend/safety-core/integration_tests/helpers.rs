//! Test doubles for the platform collaborators.
//!
//! - [`ScriptedLocationService`]: answers position queries from a queue
//! - [`RecordingNotifier`]: captures activation notices
//! - catalog helpers building small directories by hand

use safety_core::dispatch::{ActivationNotice, AlertNotifier};
use safety_core::error::{NotifyError, PositionError};
use safety_core::position::LocationService;

use common::ErrorLocation;
use models::{Coordinate, LocationCategory, SafeLocation, SafeLocationBuilder};

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;

/// Nairobi CBD, the origin used across these tests.
pub fn origin() -> Coordinate {
    Coordinate::new(-1.286_389, 36.817_223).expect("valid origin")
}

/// A point roughly `km` kilometres due north of [`origin`].
pub fn north_of_origin(km: f64) -> Coordinate {
    // One degree of latitude is ~111.2 km
    Coordinate::new(origin().latitude() + km / 111.195, origin().longitude())
        .expect("valid offset coordinate")
}

/// What the scripted platform does on its next query.
#[derive(Debug, Clone)]
pub enum Script {
    Fix(Coordinate, Duration),
    Deny,
    Unavailable,
    Hang,
    Panic,
}

pub struct ScriptedLocationService {
    script: Mutex<VecDeque<Script>>,
    calls: AtomicUsize,
}

impl ScriptedLocationService {
    pub fn new(script: impl IntoIterator<Item = Script>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LocationService for ScriptedLocationService {
    fn current_position(&self) -> BoxFuture<'_, Result<Coordinate, PositionError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .script
            .lock()
            .expect("script lock")
            .pop_front()
            .unwrap_or(Script::Unavailable);
        let location = ErrorLocation::caller();

        async move {
            match next {
                Script::Fix(coordinate, delay) => {
                    tokio::time::sleep(delay).await;
                    Ok(coordinate)
                }
                Script::Deny => Err(PositionError::PermissionDenied {
                    message: "user declined".to_string(),
                    location,
                }),
                Script::Unavailable => Err(PositionError::Unavailable {
                    message: "no satellites".to_string(),
                    location,
                }),
                Script::Hang => std::future::pending().await,
                Script::Panic => panic!("platform location service crashed"),
            }
        }
        .boxed()
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<ActivationNotice>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            notices: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn recorded(&self) -> Vec<ActivationNotice> {
        self.notices.lock().expect("notices lock").clone()
    }
}

impl AlertNotifier for RecordingNotifier {
    fn notify(&self, notice: &ActivationNotice) -> Result<(), NotifyError> {
        self.notices
            .lock()
            .expect("notices lock")
            .push(notice.clone());

        if self.fail {
            return Err(NotifyError::Delivery {
                message: "sms gateway unreachable".to_string(),
                location: ErrorLocation::caller(),
            });
        }
        Ok(())
    }
}

pub fn location(
    id: &str,
    category: LocationCategory,
    coordinate: Option<Coordinate>,
) -> SafeLocation {
    let builder = SafeLocationBuilder::default()
        .with_id(id)
        .with_name(format!("Place {id}"))
        .with_category(category)
        .with_address(format!("{id} Test Street"));

    match coordinate {
        Some(coordinate) => builder.with_coordinate(coordinate),
        None => builder,
    }
    .build()
    .expect("valid test location")
}

pub fn ids(locations: &[&SafeLocation]) -> Vec<String> {
    locations.iter().map(|location| location.id.clone()).collect()
}
