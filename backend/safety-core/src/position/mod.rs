//! Position acquisition and caching.
//!
//! [`PositionProvider`] owns the process-wide [`PositionState`] cell. Every
//! write goes through it; readers either take a snapshot with
//! [`PositionProvider::current_state`] or follow changes through
//! [`PositionProvider::subscribe`].
//!
//! # State machine
//!
//! ```text
//! Unknown ──request──▶ Acquiring ──fix──────────────▶ Known
//!    ▲                     │                             │
//!    └──failure/timeout────┘ ◀────────request────────────┘
//! ```
//!
//! A request while `Acquiring` is a no-op. The newest fix always replaces the
//! previous one. There is no retry loop; callers re-request when they want to.
//!
//! # Concurrency
//!
//! The cell is a `tokio::sync::watch` channel. The `Acquiring` transition is a
//! single `send_if_modified` call, so two racing requests cannot both start a
//! platform query. The query itself runs on a spawned task, so
//! `request_position` returns immediately and never blocks activation or
//! directory calls.

pub mod service;

pub use service::{DeniedLocationService, LocationService, SimulatedLocationService};

use crate::error::PositionError;
use crate::error::position::PositionFailureKind;

use common::ErrorLocation;
use models::{Coordinate, PositionState};

use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use log::{debug, info, warn};
use tokio::sync::watch;
use tokio::time::timeout as TokioTimeout;

/// Upper bound on a single platform query before it is treated as a timeout.
pub const DEFAULT_POSITION_TIMEOUT: Duration = Duration::from_secs(10);

/// What `request_position` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionRequest {
    /// A platform query was issued.
    Started,
    /// A query was already outstanding; nothing new was issued.
    AlreadyInFlight,
}

#[derive(Debug, Default)]
struct Diagnostics {
    last_failure: Option<PositionFailureKind>,
    last_fix: Option<(Coordinate, SystemTime)>,
}

/// Acquires and caches the user's current coordinates.
///
/// This type is `Clone`; all clones share the same state cell.
#[derive(Clone)]
pub struct PositionProvider {
    service: Arc<dyn LocationService>,
    state: Arc<watch::Sender<PositionState>>,
    diagnostics: Arc<Mutex<Diagnostics>>,
    timeout: Duration,
}

impl PositionProvider {
    pub fn new(service: Arc<dyn LocationService>, timeout: Duration) -> Self {
        let (state, _) = watch::channel(PositionState::Unknown);

        Self {
            service,
            state: Arc::new(state),
            diagnostics: Arc::new(Mutex::new(Diagnostics::default())),
            timeout,
        }
    }

    /// Start a position query unless one is already in flight.
    ///
    /// Returns without waiting for the platform. Must be called from within a
    /// tokio runtime.
    pub fn request_position(&self) -> PositionRequest {
        let started = self.state.send_if_modified(|state| {
            if state.is_acquiring() {
                false
            } else {
                *state = PositionState::Acquiring;
                true
            }
        });

        if !started {
            debug!("Position request ignored, acquisition already in flight");
            return PositionRequest::AlreadyInFlight;
        }

        debug!("Position acquisition started (timeout {:?})", self.timeout);

        // Built outside the task so that a task dropped before its first poll
        // still reverts the cell
        let guard = AcquisitionGuard {
            state: Arc::clone(&self.state),
        };
        let provider = self.clone();
        tokio::spawn(async move {
            provider.acquire().await;
            drop(guard);
        });

        PositionRequest::Started
    }

    /// Snapshot of the position cell. Never blocks on an in-flight query.
    pub fn current_state(&self) -> PositionState {
        *self.state.borrow()
    }

    /// Receiver that observes every state transition.
    pub fn subscribe(&self) -> watch::Receiver<PositionState> {
        self.state.subscribe()
    }

    /// Wait until no query is in flight and return the settled state.
    pub async fn wait_until_settled(&self) -> PositionState {
        let mut receiver = self.subscribe();
        match receiver.wait_for(|state| !state.is_acquiring()).await {
            Ok(state) => *state,
            Err(_) => self.current_state(),
        }
    }

    /// Classification of the most recent failed query, cleared by the next fix.
    pub fn last_failure(&self) -> Option<PositionFailureKind> {
        self.diagnostics
            .lock()
            .ok()
            .and_then(|diagnostics| diagnostics.last_failure)
    }

    /// Most recent successful fix, kept in memory across later failures.
    ///
    /// Ranking only ever uses [`current_state`](Self::current_state); this
    /// exists so an alert can still carry the user's last whereabouts.
    pub fn last_known_fix(&self) -> Option<(Coordinate, SystemTime)> {
        self.diagnostics
            .lock()
            .ok()
            .and_then(|diagnostics| diagnostics.last_fix)
    }

    async fn acquire(&self) {
        let result = match TokioTimeout(self.timeout, self.service.current_position()).await {
            Ok(result) => result,
            Err(_) => Err(PositionError::Timeout {
                message: format!("No position fix within {:?}", self.timeout),
                location: ErrorLocation::caller(),
            }),
        };

        match result {
            Ok(coordinate) => {
                let acquired_at = SystemTime::now();

                if let Ok(mut diagnostics) = self.diagnostics.lock() {
                    diagnostics.last_failure = None;
                    diagnostics.last_fix = Some((coordinate, acquired_at));
                }

                self.state.send_replace(PositionState::Known {
                    coordinate,
                    acquired_at,
                });
                info!("Position acquired: {coordinate}");
            }
            Err(e) => {
                if let Ok(mut diagnostics) = self.diagnostics.lock() {
                    diagnostics.last_failure = Some(e.kind());
                }

                self.state.send_replace(PositionState::Unknown);
                warn!("Position unavailable, safe locations stay unranked: {e}");
            }
        }
    }
}

/// Reverts a dangling `Acquiring` to `Unknown` if the acquisition task ends
/// without resolving it: a panic in the service, or the runtime dropping the
/// task before or during the query.
struct AcquisitionGuard {
    state: Arc<watch::Sender<PositionState>>,
}

impl Drop for AcquisitionGuard {
    fn drop(&mut self) {
        let reverted = self.state.send_if_modified(|state| {
            if state.is_acquiring() {
                *state = PositionState::Unknown;
                true
            } else {
                false
            }
        });

        if reverted {
            warn!("Position acquisition ended without a result, reverted to Unknown");
        }
    }
}
