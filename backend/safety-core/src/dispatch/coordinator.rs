//! Alert session state machine using the actor pattern.
//!
//! # Architecture
//!
//! - `activate` / `deactivate` send a [`DispatchCommand`] over an mpsc channel
//! - A dedicated task owns the transition logic and handles commands one at a
//!   time, so "check state, then set it" is atomic with respect to every other
//!   caller
//! - Each command carries a oneshot reply so the caller learns whether it
//!   started a session or merely confirmed an existing one
//! - The session is mirrored in an `Arc<RwLock<AlertSession>>` for reads
//! - Transitions are broadcast as [`AlertEvent`]s
//!
//! ```text
//!            activate(src)                  deactivate(src)
//!   Idle ─────────────────▶ Active ─────────────────────────▶ Idle
//!                            │  ▲
//!                            └──┘ activate(other): AlreadyActive, no event
//! ```

use crate::dispatch::events::{ActivationNotice, AlertEvent};
use crate::error::DispatchError;
use crate::position::PositionProvider;

use common::ErrorLocation;
use models::{AlertSession, SourceId};

use std::sync::Arc;
use std::time::SystemTime;

use log::{error, info, warn};
use tokio::sync::{Mutex, RwLock, broadcast, mpsc, oneshot};

const COMMAND_CHANNEL_CAPACITY: usize = 100;
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Result of an activation request.
#[derive(Debug, Clone, PartialEq)]
pub enum ActivationOutcome {
    /// This call moved the session from `Idle` to `Active`.
    Activated(AlertSession),
    /// A session was already active; it is returned unchanged.
    AlreadyActive(AlertSession),
}

impl ActivationOutcome {
    pub fn session(&self) -> &AlertSession {
        match self {
            ActivationOutcome::Activated(session) | ActivationOutcome::AlreadyActive(session) => {
                session
            }
        }
    }

    /// True only for the single caller that opened the session.
    pub fn initiated(&self) -> bool {
        matches!(self, ActivationOutcome::Activated(_))
    }
}

/// Result of a deactivation request.
#[derive(Debug, Clone, PartialEq)]
pub enum DeactivationOutcome {
    /// The session that was just ended.
    Deactivated(AlertSession),
    /// Nothing was active; nothing changed.
    AlreadyIdle,
}

/// Commands that mutate the alert session.
#[derive(Debug)]
enum DispatchCommand {
    Activate {
        source: SourceId,
        reply: oneshot::Sender<ActivationOutcome>,
    },
    Deactivate {
        requested_by: SourceId,
        reply: oneshot::Sender<DeactivationOutcome>,
    },
}

/// Single serialization point for emergency-alert activation.
///
/// This type is `Clone` and can be handed to every trigger source. All clones
/// share the same session.
#[derive(Clone)]
pub struct EmergencyDispatchCoordinator {
    /// Channel to the actor; populated on first use inside a runtime
    command_tx: Arc<Mutex<Option<mpsc::Sender<DispatchCommand>>>>,

    session: Arc<RwLock<AlertSession>>,

    events: broadcast::Sender<AlertEvent>,

    /// Read-only, for the position attached to activation notices
    position: Option<PositionProvider>,
}

impl EmergencyDispatchCoordinator {
    /// Create a coordinator in the `Idle` state.
    ///
    /// `position` is only read, to attach the user's last known coordinate to
    /// activation notices.
    pub fn new(position: Option<PositionProvider>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            command_tx: Arc::new(Mutex::new(None)),
            session: Arc::new(RwLock::new(AlertSession::idle())),
            events,
            position,
        }
    }

    /// Request an alert session on behalf of `source`.
    ///
    /// Opens a session when idle. When a session is already active the call
    /// changes nothing and reports [`ActivationOutcome::AlreadyActive`]; that is
    /// a normal outcome, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::ActorUnavailable`] if the actor task has died.
    pub async fn activate(
        &self,
        source: impl Into<SourceId>,
    ) -> Result<ActivationOutcome, DispatchError> {
        let (reply, response) = oneshot::channel();
        self.send(DispatchCommand::Activate {
            source: source.into(),
            reply,
        })
        .await?;

        response.await.map_err(|e| DispatchError::ActorUnavailable {
            message: format!("Dispatch actor dropped activation reply: {e}"),
            location: ErrorLocation::caller(),
        })
    }

    /// End the active session. Idempotent: a no-op when already idle.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::ActorUnavailable`] if the actor task has died.
    pub async fn deactivate(
        &self,
        requested_by: impl Into<SourceId>,
    ) -> Result<DeactivationOutcome, DispatchError> {
        let (reply, response) = oneshot::channel();
        self.send(DispatchCommand::Deactivate {
            requested_by: requested_by.into(),
            reply,
        })
        .await?;

        response.await.map_err(|e| DispatchError::ActorUnavailable {
            message: format!("Dispatch actor dropped deactivation reply: {e}"),
            location: ErrorLocation::caller(),
        })
    }

    /// Snapshot of the alert session.
    pub async fn current_session(&self) -> AlertSession {
        self.session.read().await.clone()
    }

    /// Receive every subsequent [`AlertEvent`].
    pub fn subscribe(&self) -> broadcast::Receiver<AlertEvent> {
        self.events.subscribe()
    }

    async fn send(&self, cmd: DispatchCommand) -> Result<(), DispatchError> {
        let tx = self.ensure_actor().await;

        tx.send(cmd).await.map_err(|e| DispatchError::ActorUnavailable {
            message: format!("Dispatch actor died: {e}"),
            location: ErrorLocation::caller(),
        })
    }

    /// Spawn the actor on first use, or again if the previous one is gone,
    /// and hand out its sender.
    ///
    /// A replacement actor picks up the mirrored session as it stands, so an
    /// `Active` session survives the restart and can still be deactivated.
    async fn ensure_actor(&self) -> mpsc::Sender<DispatchCommand> {
        let mut tx_guard = self.command_tx.lock().await;

        match *tx_guard {
            Some(ref tx) if !tx.is_closed() => return tx.clone(),
            Some(_) => warn!("Dispatch actor is gone, respawning over the current session"),
            None => {}
        }

        let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        *tx_guard = Some(tx.clone());

        tokio::spawn(dispatch_actor(
            rx,
            Arc::clone(&self.session),
            self.events.clone(),
            self.position.clone(),
        ));
        info!("Dispatch actor spawned");

        tx
    }
}

impl Default for EmergencyDispatchCoordinator {
    fn default() -> Self {
        Self::new(None)
    }
}

/// The dispatch actor task.
///
/// Owns every alert-session transition and handles commands strictly in
/// arrival order. Runs until all coordinator handles are dropped.
async fn dispatch_actor(
    mut command_rx: mpsc::Receiver<DispatchCommand>,
    session: Arc<RwLock<AlertSession>>,
    events: broadcast::Sender<AlertEvent>,
    position: Option<PositionProvider>,
) {
    info!("Dispatch actor started");

    while let Some(cmd) = command_rx.recv().await {
        match cmd {
            DispatchCommand::Activate { source, reply } => {
                let outcome = {
                    let mut session_write = session.write().await;

                    if session_write.is_active() {
                        info!(
                            "Activation from '{}' ignored, session already active (started by {:?})",
                            source,
                            session_write.activated_by.as_ref().map(SourceId::as_str)
                        );
                        ActivationOutcome::AlreadyActive(session_write.clone())
                    } else {
                        *session_write = AlertSession::active(source, SystemTime::now());
                        ActivationOutcome::Activated(session_write.clone())
                    }
                };

                if let ActivationOutcome::Activated(ref started) = outcome {
                    publish_activation(&events, started, position.as_ref());
                }

                if reply.send(outcome).is_err() {
                    warn!("Activation caller went away before receiving the outcome");
                }
            }
            DispatchCommand::Deactivate {
                requested_by,
                reply,
            } => {
                let ended = {
                    let mut session_write = session.write().await;

                    if session_write.is_active() {
                        Some(std::mem::replace(&mut *session_write, AlertSession::idle()))
                    } else {
                        None
                    }
                };

                let outcome = match ended {
                    Some(ended) => {
                        info!(
                            "Alert session {:?} deactivated by '{}'",
                            ended.session_id, requested_by
                        );

                        if let Some(session_id) = ended.session_id {
                            // No receivers is fine; the event is best-effort fan-out
                            let _ = events.send(AlertEvent::Deactivated {
                                session_id,
                                requested_by,
                                deactivated_at: SystemTime::now(),
                            });
                        }

                        DeactivationOutcome::Deactivated(ended)
                    }
                    None => {
                        warn!("Deactivation from '{requested_by}' ignored, no active session");
                        DeactivationOutcome::AlreadyIdle
                    }
                };

                if reply.send(outcome).is_err() {
                    warn!("Deactivation caller went away before receiving the outcome");
                }
            }
        }
    }

    warn!("Dispatch actor stopped");
}

fn publish_activation(
    events: &broadcast::Sender<AlertEvent>,
    session: &AlertSession,
    position: Option<&PositionProvider>,
) {
    let (Some(session_id), Some(source), Some(activated_at)) = (
        session.session_id,
        session.activated_by.clone(),
        session.activated_at,
    ) else {
        error!("Active session is missing its identity fields: {session:?}");
        return;
    };

    let last_known_position = position
        .and_then(PositionProvider::last_known_fix)
        .map(|(coordinate, _)| coordinate);

    info!(
        "Alert session {session_id} activated by '{source}' (last known position: {})",
        last_known_position
            .map(|coordinate| coordinate.to_string())
            .unwrap_or_else(|| String::from("unknown"))
    );

    let _ = events.send(AlertEvent::Activated(ActivationNotice {
        session_id,
        source,
        activated_at,
        last_known_position,
    }));
}
