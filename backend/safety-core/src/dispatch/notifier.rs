//! Boundary to the external notification/dispatch collaborator.
//!
//! Contacting emergency services or trusted contacts happens outside this
//! crate. The forwarder here hands each activation to an [`AlertNotifier`]
//! exactly once; delivery guarantees are the notifier's concern and failures
//! are logged, never retried.

use crate::dispatch::coordinator::EmergencyDispatchCoordinator;
use crate::dispatch::events::{ActivationNotice, AlertEvent};
use crate::error::NotifyError;

use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

pub trait AlertNotifier: Send + Sync {
    fn notify(&self, notice: &ActivationNotice) -> Result<(), NotifyError>;
}

/// Writes activations to the log. Default when no SMS/call backend is wired.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotifier;

impl AlertNotifier for LoggingNotifier {
    fn notify(&self, notice: &ActivationNotice) -> Result<(), NotifyError> {
        match notice.last_known_position {
            Some(position) => warn!(
                "EMERGENCY session {} raised by '{}' near {position}",
                notice.session_id, notice.source
            ),
            None => warn!(
                "EMERGENCY session {} raised by '{}', position unknown",
                notice.session_id, notice.source
            ),
        }
        Ok(())
    }
}

/// Forward every activation event from `coordinator` to `notifier`.
///
/// Subscribes before returning, so no activation issued after this call is
/// missed. The task ends when every coordinator handle has been dropped.
pub fn spawn_notification_forwarder(
    coordinator: &EmergencyDispatchCoordinator,
    notifier: Arc<dyn AlertNotifier>,
) -> JoinHandle<()> {
    let mut events = coordinator.subscribe();

    tokio::spawn(async move {
        info!("Notification forwarder started");

        loop {
            match events.recv().await {
                Ok(AlertEvent::Activated(notice)) => {
                    if let Err(e) = notifier.notify(&notice) {
                        error!(
                            "Notification for session {} failed, not retried: {e}",
                            notice.session_id
                        );
                    }
                }
                Ok(AlertEvent::Deactivated { session_id, .. }) => {
                    debug!("Session {session_id} ended, nothing to forward");
                }
                Err(RecvError::Lagged(skipped)) => {
                    error!("Notification forwarder lagged, {skipped} alert events were dropped");
                }
                Err(RecvError::Closed) => break,
            }
        }

        info!("Notification forwarder stopped");
    })
}
