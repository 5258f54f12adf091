use models::{Coordinate, SourceId};

use std::time::SystemTime;

use serde::Serialize;
use uuid::Uuid;

/// What the notification collaborator receives when an alert starts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivationNotice {
    pub session_id: Uuid,
    pub source: SourceId,
    pub activated_at: SystemTime,
    pub last_known_position: Option<Coordinate>,
}

/// Broadcast to every subscriber on each session transition.
///
/// Exactly one `Activated` is sent per `Idle -> Active` transition and one
/// `Deactivated` per `Active -> Idle`. No-op calls send nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AlertEvent {
    Activated(ActivationNotice),
    Deactivated {
        session_id: Uuid,
        requested_by: SourceId,
        deactivated_at: SystemTime,
    },
}
