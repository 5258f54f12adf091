use std::fmt::{Display, Formatter, Result as FormatResult};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a trigger source (`manual`, `voice`, ...).
///
/// Sources are open-ended: future sensor triggers pick their own id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(String);

impl SourceId {
    pub const MANUAL: &'static str = "manual";
    pub const VOICE: &'static str = "voice";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The panic control on the dashboard.
    pub fn manual() -> Self {
        Self::new(Self::MANUAL)
    }

    /// The voice-recognition collaborator.
    pub fn voice() -> Self {
        Self::new(Self::VOICE)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SourceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl Display for SourceId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        formatter.write_str(&self.0)
    }
}

impl PartialEq<&str> for SourceId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AlertState {
    #[default]
    Idle,
    Active,
}

/// Whether an emergency is currently being signalled, by whom and since when.
///
/// One of these exists per process. It starts `Idle`, and deactivation
/// returns it to `Idle` rather than discarding it.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AlertSession {
    pub state: AlertState,
    pub activated_by: Option<SourceId>,
    pub activated_at: Option<SystemTime>,
    /// Fresh for every activation so downstream dispatch can deduplicate.
    pub session_id: Option<Uuid>,
}

impl AlertSession {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn active(source: SourceId, at: SystemTime) -> Self {
        Self {
            state: AlertState::Active,
            activated_by: Some(source),
            activated_at: Some(at),
            session_id: Some(Uuid::new_v4()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == AlertState::Active
    }
}
