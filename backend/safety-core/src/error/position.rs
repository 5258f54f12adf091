use common::ErrorLocation;

use thiserror::Error as ThisError;

/// Failure reported by the platform location service.
///
/// These are routine outcomes for a privacy-conscious user base. The position
/// provider absorbs them into `PositionState::Unknown`; they never escape
/// `request_position`.
#[derive(Debug, ThisError)]
pub enum PositionError {
    #[error("Permission Denied Error: {message} {location}")]
    PermissionDenied {
        message: String,
        location: ErrorLocation,
    },

    #[error("Timeout Error: {message} {location}")]
    Timeout {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unavailable Error: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },
}

/// Payload-free classification of a [`PositionError`], kept after the error is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionFailureKind {
    PermissionDenied,
    Timeout,
    Unavailable,
}

impl PositionError {
    pub fn kind(&self) -> PositionFailureKind {
        match self {
            PositionError::PermissionDenied { .. } => PositionFailureKind::PermissionDenied,
            PositionError::Timeout { .. } => PositionFailureKind::Timeout,
            PositionError::Unavailable { .. } => PositionFailureKind::Unavailable,
        }
    }
}
