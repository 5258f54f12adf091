use common::ErrorLocation;

use thiserror::Error as ThisError;

/// The coordinator's actor task is gone.
///
/// Duplicate activations and idle deactivations are outcomes, not errors; this
/// is the only way a dispatch call can fail.
#[derive(Debug, ThisError)]
pub enum DispatchError {
    #[error("Dispatch Actor Unavailable Error: {message} {location}")]
    ActorUnavailable {
        message: String,
        location: ErrorLocation,
    },
}
