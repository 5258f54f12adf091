use safety_core::error::{ConfigError, CoreError, DispatchError};

use common::ErrorLocation;

use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the terminal dashboard.
///
/// Core errors are flattened to their message so the whole enum stays
/// serializable for status output; the original location is kept in the text.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum DashboardError {
    /// Error from this app (startup, terminal I/O, command parsing)
    #[error("Dashboard Error: {message} {location}")]
    App {
        message: String,
        location: ErrorLocation,
    },

    /// Error from safety-core (config, catalog, dispatch, ...)
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },
}

impl From<CoreError> for DashboardError {
    #[track_caller]
    fn from(error: CoreError) -> Self {
        DashboardError::Core {
            message: error.to_string(),
            location: ErrorLocation::caller(),
        }
    }
}

impl From<ConfigError> for DashboardError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        DashboardError::Core {
            message: error.to_string(),
            location: ErrorLocation::caller(),
        }
    }
}

impl From<DispatchError> for DashboardError {
    #[track_caller]
    fn from(error: DispatchError) -> Self {
        DashboardError::Core {
            message: error.to_string(),
            location: ErrorLocation::caller(),
        }
    }
}
