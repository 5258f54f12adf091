use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum LinkError {
    #[error("Invalid Url Error: {message} {location}")]
    InvalidUrl {
        message: String,
        location: ErrorLocation,
    },
}

impl From<url::ParseError> for LinkError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        LinkError::InvalidUrl {
            message: error.to_string(),
            location: ErrorLocation::caller(),
        }
    }
}
