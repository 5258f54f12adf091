use common::ErrorLocation;
use models::ModelError;

use std::path::PathBuf;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum CatalogError {
    #[error("Catalog Read Error: {path}: {source} {location}")]
    Read {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog Parse Error: {path}: {reason} {location}")]
    Parse {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },

    #[error("Catalog Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Catalog Duplicate Id Error: '{id}' appears more than once {location}")]
    DuplicateId { id: String, location: ErrorLocation },
}

impl From<ModelError> for CatalogError {
    #[track_caller]
    fn from(error: ModelError) -> Self {
        CatalogError::Validation {
            message: error.to_string(),
            location: ErrorLocation::caller(),
        }
    }
}
