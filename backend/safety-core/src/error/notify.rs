use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum NotifyError {
    #[error("Notification Delivery Error: {message} {location}")]
    Delivery {
        message: String,
        location: ErrorLocation,
    },
}
