//! Domain models for the Salama emergency coordination core.
//!
//! Pure data: coordinates, safe locations, the position cell's states and the
//! alert session record. The behaviour that drives these values lives in
//! `safety-core`; this crate only validates and describes them.

pub mod alert;
pub mod coordinate;
pub mod error;
pub mod position;
pub mod safe_location;

pub use alert::{AlertSession, AlertState, SourceId};
pub use common::ErrorLocation;
pub use coordinate::Coordinate;
pub use error::model_error::ModelError;
pub use position::PositionState;
pub use safe_location::builder::SafeLocationBuilder;
pub use safe_location::{LocationCategory, SafeLocation, parse_category_filter};

#[cfg(test)]
mod tests;
