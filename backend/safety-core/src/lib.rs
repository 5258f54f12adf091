//! Emergency coordination core for the Salama personal-safety dashboard.
//!
//! - [`position`]: acquires and caches the user's coordinates
//! - [`directory`]: filters and ranks safe locations by distance
//! - [`dispatch`]: arbitrates a single emergency-alert session across trigger sources
//! - [`voice`]: turns recognised transcripts into voice-source activations
//! - [`dashboard`]: composes the above for the presentation layer
//!
//! Catalog data and the platform location query are injected through
//! [`catalog::CatalogSource`] and [`position::LocationService`], so none of
//! this depends on a platform at test time.

pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod directory;
pub mod dispatch;
pub mod error;
pub mod position;
pub mod services;
pub mod voice;

pub use services::CoreServices;

#[cfg(test)]
mod tests;

pub const APP_NAME: &str = "salama";
pub const MAPS_HOST: &str = "www.google.com";
pub const MAPS_SEARCH_URL: &str = const_format::concatcp!("https://", MAPS_HOST, "/maps/search/");
