//! Shared plumbing for the Salama workspace.
//!
//! Every error enum in the workspace carries an [`ErrorLocation`] so that a
//! log line points at the site that produced the failure, not at the
//! `From` impl or constructor that wrapped it.

pub mod error;

pub use error::error_location::ErrorLocation;

#[cfg(test)]
mod tests;
