//! Emergency-alert arbitration.
//!
//! Independent trigger sources (the panic control, the voice engine, future
//! sensors) all call into one [`EmergencyDispatchCoordinator`]. It is the only
//! writer of the process-wide [`AlertSession`](models::AlertSession) and turns
//! any burst of near-simultaneous activation requests into exactly one
//! session, so downstream dispatch can treat activation as at-most-once.

mod coordinator;
mod events;
mod notifier;

pub use coordinator::{ActivationOutcome, DeactivationOutcome, EmergencyDispatchCoordinator};
pub use events::{ActivationNotice, AlertEvent};
pub use notifier::{AlertNotifier, LoggingNotifier, spawn_notification_forwarder};
