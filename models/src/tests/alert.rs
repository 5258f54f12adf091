use crate::{AlertSession, AlertState, SourceId};

use std::time::SystemTime;

#[test]
fn given_default_session_when_created_then_is_idle_and_empty() {
    let session = AlertSession::default();

    assert_eq!(session.state, AlertState::Idle);
    assert!(session.activated_by.is_none());
    assert!(session.activated_at.is_none());
    assert!(session.session_id.is_none());
}

/// **VALUE**: Verifies that each activation gets its own session id.
///
/// **WHY THIS MATTERS**: The notification collaborator deduplicates on this id. Reusing one
/// across activations would make it swallow the second emergency.
#[test]
fn given_two_activations_when_creating_sessions_then_ids_differ() {
    // GIVEN / WHEN: Two active sessions
    let now = SystemTime::now();
    let first = AlertSession::active(SourceId::manual(), now);
    let second = AlertSession::active(SourceId::manual(), now);

    // THEN: Distinct ids, both active
    assert!(first.is_active() && second.is_active());
    assert_ne!(first.session_id, second.session_id);
}

#[test]
fn given_source_ids_when_compared_to_str_then_match_by_value() {
    assert_eq!(SourceId::manual(), "manual");
    assert_eq!(SourceId::voice(), "voice");
    assert_eq!(SourceId::from("sensor-fall").as_str(), "sensor-fall");
}
