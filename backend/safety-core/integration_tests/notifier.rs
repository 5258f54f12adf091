use crate::helpers::RecordingNotifier;

use safety_core::dispatch::{EmergencyDispatchCoordinator, spawn_notification_forwarder};

use models::SourceId;

use std::sync::Arc;
use std::time::Duration;

/// Poll until `notifier` holds `expected` notices or the deadline passes.
async fn wait_for_notices(notifier: &RecordingNotifier, expected: usize) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while notifier.recorded().len() < expected && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

/// **VALUE**: Every activation reaches the dispatch collaborator exactly once.
///
/// **BUG THIS CATCHES**: Would catch a forwarder that also forwards `AlreadyActive`
/// confirmations, paging emergency contacts once per button press.
#[tokio::test]
async fn given_forwarder_when_activated_twice_then_one_notice() {
    // GIVEN: A forwarder wired to a recording notifier
    let coordinator = EmergencyDispatchCoordinator::default();
    let notifier = Arc::new(RecordingNotifier::default());
    let _forwarder = spawn_notification_forwarder(&coordinator, notifier.clone());

    // WHEN: Manual then voice activation
    coordinator.activate(SourceId::manual()).await.unwrap();
    coordinator.activate(SourceId::voice()).await.unwrap();
    wait_for_notices(&notifier, 1).await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    // THEN: One notice, attributed to manual
    let notices = notifier.recorded();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].source, SourceId::manual());
}

#[tokio::test]
async fn given_forwarder_when_two_separate_sessions_then_two_distinct_notices() {
    let coordinator = EmergencyDispatchCoordinator::default();
    let notifier = Arc::new(RecordingNotifier::default());
    let _forwarder = spawn_notification_forwarder(&coordinator, notifier.clone());

    coordinator.activate("manual").await.unwrap();
    coordinator.deactivate("manual").await.unwrap();
    coordinator.activate("voice").await.unwrap();
    wait_for_notices(&notifier, 2).await;

    let notices = notifier.recorded();
    assert_eq!(notices.len(), 2);
    assert_ne!(notices[0].session_id, notices[1].session_id);
    assert_eq!(notices[1].source, SourceId::voice());
}

/// **VALUE**: A failing delivery backend never rolls back or blocks the session.
#[tokio::test]
async fn given_failing_notifier_when_activated_then_session_stays_active() {
    // GIVEN: A notifier whose backend is down
    let coordinator = EmergencyDispatchCoordinator::default();
    let notifier = Arc::new(RecordingNotifier::failing());
    let forwarder = spawn_notification_forwarder(&coordinator, notifier.clone());

    // WHEN: Activating
    let outcome = coordinator.activate("manual").await.unwrap();
    wait_for_notices(&notifier, 1).await;

    // THEN: Delivery was attempted once, the session is active, the forwarder lives on
    assert!(outcome.initiated());
    assert_eq!(notifier.recorded().len(), 1);
    assert!(coordinator.current_session().await.is_active());
    assert!(!forwarder.is_finished());
}
