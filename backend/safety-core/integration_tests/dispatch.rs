use crate::helpers::{Script, ScriptedLocationService, origin};

use safety_core::dispatch::{
    ActivationOutcome, AlertEvent, DeactivationOutcome, EmergencyDispatchCoordinator,
};
use safety_core::position::PositionProvider;

use models::{AlertState, SourceId};

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tokio::runtime::{Builder, Runtime};
use tokio::sync::broadcast::error::TryRecvError;

// ============================================================================
// Activation races
// ============================================================================

/// **VALUE**: Proves the at-most-one-active invariant under real parallelism.
///
/// **WHY THIS MATTERS**: A person can press the panic control at the same instant the
/// voice engine hears "help". Both sources must converge on one session, or the
/// dispatch collaborator calls emergency services twice.
///
/// **BUG THIS CATCHES**: Would catch a check-then-set that is not atomic (e.g. reading the
/// session, awaiting, then writing), where two callers both observe `Idle`.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn given_simultaneous_activations_when_racing_then_exactly_one_initiates() {
    // GIVEN: An idle coordinator and 32 distinct trigger sources
    let coordinator = EmergencyDispatchCoordinator::default();
    let mut events = coordinator.subscribe();
    let sources: Vec<String> = (0..32).map(|i| format!("sensor-{i}")).collect();

    // WHEN: Every source activates concurrently from its own task
    let handles = sources.iter().cloned().map(|source| {
        let coordinator = coordinator.clone();
        tokio::spawn(async move { coordinator.activate(source.as_str()).await })
    });
    let outcomes: Vec<ActivationOutcome> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked").expect("actor alive"))
        .collect();

    // THEN: Exactly one caller initiated; all observed the same session
    let initiated: Vec<&ActivationOutcome> =
        outcomes.iter().filter(|outcome| outcome.initiated()).collect();
    assert_eq!(initiated.len(), 1, "exactly one activation must win");

    let winner = initiated[0].session();
    let batch: HashSet<&str> = sources.iter().map(String::as_str).collect();
    let activated_by = winner.activated_by.as_ref().expect("winner has a source");
    assert!(batch.contains(activated_by.as_str()));

    for outcome in &outcomes {
        assert_eq!(outcome.session().session_id, winner.session_id);
    }

    // THEN: One Activated event, nothing else
    assert!(matches!(events.try_recv(), Ok(AlertEvent::Activated(_))));
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

/// **VALUE**: The manual-then-voice scenario from the dashboard.
///
/// **BUG THIS CATCHES**: Would catch the second source overwriting `activated_by`, which
/// would misattribute the emergency in the notification.
#[tokio::test]
async fn given_manual_activation_when_voice_activates_then_voice_is_noop() {
    // GIVEN: Position unknown, manual activation
    let coordinator = EmergencyDispatchCoordinator::default();
    let first = coordinator.activate(SourceId::manual()).await.unwrap();

    // WHEN: Voice activates immediately after
    let second = coordinator.activate(SourceId::voice()).await.unwrap();

    // THEN: Second call only confirms; manual stays the activator
    assert!(first.initiated());
    assert!(matches!(second, ActivationOutcome::AlreadyActive(_)));
    let session = coordinator.current_session().await;
    assert_eq!(session.state, AlertState::Active);
    assert_eq!(session.activated_by, Some(SourceId::manual()));
    assert_eq!(second.session(), &session);
}

#[tokio::test]
async fn given_duplicate_activation_when_ignored_then_activation_time_is_unchanged() {
    let coordinator = EmergencyDispatchCoordinator::default();
    let first = coordinator.activate("manual").await.unwrap();

    tokio::time::sleep(Duration::from_millis(5)).await;
    coordinator.activate("manual").await.unwrap();

    let session = coordinator.current_session().await;
    assert_eq!(session.activated_at, first.session().activated_at);
}

// ============================================================================
// Deactivation
// ============================================================================

/// **VALUE**: Verifies that disarming twice is harmless.
///
/// **WHY THIS MATTERS**: A shaky tap on "I'm safe" can send the cancel twice. The second
/// one must not surface as an error dialog.
#[tokio::test]
async fn given_active_session_when_deactivated_twice_then_idle_both_times() {
    // GIVEN: An active session
    let coordinator = EmergencyDispatchCoordinator::default();
    coordinator.activate(SourceId::manual()).await.unwrap();

    // WHEN: Deactivating twice
    let first = coordinator.deactivate(SourceId::manual()).await.unwrap();
    let after_first = coordinator.current_session().await;
    let second = coordinator.deactivate(SourceId::manual()).await.unwrap();
    let after_second = coordinator.current_session().await;

    // THEN: Idle both times, second call a no-op
    assert!(matches!(first, DeactivationOutcome::Deactivated(_)));
    assert_eq!(second, DeactivationOutcome::AlreadyIdle);
    assert_eq!(after_first.state, AlertState::Idle);
    assert_eq!(after_second.state, AlertState::Idle);
    assert!(after_second.activated_by.is_none());
    assert!(after_second.activated_at.is_none());
}

#[tokio::test]
async fn given_idle_coordinator_when_deactivated_then_no_event_is_sent() {
    let coordinator = EmergencyDispatchCoordinator::default();
    let mut events = coordinator.subscribe();

    let outcome = coordinator.deactivate("manual").await.unwrap();

    assert_eq!(outcome, DeactivationOutcome::AlreadyIdle);
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

/// **VALUE**: The full activate → deactivate → re-activate cycle.
///
/// **BUG THIS CATCHES**: Would catch a coordinator that latches after the first session
/// (e.g. a `Once` or a flag that is never cleared), leaving the user unable to raise a
/// second emergency.
#[tokio::test]
async fn given_deactivated_session_when_voice_activates_then_new_session_starts() {
    // GIVEN: A manual session that has been cancelled
    let coordinator = EmergencyDispatchCoordinator::default();
    let first = coordinator.activate("manual").await.unwrap();
    coordinator.deactivate("manual").await.unwrap();
    assert_eq!(coordinator.current_session().await.state, AlertState::Idle);

    // WHEN: Voice activates
    let second = coordinator.activate("voice").await.unwrap();

    // THEN: A fresh session attributed to voice
    assert!(second.initiated());
    let session = coordinator.current_session().await;
    assert_eq!(session.activated_by, Some(SourceId::voice()));
    assert_ne!(session.session_id, first.session().session_id);
}

#[tokio::test]
async fn given_full_cycle_when_subscribed_then_events_arrive_in_order() {
    let coordinator = EmergencyDispatchCoordinator::default();
    let mut events = coordinator.subscribe();

    let activated = coordinator.activate("manual").await.unwrap();
    coordinator.deactivate("manual").await.unwrap();

    let session_id = activated.session().session_id.unwrap();
    match events.recv().await.unwrap() {
        AlertEvent::Activated(notice) => {
            assert_eq!(notice.session_id, session_id);
            assert_eq!(notice.source, SourceId::manual());
            assert_eq!(notice.last_known_position, None);
        }
        other => panic!("expected Activated, got {other:?}"),
    }
    match events.recv().await.unwrap() {
        AlertEvent::Deactivated {
            session_id: ended,
            requested_by,
            ..
        } => {
            assert_eq!(ended, session_id);
            assert_eq!(requested_by, SourceId::manual());
        }
        other => panic!("expected Deactivated, got {other:?}"),
    }
}

// ============================================================================
// Actor restart
// ============================================================================

fn current_thread_runtime() -> Runtime {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("current-thread runtime")
}

/// **VALUE**: An active alert can still be cancelled after its actor task is gone.
///
/// **WHY THIS MATTERS**: Deactivation is the user's only way out of an alert. If the
/// runtime that hosted the actor shuts down, the next runtime must still be able to
/// disarm the session the mirror reports as active.
///
/// **BUG THIS CATCHES**: Would catch a coordinator that caches its first actor sender
/// forever, turning every later call into `ActorUnavailable` while the session stays
/// `Active`.
#[test]
fn given_actor_runtime_dropped_when_deactivating_on_new_runtime_then_session_ends() {
    // GIVEN: A session activated on a runtime that is then shut down
    let coordinator = EmergencyDispatchCoordinator::default();
    let runtime = current_thread_runtime();
    let started = runtime
        .block_on(coordinator.activate(SourceId::manual()))
        .expect("activate");
    drop(runtime);

    // WHEN: Deactivating from a fresh runtime
    let runtime = current_thread_runtime();
    let (outcome, session) = runtime.block_on(async {
        let outcome = coordinator.deactivate(SourceId::manual()).await;
        (outcome, coordinator.current_session().await)
    });

    // THEN: The original session is ended and the cell is idle
    match outcome {
        Ok(DeactivationOutcome::Deactivated(ended)) => {
            assert_eq!(ended.session_id, started.session().session_id);
        }
        other => panic!("expected Deactivated, got {other:?}"),
    }
    assert_eq!(session.state, AlertState::Idle);
}

#[test]
fn given_actor_runtime_dropped_when_activating_again_then_existing_session_is_kept() {
    let coordinator = EmergencyDispatchCoordinator::default();
    let runtime = current_thread_runtime();
    runtime
        .block_on(coordinator.activate(SourceId::manual()))
        .expect("activate");
    drop(runtime);

    let runtime = current_thread_runtime();
    let outcome = runtime
        .block_on(coordinator.activate(SourceId::voice()))
        .expect("activate after restart");

    assert!(matches!(outcome, ActivationOutcome::AlreadyActive(_)));
    assert_eq!(outcome.session().activated_by, Some(SourceId::manual()));
}

// ============================================================================
// Position in notices
// ============================================================================

/// **VALUE**: Verifies that an activation carries the user's last known fix.
///
/// **WHY THIS MATTERS**: Responders are sent to this coordinate.
#[tokio::test]
async fn given_known_position_when_activating_then_notice_carries_coordinate() {
    // GIVEN: A provider that has acquired a fix
    let service = Arc::new(ScriptedLocationService::new([Script::Fix(
        origin(),
        Duration::ZERO,
    )]));
    let position = PositionProvider::new(service, Duration::from_secs(1));
    position.request_position();
    assert!(position.wait_until_settled().await.is_known());

    let coordinator = EmergencyDispatchCoordinator::new(Some(position));
    let mut events = coordinator.subscribe();

    // WHEN: Activating
    coordinator.activate("manual").await.unwrap();

    // THEN: The notice includes the fix
    match events.recv().await.unwrap() {
        AlertEvent::Activated(notice) => {
            assert_eq!(notice.last_known_position, Some(origin()));
        }
        other => panic!("expected Activated, got {other:?}"),
    }
}

/// **VALUE**: Deactivation stays available while a position query is outstanding.
#[tokio::test]
async fn given_position_query_in_flight_when_activating_and_deactivating_then_neither_blocks() {
    // GIVEN: A platform that never answers
    let service = Arc::new(ScriptedLocationService::new([Script::Hang]));
    let position = PositionProvider::new(service, Duration::from_secs(30));
    position.request_position();
    let coordinator = EmergencyDispatchCoordinator::new(Some(position.clone()));

    // WHEN: Driving the coordinator with a tight deadline
    let cycle = async {
        coordinator.activate("manual").await.unwrap();
        coordinator.deactivate("manual").await.unwrap()
    };
    let outcome = tokio::time::timeout(Duration::from_secs(1), cycle)
        .await
        .expect("coordinator blocked on the position query");

    // THEN: Both transitions happened while the query is still pending
    assert!(matches!(outcome, DeactivationOutcome::Deactivated(_)));
    assert!(position.current_state().is_acquiring());
}
