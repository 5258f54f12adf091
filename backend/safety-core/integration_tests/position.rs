use crate::helpers::{Script, ScriptedLocationService, north_of_origin, origin};

use safety_core::dispatch::EmergencyDispatchCoordinator;
use safety_core::error::position::PositionFailureKind;
use safety_core::position::{PositionProvider, PositionRequest};

use models::PositionState;

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::{Builder, Runtime};

fn provider(
    script: impl IntoIterator<Item = Script>,
    timeout: Duration,
) -> (PositionProvider, Arc<ScriptedLocationService>) {
    let service = Arc::new(ScriptedLocationService::new(script));
    let provider = PositionProvider::new(service.clone(), timeout);
    (provider, service)
}

// ============================================================================
// In-flight deduplication
// ============================================================================

/// **VALUE**: Verifies that a second request while acquiring issues no second query.
///
/// **WHY THIS MATTERS**: The user mashing "Update Location" must not stack platform
/// queries; each one costs battery and can trigger a fresh permission prompt.
///
/// **BUG THIS CATCHES**: Would catch a check-then-set split across two lock scopes,
/// letting both requests see `Unknown` and both spawn a query.
#[tokio::test]
async fn given_acquiring_when_requesting_again_then_no_second_query() {
    // GIVEN: A slow platform answer
    let (provider, service) = provider(
        [Script::Fix(origin(), Duration::from_millis(100))],
        Duration::from_secs(5),
    );

    // WHEN: Two requests in a row
    let first = provider.request_position();
    let second = provider.request_position();

    // THEN: Only the first started anything
    assert_eq!(first, PositionRequest::Started);
    assert_eq!(second, PositionRequest::AlreadyInFlight);
    assert!(provider.current_state().is_acquiring());

    provider.wait_until_settled().await;
    assert_eq!(service.calls(), 1);
}

#[tokio::test]
async fn given_fix_when_settled_then_state_is_known_with_coordinate() {
    let (provider, _) = provider(
        [Script::Fix(origin(), Duration::ZERO)],
        Duration::from_secs(1),
    );

    provider.request_position();
    let state = provider.wait_until_settled().await;

    assert_eq!(state.coordinate(), Some(origin()));
    assert!(matches!(provider.current_state(), PositionState::Known { .. }));
    assert_eq!(provider.last_failure(), None);
}

// ============================================================================
// Failure classification
// ============================================================================

/// **VALUE**: Permission denial degrades to `Unknown`, never to an error.
#[tokio::test]
async fn given_permission_denied_when_requesting_then_state_is_unknown() {
    // GIVEN: The user declines the location prompt
    let (provider, _) = provider([Script::Deny], Duration::from_secs(1));

    // WHEN: Requesting a position
    provider.request_position();
    let state = provider.wait_until_settled().await;

    // THEN: Unknown, with the reason kept for diagnostics
    assert_eq!(state, PositionState::Unknown);
    assert_eq!(provider.last_failure(), Some(PositionFailureKind::PermissionDenied));
}

/// **VALUE**: Verifies that a platform that never answers cannot wedge the provider.
///
/// **BUG THIS CATCHES**: Would catch a missing timeout around the platform query, which
/// leaves the state `Acquiring` forever and every later request a no-op.
#[tokio::test]
async fn given_hanging_platform_when_timeout_elapses_then_unknown_with_timeout_kind() {
    // GIVEN: A platform that hangs, a 50ms budget
    let (provider, _) = provider([Script::Hang], Duration::from_millis(50));

    // WHEN: Requesting and waiting
    provider.request_position();
    let state = tokio::time::timeout(Duration::from_secs(2), provider.wait_until_settled())
        .await
        .expect("provider never settled");

    // THEN: Timed out into Unknown
    assert_eq!(state, PositionState::Unknown);
    assert_eq!(provider.last_failure(), Some(PositionFailureKind::Timeout));
}

#[tokio::test]
async fn given_unavailable_platform_when_requesting_then_unavailable_kind() {
    let (provider, _) = provider([Script::Unavailable], Duration::from_secs(1));

    provider.request_position();
    provider.wait_until_settled().await;

    assert_eq!(provider.last_failure(), Some(PositionFailureKind::Unavailable));
}

/// **VALUE**: A crashing platform service does not leave the state stuck in `Acquiring`.
#[tokio::test]
async fn given_panicking_platform_when_requesting_then_state_reverts_to_unknown() {
    let (provider, _) = provider([Script::Panic], Duration::from_secs(1));

    provider.request_position();
    let state = tokio::time::timeout(Duration::from_secs(2), provider.wait_until_settled())
        .await
        .expect("provider stuck in Acquiring");

    assert_eq!(state, PositionState::Unknown);
    assert_eq!(provider.request_position(), PositionRequest::Started);
}

fn current_thread_runtime() -> Runtime {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("current-thread runtime")
}

/// **VALUE**: A query task that never got polled still releases `Acquiring`.
///
/// **WHY THIS MATTERS**: With the cell stuck in `Acquiring`, every later request is
/// swallowed as already in flight and the directory stays unranked for the rest of
/// the process.
///
/// **BUG THIS CATCHES**: Would catch the revert guard being created inside the spawned
/// future, where it does not exist yet when the runtime drops the task unpolled.
#[test]
fn given_runtime_dropped_before_query_runs_when_checking_then_state_is_unknown() {
    // GIVEN: A request issued on a runtime that shuts down straight away
    let (provider, _) = provider(
        [Script::Unavailable, Script::Unavailable],
        Duration::from_secs(5),
    );
    let runtime = current_thread_runtime();
    let first = runtime.block_on(async { provider.request_position() });

    // WHEN: The runtime is dropped with the query task still pending
    drop(runtime);

    // THEN: The cell is back to Unknown and a new runtime can request again
    assert_eq!(first, PositionRequest::Started);
    assert_eq!(provider.current_state(), PositionState::Unknown);

    let runtime = current_thread_runtime();
    let second = runtime.block_on(async {
        let request = provider.request_position();
        provider.wait_until_settled().await;
        request
    });
    assert_eq!(second, PositionRequest::Started);
}

#[test]
fn given_runtime_dropped_mid_query_when_checking_then_state_is_unknown() {
    let (provider, service) = provider([Script::Hang], Duration::from_secs(5));
    let runtime = current_thread_runtime();
    runtime.block_on(async {
        provider.request_position();
        // Let the query task start and park on the platform call
        while service.calls() == 0 {
            tokio::task::yield_now().await;
        }
    });

    drop(runtime);

    assert_eq!(provider.current_state(), PositionState::Unknown);
    assert_eq!(service.calls(), 1);
}

// ============================================================================
// Refresh
// ============================================================================

/// **VALUE**: The newest fix replaces the previous one.
///
/// **BUG THIS CATCHES**: Would catch a provider that keeps the first fix forever, so
/// the nearest-location list stays ranked against where the user used to be.
#[tokio::test]
async fn given_known_position_when_refreshed_then_newest_fix_wins() {
    // GIVEN: Two successive fixes 3 km apart
    let moved = north_of_origin(3.0);
    let (provider, _) = provider(
        [
            Script::Fix(origin(), Duration::ZERO),
            Script::Fix(moved, Duration::ZERO),
        ],
        Duration::from_secs(1),
    );
    provider.request_position();
    assert_eq!(provider.wait_until_settled().await.coordinate(), Some(origin()));

    // WHEN: Requesting again from Known
    let request = provider.request_position();
    let state = provider.wait_until_settled().await;

    // THEN: A new query ran and its fix replaced the old one
    assert_eq!(request, PositionRequest::Started);
    assert_eq!(state.coordinate(), Some(moved));
    assert_eq!(provider.last_known_fix().map(|(coordinate, _)| coordinate), Some(moved));
}

#[tokio::test]
async fn given_fix_then_failure_when_refreshing_then_last_known_fix_is_kept() {
    let (provider, _) = provider(
        [Script::Fix(origin(), Duration::ZERO), Script::Deny],
        Duration::from_secs(1),
    );
    provider.request_position();
    provider.wait_until_settled().await;

    provider.request_position();
    let state = provider.wait_until_settled().await;

    assert_eq!(state, PositionState::Unknown);
    assert_eq!(provider.last_known_fix().map(|(coordinate, _)| coordinate), Some(origin()));
}

// ============================================================================
// Independence from activation
// ============================================================================

/// **VALUE**: Activation proceeds while a position query is still outstanding.
///
/// **WHY THIS MATTERS**: An emergency must never wait on GPS.
#[tokio::test]
async fn given_acquiring_when_panic_pressed_then_activation_completes_immediately() {
    // GIVEN: A query that will take 10 seconds
    let (provider, _) = provider(
        [Script::Fix(origin(), Duration::from_secs(10))],
        Duration::from_secs(30),
    );
    provider.request_position();
    let coordinator = EmergencyDispatchCoordinator::new(Some(provider.clone()));

    // WHEN: Activating under a short deadline
    let outcome = tokio::time::timeout(Duration::from_millis(500), coordinator.activate("manual"))
        .await
        .expect("activation waited on the position query")
        .unwrap();

    // THEN: Active, position still acquiring
    assert!(outcome.initiated());
    assert!(provider.current_state().is_acquiring());
}

#[tokio::test]
async fn given_subscriber_when_acquiring_then_transitions_are_observed() {
    let (provider, _) = provider(
        [Script::Fix(origin(), Duration::from_millis(20))],
        Duration::from_secs(1),
    );
    let mut receiver = provider.subscribe();

    provider.request_position();
    receiver.changed().await.unwrap();
    assert!(receiver.borrow_and_update().is_acquiring());

    receiver.changed().await.unwrap();
    assert!(receiver.borrow_and_update().is_known());
}
