use crate::helpers::{Script, ScriptedLocationService, origin};

use safety_core::CoreServices;
use safety_core::catalog::BuiltinCatalog;
use safety_core::config::{AppConfig, DEFAULT_NEARBY_RADIUS_KM};
use safety_core::dashboard::{DashboardController, Tab};
use safety_core::dispatch::{ActivationOutcome, DeactivationOutcome};
use safety_core::position::PositionRequest;

use models::{AlertState, LocationCategory, SourceId};

use std::sync::Arc;
use std::time::Duration;

fn services(
    script: impl IntoIterator<Item = Script>,
) -> (CoreServices, Arc<ScriptedLocationService>) {
    let service = Arc::new(ScriptedLocationService::new(script));
    let services = CoreServices::new(service.clone(), &BuiltinCatalog, &AppConfig::default())
        .expect("core services");
    (services, service)
}

fn dashboard(
    script: impl IntoIterator<Item = Script>,
) -> (
    DashboardController,
    CoreServices,
    Arc<ScriptedLocationService>,
) {
    let (services, service) = services(script);
    let dashboard = services.dashboard(&AppConfig::default());
    (dashboard, services, service)
}

// ============================================================================
// Mount and location
// ============================================================================

/// **VALUE**: Mounting the dashboard requests a position exactly once.
///
/// **BUG THIS CATCHES**: Would catch a mount hook that re-runs on every re-render,
/// re-prompting for location each time the user switches tab.
#[tokio::test]
async fn given_dashboard_when_mounted_twice_then_one_position_request() {
    // GIVEN: A fresh dashboard
    let (mut dashboard, services, service) =
        dashboard([Script::Fix(origin(), Duration::ZERO)]);

    // WHEN: Mounting, switching tab, mounting again
    let first = dashboard.mount();
    dashboard.select_tab(Tab::Map);
    let second = dashboard.mount();
    services.position.wait_until_settled().await;

    // THEN: Only the first mount reached the platform
    assert_eq!(first, Some(PositionRequest::Started));
    assert_eq!(second, None);
    assert_eq!(service.calls(), 1);
    assert_eq!(dashboard.active_tab(), Tab::Map);
}

#[tokio::test]
async fn given_denied_location_when_listing_then_catalog_order_without_distances() {
    let (mut dashboard, services, _) = dashboard([Script::Deny]);
    dashboard.mount();
    services.position.wait_until_settled().await;

    let visible = dashboard.visible_locations();

    let ids: Vec<&str> = visible
        .iter()
        .map(|entry| entry.location.id.as_str())
        .collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    assert!(visible.iter().all(|entry| entry.display_distance().is_none()));
}

/// **VALUE**: "Update Location" re-ranks the list against the new fix.
#[tokio::test]
async fn given_update_location_when_fix_arrives_then_visible_list_is_ranked() {
    // GIVEN: A mounted dashboard whose first query failed
    let (mut dashboard, services, _) = dashboard([
        Script::Unavailable,
        Script::Fix(origin(), Duration::ZERO),
    ]);
    dashboard.mount();
    services.position.wait_until_settled().await;

    // WHEN: The user taps "Update Location" with the hospital filter on
    dashboard.set_filter(Some(LocationCategory::Hospital));
    assert_eq!(dashboard.update_location(), PositionRequest::Started);
    services.position.wait_until_settled().await;

    // THEN: Hospitals only, nearest first, with distances
    let visible = dashboard.visible_locations();
    assert_eq!(visible.len(), 2);
    assert_eq!(visible[0].location.id, "2");
    assert!(visible.iter().all(|entry| entry.distance_km.is_some()));
    assert!(dashboard.position_state().is_known());
}

// ============================================================================
// Panic and cancel
// ============================================================================

#[tokio::test]
async fn given_panic_pressed_when_checking_overlay_then_visible() {
    let (dashboard, _, _) = dashboard([]);
    assert!(!dashboard.overlay_visible().await);

    let outcome = dashboard.press_panic().await.unwrap();

    assert!(matches!(outcome, ActivationOutcome::Activated(_)));
    assert!(dashboard.overlay_visible().await);
    assert_eq!(
        dashboard.alert_session().await.activated_by,
        Some(SourceId::manual())
    );
}

/// **VALUE**: Cancelling requires explicit confirmation.
///
/// **WHY THIS MATTERS**: An attacker grabbing the phone should not be able to silently
/// dismiss the alert with one tap.
#[tokio::test]
async fn given_active_alert_when_cancel_not_confirmed_then_session_stays_active() {
    // GIVEN: An active alert
    let (dashboard, _, _) = dashboard([]);
    dashboard.press_panic().await.unwrap();

    // WHEN: Cancel without confirmation
    let outcome = dashboard.cancel_alert(false).await.unwrap();

    // THEN: Nothing changed
    assert_eq!(outcome, None);
    assert!(dashboard.overlay_visible().await);
}

#[tokio::test]
async fn given_active_alert_when_cancel_confirmed_then_overlay_hidden() {
    let (dashboard, _, _) = dashboard([]);
    dashboard.press_panic().await.unwrap();

    let outcome = dashboard.cancel_alert(true).await.unwrap();

    assert!(matches!(outcome, Some(DeactivationOutcome::Deactivated(_))));
    assert!(!dashboard.overlay_visible().await);
}

#[tokio::test]
async fn given_voice_activation_when_panic_pressed_then_already_active() {
    let (dashboard, services, _) = dashboard([]);
    let voice = services.voice.as_ref().expect("voice enabled by default");
    voice.on_transcript("help").await.unwrap();

    let outcome = dashboard.press_panic().await.unwrap();

    assert!(matches!(outcome, ActivationOutcome::AlreadyActive(_)));
    assert_eq!(
        dashboard.alert_session().await.activated_by,
        Some(SourceId::voice())
    );
}

// ============================================================================
// Quick stats
// ============================================================================

#[tokio::test]
async fn given_known_position_when_reading_quick_stats_then_counts_and_state() {
    let (mut dashboard, services, _) = dashboard([Script::Fix(origin(), Duration::ZERO)]);
    dashboard.mount();
    services.position.wait_until_settled().await;
    dashboard.press_panic().await.unwrap();

    let stats = dashboard.quick_stats().await;

    assert_eq!(stats.catalog_size, 5);
    assert_eq!(stats.nearby.total(), 5);
    assert_eq!(stats.nearby_radius_km, 5.0);
    assert!(stats.voice_listening);
    assert_eq!(stats.alert_state, AlertState::Active);
}

#[tokio::test]
async fn given_small_radius_when_reading_quick_stats_then_only_close_entries() {
    let (services, _) = services([Script::Fix(origin(), Duration::ZERO)]);
    let mut dashboard = services
        .dashboard(&AppConfig::default())
        .with_nearby_radius_km(1.0);
    dashboard.mount();
    services.position.wait_until_settled().await;

    let stats = dashboard.quick_stats().await;

    // Only the central police station is within a kilometre
    assert_eq!(stats.nearby.police, 1);
    assert_eq!(stats.nearby.total(), 1);
}

#[tokio::test]
async fn given_config_default_tab_when_building_dashboard_then_initial_tab_follows() {
    let mut config = AppConfig::default();
    config.ui.default_tab = "voice".to_string();
    let service = Arc::new(ScriptedLocationService::new([]));
    let services = CoreServices::new(service, &BuiltinCatalog, &config).unwrap();

    let dashboard = services.dashboard(&config);

    assert_eq!(dashboard.active_tab(), Tab::Voice);
    assert_eq!(dashboard.filter(), None);
}

#[tokio::test]
async fn given_voice_disabled_when_building_services_then_no_voice_trigger() {
    let mut config = AppConfig::default();
    config.voice.enabled = false;
    let service = Arc::new(ScriptedLocationService::new([]));
    let services = CoreServices::new(service, &BuiltinCatalog, &config).unwrap();

    let dashboard = services.dashboard(&config);

    assert!(services.voice.is_none());
    assert!(!dashboard.quick_stats().await.voice_listening);
}

/// **VALUE**: A controller built without config uses the same nearby radius as the
/// default config.
///
/// **BUG THIS CATCHES**: Would catch the two defaults drifting apart, so that quick
/// stats change depending on how the dashboard was wired.
#[tokio::test]
async fn given_controller_without_config_when_reading_radius_then_matches_config_default() {
    let (services, _) = services([]);

    let dashboard = DashboardController::new(
        services.position.clone(),
        Arc::clone(&services.directory),
        services.coordinator.clone(),
        None,
    );

    let stats = dashboard.quick_stats().await;
    assert_eq!(stats.nearby_radius_km, DEFAULT_NEARBY_RADIUS_KM);
    assert_eq!(
        stats.nearby_radius_km,
        AppConfig::default().ui.nearby_radius_km
    );
}
