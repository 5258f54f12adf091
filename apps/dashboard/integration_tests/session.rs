//! Scripted terminal sessions against a real core with a simulated location.

use salama::repl;

use safety_core::CoreServices;
use safety_core::config::AppConfig;

use models::{AlertState, SourceId};

use std::time::Duration;

async fn run_session(config: &AppConfig, script: &str) -> (String, CoreServices) {
    let services = CoreServices::from_config(config).expect("core services");
    let mut dashboard = services.dashboard(config);
    dashboard.mount();
    services.position.wait_until_settled().await;

    let mut output = Vec::new();
    repl::run(&mut dashboard, config, script.as_bytes(), &mut output)
        .await
        .expect("session runs");

    (String::from_utf8(output).expect("utf-8 output"), services)
}

fn fast_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.position.simulated_latency_ms = 0;
    config
}

/// **VALUE**: End to end: rank, panic, a voice trigger during the alert, then a
/// confirmed cancel.
#[tokio::test]
async fn given_panic_then_voice_then_confirmed_cancel_when_scripted_then_session_ends_idle() {
    // GIVEN: The built-in catalog and a simulated fix in the city centre
    let config = fast_config();

    // WHEN: Running a scripted session
    let (output, services) = run_session(
        &config,
        "filter hospital\npanic\nsay help me\ncancel\ny\nquit\n",
    )
    .await;

    // THEN: Hospitals were ranked, voice saw the manual session, cancel ended it
    assert!(output.contains("Safe locations: Hospitals (2)"), "{output}");
    assert!(output.contains("km"));
    assert!(output.contains("Emergency alert sent"));
    assert!(output.contains("Alert already active (raised by manual)"));
    assert!(output.contains("Alert cancelled"));
    assert_eq!(
        services.coordinator.current_session().await.state,
        AlertState::Idle
    );
}

/// **VALUE**: Anything but an explicit yes leaves the alert running.
#[tokio::test]
async fn given_panic_when_cancel_declined_then_alert_stays_active() {
    let config = fast_config();

    let (output, services) = run_session(&config, "panic\ncancel\nn\n").await;

    assert!(output.contains("Alert still active"));
    let session = services.coordinator.current_session().await;
    assert_eq!(session.state, AlertState::Active);
    assert_eq!(session.activated_by, Some(SourceId::manual()));
}

#[tokio::test]
async fn given_denied_location_when_listing_then_unranked_catalog() {
    let mut config = fast_config();
    config.position.simulated = None;

    let (output, _) = run_session(&config, "tab map\n").await;

    assert!(output.contains("unavailable"));
    assert!(output.contains("Safe locations: All (5)"));
    assert!(!output.contains(" km\n"));
}

#[tokio::test]
async fn given_paused_voice_when_phrase_spoken_then_no_alert() {
    let config = fast_config();

    let (output, services) = run_session(&config, "listen off\nsay help\n").await;

    assert!(output.contains("Voice recognition is paused"));
    assert!(!services.coordinator.current_session().await.is_active());
}

#[tokio::test]
async fn given_bad_command_when_scripted_then_session_continues() {
    let config = fast_config();

    let (output, _) = tokio::time::timeout(
        Duration::from_secs(5),
        run_session(&config, "dance\ntab voice\n"),
    )
    .await
    .expect("session finished");

    assert!(output.contains("Unknown command: 'dance'"));
    assert!(output.contains("Trigger phrases: help, emergency, nisaidieni"));
}
