// Unit tests for text rendering

use crate::render::{
    activation_message, alert_overlay, deactivation_message, location_card, location_list,
    position_line, tab_bar,
};

use safety_core::config::Language;
use safety_core::dashboard::Tab;
use safety_core::directory::RankedLocation;
use safety_core::dispatch::{ActivationOutcome, DeactivationOutcome};

use models::{
    AlertSession, Coordinate, LocationCategory, PositionState, SafeLocation, SafeLocationBuilder,
    SourceId,
};

use std::time::SystemTime;

fn hospital() -> SafeLocation {
    SafeLocationBuilder::default()
        .with_id("2")
        .with_name("City General Hospital")
        .with_category(LocationCategory::Hospital)
        .with_address("456 Health Avenue")
        .with_phone("+1-555-HOSPITAL")
        .with_verified(true)
        .with_hours("24/7")
        .build()
        .unwrap()
}

#[test]
fn given_active_tab_when_rendering_tab_bar_then_it_is_bracketed() {
    let bar = tab_bar(Tab::Map);

    assert!(bar.contains("[Safe Locations]"));
    assert!(!bar.contains("[Overview]"));
}

#[test]
fn given_each_position_state_when_rendering_then_user_facing_line() {
    let coordinate = Coordinate::new(-1.5, 36.5).unwrap();

    assert!(position_line(&PositionState::Unknown).contains("unranked"));
    assert!(position_line(&PositionState::Acquiring).contains("acquiring"));
    assert!(
        position_line(&PositionState::Known {
            coordinate,
            acquired_at: SystemTime::now(),
        })
        .contains("-1.50000")
    );
}

/// **VALUE**: Cards show the one-decimal distance and both contact actions.
#[test]
fn given_ranked_location_when_rendering_card_then_distance_and_actions_shown() {
    let location = hospital();
    let ranked = RankedLocation {
        location: &location,
        distance_km: Some(1.26),
    };

    let card = location_card(&ranked);

    assert!(card.contains("City General Hospital"));
    assert!(card.contains("1.3 km"));
    assert!(card.contains("[verified]"));
    assert!(card.contains("call tel:+1-555-HOSPITAL"));
    assert!(card.contains("directions https://www.google.com/maps/search/"));
}

#[test]
fn given_unranked_location_when_rendering_card_then_no_distance() {
    let location = hospital();
    let ranked = RankedLocation {
        location: &location,
        distance_km: None,
    };

    assert!(!location_card(&ranked).contains(" km"));
}

#[test]
fn given_empty_list_when_rendering_then_empty_message() {
    let list = location_list(&[], Some(LocationCategory::Police));

    assert!(list.contains("Police"));
    assert!(list.contains("No safe locations"));
}

#[test]
fn given_outcomes_when_rendering_messages_then_already_active_names_first_source() {
    let session = AlertSession::active(SourceId::manual(), SystemTime::now());

    assert!(activation_message(&ActivationOutcome::Activated(session.clone())).contains("sent"));
    assert!(
        activation_message(&ActivationOutcome::AlreadyActive(session.clone())).contains("manual")
    );
    assert!(deactivation_message(None).contains("still active"));
    assert!(
        deactivation_message(Some(&DeactivationOutcome::Deactivated(session))).contains("cancelled")
    );
    assert!(deactivation_message(Some(&DeactivationOutcome::AlreadyIdle)).contains("No active"));
}

#[test]
fn given_kiswahili_when_rendering_overlay_then_localized_title() {
    let session = AlertSession::active(SourceId::voice(), SystemTime::now());

    let overlay = alert_overlay(&session, Language::Kiswahili);

    assert!(overlay.contains("DHARURA"));
    assert!(overlay.contains("Raised by: voice"));
}
