use safety_core::dispatch::{ActivationOutcome, EmergencyDispatchCoordinator};
use safety_core::error::ConfigError;
use safety_core::voice::VoiceTrigger;

use models::SourceId;

fn phrases(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn trigger() -> (VoiceTrigger, EmergencyDispatchCoordinator) {
    let coordinator = EmergencyDispatchCoordinator::default();
    let trigger = VoiceTrigger::new(
        &phrases(&["help", "emergency", "nisaidieni", "call police"]),
        coordinator.clone(),
    )
    .unwrap();
    (trigger, coordinator)
}

/// **VALUE**: A recognised phrase anywhere in the transcript activates as `voice`.
#[tokio::test]
async fn given_transcript_with_trigger_phrase_when_heard_then_activates_as_voice() {
    // GIVEN: A listening trigger
    let (trigger, coordinator) = trigger();

    // WHEN: The user shouts mid-sentence, in any case
    let outcome = trigger.on_transcript("Please HELP me now").await.unwrap();

    // THEN: A session attributed to voice
    assert!(matches!(outcome, Some(ActivationOutcome::Activated(_))));
    let session = coordinator.current_session().await;
    assert_eq!(session.activated_by, Some(SourceId::voice()));
}

#[tokio::test]
async fn given_kiswahili_phrase_when_heard_then_activates() {
    let (trigger, _) = trigger();

    let outcome = trigger.on_transcript("nisaidieni!").await.unwrap();

    assert!(outcome.is_some_and(|outcome| outcome.initiated()));
}

/// **BUG THIS CATCHES**: Would catch a plain substring match, where "helpful" or
/// "helpdesk" in ordinary conversation raises an emergency.
#[test]
fn given_word_containing_phrase_when_matching_then_no_match() {
    let (trigger, _) = trigger();

    assert!(!trigger.matches("that was really helpful"));
    assert!(!trigger.matches("call the helpdesk"));
    assert!(trigger.matches("help!"));
}

#[test]
fn given_multi_word_phrase_with_extra_spaces_when_matching_then_matches() {
    let (trigger, _) = trigger();

    assert!(trigger.matches("somebody CALL   police"));
    assert!(!trigger.matches("call the police"));
}

#[tokio::test]
async fn given_paused_listening_when_phrase_heard_then_nothing_happens() {
    let (trigger, coordinator) = trigger();
    trigger.set_listening(false);

    let outcome = trigger.on_transcript("help").await.unwrap();

    assert!(outcome.is_none());
    assert!(!coordinator.current_session().await.is_active());
}

#[tokio::test]
async fn given_active_manual_session_when_phrase_heard_then_already_active() {
    let (trigger, coordinator) = trigger();
    coordinator.activate(SourceId::manual()).await.unwrap();

    let outcome = trigger.on_transcript("emergency").await.unwrap();

    assert!(matches!(outcome, Some(ActivationOutcome::AlreadyActive(_))));
    assert_eq!(
        coordinator.current_session().await.activated_by,
        Some(SourceId::manual())
    );
}

#[tokio::test]
async fn given_transcript_without_phrase_when_heard_then_no_activation() {
    let (trigger, coordinator) = trigger();

    let outcome = trigger.on_transcript("what a lovely day").await.unwrap();

    assert!(outcome.is_none());
    assert!(!coordinator.current_session().await.is_active());
}

#[test]
fn given_only_blank_phrases_when_building_then_validation_error() {
    let result = VoiceTrigger::new(
        &phrases(&["", "   "]),
        EmergencyDispatchCoordinator::default(),
    );

    assert!(matches!(result, Err(ConfigError::Validation { .. })));
}

#[test]
fn given_phrase_with_regex_metacharacters_when_building_then_matched_literally() {
    let trigger = VoiceTrigger::new(
        &phrases(&["s.o.s"]),
        EmergencyDispatchCoordinator::default(),
    )
    .unwrap();

    assert!(trigger.matches("S.O.S"));
    assert!(!trigger.matches("sxoxs"));
    assert_eq!(trigger.phrases(), ["s.o.s"]);
}
