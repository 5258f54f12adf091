// Unit tests for command parsing

use crate::error::DashboardError;
use crate::repl::{Command, is_confirmation, parse_command};

use safety_core::dashboard::Tab;

use models::LocationCategory;

#[test]
fn given_simple_verbs_when_parsed_then_commands() {
    assert_eq!(parse_command("panic").unwrap(), Command::Panic);
    assert_eq!(parse_command("  SOS ").unwrap(), Command::Panic);
    assert_eq!(parse_command("cancel").unwrap(), Command::Cancel);
    assert_eq!(parse_command("locate").unwrap(), Command::Locate);
    assert_eq!(parse_command("quit").unwrap(), Command::Quit);
    assert_eq!(parse_command("").unwrap(), Command::Empty);
}

#[test]
fn given_tab_argument_when_parsed_then_tab_command() {
    assert_eq!(parse_command("tab map").unwrap(), Command::Tab(Tab::Map));
    assert_eq!(
        parse_command("tab Settings").unwrap(),
        Command::Tab(Tab::Settings)
    );
    assert!(parse_command("tab inbox").is_err());
}

/// **VALUE**: "all" and a missing argument both clear the filter.
#[test]
fn given_filter_argument_when_parsed_then_category_or_none() {
    assert_eq!(
        parse_command("filter hospital").unwrap(),
        Command::Filter(Some(LocationCategory::Hospital))
    );
    assert_eq!(
        parse_command("filter safe_space").unwrap(),
        Command::Filter(Some(LocationCategory::SafeSpace))
    );
    assert_eq!(parse_command("filter all").unwrap(), Command::Filter(None));
    assert_eq!(parse_command("filter").unwrap(), Command::Filter(None));
    assert!(parse_command("filter pharmacy").is_err());
}

#[test]
fn given_say_with_words_when_parsed_then_transcript_is_kept_verbatim() {
    assert_eq!(
        parse_command("say Please HELP  me").unwrap(),
        Command::Say(String::from("Please HELP  me"))
    );
    assert!(parse_command("say").is_err());
}

#[test]
fn given_listen_argument_when_parsed_then_toggle() {
    assert_eq!(parse_command("listen on").unwrap(), Command::Listen(true));
    assert_eq!(parse_command("listen OFF").unwrap(), Command::Listen(false));
    assert!(parse_command("listen maybe").is_err());
}

#[test]
fn given_unknown_verb_when_parsed_then_app_error_suggests_help() {
    match parse_command("dance") {
        Err(DashboardError::App { message, .. }) => assert!(message.contains("help")),
        other => panic!("expected App error, got {other:?}"),
    }
}

#[test]
fn given_answers_when_checking_confirmation_then_only_yes_confirms() {
    assert!(is_confirmation("y"));
    assert!(is_confirmation(" YES "));
    assert!(!is_confirmation(""));
    assert!(!is_confirmation("n"));
    assert!(!is_confirmation("yeah no"));
}
