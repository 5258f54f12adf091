// Unit tests for AppConfig
// Tests defaults, validation bounds, and load/save against a temp directory

use crate::config::{AppConfig, CONFIG_FILE_NAME, Language};
use crate::error::ConfigError;

use std::fs;

use tempfile::TempDir;

// ============================================
// DEFAULTS
// ============================================

#[test]
fn given_default_config_when_validated_then_passes() {
    let config = AppConfig::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.position.timeout_secs, 10);
    assert!(config.position.simulated.is_some());
    assert!(config.voice.enabled);
    assert_eq!(config.voice.trigger_phrases, ["help", "emergency", "nisaidieni"]);
    assert_eq!(config.ui.language, Language::English);
    assert_eq!(config.ui.default_tab, "overview");
    assert!(config.catalog.path.is_none());
}

/// **VALUE**: A partial config file fills the gaps with defaults.
///
/// **WHY THIS MATTERS**: Users hand-edit config.json. Dropping one section must not
/// reset everything else or refuse to start.
///
/// **BUG THIS CATCHES**: Would catch a missing `#[serde(default)]` on a section,
/// which turns every older config file into a parse error.
#[test]
fn given_partial_json_when_parsed_then_missing_sections_take_defaults() {
    let json = r#"{ "version": 1, "voice": { "enabled": false } }"#;

    let config: AppConfig = serde_json::from_str(json).unwrap();

    assert!(!config.voice.enabled);
    assert_eq!(config.voice.trigger_phrases.len(), 3);
    assert_eq!(config.position.timeout_secs, 10);
    assert_eq!(config.ui.nearby_radius_km, 5.0);
}

// ============================================
// VALIDATION
// ============================================

#[test]
fn given_future_version_when_validated_then_rejected() {
    let config = AppConfig {
        version: 2,
        ..AppConfig::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::Validation { .. })
    ));
}

#[test]
fn given_position_timeout_out_of_bounds_when_validated_then_rejected() {
    for timeout_secs in [0, 121] {
        let mut config = AppConfig::default();
        config.position.timeout_secs = timeout_secs;

        assert!(config.validate().is_err(), "timeout {timeout_secs} accepted");
    }
}

#[test]
fn given_voice_enabled_without_phrases_when_validated_then_rejected() {
    let mut config = AppConfig::default();
    config.voice.trigger_phrases.clear();

    assert!(config.validate().is_err());

    config.voice.enabled = false;
    assert!(config.validate().is_ok());
}

#[test]
fn given_blank_phrase_when_validated_then_rejected() {
    let mut config = AppConfig::default();
    config.voice.trigger_phrases.push("  ".to_string());

    let error = config.validate().unwrap_err();

    assert!(error.to_string().contains("blank"));
}

#[test]
fn given_non_positive_radius_when_validated_then_rejected() {
    for radius in [0.0, -1.0, f64::NAN] {
        let mut config = AppConfig::default();
        config.ui.nearby_radius_km = radius;

        assert!(config.validate().is_err(), "radius {radius} accepted");
    }
}

#[test]
fn given_unknown_default_tab_when_validated_then_rejected() {
    let mut config = AppConfig::default();
    config.ui.default_tab = "inbox".to_string();

    assert!(config.validate().is_err());
}

// ============================================
// LOAD / SAVE
// ============================================

#[test]
fn given_missing_file_when_loading_then_defaults() {
    let dir = TempDir::new().unwrap();

    let config = AppConfig::load(dir.path()).unwrap();

    assert_eq!(config.version, 1);
}

/// **VALUE**: Saved preferences survive a restart.
///
/// **BUG THIS CATCHES**: Would catch the temp file being left behind or the rename
/// target being wrong, so the next load silently falls back to defaults.
#[test]
fn given_saved_config_when_loaded_then_preferences_are_kept() {
    // GIVEN: A config with non-default preferences
    let dir = TempDir::new().unwrap();
    let mut config = AppConfig::default();
    config.ui.language = Language::Kiswahili;
    config.ui.default_tab = "map".to_string();
    config.position.simulated = None;

    // WHEN: Saving then loading
    config.save(dir.path()).unwrap();
    let loaded = AppConfig::load(dir.path()).unwrap();

    // THEN: Same preferences, no temp file left over
    assert_eq!(loaded.ui.language, Language::Kiswahili);
    assert_eq!(loaded.ui.default_tab, "map");
    assert!(loaded.position.simulated.is_none());
    assert!(dir.path().join(CONFIG_FILE_NAME).exists());
    assert!(!dir.path().join(format!("{CONFIG_FILE_NAME}.tmp")).exists());
}

#[test]
fn given_corrupt_file_when_loading_then_parse_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(CONFIG_FILE_NAME), "{ not json").unwrap();

    assert!(matches!(
        AppConfig::load(dir.path()),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn given_invalid_config_when_saving_then_nothing_is_written() {
    let dir = TempDir::new().unwrap();
    let mut config = AppConfig::default();
    config.position.timeout_secs = 0;

    assert!(matches!(
        config.save(dir.path()),
        Err(ConfigError::Validation { .. })
    ));
    assert!(!dir.path().join(CONFIG_FILE_NAME).exists());
}

/// **VALUE**: Config errors name their kind and the offending file in the message.
///
/// **BUG THIS CATCHES**: Would catch a variant rename that drifts from the
/// `"Config <Kind> Error: ..."` text the log lines are searched by.
#[test]
fn given_unreadable_config_path_when_loading_then_read_error_names_path() {
    // GIVEN: A directory where config.json should be a file
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::create_dir(&path).unwrap();

    // WHEN: Loading
    let error = AppConfig::load(dir.path()).unwrap_err();

    // THEN: A read error mentioning the path, not a silent fallback to defaults
    assert!(matches!(error, ConfigError::Read { .. }));
    let message = error.to_string();
    assert!(message.starts_with("Config Read Error:"), "{message}");
    assert!(message.contains(CONFIG_FILE_NAME), "{message}");
}
