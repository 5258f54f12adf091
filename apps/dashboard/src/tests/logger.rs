use crate::logger::{LOG_FILE_NAME, LogSettings, initialize, log_file_path};

use log::LevelFilter;
use tempfile::TempDir;

/// **VALUE**: Verifies that calling initialize() multiple times doesn't panic or fail.
///
/// **WHY THIS MATTERS**: Startup and tests can both reach the logger. If the second
/// call errors, the dashboard would refuse to start.
///
/// **BUG THIS CATCHES**: Would catch the claim guard being removed, causing fern to
/// fail when setting a global logger twice.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    // GIVEN: A writable temporary directory
    let temp_dir = TempDir::new().unwrap();

    // WHEN: Calling initialize twice
    let result1 = initialize(temp_dir.path());
    let result2 = initialize(temp_dir.path());

    // THEN: Both return Ok and the log file exists
    assert!(result1.is_ok(), "First initialization should succeed");
    assert!(
        result2.is_ok(),
        "Second initialization should succeed (idempotent)"
    );
    assert!(temp_dir.path().join(LOG_FILE_NAME).exists());
}

/// **VALUE**: The console sink stays at warnings regardless of the file level.
///
/// **BUG THIS CATCHES**: Would catch `SALAMA_LOG=debug` leaking debug lines onto the
/// terminal, in between the rendered dashboard and the prompt.
#[test]
fn given_level_override_when_building_settings_then_only_file_level_changes() {
    let settings = LogSettings::with_file_level(Some(" TRACE "));

    assert_eq!(settings.file_level, LevelFilter::Trace);
    assert_eq!(settings.console_level, LevelFilter::Warn);
    assert_eq!(settings.max_level(), LevelFilter::Trace);
}

#[test]
fn given_unparseable_level_when_building_settings_then_defaults_kept() {
    let settings = LogSettings::with_file_level(Some("loud"));

    assert_eq!(settings, LogSettings::default());
}

#[test]
fn given_file_level_off_when_computing_max_then_console_level_wins() {
    let settings = LogSettings::with_file_level(Some("off"));

    assert_eq!(settings.file_level, LevelFilter::Off);
    assert_eq!(settings.max_level(), LevelFilter::Warn);
}

#[test]
fn given_log_dir_when_resolving_file_then_named_salama_log() {
    let temp_dir = TempDir::new().unwrap();

    let path = log_file_path(temp_dir.path());

    assert_eq!(path, temp_dir.path().join("salama.log"));
}
