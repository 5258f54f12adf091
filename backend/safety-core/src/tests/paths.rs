// Unit tests for config directory detection
// Serialized: they mutate process environment

use crate::config::paths::CONFIG_DIR_ENV;
use crate::config::{CONFIG_FILE_NAME, PathSource, detect_config_paths};

use std::env;

use serial_test::serial;
use tempfile::TempDir;

#[test]
#[serial]
fn given_env_override_when_detecting_paths_then_override_wins() {
    let dir = TempDir::new().unwrap();
    // SAFETY: serialized with every other test touching the environment
    unsafe { env::set_var(CONFIG_DIR_ENV, dir.path()) };

    let paths = detect_config_paths().unwrap();

    unsafe { env::remove_var(CONFIG_DIR_ENV) };
    assert_eq!(paths.source, PathSource::EnvVar);
    assert_eq!(paths.config_dir, dir.path());
    assert_eq!(paths.config_file, dir.path().join(CONFIG_FILE_NAME));
    assert_eq!(paths.log_dir, dir.path().join("logs"));
}

#[test]
#[serial]
fn given_blank_env_override_when_detecting_paths_then_ignored() {
    // SAFETY: serialized with every other test touching the environment
    unsafe { env::set_var(CONFIG_DIR_ENV, "   ") };

    let result = detect_config_paths();

    unsafe { env::remove_var(CONFIG_DIR_ENV) };
    if let Ok(paths) = result {
        assert_eq!(paths.source, PathSource::PlatformDefault);
        assert!(paths.config_dir.ends_with("salama"));
    }
}

#[test]
fn given_path_source_when_displayed_then_names_origin() {
    assert_eq!(PathSource::EnvVar.to_string(), CONFIG_DIR_ENV);
    assert_eq!(PathSource::PlatformDefault.to_string(), "platform default");
}
