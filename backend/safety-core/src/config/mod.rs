pub mod paths;

pub use paths::{ConfigPaths, PathSource, detect_config_paths};

use crate::dashboard::Tab;
use crate::error::config::ConfigError;

use common::ErrorLocation;
use models::Coordinate;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_VERSION: u32 = 1;
const MIN_POSITION_TIMEOUT_SECS: u64 = 1;
const MAX_POSITION_TIMEOUT_SECS: u64 = 120;

/// Radius of the dashboard's "nearby" counts when the config does not set one.
pub const DEFAULT_NEARBY_RADIUS_KM: f64 = 5.0;

// ============================================
// ENUMS WITH DEFAULTS
// ============================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Kiswahili,
}

// ============================================
// CONFIG STRUCTS
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionConfig {
    #[serde(default = "default_position_timeout_secs")]
    pub timeout_secs: u64,
    /// Fix reported by the simulated location service. `None` means location
    /// access is treated as denied.
    #[serde(default = "default_simulated_position")]
    pub simulated: Option<Coordinate>,
    #[serde(default = "default_simulated_latency_ms")]
    pub simulated_latency_ms: u64,
}

impl Default for PositionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_position_timeout_secs(),
            simulated: default_simulated_position(),
            simulated_latency_ms: default_simulated_latency_ms(),
        }
    }
}

impl PositionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    #[serde(default = "default_voice_enabled")]
    pub enabled: bool,
    #[serde(default = "default_trigger_phrases")]
    pub trigger_phrases: Vec<String>,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            enabled: default_voice_enabled(),
            trigger_phrases: default_trigger_phrases(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// TOML catalog to load instead of the built-in sample.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiPreferences {
    #[serde(default)]
    pub language: Language,
    #[serde(default = "default_nearby_radius_km")]
    pub nearby_radius_km: f64,
    #[serde(default = "default_tab")]
    pub default_tab: String,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            language: Language::default(),
            nearby_radius_km: default_nearby_radius_km(),
            default_tab: default_tab(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub position: PositionConfig,

    #[serde(default)]
    pub voice: VoiceConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub ui: UiPreferences,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            position: PositionConfig::default(),
            voice: VoiceConfig::default(),
            catalog: CatalogConfig::default(),
            ui: UiPreferences::default(),
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_version() -> u32 {
    CONFIG_VERSION
}
fn default_position_timeout_secs() -> u64 {
    10
}
fn default_simulated_position() -> Option<Coordinate> {
    // Nairobi CBD, where the sample catalog is laid out
    Coordinate::new(-1.286_389, 36.817_223).ok()
}
fn default_simulated_latency_ms() -> u64 {
    250
}
fn default_voice_enabled() -> bool {
    true
}
fn default_trigger_phrases() -> Vec<String> {
    vec![
        "help".to_string(),
        "emergency".to_string(),
        "nisaidieni".to_string(),
    ]
}
fn default_nearby_radius_km() -> f64 {
    DEFAULT_NEARBY_RADIUS_KM
}
fn default_tab() -> String {
    "overview".to_string()
}

// ============================================
// LOAD / SAVE
// ============================================

impl AppConfig {
    /// Load `{config_dir}/config.json`, falling back to defaults when the file
    /// does not exist yet.
    ///
    /// # Errors
    ///
    /// A file that exists but cannot be read, parsed or validated is an error;
    /// it is never silently replaced with defaults.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE_NAME);

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    location: ErrorLocation::caller(),
                    path,
                    source,
                });
            }
        };

        let config: Self = serde_json::from_str(&contents).map_err(|e| ConfigError::Parse {
            location: ErrorLocation::caller(),
            path: path.clone(),
            reason: e.to_string(),
        })?;
        config.validate()?;

        debug!("Config loaded from {}", path.display());
        Ok(config)
    }

    /// Validate, then write `{config_dir}/config.json` through a sibling temp
    /// file so a crash mid-write never leaves a truncated config behind.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            location: ErrorLocation::caller(),
            reason: e.to_string(),
        })?;

        let path = config_dir.join(CONFIG_FILE_NAME);
        replace_file(&path, json.as_bytes())?;

        info!("Config saved to {}", path.display());
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.first_problem() {
            None => Ok(()),
            Some(reason) => {
                warn!("Rejecting config: {reason}");
                Err(ConfigError::Validation {
                    location: ErrorLocation::caller(),
                    reason,
                })
            }
        }
    }

    fn first_problem(&self) -> Option<String> {
        if !(1..=CONFIG_VERSION).contains(&self.version) {
            return Some(format!(
                "Unsupported version {} (this build reads 1-{CONFIG_VERSION})",
                self.version
            ));
        }

        let timeout = self.position.timeout_secs;
        if !(MIN_POSITION_TIMEOUT_SECS..=MAX_POSITION_TIMEOUT_SECS).contains(&timeout) {
            return Some(format!(
                "Position timeout {timeout}s is outside {MIN_POSITION_TIMEOUT_SECS}-{MAX_POSITION_TIMEOUT_SECS}s"
            ));
        }

        let phrases = &self.voice.trigger_phrases;
        if self.voice.enabled && phrases.is_empty() {
            return Some(String::from(
                "Voice recognition is enabled but no trigger phrases are set",
            ));
        }
        if phrases.iter().any(|phrase| phrase.trim().is_empty()) {
            return Some(String::from("Trigger phrases cannot be blank"));
        }

        let radius = self.ui.nearby_radius_km;
        if !radius.is_finite() || radius <= 0.0 {
            return Some(format!("Nearby radius must be a positive distance, got {radius} km"));
        }

        if Tab::from_id(&self.ui.default_tab).is_none() {
            return Some(format!("Unknown default tab '{}'", self.ui.default_tab));
        }

        None
    }
}

fn replace_file(path: &Path, contents: &[u8]) -> Result<(), ConfigError> {
    let write_error = |path: &Path, source| ConfigError::Write {
        location: ErrorLocation::caller(),
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| write_error(parent, e))?;
    }

    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    let staging = PathBuf::from(staging);

    fs::write(&staging, contents).map_err(|e| write_error(&staging, e))?;
    fs::rename(&staging, path).map_err(|e| write_error(path, e))
}
