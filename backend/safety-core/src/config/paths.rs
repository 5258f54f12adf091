//! Config directory detection.
//!
//! Lookup order:
//! 1. `SALAMA_CONFIG_DIR` environment variable (explicit override)
//! 2. Platform config directory via `dirs`, plus `salama/`

use crate::APP_NAME;
use crate::config::CONFIG_FILE_NAME;
use crate::error::ConfigError;

use common::ErrorLocation;

use std::env;
use std::fmt::{Display, Formatter, Result as FormatResult};
use std::path::PathBuf;

use log::{debug, info};

pub const CONFIG_DIR_ENV: &str = "SALAMA_CONFIG_DIR";
const LOG_DIR_NAME: &str = "logs";

/// Resolved config locations.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    pub log_dir: PathBuf,
    pub source: PathSource,
}

/// How the directory was determined (for logging).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSource {
    EnvVar,
    PlatformDefault,
}

impl Display for PathSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FormatResult {
        match self {
            PathSource::EnvVar => write!(f, "{CONFIG_DIR_ENV}"),
            PathSource::PlatformDefault => write!(f, "platform default"),
        }
    }
}

impl ConfigPaths {
    fn at(config_dir: PathBuf, source: PathSource) -> Self {
        Self {
            config_file: config_dir.join(CONFIG_FILE_NAME),
            log_dir: config_dir.join(LOG_DIR_NAME),
            config_dir,
            source,
        }
    }
}

/// Detect where config and logs live.
///
/// # Errors
///
/// Returns [`ConfigError::DirectoryNotFound`] if no override is set and the
/// platform has no config directory.
pub fn detect_config_paths() -> Result<ConfigPaths, ConfigError> {
    if let Ok(custom_dir) = env::var(CONFIG_DIR_ENV)
        && !custom_dir.trim().is_empty()
    {
        info!("Using {CONFIG_DIR_ENV} override: {custom_dir}");
        return Ok(ConfigPaths::at(PathBuf::from(custom_dir), PathSource::EnvVar));
    }

    match dirs::config_dir() {
        Some(base) => {
            let config_dir = base.join(APP_NAME);
            debug!("Using platform config dir: {}", config_dir.display());
            Ok(ConfigPaths::at(config_dir, PathSource::PlatformDefault))
        }
        None => Err(ConfigError::DirectoryNotFound {
            location: ErrorLocation::caller(),
            reason: format!("No platform config directory and {CONFIG_DIR_ENV} is not set"),
        }),
    }
}
