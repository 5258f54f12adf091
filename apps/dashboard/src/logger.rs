//! Dual-output logging for the Salama dashboard.
//!
//! Everything at the file level goes to `salama.log`. The terminal only gets
//! warnings and errors on stderr, so log lines never interleave with the
//! dashboard rendered on stdout. `SALAMA_LOG` overrides the file level.

use crate::error::DashboardError;

use common::ErrorLocation;

use std::env;
use std::io::stderr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use humantime::format_rfc3339;
use log::{LevelFilter, info, warn};

/// Set once the first `initialize` call has claimed the global logger.
static LOGGER_CLAIMED: AtomicBool = AtomicBool::new(false);

pub const LOG_FILE_NAME: &str = "salama.log";
pub const LOG_LEVEL_ENV: &str = "SALAMA_LOG";

#[cfg(debug_assertions)]
const DEFAULT_FILE_LEVEL: LevelFilter = LevelFilter::Debug;

#[cfg(not(debug_assertions))]
const DEFAULT_FILE_LEVEL: LevelFilter = LevelFilter::Info;

const CONSOLE_LEVEL: LevelFilter = LevelFilter::Warn;

/// Levels for the two log sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSettings {
    pub file_level: LevelFilter,
    pub console_level: LevelFilter,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            file_level: DEFAULT_FILE_LEVEL,
            console_level: CONSOLE_LEVEL,
        }
    }
}

impl LogSettings {
    /// Defaults, with the file level taken from `SALAMA_LOG` when it parses.
    pub fn from_env() -> Self {
        Self::with_file_level(env::var(LOG_LEVEL_ENV).ok().as_deref())
    }

    /// Defaults, with `value` parsed as the file level (`"debug"`, `"WARN"`, `"off"`...).
    ///
    /// Unparseable values keep the default.
    pub fn with_file_level(value: Option<&str>) -> Self {
        let defaults = Self::default();
        let file_level = value
            .and_then(|raw| raw.trim().parse::<LevelFilter>().ok())
            .unwrap_or(defaults.file_level);

        Self {
            file_level,
            ..defaults
        }
    }

    /// The global `log` ceiling: the more verbose of the two sinks.
    pub fn max_level(&self) -> LevelFilter {
        self.file_level.max(self.console_level)
    }
}

pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE_NAME)
}

/// Initialize logging with [`LogSettings::from_env`].
///
/// # Errors
///
/// See [`initialize_with`].
pub fn initialize(log_dir: &Path) -> Result<(), DashboardError> {
    initialize_with(log_dir, LogSettings::from_env())
}

/// Install the global logger writing to stderr and to `log_dir/salama.log`.
///
/// Only the first call installs anything; later calls log a warning and
/// return `Ok`, whatever their arguments.
///
/// # Errors
///
/// Returns [`DashboardError::App`] if the log file cannot be created or the
/// global logger cannot be installed. A failed first call is not retried.
pub fn initialize_with(log_dir: &Path, settings: LogSettings) -> Result<(), DashboardError> {
    if LOGGER_CLAIMED.swap(true, Ordering::SeqCst) {
        warn!("Logger already initialized, ignoring {}", log_dir.display());
        return Ok(());
    }

    let path = log_file_path(log_dir);
    Dispatch::new()
        .level(settings.max_level())
        .chain(console_dispatch(settings.console_level))
        .chain(file_dispatch(&path, settings.file_level)?)
        .apply()
        .map_err(|e| DashboardError::App {
            message: format!("Failed to initialize logger: {e}"),
            location: ErrorLocation::caller(),
        })?;

    info!(
        "Logging to {} at {:?} (console {:?})",
        path.display(),
        settings.file_level,
        settings.console_level
    );
    Ok(())
}

fn console_dispatch(level: LevelFilter) -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red)
        .trace(Magenta);

    Dispatch::new()
        .level(level)
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} - {}] {message}",
                format_rfc3339(SystemTime::now()),
                colors.color(record.level()),
            ))
        })
        .chain(stderr())
}

fn file_dispatch(path: &Path, level: LevelFilter) -> Result<Dispatch, DashboardError> {
    let file = fern::log_file(path).map_err(|e| DashboardError::App {
        message: format!("Failed to create log file {}: {e}", path.display()),
        location: ErrorLocation::caller(),
    })?;

    Ok(Dispatch::new()
        .level(level)
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} - {}] {message} [{}:{}]",
                format_rfc3339(SystemTime::now()),
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0)
            ))
        })
        .chain(file))
}
