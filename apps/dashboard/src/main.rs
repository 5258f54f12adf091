use salama::error::DashboardError;
use salama::logger::initialize as LoggerInitialize;
use salama::repl;

use safety_core::CoreServices;
use safety_core::config::{AppConfig, detect_config_paths};
use safety_core::dispatch::{LoggingNotifier, spawn_notification_forwarder};

use common::ErrorLocation;

use std::fs::create_dir_all;
use std::process::ExitCode;
use std::sync::Arc;

use log::{error, info};
use tokio::io::{BufReader, stdin, stdout};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), DashboardError> {
    // Optional .env for SALAMA_CONFIG_DIR during development
    dotenvy::dotenv().ok();

    let paths = detect_config_paths()?;

    create_dir_all(&paths.log_dir).map_err(|e| DashboardError::App {
        message: format!("Failed to create log directory: {e}"),
        location: ErrorLocation::caller(),
    })?;

    // Initialize logger FIRST
    LoggerInitialize(&paths.log_dir)?;

    info!("Salama dashboard starting");
    info!(
        "Config directory: {} (from {})",
        paths.config_dir.display(),
        paths.source
    );

    let config = AppConfig::load(&paths.config_dir)?;
    let services = CoreServices::from_config(&config)?;

    let _forwarder =
        spawn_notification_forwarder(&services.coordinator, Arc::new(LoggingNotifier));

    let mut dashboard = services.dashboard(&config);
    dashboard.mount();

    repl::run(&mut dashboard, &config, BufReader::new(stdin()), stdout()).await?;

    info!("Salama dashboard stopped");
    Ok(())
}
