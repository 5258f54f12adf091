//! Process-start construction of the coordination core.
//!
//! Each shared cell (position state, alert session) is created exactly once
//! here and passed by handle to whoever needs it; nothing is looked up
//! through globals.

use crate::catalog::{BuiltinCatalog, CatalogSource, TomlCatalog};
use crate::config::AppConfig;
use crate::dashboard::{DashboardController, Tab};
use crate::directory::SafeLocationDirectory;
use crate::dispatch::EmergencyDispatchCoordinator;
use crate::error::CoreError;
use crate::position::{
    DeniedLocationService, LocationService, PositionProvider, SimulatedLocationService,
};
use crate::voice::VoiceTrigger;

use std::sync::Arc;

use log::{info, warn};

#[derive(Clone)]
pub struct CoreServices {
    pub position: PositionProvider,
    pub directory: Arc<SafeLocationDirectory>,
    pub coordinator: EmergencyDispatchCoordinator,
    pub voice: Option<VoiceTrigger>,
}

impl CoreServices {
    /// Build from explicit collaborators.
    pub fn new(
        location_service: Arc<dyn LocationService>,
        catalog: &dyn CatalogSource,
        config: &AppConfig,
    ) -> Result<Self, CoreError> {
        let position = PositionProvider::new(location_service, config.position.timeout());
        let directory = Arc::new(SafeLocationDirectory::load(catalog)?);
        let coordinator = EmergencyDispatchCoordinator::new(Some(position.clone()));

        let voice = if config.voice.enabled {
            Some(VoiceTrigger::new(
                &config.voice.trigger_phrases,
                coordinator.clone(),
            )?)
        } else {
            info!("Voice recognition disabled in config");
            None
        };

        Ok(Self {
            position,
            directory,
            coordinator,
            voice,
        })
    }

    /// Build with the location service and catalog the config selects.
    pub fn from_config(config: &AppConfig) -> Result<Self, CoreError> {
        let location_service: Arc<dyn LocationService> = match config.position.simulated {
            Some(coordinate) => Arc::new(SimulatedLocationService::new(
                coordinate,
                config.position.simulated_latency(),
            )),
            None => {
                warn!("No simulated position configured, location access will be denied");
                Arc::new(DeniedLocationService)
            }
        };

        match config.catalog.path {
            Some(ref path) => Self::new(location_service, &TomlCatalog::new(path), config),
            None => Self::new(location_service, &BuiltinCatalog, config),
        }
    }

    /// A dashboard controller over these services, honouring UI preferences.
    pub fn dashboard(&self, config: &AppConfig) -> DashboardController {
        let initial_tab = Tab::from_id(&config.ui.default_tab).unwrap_or_default();

        DashboardController::new(
            self.position.clone(),
            Arc::clone(&self.directory),
            self.coordinator.clone(),
            self.voice.clone(),
        )
        .with_initial_tab(initial_tab)
        .with_nearby_radius_km(config.ui.nearby_radius_km)
    }
}
