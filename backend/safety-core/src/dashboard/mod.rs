//! Presentation-facing composition of the coordination core.
//!
//! [`DashboardController`] holds handles to the position provider, the
//! directory and the dispatch coordinator. It owns none of their state; it
//! only tracks which view is mounted and which category filter is selected.

mod tab;

pub use tab::Tab;

use crate::config::DEFAULT_NEARBY_RADIUS_KM;
use crate::directory::{CategoryCounts, RankedLocation, SafeLocationDirectory};
use crate::dispatch::{ActivationOutcome, DeactivationOutcome, EmergencyDispatchCoordinator};
use crate::error::DispatchError;
use crate::position::{PositionProvider, PositionRequest};
use crate::voice::VoiceTrigger;

use models::{AlertSession, AlertState, LocationCategory, PositionState, SourceId};

use std::sync::Arc;

use log::{debug, info};

/// Snapshot for the sidebar's quick-stats card.
#[derive(Debug, Clone, PartialEq)]
pub struct QuickStats {
    pub catalog_size: usize,
    pub nearby: CategoryCounts,
    pub nearby_radius_km: f64,
    pub voice_listening: bool,
    pub alert_state: AlertState,
}

pub struct DashboardController {
    position: PositionProvider,
    directory: Arc<SafeLocationDirectory>,
    coordinator: EmergencyDispatchCoordinator,
    voice: Option<VoiceTrigger>,
    active_tab: Tab,
    filter: Option<LocationCategory>,
    nearby_radius_km: f64,
    mounted: bool,
}

impl DashboardController {
    pub fn new(
        position: PositionProvider,
        directory: Arc<SafeLocationDirectory>,
        coordinator: EmergencyDispatchCoordinator,
        voice: Option<VoiceTrigger>,
    ) -> Self {
        Self {
            position,
            directory,
            coordinator,
            voice,
            active_tab: Tab::default(),
            filter: None,
            nearby_radius_km: DEFAULT_NEARBY_RADIUS_KM,
            mounted: false,
        }
    }

    pub fn with_initial_tab(mut self, tab: Tab) -> Self {
        self.active_tab = tab;
        self
    }

    pub fn with_nearby_radius_km(mut self, radius_km: f64) -> Self {
        self.nearby_radius_km = radius_km;
        self
    }

    /// First mount of the dashboard: kicks off the initial position request.
    ///
    /// Later calls do nothing and return `None`.
    pub fn mount(&mut self) -> Option<PositionRequest> {
        if self.mounted {
            return None;
        }

        self.mounted = true;
        info!("Dashboard mounted on {} tab", self.active_tab.id());
        Some(self.position.request_position())
    }

    /// The "Update Location" action.
    pub fn update_location(&self) -> PositionRequest {
        self.position.request_position()
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn select_tab(&mut self, tab: Tab) {
        if self.active_tab != tab {
            debug!("Switching tab {} -> {}", self.active_tab.id(), tab.id());
            self.active_tab = tab;
        }
    }

    pub fn filter(&self) -> Option<LocationCategory> {
        self.filter
    }

    pub fn set_filter(&mut self, category: Option<LocationCategory>) {
        self.filter = category;
    }

    pub fn position_state(&self) -> PositionState {
        self.position.current_state()
    }

    pub fn directory(&self) -> &SafeLocationDirectory {
        &self.directory
    }

    pub fn voice(&self) -> Option<&VoiceTrigger> {
        self.voice.as_ref()
    }

    /// Filtered locations, ranked against the current position.
    pub fn visible_locations(&self) -> Vec<RankedLocation<'_>> {
        self.directory
            .ranked(self.filter, &self.position.current_state())
    }

    /// The panic control.
    pub async fn press_panic(&self) -> Result<ActivationOutcome, DispatchError> {
        self.coordinator.activate(SourceId::manual()).await
    }

    /// Cancel the alert, but only once the user has confirmed.
    ///
    /// Returns `None` without touching the session when `confirmed` is false.
    pub async fn cancel_alert(
        &self,
        confirmed: bool,
    ) -> Result<Option<DeactivationOutcome>, DispatchError> {
        if !confirmed {
            info!("Alert cancel requested without confirmation, session left as is");
            return Ok(None);
        }

        self.coordinator
            .deactivate(SourceId::manual())
            .await
            .map(Some)
    }

    /// Whether the alert overlay must be shown.
    pub async fn overlay_visible(&self) -> bool {
        self.coordinator.current_session().await.is_active()
    }

    pub async fn alert_session(&self) -> AlertSession {
        self.coordinator.current_session().await
    }

    pub async fn quick_stats(&self) -> QuickStats {
        let position = self.position.current_state();

        QuickStats {
            catalog_size: self.directory.len(),
            nearby: self
                .directory
                .nearby_counts(&position, self.nearby_radius_km),
            nearby_radius_km: self.nearby_radius_km,
            voice_listening: self.voice.as_ref().is_some_and(VoiceTrigger::is_listening),
            alert_state: self.coordinator.current_session().await.state,
        }
    }
}
