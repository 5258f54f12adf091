//! Plain-text rendering of dashboard views.
//!
//! Every function here returns a `String`; nothing writes to the terminal
//! directly, so views can be asserted on in tests.

use safety_core::config::{AppConfig, Language};
use safety_core::dashboard::{DashboardController, QuickStats, Tab};
use safety_core::directory::RankedLocation;
use safety_core::directory::actions::{dial_uri, directions_url};
use safety_core::dispatch::{ActivationOutcome, DeactivationOutcome};
use safety_core::voice::VoiceTrigger;

use models::{AlertSession, LocationCategory, PositionState};

use std::fmt::Write;

use humantime::format_rfc3339_seconds;

const RULE: &str = "────────────────────────────────────────";

/// Tab strip with the active tab bracketed.
pub fn tab_bar(active: Tab) -> String {
    Tab::ALL
        .iter()
        .map(|tab| {
            if *tab == active {
                format!("[{}]", tab.label())
            } else {
                format!(" {} ", tab.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn position_line(position: &PositionState) -> String {
    match position {
        PositionState::Unknown => {
            String::from("Location: unavailable, showing all safe locations unranked")
        }
        PositionState::Acquiring => String::from("Location: acquiring..."),
        PositionState::Known { coordinate, .. } => format!("Location: {coordinate}"),
    }
}

pub fn filter_label(filter: Option<LocationCategory>) -> &'static str {
    filter.map_or("All", |category| category.label())
}

/// One safe-location card: header line, details line, actions line.
pub fn location_card(ranked: &RankedLocation<'_>) -> String {
    let location = ranked.location;
    let mut card = format!("{} {}", location.category.icon(), location.name);
    if location.verified {
        card.push_str(" [verified]");
    }
    if let Some(distance) = ranked.display_distance() {
        let _ = write!(card, " · {distance}");
    }

    let _ = write!(card, "\n    {}", location.address);
    if !location.hours.is_empty() {
        let _ = write!(card, " · {}", location.hours);
    }

    let mut actions = Vec::with_capacity(2);
    if let Some(uri) = dial_uri(location) {
        actions.push(format!("call {uri}"));
    }
    if let Ok(url) = directions_url(location) {
        actions.push(format!("directions {url}"));
    }
    if !actions.is_empty() {
        let _ = write!(card, "\n    {}", actions.join(" · "));
    }

    card
}

pub fn location_list(
    locations: &[RankedLocation<'_>],
    filter: Option<LocationCategory>,
) -> String {
    let mut out = format!(
        "Safe locations: {} ({})",
        filter_label(filter),
        locations.len()
    );

    if locations.is_empty() {
        out.push_str("\n  No safe locations in this category.");
        return out;
    }

    for (index, ranked) in locations.iter().enumerate() {
        let _ = write!(out, "\n{:>2}. {}", index + 1, location_card(ranked));
    }
    out
}

pub fn quick_stats(stats: &QuickStats) -> String {
    format!(
        "Within {:.1} km: {} police · {} hospitals · {} safe spaces ({} in catalog)\nVoice: {}",
        stats.nearby_radius_km,
        stats.nearby.police,
        stats.nearby.hospital,
        stats.nearby.safe_space,
        stats.catalog_size,
        if stats.voice_listening {
            "listening"
        } else {
            "off"
        }
    )
}

pub fn overlay_title(language: Language) -> &'static str {
    match language {
        Language::English => "EMERGENCY ALERT ACTIVE",
        Language::Kiswahili => "TAHADHARI YA DHARURA IMEWASHWA",
    }
}

/// Full-screen alert overlay, shown while a session is active.
pub fn alert_overlay(session: &AlertSession, language: Language) -> String {
    let mut out = format!("{RULE}\n!! {} !!", overlay_title(language));

    if let Some(ref source) = session.activated_by {
        let _ = write!(out, "\nRaised by: {source}");
    }
    if let Some(at) = session.activated_at {
        let _ = write!(out, "\nSince: {}", format_rfc3339_seconds(at));
    }
    if let Some(id) = session.session_id {
        let _ = write!(out, "\nSession: {id}");
    }

    let _ = write!(out, "\nType 'cancel' once you are safe.\n{RULE}");
    out
}

pub fn activation_message(outcome: &ActivationOutcome) -> String {
    match outcome {
        ActivationOutcome::Activated(_) => {
            String::from("Emergency alert sent. Help is being notified.")
        }
        ActivationOutcome::AlreadyActive(session) => format!(
            "Alert already active (raised by {}).",
            session
                .activated_by
                .as_ref()
                .map_or("unknown", |source| source.as_str())
        ),
    }
}

pub fn deactivation_message(outcome: Option<&DeactivationOutcome>) -> String {
    match outcome {
        None => String::from("Alert still active."),
        Some(DeactivationOutcome::Deactivated(_)) => String::from("Alert cancelled. Stay safe."),
        Some(DeactivationOutcome::AlreadyIdle) => String::from("No active alert."),
    }
}

pub fn voice_panel(voice: Option<&VoiceTrigger>) -> String {
    match voice {
        None => String::from("Voice recognition is disabled in config."),
        Some(voice) => format!(
            "Voice recognition: {}\nTrigger phrases: {}\nUse 'say <words>' to simulate a transcript, 'listen on|off' to toggle.",
            if voice.is_listening() {
                "listening"
            } else {
                "paused"
            },
            voice.phrases().join(", ")
        ),
    }
}

pub fn settings_panel(config: &AppConfig) -> String {
    format!(
        "Language: {:?}\nNearby radius: {:.1} km\nPosition timeout: {} s\nDefault tab: {}\nCatalog: {}",
        config.ui.language,
        config.ui.nearby_radius_km,
        config.position.timeout_secs,
        config.ui.default_tab,
        config
            .catalog
            .path
            .as_ref()
            .map_or_else(|| String::from("built-in"), |path| path.display().to_string())
    )
}

fn overview(dashboard: &DashboardController, stats: &QuickStats) -> String {
    let position = dashboard.position_state();
    let mut out = quick_stats(stats);

    for category in LocationCategory::ALL {
        match dashboard.directory().nearest(Some(category), &position) {
            Some(nearest) => {
                let _ = write!(
                    out,
                    "\nNearest {}: {} {}",
                    category.label(),
                    nearest.location.name,
                    nearest.display_distance().unwrap_or_default()
                );
            }
            None => {
                let _ = write!(out, "\nNearest {}: unknown", category.label());
            }
        }
    }

    out.push_str("\nType 'panic' to raise an emergency alert.");
    out
}

fn contacts(dashboard: &DashboardController) -> String {
    let ranked = dashboard
        .directory()
        .ranked(None, &dashboard.position_state());

    let mut out = String::from("Emergency contacts");
    for entry in ranked {
        let number = dial_uri(entry.location).unwrap_or_else(|| String::from("no phone listed"));
        let _ = write!(
            out,
            "\n  {} {}: {}",
            entry.location.category.icon(),
            entry.location.name,
            number
        );
    }
    out
}

/// Render the active tab, with the alert overlay on top when a session is active.
pub async fn render_dashboard(dashboard: &DashboardController, config: &AppConfig) -> String {
    let session = dashboard.alert_session().await;
    let stats = dashboard.quick_stats().await;
    let position = dashboard.position_state();
    let tab = dashboard.active_tab();

    let mut out = String::new();
    if session.is_active() {
        out.push_str(&alert_overlay(&session, config.ui.language));
        out.push('\n');
    }

    let _ = write!(out, "{}\n{}\n{RULE}\n", tab_bar(tab), position_line(&position));

    let body = match tab {
        Tab::Overview => overview(dashboard, &stats),
        Tab::Contacts => contacts(dashboard),
        Tab::Map => location_list(&dashboard.visible_locations(), dashboard.filter()),
        Tab::Voice => voice_panel(dashboard.voice()),
        Tab::Settings => settings_panel(config),
    };
    out.push_str(&body);
    out
}
