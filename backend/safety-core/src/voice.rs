//! Voice trigger adapter.
//!
//! Speech recognition happens elsewhere; this adapter receives the recognised
//! transcript and decides whether it contains one of the configured trigger
//! phrases ("help", "emergency", "nisaidieni", ...). On a match it raises an
//! activation with the `voice` source id, racing any manual activation on
//! equal terms through the coordinator.

use crate::dispatch::{ActivationOutcome, EmergencyDispatchCoordinator};
use crate::error::{ConfigError, DispatchError};

use common::ErrorLocation;
use models::SourceId;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info};
use regex::{Regex, RegexBuilder};

/// Matches transcripts against trigger phrases and activates on a hit.
#[derive(Clone)]
pub struct VoiceTrigger {
    pattern: Regex,
    phrases: Arc<Vec<String>>,
    listening: Arc<AtomicBool>,
    coordinator: EmergencyDispatchCoordinator,
}

impl VoiceTrigger {
    /// Compile `phrases` into a single case-insensitive, word-bounded matcher.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when no usable phrase is given.
    #[track_caller]
    pub fn new(
        phrases: &[String],
        coordinator: EmergencyDispatchCoordinator,
    ) -> Result<Self, ConfigError> {
        let phrases: Vec<String> = phrases
            .iter()
            .map(|phrase| phrase.trim().to_string())
            .filter(|phrase| !phrase.is_empty())
            .collect();

        if phrases.is_empty() {
            return Err(ConfigError::Validation {
                location: ErrorLocation::caller(),
                reason: String::from("At least one voice trigger phrase is required"),
            });
        }

        let alternatives = phrases
            .iter()
            .map(|phrase| {
                // Collapse inner whitespace so "call  police" still matches "call police"
                phrase
                    .split_whitespace()
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"\s+")
            })
            .collect::<Vec<_>>()
            .join("|");

        let pattern = RegexBuilder::new(&format!(r"\b(?:{alternatives})\b"))
            .case_insensitive(true)
            .build()
            .map_err(|e| ConfigError::Validation {
                location: ErrorLocation::caller(),
                reason: format!("Invalid voice trigger phrases: {e}"),
            })?;

        Ok(Self {
            pattern,
            phrases: Arc::new(phrases),
            listening: Arc::new(AtomicBool::new(true)),
            coordinator,
        })
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }

    pub fn set_listening(&self, listening: bool) {
        let previous = self.listening.swap(listening, Ordering::SeqCst);
        if previous != listening {
            info!(
                "Voice recognition {}",
                if listening { "listening" } else { "paused" }
            );
        }
    }

    /// Whether `transcript` contains a trigger phrase.
    pub fn matches(&self, transcript: &str) -> bool {
        self.pattern.is_match(transcript)
    }

    /// Handle one recognised transcript.
    ///
    /// Returns `None` when not listening or when no trigger phrase was heard,
    /// otherwise the coordinator's activation outcome.
    pub async fn on_transcript(
        &self,
        transcript: &str,
    ) -> Result<Option<ActivationOutcome>, DispatchError> {
        if !self.is_listening() {
            debug!("Transcript ignored, voice recognition paused");
            return Ok(None);
        }

        if !self.matches(transcript) {
            debug!("No trigger phrase in transcript");
            return Ok(None);
        }

        info!("Trigger phrase recognised, requesting activation");
        self.coordinator.activate(SourceId::voice()).await.map(Some)
    }
}
