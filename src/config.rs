// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Presentation policy settings.
//!
//! These values shape playback but are not part of a deck: the pause
//! between slides, the fallback background track and animation timings.
//! They can be overridden from a YAML or JSON file passed on the command
//! line.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Shortest slide duration the editor accepts, in seconds.
pub const MIN_SLIDE_SECONDS: f64 = 1.0;

/// Longest slide duration the editor accepts, in seconds.
pub const MAX_SLIDE_SECONDS: f64 = 30.0;

/// Prefix of exported deck file names.
pub const EXPORT_FILE_PREFIX: &str = "birthday-deck";

/// Playback settings shared by the player and the presenter surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PresentationConfig {
    /// Extra hold added after every slide's own duration.
    pub inter_slide_pause_seconds: f64,
    /// Track played when the deck's audio url is empty.
    pub fallback_audio_track: String,
    /// Length of the whole-slide transition and the content effect.
    pub transition_seconds: f32,
    /// Length of the cross-fade between consecutive slides.
    pub crossfade_seconds: f32,
    /// Balloons drawn on slides that show them.
    pub balloon_count: usize,
    /// Ask the window for fullscreen when a presentation starts.
    pub fullscreen: bool,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            inter_slide_pause_seconds: 2.0,
            fallback_audio_track: "assets/birthday-theme.mp3".to_string(),
            transition_seconds: 0.6,
            crossfade_seconds: 0.45,
            balloon_count: 14,
            fullscreen: true,
        }
    }
}

impl PresentationConfig {
    /// Load settings from a YAML (`.yaml`/`.yml`) or JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::from_str(&text)
                .with_context(|| format!("Invalid JSON config {}", path.display()))?,
            _ => serde_yaml::from_str(&text)
                .with_context(|| format!("Invalid YAML config {}", path.display()))?,
        };
        Ok(config)
    }

    /// Inter-slide pause as a duration.
    pub fn inter_slide_pause(&self) -> Duration {
        seconds_to_duration(self.inter_slide_pause_seconds)
    }

    /// Whole-slide transition length in seconds, within `0..=MAX_ANIMATION_SECONDS`.
    pub fn transition_length(&self) -> f32 {
        animation_seconds(self.transition_seconds)
    }

    /// Cross-fade length, within `0..=MAX_ANIMATION_SECONDS`.
    pub fn crossfade(&self) -> Duration {
        Duration::from_secs_f32(animation_seconds(self.crossfade_seconds))
    }
}

/// Longest transition or cross-fade the presenter animates, in seconds.
pub const MAX_ANIMATION_SECONDS: f32 = 5.0;

fn animation_seconds(seconds: f32) -> f32 {
    if seconds.is_nan() {
        return 0.0;
    }
    seconds.clamp(0.0, MAX_ANIMATION_SECONDS)
}

/// Convert seconds to a duration without panicking.
///
/// Negative and NaN values are zero; values too large to represent
/// (including infinity) saturate to `Duration::MAX`.
pub fn seconds_to_duration(seconds: f64) -> Duration {
    if seconds.is_nan() || seconds <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "interSlidePauseSeconds: 0.5\nballoonCount: 3").unwrap();

        let config = PresentationConfig::load(file.path()).unwrap();
        assert_eq!(config.inter_slide_pause(), Duration::from_millis(500));
        assert_eq!(config.balloon_count, 3);
        assert_eq!(config.fallback_audio_track, "assets/birthday-theme.mp3");
        assert!(config.fullscreen);
    }

    #[test]
    fn test_negative_pause_is_zero() {
        let config = PresentationConfig {
            inter_slide_pause_seconds: -3.0,
            ..Default::default()
        };
        assert_eq!(config.inter_slide_pause(), Duration::ZERO);
    }

    #[test]
    fn test_extreme_timings_do_not_panic() {
        let config = PresentationConfig {
            inter_slide_pause_seconds: f64::INFINITY,
            transition_seconds: f32::NAN,
            crossfade_seconds: 1e30,
            ..Default::default()
        };
        assert_eq!(config.inter_slide_pause(), Duration::MAX);
        assert_eq!(config.transition_length(), 0.0);
        assert_eq!(config.crossfade(), Duration::from_secs(5));

        assert_eq!(seconds_to_duration(1e300), Duration::MAX);
        assert_eq!(seconds_to_duration(f64::NAN), Duration::ZERO);
        assert_eq!(seconds_to_duration(1.5), Duration::from_millis(1500));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(PresentationConfig::load(&dir.path().join("absent.yaml")).is_err());
    }
}
