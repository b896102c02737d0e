// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Deck serialization and deserialization.
//!
//! This module handles exporting and importing decks in JSON and YAML.
//! A document holds exactly `celebrantName`, `theme`, `slides` and
//! `audio`. Importing is lenient about missing settings but strict about
//! structure: anything that does not parse is a
//! [`DeckError::MalformedDeckDocument`] and the caller keeps its deck.
//!
//! Recovery policy: a document without slides (missing or empty list)
//! imports as the built-in starter deck, keeping its other settings.

use crate::config::EXPORT_FILE_PREFIX;
use crate::error::{DeckError, Result};
use crate::models::deck::{starter_slides, AudioSettings, Deck, Theme};
use crate::models::slide::Slide;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Content type of exported JSON decks.
pub const JSON_MIME_TYPE: &str = "application/json";

/// Content type of exported YAML decks.
pub const YAML_MIME_TYPE: &str = "application/yaml";

/// Deck file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckFormat {
    Json,
    Yaml,
}

impl DeckFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path.extension().and_then(|s| s.to_str());
        match extension {
            Some("json") => Ok(DeckFormat::Json),
            Some("yaml") | Some("yml") => Ok(DeckFormat::Yaml),
            _ => Err(DeckError::UnsupportedFormat(format!("{:?}", extension))),
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            DeckFormat::Json => JSON_MIME_TYPE,
            DeckFormat::Yaml => YAML_MIME_TYPE,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            DeckFormat::Json => "json",
            DeckFormat::Yaml => "yaml",
        }
    }
}

/// Incoming document. Every part is optional so that partial files import.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeckDocument {
    #[serde(default, alias = "celebrant")]
    celebrant_name: Option<String>,
    #[serde(default)]
    theme: Option<Theme>,
    #[serde(default)]
    slides: Option<Vec<Slide>>,
    #[serde(default)]
    audio: Option<AudioSettings>,
}

impl DeckDocument {
    fn into_deck(self) -> Result<Deck> {
        let slides = match self.slides {
            Some(slides) if !slides.is_empty() => repair_ids(slides),
            _ => {
                log::info!("Document has no slides, using the starter deck");
                starter_slides()
            }
        };
        Deck::new(
            self.celebrant_name.unwrap_or_default(),
            self.theme.unwrap_or_default(),
            self.audio.unwrap_or_default(),
            slides,
        )
    }
}

/// Give slides with an empty or repeated id a fresh one.
fn repair_ids(mut slides: Vec<Slide>) -> Vec<Slide> {
    let mut seen = HashSet::new();
    for slide in &mut slides {
        if slide.id().is_empty() || !seen.insert(slide.id().to_string()) {
            let old = slide.id().to_string();
            slide.reassign_id();
            log::warn!("Slide id {:?} was missing or repeated, now {}", old, slide.id());
            seen.insert(slide.id().to_string());
        }
    }
    slides
}

/// Serialize a deck to pretty-printed JSON.
pub fn to_json(deck: &Deck) -> Result<String> {
    Ok(serde_json::to_string_pretty(deck)?)
}

/// Serialize a deck to YAML.
pub fn to_yaml(deck: &Deck) -> Result<String> {
    Ok(serde_yaml::to_string(deck)?)
}

/// Parse a deck from JSON text.
pub fn from_json(text: &str) -> Result<Deck> {
    let document: DeckDocument = serde_json::from_str(text)?;
    document.into_deck()
}

/// Parse a deck from YAML text.
pub fn from_yaml(text: &str) -> Result<Deck> {
    let document: DeckDocument = serde_yaml::from_str(text)?;
    document.into_deck()
}

/// Serialize a deck in the given format.
pub fn serialize(deck: &Deck, format: DeckFormat) -> Result<String> {
    match format {
        DeckFormat::Json => to_json(deck),
        DeckFormat::Yaml => to_yaml(deck),
    }
}

/// Parse a deck in the given format.
pub fn deserialize(text: &str, format: DeckFormat) -> Result<Deck> {
    match format {
        DeckFormat::Json => from_json(text),
        DeckFormat::Yaml => from_yaml(text),
    }
}

/// Write a deck to `path`, in the format its extension names.
pub fn export_deck(deck: &Deck, path: &Path) -> Result<()> {
    let format = DeckFormat::from_path(path)?;
    std::fs::write(path, serialize(deck, format)?)?;
    Ok(())
}

/// Read a deck from `path`, in the format its extension names.
pub fn import_deck(path: &Path) -> Result<Deck> {
    let format = DeckFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    deserialize(&text, format)
}

/// Timestamped file name for an export, e.g. `birthday-deck-1700000000000.json`.
pub fn export_file_name(now: DateTime<Utc>, format: DeckFormat) -> String {
    format!(
        "{}-{}.{}",
        EXPORT_FILE_PREFIX,
        now.timestamp_millis(),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::slide::{SlideKind, SlidePatch};
    use chrono::TimeZone;

    fn sample_deck() -> Deck {
        let mut deck = Deck::starter();
        deck.celebrant_name = "Ada".to_string();
        deck.theme.background_style = "gradient-ocean".to_string();
        deck.audio.url = Some("music/party.ogg".to_string());
        deck.audio.autoplay = false;

        let mut video = Slide::new(SlideKind::Video);
        video.apply(SlidePatch {
            video_url: Some("clips/candles.mp4".to_string()),
            background_image_url: Some("bg.png".to_string()),
            duration_seconds: Some(12.5),
            ..Default::default()
        });
        video.duration_seconds = None;
        deck.append_slide(video).unwrap();
        deck
    }

    #[test]
    fn test_json_round_trip() {
        let deck = sample_deck();
        let json = to_json(&deck).unwrap();
        assert_eq!(from_json(&json).unwrap(), deck);
    }

    #[test]
    fn test_yaml_round_trip() {
        let deck = sample_deck();
        let yaml = to_yaml(&deck).unwrap();
        assert_eq!(from_yaml(&yaml).unwrap(), deck);
    }

    #[test]
    fn test_document_has_exactly_four_keys_and_every_slide_field() {
        let json = to_json(&sample_deck()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, vec!["audio", "celebrantName", "slides", "theme"]);

        let slide = value["slides"][0].as_object().unwrap();
        for field in [
            "id",
            "kind",
            "durationSeconds",
            "transitionName",
            "effectName",
            "title",
            "subtitle",
            "text",
            "imageUrl",
            "videoUrl",
            "caption",
            "backgroundImageUrl",
            "backgroundStyle",
            "showBalloons",
            "fireConfetti",
        ] {
            assert!(slide.contains_key(field), "missing {}", field);
        }
    }

    #[test]
    fn test_malformed_documents_fail() {
        for text in [
            "not json",
            "[1, 2, 3]",
            r#"{"slides": "nope"}"#,
            r#"{"slides": [{"id": "a"}]}"#,
            r#"{"slides": [{"id": "a", "kind": "hologram"}]}"#,
        ] {
            assert!(
                matches!(from_json(text), Err(DeckError::MalformedDeckDocument(_))),
                "{} should be malformed",
                text
            );
        }
    }

    #[test]
    fn test_empty_slides_yield_starter_deck() {
        let deck = from_json(r#"{"celebrantName": "Ada", "slides": []}"#).unwrap();
        assert_eq!(deck.celebrant_name, "Ada");
        assert_eq!(deck.len(), starter_slides().len());
        assert_eq!(deck.slides()[0].kind(), SlideKind::Title);

        let deck = from_json("{}").unwrap();
        assert!(!deck.is_empty());
        assert_eq!(deck.theme, Theme::default());
        assert!(deck.audio.autoplay);
    }

    #[test]
    fn test_legacy_document_imports() {
        let text = r#"{
            "celebrant": "Linh",
            "theme": {"background": "gradient-sunset", "fontSize": "2xl"},
            "slides": [
                {"id": "k3j2h1a", "type": "title", "title": "Happy Birthday!",
                 "bg": "gradient-candy", "duration": 7, "transition": "fade",
                 "effect": "bounce", "balloons": true},
                {"id": "p0q9r8s", "type": "image", "imageUrl": "/cake.jpeg",
                 "caption": "Cake", "duration": 7, "transition": "zoom", "effect": "none"}
            ],
            "audio": {"url": ""}
        }"#;
        let deck = from_json(text).unwrap();
        assert_eq!(deck.celebrant_name, "Linh");
        assert_eq!(deck.theme.background_style, "gradient-sunset");
        assert_eq!(deck.theme.font_size_scale, "2xl");
        assert_eq!(deck.slides()[0].id(), "k3j2h1a");
        assert_eq!(deck.slides()[0].effect_name, "bounce");
        assert_eq!(deck.slides()[1].image_url.as_deref(), Some("/cake.jpeg"));
        assert!(deck.audio.autoplay);
        assert_eq!(deck.audio.source("fallback.mp3"), "fallback.mp3");
    }

    #[test]
    fn test_missing_and_duplicate_ids_are_repaired() {
        let text = r#"{"slides": [
            {"id": "same", "kind": "title"},
            {"id": "same", "kind": "message"},
            {"kind": "outro"}
        ]}"#;
        let deck = from_json(text).unwrap();
        let ids: HashSet<&str> = deck.slides().iter().map(|s| s.id()).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(deck.slides()[0].id(), "same");
        assert!(ids.iter().all(|id| !id.is_empty()));
    }

    #[test]
    fn test_file_round_trip_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let deck = sample_deck();

        for name in ["deck.json", "deck.yaml", "deck.yml"] {
            let path = dir.path().join(name);
            export_deck(&deck, &path).unwrap();
            assert_eq!(import_deck(&path).unwrap(), deck);
        }

        let bad = dir.path().join("deck.txt");
        assert!(matches!(
            export_deck(&deck, &bad),
            Err(DeckError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_export_file_name() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(
            export_file_name(now, DeckFormat::Json),
            "birthday-deck-1700000000123.json"
        );
        assert_eq!(DeckFormat::Json.mime_type(), "application/json");
    }
}
