// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Slide data structures.
//!
//! A slide is one timed beat of the presentation. Its kind decides which
//! optional content fields are meaningful; the kind and the id are fixed
//! at creation and only readable from outside this module.

use crate::config::{MAX_SLIDE_SECONDS, MIN_SLIDE_SECONDS};
use crate::models::deck::Theme;
use crate::presentation::registry::{DEFAULT_EFFECT, DEFAULT_TRANSITION};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Type of slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    Title,
    Message,
    Image,
    Video,
    Outro,
}

impl SlideKind {
    pub const ALL: [SlideKind; 5] = [
        SlideKind::Title,
        SlideKind::Message,
        SlideKind::Image,
        SlideKind::Video,
        SlideKind::Outro,
    ];

    /// Display time used when a slide has no usable duration of its own.
    pub fn default_duration(self) -> f64 {
        match self {
            SlideKind::Title => 7.0,
            SlideKind::Message => 6.0,
            SlideKind::Image => 5.0,
            SlideKind::Video => 6.0,
            SlideKind::Outro => 7.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SlideKind::Title => "title",
            SlideKind::Message => "message",
            SlideKind::Image => "image",
            SlideKind::Video => "video",
            SlideKind::Outro => "outro",
        }
    }
}

/// A single slide.
///
/// Field names follow the exported document. The aliases accept files
/// written by the browser-based builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    #[serde(default)]
    id: String,
    #[serde(alias = "type")]
    kind: SlideKind,
    #[serde(default, alias = "duration")]
    pub duration_seconds: Option<f64>,
    #[serde(default = "default_transition_name", alias = "transition")]
    pub transition_name: String,
    #[serde(default = "default_effect_name", alias = "effect")]
    pub effect_name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default, alias = "bgImage")]
    pub background_image_url: Option<String>,
    #[serde(default, alias = "bg")]
    pub background_style: Option<String>,
    #[serde(default, alias = "balloons")]
    pub show_balloons: bool,
    #[serde(default, alias = "confetti")]
    pub fire_confetti: bool,
}

fn default_transition_name() -> String {
    DEFAULT_TRANSITION.to_string()
}

fn default_effect_name() -> String {
    DEFAULT_EFFECT.to_string()
}

/// Generate a fresh slide id.
pub fn new_slide_id() -> String {
    Uuid::new_v4().simple().to_string()
}

impl Slide {
    /// Create a slide of the given kind with its presets and a fresh id.
    pub fn new(kind: SlideKind) -> Self {
        let mut slide = Self::bare(new_slide_id(), kind);
        match kind {
            SlideKind::Title => {
                slide.title = Some("Happy Birthday!".to_string());
                slide.subtitle = Some("🎉 🎉 🎉 🎉 🎉 🎉 🎉".to_string());
                slide.show_balloons = true;
            }
            SlideKind::Message => {
                slide.text = Some("Wishing you a wonderful year ahead!".to_string());
            }
            SlideKind::Image => {
                slide.image_url = Some(String::new());
                slide.caption = Some(String::new());
            }
            SlideKind::Video => {
                slide.video_url = Some(String::new());
                slide.caption = Some(String::new());
            }
            SlideKind::Outro => {
                slide.title = Some("Have a magical day!".to_string());
                slide.subtitle = Some("Thanks for watching 💖".to_string());
                slide.show_balloons = true;
                slide.fire_confetti = true;
            }
        }
        slide
    }

    /// Create a slide for a deck with the given theme. A title slide
    /// starts on the theme's current background.
    pub fn with_theme(kind: SlideKind, theme: &Theme) -> Self {
        let mut slide = Self::new(kind);
        if kind == SlideKind::Title {
            slide.background_style = Some(theme.background_style.clone());
        }
        slide
    }

    /// A slide with no content fields set.
    pub(crate) fn bare(id: String, kind: SlideKind) -> Self {
        Self {
            id,
            kind,
            duration_seconds: Some(kind.default_duration()),
            transition_name: default_transition_name(),
            effect_name: default_effect_name(),
            title: None,
            subtitle: None,
            text: None,
            image_url: None,
            video_url: None,
            caption: None,
            background_image_url: None,
            background_style: None,
            show_balloons: false,
            fire_confetti: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> SlideKind {
        self.kind
    }

    /// Replace the id. Only used when repairing imported documents.
    pub(crate) fn reassign_id(&mut self) {
        self.id = new_slide_id();
    }

    /// Display time in seconds, falling back to the kind default for
    /// missing, non-positive or non-finite durations.
    pub fn effective_duration(&self) -> f64 {
        match self.duration_seconds {
            Some(d) if d.is_finite() && d > 0.0 => d,
            _ => self.kind.default_duration(),
        }
    }

    /// Merge a patch into this slide. Kind and id are never touched.
    pub fn apply(&mut self, patch: SlidePatch) {
        let SlidePatch {
            duration_seconds,
            transition_name,
            effect_name,
            title,
            subtitle,
            text,
            image_url,
            video_url,
            caption,
            background_image_url,
            background_style,
            show_balloons,
            fire_confetti,
        } = patch;

        if let Some(d) = duration_seconds {
            self.duration_seconds = Some(d);
        }
        if let Some(t) = transition_name {
            self.transition_name = t;
        }
        if let Some(e) = effect_name {
            self.effect_name = e;
        }
        set_if(&mut self.title, title);
        set_if(&mut self.subtitle, subtitle);
        set_if(&mut self.text, text);
        set_if(&mut self.image_url, image_url);
        set_if(&mut self.video_url, video_url);
        set_if(&mut self.caption, caption);
        set_if(&mut self.background_image_url, background_image_url);
        set_if(&mut self.background_style, background_style);
        if let Some(b) = show_balloons {
            self.show_balloons = b;
        }
        if let Some(c) = fire_confetti {
            self.fire_confetti = c;
        }
    }

    /// Short label for list rows.
    pub fn summary(&self) -> String {
        if let Some(title) = non_empty(&self.title) {
            title.to_string()
        } else if let Some(caption) = non_empty(&self.caption) {
            caption.to_string()
        } else if let Some(text) = non_empty(&self.text) {
            let head: String = text.chars().take(20).collect();
            format!("{}…", head)
        } else if non_empty(&self.image_url).is_some() {
            "image".to_string()
        } else {
            String::new()
        }
    }
}

fn set_if(field: &mut Option<String>, value: Option<String>) {
    if let Some(v) = value {
        *field = Some(v);
    }
}

/// Treat an empty string the same as an absent field.
pub fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

/// Field changes for one slide. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlidePatch {
    pub duration_seconds: Option<f64>,
    pub transition_name: Option<String>,
    pub effect_name: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub text: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub caption: Option<String>,
    pub background_image_url: Option<String>,
    pub background_style: Option<String>,
    pub show_balloons: Option<bool>,
    pub fire_confetti: Option<bool>,
}

impl SlidePatch {
    pub fn is_empty(&self) -> bool {
        *self == SlidePatch::default()
    }
}

/// Clamp an edited duration into the range the editor allows.
pub fn clamp_duration(seconds: f64) -> f64 {
    if seconds.is_nan() {
        return MIN_SLIDE_SECONDS;
    }
    seconds.clamp(MIN_SLIDE_SECONDS, MAX_SLIDE_SECONDS)
}
