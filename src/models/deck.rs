// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Deck state management.
//!
//! The deck owns the ordered slides and the presentation-wide settings.
//! Slides are only added, changed, moved and removed through the methods
//! here so that ids stay unique and order stays a pure permutation.

use super::slide::{Slide, SlideKind, SlidePatch};
use crate::error::{DeckError, Result};
use serde::{Deserialize, Serialize};

/// Default visual settings for slides that don't override them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Theme {
    #[serde(alias = "background")]
    pub background_style: String,
    #[serde(alias = "fontSize")]
    pub font_size_scale: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background_style: "gradient-candy".to_string(),
            font_size_scale: "xl".to_string(),
        }
    }
}

/// Background track configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Track location; empty means the built-in fallback track.
    pub url: Option<String>,
    pub autoplay: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            url: None,
            autoplay: true,
        }
    }
}

impl AudioSettings {
    /// The track to play, using `fallback` when no url is set.
    pub fn source<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url,
            _ => fallback,
        }
    }
}

/// Direction for [`Deck::move_slide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

impl MoveDirection {
    pub fn offset(self) -> isize {
        match self {
            MoveDirection::Up => -1,
            MoveDirection::Down => 1,
        }
    }
}

/// A complete presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub celebrant_name: String,
    pub theme: Theme,
    slides: Vec<Slide>,
    pub audio: AudioSettings,
}

impl Default for Deck {
    fn default() -> Self {
        Self::starter()
    }
}

impl Deck {
    /// Assemble a deck from parts. Slide ids must already be unique.
    pub fn new(
        celebrant_name: String,
        theme: Theme,
        audio: AudioSettings,
        slides: Vec<Slide>,
    ) -> Result<Self> {
        let mut deck = Self {
            celebrant_name,
            theme,
            slides: Vec::with_capacity(slides.len()),
            audio,
        };
        for slide in slides {
            deck.append_slide(slide)?;
        }
        Ok(deck)
    }

    /// The built-in starter deck every session begins with.
    pub fn starter() -> Self {
        // Starter slides are freshly created, so their ids are unique.
        Self {
            celebrant_name: String::new(),
            theme: Theme::default(),
            slides: starter_slides(),
            audio: AudioSettings::default(),
        }
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide(&self, id: &str) -> Option<&Slide> {
        self.slides.iter().find(|s| s.id() == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.slides.iter().position(|s| s.id() == id)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Append a slide at the end of the deck.
    pub fn append_slide(&mut self, slide: Slide) -> Result<()> {
        if self.position(slide.id()).is_some() {
            return Err(DeckError::DuplicateSlideId(slide.id().to_string()));
        }
        log::debug!("Appended {} slide {}", slide.kind().name(), slide.id());
        self.slides.push(slide);
        Ok(())
    }

    /// Merge `patch` into the slide with the given id.
    pub fn update_slide(&mut self, id: &str, patch: SlidePatch) -> Result<()> {
        let slide = self
            .slides
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or_else(|| DeckError::SlideNotFound(id.to_string()))?;
        slide.apply(patch);
        Ok(())
    }

    /// Remove a slide and return the id that should be selected next:
    /// the previous slide, else the first remaining one, else none.
    pub fn remove_slide(&mut self, id: &str) -> Result<Option<String>> {
        let idx = self
            .position(id)
            .ok_or_else(|| DeckError::SlideNotFound(id.to_string()))?;
        self.slides.remove(idx);
        log::debug!("Removed slide {}, {} left", id, self.slides.len());

        Ok(self
            .slides
            .get(idx.saturating_sub(1))
            .map(|s| s.id().to_string()))
    }

    /// Swap a slide with its neighbour. Returns `false` at either boundary.
    pub fn move_slide(&mut self, id: &str, direction: MoveDirection) -> Result<bool> {
        let i = self
            .position(id)
            .ok_or_else(|| DeckError::SlideNotFound(id.to_string()))?;
        let j = match i.checked_add_signed(direction.offset()) {
            Some(j) if j < self.slides.len() => j,
            _ => return Ok(false),
        };
        self.slides.swap(i, j);
        Ok(true)
    }
}

/// Slides of the starter deck.
pub fn starter_slides() -> Vec<Slide> {
    let mut title = Slide::new(SlideKind::Title);
    title.subtitle = Some("🎉 Turn the volume up 🎉".to_string());
    title.background_style = Some("gradient-candy".to_string());
    title.effect_name = "bounce".to_string();

    let mut message = Slide::new(SlideKind::Message);
    message.text = Some(
        "Happy birthday! 🎉\n\
         Wishing you a year full of health, curiosity and the things you love.\n\
         May every effort you make this year pay off sweetly.\n\
         Have a wonderful day and see you soon."
            .to_string(),
    );
    message.duration_seconds = Some(15.0);
    message.transition_name = "slide-left".to_string();
    message.effect_name = "fade-up".to_string();

    let mut image = Slide::new(SlideKind::Image);
    image.caption = Some("A favourite memory ✨".to_string());
    image.duration_seconds = Some(7.0);
    image.transition_name = "zoom".to_string();

    let mut outro = Slide::new(SlideKind::Outro);
    outro.title = Some("Have a nice day!".to_string());
    outro.subtitle = Some("See you soon 💖".to_string());
    outro.show_balloons = false;
    outro.transition_name = "flip".to_string();
    outro.effect_name = "rotate-in".to_string();

    vec![title, message, image, outro]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_slide_deck() -> (Deck, Vec<String>) {
        let slides = vec![
            Slide::new(SlideKind::Title),
            Slide::new(SlideKind::Message),
            Slide::new(SlideKind::Outro),
        ];
        let ids = slides.iter().map(|s| s.id().to_string()).collect();
        let deck = Deck::new(
            "Ada".to_string(),
            Theme::default(),
            AudioSettings::default(),
            slides,
        )
        .unwrap();
        (deck, ids)
    }

    fn ids_of(deck: &Deck) -> Vec<String> {
        deck.slides().iter().map(|s| s.id().to_string()).collect()
    }

    #[test]
    fn test_starter_deck_is_not_empty() {
        let deck = Deck::starter();
        assert!(!deck.is_empty());
        assert_eq!(deck.slides()[0].kind(), SlideKind::Title);
        assert!(deck.slides().last().unwrap().fire_confetti);
    }

    #[test]
    fn test_append_rejects_duplicate_id() {
        let (mut deck, _) = three_slide_deck();
        let copy = deck.slides()[0].clone();
        assert!(matches!(
            deck.append_slide(copy),
            Err(DeckError::DuplicateSlideId(_))
        ));
        assert_eq!(deck.len(), 3);

        deck.append_slide(Slide::new(SlideKind::Video)).unwrap();
        assert_eq!(deck.len(), 4);
        assert_eq!(deck.slides()[3].kind(), SlideKind::Video);
    }

    #[test]
    fn test_update_unknown_slide() {
        let (mut deck, _) = three_slide_deck();
        let before = deck.clone();
        let result = deck.update_slide("nope", SlidePatch::default());
        assert!(matches!(result, Err(DeckError::SlideNotFound(_))));
        assert_eq!(deck, before);
    }

    #[test]
    fn test_update_slide_merges_fields() {
        let (mut deck, ids) = three_slide_deck();
        deck.update_slide(
            &ids[1],
            SlidePatch {
                transition_name: Some("zoom".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        let slide = deck.slide(&ids[1]).unwrap();
        assert_eq!(slide.transition_name, "zoom");
        assert_eq!(slide.kind(), SlideKind::Message);
    }

    #[test]
    fn test_remove_reselects_previous_then_first_then_none() {
        let (mut deck, ids) = three_slide_deck();

        assert_eq!(deck.remove_slide(&ids[2]).unwrap(), Some(ids[1].clone()));
        assert_eq!(deck.remove_slide(&ids[0]).unwrap(), Some(ids[1].clone()));
        assert_eq!(deck.remove_slide(&ids[1]).unwrap(), None);
        assert!(deck.is_empty());
    }

    #[test]
    fn test_move_at_boundaries_is_noop() {
        let (mut deck, ids) = three_slide_deck();
        let before = deck.clone();

        assert!(!deck.move_slide(&ids[0], MoveDirection::Up).unwrap());
        assert!(!deck.move_slide(&ids[2], MoveDirection::Down).unwrap());
        assert_eq!(deck, before);
    }

    #[test]
    fn test_move_swaps_neighbours() {
        let (mut deck, ids) = three_slide_deck();
        assert!(deck.move_slide(&ids[0], MoveDirection::Down).unwrap());
        assert_eq!(ids_of(&deck), vec![ids[1].clone(), ids[0].clone(), ids[2].clone()]);

        assert!(deck.move_slide(&ids[2], MoveDirection::Up).unwrap());
        assert_eq!(ids_of(&deck), vec![ids[1].clone(), ids[2].clone(), ids[0].clone()]);
    }

    #[test]
    fn test_move_sequences_preserve_ids() {
        let (mut deck, ids) = three_slide_deck();
        let mut expected = ids.clone();
        expected.sort();

        // Walk a fixed pseudo-random sequence of moves over every slide.
        let mut seed: u32 = 7;
        for _ in 0..200 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let id = &ids[(seed >> 16) as usize % ids.len()];
            let dir = if seed & 1 == 0 { MoveDirection::Up } else { MoveDirection::Down };
            deck.move_slide(id, dir).unwrap();

            let mut now = ids_of(&deck);
            now.sort();
            assert_eq!(now, expected);
        }
    }

    #[test]
    fn test_audio_source_fallback() {
        let mut audio = AudioSettings::default();
        assert_eq!(audio.source("fallback.mp3"), "fallback.mp3");
        audio.url = Some("   ".to_string());
        assert_eq!(audio.source("fallback.mp3"), "fallback.mp3");
        audio.url = Some("song.ogg".to_string());
        assert_eq!(audio.source("fallback.mp3"), "song.ogg");
    }
}
