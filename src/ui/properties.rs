// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Deck and slide properties panel.
//!
//! The deck settings (celebrant, theme, audio) are edited in place. Slide
//! fields are collected into a [`SlidePatch`] and returned, so the deck
//! stays the only place slides are changed.

use crate::config::{MAX_SLIDE_SECONDS, MIN_SLIDE_SECONDS};
use crate::models::deck::Deck;
use crate::models::slide::{clamp_duration, Slide, SlideKind, SlidePatch};
use crate::presentation::registry::{EffectKind, TransitionKind, BACKGROUND_STYLES, FONT_SCALES};

/// Action requested from the properties panel.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertiesAction {
    None,
    /// A deck-wide setting was edited in place.
    DeckEdited,
    Patch(String, SlidePatch),
}

fn label_for<'a>(options: &'a [(&'a str, &'a str)], name: &'a str) -> &'a str {
    options
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, label)| *label)
        .unwrap_or(name)
}

/// Combo box over named options. Returns the picked name when it changed.
fn name_combo(ui: &mut egui::Ui, id: &str, options: &[(&str, &str)], current: &str) -> Option<String> {
    let mut picked = None;
    egui::ComboBox::from_id_source(id)
        .selected_text(label_for(options, current))
        .show_ui(ui, |ui| {
            for (name, label) in options {
                if ui.selectable_label(*name == current, *label).clicked() && *name != current {
                    picked = Some(name.to_string());
                }
            }
        });
    picked
}

/// Single or multi-line text field. Returns the new text when edited.
fn text_field(ui: &mut egui::Ui, label: &str, value: &Option<String>, multiline: bool) -> Option<String> {
    let mut buffer = value.clone().unwrap_or_default();
    ui.label(label);
    let response = if multiline {
        ui.add(egui::TextEdit::multiline(&mut buffer).desired_rows(4))
    } else {
        ui.text_edit_singleline(&mut buffer)
    };
    response.changed().then_some(buffer)
}

fn deck_settings(ui: &mut egui::Ui, deck: &mut Deck) -> bool {
    let mut edited = false;

    ui.heading("Deck");
    ui.separator();

    ui.label("Celebrant name");
    edited |= ui.text_edit_singleline(&mut deck.celebrant_name).changed();

    ui.label("Background");
    if let Some(name) = name_combo(ui, "theme_background", &BACKGROUND_STYLES, &deck.theme.background_style) {
        deck.theme.background_style = name;
        edited = true;
    }

    ui.label("Font size");
    if let Some(name) = name_combo(ui, "theme_font", &FONT_SCALES, &deck.theme.font_size_scale) {
        deck.theme.font_size_scale = name;
        edited = true;
    }

    ui.label("Music URL");
    let mut url = deck.audio.url.clone().unwrap_or_default();
    if ui
        .text_edit_singleline(&mut url)
        .on_hover_text("Leave empty to use the built-in track")
        .changed()
    {
        deck.audio.url = if url.trim().is_empty() { None } else { Some(url) };
        edited = true;
    }
    edited |= ui.checkbox(&mut deck.audio.autoplay, "Autoplay music").changed();

    edited
}

fn slide_editor(ui: &mut egui::Ui, slide: &Slide) -> SlidePatch {
    let mut patch = SlidePatch::default();

    ui.heading(format!("Slide · {}", slide.kind().name()));
    ui.separator();

    egui::Grid::new("slide_motion").num_columns(2).show(ui, |ui| {
        ui.label("Transition");
        let transitions: Vec<(&str, &str)> = TransitionKind::ALL.iter().map(|k| (k.name(), k.label())).collect();
        patch.transition_name = name_combo(ui, "slide_transition", &transitions, &slide.transition_name);
        ui.end_row();

        ui.label("Effect");
        let effects: Vec<(&str, &str)> = EffectKind::ALL.iter().map(|k| (k.name(), k.label())).collect();
        patch.effect_name = name_combo(ui, "slide_effect", &effects, &slide.effect_name);
        ui.end_row();

        ui.label("Duration");
        let mut seconds = slide.effective_duration();
        if ui
            .add(egui::Slider::new(&mut seconds, MIN_SLIDE_SECONDS..=MAX_SLIDE_SECONDS).suffix(" s"))
            .changed()
        {
            patch.duration_seconds = Some(clamp_duration(seconds));
        }
        ui.end_row();
    });

    ui.separator();

    match slide.kind() {
        SlideKind::Title | SlideKind::Outro => {
            patch.title = text_field(ui, "Title", &slide.title, false);
            patch.subtitle = text_field(ui, "Subtitle", &slide.subtitle, false);
        }
        SlideKind::Message => {
            patch.text = text_field(ui, "Message", &slide.text, true);
        }
        SlideKind::Image => {
            patch.image_url = text_field(ui, "Image URL", &slide.image_url, false);
            patch.caption = text_field(ui, "Caption", &slide.caption, false);
        }
        SlideKind::Video => {
            patch.video_url = text_field(ui, "Video URL", &slide.video_url, false);
            patch.caption = text_field(ui, "Caption", &slide.caption, false);
        }
    }

    ui.separator();

    patch.background_image_url = text_field(ui, "Background image URL", &slide.background_image_url, false);

    ui.label("Background override");
    let mut styles = vec![("", "Theme default")];
    styles.extend_from_slice(&BACKGROUND_STYLES);
    let current = slide.background_style.as_deref().unwrap_or("");
    patch.background_style = name_combo(ui, "slide_background", &styles, current);

    let mut balloons = slide.show_balloons;
    if ui.checkbox(&mut balloons, "Balloons").changed() {
        patch.show_balloons = Some(balloons);
    }
    let mut confetti = slide.fire_confetti;
    if ui.checkbox(&mut confetti, "Confetti").changed() {
        patch.fire_confetti = Some(confetti);
    }

    patch
}

/// Display the properties panel.
pub fn show(ui: &mut egui::Ui, deck: &mut Deck, selected: Option<&str>) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    egui::ScrollArea::vertical().show(ui, |ui| {
        if deck_settings(ui, deck) {
            action = PropertiesAction::DeckEdited;
        }

        ui.add_space(12.0);

        match selected.and_then(|id| deck.slide(id)) {
            Some(slide) => {
                let patch = slide_editor(ui, slide);
                if !patch.is_empty() {
                    action = PropertiesAction::Patch(slide.id().to_string(), patch);
                }
            }
            None => {
                ui.label(egui::RichText::new("Select a slide to edit it").italics().weak());
            }
        }
    });

    action
}
