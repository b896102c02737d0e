// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Slide list.
//!
//! Shows the deck in playback order with select, move and remove
//! controls per row. Changes are returned as a [`TimelineAction`]; the
//! caller applies them to the deck.

use crate::models::deck::{Deck, MoveDirection};

/// Action requested from the slide list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineAction {
    None,
    Select(String),
    Move(String, MoveDirection),
    Remove(String),
}

/// Display the slide list.
pub fn show(ui: &mut egui::Ui, deck: &Deck, selected: Option<&str>) -> TimelineAction {
    let mut action = TimelineAction::None;

    ui.heading("Slides");
    ui.separator();

    if deck.is_empty() {
        ui.label(egui::RichText::new("No slides").italics().weak());
        return action;
    }

    let last = deck.len() - 1;
    egui::ScrollArea::vertical().show(ui, |ui| {
        for (index, slide) in deck.slides().iter().enumerate() {
            let id = slide.id();
            let is_selected = selected == Some(id);

            ui.horizontal(|ui| {
                let label = format!(
                    "{}. {} · {}s  {}",
                    index + 1,
                    slide.kind().name(),
                    slide.effective_duration(),
                    slide.summary()
                );
                if ui.selectable_label(is_selected, label).clicked() {
                    action = TimelineAction::Select(id.to_string());
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("🗑").on_hover_text("Remove").clicked() {
                        action = TimelineAction::Remove(id.to_string());
                    }
                    if ui
                        .add_enabled(index < last, egui::Button::new("⬇").small())
                        .clicked()
                    {
                        action = TimelineAction::Move(id.to_string(), MoveDirection::Down);
                    }
                    if ui
                        .add_enabled(index > 0, egui::Button::new("⬆").small())
                        .clicked()
                    {
                        action = TimelineAction::Move(id.to_string(), MoveDirection::Up);
                    }
                });
            });
        }
    });

    action
}
