// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with the "add slide" buttons and the present button.

use crate::models::slide::SlideKind;

/// Action requested from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    AddSlide(SlideKind),
    Present,
}

fn add_label(kind: SlideKind) -> &'static str {
    match kind {
        SlideKind::Title => "➕ Title",
        SlideKind::Message => "➕ Message",
        SlideKind::Image => "➕ Image",
        SlideKind::Video => "➕ Video",
        SlideKind::Outro => "➕ Outro",
    }
}

/// Display the toolbar.
pub fn show(ui: &mut egui::Ui, slide_count: usize) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Add:");
        for kind in SlideKind::ALL {
            if ui.button(add_label(kind)).clicked() {
                action = ToolbarAction::AddSlide(kind);
            }
        }

        ui.separator();

        if ui
            .add_enabled(slide_count > 0, egui::Button::new("▶ Present"))
            .on_hover_text("Play the deck fullscreen (Esc to leave)")
            .clicked()
        {
            action = ToolbarAction::Present;
        }

        ui.separator();

        let hint = match slide_count {
            0 => "Add a slide to get started".to_string(),
            1 => "1 slide".to_string(),
            n => format!("{} slides", n),
        };
        ui.label(egui::RichText::new(hint).italics().weak());
    });

    action
}
