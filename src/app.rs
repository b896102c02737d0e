// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! The app has two faces. The editor shows the slide list, the properties
//! panel and a preview; all slide changes go through the deck's own
//! operations. The presenter drives a [`Player`] from the frame loop,
//! forwards keyboard and button input to it as commands, and carries out
//! the side effects it reports.

use crate::config::PresentationConfig;
use crate::error::DeckError;
use crate::io::audio::BackgroundTrack;
use crate::io::media;
use crate::io::serialization::{self, DeckFormat};
use crate::models::deck::Deck;
use crate::models::slide::{Slide, SlideKind};
use crate::presentation::player::{Player, PlayerCommand, PlayerEvent};
use crate::presentation::registry::Pose;
use crate::presentation::render::{self, balloon_field, Balloon};
use crate::ui::canvas::{self, Stage};
use crate::ui::images::ImageCache;
use crate::ui::properties::{self, PropertiesAction};
use crate::ui::timeline::{self, TimelineAction};
use crate::ui::toolbar::{self, ToolbarAction};
use crate::util::geometry::fit_within;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::Instant;

/// Result of a background deck import.
type ImportResult = (PathBuf, Result<Deck, DeckError>);

/// A running presentation: the player, what is on screen and what is heard.
struct Presentation {
    player: Player,
    stage: Stage,
    audio: Option<BackgroundTrack>,
}

/// Main application state.
pub struct DeckBuilderApp {
    /// The deck being edited
    deck: Deck,

    /// Id of the slide shown in the properties panel
    selected_slide: Option<String>,

    /// Playback settings
    config: PresentationConfig,

    /// Directory relative media locations resolve against
    deck_dir: PathBuf,

    /// Running presentation, if any
    presentation: Option<Presentation>,

    /// Receiver for background deck imports
    deck_loader: Option<Receiver<ImportResult>>,

    /// Loading state message
    loading_message: Option<String>,

    /// One-line outcome of the last file operation
    status: Option<String>,

    /// Textures for slide images
    images: ImageCache,

    /// Balloon layer of the editor preview
    preview_balloons: Vec<Balloon>,
    preview_started: Instant,

    /// Start presenting on the first frame
    present_on_start: bool,
}

impl DeckBuilderApp {
    /// Create the app around an initial deck.
    pub fn new(deck: Deck, deck_dir: PathBuf, config: PresentationConfig, present_on_start: bool) -> Self {
        let selected_slide = deck.slides().first().map(|s| s.id().to_string());
        let preview_balloons = balloon_field(config.balloon_count, &mut rand::thread_rng());
        Self {
            deck,
            selected_slide,
            config,
            images: ImageCache::new(deck_dir.clone()),
            deck_dir,
            presentation: None,
            deck_loader: None,
            loading_message: None,
            status: None,
            preview_balloons,
            preview_started: Instant::now(),
            present_on_start,
        }
    }

    fn set_status(&mut self, message: String) {
        self.status = Some(message);
    }

    /// Write the deck to a user-chosen file.
    fn export_deck(&mut self, format: DeckFormat) {
        let (filter, extensions): (&str, &[&str]) = match format {
            DeckFormat::Json => ("JSON", &["json"][..]),
            DeckFormat::Yaml => ("YAML", &["yaml", "yml"][..]),
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter(filter, extensions)
            .set_file_name(serialization::export_file_name(chrono::Utc::now(), format))
            .save_file()
        else {
            return;
        };

        match serialization::export_deck(&self.deck, &path) {
            Ok(()) => {
                log::info!("Exported {} slides to {} ({})", self.deck.len(), path.display(), format.mime_type());
                self.set_status(format!("Exported {}", path.display()));
            }
            Err(e) => {
                log::error!("Failed to export deck: {}", e);
                self.set_status(format!("Export failed: {}", e));
            }
        }
    }

    /// Read a deck file (asynchronously). The current deck stays until it succeeds.
    fn import_deck(&mut self, path: PathBuf) {
        let (sender, receiver) = channel();
        self.deck_loader = Some(receiver);
        self.loading_message = Some(format!("Loading {}...", path.display()));

        // Spawn background thread for loading
        std::thread::spawn(move || {
            let result = serialization::import_deck(&path);
            let _ = sender.send((path, result));
        });
    }

    /// Check for a completed import.
    fn poll_deck_loader(&mut self) {
        let Some(receiver) = &self.deck_loader else {
            return;
        };
        let Ok((path, result)) = receiver.try_recv() else {
            return;
        };
        self.deck_loader = None;
        self.loading_message = None;

        match result {
            Ok(deck) => {
                log::info!("Imported {} slides from {}", deck.len(), path.display());
                self.set_status(format!("Imported {} slides from {}", deck.len(), path.display()));
                self.selected_slide = deck.slides().first().map(|s| s.id().to_string());
                self.deck = deck;
                self.deck_dir = deck_dir_of(&path);
                self.images.set_base_dir(&self.deck_dir);
            }
            Err(e) => {
                log::error!("Failed to import {}: {}", path.display(), e);
                self.set_status(format!("Import failed: {}", e));
            }
        }
    }

    fn add_slide(&mut self, kind: SlideKind) {
        let slide = Slide::with_theme(kind, &self.deck.theme);
        let id = slide.id().to_string();
        match self.deck.append_slide(slide) {
            Ok(()) => {
                log::info!("Added {} slide, total: {}", kind.name(), self.deck.len());
                self.selected_slide = Some(id);
            }
            Err(e) => log::error!("Failed to add slide: {}", e),
        }
    }

    fn apply_timeline_action(&mut self, action: TimelineAction) {
        match action {
            TimelineAction::Select(id) => self.selected_slide = Some(id),
            TimelineAction::Move(id, direction) => {
                if let Err(e) = self.deck.move_slide(&id, direction) {
                    log::error!("Failed to move slide: {}", e);
                }
            }
            TimelineAction::Remove(id) => match self.deck.remove_slide(&id) {
                Ok(next) => {
                    log::info!("Removed slide {}, total: {}", id, self.deck.len());
                    if self.selected_slide.as_deref() == Some(id.as_str()) {
                        self.selected_slide = next;
                    }
                }
                Err(e) => log::error!("Failed to remove slide: {}", e),
            },
            TimelineAction::None => {}
        }
    }

    /// Hand a snapshot of the deck to a new player.
    fn start_presentation(&mut self, ctx: &egui::Context, now: Instant) {
        log::info!("Presenting {} slides", self.deck.len());
        let balloons = balloon_field(self.config.balloon_count, &mut rand::thread_rng());
        self.presentation = Some(Presentation {
            player: Player::present(self.deck.clone(), self.config.clone(), now),
            stage: Stage::new(balloons, now),
            audio: None,
        });
        self.process_player_events(ctx, now);
    }

    /// Carry out the side effects the player asked for since the last frame.
    fn process_player_events(&mut self, ctx: &egui::Context, now: Instant) {
        let Some(presentation) = self.presentation.as_mut() else {
            return;
        };
        let mut exited = false;

        for event in presentation.player.drain_events() {
            match event {
                PlayerEvent::FullscreenRequested => {
                    if self.config.fullscreen {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(true));
                    }
                }
                PlayerEvent::AudioRequested { source, autoplay } => {
                    if !autoplay {
                        log::info!("Autoplay is off, not starting {}", source);
                        continue;
                    }
                    let track = media::probe_audio(&source, &self.deck_dir)
                        .and_then(|path| BackgroundTrack::play(&path));
                    match track {
                        Ok(track) => presentation.audio = Some(track),
                        Err(e) => log::warn!("{}, presenting without music", e),
                    }
                }
                PlayerEvent::AudioStopped => {
                    if let Some(track) = presentation.audio.take() {
                        track.stop();
                    }
                }
                PlayerEvent::SlideActivated { index, activation, .. } => {
                    let player = &presentation.player;
                    if let Some(slide) = player.deck().slides().get(index) {
                        let deck = player.deck();
                        let view = render::compose(slide, &deck.celebrant_name, &deck.theme);
                        log::debug!("Showing slide {} (activation {})", index + 1, activation);
                        presentation.stage.activate(view, now);
                    }
                }
                PlayerEvent::Confetti { .. } => presentation.stage.confetti.fire(now),
                PlayerEvent::Exited(reason) => {
                    log::info!("Presentation ended: {:?}", reason);
                    exited = true;
                }
            }
        }

        if exited {
            self.presentation = None;
            if self.config.fullscreen {
                ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(false));
            }
        }
    }

    fn show_presenter(&mut self, ctx: &egui::Context, now: Instant) {
        let mut commands = Vec::new();
        ctx.input(|i| {
            if i.key_pressed(egui::Key::ArrowRight) || i.key_pressed(egui::Key::Space) {
                commands.push(PlayerCommand::Next);
            }
            if i.key_pressed(egui::Key::ArrowLeft) {
                commands.push(PlayerCommand::Previous);
            }
            if i.key_pressed(egui::Key::P) {
                commands.push(PlayerCommand::TogglePause);
            }
            if i.key_pressed(egui::Key::Escape) {
                commands.push(PlayerCommand::Exit);
            }
        });

        let Some(presentation) = self.presentation.as_mut() else {
            return;
        };
        presentation.stage.confetti.update(now, &mut rand::thread_rng());

        let images = &mut self.images;
        let clicked = egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::BLACK))
            .show(ctx, |ui| presentation.stage.show(ui, &presentation.player, images, now))
            .inner;
        commands.extend(clicked);

        for command in commands {
            log::debug!("Presenter command {:?}", command);
            presentation.player.dispatch(command, now);
        }
        presentation.player.tick(now);

        self.process_player_events(ctx, now);
    }

    fn show_preview(&mut self, ui: &mut egui::Ui) {
        let slide = self
            .selected_slide
            .as_deref()
            .and_then(|id| self.deck.slide(id))
            .or_else(|| self.deck.slides().first());
        let Some(slide) = slide else {
            ui.centered_and_justified(|ui| {
                ui.label(egui::RichText::new("The deck is empty").italics().weak());
            });
            return;
        };

        let view = render::compose(slide, &self.deck.celebrant_name, &self.deck.theme);
        let available = ui.available_rect_before_wrap();
        let (w, h) = fit_within(1280, 720, (available.width(), available.height()));
        let rect = egui::Rect::from_center_size(available.center(), egui::vec2(w, h));
        ui.allocate_rect(rect, egui::Sense::hover());

        let elapsed = self.preview_started.elapsed().as_secs_f32();
        canvas::paint_slide(
            ui.painter(),
            rect,
            &view,
            Pose::SETTLED,
            Pose::SETTLED,
            &self.preview_balloons,
            elapsed,
            &mut self.images,
        );
        if view.balloons {
            ui.ctx().request_repaint();
        }
    }
}

/// Directory that media locations in a deck file are relative to.
pub fn deck_dir_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

impl eframe::App for DeckBuilderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        self.images.poll(ctx);
        self.poll_deck_loader();

        if self.present_on_start {
            self.present_on_start = false;
            self.start_presentation(ctx, now);
        }

        if self.presentation.is_some() {
            self.show_presenter(ctx, now);
            ctx.request_repaint();
            return;
        }

        // Request repaint if still loading (to update spinner)
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }

        let mut present = false;

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Import Deck...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Decks", &["json", "yaml", "yml"])
                            .pick_file()
                        {
                            self.import_deck(path);
                        }
                        ui.close_menu();
                    }
                    ui.menu_button("Export Deck", |ui| {
                        if ui.button("Export as JSON...").clicked() {
                            self.export_deck(DeckFormat::Json);
                            ui.close_menu();
                        }
                        if ui.button("Export as YAML...").clicked() {
                            self.export_deck(DeckFormat::Yaml);
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    if ui.add_enabled(!self.deck.is_empty(), egui::Button::new("Present")).clicked() {
                        present = true;
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| toolbar::show(ui, self.deck.len()))
            .inner;

        match toolbar_action {
            ToolbarAction::AddSlide(kind) => self.add_slide(kind),
            ToolbarAction::Present => present = true,
            ToolbarAction::None => {}
        }

        // Status line
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            let text = self.status.as_deref().unwrap_or("Ready");
            ui.label(egui::RichText::new(text).small());
        });

        // Slide list (left side)
        let timeline_action = egui::SidePanel::left("slides")
            .default_width(260.0)
            .show(ctx, |ui| timeline::show(ui, &self.deck, self.selected_slide.as_deref()))
            .inner;
        self.apply_timeline_action(timeline_action);

        // Properties panel (right side)
        let selected = self.selected_slide.clone();
        let properties_action = egui::SidePanel::right("properties")
            .default_width(300.0)
            .show(ctx, |ui| properties::show(ui, &mut self.deck, selected.as_deref()))
            .inner;

        match properties_action {
            PropertiesAction::Patch(id, patch) => {
                if let Err(e) = self.deck.update_slide(&id, patch) {
                    log::error!("Failed to update slide: {}", e);
                }
            }
            PropertiesAction::DeckEdited => log::debug!("Deck settings edited"),
            PropertiesAction::None => {}
        }

        // Preview (center)
        egui::CentralPanel::default().show(ctx, |ui| {
            // Show loading overlay if loading
            if let Some(ref message) = self.loading_message {
                ui.centered_and_justified(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(20.0);
                        ui.spinner();
                        ui.add_space(10.0);
                        ui.label(
                            egui::RichText::new(message)
                                .size(16.0)
                                .color(egui::Color32::from_gray(200)),
                        );
                    });
                });
            } else {
                self.show_preview(ui);
            }
        });

        if present && !self.deck.is_empty() {
            self.start_presentation(ctx, now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_dir_of() {
        assert_eq!(deck_dir_of(Path::new("/decks/party.json")), PathBuf::from("/decks"));
        assert_eq!(deck_dir_of(Path::new("party.json")), PathBuf::from("."));
    }
}
