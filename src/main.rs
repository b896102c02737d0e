// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Birthday Deck
//!
//! A desktop builder and presenter for birthday slide decks: title,
//! message, image, video and outro slides with transitions, effects,
//! balloons and confetti, played back with timed auto-advance.

mod app;
mod config;
mod error;
mod io;
mod models;
mod presentation;
mod ui;
mod util;

use anyhow::{Context, Result};
use app::{deck_dir_of, DeckBuilderApp};
use clap::Parser;
use config::PresentationConfig;
use models::deck::Deck;
use std::path::PathBuf;

/// Build and present birthday slide decks.
#[derive(Debug, Parser)]
#[command(name = "birthday-deck", version, about)]
struct Cli {
    /// Deck file (JSON or YAML) to open
    deck: Option<PathBuf>,

    /// Presentation settings file (YAML or JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start presenting immediately
    #[arg(long)]
    present: bool,
}

/// Open the deck named on the command line, or the starter deck.
fn initial_deck(path: Option<&PathBuf>) -> (Deck, PathBuf) {
    let Some(path) = path else {
        return (Deck::starter(), PathBuf::from("."));
    };
    match io::serialization::import_deck(path) {
        Ok(deck) => {
            log::info!("Opened {} ({} slides)", path.display(), deck.len());
            (deck, deck_dir_of(path))
        }
        Err(e) => {
            log::error!("Failed to open {}: {}, starting with the starter deck", path.display(), e);
            (Deck::starter(), PathBuf::from("."))
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PresentationConfig::load(path)
            .with_context(|| format!("Could not load presentation config {}", path.display()))?,
        None => PresentationConfig::default(),
    };
    let (deck, deck_dir) = initial_deck(cli.deck.as_ref());

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Birthday Deck"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Birthday Deck",
        options,
        Box::new(move |_cc| Ok(Box::new(DeckBuilderApp::new(deck, deck_dir, config, cli.present)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
