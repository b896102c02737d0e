// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Texture cache for slide images.
//!
//! Images load on background threads; the decoded pixels come back over a
//! channel and are uploaded as textures on the UI thread. A location that
//! fails to load is remembered as unavailable and drawn as a placeholder.

use crate::error::MediaError;
use crate::io::media::{self, LoadedImage};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};

type LoadResult = (String, Result<LoadedImage, MediaError>);

/// What the cache can offer for a location right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageState {
    Ready {
        texture: egui::TextureId,
        size: (u32, u32),
    },
    Loading,
    Unavailable,
}

enum Entry {
    Loading,
    Ready {
        texture: egui::TextureHandle,
        size: (u32, u32),
    },
    Unavailable,
}

pub struct ImageCache {
    base_dir: PathBuf,
    entries: HashMap<String, Entry>,
    sender: Sender<LoadResult>,
    receiver: Receiver<LoadResult>,
}

impl ImageCache {
    pub fn new(base_dir: PathBuf) -> Self {
        let (sender, receiver) = channel();
        Self {
            base_dir,
            entries: HashMap::new(),
            sender,
            receiver,
        }
    }

    /// Resolve relative locations against a new directory and forget everything cached.
    pub fn set_base_dir(&mut self, base_dir: &Path) {
        self.base_dir = base_dir.to_path_buf();
        self.entries.clear();
    }

    /// Upload images that finished loading since the last frame.
    pub fn poll(&mut self, ctx: &egui::Context) {
        while let Ok((location, result)) = self.receiver.try_recv() {
            let entry = match result {
                Ok(loaded) => {
                    let size = [loaded.width as usize, loaded.height as usize];
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &loaded.pixels);
                    let texture = ctx.load_texture(
                        format!("slide-image:{}", location),
                        color_image,
                        egui::TextureOptions::LINEAR,
                    );
                    log::info!("Loaded image {} ({}x{})", location, loaded.width, loaded.height);
                    Entry::Ready {
                        texture,
                        size: (loaded.width, loaded.height),
                    }
                }
                Err(e) => {
                    log::warn!("{}", e);
                    Entry::Unavailable
                }
            };
            self.entries.insert(location, entry);
            ctx.request_repaint();
        }
    }

    /// Look up a location, starting a background load the first time it is seen.
    pub fn get(&mut self, location: &str) -> ImageState {
        match self.entries.get(location) {
            Some(Entry::Ready { texture, size }) => {
                return ImageState::Ready {
                    texture: texture.id(),
                    size: *size,
                }
            }
            Some(Entry::Loading) => return ImageState::Loading,
            Some(Entry::Unavailable) => return ImageState::Unavailable,
            None => {}
        }

        let path = match media::resolve_local_path(location, &self.base_dir) {
            Ok(path) => path,
            Err(e) => {
                log::warn!("{}", e);
                self.entries.insert(location.to_string(), Entry::Unavailable);
                return ImageState::Unavailable;
            }
        };

        self.entries.insert(location.to_string(), Entry::Loading);
        let sender = self.sender.clone();
        let location = location.to_string();

        // Spawn background thread for loading
        std::thread::spawn(move || {
            let result = media::load_image(&path);
            let _ = sender.send((location, result));
        });
        ImageState::Loading
    }
}
