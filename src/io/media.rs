// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media file loading (images and background audio).
//!
//! This module resolves the locations slides refer to and loads images,
//! converting them to RGBA pixels suitable for display in egui. Remote
//! locations are not fetched; they are reported as unavailable and the
//! presenter draws a placeholder or stays silent.

use crate::error::MediaError;
use std::path::{Path, PathBuf};

/// Decoded image ready for upload as a texture.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Map a slide or audio location onto a local file path.
///
/// Relative paths are resolved against `base_dir`, and a leading `/`
/// (web-root style, as in decks authored for the browser) is treated as
/// relative too.
pub fn resolve_local_path(location: &str, base_dir: &Path) -> Result<PathBuf, MediaError> {
    let location = location.trim();
    if location.is_empty() {
        return Err(MediaError::unavailable(location, "no location set"));
    }
    if location.starts_with("http://") || location.starts_with("https://") {
        return Err(MediaError::unavailable(location, "remote media is not fetched"));
    }

    let path = location.strip_prefix("file://").unwrap_or(location);
    let candidate = PathBuf::from(path);
    if candidate.is_absolute() && candidate.exists() {
        return Ok(candidate);
    }
    Ok(base_dir.join(path.trim_start_matches('/')))
}

/// Load an image file and convert it to RGBA8.
pub fn load_image(path: &Path) -> Result<LoadedImage, MediaError> {
    let img = image::open(path)
        .map_err(|e| MediaError::unavailable(path.display().to_string(), e.to_string()))?;
    let rgba = img.to_rgba8();
    Ok(LoadedImage {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

/// Resolve the background track to an existing local file.
pub fn probe_audio(source: &str, base_dir: &Path) -> Result<PathBuf, MediaError> {
    let path = resolve_local_path(source, base_dir)?;
    if path.is_file() {
        Ok(path)
    } else {
        Err(MediaError::unavailable(source, "file not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_and_web_root_paths() {
        let base = Path::new("/decks");
        assert_eq!(
            resolve_local_path("photos/a.png", base).unwrap(),
            PathBuf::from("/decks/photos/a.png")
        );
        assert_eq!(
            resolve_local_path("/cake.jpeg", base).unwrap(),
            PathBuf::from("/decks/cake.jpeg")
        );
    }

    #[test]
    fn test_remote_and_empty_locations_are_unavailable() {
        let base = Path::new(".");
        assert!(resolve_local_path("https://example.com/a.png", base).is_err());
        assert!(resolve_local_path("  ", base).is_err());
    }

    #[test]
    fn test_load_image_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        image::RgbaImage::from_pixel(3, 2, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!((loaded.width, loaded.height), (3, 2));
        assert_eq!(loaded.pixels.len(), 3 * 2 * 4);
        assert!(load_image(&dir.path().join("missing.png")).is_err());
    }

    #[test]
    fn test_probe_audio() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("song.mp3"), b"id3").unwrap();
        assert!(probe_audio("song.mp3", dir.path()).is_ok());
        assert!(probe_audio("other.mp3", dir.path()).is_err());
    }
}
