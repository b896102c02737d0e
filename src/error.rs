// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for the deck core.
//!
//! Unknown registry names and an empty deck at playback start are not
//! errors here: the registry resolves them to defaults and the player
//! reports an empty deck as an exit reason.

use thiserror::Error;

/// Errors raised by deck editing and (de)serialization.
#[derive(Error, Debug)]
pub enum DeckError {
    /// The document could not be parsed into a deck. Callers keep their
    /// current deck untouched.
    #[error("Malformed deck document: {0}")]
    MalformedDeckDocument(String),

    /// No slide with this id exists in the deck.
    #[error("Slide not found: {0}")]
    SlideNotFound(String),

    /// A slide with this id is already part of the deck.
    #[error("Duplicate slide id: {0}")]
    DuplicateSlideId(String),

    /// File extension is neither JSON nor YAML.
    #[error("Unsupported deck file extension: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for DeckError {
    fn from(e: serde_json::Error) -> Self {
        DeckError::MalformedDeckDocument(e.to_string())
    }
}

impl From<serde_yaml::Error> for DeckError {
    fn from(e: serde_yaml::Error) -> Self {
        DeckError::MalformedDeckDocument(e.to_string())
    }
}

/// Result type for deck operations.
pub type Result<T> = std::result::Result<T, DeckError>;

/// Image, video or audio that cannot be loaded. Never halts playback.
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Media resource unavailable: {url} ({reason})")]
    MediaResourceUnavailable { url: String, reason: String },
}

impl MediaError {
    pub fn unavailable(url: impl Into<String>, reason: impl Into<String>) -> Self {
        MediaError::MediaResourceUnavailable {
            url: url.into(),
            reason: reason.into(),
        }
    }
}
