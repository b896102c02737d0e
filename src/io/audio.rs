// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Background track playback.
//!
//! The presentation's music is decoded with rodio and looped on its own
//! sink until the presentation ends. Every failure (missing file,
//! unsupported format, no output device) is reported as
//! [`MediaError::MediaResourceUnavailable`] and the presentation simply
//! stays silent.

use crate::error::MediaError;
use rodio::{Decoder, OutputStream, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A looping background track. Dropping it stops the sound.
pub struct BackgroundTrack {
    // The stream must outlive the sink or playback stops.
    _stream: OutputStream,
    sink: Sink,
}

/// Open and decode a track without touching the audio device.
fn decode(path: &Path) -> Result<Decoder<BufReader<File>>, MediaError> {
    let location = path.display().to_string();
    let file = File::open(path).map_err(|e| MediaError::unavailable(&location, e.to_string()))?;
    Decoder::new(BufReader::new(file)).map_err(|e| MediaError::unavailable(&location, e.to_string()))
}

impl BackgroundTrack {
    /// Start looping the track at `path` on the default output device.
    pub fn play(path: &Path) -> Result<Self, MediaError> {
        let source = decode(path)?;
        let location = path.display().to_string();

        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| MediaError::unavailable(&location, format!("no audio output: {}", e)))?;
        let sink = Sink::try_new(&handle)
            .map_err(|e| MediaError::unavailable(&location, format!("no audio output: {}", e)))?;

        sink.append(source.repeat_infinite());
        log::info!("Playing background track {}", location);
        Ok(Self {
            _stream: stream,
            sink,
        })
    }

    pub fn stop(self) {
        self.sink.stop();
        log::info!("Background track stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_track_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let result = BackgroundTrack::play(&dir.path().join("absent.mp3"));
        assert!(matches!(result, Err(MediaError::MediaResourceUnavailable { .. })));
    }

    #[test]
    fn test_undecodable_track_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("noise.mp3");
        std::fs::write(&path, b"definitely not audio").unwrap();
        assert!(matches!(
            decode(&path),
            Err(MediaError::MediaResourceUnavailable { .. })
        ));
    }
}
