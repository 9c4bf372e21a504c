//! Sound and music payloads.
//!
//! Both keep the encoded stream in memory; decoding, mixing and output
//! belong to the audio backend. These types track what the stage asked for
//! (volume, plays, playback state) so the backend can pick it up.

use crate::assets::format::AudioFormat;
use log::debug;
use std::cell::Cell;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("unsupported audio format for '{0}' (only .ogg and .mp3 are supported)")]
    UnsupportedFormat(PathBuf),
    #[error("failed to read audio file '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("'{0}' is an empty stream")]
    Empty(String),
}

/// Playback state of a [`Music`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    Paused,
    Stopped,
    Released,
}

fn read_stream(path: &Path) -> Result<(Vec<u8>, AudioFormat), AudioError> {
    let format = AudioFormat::from_path(path)
        .ok_or_else(|| AudioError::UnsupportedFormat(path.to_path_buf()))?;
    let data = std::fs::read(path).map_err(|source| AudioError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((data, format))
}

/// Clamp a 0..=100 volume to the 0.0..=1.0 range.
fn volume_ratio(volume: u32) -> f32 {
    volume.min(100) as f32 / 100.0
}

/// Short sound effect, replayable any number of times.
#[derive(Debug)]
pub struct Sound {
    source: String,
    format: AudioFormat,
    data: Vec<u8>,
    volume: Cell<f32>,
    plays: Cell<u32>,
    released: Cell<bool>,
}

impl Sound {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AudioError> {
        let path = path.as_ref();
        debug!("sound creation from file {}", path.display());
        let (data, format) = read_stream(path)?;
        Self::build(path.display().to_string(), data, format)
    }

    pub fn from_bytes(data: impl Into<Vec<u8>>, format: AudioFormat) -> Result<Self, AudioError> {
        Self::build(format!("{format} bytes"), data.into(), format)
    }

    fn build(source: String, data: Vec<u8>, format: AudioFormat) -> Result<Self, AudioError> {
        if data.is_empty() {
            return Err(AudioError::Empty(source));
        }
        Ok(Sound {
            source,
            format,
            data,
            volume: Cell::new(1.0),
            plays: Cell::new(0),
            released: Cell::new(false),
        })
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Queue one play. Does nothing once released.
    pub fn play(&self) {
        if self.released.get() {
            return;
        }
        debug!("play sound {}", self.source);
        self.plays.set(self.plays.get() + 1);
    }

    pub fn plays(&self) -> u32 {
        self.plays.get()
    }

    /// Set the volume, in percent.
    pub fn set_volume(&self, volume: u32) {
        self.volume.set(volume_ratio(volume));
    }

    pub fn volume(&self) -> f32 {
        self.volume.get()
    }

    pub fn is_released(&self) -> bool {
        self.released.get()
    }

    pub fn release(&self) {
        if !self.released.replace(true) {
            debug!("sound destruction ({})", self.source);
        }
    }
}

/// Looping background music.
#[derive(Debug)]
pub struct Music {
    source: String,
    format: AudioFormat,
    data: Vec<u8>,
    volume: Cell<f32>,
    state: Cell<PlaybackState>,
}

impl Music {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AudioError> {
        let path = path.as_ref();
        debug!("music creation from file {}", path.display());
        let (data, format) = read_stream(path)?;
        Self::build(path.display().to_string(), data, format)
    }

    pub fn from_bytes(data: impl Into<Vec<u8>>, format: AudioFormat) -> Result<Self, AudioError> {
        Self::build(format!("{format} bytes"), data.into(), format)
    }

    fn build(source: String, data: Vec<u8>, format: AudioFormat) -> Result<Self, AudioError> {
        if data.is_empty() {
            return Err(AudioError::Empty(source));
        }
        Ok(Music {
            source,
            format,
            data,
            volume: Cell::new(1.0),
            state: Cell::new(PlaybackState::Paused),
        })
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn state(&self) -> PlaybackState {
        self.state.get()
    }

    pub fn play(&self) {
        self.transition(PlaybackState::Playing);
    }

    pub fn pause(&self) {
        self.transition(PlaybackState::Paused);
    }

    /// Pause and rewind to the beginning.
    pub fn stop(&self) {
        self.transition(PlaybackState::Stopped);
    }

    pub fn set_volume(&self, volume: u32) {
        self.volume.set(volume_ratio(volume));
    }

    pub fn volume(&self) -> f32 {
        self.volume.get()
    }

    pub fn release(&self) {
        if self.state.replace(PlaybackState::Released) != PlaybackState::Released {
            debug!("music destruction ({})", self.source);
        }
    }

    // A released stream stays released
    fn transition(&self, next: PlaybackState) {
        if self.state.get() != PlaybackState::Released {
            self.state.set(next);
        }
    }
}
