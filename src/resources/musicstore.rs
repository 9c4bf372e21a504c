//! Music store resource.
//!
//! A non-send resource wrapping an [`AssetRegistry`] of [`Music`] streams.
//! Releasing a music entry moves the stream to
//! [`PlaybackState::Released`](crate::assets::audio::PlaybackState::Released).

use crate::assets::audio::Music;
use crate::assets::format::AudioFormat;
use crate::resources::assetregistry::{AssetError, AssetRegistry, LoadError};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Default)]
pub struct MusicStore {
    registry: AssetRegistry<Music>,
}

impl MusicStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_music_from_file(
        &mut self,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Result<(), AssetError> {
        let path = path.into();
        self.registry.register_loader(
            name,
            move || Music::from_file(&path).map_err(LoadError::from),
            Music::release,
        )
    }

    pub fn register_music_from_bytes(
        &mut self,
        name: impl Into<String>,
        data: impl Into<Rc<[u8]>>,
        format: AudioFormat,
    ) -> Result<(), AssetError> {
        let data: Rc<[u8]> = data.into();
        self.registry.register_loader(
            name,
            move || Music::from_bytes(&data[..], format).map_err(LoadError::from),
            Music::release,
        )
    }
}

impl Deref for MusicStore {
    type Target = AssetRegistry<Music>;

    fn deref(&self) -> &Self::Target {
        &self.registry
    }
}

impl DerefMut for MusicStore {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.registry
    }
}
