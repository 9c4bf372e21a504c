//! Sound store resource.
//!
//! A non-send resource wrapping an [`AssetRegistry`] of [`Sound`] effects.

use crate::assets::audio::Sound;
use crate::assets::format::AudioFormat;
use crate::resources::assetregistry::{AssetError, AssetRegistry, LoadError};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Default)]
pub struct SoundStore {
    registry: AssetRegistry<Sound>,
}

impl SoundStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_sound_from_file(
        &mut self,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Result<(), AssetError> {
        let path = path.into();
        self.registry.register_loader(
            name,
            move || Sound::from_file(&path).map_err(LoadError::from),
            Sound::release,
        )
    }

    pub fn register_sound_from_bytes(
        &mut self,
        name: impl Into<String>,
        data: impl Into<Rc<[u8]>>,
        format: AudioFormat,
    ) -> Result<(), AssetError> {
        let data: Rc<[u8]> = data.into();
        self.registry.register_loader(
            name,
            move || Sound::from_bytes(&data[..], format).map_err(LoadError::from),
            Sound::release,
        )
    }
}

impl Deref for SoundStore {
    type Target = AssetRegistry<Sound>;

    fn deref(&self) -> &Self::Target {
        &self.registry
    }
}

impl DerefMut for SoundStore {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.registry
    }
}
