//! Asset manifest.
//!
//! A JSON file listing the textures, fonts, sounds and music a stage uses.
//! Paths are relative to the manifest's directory.
//!
//! ```json
//! {
//!   "textures": [{ "name": "brique", "path": "images/brique.png" }],
//!   "fonts": [{ "name": "bitmap-test", "path": "fonts/bitmap-test.png",
//!               "char_width": 16, "char_height": 28 }],
//!   "sounds": [{ "name": "jump", "path": "sounds/jump.ogg" }],
//!   "music": [{ "name": "theme", "path": "music/theme.mp3" }]
//! }
//! ```
//!
//! Applying a manifest is a hot reload: every entry of a store is marked
//! obsolete, the listed assets are registered again (which clears their flag
//! and drops the loaded payload), and whatever is still obsolete afterwards
//! is unregistered. Payloads reload lazily on the next `get`.

use crate::resources::assetregistry::AssetError;
use crate::resources::fontstore::FontStore;
use crate::resources::musicstore::MusicStore;
use crate::resources::soundstore::SoundStore;
use crate::resources::texturestore::TextureStore;
use bevy_ecs::prelude::*;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read asset manifest '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse asset manifest: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to register manifest asset: {0}")]
    Registration(#[from] AssetError),
    #[error("{0} is missing from the world")]
    MissingStore(&'static str),
}

/// A named asset file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AssetEntry {
    pub name: String,
    pub path: PathBuf,
}

/// A bitmap font image and its character cell size.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FontEntry {
    pub name: String,
    pub path: PathBuf,
    pub char_width: u32,
    pub char_height: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AssetManifest {
    #[serde(default)]
    pub textures: Vec<AssetEntry>,
    #[serde(default)]
    pub fonts: Vec<FontEntry>,
    #[serde(default)]
    pub sounds: Vec<AssetEntry>,
    #[serde(default)]
    pub music: Vec<AssetEntry>,
    /// Directory relative paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl AssetManifest {
    /// Load a manifest from a JSON file. Paths resolve against its directory.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::from_json(&content, base_dir)
    }

    pub fn from_json(json: &str, base_dir: impl Into<PathBuf>) -> Result<Self, ManifestError> {
        let mut manifest: AssetManifest = serde_json::from_str(json)?;
        manifest.base_dir = base_dir.into();
        Ok(manifest)
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.base_dir.join(path)
    }

    /// Apply the manifest to the four stores held by `world`.
    pub fn apply(&self, world: &mut World) -> Result<(), ManifestError> {
        {
            let mut store = world
                .get_non_send_resource_mut::<TextureStore>()
                .ok_or(ManifestError::MissingStore("TextureStore"))?;
            self.apply_textures(&mut store)?;
        }
        {
            let mut store = world
                .get_non_send_resource_mut::<FontStore>()
                .ok_or(ManifestError::MissingStore("FontStore"))?;
            self.apply_fonts(&mut store)?;
        }
        {
            let mut store = world
                .get_non_send_resource_mut::<SoundStore>()
                .ok_or(ManifestError::MissingStore("SoundStore"))?;
            self.apply_sounds(&mut store)?;
        }
        let mut store = world
            .get_non_send_resource_mut::<MusicStore>()
            .ok_or(ManifestError::MissingStore("MusicStore"))?;
        self.apply_music(&mut store)?;

        info!(
            "Applied asset manifest: {} textures, {} fonts, {} sounds, {} music",
            self.textures.len(),
            self.fonts.len(),
            self.sounds.len(),
            self.music.len()
        );
        Ok(())
    }

    pub fn apply_textures(&self, store: &mut TextureStore) -> Result<(), AssetError> {
        store.mask_all_obsolete();
        for entry in &self.textures {
            store.register_texture_from_file(entry.name.clone(), self.resolve(&entry.path))?;
        }
        store.unregister_all_obsolete();
        Ok(())
    }

    pub fn apply_fonts(&self, store: &mut FontStore) -> Result<(), AssetError> {
        store.mask_all_obsolete();
        for entry in &self.fonts {
            store.register_font_from_image_file(
                entry.name.clone(),
                self.resolve(&entry.path),
                entry.char_width,
                entry.char_height,
            )?;
        }
        store.unregister_all_obsolete();
        Ok(())
    }

    pub fn apply_sounds(&self, store: &mut SoundStore) -> Result<(), AssetError> {
        store.mask_all_obsolete();
        for entry in &self.sounds {
            store.register_sound_from_file(entry.name.clone(), self.resolve(&entry.path))?;
        }
        store.unregister_all_obsolete();
        Ok(())
    }

    pub fn apply_music(&self, store: &mut MusicStore) -> Result<(), AssetError> {
        store.mask_all_obsolete();
        for entry in &self.music {
            store.register_music_from_file(entry.name.clone(), self.resolve(&entry.path))?;
        }
        store.unregister_all_obsolete();
        Ok(())
    }
}
