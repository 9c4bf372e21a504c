//! Texture store resource.
//!
//! A non-send resource wrapping an [`AssetRegistry`] of [`Texture`]s. It
//! dereferences to the registry, so `get`, `release_all`, `mask_obsolete` and
//! the rest are available directly; the `register_texture_*` helpers bind the
//! texture loaders.
//!
//! Note: This is a non-send resource because registries share payloads
//! through `Rc`. Insert with `insert_non_send_resource` and access via
//! `NonSend<TextureStore>` / `NonSendMut<TextureStore>`.

use crate::assets::format::ImageFormat;
use crate::assets::texture::Texture;
use crate::resources::assetregistry::{AssetError, AssetRegistry, LoadError};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Default)]
pub struct TextureStore {
    registry: AssetRegistry<Texture>,
}

impl TextureStore {
    /// Create an empty texture store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture loaded lazily from an image file.
    pub fn register_texture_from_file(
        &mut self,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Result<(), AssetError> {
        let path = path.into();
        self.registry.register_loader(
            name,
            move || Texture::from_file(&path).map_err(LoadError::from),
            Texture::release,
        )
    }

    /// Register a texture decoded lazily from in-memory bytes.
    pub fn register_texture_from_bytes(
        &mut self,
        name: impl Into<String>,
        data: impl Into<Rc<[u8]>>,
        format: ImageFormat,
    ) -> Result<(), AssetError> {
        let data: Rc<[u8]> = data.into();
        self.registry.register_loader(
            name,
            move || Texture::from_bytes(&data[..], format).map_err(LoadError::from),
            Texture::release,
        )
    }
}

impl Deref for TextureStore {
    type Target = AssetRegistry<Texture>;

    fn deref(&self) -> &Self::Target {
        &self.registry
    }
}

impl DerefMut for TextureStore {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.registry
    }
}
