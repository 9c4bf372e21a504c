//! Font store resource.
//!
//! A non-send resource wrapping an [`AssetRegistry`] of [`BitmapFont`]s,
//! keyed by string IDs. Fonts are registered during stage setup and fetched
//! by name when text is drawn.
//!
//! Note: This is a non-send resource because registries share payloads
//! through `Rc`.

use crate::assets::font::BitmapFont;
use crate::assets::format::ImageFormat;
use crate::resources::assetregistry::{AssetError, AssetRegistry, LoadError};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::rc::Rc;

/// Registry of bitmap fonts.
///
/// This is a non-send resource; use `NonSend<FontStore>` in system parameters.
// NonSend resource: insert with insert_non_send_resource and access via NonSend/NonSendMut
#[derive(Default)]
pub struct FontStore {
    registry: AssetRegistry<BitmapFont>,
}

impl FontStore {
    /// Create an empty font store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bitmap font loaded lazily from an image file.
    pub fn register_font_from_image_file(
        &mut self,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        char_width: u32,
        char_height: u32,
    ) -> Result<(), AssetError> {
        let path = path.into();
        self.registry.register_loader(
            name,
            move || {
                BitmapFont::from_file(&path, char_width, char_height).map_err(LoadError::from)
            },
            BitmapFont::release,
        )
    }

    /// Register a bitmap font decoded lazily from in-memory image bytes.
    pub fn register_font_from_bytes(
        &mut self,
        name: impl Into<String>,
        data: impl Into<Rc<[u8]>>,
        format: ImageFormat,
        char_width: u32,
        char_height: u32,
    ) -> Result<(), AssetError> {
        let data: Rc<[u8]> = data.into();
        self.registry.register_loader(
            name,
            move || {
                BitmapFont::from_bytes(&data[..], format, char_width, char_height)
                    .map_err(LoadError::from)
            },
            BitmapFont::release,
        )
    }
}

impl Deref for FontStore {
    type Target = AssetRegistry<BitmapFont>;

    fn deref(&self) -> &Self::Target {
        &self.registry
    }
}

impl DerefMut for FontStore {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.registry
    }
}
