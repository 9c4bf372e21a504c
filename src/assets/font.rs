//! Bitmap font payload.
//!
//! A [`BitmapFont`] is a texture cut into fixed-size character cells laid out
//! row by row in [`DEFAULT_CHARACTERS_ORDER`].

use crate::assets::format::ImageFormat;
use crate::assets::texture::{Texture, TextureError};
use glam::Vec2;
use log::debug;
use std::path::Path;
use thiserror::Error;

/// Character order of the bundled bitmap fonts.
pub const DEFAULT_CHARACTERS_ORDER: &str = " !\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~ CüéâäàaçêëèïîìAAEaAôöòùÿOUo£0xfaiouñN  ?r 11!\"\"";

#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to create bitmap font texture")]
    Texture(#[from] TextureError),
    #[error("invalid character cell {width}x{height}")]
    InvalidCell { width: u32, height: u32 },
}

/// Glyph cell inside the font texture, in pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GlyphRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug)]
pub struct BitmapFont {
    texture: Texture,
    char_width: u32,
    char_height: u32,
    characters: Vec<char>,
}

impl BitmapFont {
    pub fn from_file(
        path: impl AsRef<Path>,
        char_width: u32,
        char_height: u32,
    ) -> Result<Self, FontError> {
        debug!("font texture creation from file {}", path.as_ref().display());
        Self::from_texture(Texture::from_file(path)?, char_width, char_height)
    }

    pub fn from_bytes(
        data: impl AsRef<[u8]>,
        format: ImageFormat,
        char_width: u32,
        char_height: u32,
    ) -> Result<Self, FontError> {
        debug!("font texture creation from byte array");
        Self::from_texture(Texture::from_bytes(data, format)?, char_width, char_height)
    }

    pub fn from_texture(
        texture: Texture,
        char_width: u32,
        char_height: u32,
    ) -> Result<Self, FontError> {
        if char_width == 0
            || char_height == 0
            || char_width > texture.width()
            || char_height > texture.height()
        {
            return Err(FontError::InvalidCell {
                width: char_width,
                height: char_height,
            });
        }
        Ok(BitmapFont {
            texture,
            char_width,
            char_height,
            characters: DEFAULT_CHARACTERS_ORDER.chars().collect(),
        })
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn character_width(&self) -> u32 {
        self.char_width
    }

    pub fn character_height(&self) -> u32 {
        self.char_height
    }

    /// Top-left corner of the cell holding `character`.
    pub fn character_position(&self, character: char) -> Vec2 {
        let index = self.index_of(character);
        let columns = self.columns();
        Vec2::new(
            ((index % columns) * self.char_width) as f32,
            ((index / columns) * self.char_height) as f32,
        )
    }

    pub fn character_rectangle(&self, character: char) -> GlyphRect {
        let position = self.character_position(character);
        GlyphRect {
            x: position.x,
            y: position.y,
            width: self.char_width as f32,
            height: self.char_height as f32,
        }
    }

    /// Width in pixels of `text` rendered on a single line.
    pub fn text_width(&self, text: &str) -> u32 {
        text.chars().count() as u32 * self.char_width
    }

    pub fn release(&self) {
        debug!("font texture destruction");
        self.texture.release();
    }

    fn columns(&self) -> u32 {
        (self.texture.width() / self.char_width).max(1)
    }

    // Unknown characters fall back to the first cell
    fn index_of(&self, character: char) -> u32 {
        self.characters
            .iter()
            .position(|&c| c == character)
            .unwrap_or(0) as u32
    }
}
