//! Texture payload.
//!
//! A [`Texture`] holds the decoded RGBA pixels of an image. Uploading to the
//! GPU is the renderer's business; the registry only needs something it can
//! load, share and release.

use crate::assets::format::ImageFormat;
use image::RgbaImage;
use log::debug;
use std::cell::Cell;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("unsupported image format for '{0}' (only .png, .jpg, .jpeg and .gif are supported)")]
    UnsupportedFormat(PathBuf),
    #[error("failed to read image file '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {format} image: {source}")]
    Decode {
        format: ImageFormat,
        #[source]
        source: image::ImageError,
    },
}

/// Decoded image.
#[derive(Debug)]
pub struct Texture {
    source: String,
    format: ImageFormat,
    pixels: RgbaImage,
    released: Cell<bool>,
}

impl Texture {
    /// Load a texture from an image file; the format comes from the extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        debug!("texture creation from file {}", path.display());
        let format = ImageFormat::from_path(path)
            .ok_or_else(|| TextureError::UnsupportedFormat(path.to_path_buf()))?;
        let data = std::fs::read(path).map_err(|source| TextureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut texture = Self::from_bytes(data, format)?;
        texture.source = path.display().to_string();
        Ok(texture)
    }

    /// Decode a texture from encoded bytes.
    pub fn from_bytes(data: impl AsRef<[u8]>, format: ImageFormat) -> Result<Self, TextureError> {
        let pixels = image::load_from_memory_with_format(data.as_ref(), format.into())
            .map_err(|source| TextureError::Decode { format, source })?
            .into_rgba8();
        Ok(Texture {
            source: format!("{format} bytes"),
            format,
            pixels,
            released: Cell::new(false),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn is_released(&self) -> bool {
        self.released.get()
    }

    /// Mark the texture as released.
    pub fn release(&self) {
        if !self.released.replace(true) {
            debug!("texture destruction ({})", self.source);
        }
    }
}
