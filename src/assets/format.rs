//! Supported asset file formats.
//!
//! Formats are detected from the file extension, case-insensitively. Image
//! extensions go through the `image` crate's own mapping.

use std::fmt;
use std::path::Path;

/// Image container formats usable for textures and bitmap fonts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
}

impl ImageFormat {
    /// Detect the format from a path extension (`.png`, `.jpg`, `.jpeg`, `.gif`).
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        match image::ImageFormat::from_path(path).ok()? {
            image::ImageFormat::Png => Some(ImageFormat::Png),
            image::ImageFormat::Jpeg => Some(ImageFormat::Jpeg),
            image::ImageFormat::Gif => Some(ImageFormat::Gif),
            _ => None,
        }
    }
}

impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Gif => image::ImageFormat::Gif,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ext = match self {
            ImageFormat::Png => ".png",
            ImageFormat::Jpeg => ".jpeg",
            ImageFormat::Gif => ".gif",
        };
        f.write_str(ext)
    }
}

/// Audio container formats usable for sounds and music.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Ogg,
    Mp3,
}

impl AudioFormat {
    /// Detect the format from a path extension (`.ogg`, `.mp3`).
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        match extension_of(path.as_ref())?.as_str() {
            "ogg" => Some(AudioFormat::Ogg),
            "mp3" => Some(AudioFormat::Mp3),
            _ => None,
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ext = match self {
            AudioFormat::Ogg => ".ogg",
            AudioFormat::Mp3 => ".mp3",
        };
        f.write_str(ext)
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.trim().to_ascii_lowercase())
}
