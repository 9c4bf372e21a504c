//! Asset payload types.
//!
//! These are the values held by the typed registries in
//! [`crate::resources`]:
//! - `audio` – [`Sound`](audio::Sound) and [`Music`](audio::Music)
//! - `font` – [`BitmapFont`](font::BitmapFont) cut from a texture
//! - `format` – image and audio format detection
//! - `texture` – [`Texture`](texture::Texture) decoded to RGBA pixels
pub mod audio;
pub mod font;
pub mod format;
pub mod texture;
