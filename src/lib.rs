//! stageworks library.
//!
//! A small headless stage engine: lazily loaded, hot-reloadable asset
//! registries and a timed action system, driven by a per-frame stage
//! lifecycle over a `bevy_ecs` world.

pub mod actions;
pub mod app;
pub mod assets;
pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod stage;
pub mod systems;
