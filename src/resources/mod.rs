//! ECS resources made available to stages and systems.
//!
//! This module groups the long-lived data injected into the ECS world by the
//! [`Application`](crate::app::Application): timing, configuration, the
//! action engine and the asset stores. Each submodule documents the
//! semantics and intended usage of its resource(s).
//!
//! Overview
//! - `actionengine` – live set of timed actions (non-send)
//! - `appstate` – launched / stopped / paused flags
//! - `assetmanifest` – JSON list of assets, applied as a hot reload
//! - `assetregistry` – generic lazily loading registry behind every store
//! - `fontstore`, `musicstore`, `soundstore`, `texturestore` – typed
//!   registries (non-send)
//! - `fpscounter` – frames-per-second over the last ten seconds
//! - `frameclock` – wall-clock frame step source
//! - `gameconfig` – INI configuration
//! - `worldtime` – simulation time and delta
pub mod actionengine;
pub mod appstate;
pub mod assetmanifest;
pub mod assetregistry;
pub mod fontstore;
pub mod fpscounter;
pub mod frameclock;
pub mod gameconfig;
pub mod musicstore;
pub mod soundstore;
pub mod texturestore;
pub mod worldtime;
