//! Engine systems.
//!
//! Per-frame systems run by the application's update schedule, plus the
//! world time update called directly before it.
//!
//! Submodules overview
//! - [`actions`] – advance the live actions by the frame step
//! - [`appstate`] – run conditions on the application state
//! - [`fps`] – count frames in the FPS counter
//! - [`time`] – update simulation time and delta

pub mod actions;
pub mod appstate;
pub mod fps;
pub mod time;
