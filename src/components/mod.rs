//! ECS components for entities.
//!
//! Submodules overview:
//! - [`angle`] – angle in radians, animated by angle actions
//! - [`position`] – world-space position

pub mod angle;
pub mod position;
