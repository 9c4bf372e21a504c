//! Stage lifecycle.
//!
//! A [`Stage`] is the scene the [`Application`](crate::app::Application)
//! drives. Every frame the application calls, in order:
//!
//! 1. [`Stage::execute`] (skipped while paused)
//! 2. the update schedule (actions, FPS counter)
//! 3. [`Stage::display`]
//! 4. [`Stage::process_event`] once per queued event
//!
//! [`Stage::initialize`] runs when the application launches (or when the
//! stage is swapped in while running) and [`Stage::release`] when it stops
//! (or the stage is swapped out). All hooks receive the ECS [`World`], which
//! holds the configuration, time, asset stores and action engine.

use crate::events::StageEvent;
use crate::resources::appstate::AppState;
use crate::resources::assetmanifest::ManifestError;
use crate::resources::assetregistry::AssetError;
use bevy_ecs::prelude::*;
use log::info;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StageError {
    #[error("stage asset error: {0}")]
    Asset(#[from] AssetError),
    #[error("stage manifest error: {0}")]
    Manifest(#[from] ManifestError),
    #[error("{0}")]
    Message(String),
}

pub trait Stage {
    fn initialize(&mut self, _world: &mut World) -> Result<(), StageError> {
        Ok(())
    }

    fn release(&mut self, _world: &mut World) {}

    /// Advance the stage logic by one frame.
    fn execute(&mut self, _world: &mut World) {}

    /// Draw the stage.
    fn display(&mut self, _world: &mut World) {}

    /// React to an input or window event. By default, closing the window
    /// stops the application.
    fn process_event(&mut self, world: &mut World, event: &StageEvent) {
        if event.is_close_request() {
            info!("window close requested, stopping");
            world.resource_mut::<AppState>().stop();
        }
    }
}

/// Stage that does nothing but stop on window close.
#[derive(Debug, Default)]
pub struct EmptyStage;

impl Stage for EmptyStage {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Key, WindowEvent};

    #[test]
    fn test_empty_stage_stops_on_close() {
        let mut world = World::new();
        world.insert_resource(AppState::default());
        let mut stage = EmptyStage;

        stage.process_event(&mut world, &StageEvent::key_pressed(Key::Escape));
        assert!(!world.resource::<AppState>().stopped);

        stage.process_event(&mut world, &StageEvent::Window(WindowEvent::Closed));
        assert!(world.resource::<AppState>().stopped);
    }
}
