//! FPS counter update system.
use bevy_ecs::prelude::*;

use crate::resources::fpscounter::FpsCounter;
use crate::resources::worldtime::WorldTime;

/// Count the current frame with its unscaled time step.
pub fn update_fps_counter(world_time: Res<WorldTime>, mut counter: ResMut<FpsCounter>) {
    counter.increment(world_time.real_delta_ms);
}
