//! Action update system.
use bevy_ecs::prelude::*;

use crate::resources::actionengine::ActionEngine;
use crate::resources::worldtime::WorldTime;

/// Advance every live action by the scaled frame delta.
pub fn update_actions(world_time: Res<WorldTime>, mut engine: NonSendMut<ActionEngine>) {
    engine.execute(world_time.delta_ms);
}
