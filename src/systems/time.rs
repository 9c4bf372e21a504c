//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, applying `time_scale` to the provided delta.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Update elapsed and delta milliseconds on the `WorldTime` resource.
///
/// `dt_ms` is the unscaled frame delta in milliseconds. The scaled delta is
/// rounded to the nearest millisecond.
pub fn update_world_time(world: &mut World, dt_ms: u64) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = (dt_ms as f64 * wt.time_scale as f64).round() as u64;
    wt.elapsed_ms += scaled_dt;
    wt.delta_ms = scaled_dt;
    wt.real_delta_ms = dt_ms;
    wt.frame_count += 1;
}
