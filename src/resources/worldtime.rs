use bevy_ecs::prelude::Resource;

/// Simulation time, in milliseconds.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Scaled time since the application started.
    pub elapsed_ms: u64,
    /// Scaled time step of the current frame.
    pub delta_ms: u64,
    /// Unscaled time step of the current frame.
    pub real_delta_ms: u64,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed_ms: 0,
            delta_ms: 0,
            real_delta_ms: 0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale.max(0.0);
        self
    }

    pub fn delta_seconds(&self) -> f32 {
        self.delta_ms as f32 / 1000.0
    }
}
