//! Wall-clock frame timer.
//!
//! [`FrameClock`] measures the real time between two frames in whole
//! milliseconds. The application feeds the measured step into
//! [`update_world_time`](crate::systems::time::update_world_time).

use bevy_ecs::prelude::Resource;
use std::time::Instant;

#[derive(Resource, Debug, Clone, Copy)]
pub struct FrameClock {
    start: Instant,
    current_ms: u64,
    previous_ms: u64,
    elapsed_ms: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Start a clock at the current instant with a zero step.
    pub fn new() -> Self {
        FrameClock {
            start: Instant::now(),
            current_ms: 0,
            previous_ms: 0,
            elapsed_ms: 0,
        }
    }

    /// Sample the wall clock and return the step since the previous tick.
    pub fn tick(&mut self) -> u64 {
        let now = self.start.elapsed().as_millis() as u64;
        self.advance_to(now)
    }

    /// Move the clock to `now_ms` (milliseconds since start). Time never
    /// runs backwards: an earlier sample yields a zero step.
    pub fn advance_to(&mut self, now_ms: u64) -> u64 {
        self.previous_ms = self.current_ms;
        self.current_ms = now_ms.max(self.current_ms);
        self.elapsed_ms = self.current_ms - self.previous_ms;
        self.elapsed_ms
    }

    pub fn current_ms(&self) -> u64 {
        self.current_ms
    }

    pub fn previous_ms(&self) -> u64 {
        self.previous_ms
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }
}
