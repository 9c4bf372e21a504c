//! Frames-per-second counter.
//!
//! Frames are accumulated into a ring of one-second measures. The rate is
//! averaged over the whole ring, so it reflects roughly the last ten
//! seconds.

use bevy_ecs::prelude::Resource;

const MEASURES: usize = 10;
const MEASURE_SPAN_MS: u64 = 1000;

#[derive(Clone, Copy, Debug, Default)]
struct Measure {
    elapsed_ms: u64,
    frames: u64,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct FpsCounter {
    measures: [Measure; MEASURES],
    current: usize,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one frame that took `elapsed_ms` milliseconds.
    ///
    /// Once the current measure spans a full second the counter moves to the
    /// next slot of the ring and clears it.
    pub fn increment(&mut self, elapsed_ms: u64) {
        let measure = &mut self.measures[self.current];
        measure.frames += 1;
        measure.elapsed_ms += elapsed_ms;
        if measure.elapsed_ms >= MEASURE_SPAN_MS {
            self.current = (self.current + 1) % MEASURES;
            self.measures[self.current] = Measure::default();
        }
    }

    /// Average frame rate over the ring, or 0 when no time was measured.
    pub fn fps(&self) -> f32 {
        let (elapsed_ms, frames) = self
            .measures
            .iter()
            .fold((0, 0), |(e, f), m| (e + m.elapsed_ms, f + m.frames));
        if elapsed_ms == 0 {
            0.0
        } else {
            (frames * 1000) as f32 / elapsed_ms as f32
        }
    }
}
