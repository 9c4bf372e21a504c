//! Position interpolation action.

use super::{Accessor, Action, seconds};
use glam::Vec2;

/// Moves a 2D position in a straight line toward `target` at `speed` units
/// per second.
///
/// The position is read from the accessor on the first call only; after that
/// the action extrapolates from its own cached position, so host reads and
/// rounding between frames do not perturb the motion.
pub struct MoveAction<A> {
    position: A,
    computed: Option<Vec2>,
    target: Vec2,
    speed: f32,
    end: bool,
}

impl<A: Accessor<Vec2>> MoveAction<A> {
    pub fn new(position: A, target: Vec2, speed: f32) -> Self {
        MoveAction {
            position,
            computed: None,
            target,
            speed,
            end: false,
        }
    }
}

impl<A: Accessor<Vec2>> Action for MoveAction<A> {
    fn execute(&mut self, elapsed_ms: u64) {
        if self.end {
            return;
        }
        let current = match self.computed {
            Some(pos) => pos,
            None => self.position.read(),
        };
        let step = self.speed.abs() * seconds(elapsed_ms) as f32;
        let offset = self.target - current;
        let next = if offset.length_squared() <= step * step {
            self.end = true;
            self.target
        } else {
            current + offset.normalize() * step
        };
        self.position.write(next);
        self.computed = Some(next);
    }

    fn is_end(&self) -> bool {
        self.end
    }
}
