//! Angle interpolation action.

use super::{Accessor, Action, seconds};
use crate::components::angle::Angle;

/// Turns an angle toward `target` at `speed` radians per second.
///
/// Each call moves the angle by `speed * elapsed`. Once the remaining
/// distance fits within one step the angle snaps to `target` and the action
/// ends, so it never overshoots.
pub struct AngleAction<A> {
    angle: A,
    target: Angle,
    speed: Angle,
    end: bool,
}

impl<A: Accessor<Angle>> AngleAction<A> {
    pub fn new(angle: A, target: Angle, speed: Angle) -> Self {
        AngleAction {
            angle,
            target,
            speed,
            end: false,
        }
    }
}

impl<A: Accessor<Angle>> Action for AngleAction<A> {
    fn execute(&mut self, elapsed_ms: u64) {
        if self.end {
            return;
        }
        let step = self.speed.radians().abs() * seconds(elapsed_ms);
        let current = self.angle.read().radians();
        let remaining = self.target.radians() - current;
        let next = if remaining.abs() <= step {
            self.end = true;
            self.target
        } else {
            Angle::from_radians(current + step.copysign(remaining))
        };
        self.angle.write(next);
    }

    fn is_end(&self) -> bool {
        self.end
    }
}
