//! Timed actions.
//!
//! An [`Action`] is a unit of per-frame work driven by the elapsed time, in
//! milliseconds, since the previous frame. It runs until [`Action::is_end`]
//! reports true; the terminal state is absorbing and further calls to
//! [`Action::execute`] do nothing.
//!
//! Variants:
//! - [`AngleAction`] – turn an angle toward a target at a fixed speed
//! - [`MoveAction`] – move a 2D position toward a target at a fixed speed
//! - [`ExecuteAction`] – call a function once
//! - [`WaitAction`] – wait for a duration
//! - [`SequenceAction`] – run actions one after the other
//!
//! Actions never own the state they animate. [`AngleAction`] and
//! [`MoveAction`] read and write it through an [`Accessor`], either a
//! getter/setter pair built with [`accessor`] or a shared `Rc<Cell<_>>`.
//!
//! Live actions are held and advanced by
//! [`ActionEngine`](crate::resources::actionengine::ActionEngine).

pub mod angle;
pub mod execute;
pub mod movement;
pub mod sequence;
pub mod wait;

pub use angle::AngleAction;
pub use execute::ExecuteAction;
pub use movement::MoveAction;
pub use sequence::SequenceAction;
pub use wait::WaitAction;

use std::cell::Cell;
use std::rc::Rc;

/// Unit of timed work.
pub trait Action {
    /// Advance by `elapsed_ms` milliseconds.
    fn execute(&mut self, elapsed_ms: u64);

    fn is_end(&self) -> bool;
}

impl<A: Action + ?Sized> Action for Box<A> {
    fn execute(&mut self, elapsed_ms: u64) {
        (**self).execute(elapsed_ms);
    }

    fn is_end(&self) -> bool {
        (**self).is_end()
    }
}

/// Read/write access to host-owned state.
pub trait Accessor<V> {
    fn read(&self) -> V;

    fn write(&mut self, value: V);
}

/// Getter/setter closure pair.
pub struct FnAccessor<G, S> {
    getter: G,
    setter: S,
}

/// Build an [`Accessor`] from a getter and a setter.
pub fn accessor<V, G, S>(getter: G, setter: S) -> FnAccessor<G, S>
where
    G: Fn() -> V,
    S: FnMut(V),
{
    FnAccessor { getter, setter }
}

impl<V, G, S> Accessor<V> for FnAccessor<G, S>
where
    G: Fn() -> V,
    S: FnMut(V),
{
    fn read(&self) -> V {
        (self.getter)()
    }

    fn write(&mut self, value: V) {
        (self.setter)(value)
    }
}

impl<V: Copy> Accessor<V> for Rc<Cell<V>> {
    fn read(&self) -> V {
        Cell::get(self)
    }

    fn write(&mut self, value: V) {
        Cell::set(self, value)
    }
}

/// Seconds in `elapsed_ms` milliseconds.
pub(crate) fn seconds(elapsed_ms: u64) -> f64 {
    elapsed_ms as f64 / 1000.0
}
