//! Live action set.
//!
//! The engine holds every running [`Action`] and advances them once per
//! frame through [`update_actions`](crate::systems::actions::update_actions).
//! Finished actions are dropped after all of them were visited for the frame.
//!
//! Actions cannot reach the engine while it executes them. To start new work
//! from inside an action (an [`ExecuteAction`](crate::actions::ExecuteAction)
//! that kicks off another sequence, say), capture an [`ActionSpawner`] from
//! [`ActionEngine::spawner`]: spawned actions join the live set at the end
//! of the current frame.

use crate::actions::Action;
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

type Queue = Rc<RefCell<Vec<Box<dyn Action>>>>;

/// Non-send resource holding the running actions.
#[derive(Default)]
pub struct ActionEngine {
    actions: Vec<Box<dyn Action>>,
    queue: Queue,
}

impl ActionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action to the live set. No de-duplication.
    pub fn add(&mut self, action: impl Action + 'static) {
        self.actions.push(Box::new(action));
    }

    pub fn add_boxed(&mut self, action: Box<dyn Action>) {
        self.actions.push(action);
    }

    /// Drop every action, including those queued through a spawner.
    pub fn clear(&mut self) {
        debug!("clearing {} actions", self.actions.len());
        self.actions.clear();
        self.queue.borrow_mut().clear();
    }

    /// Execute every held action once, in order, then prune the finished ones.
    pub fn execute(&mut self, elapsed_ms: u64) {
        for action in self.actions.iter_mut() {
            action.execute(elapsed_ms);
        }
        self.actions.retain(|action| !action.is_end());
        self.actions.append(&mut self.queue.borrow_mut());
    }

    /// Handle for queueing actions from inside running actions.
    pub fn spawner(&self) -> ActionSpawner {
        ActionSpawner {
            queue: Rc::clone(&self.queue),
        }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Cloneable handle queueing actions into an [`ActionEngine`].
#[derive(Clone)]
pub struct ActionSpawner {
    queue: Queue,
}

impl ActionSpawner {
    pub fn spawn(&self, action: impl Action + 'static) {
        self.spawn_boxed(Box::new(action));
    }

    pub fn spawn_boxed(&self, action: Box<dyn Action>) {
        self.queue.borrow_mut().push(action);
    }
}
