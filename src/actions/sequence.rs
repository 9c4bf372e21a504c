use super::Action;
use smallvec::SmallVec;

/// Runs actions one after the other.
///
/// Only the current action is executed. When it finishes during a call, the
/// next one starts in that same call with the same time step, so a chain of
/// instant actions completes within a single frame.
#[derive(Default)]
pub struct SequenceAction {
    actions: SmallVec<[Box<dyn Action>; 4]>,
    index: usize,
}

impl SequenceAction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action. Actions that already ended are ignored.
    ///
    /// A sequence is only ended while it has nothing left to run, so adding
    /// to a finished sequence resumes it at the new action.
    pub fn add(&mut self, action: impl Action + 'static) {
        self.add_boxed(Box::new(action));
    }

    pub fn add_boxed(&mut self, action: Box<dyn Action>) {
        if !action.is_end() {
            self.actions.push(action);
        }
    }

    /// Builder form of [`add`](Self::add).
    pub fn with(mut self, action: impl Action + 'static) -> Self {
        self.add(action);
        self
    }

    pub fn clear(&mut self) {
        self.actions.clear();
        self.index = 0;
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Action for SequenceAction {
    fn execute(&mut self, elapsed_ms: u64) {
        while let Some(current) = self.actions.get_mut(self.index) {
            if !current.is_end() {
                current.execute(elapsed_ms);
                if !current.is_end() {
                    return;
                }
            }
            self.index += 1;
        }
    }

    fn is_end(&self) -> bool {
        self.index >= self.actions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{ExecuteAction, WaitAction};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn test_wait_then_execute_in_one_call() {
        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        let mut sequence = SequenceAction::new()
            .with(WaitAction::new(100))
            .with(ExecuteAction::new(move || c.set(c.get() + 1)));

        sequence.execute(150);
        assert_eq!(calls.get(), 1);
        assert!(sequence.is_end());
    }

    #[test]
    fn test_stops_at_running_action() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (a, b) = (Rc::clone(&log), Rc::clone(&log));
        let mut sequence = SequenceAction::new()
            .with(ExecuteAction::new(move || a.borrow_mut().push("first")))
            .with(WaitAction::new(100))
            .with(ExecuteAction::new(move || b.borrow_mut().push("second")));

        sequence.execute(40);
        assert_eq!(*log.borrow(), vec!["first"]);
        assert!(!sequence.is_end());

        sequence.execute(40);
        assert_eq!(log.borrow().len(), 1);

        sequence.execute(40);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
        assert!(sequence.is_end());
    }

    #[test]
    fn test_add_ignores_ended_actions() {
        let mut sequence = SequenceAction::new();
        sequence.add(WaitAction::new(0));
        assert!(sequence.is_empty());
        assert!(sequence.is_end());

        sequence.add(WaitAction::new(5));
        assert_eq!(sequence.len(), 1);
    }

    #[test]
    fn test_many_instant_actions_complete_in_one_call() {
        let calls = Rc::new(Cell::new(0));
        let mut sequence = SequenceAction::new();
        for _ in 0..10_000 {
            let c = Rc::clone(&calls);
            sequence.add(ExecuteAction::new(move || c.set(c.get() + 1)));
        }
        sequence.execute(1);
        assert_eq!(calls.get(), 10_000);
        assert!(sequence.is_end());
    }

    #[test]
    fn test_add_after_end_resumes_at_new_action() {
        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        let mut sequence = SequenceAction::new().with(WaitAction::new(10));
        sequence.execute(10);
        assert!(sequence.is_end());

        sequence.add(ExecuteAction::new(move || c.set(c.get() + 1)));
        assert!(!sequence.is_end());
        sequence.execute(0);
        assert_eq!(calls.get(), 1);
        assert!(sequence.is_end());
    }

    #[test]
    fn test_clear_resets() {
        let mut sequence = SequenceAction::new().with(WaitAction::new(10));
        sequence.execute(10);
        assert!(sequence.is_end());
        sequence.clear();
        sequence.add(WaitAction::new(10));
        assert!(!sequence.is_end());
    }
}
