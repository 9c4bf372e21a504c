use super::Action;

/// Calls a function once, on its first execution, then ends.
pub struct ExecuteAction<F> {
    function: Option<F>,
}

impl<F: FnOnce()> ExecuteAction<F> {
    pub fn new(function: F) -> Self {
        ExecuteAction {
            function: Some(function),
        }
    }
}

impl<F: FnOnce()> Action for ExecuteAction<F> {
    fn execute(&mut self, _elapsed_ms: u64) {
        if let Some(function) = self.function.take() {
            function();
        }
    }

    fn is_end(&self) -> bool {
        self.function.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_calls_exactly_once() {
        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        let mut action = ExecuteAction::new(move || c.set(c.get() + 1));
        assert!(!action.is_end());

        action.execute(0);
        action.execute(16);
        assert_eq!(calls.get(), 1);
        assert!(action.is_end());
    }
}
