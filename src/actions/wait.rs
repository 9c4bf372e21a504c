use super::Action;

/// Does nothing for a duration, in milliseconds.
pub struct WaitAction {
    remaining_ms: i64,
}

impl WaitAction {
    pub fn new(duration_ms: u64) -> Self {
        WaitAction {
            remaining_ms: i64::try_from(duration_ms).unwrap_or(i64::MAX),
        }
    }
}

impl Action for WaitAction {
    fn execute(&mut self, elapsed_ms: u64) {
        if self.is_end() {
            return;
        }
        let elapsed = i64::try_from(elapsed_ms).unwrap_or(i64::MAX);
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed);
    }

    fn is_end(&self) -> bool {
        self.remaining_ms <= 0
    }
}
