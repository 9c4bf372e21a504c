//! Application run state.

use bevy_ecs::prelude::Resource;

/// Lifecycle flags of the [`Application`](crate::app::Application).
///
/// Stages stop the application by setting `stopped` (see
/// [`AppState::stop`]); the main loop exits after the current frame.
/// While `paused`, the stage's `execute` is skipped but it is still
/// displayed and receives events.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppState {
    pub launched: bool,
    pub stopped: bool,
    pub paused: bool,
}

impl AppState {
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }
}
