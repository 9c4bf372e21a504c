//! Run conditions on the application state.
use bevy_ecs::prelude::*;

use crate::resources::appstate::AppState;

/// Run condition: true unless the application is paused.
pub fn app_not_paused(state: Res<AppState>) -> bool {
    !state.paused
}
