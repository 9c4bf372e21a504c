//! Events delivered to the running stage.
//!
//! The host window layer translates its native events into [`StageEvent`]s
//! and queues them on the [`Application`](crate::app::Application) with
//! `push_event`. At the end of each frame the queue is drained into
//! [`Stage::process_event`](crate::stage::Stage::process_event), in order.

/// What happened to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Resized { width: u32, height: u32 },
    Maximized,
    Iconified,
    Restored,
    /// The user asked to close the window.
    Closed,
    Focused,
    Unfocused,
}

/// Keys the engine knows by name. Anything else is reported by scan code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Tab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    F1,
    F10,
    F11,
    F12,
    Char(char),
    Other(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Release,
    Repeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Press,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StageEvent {
    Window(WindowEvent),
    Keyboard { key: Key, action: KeyAction },
    MouseButton { button: MouseButton, action: ButtonAction },
    /// Cursor position and the shift since the previous move event.
    MouseMove { x: f64, y: f64, dx: f64, dy: f64 },
    MouseScroll { dx: f64, dy: f64 },
}

impl StageEvent {
    /// Shorthand for a key press.
    pub fn key_pressed(key: Key) -> Self {
        StageEvent::Keyboard {
            key,
            action: KeyAction::Press,
        }
    }

    pub fn is_close_request(&self) -> bool {
        matches!(self, StageEvent::Window(WindowEvent::Closed))
    }
}
