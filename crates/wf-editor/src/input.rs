//! Input abstraction layer.
//!
//! Normalizes host pointer and keyboard events into a unified `InputEvent`
//! enum consumed by the interaction controller. Coordinates are raw screen
//! pixels; the controller converts them to document space.

/// Keyboard modifier state attached to every event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Command on macOS, Control elsewhere.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A normalized input event from any pointing device or keyboard.
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start).
    PointerDown { x: f64, y: f64, modifiers: Modifiers },

    /// Pointer moved while pressed or hovering.
    PointerMove { x: f64, y: f64, modifiers: Modifiers },

    /// Pointer released.
    PointerUp { x: f64, y: f64, modifiers: Modifiers },

    /// Primary-button double click.
    DoubleClick { x: f64, y: f64, modifiers: Modifiers },

    /// Keyboard input. `key` follows `KeyboardEvent.key` naming
    /// (`"a"`, `"Delete"`, `"Enter"`, ...).
    Key { key: String, modifiers: Modifiers },
}

impl InputEvent {
    pub fn pointer_down(x: f64, y: f64) -> Self {
        Self::PointerDown { x, y, modifiers: Modifiers::NONE }
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove { x, y, modifiers: Modifiers::NONE }
    }

    pub fn pointer_up(x: f64, y: f64) -> Self {
        Self::PointerUp { x, y, modifiers: Modifiers::NONE }
    }

    pub fn double_click(x: f64, y: f64) -> Self {
        Self::DoubleClick { x, y, modifiers: Modifiers::NONE }
    }

    pub fn key(key: &str) -> Self {
        Self::Key { key: key.to_string(), modifiers: Modifiers::NONE }
    }

    /// Extract the screen position if this is a pointer event.
    pub fn position(&self) -> Option<(f64, f64)> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y, .. }
            | Self::DoubleClick { x, y, .. } => Some((*x, *y)),
            Self::Key { .. } => None,
        }
    }
}
