//! Input abstraction layer.
//!
//! Hosts translate their native pointer/wheel events into [`InputEvent`]
//! with positions in local surface coordinates.

/// Modifier keys held during an event.
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

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    /// Ctrl on most platforms, Cmd on macOS. Trackpad pinch also arrives
    /// as a ctrl-wheel in browsers.
    pub fn zoom(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A normalized input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },

    PointerMove { x: f32, y: f32 },

    PointerUp { x: f32, y: f32 },

    /// Scroll wheel or trackpad.
    Wheel {
        x: f32,
        y: f32,
        dx: f32,
        dy: f32,
        modifiers: Modifiers,
    },

    /// The host is about to open its native context menu.
    ContextMenu,
}

impl InputEvent {
    pub fn pointer_down(x: f32, y: f32) -> Self {
        Self::PointerDown { x, y }
    }

    pub fn pointer_move(x: f32, y: f32) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn pointer_up(x: f32, y: f32) -> Self {
        Self::PointerUp { x, y }
    }

    pub fn wheel(dx: f32, dy: f32, modifiers: Modifiers) -> Self {
        Self::Wheel {
            x: 0.0,
            y: 0.0,
            dx,
            dy,
            modifiers,
        }
    }
}
