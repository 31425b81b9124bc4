//! # Input Protocol
//!
//! Pointer and wheel events the host forwards to the Canvas.
//! Positions are in Screen Space (container pixels, origin at the container's top-left).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// State of keyboard modifiers (Shift, Ctrl, Alt, Meta).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifiersState {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Meta / Command / Windows key.
    pub meta: bool,
}

impl ModifiersState {
    /// Any of the keys that turn a wheel scroll into a zoom.
    pub fn zoom_modifier(&self) -> bool {
        self.ctrl || self.meta || self.shift
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

/// A single input event.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum CanvasEvent {
    PointerDown {
        pos: Vec2,
        button: PointerButton,
        modifiers: ModifiersState,
    },
    PointerMove {
        pos: Vec2,
    },
    /// Released anywhere in the document.
    PointerUp {
        pos: Vec2,
    },
    Wheel {
        pos: Vec2,
        /// Raw wheel deltas. Negative `y` means wheel up.
        delta: Vec2,
        modifiers: ModifiersState,
    },
}

impl CanvasEvent {
    pub fn primary_down(pos: Vec2) -> Self {
        CanvasEvent::PointerDown {
            pos,
            button: PointerButton::Primary,
            modifiers: ModifiersState::default(),
        }
    }
}
