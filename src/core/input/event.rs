//=========================================================================
// Input Event Types
//
// Engine-side representation of low-level input.
//
// The platform layer (winit) converts OS events into these types before
// they cross the channel to the core thread. Scenes never see winit types.
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (per-frame snapshot)
//         ↓
//    ControlSet / pointer queries (scene logic)
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::hash::{Hash, Hasher};

//=== MouseButton =========================================================

/// Physical mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left). Clicks and drags use this one.
    Left,

    /// Secondary button.
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Side buttons, thumb buttons and anything else.
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Only the keys the game can bind or that count as an "any key"
/// dialog advance are listed. Everything else arrives as `Unidentified`
/// and is filtered by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Alphabetic Keys --------------------------------------------------

    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,

    /// Keys not mapped by the input layer.
    Unidentified,
}

//=== TouchId =============================================================

/// Identifier of one finger for the lifetime of a touch sequence.
pub type TouchId = u64;

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
///
/// # Equality & Hashing Semantics
///
/// `MouseMoved` events compare equal regardless of coordinates so the
/// platform buffer can coalesce them (last position wins). `TouchMoved`
/// events coalesce per touch id. Every other variant compares by payload.
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Key pressed down.
    KeyDown(KeyCode),

    /// Key released.
    KeyUp(KeyCode),

    /// Mouse button pressed.
    MouseButtonDown(MouseButton),

    /// Mouse button released.
    MouseButtonUp(MouseButton),

    /// Cursor moved, stage coordinates (top-left origin).
    MouseMoved { x: f32, y: f32 },

    /// Finger touched the screen.
    TouchStarted { id: TouchId, x: f32, y: f32 },

    /// Finger moved while touching.
    TouchMoved { id: TouchId, x: f32, y: f32 },

    /// Finger lifted (or the OS cancelled the touch).
    TouchEnded { id: TouchId, x: f32, y: f32 },

    /// Unrecognized event, ignored by the state tracker.
    Unidentified,
}

impl InputEvent {
    /// Returns `true` for events that should be coalesced (only the latest
    /// instance per frame matters).
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::MouseMoved { .. } | Self::TouchMoved { .. })
    }
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        use InputEvent::*;
        match (self, other) {
            (KeyDown(a), KeyDown(b)) | (KeyUp(a), KeyUp(b)) => a == b,
            (MouseButtonDown(a), MouseButtonDown(b)) | (MouseButtonUp(a), MouseButtonUp(b)) => {
                a == b
            }
            // Coordinates ignored so consecutive moves coalesce
            (MouseMoved { .. }, MouseMoved { .. }) => true,
            (TouchMoved { id: a, .. }, TouchMoved { id: b, .. }) => a == b,
            (
                TouchStarted { id: a, x: ax, y: ay },
                TouchStarted { id: b, x: bx, y: by },
            )
            | (
                TouchEnded { id: a, x: ax, y: ay },
                TouchEnded { id: b, x: bx, y: by },
            ) => a == b && ax == bx && ay == by,
            (Unidentified, Unidentified) => true,
            _ => false,
        }
    }
}

impl Eq for InputEvent {}

impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Self::KeyDown(key) | Self::KeyUp(key) => key.hash(state),
            Self::MouseButtonDown(button) | Self::MouseButtonUp(button) => button.hash(state),
            Self::TouchMoved { id, .. } => id.hash(state),
            Self::TouchStarted { id, x, y } | Self::TouchEnded { id, x, y } => {
                id.hash(state);
                x.to_bits().hash(state);
                y.to_bits().hash(state);
            }
            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
