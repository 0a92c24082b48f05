//=========================================================================
// Input Processor
//=========================================================================
//
// Converts platform-specific Winit events into engine InputEvents.
//
// Architecture:
//   Winit Events → InputProcessor → InputEvent (engine type) → InputBuffer
//
// Pointer positions arrive in physical window pixels and leave in stage
// units. The stage keeps its aspect ratio inside the window and is
// centered, so the conversion undoes a uniform scale and a letterbox
// offset. Unmapped keys are filtered (returns None).
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton, Touch, TouchPhase},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::event::{InputEvent, KeyCode, MouseButton};

//=== StageViewport =======================================================

/// Mapping from window pixels to stage units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct StageViewport {
    stage_width: f32,
    stage_height: f32,
    scale: f32,
    offset_x: f32,
    offset_y: f32,
}

impl StageViewport {
    /// Viewport for a window exactly the size of the stage.
    pub(crate) fn new(stage_width: f32, stage_height: f32) -> Self {
        Self {
            stage_width,
            stage_height,
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    /// Refits the stage into a window of `width` × `height` pixels.
    ///
    /// A zero-sized window (minimized) keeps the previous mapping.
    pub(crate) fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }

        self.scale = (width / self.stage_width).min(height / self.stage_height);
        self.offset_x = (width - self.stage_width * self.scale) / 2.0;
        self.offset_y = (height - self.stage_height * self.scale) / 2.0;
    }

    pub(crate) fn scale(&self) -> f32 {
        self.scale
    }

    /// Converts a window position to stage coordinates.
    pub(crate) fn to_stage(&self, x: f32, y: f32) -> (f32, f32) {
        ((x - self.offset_x) / self.scale, (y - self.offset_y) / self.scale)
    }
}

//=== InputProcessor ======================================================

/// Converts Winit events to engine InputEvents in stage coordinates.
pub(crate) struct InputProcessor {
    viewport: StageViewport,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(stage_width: f32, stage_height: f32) -> Self {
        Self {
            viewport: StageViewport::new(stage_width, stage_height),
        }
    }

    //--- Viewport ---------------------------------------------------------

    /// Updates the letterbox after the window changed size.
    pub(crate) fn resize(&mut self, size: PhysicalSize<u32>) {
        self.viewport.resize(size.width as f32, size.height as f32);
    }

    pub(crate) fn viewport(&self) -> &StageViewport {
        &self.viewport
    }

    //--- Event Processing -------------------------------------------------

    /// Converts Winit KeyEvent to InputEvent (filters unmapped keys).
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        let key_code = match key_event.physical_key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            _ => return None,
        };

        if matches!(key_code, KeyCode::Unidentified) {
            return None;
        }

        Some(Self::key_input_event(key_code, key_event.state))
    }

    /// Converts Winit mouse button event to InputEvent.
    pub(crate) fn process_mouse_button(
        &self,
        button: WinitMouseButton,
        state: ElementState,
    ) -> InputEvent {
        let mouse_button = MouseButton::from(button);

        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown(mouse_button),
            ElementState::Released => InputEvent::MouseButtonUp(mouse_button),
        }
    }

    /// Creates a mouse move event in stage coordinates.
    pub(crate) fn process_mouse_move(&self, position: PhysicalPosition<f64>) -> InputEvent {
        let (x, y) = self.viewport.to_stage(position.x as f32, position.y as f32);
        InputEvent::MouseMoved { x, y }
    }

    /// Converts a Winit touch into the matching touch event.
    ///
    /// A cancelled touch is reported as ended.
    pub(crate) fn process_touch(&self, touch: &Touch) -> InputEvent {
        self.touch_event(touch.id, touch.phase, touch.location)
    }

    //--- Internal Helpers -------------------------------------------------

    fn touch_event(&self, id: u64, phase: TouchPhase, location: PhysicalPosition<f64>) -> InputEvent {
        let (x, y) = self.viewport.to_stage(location.x as f32, location.y as f32);

        match phase {
            TouchPhase::Started => InputEvent::TouchStarted { id, x, y },
            TouchPhase::Moved => InputEvent::TouchMoved { id, x, y },
            TouchPhase::Ended | TouchPhase::Cancelled => InputEvent::TouchEnded { id, x, y },
        }
    }

    fn key_input_event(key: KeyCode, state: ElementState) -> InputEvent {
        match state {
            ElementState::Pressed => InputEvent::KeyDown(key),
            ElementState::Released => InputEvent::KeyUp(key),
        }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts Winit physical key codes to engine key codes.
///
/// Maps A-Z, arrows, Space, Enter and Escape. Everything else returns
/// `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Letters ------------------------------------------------------

            KeyA => KeyCode::KeyA,
            KeyB => KeyCode::KeyB,
            KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD,
            KeyE => KeyCode::KeyE,
            KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG,
            KeyH => KeyCode::KeyH,
            KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ,
            KeyK => KeyCode::KeyK,
            KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM,
            KeyN => KeyCode::KeyN,
            KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP,
            KeyQ => KeyCode::KeyQ,
            KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS,
            KeyT => KeyCode::KeyT,
            KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV,
            KeyW => KeyCode::KeyW,
            KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY,
            KeyZ => KeyCode::KeyZ,

            //--- Arrows -------------------------------------------------------

            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            //--- Special ------------------------------------------------------

            Space => KeyCode::Space,
            Enter | NumpadEnter => KeyCode::Enter,
            Escape => KeyCode::Escape,

            _ => KeyCode::Unidentified,
        }
    }
}

/// Converts Winit mouse buttons to engine buttons.
///
/// Left/Right/Middle mapped directly; Back/Forward/Other → Other.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
