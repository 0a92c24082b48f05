//=========================================================================
// Input System
//=========================================================================
//
// Turns each frame's raw events into the control sets scenes consume.
//
// Architecture:
//   frame batches → StateTracker → ControlMapper ─┐
//                                 TouchControls ──┴→ ControlFrame
//
// Frame lifecycle (run by GlobalSystems each tick):
//   clear() → process_events(batches) → finalize_frame() → map controls
//
//=========================================================================

//=== Module Declarations =================================================

pub mod controls;
pub mod drag;
pub mod event;
pub mod state_tracker;
pub mod touch_controls;

//=== Public API ==========================================================

pub use controls::{Control, ControlMapper, ControlSet};
pub use drag::{Drag, DragEvent, DragInput, DropSurface, PointerDrag, TouchDrag};
pub use event::{InputEvent, KeyCode, MouseButton, TouchId};
pub use state_tracker::StateTracker;
pub use touch_controls::{TouchButton, TouchControls, TouchOptions};

//=== ControlFrame ========================================================

/// Controls for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlFrame {
    /// Controls held right now (keyboard or virtual buttons).
    pub held: ControlSet,

    /// Controls that went from released to held this frame.
    pub pressed: ControlSet,
}

//=== InputSystem =========================================================

/// Key bindings plus edge detection across frames.
pub struct InputSystem {
    mapper: ControlMapper,
    previous: ControlSet,
}

impl InputSystem {
    /// Creates an input system with the default key layout.
    pub fn new() -> Self {
        Self {
            mapper: ControlMapper::with_defaults(),
            previous: ControlSet::empty(),
        }
    }

    //--- Binding API ------------------------------------------------------

    pub fn bind_key(&mut self, key: KeyCode, control: Control) {
        self.mapper.bind_key(key, control);
    }

    pub fn unbind_key(&mut self, key: KeyCode) {
        self.mapper.unbind_key(key);
    }

    pub fn mapper(&self) -> &ControlMapper {
        &self.mapper
    }

    //--- Frame Processing -------------------------------------------------

    /// Feeds one frame of events through the tracker and maps controls.
    pub fn process_frame(
        &mut self,
        state: &mut StateTracker,
        touch: &mut TouchControls,
        batches: &[Vec<InputEvent>],
    ) -> ControlFrame {
        state.clear();
        for batch in batches {
            state.process_events(batch);
        }
        state.finalize_frame();

        let held = self.mapper.held(state).union(touch.update(state));
        let pressed = held.difference(self.previous);
        self.previous = held;

        ControlFrame { held, pressed }
    }

    /// Forgets the previous frame so a still-held control counts as a
    /// fresh press.
    pub fn reset(&mut self) {
        self.previous = ControlSet::empty();
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn run(system: &mut InputSystem, state: &mut StateTracker, events: Vec<InputEvent>) -> ControlFrame {
        let mut touch = TouchControls::new();
        system.process_frame(state, &mut touch, &[events])
    }

    #[test]
    fn interact_pressed_only_once_while_held() {
        let mut system = InputSystem::new();
        let mut state = StateTracker::new();

        let first = run(&mut system, &mut state, vec![InputEvent::KeyDown(KeyCode::KeyE)]);
        assert!(first.pressed.contains(Control::Interact));
        assert!(first.held.contains(Control::Interact));

        let second = run(&mut system, &mut state, vec![]);
        assert!(!second.pressed.contains(Control::Interact));
        assert!(second.held.contains(Control::Interact));

        let third = run(&mut system, &mut state, vec![InputEvent::KeyUp(KeyCode::KeyE)]);
        assert!(third.held.is_empty());
    }

    #[test]
    fn batches_processed_in_order() {
        let mut system = InputSystem::new();
        let mut state = StateTracker::new();
        let mut touch = TouchControls::new();

        let frame = system.process_frame(
            &mut state,
            &mut touch,
            &[
                vec![InputEvent::KeyDown(KeyCode::ArrowRight)],
                vec![InputEvent::MouseMoved { x: 3.0, y: 4.0 }],
            ],
        );

        assert!(frame.held.contains(Control::MoveRight));
        assert_eq!(state.mouse_position(), (3.0, 4.0));
    }

    #[test]
    fn virtual_buttons_merge_with_keyboard() {
        let mut system = InputSystem::new();
        let mut state = StateTracker::new();
        let mut touch = TouchControls::new();
        touch.show(TouchOptions { include_jump: true, include_interact: true }, 1920.0, 1200.0);
        let interact = touch
            .buttons()
            .iter()
            .find(|b| b.control == Control::Interact)
            .map(|b| b.rect.center())
            .unwrap();

        let frame = system.process_frame(
            &mut state,
            &mut touch,
            &[vec![
                InputEvent::KeyDown(KeyCode::KeyA),
                InputEvent::TouchStarted { id: 1, x: interact.0, y: interact.1 },
            ]],
        );

        assert!(frame.held.contains(Control::MoveLeft));
        assert!(frame.pressed.contains(Control::Interact));
    }

    #[test]
    fn reset_rearms_edge_detection() {
        let mut system = InputSystem::new();
        let mut state = StateTracker::new();

        run(&mut system, &mut state, vec![InputEvent::KeyDown(KeyCode::KeyE)]);
        system.reset();
        let frame = run(&mut system, &mut state, vec![]);

        assert!(frame.pressed.contains(Control::Interact));
    }
}
