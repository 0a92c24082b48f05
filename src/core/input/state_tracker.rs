//=========================================================================
// State Tracker
//=========================================================================
//
// Low-level input state tracking with per-frame delta tracking.
//
// Architecture:
//   InputEvent → process_events() → HashSet (keys/buttons held) → query
//
// Frame lifecycle: clear() → process_events() → finalize_frame() → query
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, HashSet};

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, MouseButton, TouchId};

//=== StateTracker ========================================================

/// Tracks persistent state (keys held, touches down) and per-frame deltas
/// (keys pressed/released, touches started/ended).
///
/// Frame lifecycle: `clear()` → `process_events()` → `finalize_frame()` → query.
pub struct StateTracker {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<KeyCode>,
    mouse_buttons_down: HashSet<MouseButton>,
    mouse_position: (f32, f32),
    touches: HashMap<TouchId, (f32, f32)>,

    //--- Frame Deltas (reset each frame via clear()) --------------------
    keys_pressed_this_frame: HashSet<KeyCode>,
    keys_released_this_frame: HashSet<KeyCode>,
    mouse_buttons_pressed_this_frame: HashSet<MouseButton>,
    mouse_buttons_released_this_frame: HashSet<MouseButton>,
    touches_started_this_frame: Vec<(TouchId, f32, f32)>,
    touches_moved_this_frame: bool,
    touches_ended_this_frame: Vec<(TouchId, f32, f32)>,

    //--- Continuous Input (accumulated/calculated) -----------------------
    mouse_delta: (f32, f32),
    last_mouse_position: (f32, f32),
}

impl StateTracker {
    /// Creates a new state tracker with empty state.
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            mouse_buttons_down: HashSet::new(),
            mouse_position: (0.0, 0.0),
            touches: HashMap::new(),
            keys_pressed_this_frame: HashSet::new(),
            keys_released_this_frame: HashSet::new(),
            mouse_buttons_pressed_this_frame: HashSet::new(),
            mouse_buttons_released_this_frame: HashSet::new(),
            touches_started_this_frame: Vec::new(),
            touches_moved_this_frame: false,
            touches_ended_this_frame: Vec::new(),
            mouse_delta: (0.0, 0.0),
            last_mouse_position: (0.0, 0.0),
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears frame-specific deltas (pressed/released flags).
    pub fn clear(&mut self) {
        self.keys_pressed_this_frame.clear();
        self.keys_released_this_frame.clear();
        self.mouse_buttons_pressed_this_frame.clear();
        self.mouse_buttons_released_this_frame.clear();
        self.touches_started_this_frame.clear();
        self.touches_moved_this_frame = false;
        self.touches_ended_this_frame.clear();
        self.last_mouse_position = self.mouse_position;
    }

    /// Processes input events, updating internal state.
    pub fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    /// Finalizes frame calculations (calculates mouse delta).
    pub fn finalize_frame(&mut self) {
        self.mouse_delta = (
            self.mouse_position.0 - self.last_mouse_position.0,
            self.mouse_position.1 - self.last_mouse_position.1,
        );
    }

    /// Forgets everything, including held keys.
    ///
    /// Used when a scene change should not inherit a key that was held
    /// across the transition.
    pub fn reset(&mut self) {
        *self = Self {
            mouse_position: self.mouse_position,
            last_mouse_position: self.mouse_position,
            ..Self::new()
        };
    }

    //--- Internal Helpers -------------------------------------------------
    fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown(key) => {
                // Only mark as pressed if it wasn't already down (OS key repeat)
                if self.keys_down.insert(key) {
                    self.keys_pressed_this_frame.insert(key);
                }
            }

            InputEvent::KeyUp(key) => {
                if self.keys_down.remove(&key) {
                    self.keys_released_this_frame.insert(key);
                }
            }

            InputEvent::MouseButtonDown(button) => {
                if self.mouse_buttons_down.insert(button) {
                    self.mouse_buttons_pressed_this_frame.insert(button);
                }
            }

            InputEvent::MouseButtonUp(button) => {
                if self.mouse_buttons_down.remove(&button) {
                    self.mouse_buttons_released_this_frame.insert(button);
                }
            }

            InputEvent::MouseMoved { x, y } => {
                self.mouse_position = (x, y);
            }

            InputEvent::TouchStarted { id, x, y } => {
                self.touches.insert(id, (x, y));
                self.touches_started_this_frame.push((id, x, y));
            }

            InputEvent::TouchMoved { id, x, y } => {
                if let Some(position) = self.touches.get_mut(&id) {
                    *position = (x, y);
                    self.touches_moved_this_frame = true;
                }
            }

            InputEvent::TouchEnded { id, x, y } => {
                if self.touches.remove(&id).is_some() {
                    self.touches_ended_this_frame.push((id, x, y));
                }
            }

            InputEvent::Unidentified => {}
        }
    }

    //=====================================================================
    // Query API - Keyboard
    //=====================================================================

    /// Returns `true` if key transitioned UP → DOWN this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed_this_frame.contains(&key)
    }

    /// Returns `true` while key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns `true` if key transitioned DOWN → UP this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released_this_frame.contains(&key)
    }

    /// Returns `true` if any key went down this frame.
    pub fn any_key_pressed(&self) -> bool {
        !self.keys_pressed_this_frame.is_empty()
    }

    /// Returns an iterator over all keys currently held.
    pub fn keys_down(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_down.iter()
    }

    /// Returns an iterator over all keys pressed this frame.
    pub fn keys_pressed(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_pressed_this_frame.iter()
    }

    //=====================================================================
    // Query API - Mouse
    //=====================================================================

    /// Like [`is_key_pressed`](Self::is_key_pressed) but for mouse buttons.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons_pressed_this_frame.contains(&button)
    }

    /// Like [`is_key_down`](Self::is_key_down) but for mouse buttons.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons_down.contains(&button)
    }

    /// Like [`is_key_released`](Self::is_key_released) but for mouse buttons.
    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.mouse_buttons_released_this_frame.contains(&button)
    }

    /// Returns mouse position in stage coordinates (top-left origin).
    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    /// Returns mouse movement delta (0,0 if no movement).
    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    //=====================================================================
    // Query API - Touch
    //=====================================================================

    /// Returns an iterator over active touches and their latest positions.
    pub fn touches(&self) -> impl Iterator<Item = (TouchId, (f32, f32))> + '_ {
        self.touches.iter().map(|(&id, &pos)| (id, pos))
    }

    /// Position of a touch that is still down.
    pub fn touch_position(&self, id: TouchId) -> Option<(f32, f32)> {
        self.touches.get(&id).copied()
    }

    /// Touches that began this frame as `(id, x, y)`.
    pub fn touches_started(&self) -> &[(TouchId, f32, f32)] {
        &self.touches_started_this_frame
    }

    /// Touches that ended this frame as `(id, x, y)`.
    pub fn touches_ended(&self) -> &[(TouchId, f32, f32)] {
        &self.touches_ended_this_frame
    }

    //=====================================================================
    // Query API - Pointer (mouse or touch)
    //=====================================================================

    /// Where a click or tap started this frame, if any.
    ///
    /// A left mouse press reports the cursor position; otherwise the first
    /// touch that began this frame is used.
    pub fn pointer_pressed(&self) -> Option<(f32, f32)> {
        if self.is_button_pressed(MouseButton::Left) {
            return Some(self.mouse_position);
        }
        self.touches_started_this_frame
            .first()
            .map(|&(_, x, y)| (x, y))
    }

    /// Where a click or tap was released this frame, if any.
    pub fn pointer_released(&self) -> Option<(f32, f32)> {
        if self.is_button_released(MouseButton::Left) {
            return Some(self.mouse_position);
        }
        self.touches_ended_this_frame
            .first()
            .map(|&(_, x, y)| (x, y))
    }

    /// Returns `true` if the cursor or any finger moved this frame.
    pub fn pointer_moved(&self) -> bool {
        self.mouse_delta != (0.0, 0.0) || self.touches_moved_this_frame
    }

    /// Returns `true` if any key, mouse button or touch began this frame.
    ///
    /// This is the "any key or click" gesture that advances dialogs.
    pub fn any_input_pressed(&self) -> bool {
        self.any_key_pressed()
            || !self.mouse_buttons_pressed_this_frame.is_empty()
            || !self.touches_started_this_frame.is_empty()
    }
}

//--- Trait Implementations -----------------------------------------------

impl Default for StateTracker {
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

    //--- Test Helpers -----------------------------------------------------

    fn frame(system: &mut StateTracker, events: &[InputEvent]) {
        system.clear();
        system.process_events(events);
        system.finalize_frame();
    }

    //=====================================================================
    // Keyboard Tests
    //=====================================================================

    #[test]
    fn key_pressed_only_on_transition_frame() {
        let mut system = StateTracker::new();

        frame(&mut system, &[InputEvent::KeyDown(KeyCode::KeyA)]);
        assert!(system.is_key_pressed(KeyCode::KeyA));
        assert!(system.is_key_down(KeyCode::KeyA));

        frame(&mut system, &[]);
        assert!(!system.is_key_pressed(KeyCode::KeyA));
        assert!(system.is_key_down(KeyCode::KeyA));

        frame(&mut system, &[InputEvent::KeyUp(KeyCode::KeyA)]);
        assert!(!system.is_key_down(KeyCode::KeyA));
        assert!(system.is_key_released(KeyCode::KeyA));
    }

    #[test]
    fn repeated_key_down_is_not_a_new_press() {
        let mut system = StateTracker::new();

        frame(&mut system, &[InputEvent::KeyDown(KeyCode::KeyE)]);
        frame(&mut system, &[InputEvent::KeyDown(KeyCode::KeyE)]);

        assert!(!system.is_key_pressed(KeyCode::KeyE), "OS repeat must not re-trigger");
        assert!(system.is_key_down(KeyCode::KeyE));
    }

    #[test]
    fn fast_tap_both_transitions_captured() {
        let mut system = StateTracker::new();

        frame(
            &mut system,
            &[InputEvent::KeyDown(KeyCode::Space), InputEvent::KeyUp(KeyCode::Space)],
        );

        assert!(system.is_key_pressed(KeyCode::Space));
        assert!(system.is_key_released(KeyCode::Space));
        assert!(!system.is_key_down(KeyCode::Space));
    }

    //=====================================================================
    // Pointer Tests
    //=====================================================================

    #[test]
    fn mouse_click_reports_cursor_position() {
        let mut system = StateTracker::new();

        frame(
            &mut system,
            &[
                InputEvent::MouseMoved { x: 40.0, y: 50.0 },
                InputEvent::MouseButtonDown(MouseButton::Left),
            ],
        );

        assert_eq!(system.pointer_pressed(), Some((40.0, 50.0)));
        assert!(system.any_input_pressed());

        frame(&mut system, &[InputEvent::MouseButtonUp(MouseButton::Left)]);
        assert_eq!(system.pointer_pressed(), None);
        assert_eq!(system.pointer_released(), Some((40.0, 50.0)));
    }

    #[test]
    fn touch_lifecycle_is_tracked() {
        let mut system = StateTracker::new();

        frame(&mut system, &[InputEvent::TouchStarted { id: 7, x: 10.0, y: 20.0 }]);
        assert_eq!(system.pointer_pressed(), Some((10.0, 20.0)));
        assert_eq!(system.touch_position(7), Some((10.0, 20.0)));

        frame(&mut system, &[InputEvent::TouchMoved { id: 7, x: 12.0, y: 22.0 }]);
        assert!(system.pointer_moved());
        assert_eq!(system.touch_position(7), Some((12.0, 22.0)));

        frame(&mut system, &[InputEvent::TouchEnded { id: 7, x: 12.0, y: 22.0 }]);
        assert_eq!(system.touch_position(7), None);
        assert_eq!(system.pointer_released(), Some((12.0, 22.0)));
    }

    #[test]
    fn mouse_delta_calculated() {
        let mut system = StateTracker::new();

        frame(&mut system, &[InputEvent::MouseMoved { x: 100.0, y: 100.0 }]);
        assert_eq!(system.mouse_delta(), (100.0, 100.0));
        assert!(system.pointer_moved());

        frame(&mut system, &[InputEvent::MouseMoved { x: 150.0, y: 120.0 }]);
        assert_eq!(system.mouse_delta(), (50.0, 20.0));

        frame(&mut system, &[]);
        assert_eq!(system.mouse_delta(), (0.0, 0.0));
        assert!(!system.pointer_moved());
    }

    #[test]
    fn reset_forgets_held_keys_but_keeps_cursor() {
        let mut system = StateTracker::new();
        frame(
            &mut system,
            &[
                InputEvent::KeyDown(KeyCode::ArrowLeft),
                InputEvent::MouseMoved { x: 5.0, y: 6.0 },
            ],
        );

        system.reset();

        assert!(!system.is_key_down(KeyCode::ArrowLeft));
        assert_eq!(system.mouse_position(), (5.0, 6.0));
    }

    #[test]
    fn unidentified_events_ignored() {
        let mut system = StateTracker::new();
        frame(&mut system, &[InputEvent::Unidentified]);
        assert!(!system.any_input_pressed());
        assert_eq!(system.mouse_position(), (0.0, 0.0));
    }
}
