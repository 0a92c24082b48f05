//=========================================================================
// Touch Controls
//=========================================================================
//
// Virtual on-stage buttons for touch-primary devices.
//
// Each button maps to a Control. A finger (or the left mouse button, for
// testing on desktop) pressed on a button holds that control until it is
// lifted. The mouse also lets go when the cursor leaves the button.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::controls::{Control, ControlSet};
use super::event::{MouseButton, TouchId};
use super::state_tracker::StateTracker;
use crate::core::geometry::Rect;

//=== Layout Constants ====================================================

const BUTTON_SIZE: f32 = 160.0;
const MARGIN: f32 = 40.0;
const SPACING: f32 = 40.0;

//=== TouchOptions ========================================================

/// Which optional buttons a scene wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchOptions {
    pub include_jump: bool,
    pub include_interact: bool,
}

impl Default for TouchOptions {
    fn default() -> Self {
        Self {
            include_jump: true,
            include_interact: false,
        }
    }
}

//=== TouchButton =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct TouchButton {
    pub control: Control,
    pub rect: Rect,
    pub label: &'static str,
}

//=== TouchControls =======================================================

/// Button layout plus the touches currently holding a button.
#[derive(Debug, Default)]
pub struct TouchControls {
    buttons: Vec<TouchButton>,
    touches: HashMap<TouchId, Control>,
    mouse: Option<Control>,
}

impl TouchControls {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Layout -----------------------------------------------------------

    /// Lays out the buttons along the bottom of the stage.
    ///
    /// Movement cluster on the left (◀ ▲ ▶), interact in the right corner.
    pub fn show(&mut self, options: TouchOptions, stage_width: f32, stage_height: f32) {
        self.hide();

        let y = stage_height - MARGIN - BUTTON_SIZE;
        let mut x = MARGIN;
        let mut place = |control, label| {
            let button = TouchButton {
                control,
                rect: Rect::new(x, y, BUTTON_SIZE, BUTTON_SIZE),
                label,
            };
            x += BUTTON_SIZE + SPACING;
            button
        };

        self.buttons.push(place(Control::MoveLeft, "◀"));
        if options.include_jump {
            self.buttons.push(place(Control::Jump, "▲"));
        }
        self.buttons.push(place(Control::MoveRight, "▶"));

        if options.include_interact {
            self.buttons.push(TouchButton {
                control: Control::Interact,
                rect: Rect::new(stage_width - MARGIN - BUTTON_SIZE, y, BUTTON_SIZE, BUTTON_SIZE),
                label: "E",
            });
        }
    }

    /// Removes every button and releases anything held.
    pub fn hide(&mut self) {
        self.buttons.clear();
        self.touches.clear();
        self.mouse = None;
    }

    pub fn is_visible(&self) -> bool {
        !self.buttons.is_empty()
    }

    pub fn buttons(&self) -> &[TouchButton] {
        &self.buttons
    }

    //--- Frame Update -----------------------------------------------------

    /// Updates held buttons from this frame's input and returns the
    /// controls they hold.
    pub fn update(&mut self, input: &StateTracker) -> ControlSet {
        if self.buttons.is_empty() {
            return ControlSet::empty();
        }

        for &(id, x, y) in input.touches_started() {
            if let Some(control) = self.button_at(x, y) {
                self.touches.insert(id, control);
            }
        }
        for &(id, _, _) in input.touches_ended() {
            self.touches.remove(&id);
        }

        let (mx, my) = input.mouse_position();
        if input.is_button_pressed(MouseButton::Left) {
            self.mouse = self.button_at(mx, my);
        }
        if input.is_button_released(MouseButton::Left) {
            self.mouse = None;
        }
        if let Some(control) = self.mouse {
            if self.button_at(mx, my) != Some(control) {
                self.mouse = None;
            }
        }

        self.touches.values().copied().chain(self.mouse).collect()
    }

    fn button_at(&self, x: f32, y: f32) -> Option<Control> {
        self.buttons
            .iter()
            .find(|b| b.rect.contains(x, y))
            .map(|b| b.control)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::event::InputEvent;

    fn frame(tracker: &mut StateTracker, events: &[InputEvent]) {
        tracker.clear();
        tracker.process_events(events);
        tracker.finalize_frame();
    }

    fn shown(options: TouchOptions) -> TouchControls {
        let mut controls = TouchControls::new();
        controls.show(options, 1920.0, 1200.0);
        controls
    }

    fn center_of(controls: &TouchControls, control: Control) -> (f32, f32) {
        controls
            .buttons()
            .iter()
            .find(|b| b.control == control)
            .map(|b| b.rect.center())
            .unwrap()
    }

    #[test]
    fn options_choose_buttons() {
        let minimal = shown(TouchOptions { include_jump: false, include_interact: false });
        assert_eq!(minimal.buttons().len(), 2);

        let full = shown(TouchOptions { include_jump: true, include_interact: true });
        let controls: Vec<_> = full.buttons().iter().map(|b| b.control).collect();
        assert_eq!(
            controls,
            vec![Control::MoveLeft, Control::Jump, Control::MoveRight, Control::Interact]
        );
    }

    #[test]
    fn touch_holds_until_lifted() {
        let mut controls = shown(TouchOptions::default());
        let mut tracker = StateTracker::new();
        let (x, y) = center_of(&controls, Control::MoveRight);

        frame(&mut tracker, &[InputEvent::TouchStarted { id: 1, x, y }]);
        assert!(controls.update(&tracker).contains(Control::MoveRight));

        frame(&mut tracker, &[]);
        assert!(controls.update(&tracker).contains(Control::MoveRight));

        frame(&mut tracker, &[InputEvent::TouchEnded { id: 1, x, y }]);
        assert!(controls.update(&tracker).is_empty());
    }

    #[test]
    fn two_fingers_hold_two_controls() {
        let mut controls = shown(TouchOptions::default());
        let mut tracker = StateTracker::new();
        let (lx, ly) = center_of(&controls, Control::MoveLeft);
        let (jx, jy) = center_of(&controls, Control::Jump);

        frame(
            &mut tracker,
            &[
                InputEvent::TouchStarted { id: 1, x: lx, y: ly },
                InputEvent::TouchStarted { id: 2, x: jx, y: jy },
            ],
        );
        let held = controls.update(&tracker);

        assert!(held.contains(Control::MoveLeft));
        assert!(held.contains(Control::Jump));
    }

    #[test]
    fn mouse_releases_when_leaving_button() {
        let mut controls = shown(TouchOptions::default());
        let mut tracker = StateTracker::new();
        let (x, y) = center_of(&controls, Control::MoveLeft);

        frame(
            &mut tracker,
            &[
                InputEvent::MouseMoved { x, y },
                InputEvent::MouseButtonDown(MouseButton::Left),
            ],
        );
        assert!(controls.update(&tracker).contains(Control::MoveLeft));

        frame(&mut tracker, &[InputEvent::MouseMoved { x: 900.0, y: 100.0 }]);
        assert!(controls.update(&tracker).is_empty());
    }

    #[test]
    fn hidden_controls_hold_nothing() {
        let mut controls = TouchControls::new();
        let mut tracker = StateTracker::new();

        frame(&mut tracker, &[InputEvent::TouchStarted { id: 1, x: 100.0, y: 1100.0 }]);

        assert!(!controls.is_visible());
        assert!(controls.update(&tracker).is_empty());
    }
}
