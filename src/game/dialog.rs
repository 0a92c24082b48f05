//=========================================================================
// Dialog Lines
//=========================================================================
//
// Modal text advanced by any key, click or tap.
//
// A line ignores input on the frame it opens, so the press that opened
// it cannot also dismiss it.
//
//=========================================================================

use crate::core::input::StateTracker;
use crate::core::scene::DialogBox;

#[derive(Debug, Clone, PartialEq)]
pub struct DialogLine {
    dialog: DialogBox,
    armed: bool,
}

impl DialogLine {
    pub fn new(dialog: DialogBox) -> Self {
        Self { dialog, armed: false }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(DialogBox::text(text))
    }

    /// Returns `true` once the player dismisses the line.
    pub fn advanced(&mut self, input: &StateTracker) -> bool {
        if !self.armed {
            self.armed = true;
            return false;
        }
        input.any_input_pressed()
    }

    pub fn dialog(&self) -> &DialogBox {
        &self.dialog
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode, MouseButton};

    fn tracker(events: &[InputEvent]) -> StateTracker {
        let mut state = StateTracker::new();
        state.clear();
        state.process_events(events);
        state.finalize_frame();
        state
    }

    #[test]
    fn opening_frame_is_ignored() {
        let mut line = DialogLine::text("hi");
        let press = tracker(&[InputEvent::KeyDown(KeyCode::KeyE)]);

        assert!(!line.advanced(&press));
        assert!(line.advanced(&press));
    }

    #[test]
    fn click_and_tap_advance() {
        let mut line = DialogLine::text("hi");
        line.advanced(&tracker(&[]));

        assert!(!line.advanced(&tracker(&[])));
        assert!(line.advanced(&tracker(&[InputEvent::MouseButtonDown(MouseButton::Left)])));

        let mut line = DialogLine::text("hi");
        line.advanced(&tracker(&[]));
        assert!(line.advanced(&tracker(&[InputEvent::TouchStarted { id: 1, x: 0.0, y: 0.0 }])));
    }
}
