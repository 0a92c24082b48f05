//=========================================================================
// Input Buffer
//
// Collects input events between two frame boundaries and splits them
// into two categories: discrete and continuous.
//
// Responsibilities:
// - Keep discrete inputs (keys, buttons, touch start/end) in arrival order
// - Coalesce continuous inputs (cursor and finger movement)
// - Hand the frame over to the platform via `drain()`
//
// Notes:
// The core thread applies the discrete batch before the continuous one.
// A button press or touch end therefore first settles the pending
// movement of the same pointer, so the press lands where the pointer was.
//=========================================================================

//=== Standard Library Imports ============================================
use std::collections::HashSet;

//=== Internal Modules ====================================================
use crate::core::input::event::InputEvent;

//=== InputBuffer Struct ==================================================
//
// Internally maintains:
// - `discrete`: one-shot inputs (e.g., KeyDown, TouchStarted)
// - `continuous`: last-known position per pointer (mouse, each finger)
//
pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: HashSet<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    //
    // Preallocates capacity to minimize reallocations per frame.
    //
    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 128;
        const CONTINUOUS_BASE: usize = 16;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: HashSet::with_capacity(CONTINUOUS_BASE),
        }
    }

    //--- Continuous Event Handling ---------------------------------------
    //
    // The latest movement replaces any previous one for the same pointer.
    //
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        self.continuous.replace(event);
    }

    //--- Discrete Event Handling -----------------------------------------
    //
    // Appends a discrete input. Duplicate consecutive events are ignored
    // (key repeat arrives as repeated KeyDown).
    //
    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if let Some(pending) = self.pending_motion_for(&event) {
            self.discrete.push(pending);
        }

        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns `(discrete, continuous)` for this frame, or `None` when
    // nothing was buffered.
    //
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }

        let discrete = std::mem::take(&mut self.discrete);
        let continuous = self.continuous.drain().collect();
        Some((discrete, continuous))
    }

    //--- Utilities --------------------------------------------------------
    pub(crate) fn len(&self) -> usize {
        self.discrete.len() + self.continuous.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }

    //--- Internal Helpers -------------------------------------------------

    /// Takes the coalesced movement of the pointer `event` belongs to.
    fn pending_motion_for(&mut self, event: &InputEvent) -> Option<InputEvent> {
        let key = match event {
            InputEvent::MouseButtonDown(_) | InputEvent::MouseButtonUp(_) => {
                InputEvent::MouseMoved { x: 0.0, y: 0.0 }
            }
            InputEvent::TouchEnded { id, .. } => InputEvent::TouchMoved { id: *id, x: 0.0, y: 0.0 },
            _ => return None,
        };
        self.continuous.take(&key)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
