//=========================================================================
// Drag & Drop
//=========================================================================
//
// One drag interface, two input adapters.
//
// Architecture:
//   StateTracker ─┬─ PointerDrag (mouse press / release)
//                 └─ TouchDrag   (touch start / end, tracked by id)
//                        ↓
//                 DropSurface::item_at / target_at (scene hit testing)
//                        ↓
//                 DragEvent (Lifted / Dropped / Released)
//
// `Drag::for_device` picks the adapter from the touch-device flag, so
// puzzle code is written once against `DragInput`.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::event::{MouseButton, TouchId};
use super::state_tracker::StateTracker;

//=== DropSurface =========================================================

/// Hit testing for draggable items and their drop targets.
pub trait DropSurface {
    type Item: Copy;
    type Target: Copy;

    /// Item under the given stage position, if it can be picked up.
    fn item_at(&self, x: f32, y: f32) -> Option<Self::Item>;

    /// Drop target under the given stage position.
    fn target_at(&self, x: f32, y: f32) -> Option<Self::Target>;
}

//=== DragEvent ===========================================================

/// Outcome of one frame of drag input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent<I, T> {
    /// Item picked up; it follows the pointer until dropped.
    Lifted(I),

    /// Item let go over a target.
    Dropped { item: I, target: T },

    /// Item let go away from every target.
    Released(I),
}

//=== DragInput ===========================================================

/// A source of drag gestures.
pub trait DragInput<I: Copy> {
    /// Advances the gesture with this frame's input.
    ///
    /// A press and release within the same frame yields the drop directly.
    fn poll<S>(&mut self, input: &StateTracker, surface: &S) -> Option<DragEvent<I, S::Target>>
    where
        S: DropSurface<Item = I>;

    /// Item currently carried.
    fn held(&self) -> Option<I>;

    /// Where the carried item is, for drawing it under the finger/cursor.
    fn position(&self, input: &StateTracker) -> Option<(f32, f32)>;

    /// Drops the carried item without producing an event.
    fn cancel(&mut self);
}

fn release_at<S: DropSurface>(
    surface: &S,
    item: S::Item,
    (x, y): (f32, f32),
) -> DragEvent<S::Item, S::Target> {
    match surface.target_at(x, y) {
        Some(target) => DragEvent::Dropped { item, target },
        None => DragEvent::Released(item),
    }
}

//=== PointerDrag =========================================================

/// Mouse-driven drag: left press lifts, left release drops.
#[derive(Debug, Clone)]
pub struct PointerDrag<I> {
    held: Option<I>,
}

impl<I> PointerDrag<I> {
    pub fn new() -> Self {
        Self { held: None }
    }
}

impl<I> Default for PointerDrag<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Copy> DragInput<I> for PointerDrag<I> {
    fn poll<S>(&mut self, input: &StateTracker, surface: &S) -> Option<DragEvent<I, S::Target>>
    where
        S: DropSurface<Item = I>,
    {
        let position = input.mouse_position();

        match self.held {
            None if input.is_button_pressed(MouseButton::Left) => {
                let item = surface.item_at(position.0, position.1)?;
                if input.is_button_released(MouseButton::Left) {
                    return Some(release_at(surface, item, position));
                }
                self.held = Some(item);
                Some(DragEvent::Lifted(item))
            }
            Some(item) if input.is_button_released(MouseButton::Left) => {
                self.held = None;
                Some(release_at(surface, item, position))
            }
            _ => None,
        }
    }

    fn held(&self) -> Option<I> {
        self.held
    }

    fn position(&self, input: &StateTracker) -> Option<(f32, f32)> {
        self.held.map(|_| input.mouse_position())
    }

    fn cancel(&mut self) {
        self.held = None;
    }
}

//=== TouchDrag ===========================================================

/// Touch-driven drag following a single finger.
#[derive(Debug, Clone)]
pub struct TouchDrag<I> {
    held: Option<(TouchId, I)>,
    last_position: (f32, f32),
}

impl<I> TouchDrag<I> {
    pub fn new() -> Self {
        Self {
            held: None,
            last_position: (0.0, 0.0),
        }
    }
}

impl<I> Default for TouchDrag<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Copy> DragInput<I> for TouchDrag<I> {
    fn poll<S>(&mut self, input: &StateTracker, surface: &S) -> Option<DragEvent<I, S::Target>>
    where
        S: DropSurface<Item = I>,
    {
        match self.held {
            None => {
                let (id, item, start) = input
                    .touches_started()
                    .iter()
                    .find_map(|&(id, x, y)| surface.item_at(x, y).map(|item| (id, item, (x, y))))?;

                self.last_position = start;
                if let Some(&(_, x, y)) = input.touches_ended().iter().find(|t| t.0 == id) {
                    return Some(release_at(surface, item, (x, y)));
                }
                self.held = Some((id, item));
                Some(DragEvent::Lifted(item))
            }
            Some((id, item)) => {
                if let Some(position) = input.touch_position(id) {
                    self.last_position = position;
                }
                let &(_, x, y) = input.touches_ended().iter().find(|t| t.0 == id)?;
                self.held = None;
                Some(release_at(surface, item, (x, y)))
            }
        }
    }

    fn held(&self) -> Option<I> {
        self.held.map(|(_, item)| item)
    }

    fn position(&self, input: &StateTracker) -> Option<(f32, f32)> {
        let (id, _) = self.held?;
        Some(input.touch_position(id).unwrap_or(self.last_position))
    }

    fn cancel(&mut self) {
        self.held = None;
    }
}

//=== Drag ================================================================

/// Adapter chosen by input device.
#[derive(Debug, Clone)]
pub enum Drag<I> {
    Pointer(PointerDrag<I>),
    Touch(TouchDrag<I>),
}

impl<I> Drag<I> {
    pub fn for_device(touch_device: bool) -> Self {
        if touch_device {
            Self::Touch(TouchDrag::new())
        } else {
            Self::Pointer(PointerDrag::new())
        }
    }
}

impl<I: Copy> DragInput<I> for Drag<I> {
    fn poll<S>(&mut self, input: &StateTracker, surface: &S) -> Option<DragEvent<I, S::Target>>
    where
        S: DropSurface<Item = I>,
    {
        match self {
            Self::Pointer(drag) => drag.poll(input, surface),
            Self::Touch(drag) => drag.poll(input, surface),
        }
    }

    fn held(&self) -> Option<I> {
        match self {
            Self::Pointer(drag) => drag.held(),
            Self::Touch(drag) => drag.held(),
        }
    }

    fn position(&self, input: &StateTracker) -> Option<(f32, f32)> {
        match self {
            Self::Pointer(drag) => drag.position(input),
            Self::Touch(drag) => drag.position(input),
        }
    }

    fn cancel(&mut self) {
        match self {
            Self::Pointer(drag) => drag.cancel(),
            Self::Touch(drag) => drag.cancel(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
