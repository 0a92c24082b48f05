//=========================================================================
// Controls & Control Mapper
//=========================================================================
//
// Normalized gameplay controls and the key bindings that produce them.
//
// Architecture:
//   KeyCode (held) → ControlMapper (HashMap) → ControlSet
//
// Several keys may drive the same control (ArrowLeft and A both walk
// left). Physics and scenes only ever look at a ControlSet.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::event::KeyCode;
use super::state_tracker::StateTracker;

//=== Control =============================================================

/// A gameplay control, independent of the physical input behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    MoveLeft,
    MoveRight,
    Jump,
    Interact,
}

impl Control {
    pub const ALL: [Control; 4] = [Self::MoveLeft, Self::MoveRight, Self::Jump, Self::Interact];

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

//=== ControlSet ==========================================================

/// Set of controls held (or pressed) during one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlSet {
    bits: u8,
}

impl ControlSet {
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    pub fn insert(&mut self, control: Control) {
        self.bits |= control.bit();
    }

    pub fn remove(&mut self, control: Control) {
        self.bits &= !control.bit();
    }

    pub fn contains(&self, control: Control) -> bool {
        self.bits & control.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn union(self, other: ControlSet) -> ControlSet {
        ControlSet { bits: self.bits | other.bits }
    }

    /// Controls in `self` that are not in `other`.
    pub fn difference(self, other: ControlSet) -> ControlSet {
        ControlSet { bits: self.bits & !other.bits }
    }

    /// Returns `true` if either horizontal direction is held.
    pub fn is_moving(&self) -> bool {
        self.contains(Control::MoveLeft) || self.contains(Control::MoveRight)
    }

    pub fn iter(self) -> impl Iterator<Item = Control> {
        Control::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl FromIterator<Control> for ControlSet {
    fn from_iter<I: IntoIterator<Item = Control>>(iter: I) -> Self {
        let mut set = ControlSet::empty();
        for control in iter {
            set.insert(control);
        }
        set
    }
}

//=== ControlMapper =======================================================

/// Maps held keys to controls via key → control lookups.
pub struct ControlMapper {
    key_bindings: HashMap<KeyCode, Control>,
}

impl ControlMapper {
    /// Creates a mapper with no bindings.
    pub fn new() -> Self {
        Self {
            key_bindings: HashMap::new(),
        }
    }

    /// Creates a mapper with the standard layout: arrows/WASD to move,
    /// Space/Up/W to jump and E to interact.
    pub fn with_defaults() -> Self {
        let mut mapper = Self::new();

        mapper.bind_key(KeyCode::ArrowLeft, Control::MoveLeft);
        mapper.bind_key(KeyCode::KeyA, Control::MoveLeft);
        mapper.bind_key(KeyCode::ArrowRight, Control::MoveRight);
        mapper.bind_key(KeyCode::KeyD, Control::MoveRight);
        mapper.bind_key(KeyCode::Space, Control::Jump);
        mapper.bind_key(KeyCode::ArrowUp, Control::Jump);
        mapper.bind_key(KeyCode::KeyW, Control::Jump);
        mapper.bind_key(KeyCode::KeyE, Control::Interact);

        mapper
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a key to a control, replacing any previous binding of that key.
    pub fn bind_key(&mut self, key: KeyCode, control: Control) {
        self.key_bindings.insert(key, control);
    }

    pub fn unbind_key(&mut self, key: KeyCode) {
        self.key_bindings.remove(&key);
    }

    /// Removes every key bound to `control`.
    pub fn unbind_control(&mut self, control: Control) {
        self.key_bindings.retain(|_, c| *c != control);
    }

    //--- Mapping ----------------------------------------------------------

    pub fn map_key(&self, key: KeyCode) -> Option<Control> {
        self.key_bindings.get(&key).copied()
    }

    /// Controls driven by the keys currently held.
    pub fn held(&self, state: &StateTracker) -> ControlSet {
        state.keys_down().filter_map(|&key| self.map_key(key)).collect()
    }
}

impl Default for ControlMapper {
    fn default() -> Self {
        Self::with_defaults()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
