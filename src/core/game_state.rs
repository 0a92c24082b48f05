//=========================================================================
// Game State
//=========================================================================
//
// Session-wide progress record.
//
// Owned by GlobalContext and handed to whichever scene is active, so there
// is exactly one writer at a time. Puzzle and clue flags only ever go
// from false to true; `reset()` is the single way back.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, HashSet};

use log::info;

//=== Internal Dependencies ===============================================

use crate::core::physics::Side;
use crate::core::scene::SceneId;

//=== Identifiers =========================================================

/// Puzzles that gate progress through the rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PuzzleId {
    Wizard01,
    Wizard02,
    Wizard03,
    Chest,
}

impl PuzzleId {
    pub const ALL: [PuzzleId; 4] = [Self::Wizard01, Self::Wizard02, Self::Wizard03, Self::Chest];
}

/// Clue tokens awarded by the wizards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClueColor {
    Red,
    Gold,
    Black,
}

impl ClueColor {
    pub const ALL: [ClueColor; 3] = [Self::Red, Self::Gold, Self::Black];

    pub fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Gold => "gold",
            Self::Black => "black",
        }
    }
}

/// Gift cards on the start screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GiftId {
    First,
    Second,
}

impl GiftId {
    pub const ALL: [GiftId; 2] = [Self::First, Self::Second];
}

//=== GameState ===========================================================

/// Progress for one play session.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Scene most recently loaded by the scene manager.
    pub current_scene: SceneId,

    /// Side the player left the previous room through.
    pub exit_side: Option<Side>,

    puzzles: HashMap<PuzzleId, bool>,
    collected_clues: HashMap<ClueColor, bool>,

    /// Gift cards currently selected. The start screen enables its button
    /// at two selections; the set itself does not cap the count.
    pub selected_gifts: HashSet<GiftId>,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            current_scene: SceneId::Start,
            exit_side: None,
            puzzles: PuzzleId::ALL.iter().map(|&id| (id, false)).collect(),
            collected_clues: ClueColor::ALL.iter().map(|&c| (c, false)).collect(),
            selected_gifts: HashSet::new(),
        }
    }

    /// Restores every field to its default.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    //--- Puzzles ----------------------------------------------------------

    pub fn complete_puzzle(&mut self, id: PuzzleId) {
        if let Some(done) = self.puzzles.get_mut(&id) {
            if !*done {
                info!("Puzzle {:?} completed", id);
            }
            *done = true;
        }
    }

    pub fn is_puzzle_complete(&self, id: PuzzleId) -> bool {
        self.puzzles.get(&id).copied().unwrap_or(false)
    }

    //--- Clues ------------------------------------------------------------

    pub fn collect_clue(&mut self, color: ClueColor) {
        if let Some(have) = self.collected_clues.get_mut(&color) {
            if !*have {
                info!("Clue {} collected", color.name());
            }
            *have = true;
        }
    }

    pub fn has_clue(&self, color: ClueColor) -> bool {
        self.collected_clues.get(&color).copied().unwrap_or(false)
    }

    /// Returns `true` once red, gold and black have all been collected.
    pub fn has_all_clues(&self) -> bool {
        ClueColor::ALL.iter().all(|&c| self.has_clue(c))
    }

    //--- Gifts ------------------------------------------------------------

    /// Adds or removes a gift from the selection. Returns the new state.
    pub fn toggle_gift(&mut self, gift: GiftId) -> bool {
        if self.selected_gifts.remove(&gift) {
            false
        } else {
            self.selected_gifts.insert(gift);
            true
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
