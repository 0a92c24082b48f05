//=========================================================================
// Puzzles
//=========================================================================
//
// The puzzle each NPC hands out, independent of the room around it.
//
// - `notes`: catch seven falling notes (Wizard01)
// - `sorting`: sort ten orders into two bins (Wizard02)
// - `quiz`: single-answer question (Wizard03)
// - `combination`: three clue words into three blanks (Chest)
//
// Wrong answers are not errors. They come back as `Verdict::Wrong` and
// the puzzle shows feedback and stays open.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod combination;
pub mod notes;
pub mod quiz;
pub mod sorting;

//=== Public API ==========================================================

pub use combination::Combination;
pub use notes::NoteCatch;
pub use quiz::Quiz;
pub use sorting::DocumentSort;

//=== Shared Types ========================================================

/// Outcome of one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Wrong,
}

impl Verdict {
    pub fn from_bool(correct: bool) -> Self {
        if correct {
            Self::Correct
        } else {
            Self::Wrong
        }
    }
}

/// Puzzle state after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleStatus {
    Running,
    Solved,
}
