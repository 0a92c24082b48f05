//=========================================================================
// Scenes
//=========================================================================
//
// Every scene the game registers, in play order:
//
//   start → scene2 (corridor) → wizard01 → wizard02 → wizard03 → chest
//
// The three wizard rooms share `Room`; each module here only supplies
// its script and puzzle.
//
//=========================================================================

pub mod chest;
pub mod corridor;
pub mod start;
pub mod wizard01;
pub mod wizard02;
pub mod wizard03;

pub use chest::ChestScene;
pub use corridor::CorridorScene;
pub use start::StartScene;
pub use wizard01::Wizard01Scene;
pub use wizard02::Wizard02Scene;
pub use wizard03::Wizard03Scene;
