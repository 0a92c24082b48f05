//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use key_to_the_gift::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};

// Configuration and audio
pub use crate::core::audio::{AudioBackend, MusicTrack, SoundEffect};
pub use crate::core::config::GameConfig;

// Global systems and context
pub use crate::core::globals::{GlobalContext, GlobalSystems};

// Input system
pub use crate::core::input::{Control, ControlSet, KeyCode, MouseButton};

// Scene system
pub use crate::core::scene::{Scene, SceneError, SceneId, SceneManager, SceneParams, Stage};

// Progress
pub use crate::core::game_state::{ClueColor, GameState, PuzzleId};
