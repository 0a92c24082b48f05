//=========================================================================
// Game
//=========================================================================
//
// The scenes and puzzles of the game, built on top of `core`.
//
// - `actor`: the player walker and NPC placement
// - `dialog`, `collectible`: dialog lines and the clue token
// - `puzzles`: one puzzle per NPC
// - `room`: the shared wizard room state machine
// - `scenes`: everything `register_scenes` hands to the manager
//
//=========================================================================

//=== Module Declarations =================================================

pub mod actor;
pub mod collectible;
pub mod dialog;
pub mod puzzles;
pub mod room;
pub mod scenes;

#[cfg(test)]
pub(crate) mod testing;

//=== Internal Imports ====================================================

use crate::core::scene::{SceneId, SceneManager};
use scenes::{wizard01, wizard02, wizard03, ChestScene, CorridorScene, StartScene};

//=== Registration ========================================================

/// Registers every scene, with the start screen as the default.
pub fn register_scenes(manager: &mut SceneManager) {
    manager.register_default(SceneId::Start, StartScene::new);
    manager.register_scene(SceneId::Corridor, CorridorScene::new);
    manager.register_scene(SceneId::Wizard01, wizard01::scene);
    manager.register_scene(SceneId::Wizard02, wizard02::scene);
    manager.register_scene(SceneId::Wizard03, wizard03::scene);
    manager.register_scene(SceneId::Chest, ChestScene::new);
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::audio::Audio;
    use crate::core::config::GameConfig;
    use crate::core::globals::GlobalContext;
    use crate::game::testing::FRAME;

    #[test]
    fn every_scene_is_registered() {
        let mut manager = SceneManager::new(1920.0, 1200.0);
        register_scenes(&mut manager);

        for id in SceneId::ALL {
            assert!(manager.is_registered(id), "{} missing", id);
        }
    }

    #[test]
    fn start_screen_comes_first() {
        let mut manager = SceneManager::new(1920.0, 1200.0);
        let mut ctx = GlobalContext::new(GameConfig::default(), Audio::silent(), FRAME);
        register_scenes(&mut manager);
        manager.start(&mut ctx);

        assert_eq!(manager.current(), Some(SceneId::Start));
    }
}
