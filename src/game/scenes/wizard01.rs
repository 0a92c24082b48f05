//=========================================================================
// Wizard01: the note catcher
//=========================================================================

use crate::core::game_state::{ClueColor, PuzzleId};
use crate::core::scene::SceneId;
use crate::game::puzzles::NoteCatch;
use crate::game::room::{Room, RoomScript};

pub static SCRIPT: RoomScript = RoomScript {
    scene: SceneId::Wizard01,
    puzzle: PuzzleId::Wizard01,
    background: "wizard01_room",
    npc_artwork: "wizard01",
    greeting: "Привет, Саша! Представляешь, в голове вертится песня! Но не могу ноты ПОДОБРАТЬ, поможешь?",
    tip: "Ну точно! Спасибо! Кстати, я должен дать тебе подсказку - это BLUTEGE.",
    clue: ClueColor::Red,
    farewell: "ЙЕЕЕ РОЦК! Можешь идти дальше!",
    next: SceneId::Wizard02,
};

pub type Wizard01Scene = Room<NoteCatch>;

pub fn scene() -> Wizard01Scene {
    Room::new(&SCRIPT)
}

//=========================================================================
// Unit Tests
//=========================================================================
