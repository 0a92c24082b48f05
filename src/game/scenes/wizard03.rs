//=========================================================================
// Wizard03: the tax quiz
//=========================================================================

use crate::core::game_state::{ClueColor, PuzzleId};
use crate::core::scene::SceneId;
use crate::game::puzzles::Quiz;
use crate::game::room::{Room, RoomScript};

pub static SCRIPT: RoomScript = RoomScript {
    scene: SceneId::Wizard03,
    puzzle: PuzzleId::Wizard03,
    background: "wizard03_room",
    npc_artwork: "wizard03",
    greeting: "О, Саша, слава богу ты здесь! Надо срочно ответить на письмо из Финанзамт!",
    tip: "Ну конечно! Спасибо тебе! Последняя подсказка - SCHWARZ",
    clue: ClueColor::Black,
    farewell: "Отлично! Осталось совсем чуть-чуть! Не отступай!",
    next: SceneId::Chest,
};

pub type Wizard03Scene = Room<Quiz>;

pub fn scene() -> Wizard03Scene {
    Room::new(&SCRIPT)
}

//=========================================================================
// Unit Tests
//=========================================================================
