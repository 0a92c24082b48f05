//=========================================================================
// Wizard02: the order sorter
//=========================================================================

use crate::core::game_state::{ClueColor, PuzzleId};
use crate::core::scene::SceneId;
use crate::game::puzzles::DocumentSort;
use crate::game::room::{Room, RoomScript};

pub static SCRIPT: RoomScript = RoomScript {
    scene: SceneId::Wizard02,
    puzzle: PuzzleId::Wizard02,
    background: "wizard02_room",
    npc_artwork: "wizard02",
    greeting: "Ох, как хорошо что ты здесь, Саша! Все приказы в моей папке перепутались, помоги разобраться!",
    tip: "Фух! Большое спасибо! Вот еще одна подсказка - GOLDEN.",
    clue: ClueColor::Gold,
    farewell: "Иди же дальше!",
    next: SceneId::Wizard03,
};

pub type Wizard02Scene = Room<DocumentSort>;

pub fn scene() -> Wizard02Scene {
    Room::new(&SCRIPT)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;
    use crate::core::physics::Side;
    use crate::core::scene::SceneParams;
    use crate::game::puzzles::sorting::{bin_rect, Bin, DOCUMENTS, WRONG_BIN};
    use crate::game::room::RoomPhase;
    use crate::game::testing::SceneHarness;

    fn at_the_desk() -> SceneHarness<Wizard02Scene> {
        let mut harness = SceneHarness::new(scene());
        harness.enter(SceneParams::exit(Side::Right)).unwrap();
        harness.hold(KeyCode::ArrowRight, 160);
        harness.press(KeyCode::KeyE);
        harness.press(KeyCode::Enter);
        assert_eq!(harness.scene.phase(), RoomPhase::Puzzle);
        harness
    }

    fn file(harness: &mut SceneHarness<Wizard02Scene>, belongs: Bin, into: Bin) {
        for document in DOCUMENTS.iter().filter(|d| d.bin == belongs) {
            let slot = harness.scene.puzzle().and_then(|p| p.card_slot(document.text)).unwrap();
            harness.drag(slot.center(), bin_rect(into).center());
        }
    }

    #[test]
    fn entering_from_the_left_exit_spawns_on_the_right() {
        let mut harness = SceneHarness::new(scene());
        harness.enter(SceneParams::exit(Side::Left)).unwrap();

        assert_eq!(harness.scene.walker().x(), 1600.0);
        assert_eq!(harness.ctx.game_state.exit_side, Some(Side::Left));
    }

    #[test]
    fn rejects_dropped_as_approved_are_not_filed() {
        let mut harness = at_the_desk();
        file(&mut harness, Bin::Reject, Bin::Approve);

        assert_eq!(harness.scene.puzzle().unwrap().filed(), 0);
        assert_eq!(harness.stage.feedback.as_deref(), Some(WRONG_BIN));
        assert_eq!(harness.scene.phase(), RoomPhase::Puzzle);
    }

    #[test]
    fn sorting_everything_hands_over_the_gold_clue() {
        let mut harness = at_the_desk();
        file(&mut harness, Bin::Reject, Bin::Reject);
        file(&mut harness, Bin::Approve, Bin::Approve);

        assert_eq!(harness.scene.phase(), RoomPhase::Tip);
        assert!(!harness.ctx.game_state.is_puzzle_complete(PuzzleId::Wizard02));

        harness.idle(1);
        harness.press(KeyCode::Enter);
        harness.click_sprite("token:gold");
        harness.wait(std::time::Duration::from_millis(600));

        assert!(harness.ctx.game_state.is_puzzle_complete(PuzzleId::Wizard02));
        assert!(harness.ctx.game_state.has_clue(ClueColor::Gold));
        assert_eq!(harness.scene.phase(), RoomPhase::Solved);
    }
}
