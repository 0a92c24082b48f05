//=========================================================================
// Wizard Room
//=========================================================================
//
// The scene shape shared by the three wizard rooms.
//
// State machine:
// ```text
//   Roaming ──E near NPC──> Greeting ──any input──> Puzzle
//                                                     │ solved
//   Solved <──token landed── AwaitingClue <──any input── Tip
//     │
//     └─ push against a bound ──> next scene (exit side)
// ```
//
// A room that is entered with its puzzle already complete starts in
// `Solved`. While roaming or solved the player walks and jumps freely;
// interacting with the wizard after the puzzle shows a short farewell.
//
// Every delayed effect lives in the room's own `Timers`, which die with
// the room instance.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::Duration;

//=== External Crates =====================================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::actor::{npc_sprite, npc_x, Walker};
use super::collectible::ClueToken;
use super::dialog::DialogLine;
use super::puzzles::PuzzleStatus;
use crate::core::audio::SoundEffect;
use crate::core::game_state::{ClueColor, PuzzleId};
use crate::core::globals::GlobalContext;
use crate::core::input::{Control, TouchOptions};
use crate::core::physics::spawn_position;
use crate::core::scene::{DialogBox, Pose, Scene, SceneError, SceneId, SceneParams, Stage};
use crate::core::timer::{TimerId, Timers};

//=== Constants ===========================================================

/// How long the farewell line stays up.
pub const FAREWELL_DURATION: Duration = Duration::from_millis(2000);

//=== RoomPuzzle ==========================================================

/// A puzzle hosted by a [`Room`].
///
/// Built when the greeting is dismissed and dropped once solved.
pub trait RoomPuzzle: Send + Sized {
    fn begin(ctx: &mut GlobalContext) -> Self;

    /// One frame of the puzzle. The player is handed over for puzzles
    /// played on foot.
    fn update(&mut self, ctx: &mut GlobalContext, walker: &mut Walker) -> PuzzleStatus;

    fn render(&self, ctx: &GlobalContext, stage: &mut Stage);

    /// Called when the room is left with the puzzle still open.
    fn cleanup(&mut self, _ctx: &mut GlobalContext) {}

    fn pose(&self) -> Pose {
        Pose::Normal
    }
}

//=== RoomScript ==========================================================

/// Everything that differs between wizard rooms apart from the puzzle.
#[derive(Debug)]
pub struct RoomScript {
    pub scene: SceneId,
    pub puzzle: PuzzleId,
    pub background: &'static str,
    pub npc_artwork: &'static str,
    pub greeting: &'static str,
    /// Line shown after the puzzle; contains the clue word.
    pub tip: &'static str,
    pub clue: ClueColor,
    pub farewell: &'static str,
    pub next: SceneId,
}

//=== RoomPhase ===========================================================

/// Observable phase of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomPhase {
    Roaming,
    Greeting,
    Puzzle,
    Tip,
    AwaitingClue,
    Solved,
}

enum Phase<P> {
    Roaming,
    Greeting(DialogLine),
    Puzzle(P),
    Tip(DialogLine),
    AwaitingClue(ClueToken),
    Solved,
}

impl<P> Phase<P> {
    fn public(&self) -> RoomPhase {
        match self {
            Self::Roaming => RoomPhase::Roaming,
            Self::Greeting(_) => RoomPhase::Greeting,
            Self::Puzzle(_) => RoomPhase::Puzzle,
            Self::Tip(_) => RoomPhase::Tip,
            Self::AwaitingClue(_) => RoomPhase::AwaitingClue,
            Self::Solved => RoomPhase::Solved,
        }
    }
}

enum RoomEvent {
    HideFarewell,
}

//=== Room ================================================================

pub struct Room<P> {
    script: &'static RoomScript,
    walker: Walker,
    npc_x: f32,
    phase: Phase<P>,
    farewell: Option<TimerId>,
    timers: Timers<RoomEvent>,
    leaving: bool,
}

impl<P: RoomPuzzle> Room<P> {
    pub fn new(script: &'static RoomScript) -> Self {
        Self {
            script,
            walker: Walker::default(),
            npc_x: 0.0,
            phase: Phase::Roaming,
            farewell: None,
            timers: Timers::new(),
            leaving: false,
        }
    }

    pub fn phase(&self) -> RoomPhase {
        self.phase.public()
    }

    pub fn walker(&self) -> &Walker {
        &self.walker
    }

    #[cfg(test)]
    pub(crate) fn walker_mut(&mut self) -> &mut Walker {
        &mut self.walker
    }

    /// The open puzzle, if any.
    pub fn puzzle(&self) -> Option<&P> {
        match &self.phase {
            Phase::Puzzle(puzzle) => Some(puzzle),
            _ => None,
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn is_free(&self) -> bool {
        matches!(self.phase, Phase::Roaming | Phase::Solved)
    }

    fn show_farewell(&mut self) {
        if let Some(id) = self.farewell.take() {
            self.timers.cancel(id);
        }
        self.farewell = Some(self.timers.schedule(FAREWELL_DURATION, RoomEvent::HideFarewell));
    }

    /// Free-roam frame: movement, interaction and exits.
    fn roam(&mut self, ctx: &mut GlobalContext) {
        let controls = ctx.controls;
        self.walker.roam(controls.held, &mut ctx.audio);

        if controls.pressed.contains(Control::Interact) && self.walker.is_near(self.npc_x) {
            ctx.audio.play(SoundEffect::Interact);
            match self.phase {
                Phase::Roaming => {
                    self.phase = Phase::Greeting(DialogLine::text(self.script.greeting));
                }
                _ => self.show_farewell(),
            }
        }

        if matches!(self.phase, Phase::Solved) && !self.leaving {
            if let Some(side) = self.walker.pushing_against(controls.held) {
                self.leaving = true;
                debug!("Leaving '{}' through the {} edge", self.script.scene, side.name());
                ctx.request_scene(self.script.next, SceneParams::exit(side));
            }
        }
    }
}

//=== Scene Implementation ================================================

impl<P: RoomPuzzle> Scene for Room<P> {
    fn init(&mut self, ctx: &mut GlobalContext, params: &SceneParams) -> Result<(), SceneError> {
        let (width, height) = ctx.stage_size();
        let side = params.exit_side.or(ctx.game_state.exit_side);

        self.walker = Walker::spawn(self.script.scene, spawn_position(side, width), width, height)?;
        self.npc_x = npc_x(width);
        self.phase = if ctx.game_state.is_puzzle_complete(self.script.puzzle) {
            Phase::Solved
        } else {
            Phase::Roaming
        };

        ctx.show_touch_controls(TouchOptions {
            include_jump: true,
            include_interact: true,
        });
        Ok(())
    }

    fn render(&self, ctx: &GlobalContext, stage: &mut Stage) {
        stage.clear();
        stage.background = Some(self.script.background);
        stage.npc = Some(npc_sprite(self.script.npc_artwork, stage.width()));

        let pose = match &self.phase {
            Phase::Puzzle(puzzle) => puzzle.pose(),
            Phase::AwaitingClue(_) => Pose::HandsUp,
            _ => Pose::Normal,
        };
        stage.player = Some(self.walker.sprite(pose));

        match &self.phase {
            Phase::Roaming | Phase::Solved => {
                if self.walker.is_near(self.npc_x) {
                    stage.prompt = Some(ctx.prompt_label().to_string());
                }
                if self.farewell.is_some() {
                    stage.dialog = Some(DialogBox::text(self.script.farewell));
                }
            }
            Phase::Greeting(line) | Phase::Tip(line) => stage.dialog = Some(line.dialog().clone()),
            Phase::Puzzle(puzzle) => puzzle.render(ctx, stage),
            Phase::AwaitingClue(token) => stage.push(token.sprite()),
        }
    }

    fn update(&mut self, ctx: &mut GlobalContext) {
        for event in self.timers.advance(ctx.clock.delta) {
            match event {
                RoomEvent::HideFarewell => self.farewell = None,
            }
        }

        if self.is_free() {
            self.roam(ctx);
        }

        let script = self.script;
        let next = match &mut self.phase {
            Phase::Roaming | Phase::Solved => None,

            Phase::Greeting(line) => line
                .advanced(&ctx.input_state)
                .then(|| Phase::Puzzle(P::begin(ctx))),

            Phase::Puzzle(puzzle) => match puzzle.update(ctx, &mut self.walker) {
                PuzzleStatus::Running => None,
                PuzzleStatus::Solved => Some(Phase::Tip(DialogLine::new(DialogBox {
                    highlight: Some(script.clue),
                    ..DialogBox::text(script.tip)
                }))),
            },

            Phase::Tip(line) => line.advanced(&ctx.input_state).then(|| {
                let player = self.walker.sprite(Pose::HandsUp);
                Phase::AwaitingClue(ClueToken::above(script.clue, &player, ctx.config.stage_height))
            }),

            Phase::AwaitingClue(token) => {
                if token.update(&ctx.input_state, ctx.clock.delta) {
                    ctx.game_state.collect_clue(token.color());
                    ctx.game_state.complete_puzzle(script.puzzle);
                    Some(Phase::Solved)
                } else {
                    None
                }
            }
        };

        if let Some(phase) = next {
            debug!("Room '{}': {:?} -> {:?}", script.scene, self.phase.public(), phase.public());
            self.phase = phase;
        }

        self.walker.fall();
    }

    fn cleanup(&mut self, ctx: &mut GlobalContext) {
        self.timers.cancel_all();
        self.farewell = None;
        if let Phase::Puzzle(puzzle) = &mut self.phase {
            puzzle.cleanup(ctx);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;
    use crate::core::physics::Side;
    use crate::game::testing::SceneHarness;

    //--- Test Puzzle ------------------------------------------------------

    /// Solves itself on its second frame.
    struct Instant {
        frames: u32,
    }

    impl RoomPuzzle for Instant {
        fn begin(_ctx: &mut GlobalContext) -> Self {
            Self { frames: 0 }
        }

        fn update(&mut self, _ctx: &mut GlobalContext, _walker: &mut Walker) -> PuzzleStatus {
            self.frames += 1;
            if self.frames >= 2 {
                PuzzleStatus::Solved
            } else {
                PuzzleStatus::Running
            }
        }

        fn render(&self, _ctx: &GlobalContext, stage: &mut Stage) {
            stage.hud.push("instant".to_string());
        }
    }

    static SCRIPT: RoomScript = RoomScript {
        scene: SceneId::Wizard02,
        puzzle: PuzzleId::Wizard02,
        background: "room",
        npc_artwork: "wizard",
        greeting: "hello",
        tip: "the word is GOLDEN",
        clue: ClueColor::Gold,
        farewell: "bye",
        next: SceneId::Wizard03,
    };

    fn room() -> SceneHarness<Room<Instant>> {
        let mut harness = SceneHarness::new(Room::new(&SCRIPT));
        harness.enter(SceneParams::default()).unwrap();
        harness
    }

    /// Walks from the left edge into reach of the wizard.
    fn walk_to_wizard(harness: &mut SceneHarness<Room<Instant>>) {
        harness.hold(KeyCode::ArrowRight, 160);
        assert!(harness.scene.walker().is_near(800.0));
    }

    fn solve(harness: &mut SceneHarness<Room<Instant>>) {
        walk_to_wizard(harness);
        harness.press(KeyCode::KeyE);
        harness.press(KeyCode::Enter);
        harness.idle(2);
        assert_eq!(harness.scene.phase(), RoomPhase::Tip);
        harness.press(KeyCode::Enter);
        assert_eq!(harness.scene.phase(), RoomPhase::AwaitingClue);

        let token = harness.stage.sprite("token:gold").unwrap().rect;
        harness.click(token.center().0, token.center().1);
        harness.wait(Duration::from_millis(600));
    }

    //--- Interaction ------------------------------------------------------

    #[test]
    fn interact_far_from_wizard_does_nothing() {
        let mut harness = room();
        harness.press(KeyCode::KeyE);

        assert_eq!(harness.scene.phase(), RoomPhase::Roaming);
        assert!(harness.stage.prompt.is_none());
    }

    #[test]
    fn prompt_appears_in_reach() {
        let mut harness = room();
        walk_to_wizard(&mut harness);

        assert_eq!(harness.stage.prompt.as_deref(), Some("Press E"));
    }

    #[test]
    fn greeting_then_puzzle() {
        let mut harness = room();
        walk_to_wizard(&mut harness);

        harness.press(KeyCode::KeyE);
        assert_eq!(harness.scene.phase(), RoomPhase::Greeting);
        assert_eq!(harness.stage.dialog.as_ref().unwrap().text, "hello");

        harness.press(KeyCode::Enter);
        assert_eq!(harness.scene.phase(), RoomPhase::Puzzle);
    }

    #[test]
    fn full_flow_collects_clue_and_completes() {
        let mut harness = room();
        solve(&mut harness);

        assert_eq!(harness.scene.phase(), RoomPhase::Solved);
        assert!(harness.ctx.game_state.has_clue(ClueColor::Gold));
        assert!(harness.ctx.game_state.is_puzzle_complete(PuzzleId::Wizard02));
        assert!(harness.stage.sprite("token:gold").is_none());
    }

    #[test]
    fn tip_highlights_the_clue() {
        let mut harness = room();
        walk_to_wizard(&mut harness);
        harness.press(KeyCode::KeyE);
        harness.press(KeyCode::Enter);
        harness.idle(2);

        let dialog = harness.stage.dialog.as_ref().unwrap();
        assert_eq!(dialog.highlight, Some(ClueColor::Gold));
    }

    //--- Exits ------------------------------------------------------------

    #[test]
    fn no_exit_before_solving() {
        let mut harness = room();
        harness.hold(KeyCode::ArrowLeft, 10);

        assert!(harness.requests().is_empty());
    }

    #[test]
    fn exit_after_solving_requests_next_room_once() {
        let mut harness = room();
        solve(&mut harness);

        harness.hold(KeyCode::ArrowLeft, 200);
        let requests = harness.requests();

        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].id, SceneId::Wizard03);
        assert_eq!(requests[0].params.exit_side, Some(Side::Left));
    }

    #[test]
    fn revisit_starts_solved() {
        let mut harness = SceneHarness::new(Room::<Instant>::new(&SCRIPT));
        harness.ctx.game_state.complete_puzzle(PuzzleId::Wizard02);
        harness.enter(SceneParams::default()).unwrap();

        assert_eq!(harness.scene.phase(), RoomPhase::Solved);
    }

    //--- Farewell ---------------------------------------------------------

    #[test]
    fn farewell_hides_after_two_seconds() {
        let mut harness = room();
        solve(&mut harness);
        assert!(harness.scene.walker().is_near(800.0));

        harness.press(KeyCode::KeyE);
        assert_eq!(harness.stage.dialog.as_ref().unwrap().text, "bye");
        assert_eq!(harness.scene.phase(), RoomPhase::Solved);

        harness.wait(FAREWELL_DURATION);
        assert!(harness.stage.dialog.is_none());
    }

    //--- Lifecycle --------------------------------------------------------

    #[test]
    fn spawn_side_follows_exit() {
        let mut harness = SceneHarness::new(Room::<Instant>::new(&SCRIPT));
        harness.enter(SceneParams::exit(Side::Left)).unwrap();

        assert_eq!(harness.scene.walker().x(), 1600.0);
    }

    #[test]
    fn narrow_stage_fails_init() {
        let config = crate::core::config::GameConfig {
            stage_width: 100.0,
            ..Default::default()
        };
        let mut harness = SceneHarness::with_config(Room::<Instant>::new(&SCRIPT), config);

        assert!(matches!(
            harness.enter(SceneParams::default()),
            Err(SceneError::StageTooSmall { .. })
        ));
    }
}
