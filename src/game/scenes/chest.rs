//=========================================================================
// Chest Scene
//=========================================================================
//
// The last room: the chest with the combination lock.
//
// State machine:
// ```text
//   Roaming ──E near chest──> Greeting ──any input──> Lock
//                                                      │ right order
//   Opened (victory after 1000 ms, confetti) <─────────┘
// ```
//
// Opening the chest completes the `Chest` puzzle, stops the music and
// freezes the player. Confetti keeps falling until the scene is left.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::Duration;

//=== External Crates =====================================================

use log::info;
use rand::seq::SliceRandom;
use rand::Rng;

//=== Internal Dependencies ===============================================

use crate::core::audio::SoundEffect;
use crate::core::game_state::PuzzleId;
use crate::core::geometry::Rect;
use crate::core::globals::GlobalContext;
use crate::core::input::{Control, TouchOptions};
use crate::core::physics::spawn_position;
use crate::core::scene::{DialogBox, Link, Pose, Scene, SceneError, SceneId, SceneParams, Sprite, Stage};
use crate::core::timer::Timers;
use crate::game::actor::{npc_sprite, npc_x, Walker};
use crate::game::dialog::DialogLine;
use crate::game::puzzles::{Combination, Verdict};

//=== Content =============================================================

pub const GREETING: &str = "А вот и последняя загадка! Подарки уже совсем рядом!";
pub const VICTORY: &str = "ПОЗДРАВЛЯЕМ С ДНЕМ РОЖДЕНИЯ!";
pub const REWARD_LABEL: &str = "ВОТ ТУТ ТВОИ ПОДАРКИ!";

pub const CHEST_CLOSED: &str = "chest_closed";
pub const CHEST_OPENED: &str = "chest_opened";

const VICTORY_DELAY: Duration = Duration::from_millis(1000);

//=== Confetti ============================================================

const CONFETTI_COLORS: [&str; 10] = [
    "#ff595e", "#ffca3a", "#8ac926", "#1982c4", "#6a4c93", "#fdffb6", "#b5ead7", "#f9c74f",
    "#f94144", "#43aa8b",
];

const BURST_SIZE: u32 = 7;
const BURST_INTERVAL: Duration = Duration::from_millis(180);
const BURST_STAGGER: Duration = Duration::from_millis(80);

/// Confetti start this far above the stage and end as far below it.
const CONFETTI_MARGIN: f32 = 32.0;

#[derive(Debug, Clone, PartialEq)]
struct Confetto {
    x: f32,
    drift: f32,
    size: f32,
    color: &'static str,
    age: Duration,
    lifetime: Duration,
}

impl Confetto {
    fn random(rng: &mut impl Rng, stage_width: f32) -> Self {
        Self {
            x: rng.gen_range(0.0..stage_width),
            drift: rng.gen_range(-60.0..60.0),
            size: rng.gen_range(8.0..24.0),
            color: CONFETTI_COLORS.choose(rng).copied().unwrap_or(CONFETTI_COLORS[0]),
            age: Duration::ZERO,
            lifetime: Duration::from_secs_f32(rng.gen_range(2.5..4.5)),
        }
    }

    /// Position on a linear fall from above the stage to below it.
    fn rect(&self, stage_height: f32) -> Rect {
        let t = (self.age.as_secs_f32() / self.lifetime.as_secs_f32()).min(1.0);
        let travel = stage_height + 2.0 * CONFETTI_MARGIN;
        Rect::new(
            self.x + self.drift * t,
            -CONFETTI_MARGIN + travel * t,
            self.size,
            self.size * 0.5,
        )
    }
}

//=== Phases ==============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChestPhase {
    Roaming,
    Greeting,
    Lock,
    Opened,
}

enum Phase {
    Roaming,
    Greeting(DialogLine),
    Lock(Combination),
    Opened { victory: bool },
}

enum ChestEvent {
    ShowVictory,
    Burst,
    Confetto,
}

//=== ChestScene ==========================================================

pub struct ChestScene {
    walker: Walker,
    chest_x: f32,
    phase: Phase,
    confetti: Vec<Confetto>,
    timers: Timers<ChestEvent>,
}

impl ChestScene {
    pub fn new() -> Self {
        Self {
            walker: Walker::default(),
            chest_x: 0.0,
            phase: Phase::Roaming,
            confetti: Vec::new(),
            timers: Timers::new(),
        }
    }

    pub fn phase(&self) -> ChestPhase {
        match self.phase {
            Phase::Roaming => ChestPhase::Roaming,
            Phase::Greeting(_) => ChestPhase::Greeting,
            Phase::Lock(_) => ChestPhase::Lock,
            Phase::Opened { .. } => ChestPhase::Opened,
        }
    }

    pub fn walker(&self) -> &Walker {
        &self.walker
    }

    //--- Finale -----------------------------------------------------------

    fn open(&mut self, ctx: &mut GlobalContext) {
        info!("Chest opened");
        ctx.game_state.complete_puzzle(PuzzleId::Chest);
        ctx.audio.stop_loop();
        ctx.audio.play(SoundEffect::ChestOpen);
        self.phase = Phase::Opened { victory: false };
        self.timers.schedule(VICTORY_DELAY, ChestEvent::ShowVictory);
    }

    fn on_event(&mut self, ctx: &mut GlobalContext, event: ChestEvent) {
        match event {
            ChestEvent::ShowVictory => {
                self.phase = Phase::Opened { victory: true };
                ctx.audio.play(SoundEffect::Victory);
                self.timers.schedule(Duration::ZERO, ChestEvent::Burst);
            }
            ChestEvent::Burst => {
                for i in 0..BURST_SIZE {
                    self.timers.schedule(BURST_STAGGER * i, ChestEvent::Confetto);
                }
                self.timers.schedule(BURST_INTERVAL, ChestEvent::Burst);
            }
            ChestEvent::Confetto => {
                let (width, _) = ctx.stage_size();
                self.confetti.push(Confetto::random(&mut ctx.rng, width));
            }
        }
    }

    fn victory_dialog(ctx: &GlobalContext) -> DialogBox {
        DialogBox {
            link: ctx.config.reward_url.as_ref().map(|url| Link {
                label: REWARD_LABEL.to_string(),
                url: url.clone(),
            }),
            ..DialogBox::text(VICTORY)
        }
    }
}

impl Default for ChestScene {
    fn default() -> Self {
        Self::new()
    }
}

//=== Scene Implementation ================================================

impl Scene for ChestScene {
    fn init(&mut self, ctx: &mut GlobalContext, params: &SceneParams) -> Result<(), SceneError> {
        let (width, height) = ctx.stage_size();
        let side = params.exit_side.or(ctx.game_state.exit_side);

        self.walker = Walker::spawn(SceneId::Chest, spawn_position(side, width), width, height)?;
        self.chest_x = npc_x(width);
        if ctx.game_state.is_puzzle_complete(PuzzleId::Chest) {
            self.phase = Phase::Opened { victory: true };
            self.timers.schedule(Duration::ZERO, ChestEvent::Burst);
        }

        ctx.show_touch_controls(TouchOptions {
            include_jump: true,
            include_interact: true,
        });
        Ok(())
    }

    fn render(&self, ctx: &GlobalContext, stage: &mut Stage) {
        stage.clear();
        stage.background = Some("chest_room");

        let artwork = match self.phase {
            Phase::Opened { .. } => CHEST_OPENED,
            _ => CHEST_CLOSED,
        };
        stage.npc = Some(npc_sprite(artwork, stage.width()));
        stage.player = Some(self.walker.sprite(Pose::Normal));

        match &self.phase {
            Phase::Roaming => {
                if self.walker.is_near(self.chest_x) {
                    stage.prompt = Some(ctx.prompt_label().to_string());
                }
            }
            Phase::Greeting(line) => stage.dialog = Some(line.dialog().clone()),
            Phase::Lock(lock) => lock.render(&ctx.input_state, stage),
            Phase::Opened { victory } => {
                if *victory {
                    stage.dialog = Some(Self::victory_dialog(ctx));
                }
            }
        }

        let height = stage.height();
        for (i, confetto) in self.confetti.iter().enumerate() {
            stage.push(Sprite::new(format!("confetti:{}", i), confetto.rect(height)).with_label(confetto.color));
        }
    }

    fn update(&mut self, ctx: &mut GlobalContext) {
        let dt = ctx.clock.delta;
        for event in self.timers.advance(dt) {
            self.on_event(ctx, event);
        }

        self.confetti.retain_mut(|confetto| {
            confetto.age += dt;
            confetto.age < confetto.lifetime
        });

        let mut opened = false;
        match &mut self.phase {
            Phase::Roaming => {
                self.walker.roam(ctx.controls.held, &mut ctx.audio);
                if ctx.controls.pressed.contains(Control::Interact) && self.walker.is_near(self.chest_x) {
                    ctx.audio.play(SoundEffect::Interact);
                    let mut line = DialogLine::text(GREETING);
                    line.advanced(&ctx.input_state);
                    self.phase = Phase::Greeting(line);
                }
            }
            Phase::Greeting(line) => {
                if line.advanced(&ctx.input_state) {
                    self.phase = Phase::Lock(Combination::new(ctx.is_touch_device()));
                }
            }
            Phase::Lock(lock) => opened = lock.update(&ctx.input_state) == Some(Verdict::Correct),
            Phase::Opened { .. } => {}
        }
        if opened {
            self.open(ctx);
        }

        self.walker.fall();
    }

    fn cleanup(&mut self, _ctx: &mut GlobalContext) {
        self.timers.cancel_all();
        self.confetti.clear();
        if let Phase::Lock(lock) = &mut self.phase {
            lock.cancel();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
