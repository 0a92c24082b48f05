//=========================================================================
// Note Catch
//=========================================================================
//
// Catch seven falling notes with the player.
//
// Flow:
//   begin → minigame loop + first note
//   wave timer (700–1500 ms) → next note, until seven have been sent
//   note hits the catch box → caught += 1
//   note reaches the floor  → replacement note 350 ms later (uncounted)
//   seventh catch → 350 ms → loop restored, solved
//
// The player walks at 1.5× speed and cannot jump while catching.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::Duration;

//=== External Crates =====================================================

use log::debug;
use rand::Rng;

//=== Internal Dependencies ===============================================

use super::PuzzleStatus;
use crate::core::audio::{MusicTrack, SoundEffect};
use crate::core::geometry::Rect;
use crate::core::globals::GlobalContext;
use crate::core::scene::{Pose, Sprite, Stage};
use crate::core::timer::Timers;
use crate::game::actor::Walker;
use crate::game::room::RoomPuzzle;

//=== Constants ===========================================================

pub const NOTES_TO_CATCH: u32 = 7;
pub const NOTE_SIZE: f32 = 60.0;

const WALK_MULTIPLIER: f32 = 1.5;

/// Notes below this distance from the stage bottom are lost.
const FLOOR_MARGIN: f32 = 30.0;

/// The upper part of the player sprite that does not catch.
const CATCH_INSET: f32 = 60.0;

const WAVE_MIN_MS: u64 = 700;
const WAVE_MAX_MS: u64 = 1500;
const REPLACEMENT_DELAY: Duration = Duration::from_millis(350);
const COMPLETION_DELAY: Duration = Duration::from_millis(350);

//=== Note ================================================================

#[derive(Debug, Clone, PartialEq)]
struct Note {
    rect: Rect,
    speed: f32,
}

enum NoteEvent {
    /// Next counted note.
    Wave,
    /// Replacement for a lost note.
    Replacement,
    Complete,
}

//=== NoteCatch ===========================================================

pub struct NoteCatch {
    notes: Vec<Note>,
    /// Counted notes sent so far.
    sent: u32,
    caught: u32,
    finishing: bool,
    timers: Timers<NoteEvent>,
}

impl NoteCatch {
    pub fn caught(&self) -> u32 {
        self.caught
    }

    /// Notes currently falling.
    pub fn notes(&self) -> impl Iterator<Item = Rect> + '_ {
        self.notes.iter().map(|note| note.rect)
    }

    fn spawn(&mut self, ctx: &mut GlobalContext) {
        let (width, _) = ctx.stage_size();
        let x = ctx.rng.gen_range(0.0..(width - NOTE_SIZE).max(1.0));
        let speed = 4.0 + ctx.rng.gen::<f32>() * 3.0;

        self.notes.push(Note {
            rect: Rect::new(x, -NOTE_SIZE, NOTE_SIZE, NOTE_SIZE),
            speed,
        });
    }

    /// Sends the next counted note and queues the one after it.
    fn send_wave(&mut self, ctx: &mut GlobalContext) {
        self.spawn(ctx);
        self.sent += 1;
        if self.sent < NOTES_TO_CATCH {
            let delay = ctx.rng.gen_range(WAVE_MIN_MS..=WAVE_MAX_MS);
            self.timers.schedule(Duration::from_millis(delay), NoteEvent::Wave);
        }
    }

    fn catch_box(walker: &Walker, stage_height: f32) -> Rect {
        let body = walker.sprite(Pose::Collecting).rect(stage_height);
        Rect::new(body.x, body.y + CATCH_INSET, body.width, body.height - CATCH_INSET)
    }

    fn hud_line(&self) -> String {
        match self.caught {
            0 => format!("ПОДБЕРИ {} нот 🎵", NOTES_TO_CATCH),
            n if n >= NOTES_TO_CATCH => "Готово!".to_string(),
            n => format!("ПОДОБРАНО: {} / {} нот 🎵", n, NOTES_TO_CATCH),
        }
    }
}

impl RoomPuzzle for NoteCatch {
    fn begin(ctx: &mut GlobalContext) -> Self {
        ctx.audio.switch_loop(MusicTrack::Minigame);

        let mut puzzle = Self {
            notes: Vec::new(),
            sent: 0,
            caught: 0,
            finishing: false,
            timers: Timers::new(),
        };
        puzzle.send_wave(ctx);
        puzzle
    }

    fn update(&mut self, ctx: &mut GlobalContext, walker: &mut Walker) -> PuzzleStatus {
        for event in self.timers.advance(ctx.clock.delta) {
            match event {
                NoteEvent::Wave => self.send_wave(ctx),
                NoteEvent::Replacement => self.spawn(ctx),
                NoteEvent::Complete => {
                    ctx.audio.restore_loop();
                    return PuzzleStatus::Solved;
                }
            }
        }

        walker.walk(ctx.controls.held, WALK_MULTIPLIER);

        if self.finishing {
            return PuzzleStatus::Running;
        }

        let (_, height) = ctx.stage_size();
        let catcher = Self::catch_box(walker, height);
        let floor = height - FLOOR_MARGIN;

        let mut caught = 0;
        let mut lost = 0;
        self.notes.retain_mut(|note| {
            note.rect.y += note.speed;
            if note.rect.intersects(&catcher) {
                caught += 1;
                false
            } else if note.rect.y > floor {
                lost += 1;
                false
            } else {
                true
            }
        });

        for _ in 0..caught {
            self.caught += 1;
            ctx.audio.play(SoundEffect::Collect);
            debug!("Note caught ({}/{})", self.caught.min(NOTES_TO_CATCH), NOTES_TO_CATCH);
        }
        for _ in 0..lost {
            self.timers.schedule(REPLACEMENT_DELAY, NoteEvent::Replacement);
        }

        if self.caught >= NOTES_TO_CATCH {
            self.caught = NOTES_TO_CATCH;
            self.finishing = true;
            self.notes.clear();
            self.timers.cancel_all();
            self.timers.schedule(COMPLETION_DELAY, NoteEvent::Complete);
        }

        PuzzleStatus::Running
    }

    fn render(&self, _ctx: &GlobalContext, stage: &mut Stage) {
        stage.hud.push(self.hud_line());
        stage.hud.push(format!("{} / {}", self.caught, NOTES_TO_CATCH));

        for (i, note) in self.notes.iter().enumerate() {
            stage.push(Sprite::new(format!("note:{}", i), note.rect));
        }
    }

    fn cleanup(&mut self, ctx: &mut GlobalContext) {
        self.timers.cancel_all();
        ctx.audio.restore_loop();
    }

    fn pose(&self) -> Pose {
        Pose::Collecting
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
