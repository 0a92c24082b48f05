//=========================================================================
// Global Context
//=========================================================================
//
// Shared data container for scenes.
//
// Contains state data that scenes read/write:
// - game_state: session progress (puzzles, clues, gifts, exit side)
// - input_state / controls: this frame's input
// - audio, rng, clock: services for the active scene
// - scene_requests: command queue for scene changes
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

//=== Internal Dependencies ===============================================

use crate::core::audio::Audio;
use crate::core::config::GameConfig;
use crate::core::game_state::GameState;
use crate::core::input::{ControlFrame, InputEvent, StateTracker, TouchControls, TouchOptions};
use crate::core::scene::{SceneId, SceneParams, TransitionQueue};

//=== FrameClock ==========================================================

/// Fixed-step frame clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameClock {
    /// Time covered by one tick.
    pub delta: Duration,
    /// Time since the first tick.
    pub elapsed: Duration,
    pub frame: u64,
}

impl FrameClock {
    pub fn new(delta: Duration) -> Self {
        Self {
            delta,
            elapsed: Duration::ZERO,
            frame: 0,
        }
    }

    pub(crate) fn tick(&mut self) {
        self.elapsed += self.delta;
        self.frame += 1;
    }
}

//=== GlobalContext =======================================================

/// Shared context data accessible to scenes during updates.
///
/// Scenes receive `&mut GlobalContext` in `init`, `update` and `cleanup`
/// and `&GlobalContext` in `render`. Only one scene is active at a time,
/// so it is the only writer.
pub struct GlobalContext {
    pub config: GameConfig,

    /// Progress for this session.
    pub game_state: GameState,

    /// Raw input state tracker for pointer and "any key" queries.
    pub input_state: StateTracker,

    /// Controls held and newly pressed this frame.
    pub controls: ControlFrame,

    /// Virtual buttons; empty unless a scene shows them.
    pub touch_controls: TouchControls,

    pub audio: Audio,

    /// Session RNG (seeded from the config when a seed is set).
    pub rng: StdRng,

    pub clock: FrameClock,

    /// Transition queue for scene changes.
    ///
    /// Scenes queue requests here during updates. The scene manager
    /// processes this queue at tick boundaries.
    pub scene_requests: TransitionQueue,

    /// Input events for the current frame.
    ///
    /// Populated from the platform channel and consumed by InputSystem
    /// during the update phase. Not meant for scenes (use `input_state`).
    pub(crate) frame_events: Vec<Vec<InputEvent>>,
}

impl GlobalContext {
    pub(crate) fn new(config: GameConfig, audio: Audio, frame_delta: Duration) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            config,
            game_state: GameState::new(),
            input_state: StateTracker::new(),
            controls: ControlFrame::default(),
            touch_controls: TouchControls::new(),
            audio,
            rng,
            clock: FrameClock::new(frame_delta),
            scene_requests: TransitionQueue::new(),
            frame_events: Vec::new(),
        }
    }

    /// Queues a scene change for the end of this tick.
    pub fn request_scene(&mut self, id: SceneId, params: SceneParams) {
        self.scene_requests.request(id, params);
    }

    pub fn is_touch_device(&self) -> bool {
        self.config.touch_device
    }

    /// Interaction prompt text for this device.
    pub fn prompt_label(&self) -> &str {
        self.config.prompt_label()
    }

    pub fn stage_size(&self) -> (f32, f32) {
        (self.config.stage_width, self.config.stage_height)
    }

    /// Shows virtual controls on touch devices; no-op otherwise.
    pub fn show_touch_controls(&mut self, options: TouchOptions) {
        if self.config.touch_device {
            let (w, h) = self.stage_size();
            self.touch_controls.show(options, w, h);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
