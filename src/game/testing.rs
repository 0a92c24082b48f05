//=========================================================================
// Scene Test Harness
//=========================================================================
//
// Drives a single scene frame by frame without the manager, the platform
// or the core thread.
//
// A frame runs the same steps as the core loop: clock tick, input
// mapping, `Scene::update`, `Scene::render`. Frames are 20 ms and the RNG
// is seeded, so runs are reproducible.
//
//=========================================================================

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::core::audio::recording::{AudioCall, RecordingBackend};
use crate::core::audio::Audio;
use crate::core::config::GameConfig;
use crate::core::globals::GlobalContext;
use crate::core::input::{InputEvent, InputSystem, KeyCode, MouseButton, TouchId};
use crate::core::scene::{Scene, SceneError, SceneParams, SceneRequest, Stage};

pub(crate) const FRAME: Duration = Duration::from_millis(20);

pub(crate) struct SceneHarness<S> {
    pub scene: S,
    pub ctx: GlobalContext,
    pub stage: Stage,
    input: InputSystem,
    calls: Arc<Mutex<Vec<AudioCall>>>,
}

impl<S: Scene> SceneHarness<S> {
    pub fn new(scene: S) -> Self {
        Self::with_config(scene, GameConfig { seed: Some(7), ..GameConfig::default() })
    }

    pub fn with_config(scene: S, config: GameConfig) -> Self {
        let (backend, calls) = RecordingBackend::new(false);
        let ctx = GlobalContext::new(config, Audio::new(Box::new(backend)), FRAME);
        let stage = Stage::new(ctx.config.stage_width, ctx.config.stage_height);

        Self {
            scene,
            ctx,
            stage,
            input: InputSystem::new(),
            calls,
        }
    }

    /// Loads the scene the way the manager does.
    pub fn enter(&mut self, params: SceneParams) -> Result<(), SceneError> {
        if params.exit_side.is_some() {
            self.ctx.game_state.exit_side = params.exit_side;
        }
        self.scene.init(&mut self.ctx, &params)?;
        self.scene.render(&self.ctx, &mut self.stage);
        Ok(())
    }

    //--- Frames -----------------------------------------------------------

    pub fn frame(&mut self, events: Vec<InputEvent>) {
        self.ctx.clock.tick();
        self.ctx.controls =
            self.input
                .process_frame(&mut self.ctx.input_state, &mut self.ctx.touch_controls, &[events]);
        self.scene.update(&mut self.ctx);
        self.scene.render(&self.ctx, &mut self.stage);
    }

    pub fn idle(&mut self, frames: usize) {
        for _ in 0..frames {
            self.frame(Vec::new());
        }
    }

    /// Idles for at least `duration`.
    pub fn wait(&mut self, duration: Duration) {
        let frames = duration.as_millis().div_ceil(FRAME.as_millis());
        self.idle(frames as usize);
    }

    //--- Gestures ---------------------------------------------------------

    /// Holds `key` for `frames` frames (at least one), then releases it.
    pub fn hold(&mut self, key: KeyCode, frames: usize) {
        self.frame(vec![InputEvent::KeyDown(key)]);
        self.idle(frames.saturating_sub(1));
        self.frame(vec![InputEvent::KeyUp(key)]);
    }

    pub fn press(&mut self, key: KeyCode) {
        self.hold(key, 1);
    }

    pub fn click(&mut self, x: f32, y: f32) {
        self.frame(vec![
            InputEvent::MouseMoved { x, y },
            InputEvent::MouseButtonDown(MouseButton::Left),
        ]);
        self.frame(vec![InputEvent::MouseButtonUp(MouseButton::Left)]);
    }

    /// Clicks the centre of the sprite with this key.
    pub fn click_sprite(&mut self, key: &str) {
        let (x, y) = self.center_of(key);
        self.click(x, y);
    }

    /// Mouse drag over three frames: press, move, release.
    pub fn drag(&mut self, from: (f32, f32), to: (f32, f32)) {
        self.frame(vec![
            InputEvent::MouseMoved { x: from.0, y: from.1 },
            InputEvent::MouseButtonDown(MouseButton::Left),
        ]);
        self.frame(vec![InputEvent::MouseMoved { x: to.0, y: to.1 }]);
        self.frame(vec![InputEvent::MouseButtonUp(MouseButton::Left)]);
    }

    /// Drags one sprite's centre onto another's.
    pub fn drag_sprite(&mut self, from: &str, to: &str) {
        let start = self.center_of(from);
        let end = self.center_of(to);
        self.drag(start, end);
    }

    pub fn tap(&mut self, id: TouchId, x: f32, y: f32) {
        self.frame(vec![InputEvent::TouchStarted { id, x, y }]);
        self.frame(vec![InputEvent::TouchEnded { id, x, y }]);
    }

    //--- Observations -----------------------------------------------------

    pub fn center_of(&self, key: &str) -> (f32, f32) {
        self.stage
            .sprite(key)
            .unwrap_or_else(|| panic!("no sprite '{key}' on stage"))
            .rect
            .center()
    }

    pub fn requests(&mut self) -> Vec<SceneRequest> {
        self.ctx.scene_requests.take()
    }

    pub fn audio_calls(&self) -> Vec<AudioCall> {
        self.calls.lock().unwrap().clone()
    }
}
