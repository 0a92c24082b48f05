//=========================================================================
// Corridor Scene
//=========================================================================
//
// The transit corridor after the cutscene (registered as "scene2").
//
// The player stands in the middle asking where to go. The first key,
// click or tap removes the question and starts the music; walking into
// either edge leads to the first wizard, entering from that side.
//
//=========================================================================

use log::info;

use crate::core::globals::GlobalContext;
use crate::core::input::TouchOptions;
use crate::core::scene::{Pose, Scene, SceneError, SceneId, SceneParams, Stage};
use crate::game::actor::Walker;

pub const QUESTION: &str = "НУ И ГДЕ МОИ ПОДАРКИ?! КУДА ТЕПЕРЬ ИДТИ - НАЛЕВО ИЛИ НАПРАВО?";

const SPAWN_X: f32 = 800.0;

pub struct CorridorScene {
    walker: Walker,
    awake: bool,
    leaving: bool,
}

impl CorridorScene {
    pub fn new() -> Self {
        Self {
            walker: Walker::default(),
            awake: false,
            leaving: false,
        }
    }

    pub fn walker(&self) -> &Walker {
        &self.walker
    }
}

impl Default for CorridorScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for CorridorScene {
    fn init(&mut self, ctx: &mut GlobalContext, _params: &SceneParams) -> Result<(), SceneError> {
        let (width, height) = ctx.stage_size();
        self.walker = Walker::spawn(SceneId::Corridor, SPAWN_X, width, height)?;

        ctx.show_touch_controls(TouchOptions {
            include_jump: true,
            include_interact: false,
        });
        Ok(())
    }

    fn render(&self, _ctx: &GlobalContext, stage: &mut Stage) {
        stage.clear();
        stage.background = Some("corridor");
        stage.player = Some(self.walker.sprite(Pose::Normal));
        if !self.awake {
            stage.bubble = Some(QUESTION.to_string());
        }
    }

    fn update(&mut self, ctx: &mut GlobalContext) {
        if !self.awake && ctx.input_state.any_input_pressed() {
            self.awake = true;
            ctx.audio.start_loop();
        }

        if self.awake && !self.leaving {
            if let Some(side) = self.walker.roam(ctx.controls.held, &mut ctx.audio) {
                self.leaving = true;
                info!("Corridor left through the {} edge", side.name());
                ctx.request_scene(SceneId::Wizard01, SceneParams::exit(side));
            }
        }

        self.walker.fall();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
