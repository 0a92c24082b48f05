//=========================================================================
// Scene System
//=========================================================================
//
// One active scene at a time, swapped through timed transitions.
//
// Architecture:
//   SceneManager
//     ├─ factories: HashMap<SceneId, SceneFactory>
//     ├─ active: Option<(SceneId, Box<dyn Scene>)>
//     ├─ timers: Timers<TransitionStep> (exit 600 ms / enter 300 ms)
//     └─ stage: Stage
//
// Flow:
//   update() → timers → Scene::update() → Scene::render() → requests
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;
use crate::core::physics::Side;

//=== Module Declarations =================================================

mod scene_manager;
pub mod stage;
mod transition_queue;

//=== Public API ==========================================================

pub use scene_manager::{SceneManager, TransitionState, ENTER_DURATION, EXIT_DURATION};
pub use stage::{ActorSprite, DialogBox, Link, Pose, Sprite, Stage, TransitionPhase};
pub use transition_queue::{SceneRequest, TransitionQueue};

//=== SceneId =============================================================

/// Registered scene names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    Start,
    /// The transit corridor between the start screen and the first room.
    Corridor,
    Wizard01,
    Wizard02,
    Wizard03,
    Chest,
}

impl SceneId {
    pub const ALL: [SceneId; 6] = [
        Self::Start,
        Self::Corridor,
        Self::Wizard01,
        Self::Wizard02,
        Self::Wizard03,
        Self::Chest,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Corridor => "scene2",
            Self::Wizard01 => "wizard01",
            Self::Wizard02 => "wizard02",
            Self::Wizard03 => "wizard03",
            Self::Chest => "chest",
        }
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SceneId {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| SceneError::Unknown(s.to_string()))
    }
}

//=== SceneParams =========================================================

/// Parameters handed to `Scene::init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SceneParams {
    /// Side the player left the previous scene through.
    pub exit_side: Option<Side>,
}

impl SceneParams {
    pub fn exit(side: Side) -> Self {
        Self {
            exit_side: Some(side),
        }
    }
}

//=== SceneError ==========================================================

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    #[error("scene '{0}' is not registered")]
    Unknown(String),

    #[error("stage {width}x{height} is too small for scene '{scene}'")]
    StageTooSmall {
        scene: SceneId,
        width: f32,
        height: f32,
    },

    #[error("scene '{scene}' failed to initialize: {reason}")]
    Init { scene: SceneId, reason: String },
}

//=== Scene Trait =========================================================

/// A self-contained screen with its own state machine.
///
/// A fresh instance is built for every load, so state never leaks from one
/// visit to the next.
///
/// # Lifecycle
///
/// 1. `init` once, with the transition parameters
/// 2. `render` right after a successful `init`
/// 3. `update` then `render` every tick while active
/// 4. `cleanup` before the scene is replaced (or after a failed `init`)
pub trait Scene: Send {
    /// Sets up scene state. An error aborts the load.
    fn init(&mut self, ctx: &mut GlobalContext, params: &SceneParams) -> Result<(), SceneError>;

    /// Draws the scene's current state onto the stage.
    fn render(&self, ctx: &GlobalContext, stage: &mut Stage);

    /// Advances the scene by one frame.
    fn update(&mut self, ctx: &mut GlobalContext);

    /// Releases anything that would outlive the scene (timers, loops).
    ///
    /// Default implementation does nothing.
    fn cleanup(&mut self, _ctx: &mut GlobalContext) {}
}

//=========================================================================
// Unit Tests
//=========================================================================
