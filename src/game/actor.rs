//=========================================================================
// Actors
//=========================================================================
//
// The walking player and the NPC it talks to.
//
// `Walker` wraps the physics state of one scene visit together with the
// stage bounds it was spawned into. NPCs stand in the middle of the stage
// and are reached when the player is within 0.6 actor widths of them.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::audio::{Audio, SoundEffect};
use crate::core::input::{Control, ControlSet};
use crate::core::physics::{self, Bounds, PhysicsState, Side, PLAYER_WIDTH};
use crate::core::scene::{ActorSprite, Pose, SceneError, SceneId, Stage};

//=== Constants ===========================================================

pub const PLAYER_ARTWORK: &str = "player";

/// Interaction radius as a fraction of the actor width.
pub const NPC_REACH_FACTOR: f32 = 0.6;

/// Left edge of an NPC standing in the middle of the stage.
pub fn npc_x(stage_width: f32) -> f32 {
    (stage_width - PLAYER_WIDTH) / 2.0
}

/// NPC sprite at the centre of the stage.
pub fn npc_sprite(artwork: &'static str, stage_width: f32) -> ActorSprite {
    Stage::actor(artwork, npc_x(stage_width), 0.0, false)
}

//=== Walker ==============================================================

#[derive(Debug, Clone)]
pub struct Walker {
    pub physics: PhysicsState,
    bounds: Bounds,
}

impl Walker {
    /// Places the player at `x` on a stage `stage_width` wide.
    ///
    /// Fails when the stage cannot fit a single actor.
    pub fn spawn(scene: SceneId, x: f32, stage_width: f32, stage_height: f32) -> Result<Self, SceneError> {
        if stage_width < PLAYER_WIDTH {
            return Err(SceneError::StageTooSmall {
                scene,
                width: stage_width,
                height: stage_height,
            });
        }

        let bounds = Bounds::for_stage(stage_width);
        Ok(Self {
            physics: PhysicsState::at(bounds.clamp(x)),
            bounds,
        })
    }

    //--- Movement ---------------------------------------------------------

    /// One frame of horizontal movement. Returns the bound being touched.
    pub fn walk(&mut self, held: ControlSet, speed_multiplier: f32) -> Option<Side> {
        physics::step(&mut self.physics, held, self.bounds, speed_multiplier)
    }

    /// Starts a jump if requested, with its sound.
    pub fn jump(&mut self, held: ControlSet, audio: &mut Audio) -> bool {
        let jumped = physics::try_jump(&mut self.physics, held);
        if jumped {
            audio.play(SoundEffect::Jump);
        }
        jumped
    }

    pub fn fall(&mut self) {
        physics::apply_gravity(&mut self.physics);
    }

    /// Full free-roam frame: walk, jump, fall.
    pub fn roam(&mut self, held: ControlSet, audio: &mut Audio) -> Option<Side> {
        let hit = self.walk(held, 1.0);
        self.jump(held, audio);
        hit
    }

    //--- Queries ----------------------------------------------------------

    pub fn x(&self) -> f32 {
        self.physics.position_x
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Side the player is pushing against, if standing on a bound and
    /// holding the direction towards it.
    pub fn pushing_against(&self, held: ControlSet) -> Option<Side> {
        let x = self.physics.position_x;
        if held.contains(Control::MoveLeft) && x <= self.bounds.left {
            Some(Side::Left)
        } else if held.contains(Control::MoveRight) && x >= self.bounds.right {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// Whether the player stands within reach of an NPC at `npc_x`.
    pub fn is_near(&self, npc_x: f32) -> bool {
        (self.physics.position_x - npc_x).abs() < PLAYER_WIDTH * NPC_REACH_FACTOR
    }

    pub fn sprite(&self, pose: Pose) -> ActorSprite {
        ActorSprite {
            pose,
            ..Stage::actor(
                PLAYER_ARTWORK,
                self.physics.position_x,
                self.physics.vertical_offset,
                self.physics.facing_left,
            )
        }
    }
}

impl Default for Walker {
    fn default() -> Self {
        let bounds = Bounds::for_stage(crate::core::config::STAGE_WIDTH);
        Self {
            physics: PhysicsState::default(),
            bounds,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
