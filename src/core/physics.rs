//=========================================================================
// Platformer Physics
//=========================================================================
//
// Per-frame integration for a single side-scrolling actor.
//
// Units are stage units per frame. The core thread ticks at a fixed rate,
// so one call of `step()` / `apply_gravity()` equals one frame.
//
// Frame order used by the scenes:
//   try_jump() → step() → apply_gravity() → render
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::{Control, ControlSet};

//=== Constants ===========================================================

/// Width of the player sprite. Also the right-hand inset of the walk area.
pub const PLAYER_WIDTH: f32 = 320.0;

/// Height of the player sprite.
pub const PLAYER_HEIGHT: f32 = 320.0;

/// Distance between the stage bottom and the actors' feet.
pub const GROUND_LINE: f32 = 80.0;

/// Downward acceleration in units/frame².
pub const GRAVITY: f32 = 0.8;

/// Horizontal speed in units/frame before scene multipliers.
pub const MOVE_SPEED: f32 = 4.0;

/// Initial upward velocity of a jump.
pub const JUMP_IMPULSE: f32 = 15.0;

//=== Side ================================================================

/// A horizontal boundary of the stage.
///
/// Used both for "which bound did the actor hit" and for the exit side
/// carried into the next scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

//=== Bounds ==============================================================

/// Inclusive horizontal range for the actor's left edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
}

impl Bounds {
    /// Walkable range on a stage of the given width.
    ///
    /// Narrow stages collapse to `[0, 0]` instead of producing an
    /// inverted range.
    pub fn for_stage(width: f32) -> Self {
        Self {
            left: 0.0,
            right: (width - PLAYER_WIDTH).max(0.0),
        }
    }

    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.left, self.right)
    }
}

//=== PhysicsState ========================================================

/// Position and velocity of one actor.
///
/// Owned by the scene instance and dropped with it.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsState {
    /// Left edge in stage units.
    pub position_x: f32,

    /// Height above the ground line. Never negative.
    pub vertical_offset: f32,

    pub is_jumping: bool,
    pub jump_velocity: f32,
    pub facing_left: bool,
}

impl PhysicsState {
    /// Creates a grounded actor at `x`, facing right.
    pub fn at(x: f32) -> Self {
        Self {
            position_x: x,
            vertical_offset: 0.0,
            is_jumping: false,
            jump_velocity: 0.0,
            facing_left: false,
        }
    }

    /// Returns `true` when standing on the ground line.
    pub fn is_grounded(&self) -> bool {
        !self.is_jumping && self.vertical_offset == 0.0
    }
}

impl Default for PhysicsState {
    fn default() -> Self {
        Self::at(0.0)
    }
}

//=== Integration =========================================================

/// Applies one frame of horizontal movement.
///
/// Left is processed before right, so holding both ends the frame facing
/// right. Returns the side whose bound the actor is touching after the
/// move, if any.
pub fn step(
    state: &mut PhysicsState,
    controls: ControlSet,
    bounds: Bounds,
    speed_multiplier: f32,
) -> Option<Side> {
    let speed = MOVE_SPEED * speed_multiplier;
    let mut hit = None;

    if controls.contains(Control::MoveLeft) {
        state.position_x = (state.position_x - speed).max(bounds.left);
        state.facing_left = true;
        if state.position_x == bounds.left {
            hit = Some(Side::Left);
        }
    }

    if controls.contains(Control::MoveRight) {
        state.position_x = (state.position_x + speed).min(bounds.right);
        state.facing_left = false;
        if state.position_x == bounds.right {
            hit = Some(Side::Right);
        }
    }

    hit
}

/// Integrates one frame of vertical motion while airborne.
///
/// A no-op for a grounded actor.
pub fn apply_gravity(state: &mut PhysicsState) {
    if !state.is_jumping {
        return;
    }

    state.vertical_offset += state.jump_velocity;
    state.jump_velocity -= GRAVITY;

    if state.vertical_offset <= 0.0 {
        state.vertical_offset = 0.0;
        state.jump_velocity = 0.0;
        state.is_jumping = false;
    }
}

/// Starts a jump if the jump control is held and the actor is grounded.
///
/// Returns `true` only on the frame the jump begins.
pub fn try_jump(state: &mut PhysicsState, controls: ControlSet) -> bool {
    if controls.contains(Control::Jump) && !state.is_jumping {
        state.is_jumping = true;
        state.jump_velocity = JUMP_IMPULSE;
        return true;
    }
    false
}

/// Spawn x for an actor entering through the side opposite to `exit_side`.
///
/// Leaving a room through the left edge puts the player at the right edge
/// of the next one, and vice versa. No exit side means the left edge.
pub fn spawn_position(exit_side: Option<Side>, stage_width: f32) -> f32 {
    match exit_side {
        Some(Side::Left) => Bounds::for_stage(stage_width).right,
        _ => 0.0,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
