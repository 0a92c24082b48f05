//=========================================================================
// Stage
//=========================================================================
//
// View model of everything on screen.
//
// The scene manager owns one Stage. Scenes redraw it from their own state
// in `Scene::render`, starting with `clear()`. The transition overlay is
// the manager's and survives `clear()`.
//
// Coordinates are stage units: 1920×1200 by default, top-left origin.
// Actor sprites are placed by left edge and distance from the stage
// bottom, the way the platformer physics sees them.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::game_state::ClueColor;
use crate::core::geometry::Rect;
use crate::core::input::TouchButton;
use crate::core::physics::{GROUND_LINE, PLAYER_HEIGHT, PLAYER_WIDTH};

//=== View Types ==========================================================

/// Full-screen transition overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    /// Pixelated zoom-out while the old scene leaves.
    Out,
    /// Fade-in as the new scene appears.
    In,
}

/// Player artwork variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pose {
    #[default]
    Normal,
    /// Catching falling notes.
    Collecting,
    /// Arms raised, holding a clue token.
    HandsUp,
}

/// An actor drawn on the ground line.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorSprite {
    pub artwork: &'static str,
    pub x: f32,
    /// Distance from the stage bottom to the actor's feet.
    pub bottom: f32,
    pub facing_left: bool,
    pub pose: Pose,
}

impl ActorSprite {
    /// Screen rectangle on a stage of the given height.
    pub fn rect(&self, stage_height: f32) -> Rect {
        Rect::new(
            self.x,
            stage_height - self.bottom - PLAYER_HEIGHT,
            PLAYER_WIDTH,
            PLAYER_HEIGHT,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub url: String,
}

/// Modal dialog box.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DialogBox {
    pub title: Option<String>,
    pub text: String,
    /// Clue word shown highlighted in its colour.
    pub highlight: Option<ClueColor>,
    pub link: Option<Link>,
}

impl DialogBox {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Any other positioned element: notes, cards, bins, buttons, particles.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Element key, `kind` or `kind:detail` (e.g. `card:3`, `blank:0`).
    pub key: String,
    pub rect: Rect,
    pub label: Option<String>,
    pub highlighted: bool,
}

impl Sprite {
    pub fn new(key: impl Into<String>, rect: Rect) -> Self {
        Self {
            key: key.into(),
            rect,
            label: None,
            highlighted: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn highlighted(mut self, on: bool) -> Self {
        self.highlighted = on;
        self
    }
}

//=== Stage ===============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    width: f32,
    height: f32,

    pub transition: Option<TransitionPhase>,
    pub background: Option<&'static str>,
    pub player: Option<ActorSprite>,
    pub npc: Option<ActorSprite>,

    /// Proximity prompt above the NPC.
    pub prompt: Option<String>,

    /// Speech bubble above the player.
    pub bubble: Option<String>,

    pub dialog: Option<DialogBox>,

    /// One-line puzzle feedback ("wrong bin", quiz error, ...).
    pub feedback: Option<String>,

    /// Shake animation on the active puzzle or the whole screen.
    pub shake: bool,

    pub hud: Vec<String>,
    pub sprites: Vec<Sprite>,
    pub touch_buttons: Vec<TouchButton>,
}

impl Stage {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            transition: None,
            background: None,
            player: None,
            npc: None,
            prompt: None,
            bubble: None,
            dialog: None,
            feedback: None,
            shake: false,
            hud: Vec::new(),
            sprites: Vec::new(),
            touch_buttons: Vec::new(),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Removes all scene content. Size and transition overlay are kept.
    pub fn clear(&mut self) {
        *self = Self {
            transition: self.transition,
            ..Self::new(self.width, self.height)
        };
    }

    //--- Drawing Helpers --------------------------------------------------

    /// Places an actor sprite at physics coordinates.
    pub fn actor(artwork: &'static str, x: f32, vertical_offset: f32, facing_left: bool) -> ActorSprite {
        ActorSprite {
            artwork,
            x,
            bottom: GROUND_LINE + vertical_offset,
            facing_left,
            pose: Pose::Normal,
        }
    }

    pub fn push(&mut self, sprite: Sprite) {
        self.sprites.push(sprite);
    }

    //--- Queries ----------------------------------------------------------

    /// First sprite with exactly this key.
    pub fn sprite(&self, key: &str) -> Option<&Sprite> {
        self.sprites.iter().find(|s| s.key == key)
    }

    /// Sprites whose key is `kind` or starts with `kind:`.
    pub fn sprites_of<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Sprite> + 'a {
        self.sprites.iter().filter(move |s| {
            s.key == kind
                || (s.key.len() > kind.len()
                    && s.key.starts_with(kind)
                    && s.key.as_bytes()[kind.len()] == b':')
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
