//=========================================================================
// Clue Token
//=========================================================================
//
// The coloured block a wizard hands over after a solved puzzle.
//
// It appears centred above the player's head and waits for a click or
// tap. Once touched it flies to the HUD corner for 500 ms; the scene
// records the clue when it lands.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::game_state::ClueColor;
use crate::core::geometry::Rect;
use crate::core::input::StateTracker;
use crate::core::physics::{PLAYER_HEIGHT, PLAYER_WIDTH};
use crate::core::scene::{ActorSprite, Sprite};
use crate::core::timer::Timers;

//=== Constants ===========================================================

pub const TOKEN_SIZE: f32 = 60.0;
pub const FLIGHT_DURATION: Duration = Duration::from_millis(500);

/// Gap between the player's head and the token.
const HEAD_GAP: f32 = 10.0;

/// Where tokens fly to (top-left HUD slot).
const HUD_SLOT: (f32, f32) = (0.0, 0.0);

//=== ClueToken ===========================================================

pub struct ClueToken {
    color: ClueColor,
    rect: Rect,
    flight: Option<Timers<()>>,
}

impl ClueToken {
    /// Spawns a token above `player` on a stage `stage_height` tall.
    pub fn above(color: ClueColor, player: &ActorSprite, stage_height: f32) -> Self {
        let x = player.x + (PLAYER_WIDTH - TOKEN_SIZE) / 2.0;
        let bottom = player.bottom + PLAYER_HEIGHT + HEAD_GAP;
        Self {
            color,
            rect: Rect::new(x, stage_height - bottom - TOKEN_SIZE, TOKEN_SIZE, TOKEN_SIZE),
            flight: None,
        }
    }

    /// Advances the token. Returns `true` on the frame it lands.
    pub fn update(&mut self, input: &StateTracker, dt: Duration) -> bool {
        match self.flight.as_mut() {
            None => {
                if let Some((x, y)) = input.pointer_pressed() {
                    if self.rect.contains(x, y) {
                        let mut flight = Timers::new();
                        flight.schedule(FLIGHT_DURATION, ());
                        self.flight = Some(flight);
                    }
                }
                false
            }
            Some(flight) => !flight.advance(dt).is_empty(),
        }
    }

    pub fn color(&self) -> ClueColor {
        self.color
    }

    pub fn is_flying(&self) -> bool {
        self.flight.is_some()
    }

    /// Where the token is drawn right now.
    pub fn current_rect(&self) -> Rect {
        let Some(flight) = &self.flight else {
            return self.rect;
        };

        let t = (flight.now().as_secs_f32() / FLIGHT_DURATION.as_secs_f32()).min(1.0);
        // ease-out
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        self.rect.moved_to(
            self.rect.x + (HUD_SLOT.0 - self.rect.x) * eased,
            self.rect.y + (HUD_SLOT.1 - self.rect.y) * eased,
        )
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::new(format!("token:{}", self.color.name()), self.current_rect())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, MouseButton};
    use crate::core::scene::Stage;

    const FRAME: Duration = Duration::from_millis(20);

    fn tracker(events: &[InputEvent]) -> StateTracker {
        let mut state = StateTracker::new();
        state.clear();
        state.process_events(events);
        state.finalize_frame();
        state
    }

    fn click(x: f32, y: f32) -> StateTracker {
        tracker(&[
            InputEvent::MouseMoved { x, y },
            InputEvent::MouseButtonDown(MouseButton::Left),
        ])
    }

    fn token() -> ClueToken {
        let player = Stage::actor("player", 800.0, 0.0, false);
        ClueToken::above(ClueColor::Red, &player, 1200.0)
    }

    #[test]
    fn spawns_centred_above_head() {
        let rect = token().current_rect();

        assert_eq!(rect.x, 930.0);
        // 1200 - (80 + 320 + 10) - 60
        assert_eq!(rect.y, 730.0);
    }

    #[test]
    fn click_elsewhere_does_nothing() {
        let mut token = token();

        assert!(!token.update(&click(10.0, 10.0), FRAME));
        assert!(!token.is_flying());
    }

    #[test]
    fn lands_after_flight() {
        let mut token = token();
        assert!(!token.update(&click(950.0, 750.0), FRAME));
        assert!(token.is_flying());

        let idle = tracker(&[]);
        let mut frames = 0;
        while !token.update(&idle, FRAME) {
            frames += 1;
            assert!(frames < 100, "token never landed");
        }

        assert_eq!(frames, 24);
        assert_eq!(token.current_rect().x, 0.0);
    }
}
