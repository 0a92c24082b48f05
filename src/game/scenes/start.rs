//=========================================================================
// Start Scene
//=========================================================================
//
// Splash button, gift selection and the kidnap cutscene.
//
// Screens:
//   Splash ──GO──> Loading (2000 ms) ──> Gifts ──get (2 selected)──> Cutscene
//
// Cutscene timeline (from the "get" click):
//   0      shake + explosion
//   500    dragon appears at 30% / 20%
//   1500   dragon grows ×3 to the centre
//   2500   "ХА-ХА!" + evil laugh, gifts attached to the dragon
//   4000   dragon flies off to 120% / 10%
//   5000   load the corridor
//
// Entering this scene resets the session.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::Duration;

//=== External Crates =====================================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::audio::SoundEffect;
use crate::core::game_state::GiftId;
use crate::core::geometry::Rect;
use crate::core::globals::GlobalContext;
use crate::core::scene::{Scene, SceneError, SceneId, SceneParams, Sprite, Stage};
use crate::core::timer::Timers;

//=== Content =============================================================

pub const GO_LABEL: &str = "ПОГНАЛИ";
pub const LOADING_LABEL: &str = "СОБИРАЕМ ПОДАРКИ...";
pub const DRAGON_LINE: &str = "ХА-ХА!";

const LOADING_DURATION: Duration = Duration::from_millis(2000);

//=== Layout ==============================================================

const GO_RECT: Rect = Rect::new(760.0, 700.0, 400.0, 120.0);
const GET_RECT: Rect = Rect::new(760.0, 850.0, 400.0, 120.0);
const GIFT_SIZE: f32 = 400.0;
const DRAGON_SIZE: f32 = 200.0;
const DRAGON_GROWTH: f32 = 3.0;

pub fn gift_rect(gift: GiftId) -> Rect {
    let x = match gift {
        GiftId::First => 460.0,
        GiftId::Second => 1060.0,
    };
    Rect::new(x, 350.0, GIFT_SIZE, GIFT_SIZE)
}

fn gift_key(gift: GiftId) -> &'static str {
    match gift {
        GiftId::First => "gift:first",
        GiftId::Second => "gift:second",
    }
}

//=== Screens =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Splash,
    Loading,
    Gifts,
    Cutscene,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StartEvent {
    ShowGifts,
    DragonAppears,
    DragonGrows,
    DragonLaughs,
    DragonLeaves,
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Dragon {
    rect: Rect,
    laughing: bool,
}

impl Dragon {
    /// Dragon of `size` centred on a point given in stage fractions.
    fn at(stage: (f32, f32), fraction: (f32, f32), size: f32, centred: bool) -> Rect {
        let (x, y) = (stage.0 * fraction.0, stage.1 * fraction.1);
        if centred {
            Rect::new(x - size / 2.0, y - size / 2.0, size, size)
        } else {
            Rect::new(x, y, size, size)
        }
    }
}

//=== StartScene ==========================================================

pub struct StartScene {
    screen: Screen,
    dragon: Option<Dragon>,
    shaking: bool,
    timers: Timers<StartEvent>,
}

impl StartScene {
    pub fn new() -> Self {
        Self {
            screen: Screen::Splash,
            dragon: None,
            shaking: false,
            timers: Timers::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    fn can_get(ctx: &GlobalContext) -> bool {
        ctx.game_state.selected_gifts.len() == 2
    }

    fn on_event(&mut self, ctx: &mut GlobalContext, event: StartEvent) {
        let stage = ctx.stage_size();
        match event {
            StartEvent::ShowGifts => self.screen = Screen::Gifts,
            StartEvent::DragonAppears => {
                self.shaking = false;
                self.dragon = Some(Dragon {
                    rect: Dragon::at(stage, (0.3, 0.2), DRAGON_SIZE, false),
                    laughing: false,
                });
                self.timers.schedule(Duration::from_millis(1000), StartEvent::DragonGrows);
            }
            StartEvent::DragonGrows => {
                if let Some(dragon) = &mut self.dragon {
                    dragon.rect = Dragon::at(stage, (0.5, 0.3), DRAGON_SIZE * DRAGON_GROWTH, true);
                }
                self.timers.schedule(Duration::from_millis(1000), StartEvent::DragonLaughs);
            }
            StartEvent::DragonLaughs => {
                ctx.audio.play(SoundEffect::EvilLaugh);
                if let Some(dragon) = &mut self.dragon {
                    dragon.laughing = true;
                }
                self.timers.schedule(Duration::from_millis(1500), StartEvent::DragonLeaves);
            }
            StartEvent::DragonLeaves => {
                if let Some(dragon) = &mut self.dragon {
                    let size = dragon.rect.width;
                    dragon.rect = Dragon::at(stage, (1.2, 0.1), size, false);
                }
                self.timers.schedule(Duration::from_millis(1000), StartEvent::Leave);
            }
            StartEvent::Leave => {
                info!("Gifts stolen, off to the corridor");
                ctx.request_scene(SceneId::Corridor, SceneParams::default());
            }
        }
    }

    fn click(&mut self, ctx: &mut GlobalContext, x: f32, y: f32) {
        match self.screen {
            Screen::Splash if GO_RECT.contains(x, y) => {
                self.screen = Screen::Loading;
                self.timers.schedule(LOADING_DURATION, StartEvent::ShowGifts);
            }
            Screen::Gifts => {
                if let Some(gift) = GiftId::ALL.into_iter().find(|&g| gift_rect(g).contains(x, y)) {
                    let selected = ctx.game_state.toggle_gift(gift);
                    debug!("Gift {:?} {}", gift, if selected { "selected" } else { "deselected" });
                } else if GET_RECT.contains(x, y) && Self::can_get(ctx) {
                    self.screen = Screen::Cutscene;
                    self.shaking = true;
                    ctx.audio.play(SoundEffect::Explosion);
                    self.timers.schedule(Duration::from_millis(500), StartEvent::DragonAppears);
                }
            }
            _ => {}
        }
    }
}

impl Default for StartScene {
    fn default() -> Self {
        Self::new()
    }
}

//=== Scene Implementation ================================================

impl Scene for StartScene {
    fn init(&mut self, ctx: &mut GlobalContext, _params: &SceneParams) -> Result<(), SceneError> {
        ctx.game_state.reset();
        Ok(())
    }

    fn render(&self, ctx: &GlobalContext, stage: &mut Stage) {
        stage.clear();
        stage.background = Some("start");
        stage.shake = self.shaking;

        match self.screen {
            Screen::Splash => stage.push(Sprite::new("button:go", GO_RECT).with_label(GO_LABEL)),
            Screen::Loading => stage.hud.push(LOADING_LABEL.to_string()),
            Screen::Gifts => {
                for gift in GiftId::ALL {
                    let selected = ctx.game_state.selected_gifts.contains(&gift);
                    stage.push(Sprite::new(gift_key(gift), gift_rect(gift)).highlighted(selected));
                }
                stage.push(Sprite::new("button:get", GET_RECT).highlighted(Self::can_get(ctx)));
            }
            Screen::Cutscene => {
                let Some(dragon) = self.dragon else {
                    return;
                };
                let mut sprite = Sprite::new("dragon", dragon.rect);
                if dragon.laughing {
                    sprite = sprite.with_label(DRAGON_LINE);
                    // the gifts hang below the dragon
                    for (i, gift) in GiftId::ALL.into_iter().enumerate() {
                        let offset = if i == 0 { -60.0 } else { 120.0 };
                        let rect = Rect::new(dragon.rect.x + offset, dragon.rect.y + 70.0, 160.0, 160.0);
                        stage.push(Sprite::new(gift_key(gift), rect));
                    }
                }
                stage.push(sprite);
            }
        }
    }

    fn update(&mut self, ctx: &mut GlobalContext) {
        for event in self.timers.advance(ctx.clock.delta) {
            self.on_event(ctx, event);
        }

        if let Some((x, y)) = ctx.input_state.pointer_pressed() {
            self.click(ctx, x, y);
        }
    }

    fn cleanup(&mut self, _ctx: &mut GlobalContext) {
        self.timers.cancel_all();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::audio::recording::AudioCall;
    use crate::game::testing::SceneHarness;

    fn start() -> SceneHarness<StartScene> {
        let mut harness = SceneHarness::new(StartScene::new());
        harness.enter(SceneParams::default()).unwrap();
        harness
    }

    fn to_gifts(harness: &mut SceneHarness<StartScene>) {
        harness.click_sprite("button:go");
        harness.wait(LOADING_DURATION);
        assert_eq!(harness.scene.screen(), Screen::Gifts);
    }

    fn click_rect(harness: &mut SceneHarness<StartScene>, rect: Rect) {
        let (x, y) = rect.center();
        harness.click(x, y);
    }

    //--- Screens ----------------------------------------------------------

    #[test]
    fn init_resets_the_session() {
        let mut harness = SceneHarness::new(StartScene::new());
        harness.ctx.game_state.collect_clue(crate::core::game_state::ClueColor::Red);
        harness.ctx.game_state.toggle_gift(GiftId::First);

        harness.enter(SceneParams::default()).unwrap();

        assert_eq!(harness.ctx.game_state, crate::core::game_state::GameState::new());
    }

    #[test]
    fn go_shows_loading_then_gifts() {
        let mut harness = start();
        harness.click_sprite("button:go");
        assert_eq!(harness.scene.screen(), Screen::Loading);
        assert_eq!(harness.stage.hud, vec![LOADING_LABEL.to_string()]);

        harness.wait(Duration::from_millis(1900));
        assert_eq!(harness.scene.screen(), Screen::Loading);

        harness.wait(Duration::from_millis(100));
        assert_eq!(harness.scene.screen(), Screen::Gifts);
        assert_eq!(harness.stage.sprites_of("gift").count(), 2);
    }

    #[test]
    fn get_needs_exactly_two_gifts() {
        let mut harness = start();
        to_gifts(&mut harness);

        click_rect(&mut harness, gift_rect(GiftId::First));
        assert!(!harness.stage.sprite("button:get").unwrap().highlighted);
        click_rect(&mut harness, GET_RECT);
        assert_eq!(harness.scene.screen(), Screen::Gifts);

        click_rect(&mut harness, gift_rect(GiftId::Second));
        assert!(harness.stage.sprite("button:get").unwrap().highlighted);
        assert!(harness.stage.sprite("gift:second").unwrap().highlighted);

        click_rect(&mut harness, gift_rect(GiftId::First));
        assert!(!harness.stage.sprite("button:get").unwrap().highlighted);
        assert_eq!(harness.ctx.game_state.selected_gifts.len(), 1);
    }

    //--- Cutscene ---------------------------------------------------------

    #[test]
    fn cutscene_ends_in_the_corridor() {
        let mut harness = start();
        to_gifts(&mut harness);
        click_rect(&mut harness, gift_rect(GiftId::First));
        click_rect(&mut harness, gift_rect(GiftId::Second));

        click_rect(&mut harness, GET_RECT);
        assert_eq!(harness.scene.screen(), Screen::Cutscene);
        assert!(harness.stage.shake);
        assert!(harness.audio_calls().contains(&AudioCall::Effect(SoundEffect::Explosion)));

        harness.wait(Duration::from_millis(500));
        assert!(harness.stage.sprite("dragon").is_some());
        assert!(!harness.stage.shake);

        harness.wait(Duration::from_millis(2000));
        let dragon = harness.stage.sprite("dragon").unwrap();
        assert_eq!(dragon.label.as_deref(), Some(DRAGON_LINE));
        assert_eq!(dragon.rect.width, 600.0);
        assert!(harness.audio_calls().contains(&AudioCall::Effect(SoundEffect::EvilLaugh)));
        assert!(harness.requests().is_empty());

        harness.wait(Duration::from_millis(2500));
        let requests = harness.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].id, SceneId::Corridor);

        harness.idle(100);
        assert!(harness.requests().is_empty());
    }

    #[test]
    fn cleanup_cancels_the_timeline() {
        let mut harness = start();
        harness.click_sprite("button:go");
        harness.scene.cleanup(&mut harness.ctx);

        harness.wait(LOADING_DURATION);
        assert_eq!(harness.scene.screen(), Screen::Loading);
    }
}
