//=========================================================================
// Scene Manager
//=========================================================================
//
// Manages scene registration, loading and timed transitions.
//
// Scenes are registered as factories and built fresh on every load, so
// no state survives between visits. Loading runs as a small state
// machine on the frame clock:
//
//   Idle ──load──> cleanup(old) ──> Exiting (600 ms, overlay Out)
//                                     │
//        ┌────────────────────────────┘
//        ↓
//   clear stage → GameState → init(new) → render → Entering (300 ms, In)
//                                                     │
//   Idle <────────────────────────────────────────────┘
//
// With no active scene (first load) the exit phase is skipped.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::time::Duration;

use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use super::{Scene, SceneId, SceneParams, Stage, TransitionPhase};
use crate::core::globals::GlobalContext;
use crate::core::timer::Timers;

//=== Constants ===========================================================

/// Length of the outgoing (zoom-out) transition.
pub const EXIT_DURATION: Duration = Duration::from_millis(600);

/// Length of the incoming (fade-in) transition.
pub const ENTER_DURATION: Duration = Duration::from_millis(300);

//=== Types ===============================================================

type SceneFactory = Box<dyn Fn() -> Box<dyn Scene> + Send>;

/// Where the manager is in a scene change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionState {
    Idle,
    Exiting,
    Entering,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TransitionStep {
    FinishExit { id: SceneId, params: SceneParams },
    FinishEnter,
}

//=== SceneManager ========================================================

/// Owns the active scene and the stage it draws on.
pub struct SceneManager {
    factories: HashMap<SceneId, SceneFactory>,
    initial: Option<SceneId>,
    active: Option<(SceneId, Box<dyn Scene>)>,
    state: TransitionState,
    timers: Timers<TransitionStep>,
    stage: Stage,
}

impl SceneManager {
    //--- Construction -----------------------------------------------------

    /// Creates a manager with no scenes and an empty stage of the given size.
    pub fn new(stage_width: f32, stage_height: f32) -> Self {
        Self {
            factories: HashMap::new(),
            initial: None,
            active: None,
            state: TransitionState::Idle,
            timers: Timers::new(),
            stage: Stage::new(stage_width, stage_height),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a scene factory under `id`.
    ///
    /// The last registration for an id wins.
    pub fn register_scene<F, S>(&mut self, id: SceneId, factory: F)
    where
        F: Fn() -> S + Send + 'static,
        S: Scene + 'static,
    {
        let boxed: SceneFactory = Box::new(move || Box::new(factory()));
        if self.factories.insert(id, boxed).is_some() {
            warn!("Scene '{}' was already registered and has been replaced", id);
        }
    }

    /// Registers a scene and makes it the one [`start`](Self::start) loads.
    pub fn register_default<F, S>(&mut self, id: SceneId, factory: F)
    where
        F: Fn() -> S + Send + 'static,
        S: Scene + 'static,
    {
        self.register_scene(id, factory);
        debug!("Registered scene '{}' as default", id);
        self.initial = Some(id);
    }

    pub fn is_registered(&self, id: SceneId) -> bool {
        self.factories.contains_key(&id)
    }

    /// Loads the default scene.
    pub fn start(&mut self, ctx: &mut GlobalContext) {
        match self.initial {
            Some(id) => {
                debug!("Starting scene manager with initial scene: {}", id);
                self.load_scene(ctx, id, SceneParams::default());
            }
            None => warn!("No default scene registered, nothing to start"),
        }
    }

    //--- Loading ----------------------------------------------------------

    /// Replaces the active scene with `id`.
    ///
    /// Unregistered ids are logged and ignored. A load requested while the
    /// previous exit transition is still running is ignored as well; a load
    /// during the enter transition cuts it short.
    pub fn load_scene(&mut self, ctx: &mut GlobalContext, id: SceneId, params: SceneParams) {
        if !self.is_registered(id) {
            error!("Scene '{}' not found", id);
            return;
        }

        if self.state == TransitionState::Exiting {
            debug!("Ignoring load of '{}' during exit transition", id);
            return;
        }

        self.timers.cancel_all();

        match self.active.take() {
            Some((old_id, mut old)) => {
                debug!("Leaving scene '{}' for '{}'", old_id, id);
                old.cleanup(ctx);
                ctx.touch_controls.hide();

                self.stage.transition = Some(TransitionPhase::Out);
                self.state = TransitionState::Exiting;
                self.timers.schedule(EXIT_DURATION, TransitionStep::FinishExit { id, params });
            }
            None => self.enter(ctx, id, params),
        }
    }

    /// Loads a scene by its registered name.
    pub fn load_scene_named(&mut self, ctx: &mut GlobalContext, name: &str, params: SceneParams) {
        match name.parse::<SceneId>() {
            Ok(id) => self.load_scene(ctx, id, params),
            Err(e) => error!("{}", e),
        }
    }

    //--- Update Loop ------------------------------------------------------

    /// Advances transitions, runs the active scene for one frame and then
    /// applies any scene requests it queued.
    pub fn update(&mut self, ctx: &mut GlobalContext) {
        for step in self.timers.advance(ctx.clock.delta) {
            match step {
                TransitionStep::FinishExit { id, params } => {
                    self.stage.transition = None;
                    self.enter(ctx, id, params);
                }
                TransitionStep::FinishEnter => {
                    self.stage.transition = None;
                    self.state = TransitionState::Idle;
                }
            }
        }

        if let Some((_, scene)) = self.active.as_mut() {
            scene.update(ctx);
            scene.render(ctx, &mut self.stage);
            self.stage.touch_buttons = ctx.touch_controls.buttons().to_vec();
        }

        self.process_requests(ctx);
    }

    /// Applies queued scene requests in order.
    pub fn process_requests(&mut self, ctx: &mut GlobalContext) {
        for request in ctx.scene_requests.take() {
            self.load_scene(ctx, request.id, request.params);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn current(&self) -> Option<SceneId> {
        self.active.as_ref().map(|(id, _)| *id)
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    //--- Internal Helpers -------------------------------------------------

    fn enter(&mut self, ctx: &mut GlobalContext, id: SceneId, params: SceneParams) {
        let Some(factory) = self.factories.get(&id) else {
            error!("Scene '{}' not found", id);
            self.state = TransitionState::Idle;
            return;
        };
        let mut scene = factory();

        self.stage.clear();
        ctx.game_state.current_scene = id;
        if let Some(side) = params.exit_side {
            ctx.game_state.exit_side = Some(side);
        }

        if let Err(e) = scene.init(ctx, &params) {
            error!("Scene '{}' failed to initialize: {}", id, e);
            scene.cleanup(ctx);
            ctx.touch_controls.hide();
            self.stage.clear();
            self.stage.transition = None;
            self.state = TransitionState::Idle;
            return;
        }

        scene.render(ctx, &mut self.stage);
        self.stage.touch_buttons = ctx.touch_controls.buttons().to_vec();
        info!("Entered scene '{}'", id);

        self.active = Some((id, scene));
        self.stage.transition = Some(TransitionPhase::In);
        self.state = TransitionState::Entering;
        self.timers.schedule(ENTER_DURATION, TransitionStep::FinishEnter);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::audio::Audio;
    use crate::core::config::GameConfig;
    use crate::core::physics::Side;
    use crate::core::scene::{DialogBox, SceneError};
    use std::sync::{Arc, Mutex};

    //--- Test Scenes ------------------------------------------------------

    type Journal = Arc<Mutex<Vec<String>>>;

    struct Probe {
        name: &'static str,
        journal: Journal,
        fail_init: bool,
        request_on_update: Option<SceneId>,
    }

    impl Probe {
        fn log(&self, what: &str) {
            self.journal.lock().unwrap().push(format!("{}:{}", self.name, what));
        }
    }

    impl Scene for Probe {
        fn init(&mut self, _ctx: &mut GlobalContext, params: &SceneParams) -> Result<(), SceneError> {
            self.log(&format!("init({:?})", params.exit_side));
            if self.fail_init {
                return Err(SceneError::Init { scene: SceneId::Chest, reason: "boom".into() });
            }
            Ok(())
        }

        fn render(&self, _ctx: &GlobalContext, stage: &mut Stage) {
            stage.clear();
            stage.dialog = Some(DialogBox::text(self.name));
        }

        fn update(&mut self, ctx: &mut GlobalContext) {
            self.log("update");
            if let Some(next) = self.request_on_update.take() {
                ctx.scene_requests.request(next, SceneParams::exit(Side::Right));
            }
        }

        fn cleanup(&mut self, _ctx: &mut GlobalContext) {
            self.log("cleanup");
        }
    }

    fn probe(name: &'static str, journal: &Journal) -> impl Fn() -> Probe + Send + 'static {
        let journal = Arc::clone(journal);
        move || Probe {
            name,
            journal: Arc::clone(&journal),
            fail_init: false,
            request_on_update: None,
        }
    }

    fn context() -> GlobalContext {
        GlobalContext::new(GameConfig::default(), Audio::silent(), Duration::from_millis(100))
    }

    fn setup() -> (SceneManager, GlobalContext, Journal) {
        let journal: Journal = Arc::new(Mutex::new(Vec::new()));
        let mut manager = SceneManager::new(1920.0, 1200.0);
        manager.register_default(SceneId::Start, probe("start", &journal));
        manager.register_scene(SceneId::Wizard01, probe("w1", &journal));
        (manager, context(), journal)
    }

    fn entries(journal: &Journal) -> Vec<String> {
        journal.lock().unwrap().clone()
    }

    //--- Registration & Loading -------------------------------------------

    #[test]
    fn first_load_enters_immediately() {
        let (mut manager, mut ctx, journal) = setup();

        manager.start(&mut ctx);

        assert_eq!(manager.current(), Some(SceneId::Start));
        assert_eq!(manager.state(), TransitionState::Entering);
        assert_eq!(manager.stage().transition, Some(TransitionPhase::In));
        assert_eq!(entries(&journal), vec!["start:init(None)"]);
    }

    #[test]
    fn unknown_scene_is_a_no_op() {
        let (mut manager, mut ctx, journal) = setup();
        manager.start(&mut ctx);
        let before = ctx.game_state.clone();

        manager.load_scene(&mut ctx, SceneId::Chest, SceneParams::default());
        manager.load_scene_named(&mut ctx, "nowhere", SceneParams::default());

        assert_eq!(manager.current(), Some(SceneId::Start));
        assert_eq!(ctx.game_state, before);
        assert_eq!(entries(&journal), vec!["start:init(None)"]);
    }

    #[test]
    fn later_registration_replaces_earlier() {
        let journal: Journal = Arc::new(Mutex::new(Vec::new()));
        let mut manager = SceneManager::new(1920.0, 1200.0);
        let mut ctx = context();
        manager.register_scene(SceneId::Start, probe("old", &journal));
        manager.register_scene(SceneId::Start, probe("new", &journal));

        manager.load_scene(&mut ctx, SceneId::Start, SceneParams::default());

        assert_eq!(entries(&journal), vec!["new:init(None)"]);
    }

    //--- Transitions ------------------------------------------------------

    #[test]
    fn cleanup_runs_before_replacement_and_timings_hold() {
        let (mut manager, mut ctx, journal) = setup();
        manager.start(&mut ctx);

        manager.load_scene(&mut ctx, SceneId::Wizard01, SceneParams::exit(Side::Left));
        assert_eq!(manager.state(), TransitionState::Exiting);
        assert_eq!(manager.stage().transition, Some(TransitionPhase::Out));
        assert_eq!(manager.current(), None);

        // 500 ms into the 600 ms exit: nothing new yet
        for _ in 0..5 {
            manager.update(&mut ctx);
        }
        assert_eq!(manager.current(), None);
        assert_eq!(ctx.game_state.current_scene, SceneId::Start);

        manager.update(&mut ctx);
        assert_eq!(manager.current(), Some(SceneId::Wizard01));
        assert_eq!(manager.stage().transition, Some(TransitionPhase::In));
        assert_eq!(ctx.game_state.current_scene, SceneId::Wizard01);
        assert_eq!(ctx.game_state.exit_side, Some(Side::Left));

        for _ in 0..3 {
            manager.update(&mut ctx);
        }
        assert_eq!(manager.state(), TransitionState::Idle);
        assert_eq!(manager.stage().transition, None);

        let log = entries(&journal);
        let cleanup = log.iter().position(|e| e == "start:cleanup").unwrap();
        let init = log.iter().position(|e| e == "w1:init(Some(Left))").unwrap();
        assert!(cleanup < init);
        assert!(!log[cleanup..].iter().any(|e| e == "start:update"));
    }

    #[test]
    fn load_during_exit_is_ignored() {
        let (mut manager, mut ctx, journal) = setup();
        manager.register_scene(SceneId::Chest, probe("chest", &journal));
        manager.start(&mut ctx);

        manager.load_scene(&mut ctx, SceneId::Wizard01, SceneParams::default());
        manager.load_scene(&mut ctx, SceneId::Chest, SceneParams::default());
        for _ in 0..6 {
            manager.update(&mut ctx);
        }

        assert_eq!(manager.current(), Some(SceneId::Wizard01));
        assert!(!entries(&journal).iter().any(|e| e.starts_with("chest:")));
    }

    #[test]
    fn exit_side_kept_when_params_omit_it() {
        let (mut manager, mut ctx, _journal) = setup();
        ctx.game_state.exit_side = Some(Side::Right);

        manager.start(&mut ctx);

        assert_eq!(ctx.game_state.exit_side, Some(Side::Right));
    }

    #[test]
    fn failing_init_is_cleaned_up_and_leaves_no_scene() {
        let (mut manager, mut ctx, journal) = setup();
        let failing = Arc::clone(&journal);
        manager.register_scene(SceneId::Chest, move || Probe {
            name: "bad",
            journal: Arc::clone(&failing),
            fail_init: true,
            request_on_update: None,
        });
        manager.start(&mut ctx);

        manager.load_scene(&mut ctx, SceneId::Chest, SceneParams::default());
        for _ in 0..10 {
            manager.update(&mut ctx);
        }

        assert_eq!(manager.current(), None);
        assert_eq!(manager.state(), TransitionState::Idle);
        assert_eq!(manager.stage().transition, None);
        let log = entries(&journal);
        assert!(log.contains(&"start:cleanup".to_string()));
        assert!(log.contains(&"bad:cleanup".to_string()));

        // The manager recovers on the next load
        manager.load_scene(&mut ctx, SceneId::Wizard01, SceneParams::default());
        assert_eq!(manager.current(), Some(SceneId::Wizard01));
    }

    #[test]
    fn scene_requests_are_processed_after_update() {
        let (mut manager, mut ctx, journal) = setup();
        let requesting = Arc::clone(&journal);
        manager.register_default(SceneId::Start, move || Probe {
            name: "start",
            journal: Arc::clone(&requesting),
            fail_init: false,
            request_on_update: Some(SceneId::Wizard01),
        });
        manager.start(&mut ctx);

        manager.update(&mut ctx);

        assert_eq!(manager.state(), TransitionState::Exiting);
        assert!(ctx.scene_requests.is_empty());
        let log = entries(&journal);
        assert_eq!(log, vec!["start:init(None)", "start:update", "start:cleanup"]);
    }

    #[test]
    fn fresh_instance_per_load() {
        let (mut manager, mut ctx, journal) = setup();
        manager.start(&mut ctx);
        manager.load_scene(&mut ctx, SceneId::Wizard01, SceneParams::default());
        for _ in 0..10 {
            manager.update(&mut ctx);
        }
        manager.load_scene(&mut ctx, SceneId::Start, SceneParams::default());
        for _ in 0..10 {
            manager.update(&mut ctx);
        }

        let inits = entries(&journal).iter().filter(|e| e.as_str() == "start:init(None)").count();
        assert_eq!(inits, 2);
        assert_eq!(manager.stage().dialog, Some(DialogBox::text("start")));
    }
}
