//=========================================================================
// Core Systems Orchestrator
//
// Central coordinator for all game systems running on the logic
// (non-platform) thread.
//
// Responsibilities:
// - Own GlobalSystems (input, scenes) and GlobalContext (shared data)
// - Receive platform events via the bounded channel
// - Maintain deterministic pacing using a fixed tick rate (TPS)
// - Report what the stage shows through the log
//
// Notes:
// Every scene, timer, audio call and GameState write happens on this
// thread, so scene code never needs locks. Communication with the
// platform occurs only through message passing.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use crossbeam_channel::Receiver;
use log::info;

//=== Module Declarations =================================================

pub mod audio;
pub mod config;
pub mod game_state;
pub mod geometry;
pub mod globals;
pub mod input;
pub mod physics;
pub(crate) mod platform_bridge;
pub mod scene;
pub mod timer;

//=== Public API ==========================================================

pub use globals::{GlobalContext, GlobalSystems};

//=== Internal Imports ====================================================

use audio::Audio;
use config::GameConfig;
use platform_bridge::{EventCollector, PlatformEvent, TickControl};
use scene::Stage;

//=== CoreSystemsOrchestrator =============================================
//
// Holds systems and context until the logic thread takes them over.
//
pub(crate) struct CoreSystemsOrchestrator {
    systems: GlobalSystems,
    context: GlobalContext,
}

impl CoreSystemsOrchestrator {
    //--- Construction -----------------------------------------------------
    //
    // Initializes all core systems but does not yet start the logic thread.
    //
    pub fn new(config: GameConfig, audio: Audio, tps: f64) -> Self {
        let systems = GlobalSystems::new(config.stage_width, config.stage_height);
        let context = GlobalContext::new(config, audio, Duration::from_secs_f64(1.0 / tps));
        Self { systems, context }
    }

    //--- init_systems() ---------------------------------------------------
    //
    // Gives the caller a chance to register scenes and bindings before
    // the thread starts.
    //
    pub fn init_systems<F>(&mut self, init_fn: F)
    where
        F: FnOnce(&mut GlobalSystems),
    {
        init_fn(&mut self.systems);
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Spawns the logic thread. Each tick:
    //  1. Collects input batches from the platform
    //  2. Updates input and the active scene
    //  3. Logs stage text that changed
    //  4. Sleeps to maintain fixed pacing
    //
    pub fn spawn_core_thread(
        self,
        receiver: Receiver<PlatformEvent>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let mut systems = self.systems;
            let mut context = self.context;
            let mut collector = EventCollector::new(receiver);
            let mut narrator = StageNarrator::default();

            systems.scene_manager.start(&mut context);

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                if collector.collect_frame() == TickControl::Exit {
                    info!("Core thread exiting.");
                    break;
                }
                context.frame_events = collector.take_batches();

                //--- Step 2: Update systems --------------------------------
                systems.update(&mut context);

                //--- Step 3: Report stage text ------------------------------
                narrator.observe(systems.scene_manager.stage());

                //--- Step 4: Maintain deterministic pacing ----------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }
        })
    }
}

//=== StageNarrator =======================================================
//
// Logs dialog, bubble, feedback and prompt text when it changes, so a run
// can be followed from the log alone.
//
#[derive(Default)]
struct StageNarrator {
    dialog: Option<String>,
    bubble: Option<String>,
    feedback: Option<String>,
    prompt: Option<String>,
}

impl StageNarrator {
    fn observe(&mut self, stage: &Stage) {
        let dialog = stage.dialog.as_ref().map(|d| match &d.title {
            Some(title) => format!("{} | {}", title, d.text),
            None => d.text.clone(),
        });

        Self::report("dialog", &mut self.dialog, dialog);
        Self::report("bubble", &mut self.bubble, stage.bubble.clone());
        Self::report("feedback", &mut self.feedback, stage.feedback.clone());
        Self::report("prompt", &mut self.prompt, stage.prompt.clone());
    }

    fn report(what: &str, last: &mut Option<String>, now: Option<String>) {
        if *last != now {
            if let Some(text) = &now {
                info!(target: "stage", "{}: {}", what, text);
            }
            *last = now;
        }
    }
}
