//=========================================================================
// Global Systems
//=========================================================================
//
// Container for engine-level systems with logic.
//
// Contains systems that process input and manage scenes. Systems operate
// on GlobalContext data.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::GlobalContext;
use crate::core::input::InputSystem;
use crate::core::scene::SceneManager;

//=== GlobalSystems =======================================================

/// Container for engine-level logic systems.
///
/// # Available Systems
///
/// - `input`: key bindings and per-frame control mapping
/// - `scene_manager`: scene registry, loading and transitions
pub struct GlobalSystems {
    /// Maps raw input state to gameplay controls.
    pub input: InputSystem,

    /// Manages scene registration, activation, updates, and transitions.
    pub scene_manager: SceneManager,
}

impl GlobalSystems {
    /// Creates a systems container for a stage of the given size.
    ///
    /// This is typically called internally by the engine. Users should access
    /// systems via [`crate::Engine::init`] instead.
    pub(crate) fn new(stage_width: f32, stage_height: f32) -> Self {
        Self {
            input: InputSystem::new(),
            scene_manager: SceneManager::new(stage_width, stage_height),
        }
    }

    //--- Update Loop ------------------------------------------------------

    /// Updates all engine systems for the current frame.
    ///
    /// # Processing Pipeline
    ///
    /// 1. **Clock**: advances the frame clock by one tick
    /// 2. **Input**: folds platform events into input state and controls
    /// 3. **Scenes**: advances transitions, updates the active scene and
    ///    applies queued scene requests
    pub(crate) fn update(&mut self, context: &mut GlobalContext) {
        // 1. Advance time
        context.clock.tick();

        // 2. Process input events into state and controls
        context.controls = self.input.process_frame(
            &mut context.input_state,
            &mut context.touch_controls,
            &context.frame_events,
        );
        context.frame_events.clear();

        // 3. Update the active scene and apply transitions
        self.scene_manager.update(context);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
