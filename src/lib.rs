//=========================================================================
// Key to the Gift — Library Root
//
// A short narrative platformer: a hero walks a corridor, helps three
// wizards with small puzzles, collects three clue words and opens the
// chest with the gift.
//
// Responsibilities:
// - Expose the runtime facade (`Engine`, `EngineBuilder`)
// - Expose `core` (input, physics, scenes, game state) and `game`
//   (the scenes and puzzles themselves)
// - Keep the OS layer (`platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use key_to_the_gift::prelude::*;
//
// EngineBuilder::new()
//     .build()
//     .init(|systems| key_to_the_gift::game::register_scenes(&mut systems.scene_manager))
//     .run();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the engine-level systems: input, physics, timers, audio,
// configuration, the scene manager and the shared game state.
//
// `game` holds the concrete scenes and their puzzle logic.
//
pub mod core;
pub mod game;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the winit window and event loop and is kept
// private. `engine` wires platform and core threads together.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
