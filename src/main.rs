//=========================================================================
// Key to the Gift — Executable
//
// Reads the run configuration from the environment, registers every
// scene and hands control to the engine until the window closes.
//
// Environment:
// - RUST_LOG         log filter (default: info)
// - GIFT_TOUCH       "1"/"true" shows the on-screen controls
// - GIFT_SEED        fixed seed for shuffles and note spawns
// - GIFT_REWARD_URL  link shown in the final dialog
//
//=========================================================================

use key_to_the_gift::core::config::GameConfig;
use key_to_the_gift::game;
use key_to_the_gift::EngineBuilder;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GameConfig::from_env();
    log::info!(
        "Starting on a {}x{} stage (touch: {})",
        config.stage_width,
        config.stage_height,
        config.touch_device
    );

    EngineBuilder::new()
        .with_config(config)
        .build()
        .init(|systems| game::register_scenes(&mut systems.scene_manager))
        .run();
}
