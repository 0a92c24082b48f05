//=========================================================================
// Game Configuration
//=========================================================================
//
// Run-wide settings read once at startup.
//
// Sources:
//   GameConfig::default()  → base values
//   GameConfig::from_env() → GIFT_TOUCH, GIFT_SEED, GIFT_REWARD_URL
//
// Unparsable environment values are logged and the default is kept.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::warn;

//=== Constants ===========================================================

pub const TOUCH_ENV_VAR: &str = "GIFT_TOUCH";
pub const SEED_ENV_VAR: &str = "GIFT_SEED";
pub const REWARD_URL_ENV_VAR: &str = "GIFT_REWARD_URL";

/// Base stage resolution. Everything is laid out in these units.
pub const STAGE_WIDTH: f32 = 1920.0;
pub const STAGE_HEIGHT: f32 = 1200.0;

//=== PromptPolicy ========================================================

/// Label shown above an NPC when the player can interact with it.
///
/// One policy for every room, picked by input device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPolicy {
    pub keyboard_label: String,
    pub touch_label: String,
}

impl PromptPolicy {
    pub fn label(&self, touch_device: bool) -> &str {
        if touch_device {
            &self.touch_label
        } else {
            &self.keyboard_label
        }
    }
}

impl Default for PromptPolicy {
    fn default() -> Self {
        Self {
            keyboard_label: "Press E".to_string(),
            touch_label: "Tap".to_string(),
        }
    }
}

//=== GameConfig ==========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub stage_width: f32,
    pub stage_height: f32,

    /// Touch-primary device: shows virtual controls and touch prompts.
    pub touch_device: bool,

    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,

    /// Target of the link on the victory dialog.
    pub reward_url: Option<String>,

    pub prompt: PromptPolicy,
}

impl GameConfig {
    /// Defaults overridden by the `GIFT_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(TOUCH_ENV_VAR).ok().as_deref(),
            std::env::var(SEED_ENV_VAR).ok().as_deref(),
            std::env::var(REWARD_URL_ENV_VAR).ok().as_deref(),
        )
    }

    fn from_vars(touch: Option<&str>, seed: Option<&str>, reward_url: Option<&str>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = touch {
            match parse_flag(raw) {
                Some(flag) => config.touch_device = flag,
                None => warn!("Ignoring {}={:?}: expected 1/0/true/false", TOUCH_ENV_VAR, raw),
            }
        }

        if let Some(raw) = seed {
            match raw.trim().parse::<u64>() {
                Ok(value) => config.seed = Some(value),
                Err(e) => warn!("Ignoring {}={:?}: {}", SEED_ENV_VAR, raw, e),
            }
        }

        config.reward_url = reward_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(ToString::to_string);

        config
    }

    pub fn prompt_label(&self) -> &str {
        self.prompt.label(self.touch_device)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            stage_width: STAGE_WIDTH,
            stage_height: STAGE_HEIGHT,
            touch_device: false,
            seed: None,
            reward_url: None,
            prompt: PromptPolicy::default(),
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_env() {
        let config = GameConfig::from_vars(None, None, None);
        assert_eq!(config, GameConfig::default());
        assert_eq!((config.stage_width, config.stage_height), (1920.0, 1200.0));
    }

    #[test]
    fn parses_all_vars() {
        let config = GameConfig::from_vars(Some("true"), Some(" 42 "), Some("https://example.org/gifts"));

        assert!(config.touch_device);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.reward_url.as_deref(), Some("https://example.org/gifts"));
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let config = GameConfig::from_vars(Some("maybe"), Some("-1"), Some("   "));

        assert!(!config.touch_device);
        assert_eq!(config.seed, None);
        assert_eq!(config.reward_url, None);
    }

    #[test]
    fn prompt_label_follows_device() {
        let mut config = GameConfig::default();
        assert_eq!(config.prompt_label(), "Press E");

        config.touch_device = true;
        assert_eq!(config.prompt_label(), "Tap");
    }
}
