// crates/input_core/src/input/config.rs

use std::fs;
use std::path::Path;

use input_shared::input_codes::*;
use input_shared::MappingConfig;
use tracing::info;

use super::error::ConfigError;

/// Centralized defaults for input configuration.
/// This keeps App::new small and makes it easy to tweak or mod.
pub struct InputDefaults;

impl InputDefaults {
    /// Fixed simulation step; the held re-fire runs once per step.
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Built-in third-person layout: WASD + left stick movement, mouse / right stick
    /// look, Space/E/left click plus on-screen buttons for actions.
    pub fn mapping_config() -> MappingConfig {
        let mut config = MappingConfig::default()
            // Movement
            .with_axis("MoveForward", KEY_W, 1.0)
            .with_axis("MoveForward", KEY_S, -1.0)
            .with_axis("MoveForward", LEFT_THUMBSTICK_AXIS_Y, 1.0)
            .with_axis("MoveRight", KEY_D, 1.0)
            .with_axis("MoveRight", KEY_A, -1.0)
            .with_axis("MoveRight", LEFT_THUMBSTICK_AXIS_X, 1.0)
            // Look
            .with_axis("Turn", MOUSE_X, -1.0)
            .with_axis("LookUp", MOUSE_Y, 1.0)
            .with_axis("TurnRate", RIGHT_THUMBSTICK_AXIS_X, -1.0)
            .with_axis("LookUpRate", RIGHT_THUMBSTICK_AXIS_Y, 1.0)
            // Actions
            .with_action("Jump", SPACE)
            .with_action("Jump", GAMEPAD_TOUCH_1)
            .with_action("Jump", GAMEPAD_SOUTH)
            .with_action("Sprint", KEY_E)
            .with_action("Sprint", GAMEPAD_TOUCH_2)
            .with_action("Sprint", GAMEPAD_LEFT_THUMB)
            .with_action("Fire", MOUSE_BUTTON_LEFT)
            .with_action("Fire", GAMEPAD_TOUCH_3)
            .with_action("Fire", GAMEPAD_RIGHT_TRIGGER);

        for index in 0..MOUSE_BUTTON_COUNT {
            config = config.with_mouse_button(index, MOUSE_BUTTON_LEFT + index);
        }

        config.always_show_touch = false;
        config.touch_prefab_uuid = "083be61c-e5bc-4b83-8d79-90a1f9056fca".to_string();
        config
    }

    /// Parses a config written by the editor tooling.
    pub fn load_json(json: &str) -> Result<MappingConfig, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_file(path: impl AsRef<Path>) -> Result<MappingConfig, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::load_json(&text)?;
        info!(
            path = %path.display(),
            codes = config.input_code_to_mapping_name_set.len(),
            "loaded mapping config"
        );
        Ok(config)
    }
}
