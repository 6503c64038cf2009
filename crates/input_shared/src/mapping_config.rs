// crates/input_shared/src/mapping_config.rs
//! The mapping table produced by tooling and consumed read-only by the engine.
//!
//! Field names follow the JSON files the editor tooling writes, so a config can be
//! deserialized without any translation layer. Integer table keys are parsed into
//! [`RawCode`] by serde; shape validation happens once in `input_core`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::input_types::{MappingName, RawCode};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisMappingKey {
    pub scale: f32,
    pub code: RawCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionMappingKey {
    pub code: RawCode,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingConfig {
    /// Reverse index: raw code -> every mapping name it feeds.
    #[serde(default)]
    pub input_code_to_mapping_name_set: BTreeMap<RawCode, Vec<MappingName>>,

    /// Axis name -> contributing codes and their signed scale.
    #[serde(default)]
    pub axis_mapping_set: BTreeMap<MappingName, BTreeMap<RawCode, AxisMappingKey>>,

    /// Action name -> contributing codes.
    #[serde(default)]
    pub action_mapping_set: BTreeMap<MappingName, BTreeMap<RawCode, ActionMappingKey>>,

    /// Platform mouse button index -> raw code.
    #[serde(default)]
    pub mouse_button_to_input_code_set: BTreeMap<u32, RawCode>,

    /// Show the on-screen touch overlay even on desktop platforms.
    #[serde(default)]
    pub always_show_touch: bool,

    /// Asset id of the touch overlay. Empty disables the overlay.
    #[serde(default)]
    pub touch_prefab_uuid: String,
}

impl MappingConfig {
    /// Adds `code` to the axis `name` with `scale`, keeping the reverse index in sync.
    pub fn with_axis(mut self, name: &str, code: RawCode, scale: f32) -> Self {
        self.axis_mapping_set
            .entry(name.to_string())
            .or_default()
            .insert(code, AxisMappingKey { scale, code });
        self.link(code, name);
        self
    }

    /// Adds `code` to the action `name`, keeping the reverse index in sync.
    pub fn with_action(mut self, name: &str, code: RawCode) -> Self {
        self.action_mapping_set
            .entry(name.to_string())
            .or_default()
            .insert(code, ActionMappingKey { code });
        self.link(code, name);
        self
    }

    pub fn with_mouse_button(mut self, index: u32, code: RawCode) -> Self {
        self.mouse_button_to_input_code_set.insert(index, code);
        self
    }

    fn link(&mut self, code: RawCode, name: &str) {
        let names = self.input_code_to_mapping_name_set.entry(code).or_default();
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
}
