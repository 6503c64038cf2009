// crates/input_core/src/input/map.rs
use std::collections::{HashMap, HashSet};

use input_shared::{MappingConfig, RawCode};
use tracing::warn;

use super::error::ConfigError;

/// How one raw code feeds one mapping name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BindingKind {
    Axis { scale: f32 },
    Action,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: String,
    pub kind: BindingKind,
}

/// Validated, immutable lookup tables built once from a [`MappingConfig`].
///
/// Every reverse-index entry is resolved to its kind (and scale, for axes) up front so
/// the router never has to re-check the config while dispatching.
#[derive(Debug, Default)]
pub struct InputMap {
    code_bindings: HashMap<RawCode, Vec<Binding>>,
    axis_names: HashSet<String>,
    action_names: HashSet<String>,
    mouse_buttons: HashMap<u32, RawCode>,
    always_show_touch: bool,
    touch_overlay_asset: Option<String>,
}

impl InputMap {
    pub fn from_config(config: &MappingConfig) -> Result<Self, ConfigError> {
        for (name, entries) in &config.axis_mapping_set {
            if config.action_mapping_set.contains_key(name) {
                return Err(ConfigError::AmbiguousMapping(name.clone()));
            }
            for (&key, entry) in entries {
                if key != entry.code {
                    return Err(ConfigError::CodeMismatch {
                        name: name.clone(),
                        key,
                        code: entry.code,
                    });
                }
                if !entry.scale.is_finite() {
                    return Err(ConfigError::InvalidScale {
                        name: name.clone(),
                        code: key,
                    });
                }
            }
        }

        for (name, entries) in &config.action_mapping_set {
            for (&key, entry) in entries {
                if key != entry.code {
                    return Err(ConfigError::CodeMismatch {
                        name: name.clone(),
                        key,
                        code: entry.code,
                    });
                }
            }
        }

        let mut code_bindings: HashMap<RawCode, Vec<Binding>> = HashMap::new();
        for (&code, names) in &config.input_code_to_mapping_name_set {
            let mut bindings: Vec<Binding> = Vec::with_capacity(names.len());
            for name in names {
                if bindings.iter().any(|b| &b.name == name) {
                    continue;
                }

                let kind = if let Some(entries) = config.axis_mapping_set.get(name) {
                    let entry = entries.get(&code).ok_or_else(|| ConfigError::MissingScale {
                        code,
                        name: name.clone(),
                    })?;
                    BindingKind::Axis { scale: entry.scale }
                } else if let Some(entries) = config.action_mapping_set.get(name) {
                    if !entries.contains_key(&code) {
                        warn!(code, mapping = %name, "action is fed by a code it does not list");
                    }
                    BindingKind::Action
                } else {
                    return Err(ConfigError::UnknownMapping {
                        code,
                        name: name.clone(),
                    });
                };

                bindings.push(Binding {
                    name: name.clone(),
                    kind,
                });
            }

            if !bindings.is_empty() {
                code_bindings.insert(code, bindings);
            }
        }

        let map = Self {
            code_bindings,
            axis_names: config.axis_mapping_set.keys().cloned().collect(),
            action_names: config.action_mapping_set.keys().cloned().collect(),
            mouse_buttons: config
                .mouse_button_to_input_code_set
                .iter()
                .map(|(&index, &code)| (index, code))
                .collect(),
            always_show_touch: config.always_show_touch,
            touch_overlay_asset: Some(config.touch_prefab_uuid.clone())
                .filter(|uuid| !uuid.is_empty()),
        };

        map.warn_unreachable(config);
        Ok(map)
    }

    /// Table entries the reverse index never points at can never fire.
    fn warn_unreachable(&self, config: &MappingConfig) {
        let axis_codes = config
            .axis_mapping_set
            .iter()
            .flat_map(|(name, entries)| entries.keys().map(move |&code| (name, code)));
        let action_codes = config
            .action_mapping_set
            .iter()
            .flat_map(|(name, entries)| entries.keys().map(move |&code| (name, code)));

        for (name, code) in axis_codes.chain(action_codes) {
            let reachable = self
                .bindings(code)
                .iter()
                .any(|binding| &binding.name == name);
            if !reachable {
                warn!(code, mapping = %name, "mapping entry is missing from the reverse index");
            }
        }
    }

    /// Every mapping fed by `code`, in config order. Empty for unmapped codes.
    pub fn bindings(&self, code: RawCode) -> &[Binding] {
        self.code_bindings
            .get(&code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_mapped(&self, code: RawCode) -> bool {
        self.code_bindings.contains_key(&code)
    }

    pub fn has_axis(&self, name: &str) -> bool {
        self.axis_names.contains(name)
    }

    pub fn has_action(&self, name: &str) -> bool {
        self.action_names.contains(name)
    }

    pub fn mouse_button_code(&self, index: u32) -> Option<RawCode> {
        self.mouse_buttons.get(&index).copied()
    }

    pub fn always_show_touch(&self) -> bool {
        self.always_show_touch
    }

    pub fn touch_overlay_asset(&self) -> Option<&str> {
        self.touch_overlay_asset.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use input_shared::{AxisMappingKey, input_codes::*};

    fn movement() -> MappingConfig {
        MappingConfig::default()
            .with_axis("MoveRight", KEY_D, 1.0)
            .with_axis("MoveRight", KEY_A, -1.0)
            .with_action("Jump", SPACE)
            .with_mouse_button(0, MOUSE_BUTTON_LEFT)
    }

    #[test]
    fn resolves_scales_and_kinds() {
        let map = InputMap::from_config(&movement()).unwrap();

        assert_eq!(
            map.bindings(KEY_A),
            &[Binding {
                name: "MoveRight".into(),
                kind: BindingKind::Axis { scale: -1.0 },
            }]
        );
        assert_eq!(map.bindings(SPACE)[0].kind, BindingKind::Action);
        assert!(map.bindings(KEY_W).is_empty());
        assert!(map.has_axis("MoveRight"));
        assert!(map.has_action("Jump"));
        assert!(!map.has_action("MoveRight"));
        assert_eq!(map.mouse_button_code(0), Some(MOUSE_BUTTON_LEFT));
        assert_eq!(map.mouse_button_code(7), None);
    }

    #[test]
    fn empty_overlay_asset_is_none() {
        let map = InputMap::from_config(&movement()).unwrap();
        assert_eq!(map.touch_overlay_asset(), None);
    }

    #[test]
    fn rejects_name_in_both_tables() {
        let config = movement().with_action("MoveRight", SPACE);
        assert!(matches!(
            InputMap::from_config(&config),
            Err(ConfigError::AmbiguousMapping(name)) if name == "MoveRight"
        ));
    }

    #[test]
    fn rejects_mismatched_entry_code() {
        let mut config = movement();
        config
            .axis_mapping_set
            .get_mut("MoveRight")
            .unwrap()
            .insert(KEY_D, AxisMappingKey { scale: 1.0, code: KEY_W });

        assert!(matches!(
            InputMap::from_config(&config),
            Err(ConfigError::CodeMismatch { key: KEY_D, code: KEY_W, .. })
        ));
    }

    #[test]
    fn rejects_reverse_index_to_unknown_name() {
        let mut config = movement();
        config
            .input_code_to_mapping_name_set
            .insert(KEY_E, vec!["Sprint".into()]);

        assert!(matches!(
            InputMap::from_config(&config),
            Err(ConfigError::UnknownMapping { code: KEY_E, .. })
        ));
    }

    #[test]
    fn rejects_axis_without_scale_for_code() {
        let mut config = movement();
        config
            .input_code_to_mapping_name_set
            .insert(KEY_W, vec!["MoveRight".into()]);

        assert!(matches!(
            InputMap::from_config(&config),
            Err(ConfigError::MissingScale { code: KEY_W, .. })
        ));
    }

    #[test]
    fn rejects_non_finite_scale() {
        let config = movement().with_axis("Turn", MOUSE_X, f32::NAN);
        assert!(matches!(
            InputMap::from_config(&config),
            Err(ConfigError::InvalidScale { code: MOUSE_X, .. })
        ));
    }

    #[test]
    fn duplicate_names_in_reverse_index_collapse() {
        let mut config = movement();
        config
            .input_code_to_mapping_name_set
            .insert(SPACE, vec!["Jump".into(), "Jump".into()]);

        let map = InputMap::from_config(&config).unwrap();
        assert_eq!(map.bindings(SPACE).len(), 1);
    }
}
