// crates/input_core/src/input/registry.rs
use std::collections::HashMap;

use super::mapping::{ActionCallback, ActionMapping, AxisCallback, AxisMapping, Mapping};

/// Owns every bound mapping instance, keyed by mapping name.
/// Registering a name twice keeps the first instance.
#[derive(Default)]
pub struct MappingRegistry {
    mappings: HashMap<String, Mapping>,
}

impl MappingRegistry {
    /// Returns `true` if a new instance was created.
    pub fn register_axis(&mut self, name: &str, callback: AxisCallback) -> bool {
        if self.mappings.contains_key(name) {
            return false;
        }
        self.mappings
            .insert(name.to_string(), Mapping::Axis(AxisMapping::new(name, callback)));
        true
    }

    /// Returns `true` if a new instance was created.
    pub fn register_action(&mut self, name: &str, callback: ActionCallback) -> bool {
        if self.mappings.contains_key(name) {
            return false;
        }
        self.mappings.insert(
            name.to_string(),
            Mapping::Action(ActionMapping::new(name, callback)),
        );
        true
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Mapping> {
        self.mappings.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.mappings.contains_key(name)
    }

    pub fn axis_value(&self, name: &str) -> Option<f32> {
        match self.mappings.get(name)? {
            Mapping::Axis(axis) => Some(axis.value()),
            Mapping::Action(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_registration_wins() {
        let mut registry = MappingRegistry::default();

        assert!(registry.register_axis("MoveForward", Box::new(|_| {})));
        assert!(!registry.register_axis("MoveForward", Box::new(|_| panic!("replaced"))));
        assert!(!registry.register_action("MoveForward", Box::new(|| {})));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.axis_value("MoveForward"), Some(0.0));

        if let Some(Mapping::Axis(axis)) = registry.get_mut("MoveForward") {
            axis.execute(1.0);
        }
        assert_eq!(registry.axis_value("MoveForward"), Some(1.0));
    }

    #[test]
    fn actions_have_no_axis_value() {
        let mut registry = MappingRegistry::default();
        registry.register_action("Jump", Box::new(|| {}));

        assert!(registry.contains("Jump"));
        assert_eq!(registry.axis_value("Jump"), None);
        assert_eq!(registry.axis_value("Missing"), None);
    }
}
