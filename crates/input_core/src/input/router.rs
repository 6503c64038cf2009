// crates/input_core/src/input/router.rs

use input_shared::{input_codes, MappingConfig, RawCode, SourceClass};
use tracing::debug;

use super::error::ConfigError;
use super::held::HeldEventTracker;
use super::map::{BindingKind, InputMap};
use super::mapping::Mapping;
use super::pressed::PressedCodes;
use super::registry::MappingRegistry;

/// What happened to a raw code. Digital sources send edges, continuous sources
/// send signed magnitudes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEdge {
    Start,
    End,
    Cancel,
    Value(f32),
}

/// The engine's public surface: resolves raw events against the [`InputMap`],
/// keeps pressed/held state and invokes bound mapping instances.
///
/// Owned by the composition root and handed to adapters by `&mut`. Everything runs on
/// the thread that advances the simulation.
///
/// Digital axis inputs produce their value from [`InputRouter::tick`], not from the
/// press edge. `tick` runs after the frame's edges are drained, so a key pressed this
/// frame still reports this frame, exactly once.
pub struct InputRouter {
    map: InputMap,
    registry: MappingRegistry,
    pressed: PressedCodes,
    held: HeldEventTracker,
}

impl InputRouter {
    pub fn new(map: InputMap) -> Self {
        Self {
            map,
            registry: MappingRegistry::default(),
            pressed: PressedCodes::default(),
            held: HeldEventTracker::default(),
        }
    }

    pub fn from_config(config: &MappingConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(InputMap::from_config(config)?))
    }

    pub fn map(&self) -> &InputMap {
        &self.map
    }

    // ==================================================================================
    // BINDING
    // ==================================================================================

    /// Binds `callback` to the axis `name`. Ignored if the config has no such axis or
    /// the axis is already bound.
    pub fn bind_axis<F>(&mut self, name: &str, callback: F)
    where
        F: FnMut(f32) + 'static,
    {
        if !self.map.has_axis(name) {
            debug!(mapping = name, "no axis with this name in config, bind ignored");
            return;
        }
        if !self.registry.register_axis(name, Box::new(callback)) {
            debug!(mapping = name, "axis already bound, keeping the first callback");
        }
    }

    /// Binds `callback` to the action `name`. Ignored if the config has no such action
    /// or the action is already bound.
    pub fn bind_action<F>(&mut self, name: &str, callback: F)
    where
        F: FnMut() + 'static,
    {
        if !self.map.has_action(name) {
            debug!(mapping = name, "no action with this name in config, bind ignored");
            return;
        }
        if !self.registry.register_action(name, Box::new(callback)) {
            debug!(mapping = name, "action already bound, keeping the first callback");
        }
    }

    // ==================================================================================
    // QUERIES
    // ==================================================================================

    pub fn is_pressed(&self, code: RawCode) -> bool {
        self.pressed.is_pressed(code)
    }

    /// Last value delivered to a bound axis.
    pub fn axis_value(&self, name: &str) -> Option<f32> {
        self.registry.axis_value(name)
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    pub fn bound_count(&self) -> usize {
        self.registry.len()
    }

    pub fn held(&self) -> &HeldEventTracker {
        &self.held
    }

    // ==================================================================================
    // INTAKE
    // ==================================================================================

    /// Generic entry point used by every per-source method below.
    pub fn handle(&mut self, class: SourceClass, code: RawCode, edge: InputEdge) {
        if !self.map.is_mapped(code) {
            return;
        }

        match edge {
            InputEdge::Start => self.press(class, code),
            InputEdge::End | InputEdge::Cancel => self.release(class, code),
            InputEdge::Value(magnitude) => {
                // A value from a touch widget means a finger is on it.
                if class == SourceClass::Touch {
                    self.pressed.press(code);
                }
                Self::fire(&self.map, &mut self.registry, code, magnitude, true);
            }
        }
    }

    pub fn on_key_down(&mut self, code: RawCode) {
        self.handle(SourceClass::Keyboard, code, InputEdge::Start);
    }

    pub fn on_key_up(&mut self, code: RawCode) {
        self.handle(SourceClass::Keyboard, code, InputEdge::End);
    }

    /// `button` is the platform's mouse button index, resolved through the config.
    pub fn on_mouse_down(&mut self, button: u32) {
        if let Some(code) = self.map.mouse_button_code(button) {
            self.handle(SourceClass::Mouse, code, InputEdge::Start);
        }
    }

    pub fn on_mouse_up(&mut self, button: u32) {
        if let Some(code) = self.map.mouse_button_code(button) {
            self.handle(SourceClass::Mouse, code, InputEdge::End);
        }
    }

    pub fn on_mouse_move(&mut self, delta_x: f32, delta_y: f32) {
        self.handle(SourceClass::Mouse, input_codes::MOUSE_X, InputEdge::Value(delta_x));
        self.handle(SourceClass::Mouse, input_codes::MOUSE_Y, InputEdge::Value(delta_y));
    }

    pub fn on_mouse_wheel(&mut self, scroll_x: f32, scroll_y: f32) {
        self.handle(SourceClass::Mouse, input_codes::MOUSE_WHEEL_X, InputEdge::Value(scroll_x));
        self.handle(SourceClass::Mouse, input_codes::MOUSE_WHEEL_Y, InputEdge::Value(scroll_y));
    }

    pub fn on_touch_start(&mut self, code: RawCode) {
        self.handle(SourceClass::Touch, code, InputEdge::Start);
    }

    pub fn on_touch_end(&mut self, code: RawCode) {
        self.handle(SourceClass::Touch, code, InputEdge::End);
    }

    pub fn on_touch_cancel(&mut self, code: RawCode) {
        self.handle(SourceClass::Touch, code, InputEdge::Cancel);
    }

    /// Virtual joystick axis in [-1, 1]. Released through [`Self::on_touch_end`].
    pub fn on_joystick_axis(&mut self, code: RawCode, value: f32) {
        self.handle(SourceClass::Touch, code, InputEdge::Value(value));
    }

    pub fn on_gamepad_button_down(&mut self, code: RawCode) {
        self.handle(SourceClass::Gamepad, code, InputEdge::Start);
    }

    pub fn on_gamepad_button_up(&mut self, code: RawCode) {
        self.handle(SourceClass::Gamepad, code, InputEdge::End);
    }

    pub fn on_gamepad_axis(&mut self, code: RawCode, value: f32) {
        self.handle(SourceClass::Gamepad, code, InputEdge::Value(value));
    }

    /// Focus loss: release everything that is down so no axis keeps a value.
    pub fn cancel_all(&mut self) {
        let held = self.held.snapshot();
        let mut stray: Vec<RawCode> = self
            .pressed
            .iter()
            .filter(|code| !held.iter().any(|&(_, h)| h == *code))
            .collect();
        stray.sort_unstable();

        if held.is_empty() && stray.is_empty() {
            return;
        }
        debug!(held = held.len(), stray = stray.len(), "cancelling all active input");

        for (class, code) in held {
            self.handle(class, code, InputEdge::Cancel);
        }
        // Codes pressed without a held entry come from touch widgets.
        for code in stray {
            self.handle(SourceClass::Touch, code, InputEdge::Cancel);
        }
    }

    /// Held re-fire, once per simulation frame after all edge events are drained.
    /// Every held digital code feeds its axes with magnitude 1.
    pub fn tick(&mut self) {
        for class in SourceClass::ALL {
            for &code in self.held.held(class).codes() {
                Self::fire(&self.map, &mut self.registry, code, 1.0, false);
            }
        }
    }

    // ==================================================================================
    // DISPATCH
    // ==================================================================================

    fn press(&mut self, class: SourceClass, code: RawCode) {
        self.pressed.press(code);
        // Platform auto-repeat re-sends down edges; actions fire once per real press.
        if !self.held.start(class, code) {
            return;
        }

        for binding in self.map.bindings(code) {
            if let Some(Mapping::Action(action)) = self.registry.get_mut(&binding.name) {
                action.execute();
            }
        }
    }

    fn release(&mut self, class: SourceClass, code: RawCode) {
        self.pressed.release(code);
        self.held.end(class, code);

        for binding in self.map.bindings(code) {
            if let Some(mapping) = self.registry.get_mut(&binding.name) {
                mapping.cancel();
            }
        }
    }

    fn fire(
        map: &InputMap,
        registry: &mut MappingRegistry,
        code: RawCode,
        magnitude: f32,
        fire_actions: bool,
    ) {
        for binding in map.bindings(code) {
            match (registry.get_mut(&binding.name), binding.kind) {
                (Some(Mapping::Axis(axis)), BindingKind::Axis { scale }) => {
                    axis.execute(magnitude * scale);
                }
                (Some(Mapping::Action(action)), BindingKind::Action) if fire_actions => {
                    action.execute();
                }
                _ => {}
            }
        }
    }
}
