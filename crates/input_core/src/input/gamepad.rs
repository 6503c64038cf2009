// crates/input_core/src/input/gamepad.rs
//! Physical gamepad -> router shim.
//!
//! [`GamepadAdapter`] works on its own [`GamepadInput`] events so the mapping logic
//! runs without a device; [`GamepadSet`] keeps one adapter per pad and `GilrsPoller`
//! (feature `gamepad`) feeds it from gilrs.

use std::collections::BTreeMap;

use glam::Vec2;
use input_shared::input_codes::*;
use input_shared::RawCode;

use super::router::InputRouter;

pub const DEFAULT_STICK_DEADZONE: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stick {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GamepadInput {
    ButtonPressed(RawCode),
    ButtonReleased(RawCode),
    /// One stick component changed. `value` in [-1, 1], up and right positive.
    StickX(Stick, f32),
    StickY(Stick, f32),
    Disconnected,
}

/// Raw codes one stick reports on: two axes plus four digital directions
/// (up, left, down, right).
#[derive(Debug, Clone, Copy)]
struct StickCodes {
    axis_x: RawCode,
    axis_y: RawCode,
    directions: [RawCode; 4],
}

const LEFT_STICK: StickCodes = StickCodes {
    axis_x: LEFT_THUMBSTICK_AXIS_X,
    axis_y: LEFT_THUMBSTICK_AXIS_Y,
    directions: [
        LEFT_THUMBSTICK_UP,
        LEFT_THUMBSTICK_LEFT,
        LEFT_THUMBSTICK_DOWN,
        LEFT_THUMBSTICK_RIGHT,
    ],
};

const RIGHT_STICK: StickCodes = StickCodes {
    axis_x: RIGHT_THUMBSTICK_AXIS_X,
    axis_y: RIGHT_THUMBSTICK_AXIS_Y,
    directions: [
        RIGHT_THUMBSTICK_UP,
        RIGHT_THUMBSTICK_LEFT,
        RIGHT_THUMBSTICK_DOWN,
        RIGHT_THUMBSTICK_RIGHT,
    ],
};

#[derive(Debug, Clone, Copy)]
struct StickState {
    codes: StickCodes,
    raw: Vec2,
    output: Vec2,
    directions: [bool; 4],
    /// Output already sent since the last `refresh`.
    fresh: bool,
}

impl StickState {
    fn new(codes: StickCodes) -> Self {
        Self {
            codes,
            raw: Vec2::ZERO,
            output: Vec2::ZERO,
            directions: [false; 4],
            fresh: false,
        }
    }
}

/// Radial deadzone, rescaled so output starts at 0 just outside the zone.
pub fn apply_radial_deadzone(raw: Vec2, deadzone: f32) -> Vec2 {
    let length = raw.length();
    if length <= deadzone || deadzone >= 1.0 {
        return Vec2::ZERO;
    }
    let scaled = ((length - deadzone) / (1.0 - deadzone)).min(1.0);
    raw / length * scaled
}

#[derive(Debug, Clone)]
pub struct GamepadAdapter {
    deadzone: f32,
    sticks: [StickState; 2],
    buttons: Vec<RawCode>,
}

impl Default for GamepadAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_STICK_DEADZONE)
    }
}

impl GamepadAdapter {
    pub fn new(deadzone: f32) -> Self {
        Self {
            deadzone: deadzone.clamp(0.0, 0.99),
            sticks: [StickState::new(LEFT_STICK), StickState::new(RIGHT_STICK)],
            buttons: Vec::new(),
        }
    }

    pub fn stick_output(&self, stick: Stick) -> Vec2 {
        self.sticks[stick as usize].output
    }

    pub fn handle(&mut self, router: &mut InputRouter, input: GamepadInput) {
        match input {
            GamepadInput::ButtonPressed(code) => {
                if !self.buttons.contains(&code) {
                    self.buttons.push(code);
                }
                router.on_gamepad_button_down(code);
            }
            GamepadInput::ButtonReleased(code) => {
                self.buttons.retain(|&c| c != code);
                router.on_gamepad_button_up(code);
            }
            GamepadInput::StickX(stick, value) => {
                self.sticks[stick as usize].raw.x = value;
                self.update_stick(router, stick);
            }
            GamepadInput::StickY(stick, value) => {
                self.sticks[stick as usize].raw.y = value;
                self.update_stick(router, stick);
            }
            GamepadInput::Disconnected => self.release_all(router),
        }
    }

    /// Re-sends deflected stick axes, once per simulation step before the held
    /// re-fire. Pads only report changes, so a stick held still would otherwise fall
    /// silent. A stick that already reported since the last call is skipped.
    pub fn refresh(&mut self, router: &mut InputRouter) {
        for state in &mut self.sticks {
            if state.output != Vec2::ZERO && !state.fresh {
                router.on_gamepad_axis(state.codes.axis_x, state.output.x);
                router.on_gamepad_axis(state.codes.axis_y, state.output.y);
            }
            state.fresh = false;
        }
    }

    fn update_stick(&mut self, router: &mut InputRouter, stick: Stick) {
        let deadzone = self.deadzone;
        let state = &mut self.sticks[stick as usize];

        let output = apply_radial_deadzone(state.raw, deadzone);
        if output != state.output {
            state.output = output;
            state.fresh = true;
            router.on_gamepad_axis(state.codes.axis_x, output.x);
            router.on_gamepad_axis(state.codes.axis_y, output.y);
        }

        let raw = state.raw;
        let wanted = [
            raw.y > deadzone,
            raw.x < -deadzone,
            raw.y < -deadzone,
            raw.x > deadzone,
        ];
        for (i, &down) in wanted.iter().enumerate() {
            if down == state.directions[i] {
                continue;
            }
            state.directions[i] = down;
            let code = state.codes.directions[i];
            if down {
                router.on_gamepad_button_down(code);
            } else {
                router.on_gamepad_button_up(code);
            }
        }
    }

    fn release_all(&mut self, router: &mut InputRouter) {
        for code in self.buttons.drain(..) {
            router.on_gamepad_button_up(code);
        }
        for state in &mut self.sticks {
            for (i, down) in state.directions.iter_mut().enumerate() {
                if *down {
                    *down = false;
                    router.on_gamepad_button_up(state.codes.directions[i]);
                }
            }
            if state.output != Vec2::ZERO {
                router.on_gamepad_axis(state.codes.axis_x, 0.0);
                router.on_gamepad_axis(state.codes.axis_y, 0.0);
            }
            state.raw = Vec2::ZERO;
            state.output = Vec2::ZERO;
            state.fresh = false;
        }
    }
}

/// One [`GamepadAdapter`] per connected pad, keyed by the backend's pad id, so
/// unplugging one pad only releases what that pad was holding.
#[derive(Debug, Clone)]
pub struct GamepadSet {
    deadzone: f32,
    pads: BTreeMap<usize, GamepadAdapter>,
}

impl Default for GamepadSet {
    fn default() -> Self {
        Self::new(DEFAULT_STICK_DEADZONE)
    }
}

impl GamepadSet {
    pub fn new(deadzone: f32) -> Self {
        Self {
            deadzone,
            pads: BTreeMap::new(),
        }
    }

    pub fn pad(&self, id: usize) -> Option<&GamepadAdapter> {
        self.pads.get(&id)
    }

    pub fn len(&self) -> usize {
        self.pads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pads.is_empty()
    }

    pub fn handle(&mut self, router: &mut InputRouter, id: usize, input: GamepadInput) {
        if input == GamepadInput::Disconnected {
            if let Some(mut pad) = self.pads.remove(&id) {
                pad.handle(router, input);
            }
            return;
        }

        let deadzone = self.deadzone;
        self.pads
            .entry(id)
            .or_insert_with(|| GamepadAdapter::new(deadzone))
            .handle(router, input);
    }

    pub fn refresh(&mut self, router: &mut InputRouter) {
        for pad in self.pads.values_mut() {
            pad.refresh(router);
        }
    }
}

#[cfg(feature = "gamepad")]
pub use gilrs_poller::GilrsPoller;

#[cfg(feature = "gamepad")]
mod gilrs_poller {
    use gilrs::{Axis, Button, EventType, Gilrs};
    use input_shared::input_codes::*;
    use input_shared::RawCode;
    use tracing::{info, warn};

    use super::{GamepadInput, GamepadSet, Stick};
    use crate::input::router::InputRouter;

    /// Drains gilrs events into a [`GamepadSet`] once per frame.
    pub struct GilrsPoller {
        /// None if gamepad support failed to initialize.
        gilrs: Option<Gilrs>,
        pads: GamepadSet,
    }

    impl GilrsPoller {
        pub fn new(pads: GamepadSet) -> Self {
            let gilrs = match Gilrs::new() {
                Ok(g) => Some(g),
                Err(e) => {
                    warn!(
                        "Failed to initialize gamepad support: {}. Gamepads will not be available.",
                        e
                    );
                    None
                }
            };
            Self { gilrs, pads }
        }

        pub fn poll(&mut self, router: &mut InputRouter) {
            let Some(gilrs) = self.gilrs.as_mut() else {
                return;
            };

            while let Some(event) = gilrs.next_event() {
                let input = match event.event {
                    EventType::ButtonPressed(button, _) => {
                        button_code(button).map(GamepadInput::ButtonPressed)
                    }
                    EventType::ButtonReleased(button, _) => {
                        button_code(button).map(GamepadInput::ButtonReleased)
                    }
                    EventType::AxisChanged(axis, value, _) => match axis {
                        Axis::LeftStickX => Some(GamepadInput::StickX(Stick::Left, value)),
                        Axis::LeftStickY => Some(GamepadInput::StickY(Stick::Left, value)),
                        Axis::RightStickX => Some(GamepadInput::StickX(Stick::Right, value)),
                        Axis::RightStickY => Some(GamepadInput::StickY(Stick::Right, value)),
                        _ => None,
                    },
                    EventType::Connected => {
                        info!("Gamepad {} connected", event.id);
                        None
                    }
                    EventType::Disconnected => {
                        info!("Gamepad {} disconnected", event.id);
                        Some(GamepadInput::Disconnected)
                    }
                    _ => None,
                };

                if let Some(input) = input {
                    self.pads.handle(router, usize::from(event.id), input);
                }
            }
        }

        /// Once per simulation step, see [`GamepadSet::refresh`].
        pub fn refresh(&mut self, router: &mut InputRouter) {
            self.pads.refresh(router);
        }
    }

    fn button_code(button: Button) -> Option<RawCode> {
        let code = match button {
            Button::South => GAMEPAD_SOUTH,
            Button::East => GAMEPAD_EAST,
            Button::North => GAMEPAD_NORTH,
            Button::West => GAMEPAD_WEST,
            Button::LeftTrigger => GAMEPAD_LEFT_SHOULDER,
            Button::RightTrigger => GAMEPAD_RIGHT_SHOULDER,
            Button::LeftTrigger2 => GAMEPAD_LEFT_TRIGGER,
            Button::RightTrigger2 => GAMEPAD_RIGHT_TRIGGER,
            Button::Select => GAMEPAD_SELECT,
            Button::Start => GAMEPAD_START,
            Button::Mode => GAMEPAD_MODE,
            Button::LeftThumb => GAMEPAD_LEFT_THUMB,
            Button::RightThumb => GAMEPAD_RIGHT_THUMB,
            Button::DPadUp => GAMEPAD_DPAD_UP,
            Button::DPadDown => GAMEPAD_DPAD_DOWN,
            Button::DPadLeft => GAMEPAD_DPAD_LEFT,
            Button::DPadRight => GAMEPAD_DPAD_RIGHT,
            _ => return None,
        };
        Some(code)
    }
}
