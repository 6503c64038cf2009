// crates/input_core/src/app.rs

use glam::Vec2;
use input_shared::{MappingConfig, RawCode};
use tracing::{debug, info};
use winit::event::{TouchPhase, WindowEvent};

#[cfg(feature = "gamepad")]
use crate::input::{GamepadSet, GilrsPoller};
use crate::input::overlay::TOUCH_FIRST_PLATFORM;
use crate::input::{
    AssetSource, ConfigError, InputDefaults, InputRouter, OverlayLoader, VirtualButton,
    VirtualJoystick, WinitInputAdapter,
};

/// An on-screen stick plus the finger currently dragging it.
struct TouchStick {
    joystick: VirtualJoystick,
    finger: Option<u64>,
}

struct TouchButton {
    button: VirtualButton,
    finger: Option<u64>,
}

/// Owns the router and every device adapter feeding it.
/// PlatformRunner drives it; gameplay binds its callbacks through `router_mut`.
pub struct App {
    pub window_title: String,
    router: InputRouter,
    adapter: WinitInputAdapter,
    touch_sticks: Vec<TouchStick>,
    touch_buttons: Vec<TouchButton>,
    #[cfg(feature = "gamepad")]
    gamepads: Option<GilrsPoller>,
}

impl App {
    pub fn new(config: &MappingConfig) -> Result<Self, ConfigError> {
        let router = InputRouter::from_config(config)?;
        info!(
            axes = config.axis_mapping_set.len(),
            actions = config.action_mapping_set.len(),
            "input router ready"
        );

        Ok(Self {
            window_title: "Rust Engine: Input Mapping".to_string(),
            router,
            adapter: WinitInputAdapter::new(),
            touch_sticks: Vec::new(),
            touch_buttons: Vec::new(),
            #[cfg(feature = "gamepad")]
            gamepads: None,
        })
    }

    /// App with the built-in layout from [`InputDefaults`].
    pub fn with_defaults() -> Result<Self, ConfigError> {
        Self::new(&InputDefaults::mapping_config())
    }

    pub fn router(&self) -> &InputRouter {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut InputRouter {
        &mut self.router
    }

    /// Opens gilrs. Called by the runner once a window exists.
    #[cfg(feature = "gamepad")]
    pub fn enable_gamepads(&mut self) {
        if self.gamepads.is_none() {
            self.gamepads = Some(GilrsPoller::new(GamepadSet::default()));
        }
    }

    /// Adds an on-screen stick. `origin` is in window pixels (y down).
    pub fn add_touch_stick(&mut self, origin: Vec2, radius: f32, main_code: RawCode, alt_code: RawCode) {
        self.touch_sticks.push(TouchStick {
            joystick: VirtualJoystick::new(flip_y(origin), radius, main_code, alt_code),
            finger: None,
        });
    }

    pub fn touch_stick(&self, index: usize) -> Option<&VirtualJoystick> {
        self.touch_sticks.get(index).map(|stick| &stick.joystick)
    }

    /// Adds a round on-screen button. `origin` is in window pixels (y down).
    pub fn add_touch_button(&mut self, origin: Vec2, radius: f32, code: RawCode) {
        self.touch_buttons.push(TouchButton {
            button: VirtualButton::new(flip_y(origin), radius, code),
            finger: None,
        });
    }

    pub fn touch_button(&self, index: usize) -> Option<&VirtualButton> {
        self.touch_buttons.get(index).map(|button| &button.button)
    }

    /// Starts the touch overlay load if the config or platform asks for one.
    pub fn request_touch_overlay<A>(&self, source: &mut dyn AssetSource<A>) -> OverlayLoader<A> {
        OverlayLoader::start(self.router.map(), TOUCH_FIRST_PLATFORM, source)
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::Touch(touch) => {
                let location = Vec2::new(touch.location.x as f32, touch.location.y as f32);
                if self.touch(touch.phase, touch.id, location) {
                    return;
                }
            }
            WindowEvent::Focused(false) => {
                debug!("focus lost, cancelling input");
                for stick in &mut self.touch_sticks {
                    if stick.finger.take().is_some() {
                        stick.joystick.on_touch_cancel(&mut self.router);
                    }
                }
                for button in &mut self.touch_buttons {
                    if button.finger.take().is_some() {
                        button.button.on_touch_cancel(&mut self.router);
                    }
                }
            }
            _ => {}
        }
        self.adapter.handle_event(&mut self.router, event);
    }

    /// Offers a touch to the on-screen widgets. Returns true if one consumed it.
    /// A touch that lands on no widget does nothing.
    /// `location` is in window pixels (y down).
    pub fn touch(&mut self, phase: TouchPhase, finger: u64, location: Vec2) -> bool {
        let location = flip_y(location);

        if let Some(stick) = self
            .touch_sticks
            .iter_mut()
            .find(|stick| stick.finger == Some(finger))
        {
            match phase {
                TouchPhase::Started | TouchPhase::Moved => {
                    stick.joystick.on_touch_move(&mut self.router, location)
                }
                TouchPhase::Ended => {
                    stick.finger = None;
                    stick.joystick.on_touch_end(&mut self.router);
                }
                TouchPhase::Cancelled => {
                    stick.finger = None;
                    stick.joystick.on_touch_cancel(&mut self.router);
                }
            }
            return true;
        }

        if let Some(button) = self
            .touch_buttons
            .iter_mut()
            .find(|button| button.finger == Some(finger))
        {
            match phase {
                TouchPhase::Started | TouchPhase::Moved => {}
                TouchPhase::Ended => {
                    button.finger = None;
                    button.button.on_touch_end(&mut self.router);
                }
                TouchPhase::Cancelled => {
                    button.finger = None;
                    button.button.on_touch_cancel(&mut self.router);
                }
            }
            return true;
        }

        if phase != TouchPhase::Started {
            return false;
        }

        if let Some(stick) = self
            .touch_sticks
            .iter_mut()
            .find(|stick| stick.finger.is_none() && stick.joystick.hit_test(location))
        {
            stick.finger = Some(finger);
            stick.joystick.on_touch_start(&mut self.router, location);
            return true;
        }

        let Some(button) = self
            .touch_buttons
            .iter_mut()
            .find(|button| button.finger.is_none() && button.button.hit_test(location))
        else {
            debug!(finger, "touch hit no widget");
            return false;
        };
        button.finger = Some(finger);
        button.button.on_touch_start(&mut self.router);
        true
    }

    /// Per-frame device work: drains pending gamepad events.
    pub fn begin_frame(&mut self) {
        self.poll_gamepads();
    }

    /// Input half of one fixed step. Analog sources that only report on change
    /// re-send their current value, then held codes re-fire.
    pub fn step_input(&mut self) {
        for stick in &mut self.touch_sticks {
            stick.joystick.refresh(&mut self.router);
        }
        self.refresh_gamepads();
        self.router.tick();
    }

    #[cfg(feature = "gamepad")]
    fn poll_gamepads(&mut self) {
        if let Some(gamepads) = self.gamepads.as_mut() {
            gamepads.poll(&mut self.router);
        }
    }

    #[cfg(not(feature = "gamepad"))]
    fn poll_gamepads(&mut self) {}

    #[cfg(feature = "gamepad")]
    fn refresh_gamepads(&mut self) {
        if let Some(gamepads) = self.gamepads.as_mut() {
            gamepads.refresh(&mut self.router);
        }
    }

    #[cfg(not(feature = "gamepad"))]
    fn refresh_gamepads(&mut self) {}
}

/// Window pixels are y down; router axes are up positive.
fn flip_y(v: Vec2) -> Vec2 {
    Vec2::new(v.x, -v.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use input_shared::input_codes::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use winit::dpi::PhysicalPosition;
    use winit::event::{DeviceId, Touch};

    fn touch_event(phase: TouchPhase, id: u64, x: f64, y: f64) -> WindowEvent {
        WindowEvent::Touch(Touch {
            // SAFETY: test-only placeholder, never handed back to winit.
            device_id: unsafe { DeviceId::dummy() },
            phase,
            location: PhysicalPosition::new(x, y),
            force: None,
            id,
        })
    }

    /// Default layout with one stick and nothing bound.
    fn unbound_app() -> App {
        let mut app = App::with_defaults().unwrap();
        app.add_touch_stick(
            Vec2::new(100.0, 500.0),
            50.0,
            LEFT_THUMBSTICK_AXIS_X,
            LEFT_THUMBSTICK_AXIS_Y,
        );
        app
    }

    fn app() -> App {
        let mut app = unbound_app();
        app.router_mut().bind_axis("MoveRight", |_| {});
        app.router_mut().bind_axis("MoveForward", |_| {});
        app.router_mut().bind_action("Jump", || {});
        app
    }

    fn count_jumps(app: &mut App) -> Rc<RefCell<u32>> {
        let jumps = Rc::new(RefCell::new(0));
        let sink = jumps.clone();
        app.router_mut().bind_action("Jump", move || *sink.borrow_mut() += 1);
        jumps
    }

    #[test]
    fn stick_claims_touches_on_its_disc() {
        let mut app = app();

        assert!(app.touch(TouchPhase::Started, 7, Vec2::new(110.0, 490.0)));
        assert!(app.touch_stick(0).unwrap().is_active());

        // Dragging up the screen is forward.
        assert!(app.touch(TouchPhase::Moved, 7, Vec2::new(100.0, 300.0)));
        assert_eq!(app.router().axis_value("MoveForward"), Some(1.0));
        assert_eq!(app.router().axis_value("MoveRight"), Some(0.0));

        assert!(app.touch(TouchPhase::Ended, 7, Vec2::new(100.0, 300.0)));
        assert_eq!(app.router().axis_value("MoveForward"), Some(0.0));
        assert!(!app.router().is_pressed(LEFT_THUMBSTICK_AXIS_Y));
    }

    #[test]
    fn touches_elsewhere_pass_through() {
        let mut app = app();

        assert!(!app.touch(TouchPhase::Started, 1, Vec2::new(600.0, 100.0)));
        assert!(!app.touch(TouchPhase::Moved, 1, Vec2::new(100.0, 500.0)));
        assert!(!app.touch_stick(0).unwrap().is_active());
    }

    #[test]
    fn focus_loss_releases_stick_and_keys() {
        let mut app = app();
        app.router_mut().on_key_down(KEY_D);
        app.touch(TouchPhase::Started, 3, Vec2::new(100.0, 520.0));

        app.handle_window_event(&WindowEvent::Focused(false));

        assert!(!app.touch_stick(0).unwrap().is_active());
        assert!(!app.router().is_pressed(KEY_D));
        assert!(!app.router().is_pressed(LEFT_THUMBSTICK_AXIS_X));
        assert_eq!(app.router().axis_value("MoveForward"), Some(0.0));
    }

    #[test]
    fn resting_stick_reaches_each_step_once() {
        let mut app = App::with_defaults().unwrap();
        let sum = Rc::new(RefCell::new(0.0_f32));
        let sink = sum.clone();
        app.router_mut().bind_axis("MoveRight", move |v| *sink.borrow_mut() += v);
        app.add_touch_stick(Vec2::new(100.0, 500.0), 50.0, LEFT_THUMBSTICK_AXIS_X, NONE);

        app.touch(TouchPhase::Started, 2, Vec2::new(112.5, 500.0));
        let mut per_step = Vec::new();
        for _ in 0..4 {
            app.step_input();
            per_step.push(std::mem::take(&mut *sum.borrow_mut()));
        }

        assert_eq!(per_step, vec![0.25; 4]);

        // A drag mid-frame replaces the re-send for that step.
        app.touch(TouchPhase::Moved, 2, Vec2::new(125.0, 500.0));
        app.step_input();
        assert_eq!(std::mem::take(&mut *sum.borrow_mut()), 0.5);
    }

    #[test]
    fn tap_away_from_widgets_fires_nothing() {
        let mut app = unbound_app();
        let jumps = count_jumps(&mut app);
        app.add_touch_button(Vec2::new(900.0, 600.0), 40.0, GAMEPAD_TOUCH_1);

        for finger in [0, 1, 20, 21] {
            for phase in [TouchPhase::Started, TouchPhase::Ended] {
                app.handle_window_event(&touch_event(phase, finger, 600.0, 100.0));
            }
        }
        app.step_input();

        assert_eq!(*jumps.borrow(), 0);
        assert!(!app.router().is_pressed(GAMEPAD_TOUCH_1));
        assert!(!app.router().is_pressed(GAMEPAD_TOUCH_2));
        assert!(!app.touch_stick(0).unwrap().is_active());
    }

    #[test]
    fn button_claims_its_finger_until_release() {
        let mut app = unbound_app();
        let jumps = count_jumps(&mut app);
        app.add_touch_button(Vec2::new(900.0, 600.0), 40.0, GAMEPAD_TOUCH_1);

        app.handle_window_event(&touch_event(TouchPhase::Started, 4, 910.0, 620.0));
        assert!(app.router().is_pressed(GAMEPAD_TOUCH_1));

        // Sliding off the button keeps it held.
        assert!(app.touch(TouchPhase::Moved, 4, Vec2::new(300.0, 300.0)));
        assert!(app.router().is_pressed(GAMEPAD_TOUCH_1));

        app.handle_window_event(&touch_event(TouchPhase::Ended, 4, 300.0, 300.0));
        assert!(!app.router().is_pressed(GAMEPAD_TOUCH_1));
        assert_eq!(*jumps.borrow(), 1);
        assert_eq!(app.touch_button(0).unwrap().code(), GAMEPAD_TOUCH_1);
    }

    #[test]
    fn focus_loss_releases_held_button() {
        let mut app = app();
        app.add_touch_button(Vec2::new(900.0, 600.0), 40.0, GAMEPAD_TOUCH_2);
        assert!(app.touch(TouchPhase::Started, 9, Vec2::new(900.0, 600.0)));

        app.handle_window_event(&WindowEvent::Focused(false));

        assert!(!app.router().is_pressed(GAMEPAD_TOUCH_2));
        // The finger is no longer claimed.
        assert!(!app.touch(TouchPhase::Ended, 9, Vec2::new(900.0, 600.0)));
    }
}
