// crates/input_core/src/input/platform.rs
//! winit -> router shim. Keeps raw device state out of App / PlatformRunner.

use glam::Vec2;
use input_shared::{input_codes, RawCode};
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::router::InputRouter;

/// Pixels per wheel "line" for touchpads that report pixel deltas.
const PIXELS_PER_LINE: f32 = 40.0;

#[derive(Debug, Default)]
pub struct WinitInputAdapter {
    last_cursor: Option<Vec2>,
}

impl WinitInputAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a single winit WindowEvent and forward it to the router.
    /// Touches are left to App, which routes them to on-screen widgets.
    pub fn handle_event(&mut self, router: &mut InputRouter, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event: key_event, .. } => {
                // The held re-fire already covers auto-repeat.
                if key_event.repeat {
                    return;
                }
                let PhysicalKey::Code(keycode) = key_event.physical_key else {
                    return;
                };
                let Some(code) = keycode_to_raw(keycode) else {
                    return;
                };
                match key_event.state {
                    ElementState::Pressed => router.on_key_down(code),
                    ElementState::Released => router.on_key_up(code),
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let index = mouse_button_index(*button);
                match state {
                    ElementState::Pressed => router.on_mouse_down(index),
                    ElementState::Released => router.on_mouse_up(index),
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(router, Vec2::new(position.x as f32, position.y as f32));
            }

            WindowEvent::CursorLeft { .. } => self.last_cursor = None,

            WindowEvent::MouseWheel { delta, .. } => {
                let (x, y) = wheel_lines(*delta);
                router.on_mouse_wheel(x, y);
            }

            WindowEvent::Focused(false) => {
                self.last_cursor = None;
                router.cancel_all();
            }

            _ => {}
        }
    }

    /// Turns absolute cursor positions into per-event deltas, up positive.
    /// The first position after (re)entering only seeds the tracker.
    pub fn cursor_moved(&mut self, router: &mut InputRouter, position: Vec2) {
        if let Some(last) = self.last_cursor.replace(position) {
            let delta = position - last;
            router.on_mouse_move(delta.x, -delta.y);
        }
    }
}

/// Platform button index, numbered like DOM `MouseEvent.button`.
pub fn mouse_button_index(button: MouseButton) -> u32 {
    match button {
        MouseButton::Left => 0,
        MouseButton::Middle => 1,
        MouseButton::Right => 2,
        MouseButton::Back => 3,
        MouseButton::Forward => 4,
        MouseButton::Other(index) => u32::from(index),
    }
}

pub fn wheel_lines(delta: MouseScrollDelta) -> (f32, f32) {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => (x, y),
        MouseScrollDelta::PixelDelta(PhysicalPosition { x, y }) => {
            (x as f32 / PIXELS_PER_LINE, y as f32 / PIXELS_PER_LINE)
        }
    }
}

/// Maps a physical key onto the DOM `keyCode` numbering used by mapping configs.
pub fn keycode_to_raw(key: KeyCode) -> Option<RawCode> {
    use input_codes::*;

    let code = match key {
        KeyCode::Backspace => BACKSPACE,
        KeyCode::Tab => TAB,
        KeyCode::Enter => ENTER,
        KeyCode::ShiftLeft => SHIFT_LEFT,
        KeyCode::ControlLeft => CTRL_LEFT,
        KeyCode::AltLeft => ALT_LEFT,
        KeyCode::Pause => PAUSE,
        KeyCode::CapsLock => CAPS_LOCK,
        KeyCode::Escape => ESCAPE,
        KeyCode::Space => SPACE,
        KeyCode::PageUp => PAGE_UP,
        KeyCode::PageDown => PAGE_DOWN,
        KeyCode::End => END,
        KeyCode::Home => HOME,
        KeyCode::ArrowLeft => ARROW_LEFT,
        KeyCode::ArrowUp => ARROW_UP,
        KeyCode::ArrowRight => ARROW_RIGHT,
        KeyCode::ArrowDown => ARROW_DOWN,
        KeyCode::Insert => INSERT,
        KeyCode::Delete => DELETE,

        KeyCode::Digit0 => DIGIT_0,
        KeyCode::Digit1 => DIGIT_0 + 1,
        KeyCode::Digit2 => DIGIT_0 + 2,
        KeyCode::Digit3 => DIGIT_0 + 3,
        KeyCode::Digit4 => DIGIT_0 + 4,
        KeyCode::Digit5 => DIGIT_0 + 5,
        KeyCode::Digit6 => DIGIT_0 + 6,
        KeyCode::Digit7 => DIGIT_0 + 7,
        KeyCode::Digit8 => DIGIT_0 + 8,
        KeyCode::Digit9 => DIGIT_0 + 9,

        KeyCode::KeyA => KEY_A,
        KeyCode::KeyB => KEY_A + 1,
        KeyCode::KeyC => KEY_A + 2,
        KeyCode::KeyD => KEY_A + 3,
        KeyCode::KeyE => KEY_A + 4,
        KeyCode::KeyF => KEY_A + 5,
        KeyCode::KeyG => KEY_A + 6,
        KeyCode::KeyH => KEY_A + 7,
        KeyCode::KeyI => KEY_A + 8,
        KeyCode::KeyJ => KEY_A + 9,
        KeyCode::KeyK => KEY_A + 10,
        KeyCode::KeyL => KEY_A + 11,
        KeyCode::KeyM => KEY_A + 12,
        KeyCode::KeyN => KEY_A + 13,
        KeyCode::KeyO => KEY_A + 14,
        KeyCode::KeyP => KEY_A + 15,
        KeyCode::KeyQ => KEY_A + 16,
        KeyCode::KeyR => KEY_A + 17,
        KeyCode::KeyS => KEY_A + 18,
        KeyCode::KeyT => KEY_A + 19,
        KeyCode::KeyU => KEY_A + 20,
        KeyCode::KeyV => KEY_A + 21,
        KeyCode::KeyW => KEY_A + 22,
        KeyCode::KeyX => KEY_A + 23,
        KeyCode::KeyY => KEY_A + 24,
        KeyCode::KeyZ => KEY_A + 25,

        KeyCode::Numpad0 => NUM_0,
        KeyCode::Numpad1 => NUM_0 + 1,
        KeyCode::Numpad2 => NUM_0 + 2,
        KeyCode::Numpad3 => NUM_0 + 3,
        KeyCode::Numpad4 => NUM_0 + 4,
        KeyCode::Numpad5 => NUM_0 + 5,
        KeyCode::Numpad6 => NUM_0 + 6,
        KeyCode::Numpad7 => NUM_0 + 7,
        KeyCode::Numpad8 => NUM_0 + 8,
        KeyCode::Numpad9 => NUM_0 + 9,
        KeyCode::NumpadMultiply => NUM_MULTIPLY,
        KeyCode::NumpadAdd => NUM_PLUS,
        KeyCode::NumpadSubtract => NUM_SUBTRACT,
        KeyCode::NumpadDecimal => NUM_DECIMAL,
        KeyCode::NumpadDivide => NUM_DIVIDE,
        KeyCode::NumpadEnter => NUM_ENTER,

        KeyCode::F1 => F1,
        KeyCode::F2 => F1 + 1,
        KeyCode::F3 => F1 + 2,
        KeyCode::F4 => F1 + 3,
        KeyCode::F5 => F1 + 4,
        KeyCode::F6 => F1 + 5,
        KeyCode::F7 => F1 + 6,
        KeyCode::F8 => F1 + 7,
        KeyCode::F9 => F1 + 8,
        KeyCode::F10 => F1 + 9,
        KeyCode::F11 => F1 + 10,
        KeyCode::F12 => F1 + 11,

        KeyCode::NumLock => NUM_LOCK,
        KeyCode::ScrollLock => SCROLL_LOCK,
        KeyCode::Semicolon => SEMICOLON,
        KeyCode::Equal => EQUAL,
        KeyCode::Comma => COMMA,
        KeyCode::Minus => DASH,
        KeyCode::Period => PERIOD,
        KeyCode::Slash => SLASH,
        KeyCode::Backquote => BACK_QUOTE,
        KeyCode::BracketLeft => BRACKET_LEFT,
        KeyCode::Backslash => BACKSLASH,
        KeyCode::BracketRight => BRACKET_RIGHT,
        KeyCode::Quote => QUOTE,

        KeyCode::ShiftRight => SHIFT_RIGHT,
        KeyCode::ControlRight => CTRL_RIGHT,
        KeyCode::AltRight => ALT_RIGHT,

        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use input_shared::input_codes::*;
    use input_shared::MappingConfig;

    fn router() -> InputRouter {
        let config = MappingConfig::default()
            .with_axis("Turn", MOUSE_X, 1.0)
            .with_axis("LookUp", MOUSE_Y, 1.0)
            .with_axis("MoveForward", KEY_W, 1.0);
        let mut router = InputRouter::from_config(&config).unwrap();
        router.bind_axis("Turn", |_| {});
        router.bind_axis("LookUp", |_| {});
        router.bind_axis("MoveForward", |_| {});
        router
    }

    #[test]
    fn keys_use_dom_numbering() {
        assert_eq!(keycode_to_raw(KeyCode::KeyW), Some(KEY_W));
        assert_eq!(keycode_to_raw(KeyCode::KeyS), Some(KEY_S));
        assert_eq!(keycode_to_raw(KeyCode::KeyZ), Some(90));
        assert_eq!(keycode_to_raw(KeyCode::Digit7), Some(55));
        assert_eq!(keycode_to_raw(KeyCode::F12), Some(123));
        assert_eq!(keycode_to_raw(KeyCode::AltRight), Some(ALT_RIGHT));
        assert_eq!(keycode_to_raw(KeyCode::Fn), None);
    }

    #[test]
    fn mouse_buttons_use_dom_numbering() {
        assert_eq!(mouse_button_index(MouseButton::Left), 0);
        assert_eq!(mouse_button_index(MouseButton::Middle), 1);
        assert_eq!(mouse_button_index(MouseButton::Right), 2);
        assert_eq!(mouse_button_index(MouseButton::Other(6)), 6);
    }

    #[test]
    fn pixel_wheel_deltas_become_lines() {
        assert_eq!(wheel_lines(MouseScrollDelta::LineDelta(0.0, -2.0)), (0.0, -2.0));
        assert_eq!(
            wheel_lines(MouseScrollDelta::PixelDelta(PhysicalPosition::new(80.0, 20.0))),
            (2.0, 0.5)
        );
    }

    #[test]
    fn first_cursor_position_only_seeds() {
        let mut router = router();
        let mut adapter = WinitInputAdapter::new();

        adapter.cursor_moved(&mut router, Vec2::new(10.0, 10.0));
        assert_eq!(router.axis_value("Turn"), Some(0.0));

        adapter.cursor_moved(&mut router, Vec2::new(13.0, 6.0));
        assert_eq!(router.axis_value("Turn"), Some(3.0));
        assert_eq!(router.axis_value("LookUp"), Some(4.0));
    }

    #[test]
    fn focus_loss_cancels_held_keys() {
        let mut router = router();
        let mut adapter = WinitInputAdapter::new();

        router.on_key_down(KEY_W);
        router.tick();
        assert_eq!(router.axis_value("MoveForward"), Some(1.0));

        adapter.handle_event(&mut router, &WindowEvent::Focused(false));

        assert_eq!(router.axis_value("MoveForward"), Some(0.0));
        assert!(!router.is_pressed(KEY_W));
    }
}
