// crates/input_shared/src/input_types.rs
//! Raw input codes shared by the engine, the platform adapters and config files.

/// Stable integer identifying one physical input source.
/// Ranges are partitioned per source class (see [`input_codes`]).
pub type RawCode = u32;

/// Logical, engine-independent identifier gameplay code binds to.
pub type MappingName = String;

/// The class of device a raw code arrived from.
/// Each class owns its own held-code set inside the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceClass {
    Keyboard,
    Mouse,
    Touch,
    Gamepad,
}

impl SourceClass {
    /// Fixed order in which held codes are re-fired each tick.
    pub const ALL: [SourceClass; 4] = [
        SourceClass::Keyboard,
        SourceClass::Mouse,
        SourceClass::Touch,
        SourceClass::Gamepad,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Raw code catalogue.
///
/// Keyboard codes follow the DOM `keyCode` numbering so configs written for
/// browser builds stay valid. Everything at or above `100_000` is synthetic.
pub mod input_codes {
    use super::RawCode;

    pub const NONE: RawCode = 0;

    // ==================================================================================
    // KEYBOARD
    // ==================================================================================

    pub const MOBILE_BACK: RawCode = 6;
    pub const BACKSPACE: RawCode = 8;
    pub const TAB: RawCode = 9;
    pub const ENTER: RawCode = 13;
    pub const SHIFT_LEFT: RawCode = 16;
    pub const CTRL_LEFT: RawCode = 17;
    pub const ALT_LEFT: RawCode = 18;
    pub const PAUSE: RawCode = 19;
    pub const CAPS_LOCK: RawCode = 20;
    pub const ESCAPE: RawCode = 27;
    pub const SPACE: RawCode = 32;
    pub const PAGE_UP: RawCode = 33;
    pub const PAGE_DOWN: RawCode = 34;
    pub const END: RawCode = 35;
    pub const HOME: RawCode = 36;
    pub const ARROW_LEFT: RawCode = 37;
    pub const ARROW_UP: RawCode = 38;
    pub const ARROW_RIGHT: RawCode = 39;
    pub const ARROW_DOWN: RawCode = 40;
    pub const INSERT: RawCode = 45;
    pub const DELETE: RawCode = 46;

    /// `DIGIT_0 + n` for the top-row digit `n`.
    pub const DIGIT_0: RawCode = 48;
    /// `KEY_A + n` for the n-th letter of the alphabet.
    pub const KEY_A: RawCode = 65;
    pub const KEY_D: RawCode = 68;
    pub const KEY_E: RawCode = 69;
    pub const KEY_S: RawCode = 83;
    pub const KEY_W: RawCode = 87;
    /// `NUM_0 + n` for keypad digit `n`.
    pub const NUM_0: RawCode = 96;
    pub const NUM_MULTIPLY: RawCode = 106;
    pub const NUM_PLUS: RawCode = 107;
    pub const NUM_SUBTRACT: RawCode = 109;
    pub const NUM_DECIMAL: RawCode = 110;
    pub const NUM_DIVIDE: RawCode = 111;
    /// `F1 + n - 1` for function key `Fn` (1..=12).
    pub const F1: RawCode = 112;
    pub const NUM_LOCK: RawCode = 144;
    pub const SCROLL_LOCK: RawCode = 145;
    pub const SEMICOLON: RawCode = 186;
    pub const EQUAL: RawCode = 187;
    pub const COMMA: RawCode = 188;
    pub const DASH: RawCode = 189;
    pub const PERIOD: RawCode = 190;
    pub const SLASH: RawCode = 191;
    pub const BACK_QUOTE: RawCode = 192;
    pub const BRACKET_LEFT: RawCode = 219;
    pub const BACKSLASH: RawCode = 220;
    pub const BRACKET_RIGHT: RawCode = 221;
    pub const QUOTE: RawCode = 222;
    pub const SHIFT_RIGHT: RawCode = 2000;
    pub const CTRL_RIGHT: RawCode = 2001;
    pub const ALT_RIGHT: RawCode = 2002;
    pub const NUM_ENTER: RawCode = 2003;

    // ==================================================================================
    // MOUSE
    // ==================================================================================

    pub const MOUSE_X: RawCode = 100_000;
    pub const MOUSE_Y: RawCode = 100_001;

    pub const MOUSE_BUTTON_LEFT: RawCode = 100_010;
    pub const MOUSE_BUTTON_MIDDLE: RawCode = 100_011;
    pub const MOUSE_BUTTON_RIGHT: RawCode = 100_012;
    /// Buttons 4..=8 follow `MOUSE_BUTTON_RIGHT`.
    pub const MOUSE_BUTTON_COUNT: RawCode = 8;

    pub const MOUSE_WHEEL_X: RawCode = 100_050;
    pub const MOUSE_WHEEL_Y: RawCode = 100_051;

    // ==================================================================================
    // TOUCH (on-screen buttons)
    // ==================================================================================

    pub const GAMEPAD_TOUCH_1: RawCode = 100_100;
    pub const GAMEPAD_TOUCH_2: RawCode = 100_101;
    pub const GAMEPAD_TOUCH_3: RawCode = 100_102;
    pub const GAMEPAD_TOUCH_COUNT: RawCode = 20;

    /// Code of on-screen button `n` (0-based), wrapping after the last slot.
    pub const fn gamepad_touch(slot: u32) -> RawCode {
        GAMEPAD_TOUCH_1 + (slot % GAMEPAD_TOUCH_COUNT)
    }

    // ==================================================================================
    // THUMBSTICKS (virtual joystick widgets and physical pads share these)
    // ==================================================================================

    pub const LEFT_THUMBSTICK_AXIS_X: RawCode = 100_200;
    pub const LEFT_THUMBSTICK_AXIS_Y: RawCode = 100_201;
    pub const LEFT_THUMBSTICK_UP: RawCode = 100_202;
    pub const LEFT_THUMBSTICK_LEFT: RawCode = 100_203;
    pub const LEFT_THUMBSTICK_DOWN: RawCode = 100_204;
    pub const LEFT_THUMBSTICK_RIGHT: RawCode = 100_205;
    pub const RIGHT_THUMBSTICK_AXIS_X: RawCode = 100_206;
    pub const RIGHT_THUMBSTICK_AXIS_Y: RawCode = 100_207;
    pub const RIGHT_THUMBSTICK_UP: RawCode = 100_208;
    pub const RIGHT_THUMBSTICK_LEFT: RawCode = 100_209;
    pub const RIGHT_THUMBSTICK_DOWN: RawCode = 100_210;
    pub const RIGHT_THUMBSTICK_RIGHT: RawCode = 100_211;

    // ==================================================================================
    // GAMEPAD BUTTONS
    // ==================================================================================

    pub const GAMEPAD_SOUTH: RawCode = 100_300;
    pub const GAMEPAD_EAST: RawCode = 100_301;
    pub const GAMEPAD_NORTH: RawCode = 100_302;
    pub const GAMEPAD_WEST: RawCode = 100_303;
    pub const GAMEPAD_LEFT_SHOULDER: RawCode = 100_304;
    pub const GAMEPAD_RIGHT_SHOULDER: RawCode = 100_305;
    pub const GAMEPAD_LEFT_TRIGGER: RawCode = 100_306;
    pub const GAMEPAD_RIGHT_TRIGGER: RawCode = 100_307;
    pub const GAMEPAD_SELECT: RawCode = 100_308;
    pub const GAMEPAD_START: RawCode = 100_309;
    pub const GAMEPAD_MODE: RawCode = 100_310;
    pub const GAMEPAD_LEFT_THUMB: RawCode = 100_311;
    pub const GAMEPAD_RIGHT_THUMB: RawCode = 100_312;
    pub const GAMEPAD_DPAD_UP: RawCode = 100_313;
    pub const GAMEPAD_DPAD_DOWN: RawCode = 100_314;
    pub const GAMEPAD_DPAD_LEFT: RawCode = 100_315;
    pub const GAMEPAD_DPAD_RIGHT: RawCode = 100_316;
}
