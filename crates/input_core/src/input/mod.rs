// crates/input_core/src/input/mod.rs
pub mod config;
pub mod error;
pub mod gamepad;
pub mod held;
pub mod joystick;
pub mod map;
pub mod mapping;
pub mod overlay;
pub mod platform;
pub mod pressed;
pub mod registry;
pub mod router;

pub use config::InputDefaults;
pub use error::{AssetError, ConfigError};
#[cfg(feature = "gamepad")]
pub use gamepad::GilrsPoller;
pub use gamepad::{GamepadAdapter, GamepadInput, GamepadSet, Stick};
pub use joystick::{VirtualButton, VirtualJoystick};
pub use map::InputMap;
pub use overlay::{AssetSource, OverlayHost, OverlayLoader, OverlayState};
pub use platform::WinitInputAdapter;
pub use router::{InputEdge, InputRouter};
