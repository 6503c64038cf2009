// crates/input_core/src/lib.rs

// Logic Modules
pub mod app;
pub mod engine_loop;
pub mod input;
pub mod platform_runner;

// Re-exports so the demo crate can find things easily
pub use app::App;
pub use input::{InputDefaults, InputEdge, InputMap, InputRouter};
pub use input_shared::{input_codes, MappingConfig, RawCode, SourceClass};
pub use platform_runner::{PlatformRunner, RunnerError, Simulation};
