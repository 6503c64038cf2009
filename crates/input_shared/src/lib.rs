// crates/input_shared/src/lib.rs

pub mod input_types;
pub mod mapping_config;

pub use input_types::{input_codes, MappingName, RawCode, SourceClass};
pub use mapping_config::{ActionMappingKey, AxisMappingKey, MappingConfig};
