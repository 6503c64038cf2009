// crates/input_core/src/input/error.rs

use input_shared::RawCode;
use thiserror::Error;

/// Shape errors found while turning a `MappingConfig` into an `InputMap`.
///
/// These only surface at load time. Once a map exists, dispatch never fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("mapping `{name}` lists code {key} but its entry says {code}")]
    CodeMismatch {
        name: String,
        key: RawCode,
        code: RawCode,
    },

    #[error("mapping `{0}` is declared as both an axis and an action")]
    AmbiguousMapping(String),

    #[error("code {code} feeds `{name}`, which is neither an axis nor an action")]
    UnknownMapping { code: RawCode, name: String },

    #[error("code {code} feeds axis `{name}` but the axis has no scale for it")]
    MissingScale { code: RawCode, name: String },

    #[error("axis `{name}` has a non-finite scale for code {code}")]
    InvalidScale { name: String, code: RawCode },

    #[error("failed to parse mapping config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read mapping config: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure reported by an [`AssetSource`](super::overlay::AssetSource).
#[derive(Debug, Clone, Error)]
pub enum AssetError {
    #[error("asset `{0}` not found")]
    NotFound(String),

    #[error("asset `{id}` failed to load: {reason}")]
    Load { id: String, reason: String },

    #[error("asset loader dropped the request")]
    Dropped,
}
