//! Error types for the window core
//!
//! The registry, bus and gesture contract never fail towards callers; these
//! errors only surface from the explicit `try_*` and configuration entry
//! points.

use crate::window::WindowId;

/// Errors reported by fallible window-core entry points.
#[derive(Debug, thiserror::Error)]
pub enum WmError {
    /// A window was registered without an id.
    #[error("window registered without an id")]
    EmptyWindowId,

    /// A window with this id is already registered.
    #[error("window already registered: {0}")]
    DuplicateWindow(WindowId),

    /// Configuration could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// Configuration parsed but holds unusable values.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Result alias for window-core operations
pub type Result<T> = std::result::Result<T, WmError>;
