//! Error types
//!
//! Gameplay conditions (late contacts, shooting outside play, removing a dead
//! entity) are never errors. These cover programmer misuse and config loading.

use thiserror::Error;

/// Misuse of the session API
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SessionError {
    /// A session was started before the viewport bounds were known
    #[error("lane bounds not set: call set_bounds before starting a session")]
    BoundsNotSet,

    /// Tick delta was negative, NaN or infinite
    #[error("invalid tick delta: {0}")]
    InvalidDelta(f32),
}

/// Tuning load/validation errors
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the simulation cannot run with
    #[error("Invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}
