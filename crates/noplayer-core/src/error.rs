//! Error types.
//!
//! `PlayerError` is what facade calls return. `EngineError` never comes back
//! from a facade call: engines report it through the event listener bridge.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the facade, its selectors and its configuration.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// A gated operation was called with no active session.
    #[error("Video must be loaded before trying to interact with the player")]
    NotLoaded,

    /// `load` was called on an active session under the reject policy.
    #[error("a video is already loaded; release it before loading another")]
    AlreadyLoaded,

    /// A selector was handed a track it cannot resolve.
    #[error("unknown track: {0}")]
    UnknownTrack(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlayerError {
    pub fn unknown_track(id: &str) -> Self {
        PlayerError::UnknownTrack(id.to_string())
    }

    pub fn is_not_loaded(&self) -> bool {
        matches!(self, PlayerError::NotLoaded)
    }
}

pub type PlayerResult<T> = Result<T, PlayerError>;

/// Which part of the engine failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineErrorKind {
    Source,
    Renderer,
    Unexpected,
}

/// Engine-level failure, delivered through `EngineEventListener::on_player_error`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind:?} error: {message}")]
pub struct EngineError {
    pub kind: EngineErrorKind,
    pub message: String,
}

impl EngineError {
    pub fn new(kind: EngineErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn load_failure(message: impl Into<String>) -> Self {
        Self::new(EngineErrorKind::Source, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_loaded_message_names_the_precondition() {
        let err = PlayerError::NotLoaded;
        assert!(err.is_not_loaded());
        assert!(err.to_string().contains("must be loaded"));
    }

    #[test]
    fn engine_error_display_includes_kind() {
        let err = EngineError::load_failure("404 from CDN");
        assert_eq!(err.to_string(), "Source error: 404 from CDN");
    }

    #[test]
    fn json_errors_convert() {
        let bad: Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: PlayerError = bad.unwrap_err().into();
        assert!(matches!(err, PlayerError::Json(_)));
    }
}
