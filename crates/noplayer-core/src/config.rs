//! Facade configuration.
//!
//! Plain JSON, every field optional. `from_env` reads the file named by
//! `NOPLAYER_CONFIG` and falls back to defaults when it is unset.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlayerError, PlayerResult};

pub const CONFIG_ENV: &str = "NOPLAYER_CONFIG";

/// What `load` does when a session is already active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReloadPolicy {
    /// Release the active session, then load.
    #[default]
    ReleasePrevious,
    /// Fail with `AlreadyLoaded` and keep the active session.
    Reject,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    pub reload: ReloadPolicy,
}

impl PlayerConfig {
    pub fn from_json(json: &str) -> PlayerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> PlayerResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| PlayerError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&raw).map_err(|e| PlayerError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_env() -> PlayerResult<Self> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::load(path.trim()),
            _ => Ok(Self::default()),
        }
    }
}
