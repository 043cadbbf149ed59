//! Rule configuration for the checkers engine.

use crate::error::{EngineError, EngineResult};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Men may capture towards their own side, not only forwards.
    pub allow_backward_captures: bool,
    /// After a capture the same piece may keep jumping before the turn passes.
    pub chain_captures: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::chained()
    }
}

impl Config {
    /// Forward-only captures, one capture per turn.
    pub const fn classic() -> Self {
        Self {
            allow_backward_captures: false,
            chain_captures: false,
        }
    }

    /// Captures in either direction and multi-jump continuation.
    pub const fn chained() -> Self {
        Self {
            allow_backward_captures: true,
            chain_captures: true,
        }
    }

    pub fn from_toml_str(text: &str) -> EngineResult<Self> {
        toml::from_str(text).map_err(|e| EngineError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
