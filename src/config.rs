//! Agent configuration.
//!
//! All knobs have defaults matching the standard game; a JSON file can
//! override any subset of them.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::eval::COMPLETE_COST;

/// Last day of a standard game (days run 0-23).
pub const DEFAULT_FINAL_DAY: u32 = 23;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Tunable parameters of the decision rules.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Day on which growing stops and every grown tree may be completed.
    pub final_day: u32,
    /// Minimum sun before the agent completes a tree.
    pub complete_min_sun: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            final_day: DEFAULT_FINAL_DAY,
            complete_min_sun: COMPLETE_COST,
        }
    }
}

impl AgentConfig {
    /// Parses a configuration from JSON text. Missing fields keep defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Loads a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    /// Returns true on the last day of the game.
    #[inline]
    pub fn is_final_day(&self, day: u32) -> bool {
        day == self.final_day
    }
}
