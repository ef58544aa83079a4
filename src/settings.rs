//! Runtime settings for the terminal game.
//!
//! Loaded from a JSON file passed with `--config`. Every field is optional;
//! missing fields take their defaults.
//!
//! ```json
//! {
//!   "board": { "width": 10, "height": 25, "lookahead": 4 },
//!   "seed": 42,
//!   "das_ms": 150,
//!   "arr_ms": 50,
//!   "tick_ms": 16
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::BoardConfig;
use crate::types::{DEFAULT_ARR_MS, DEFAULT_DAS_MS, TICK_MS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub board: BoardConfig,
    /// Fixed piece seed; a random one is picked when absent
    pub seed: Option<u32>,
    /// Delay before a held left/right key starts repeating
    pub das_ms: u32,
    /// Interval between repeats once DAS has passed
    pub arr_ms: u32,
    /// Driver loop timestep
    pub tick_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            seed: None,
            das_ms: DEFAULT_DAS_MS,
            arr_ms: DEFAULT_ARR_MS,
            tick_ms: TICK_MS,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(text).context("invalid settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in {}", path.display()))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.board.validate().context("invalid board settings")?;
        if self.tick_ms == 0 {
            anyhow::bail!("tick_ms must be at least 1");
        }
        Ok(())
    }
}
