// ⚙️ Pipeline Configuration - ranking size and window length
// Loaded from an optional JSON file, then overridden by CLI flags

use crate::error::{Result, SummaryError};
use crate::products::DEFAULT_TOP_N;
use crate::rolling::{RollingWindow, DEFAULT_WINDOW_DAYS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// How many products to rank
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Trailing window length in calendar days
    #[serde(default = "default_window_days")]
    pub window_days: i64,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_window_days() -> i64 {
    DEFAULT_WINDOW_DAYS
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            top_n: DEFAULT_TOP_N,
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a JSON file
    ///
    /// Missing keys fall back to defaults; unknown keys are rejected.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SummaryError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;

        let config: PipelineConfig = serde_json::from_str(&content).map_err(|e| {
            SummaryError::InvalidConfig(format!("cannot parse {}: {}", path.display(), e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI overrides on top of file/default values
    pub fn with_overrides(mut self, top_n: Option<usize>, window_days: Option<i64>) -> Self {
        if let Some(n) = top_n {
            self.top_n = n;
        }
        if let Some(days) = window_days {
            self.window_days = days;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.rolling_window().map(|_| ())
    }

    pub fn rolling_window(&self) -> Result<RollingWindow> {
        RollingWindow::new(self.window_days)
    }
}
