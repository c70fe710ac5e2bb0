use crate::domain::{ReviewSchedule, ScheduleError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PAGE_URL: &str = "https://example.com/apply";

/// Runtime settings, read from an optional JSON file and command-line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Address embedded in the iframe snippet.
    pub page_url: String,
    /// Real time between countdown ticks.
    pub tick_interval_ms: u64,
    /// Fixes the outcome sequence when set.
    pub seed: Option<u64>,
    pub log_level: String,
    /// Logging is disabled unless a file is given; the terminal belongs to the UI.
    pub log_file: Option<PathBuf>,
    pub schedule: ReviewSchedule,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page_url: DEFAULT_PAGE_URL.to_string(),
            tick_interval_ms: 1000,
            seed: None,
            log_level: "info".to_string(),
            log_file: None,
            schedule: ReviewSchedule::default(),
        }
    }
}

impl AppConfig {
    /// Reads a JSON config file. Missing keys take their defaults.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str::<AppConfig>(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        self.schedule.validate()?;
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {} - {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid review schedule: {0}")]
    InvalidSchedule(#[from] ScheduleError),
    #[error("tick_interval_ms must be greater than zero")]
    ZeroTickInterval,
}
