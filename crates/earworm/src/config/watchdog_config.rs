use crate::config::{default_max_recording_secs, default_processing_timeout_secs};

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Limits after which a session is assumed stuck and forced back to idle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchdogConfig {
    /// Longest a recording may run, usually a lost key-up past this.
    #[serde(default = "default_max_recording_secs")]
    pub max_recording_secs: u64,

    /// Longest the pipeline may take to report back.
    #[serde(default = "default_processing_timeout_secs")]
    pub processing_timeout_secs: u64,
}

impl WatchdogConfig {
    /// Recording limit as a duration.
    pub fn max_recording(&self) -> Duration {
        Duration::from_secs(self.max_recording_secs)
    }

    /// Processing limit as a duration.
    pub fn processing_timeout(&self) -> Duration {
        Duration::from_secs(self.processing_timeout_secs)
    }
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            max_recording_secs: default_max_recording_secs(),
            processing_timeout_secs: default_processing_timeout_secs(),
        }
    }
}
