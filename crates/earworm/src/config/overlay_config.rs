use crate::config::default_overlay_enabled;

use serde::{Deserialize, Serialize};

/// Status overlay configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Show the floating status overlay.
    #[serde(default = "default_overlay_enabled")]
    pub enabled: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            enabled: default_overlay_enabled(),
        }
    }
}
