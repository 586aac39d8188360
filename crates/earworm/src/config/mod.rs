mod behaviour_config;
#[allow(clippy::module_inception)]
mod config;
mod hotkey_config;
mod overlay_config;
mod pipeline_config;
mod watchdog_config;

pub(crate) use {
    behaviour_config::BehaviourConfig, config::Config, hotkey_config::HotkeyConfig,
    overlay_config::OverlayConfig, pipeline_config::PipelineConfig,
    watchdog_config::WatchdogConfig,
};

use earworm_core::{CanonicalKey, KeyCombo, RawKey, normalize};

pub(crate) const DEFAULT_NOTIFICATIONS: bool = true;
pub(crate) const DEFAULT_OVERLAY_ENABLED: bool = true;
pub(crate) const DEFAULT_SUPPRESS_AUTO_REPEAT: bool = true;
pub(crate) const DEFAULT_MAX_RECORDING_SECS: u64 = 300;
pub(crate) const DEFAULT_PROCESSING_TIMEOUT_SECS: u64 = 120;

pub(crate) fn default_trigger() -> KeyCombo {
    KeyCombo::from(normalize(RawKey::F(9)))
}

pub(crate) fn default_cancel() -> KeyCombo {
    KeyCombo::from(normalize(RawKey::Escape))
}

pub(crate) fn default_toggle() -> Vec<CanonicalKey> {
    vec![
        normalize(RawKey::ControlLeft),
        normalize(RawKey::ShiftLeft),
        normalize(RawKey::Space),
    ]
}

pub(crate) fn default_suppress_auto_repeat() -> bool {
    DEFAULT_SUPPRESS_AUTO_REPEAT
}

pub(crate) fn default_notifications() -> bool {
    DEFAULT_NOTIFICATIONS
}

pub(crate) fn default_overlay_enabled() -> bool {
    DEFAULT_OVERLAY_ENABLED
}

pub(crate) fn default_max_recording_secs() -> u64 {
    DEFAULT_MAX_RECORDING_SECS
}

pub(crate) fn default_processing_timeout_secs() -> u64 {
    DEFAULT_PROCESSING_TIMEOUT_SECS
}
