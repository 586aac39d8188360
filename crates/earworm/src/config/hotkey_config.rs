use crate::{
    AppResult,
    config::{default_cancel, default_suppress_auto_repeat, default_toggle, default_trigger},
};

use earworm_core::{CanonicalKey, HotkeyAction, HotkeyMatcher, KeyCombo};
use serde::{Deserialize, Serialize};

/// Hotkey bindings.
///
/// Key names are parsed and canonicalized while the file is read, so an
/// unknown name or an empty trigger fails the load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotkeyConfig {
    /// Held to record.
    #[serde(default = "default_trigger")]
    pub trigger: KeyCombo,

    /// Aborts a recording.
    #[serde(default = "default_cancel")]
    pub cancel: KeyCombo,

    /// Starts or stops a recording hands-free. Empty disables it.
    #[serde(default = "default_toggle")]
    pub toggle: Vec<CanonicalKey>,

    /// Ignore key-down events for keys that are already held.
    #[serde(default = "default_suppress_auto_repeat")]
    pub suppress_auto_repeat: bool,
}

impl HotkeyConfig {
    /// The toggle combo, if one is configured.
    #[track_caller]
    pub fn toggle_combo(&self) -> AppResult<Option<KeyCombo>> {
        if self.toggle.is_empty() {
            return Ok(None);
        }
        Ok(Some(KeyCombo::new(self.toggle.iter().copied())?))
    }

    /// Build a matcher with every configured binding registered.
    ///
    /// The trigger is registered first so it wins the firing order when
    /// combos overlap.
    #[track_caller]
    pub fn build_matcher(&self) -> AppResult<HotkeyMatcher<HotkeyAction>> {
        let mut matcher = HotkeyMatcher::new(self.suppress_auto_repeat);

        matcher.register(self.trigger.clone(), HotkeyAction::PushToTalk);
        matcher.register(self.cancel.clone(), HotkeyAction::Cancel);
        if let Some(toggle) = self.toggle_combo()? {
            matcher.register(toggle, HotkeyAction::Toggle);
        }

        Ok(matcher)
    }
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            trigger: default_trigger(),
            cancel: default_cancel(),
            toggle: default_toggle(),
            suppress_auto_repeat: default_suppress_auto_repeat(),
        }
    }
}
