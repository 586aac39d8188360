use std::fmt;

/// Actions the push-to-talk controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotkeyAction {
    /// Record while held.
    PushToTalk,
    /// Start on first press, stop on the next.
    Toggle,
    /// Abort the current recording.
    Cancel,
}

impl fmt::Display for HotkeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HotkeyAction::PushToTalk => "push_to_talk",
            HotkeyAction::Toggle => "toggle",
            HotkeyAction::Cancel => "cancel",
        })
    }
}
