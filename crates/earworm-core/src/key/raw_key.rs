use crate::CoreError;

use std::{fmt, panic::Location, str::FromStr};

use error_location::ErrorLocation;

/// Platform key identity as reported by the keyboard source.
///
/// Left/right variants and unnamed virtual-key codes are kept distinct here;
/// collapsing them is the job of [`normalize`](crate::normalize).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RawKey {
    /// Left control.
    ControlLeft,
    /// Right control.
    ControlRight,
    /// Left shift.
    ShiftLeft,
    /// Right shift.
    ShiftRight,
    /// Left alt / option.
    AltLeft,
    /// Right alt / option.
    AltRight,
    /// AltGr, how some layouts report the right alt key.
    AltGr,
    /// Left meta (Windows / Command / Super).
    MetaLeft,
    /// Right meta.
    MetaRight,
    /// Escape.
    Escape,
    /// Space bar.
    Space,
    /// Return / Enter on the main block.
    Return,
    /// Tab.
    Tab,
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Insert.
    Insert,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Up arrow.
    UpArrow,
    /// Down arrow.
    DownArrow,
    /// Left arrow.
    LeftArrow,
    /// Right arrow.
    RightArrow,
    /// Caps lock.
    CapsLock,
    /// Print screen.
    PrintScreen,
    /// Scroll lock.
    ScrollLock,
    /// Pause / break.
    Pause,
    /// Num lock.
    NumLock,
    /// Laptop `Fn` key, where the platform reports it.
    Function,
    /// The extra backslash key on ISO layouts.
    IntlBackslash,
    /// Enter on the numeric keypad.
    KeypadEnter,
    /// Delete / decimal on the numeric keypad.
    KeypadDelete,
    /// Function row key `F1`..`F24`.
    F(u8),
    /// Printable key on the main block, stored lowercase.
    Char(char),
    /// Printable key on the numeric keypad.
    Keypad(char),
    /// Virtual-key or scan code the source could not name.
    Code(u32),
}

const NAMED_KEYS: &[(&str, RawKey)] = &[
    ("ControlLeft", RawKey::ControlLeft),
    ("ControlRight", RawKey::ControlRight),
    ("ShiftLeft", RawKey::ShiftLeft),
    ("ShiftRight", RawKey::ShiftRight),
    ("AltLeft", RawKey::AltLeft),
    ("AltRight", RawKey::AltRight),
    ("AltGr", RawKey::AltGr),
    ("MetaLeft", RawKey::MetaLeft),
    ("MetaRight", RawKey::MetaRight),
    ("Escape", RawKey::Escape),
    ("Space", RawKey::Space),
    ("Return", RawKey::Return),
    ("Tab", RawKey::Tab),
    ("Backspace", RawKey::Backspace),
    ("Delete", RawKey::Delete),
    ("Insert", RawKey::Insert),
    ("Home", RawKey::Home),
    ("End", RawKey::End),
    ("PageUp", RawKey::PageUp),
    ("PageDown", RawKey::PageDown),
    ("UpArrow", RawKey::UpArrow),
    ("DownArrow", RawKey::DownArrow),
    ("LeftArrow", RawKey::LeftArrow),
    ("RightArrow", RawKey::RightArrow),
    ("CapsLock", RawKey::CapsLock),
    ("PrintScreen", RawKey::PrintScreen),
    ("ScrollLock", RawKey::ScrollLock),
    ("Pause", RawKey::Pause),
    ("NumLock", RawKey::NumLock),
    ("Fn", RawKey::Function),
    ("IntlBackslash", RawKey::IntlBackslash),
    ("KpEnter", RawKey::KeypadEnter),
    ("KpDelete", RawKey::KeypadDelete),
];

/// Shorthand spellings accepted when parsing, never produced by `Display`.
const KEY_ALIASES: &[(&str, RawKey)] = &[
    ("Ctrl", RawKey::ControlLeft),
    ("Control", RawKey::ControlLeft),
    ("Shift", RawKey::ShiftLeft),
    ("Alt", RawKey::AltLeft),
    ("Option", RawKey::AltLeft),
    ("Meta", RawKey::MetaLeft),
    ("Super", RawKey::MetaLeft),
    ("Win", RawKey::MetaLeft),
    ("Cmd", RawKey::MetaLeft),
    ("Esc", RawKey::Escape),
    ("Enter", RawKey::Return),
];

impl RawKey {
    fn lookup(name: &str) -> Option<RawKey> {
        NAMED_KEYS
            .iter()
            .chain(KEY_ALIASES)
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, key)| *key)
    }

    fn parse_prefixed(name: &str) -> Option<RawKey> {
        let lower = name.to_ascii_lowercase();

        if let Some(rest) = lower.strip_prefix("code") {
            return rest.parse::<u32>().ok().map(RawKey::Code);
        }

        if let Some(rest) = lower.strip_prefix("kp") {
            let mut chars = rest.chars();
            return match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_digit() || "+-*/".contains(c) => {
                    Some(RawKey::Keypad(c))
                }
                _ => None,
            };
        }

        if let Some(rest) = lower.strip_prefix('f') {
            if let Ok(n) = rest.parse::<u8>() {
                return (1..=24).contains(&n).then_some(RawKey::F(n));
            }
        }

        let mut chars = lower.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_graphic() => Some(RawKey::Char(c)),
            _ => None,
        }
    }
}

impl fmt::Display for RawKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawKey::F(n) => write!(f, "F{n}"),
            RawKey::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            RawKey::Keypad(c) => write!(f, "Kp{c}"),
            RawKey::Code(code) => write!(f, "Code{code}"),
            named => {
                let name = NAMED_KEYS
                    .iter()
                    .find(|(_, key)| key == named)
                    .map(|(name, _)| *name)
                    .unwrap_or("Unknown");
                f.write_str(name)
            }
        }
    }
}

impl FromStr for RawKey {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();

        Self::lookup(name)
            .or_else(|| Self::parse_prefixed(name))
            .ok_or_else(|| CoreError::UnknownKey {
                name: name.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
