use crate::{CoreError, key::RawKey};

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

// Windows virtual-key codes that some drivers and layouts deliver instead of
// a named key.
const VK_SHIFT: u32 = 0x10;
const VK_CONTROL: u32 = 0x11;
const VK_MENU: u32 = 0x12;
const VK_LWIN: u32 = 0x5B;
const VK_RWIN: u32 = 0x5C;
const VK_LSHIFT: u32 = 0xA0;
const VK_RSHIFT: u32 = 0xA1;
const VK_LCONTROL: u32 = 0xA2;
const VK_RCONTROL: u32 = 0xA3;
const VK_LMENU: u32 = 0xA4;
const VK_RMENU: u32 = 0xA5;

/// Raw identity → canonical identity. Anything not listed is already canonical.
const CANONICAL_FORMS: &[(RawKey, RawKey)] = &[
    (RawKey::ControlRight, RawKey::ControlLeft),
    (RawKey::ShiftRight, RawKey::ShiftLeft),
    (RawKey::AltRight, RawKey::AltLeft),
    (RawKey::AltGr, RawKey::AltLeft),
    (RawKey::MetaRight, RawKey::MetaLeft),
    (RawKey::Code(VK_SHIFT), RawKey::ShiftLeft),
    (RawKey::Code(VK_LSHIFT), RawKey::ShiftLeft),
    (RawKey::Code(VK_RSHIFT), RawKey::ShiftLeft),
    (RawKey::Code(VK_CONTROL), RawKey::ControlLeft),
    (RawKey::Code(VK_LCONTROL), RawKey::ControlLeft),
    (RawKey::Code(VK_RCONTROL), RawKey::ControlLeft),
    (RawKey::Code(VK_MENU), RawKey::AltLeft),
    (RawKey::Code(VK_LMENU), RawKey::AltLeft),
    (RawKey::Code(VK_RMENU), RawKey::AltLeft),
    (RawKey::Code(VK_LWIN), RawKey::MetaLeft),
    (RawKey::Code(VK_RWIN), RawKey::MetaLeft),
];

/// Identity of a physical key, independent of side or encoding.
///
/// Only constructible through [`normalize`], so the wrapped [`RawKey`] is
/// always the primary form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CanonicalKey(RawKey);

impl CanonicalKey {
    /// The primary raw form this canonical key stands for.
    pub fn raw(self) -> RawKey {
        self.0
    }
}

/// Collapse a raw key onto its canonical identity.
///
/// Pure and total: keys without an entry in the canonicalization table are
/// their own canonical identity.
pub fn normalize(raw: RawKey) -> CanonicalKey {
    let primary = CANONICAL_FORMS
        .iter()
        .find(|(variant, _)| *variant == raw)
        .map_or(raw, |(_, primary)| *primary);

    CanonicalKey(primary)
}

impl From<RawKey> for CanonicalKey {
    fn from(raw: RawKey) -> Self {
        normalize(raw)
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for CanonicalKey {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<RawKey>().map(normalize)
    }
}

impl TryFrom<String> for CanonicalKey {
    type Error = CoreError;

    #[track_caller]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CanonicalKey> for String {
    fn from(key: CanonicalKey) -> Self {
        key.to_string()
    }
}
