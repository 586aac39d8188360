use crate::{CoreError, CoreResult, key::CanonicalKey};

use std::{
    collections::{BTreeSet, HashSet},
    fmt,
    panic::Location,
};

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// A hotkey definition: one or more canonical keys held together.
///
/// Immutable after construction. Keys are deduplicated and kept in a stable
/// order so combos compare and display deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<CanonicalKey>", into = "Vec<CanonicalKey>")]
pub struct KeyCombo {
    keys: BTreeSet<CanonicalKey>,
}

impl KeyCombo {
    /// Build a combo from canonical keys.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyCombo`] if no keys are given.
    #[track_caller]
    pub fn new<I>(keys: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = CanonicalKey>,
    {
        let keys: BTreeSet<CanonicalKey> = keys.into_iter().collect();

        if keys.is_empty() {
            return Err(CoreError::EmptyCombo {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self { keys })
    }

    /// Parse a combo from key names such as `["Ctrl", "ShiftRight", "Space"]`.
    #[track_caller]
    pub fn parse<S: AsRef<str>>(names: &[S]) -> CoreResult<Self> {
        let keys = names
            .iter()
            .map(|name| name.as_ref().parse::<CanonicalKey>())
            .collect::<CoreResult<Vec<_>>>()?;

        Self::new(keys)
    }

    /// Whether every key of this combo is currently held.
    pub fn is_held(&self, pressed: &HashSet<CanonicalKey>) -> bool {
        self.keys.iter().all(|key| pressed.contains(key))
    }

    /// Whether `key` is part of this combo.
    pub fn contains(&self, key: CanonicalKey) -> bool {
        self.keys.contains(&key)
    }

    /// The keys of this combo in stable order.
    pub fn keys(&self) -> impl Iterator<Item = CanonicalKey> + '_ {
        self.keys.iter().copied()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always false; combos hold at least one key.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<CanonicalKey>> for KeyCombo {
    type Error = CoreError;

    #[track_caller]
    fn try_from(keys: Vec<CanonicalKey>) -> Result<Self, Self::Error> {
        Self::new(keys)
    }
}

impl From<KeyCombo> for Vec<CanonicalKey> {
    fn from(combo: KeyCombo) -> Self {
        combo.keys.into_iter().collect()
    }
}

impl From<CanonicalKey> for KeyCombo {
    fn from(key: CanonicalKey) -> Self {
        Self {
            keys: BTreeSet::from([key]),
        }
    }
}
