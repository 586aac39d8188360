mod canonical;
mod combo;
mod raw_key;

pub use {
    canonical::{CanonicalKey, normalize},
    combo::KeyCombo,
    raw_key::RawKey,
};
