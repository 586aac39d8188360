mod listener;
mod raw_key;

pub(crate) use {listener::KeyboardListener, raw_key::to_raw_key};
