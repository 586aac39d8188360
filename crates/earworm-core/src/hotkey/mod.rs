mod action;
mod event;
mod matcher;

pub use {action::HotkeyAction, event::HotkeyEvent, matcher::{AUTO_REPEAT_WINDOW, HotkeyMatcher}};
