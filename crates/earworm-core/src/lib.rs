//! Earworm Core Library
//!
//! Push-to-talk coordination: key normalization, hotkey edge detection, the
//! recording state machine and state fan-out to presentation surfaces. No OS
//! or GUI dependency lives here.
//!
//! # Example
//!
//! ```no_run
//! use earworm_core::{
//!     CoreResult, HotkeyAction, HotkeyMatcher, KeyCombo, PushToTalkController, RawKey,
//!     surface_channel,
//! };
//!
//! use tokio::sync::mpsc;
//!
//! fn main() -> CoreResult<()> {
//!     let (commands_tx, _commands_rx) = mpsc::unbounded_channel();
//!     let controller = PushToTalkController::new(commands_tx);
//!
//!     let (overlay, _inbox) = surface_channel("overlay");
//!     controller.register(Box::new(overlay));
//!
//!     let mut matcher = HotkeyMatcher::new(true);
//!     matcher.register(KeyCombo::parse(&["F9"])?, HotkeyAction::PushToTalk);
//!
//!     for event in matcher.on_key_down(RawKey::F(9)) {
//!         controller.handle_hotkey(event)?;
//!     }
//!     for event in matcher.on_key_up(RawKey::F(9)) {
//!         controller.handle_hotkey(event)?;
//!     }
//!
//!     println!("State: {}", controller.state());
//!     Ok(())
//! }
//! ```

mod controller;
mod error;
mod hotkey;
mod key;
mod pipeline;
mod surface;

pub use {
    controller::{PushToTalkController, RecordingState, ResetReason, Transition},
    error::{CoreError, Result as CoreResult},
    hotkey::{AUTO_REPEAT_WINDOW, HotkeyAction, HotkeyEvent, HotkeyMatcher},
    key::{CanonicalKey, KeyCombo, RawKey, normalize},
    pipeline::{Pipeline, PipelineCommand, PipelineWorker},
    surface::{
        ChannelSubscriber, DriverStatus, InboxRead, NOTIFICATION_DURATION, Subscriber, Surface,
        SurfaceDriver, SurfaceInbox, SurfaceMessage, surface_channel,
    },
};

#[cfg(test)]
mod tests;
