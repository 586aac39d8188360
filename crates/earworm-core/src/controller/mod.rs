mod push_to_talk;
mod recording_state;
mod transition;

pub use {
    push_to_talk::PushToTalkController,
    recording_state::RecordingState,
    transition::{ResetReason, Transition},
};
