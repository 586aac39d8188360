use crate::RecordingState;

/// Message queued for a presentation surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceMessage {
    /// Show this recording state.
    State(RecordingState),
    /// Show a transient toast, then revert to the current state.
    Notify {
        /// Short headline.
        title: String,
        /// Body text.
        message: String,
    },
    /// Tear the surface down.
    Close,
}
