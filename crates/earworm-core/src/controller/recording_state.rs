use std::fmt;

/// Recording lifecycle broadcast to every presentation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordingState {
    /// Ready to start recording.
    Idle,
    /// Trigger held, audio being captured.
    Recording,
    /// Trigger released, waiting for the pipeline to finish.
    Processing,
}

impl fmt::Display for RecordingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecordingState::Idle => "idle",
            RecordingState::Recording => "recording",
            RecordingState::Processing => "processing",
        })
    }
}
