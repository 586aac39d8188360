use uuid::Uuid;

/// Work handed from the controller to the pipeline worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineCommand {
    /// Begin capturing for a new session.
    Start {
        /// Session being started.
        session_id: Uuid,
    },
    /// Stop capturing and transcribe.
    Stop {
        /// Session being stopped.
        session_id: Uuid,
    },
    /// Stop capturing and discard the audio.
    Cancel {
        /// Session being cancelled.
        session_id: Uuid,
    },
}

impl PipelineCommand {
    /// Session this command belongs to.
    pub fn session_id(&self) -> Uuid {
        match self {
            PipelineCommand::Start { session_id }
            | PipelineCommand::Stop { session_id }
            | PipelineCommand::Cancel { session_id } => *session_id,
        }
    }
}
