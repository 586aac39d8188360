use crate::RecordingState;

use std::fmt;

use uuid::Uuid;

/// A state change performed by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// State before the change.
    pub from: RecordingState,
    /// State after the change.
    pub to: RecordingState,
    /// Session the change belongs to.
    pub session_id: Uuid,
}

/// Why the controller was forced back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetReason {
    /// A session outlived its configured limit, usually a lost key-up.
    Watchdog,
    /// The keyboard source stopped reporting, so held keys are unknown.
    Resync,
    /// The application is exiting.
    Shutdown,
}

impl fmt::Display for ResetReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResetReason::Watchdog => "watchdog",
            ResetReason::Resync => "resync",
            ResetReason::Shutdown => "shutdown",
        })
    }
}
