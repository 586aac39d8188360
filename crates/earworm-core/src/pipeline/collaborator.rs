use crate::CoreResult;

use uuid::Uuid;

/// The external audio/transcription collaborator.
///
/// Each method runs on a blocking worker thread, one at a time and in the
/// order the controller dispatched them. `on_stop` returns once the session
/// has been fully handled; its result decides between the success and
/// failure exits of `Processing`.
pub trait Pipeline: Send + Sync + 'static {
    /// A session entered `Recording`.
    fn on_start(&self, session_id: Uuid) -> CoreResult<()>;

    /// A session entered `Processing`.
    fn on_stop(&self, session_id: Uuid) -> CoreResult<()>;

    /// A session was aborted before completion; discard its audio.
    fn on_cancel(&self, session_id: Uuid) -> CoreResult<()>;
}
