//! Push-to-talk coordinator.
//!
//! Owns the one authoritative [`RecordingState`], turns hotkey edges into
//! transitions, hands pipeline work to the worker through a channel and
//! broadcasts every transition to the registered presentation surfaces.
//!
//! All operations take the same lock, so transitions are totally ordered and
//! every subscriber sees them in that order. Subscribers are fed through
//! non-blocking queues; nothing in here waits on UI or I/O.

use crate::{
    CoreError, CoreResult, HotkeyAction, HotkeyEvent, PipelineCommand, RecordingState,
    ResetReason, SurfaceMessage, Transition, surface::Subscriber,
};

use std::{
    panic::Location,
    time::{Duration, Instant},
};

use error_location::ErrorLocation;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

struct ControllerInner {
    state: RecordingState,
    session_id: Option<Uuid>,
    since: Instant,
    subscribers: Vec<Box<dyn Subscriber>>,
    shut_down: bool,
}

impl ControllerInner {
    fn transition(&mut self, to: RecordingState, session_id: Uuid) -> Transition {
        let from = self.state;
        let elapsed = self.since.elapsed();

        self.state = to;
        self.since = Instant::now();
        self.session_id = match to {
            RecordingState::Idle => None,
            _ => Some(session_id),
        };

        info!(
            session_id = %session_id,
            from = %from,
            to = %to,
            elapsed_ms = elapsed.as_millis(),
            "Recording state changed"
        );

        self.broadcast(SurfaceMessage::State(to));

        Transition {
            from,
            to,
            session_id,
        }
    }

    /// Deliver to every subscriber. A closed subscriber is dropped, any other
    /// failure is logged and the subscriber stays registered.
    fn broadcast(&mut self, message: SurfaceMessage) {
        self.subscribers
            .retain(|subscriber| match subscriber.deliver(message.clone()) {
                Ok(()) => true,
                Err(CoreError::SubscriberClosed { .. }) => {
                    warn!(subscriber = subscriber.name(), "Subscriber closed, removing");
                    false
                }
                Err(e) => {
                    warn!(subscriber = subscriber.name(), error = ?e, "Subscriber delivery failed");
                    true
                }
            });
    }
}

/// The push-to-talk state machine.
///
/// Construct one per application and share it behind an `Arc`; the keyboard
/// listener, the pipeline worker and the watchdog all call into the same
/// instance.
pub struct PushToTalkController {
    inner: Mutex<ControllerInner>,
    commands: mpsc::UnboundedSender<PipelineCommand>,
}

impl PushToTalkController {
    /// Create a controller in `Idle` that dispatches pipeline work on `commands`.
    pub fn new(commands: mpsc::UnboundedSender<PipelineCommand>) -> Self {
        Self {
            inner: Mutex::new(ControllerInner {
                state: RecordingState::Idle,
                session_id: None,
                since: Instant::now(),
                subscribers: Vec::new(),
                shut_down: false,
            }),
            commands,
        }
    }

    /// Route a matcher event to the matching operation.
    pub fn handle_hotkey(
        &self,
        event: HotkeyEvent<HotkeyAction>,
    ) -> CoreResult<Option<Transition>> {
        match event {
            HotkeyEvent::Fired(HotkeyAction::PushToTalk) => self.trigger_pressed(),
            HotkeyEvent::Released(HotkeyAction::PushToTalk) => self.trigger_released(),
            HotkeyEvent::Fired(HotkeyAction::Toggle) => self.toggle(),
            HotkeyEvent::Fired(HotkeyAction::Cancel) => self.cancel(),
            HotkeyEvent::Released(HotkeyAction::Toggle | HotkeyAction::Cancel) => Ok(None),
        }
    }

    /// Trigger edge down. Starts a session from `Idle`, otherwise a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ChannelSendFailed`] if the pipeline worker is gone;
    /// the state is left unchanged in that case.
    #[instrument(skip(self))]
    pub fn trigger_pressed(&self) -> CoreResult<Option<Transition>> {
        let mut inner = self.inner.lock();
        self.start_session(&mut inner)
    }

    /// Trigger edge up. Moves `Recording` to `Processing`, otherwise a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ChannelSendFailed`] if the pipeline worker is gone;
    /// the state is left unchanged in that case.
    #[instrument(skip(self))]
    pub fn trigger_released(&self) -> CoreResult<Option<Transition>> {
        let mut inner = self.inner.lock();
        self.stop_session(&mut inner)
    }

    /// Start from `Idle`, stop from `Recording`, ignore while `Processing`.
    #[instrument(skip(self))]
    pub fn toggle(&self) -> CoreResult<Option<Transition>> {
        let mut inner = self.inner.lock();
        let state = inner.state;
        match state {
            RecordingState::Idle => self.start_session(&mut inner),
            RecordingState::Recording => self.stop_session(&mut inner),
            RecordingState::Processing => {
                debug!("Toggle ignored while processing");
                Ok(None)
            }
        }
    }

    /// Abort the current recording. Only meaningful in `Recording`.
    ///
    /// Whichever of release or cancel reaches the controller first decides
    /// how the session ends; the other is then a no-op.
    #[instrument(skip(self))]
    pub fn cancel(&self) -> CoreResult<Option<Transition>> {
        let mut inner = self.inner.lock();

        let session_id = match (inner.state, inner.session_id) {
            (RecordingState::Recording, Some(session_id)) => session_id,
            (state, _) => {
                debug!(state = %state, "Cancel ignored");
                return Ok(None);
            }
        };

        self.dispatch(PipelineCommand::Cancel { session_id })?;

        Ok(Some(inner.transition(RecordingState::Idle, session_id)))
    }

    /// The pipeline finished `session_id` successfully.
    ///
    /// Reports for a session that is no longer current are ignored.
    #[instrument(skip(self))]
    pub fn complete(&self, session_id: Uuid) -> Option<Transition> {
        let mut inner = self.inner.lock();

        if inner.state != RecordingState::Processing || inner.session_id != Some(session_id) {
            debug!(session_id = %session_id, state = %inner.state, "Stale completion ignored");
            return None;
        }

        Some(inner.transition(RecordingState::Idle, session_id))
    }

    /// The pipeline failed `session_id`.
    ///
    /// From `Processing` this is the failure exit. From `Recording` (start
    /// failed) the session is aborted and the pipeline told to cancel. Either
    /// way the surfaces get a notification carrying `reason`.
    #[instrument(skip(self))]
    pub fn fail(&self, session_id: Uuid, reason: &str) -> Option<Transition> {
        let mut inner = self.inner.lock();

        if inner.session_id != Some(session_id) {
            debug!(session_id = %session_id, "Stale failure ignored");
            return None;
        }

        let state = inner.state;
        let title = match state {
            RecordingState::Recording => {
                if let Err(e) = self.dispatch(PipelineCommand::Cancel { session_id }) {
                    warn!(session_id = %session_id, error = ?e, "Failed to dispatch cancel");
                }
                "Recording failed"
            }
            RecordingState::Processing => "Transcription failed",
            RecordingState::Idle => return None,
        };

        let transition = inner.transition(RecordingState::Idle, session_id);
        inner.broadcast(SurfaceMessage::Notify {
            title: title.to_string(),
            message: reason.to_string(),
        });

        Some(transition)
    }

    /// Force `Idle` from any state.
    ///
    /// A session still in `Recording` is cancelled so the pipeline discards
    /// its audio. A session in `Processing` is abandoned; its eventual report
    /// is stale and ignored.
    #[instrument(skip(self))]
    pub fn reset(&self, reason: ResetReason) -> Option<Transition> {
        let mut inner = self.inner.lock();
        self.force_idle(&mut inner, reason)
    }

    /// Reset with [`ResetReason::Watchdog`] if the current state has lasted
    /// longer than its limit.
    ///
    /// The age check and the reset happen under one lock, so a session that
    /// ends or starts in between is never reset by mistake.
    #[instrument(skip(self))]
    pub fn expire_stale(
        &self,
        max_recording: Duration,
        processing_timeout: Duration,
    ) -> Option<Transition> {
        let mut inner = self.inner.lock();

        let limit = match inner.state {
            RecordingState::Idle => return None,
            RecordingState::Recording => max_recording,
            RecordingState::Processing => processing_timeout,
        };

        let elapsed = inner.since.elapsed();
        if elapsed < limit {
            return None;
        }

        warn!(
            state = %inner.state,
            elapsed_secs = elapsed.as_secs(),
            limit_secs = limit.as_secs(),
            "Session exceeded its limit"
        );

        self.force_idle(&mut inner, ResetReason::Watchdog)
    }

    /// Show a transient notification on every surface.
    pub fn notify(&self, title: &str, message: &str) {
        self.inner.lock().broadcast(SurfaceMessage::Notify {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    /// Register a presentation surface.
    ///
    /// The surface immediately receives the current state so it starts in
    /// sync; a subscriber that is already closed is not kept.
    pub fn register(&self, subscriber: Box<dyn Subscriber>) {
        let mut inner = self.inner.lock();

        match subscriber.deliver(SurfaceMessage::State(inner.state)) {
            Ok(()) => {
                info!(subscriber = subscriber.name(), "Subscriber registered");
                inner.subscribers.push(subscriber);
            }
            Err(e) => {
                warn!(subscriber = subscriber.name(), error = ?e, "Subscriber rejected initial state");
            }
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> RecordingState {
        self.inner.lock().state
    }

    /// Id of the session in progress, if any.
    pub fn current_session(&self) -> Option<Uuid> {
        self.inner.lock().session_id
    }

    /// The current non-idle state and how long it has lasted.
    pub fn session_elapsed(&self) -> Option<(RecordingState, Duration)> {
        let inner = self.inner.lock();
        match inner.state {
            RecordingState::Idle => None,
            state => Some((state, inner.since.elapsed())),
        }
    }

    /// Number of registered surfaces.
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }

    /// Reset to `Idle`, close every surface and drop them.
    ///
    /// Afterwards the controller refuses to start new sessions.
    #[instrument(skip(self))]
    pub fn shutdown(&self) {
        let mut inner = self.inner.lock();

        self.force_idle(&mut inner, ResetReason::Shutdown);
        inner.broadcast(SurfaceMessage::Close);
        inner.subscribers.clear();
        inner.shut_down = true;

        info!("Controller shut down");
    }

    fn force_idle(&self, inner: &mut ControllerInner, reason: ResetReason) -> Option<Transition> {
        let Some(session_id) = inner.session_id else {
            debug!("Reset while idle");
            return None;
        };

        if inner.state == RecordingState::Recording {
            if let Err(e) = self.dispatch(PipelineCommand::Cancel { session_id }) {
                warn!(session_id = %session_id, error = ?e, "Failed to dispatch cancel");
            }
        }

        warn!(session_id = %session_id, state = %inner.state, reason = %reason, "Forcing idle");

        Some(inner.transition(RecordingState::Idle, session_id))
    }

    fn start_session(&self, inner: &mut ControllerInner) -> CoreResult<Option<Transition>> {
        if inner.shut_down {
            debug!("Session start refused after shutdown");
            return Ok(None);
        }

        if inner.state != RecordingState::Idle {
            debug!(state = %inner.state, "Trigger press ignored");
            return Ok(None);
        }

        let session_id = Uuid::new_v4();

        // Dispatch first: if the worker is gone the state stays Idle.
        self.dispatch(PipelineCommand::Start { session_id })?;

        Ok(Some(inner.transition(RecordingState::Recording, session_id)))
    }

    fn stop_session(&self, inner: &mut ControllerInner) -> CoreResult<Option<Transition>> {
        let session_id = match (inner.state, inner.session_id) {
            (RecordingState::Recording, Some(session_id)) => session_id,
            (state, _) => {
                debug!(state = %state, "Trigger release ignored");
                return Ok(None);
            }
        };

        self.dispatch(PipelineCommand::Stop { session_id })?;

        Ok(Some(inner.transition(RecordingState::Processing, session_id)))
    }

    #[track_caller]
    fn dispatch(&self, command: PipelineCommand) -> CoreResult<()> {
        self.commands
            .send(command)
            .map_err(|e| CoreError::ChannelSendFailed {
                message: format!("Failed to send {:?}: {}", command, e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
