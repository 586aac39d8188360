//! Surface-side half of state propagation.
//!
//! A [`SurfaceDriver`] wraps a concrete [`Surface`] and applies queued
//! [`SurfaceMessage`]s on the surface's own execution context: it keeps the
//! last-seen state, drops redundant updates and reverts toasts once they
//! expire.

use crate::{CoreResult, InboxRead, RecordingState, SurfaceInbox, SurfaceMessage};

use std::time::{Duration, Instant};

use tracing::{debug, warn};

/// How long a toast stays up before the surface reverts to its state.
pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(2);

/// What a presentation surface must be able to do.
pub trait Surface {
    /// Render `state`.
    fn apply_state(&mut self, state: RecordingState) -> CoreResult<()>;

    /// Show a transient notification.
    fn notify(&mut self, title: &str, message: &str) -> CoreResult<()>;

    /// Tear down. Called at most once.
    fn close(&mut self);
}

/// Whether the driven surface is still alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverStatus {
    /// Keep pumping.
    Running,
    /// The surface has been closed.
    Closed,
}

/// Applies queued messages to a surface and keeps its cached state.
pub struct SurfaceDriver<S> {
    surface: S,
    cached: Option<RecordingState>,
    toast_until: Option<Instant>,
    closed: bool,
}

impl<S: Surface> SurfaceDriver<S> {
    /// Wrap `surface`. Nothing is rendered until the first state arrives.
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            cached: None,
            toast_until: None,
            closed: false,
        }
    }

    /// Apply one message received at `now`.
    pub fn handle(&mut self, message: SurfaceMessage, now: Instant) -> DriverStatus {
        if self.closed {
            return DriverStatus::Closed;
        }

        match message {
            SurfaceMessage::State(state) => {
                if self.cached == Some(state) {
                    debug!(state = %state, "Redundant state ignored");
                    return DriverStatus::Running;
                }
                self.cached = Some(state);
                self.toast_until = None;
                if let Err(e) = self.surface.apply_state(state) {
                    warn!(state = %state, error = ?e, "Surface failed to apply state");
                }
            }
            SurfaceMessage::Notify { title, message } => {
                if let Err(e) = self.surface.notify(&title, &message) {
                    warn!(title = %title, error = ?e, "Surface failed to show notification");
                }
                self.toast_until = Some(now + NOTIFICATION_DURATION);
            }
            SurfaceMessage::Close => {
                self.close();
                return DriverStatus::Closed;
            }
        }

        DriverStatus::Running
    }

    /// Drain everything queued in `inbox` without blocking.
    ///
    /// A disconnected inbox means the controller is gone, so the surface is
    /// closed.
    pub fn pump(&mut self, inbox: &mut SurfaceInbox, now: Instant) -> DriverStatus {
        loop {
            match inbox.try_next() {
                InboxRead::Message(message) => {
                    if self.handle(message, now) == DriverStatus::Closed {
                        return DriverStatus::Closed;
                    }
                }
                InboxRead::Empty => return self.status(),
                InboxRead::Disconnected => {
                    self.close();
                    return DriverStatus::Closed;
                }
            }
        }
    }

    /// Revert an expired toast to the cached state.
    pub fn tick(&mut self, now: Instant) {
        let Some(until) = self.toast_until else {
            return;
        };
        if self.closed || now < until {
            return;
        }

        self.toast_until = None;
        if let Some(state) = self.cached {
            if let Err(e) = self.surface.apply_state(state) {
                warn!(state = %state, error = ?e, "Surface failed to restore state");
            }
        }
    }

    /// When `tick` next has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.toast_until
    }

    /// Last state applied.
    pub fn cached_state(&self) -> Option<RecordingState> {
        self.cached
    }

    /// Whether a toast is currently showing.
    pub fn is_showing_notification(&self) -> bool {
        self.toast_until.is_some()
    }

    /// Current status.
    pub fn status(&self) -> DriverStatus {
        if self.closed {
            DriverStatus::Closed
        } else {
            DriverStatus::Running
        }
    }

    /// The wrapped surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The wrapped surface, mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Close the surface if it is not closed yet.
    pub fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.toast_until = None;
            self.surface.close();
        }
    }
}
