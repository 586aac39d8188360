//! Stuck-session recovery.
//!
//! A lost key-up leaves the controller in `Recording` forever, and a hung
//! pipeline leaves it in `Processing`. The watchdog polls the controller and
//! forces it back to `Idle` once a state outlives its configured limit.

use crate::{KeyboardListener, config::WatchdogConfig};

use std::{sync::Arc, time::Duration};

use earworm_core::{PushToTalkController, RecordingState, Transition};
use tokio::sync::watch;
use tracing::{info, instrument, warn};

/// How often the controller is checked.
pub(crate) const CHECK_INTERVAL: Duration = Duration::from_secs(1);

/// Periodic stuck-session check.
pub(crate) struct Watchdog {
    controller: Arc<PushToTalkController>,
    listener: KeyboardListener,
    limits: WatchdogConfig,
}

impl Watchdog {
    pub(crate) fn new(
        controller: Arc<PushToTalkController>,
        listener: KeyboardListener,
        limits: WatchdogConfig,
    ) -> Self {
        Self {
            controller,
            listener,
            limits,
        }
    }

    /// Reset an overdue session, re-sync the held keys and tell the user.
    pub(crate) fn check(&self) -> Option<Transition> {
        let transition = self
            .controller
            .expire_stale(self.limits.max_recording(), self.limits.processing_timeout())?;

        self.listener.resync();

        let message = match transition.from {
            RecordingState::Recording => "Recording ran too long, key release was probably missed",
            _ => "Transcription did not finish in time",
        };
        warn!(session_id = %transition.session_id, from = %transition.from, "Watchdog reset");
        self.controller.notify("Recording reset", message);

        Some(transition)
    }

    /// Check every [`CHECK_INTERVAL`] until shutdown.
    #[instrument(skip_all)]
    pub(crate) async fn run(self, mut shutdown_rx: watch::Receiver<bool>) {
        let mut interval = tokio::time::interval(CHECK_INTERVAL);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Watchdog shutting down");
                    break;
                }
                _ = interval.tick() => {
                    self.check();
                }
            }
        }
    }
}
