//! Overlay surface thread.
//!
//! The overlay animates on its own thread: it drains its inbox, steps the
//! animator and posts the rasterized frame to the window on the main thread
//! whenever it differs from the last one posted.

use crate::{
    AppError, AppResult, UiEvent,
    overlay::{FRAME_INTERVAL, Frame, OverlayAnimator, OverlayFrame},
};

use std::{
    panic::Location,
    sync::mpsc as std_mpsc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use earworm_core::{
    CoreResult, DriverStatus, RecordingState, Surface, SurfaceDriver, SurfaceInbox,
};
use error_location::ErrorLocation;
use tao::event_loop::EventLoopProxy;
use tracing::{debug, info, instrument, warn};

/// How long startup waits for the first frame before moving on.
pub(crate) const READY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where rendered frames go.
pub(crate) trait FrameSink: Send + 'static {
    /// Display one frame.
    fn present(&self, frame: OverlayFrame) -> AppResult<()>;

    /// The animator has stopped.
    fn closed(&self);
}

impl FrameSink for EventLoopProxy<UiEvent> {
    #[track_caller]
    fn present(&self, frame: OverlayFrame) -> AppResult<()> {
        self.send_event(UiEvent::OverlayFrame(frame))
            .map_err(|_| AppError::OverlayError {
                reason: "Event loop closed".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    fn closed(&self) {
        // The event loop may already be gone during shutdown.
        let _ = self.send_event(UiEvent::OverlayClosed);
    }
}

/// The overlay as a [`Surface`]: state changes feed the animator.
#[derive(Debug)]
pub(crate) struct OverlaySurface {
    animator: OverlayAnimator,
}

impl OverlaySurface {
    pub(crate) fn new(trigger: &str) -> Self {
        Self {
            animator: OverlayAnimator::new(trigger),
        }
    }

    pub(crate) fn animator_mut(&mut self) -> &mut OverlayAnimator {
        &mut self.animator
    }
}

impl Surface for OverlaySurface {
    fn apply_state(&mut self, state: RecordingState) -> CoreResult<()> {
        debug!(state = %state, "Overlay state");
        self.animator.set_state(state);
        Ok(())
    }

    fn notify(&mut self, title: &str, message: &str) -> CoreResult<()> {
        self.animator.show_toast(title, message);
        Ok(())
    }

    fn close(&mut self) {
        debug!("Overlay closing");
    }
}

/// Running overlay thread.
pub(crate) struct OverlayHandle {
    thread: JoinHandle<()>,
}

impl OverlayHandle {
    /// Wait for the animator thread to exit after its surface was closed.
    pub(crate) fn join(self) {
        if self.thread.join().is_err() {
            warn!("Overlay thread panicked");
        }
    }
}

/// Start the overlay thread, waiting up to [`READY_TIMEOUT`] for its first
/// frame.
///
/// A slow start is logged and startup continues; the overlay catches up
/// from its inbox once it runs.
#[track_caller]
#[instrument(skip(inbox, sink))]
pub(crate) fn spawn_overlay<S: FrameSink>(
    inbox: SurfaceInbox,
    sink: S,
    trigger: String,
) -> AppResult<OverlayHandle> {
    let (ready_tx, ready_rx) = std_mpsc::channel();

    let thread = thread::Builder::new()
        .name("overlay-animator".to_string())
        .spawn(move || run_overlay(inbox, sink, &trigger, ready_tx))
        .map_err(|e| AppError::OverlayError {
            reason: format!("Failed to spawn overlay thread: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    match ready_rx.recv_timeout(READY_TIMEOUT) {
        Ok(()) => info!("Overlay ready"),
        Err(std_mpsc::RecvTimeoutError::Timeout) => {
            warn!(timeout_secs = READY_TIMEOUT.as_secs(), "Overlay not ready, continuing");
        }
        Err(std_mpsc::RecvTimeoutError::Disconnected) => {
            warn!("Overlay stopped before its first frame");
        }
    }

    Ok(OverlayHandle { thread })
}

fn run_overlay<S: FrameSink>(
    mut inbox: SurfaceInbox,
    sink: S,
    trigger: &str,
    ready_tx: std_mpsc::Sender<()>,
) {
    let mut driver = SurfaceDriver::new(OverlaySurface::new(trigger));
    let mut ready_tx = Some(ready_tx);
    let mut last: Option<Frame> = None;

    loop {
        let now = Instant::now();

        if driver.pump(&mut inbox, now) == DriverStatus::Closed {
            break;
        }
        driver.tick(now);

        let frame = driver.surface_mut().animator_mut().advance();
        if last.as_ref() != Some(&frame) {
            if let Err(e) = sink.present(OverlayFrame::render(&frame)) {
                warn!(error = ?e, "Overlay window gone, stopping animator");
                driver.close();
                break;
            }
            last = Some(frame);
        }

        if let Some(tx) = ready_tx.take() {
            let _ = tx.send(());
        }

        thread::sleep(FRAME_INTERVAL.saturating_sub(now.elapsed()));
    }

    sink.closed();
    info!("Overlay stopped");
}
