//! Always-on-top status window, owned by the main thread.

use crate::{AppError, AppResult, UiEvent, overlay::OverlayFrame};

use std::panic::Location;

use error_location::ErrorLocation;
use tao::{
    dpi::{LogicalSize, PhysicalPosition},
    event_loop::EventLoopWindowTarget,
    window::{Icon, Window, WindowBuilder, WindowId},
};
use tracing::{debug, info, instrument};

const WIDTH: f64 = 240.0;
const HEIGHT: f64 = 80.0;
const MARGIN_RIGHT: i32 = 20;
const MARGIN_BOTTOM: i32 = 60;

/// Small window that shows overlay frames as its icon and status as title.
pub(crate) struct OverlayWindow {
    window: Window,
}

impl OverlayWindow {
    /// Create the window in the bottom-right corner of the current monitor.
    #[track_caller]
    #[instrument(skip(target))]
    pub(crate) fn new(target: &EventLoopWindowTarget<UiEvent>) -> AppResult<Self> {
        let window = WindowBuilder::new()
            .with_title("Earworm")
            .with_inner_size(LogicalSize::new(WIDTH, HEIGHT))
            .with_resizable(false)
            .with_always_on_top(true)
            .build(target)
            .map_err(|e| AppError::OverlayError {
                reason: format!("Failed to create overlay window: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        if let Some(monitor) = window.current_monitor() {
            let screen = monitor.size();
            let size = window.outer_size();
            let x = screen.width as i32 - size.width as i32 - MARGIN_RIGHT;
            let y = screen.height as i32 - size.height as i32 - MARGIN_BOTTOM;
            window.set_outer_position(PhysicalPosition::new(x.max(0), y.max(0)));
        }

        info!("Overlay window created");

        Ok(Self { window })
    }

    /// Show `frame`.
    #[track_caller]
    pub(crate) fn present(&self, frame: OverlayFrame) -> AppResult<()> {
        if self.window.title() != frame.title {
            self.window.set_title(&frame.title);
        }

        let icon = Icon::from_rgba(frame.rgba, frame.width, frame.height).map_err(|e| {
            AppError::OverlayError {
                reason: format!("Failed to create frame icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;
        self.window.set_window_icon(Some(icon));

        Ok(())
    }

    /// Hide the window once the animator has stopped.
    pub(crate) fn hide(&self) {
        debug!("Hiding overlay window");
        self.window.set_visible(false);
    }

    /// Identifier used to route window events.
    pub(crate) fn id(&self) -> WindowId {
        self.window.id()
    }
}
