use crate::overlay::OverlayFrame;

use earworm_core::SurfaceMessage;

/// Events delivered to the main UI thread through the tao event-loop proxy.
///
/// The main thread owns `TrayManager` (because `TrayIcon` is `!Send`) and
/// the overlay window, so every tray update, overlay frame and the process
/// shutdown flow through this enum.
#[derive(Debug)]
pub enum UiEvent {
    /// A message from the controller for the tray surface.
    Tray(SurfaceMessage),
    /// A freshly rendered overlay frame.
    OverlayFrame(OverlayFrame),
    /// The overlay animator has stopped; hide its window.
    OverlayClosed,
    /// Exit the event loop.
    Shutdown,
}
