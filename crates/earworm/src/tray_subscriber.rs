use crate::UiEvent;

use std::panic::Location;

use earworm_core::{CoreError, CoreResult, Subscriber, SurfaceMessage};
use error_location::ErrorLocation;
use tao::event_loop::EventLoopProxy;

/// Queues tray messages onto the main thread's event loop.
///
/// `TrayIcon` is `!Send`, so the tray's inbox is the event loop itself.
pub(crate) struct TraySubscriber {
    proxy: EventLoopProxy<UiEvent>,
}

impl TraySubscriber {
    pub(crate) fn new(proxy: EventLoopProxy<UiEvent>) -> Self {
        Self { proxy }
    }
}

impl Subscriber for TraySubscriber {
    fn name(&self) -> &str {
        "tray"
    }

    #[track_caller]
    fn deliver(&self, message: SurfaceMessage) -> CoreResult<()> {
        self.proxy
            .send_event(UiEvent::Tray(message))
            .map_err(|_| CoreError::SubscriberClosed {
                name: self.name().to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
