use crate::{
    CoreError, CoreResult, DriverStatus, NOTIFICATION_DURATION, RecordingState, Subscriber,
    Surface, SurfaceDriver, SurfaceMessage, surface_channel,
};

use std::panic::Location;
use std::time::{Duration, Instant};

use error_location::ErrorLocation;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Rendered {
    State(RecordingState),
    Toast(String),
    Closed,
}

#[derive(Default)]
struct RecordingSurface {
    rendered: Vec<Rendered>,
    fail_states: bool,
}

impl Surface for RecordingSurface {
    fn apply_state(&mut self, state: RecordingState) -> CoreResult<()> {
        self.rendered.push(Rendered::State(state));
        if self.fail_states {
            return Err(CoreError::SurfaceFailed {
                reason: "icon upload failed".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }

    fn notify(&mut self, title: &str, _message: &str) -> CoreResult<()> {
        self.rendered.push(Rendered::Toast(title.to_string()));
        Ok(())
    }

    fn close(&mut self) {
        self.rendered.push(Rendered::Closed);
    }
}

fn toast(title: &str) -> SurfaceMessage {
    SurfaceMessage::Notify {
        title: title.to_string(),
        message: "details".to_string(),
    }
}

/// WHAT: Re-delivering the cached state renders nothing
/// WHY: Surfaces skip redundant redraws
#[test]
fn given_cached_state_when_same_state_arrives_then_not_reapplied() {
    // Given: A driver showing Recording
    let mut driver = SurfaceDriver::new(RecordingSurface::default());
    let now = Instant::now();
    driver.handle(SurfaceMessage::State(RecordingState::Recording), now);

    // When: Recording arrives again
    driver.handle(SurfaceMessage::State(RecordingState::Recording), now);

    // Then: Only one render
    assert_eq!(
        driver.surface().rendered,
        vec![Rendered::State(RecordingState::Recording)]
    );
    assert_eq!(driver.cached_state(), Some(RecordingState::Recording));
}

/// WHAT: A toast reverts to the cached state once it expires
/// WHY: Notifications are transient
#[test]
fn given_toast_when_duration_elapses_then_state_restored() {
    // Given: Idle with a toast shown
    let mut driver = SurfaceDriver::new(RecordingSurface::default());
    let start = Instant::now();
    driver.handle(SurfaceMessage::State(RecordingState::Idle), start);
    driver.handle(toast("Transcription failed"), start);
    assert!(driver.is_showing_notification());
    assert_eq!(driver.next_deadline(), Some(start + NOTIFICATION_DURATION));

    // When: Ticking before and after expiry
    driver.tick(start + Duration::from_millis(1500));
    let before = driver.surface().rendered.len();
    driver.tick(start + NOTIFICATION_DURATION);

    // Then: Nothing early, Idle restored on expiry
    assert_eq!(before, 2);
    assert!(!driver.is_showing_notification());
    assert_eq!(
        driver.surface().rendered,
        vec![
            Rendered::State(RecordingState::Idle),
            Rendered::Toast("Transcription failed".to_string()),
            Rendered::State(RecordingState::Idle)
        ]
    );
}

/// WHAT: A new state replaces a visible toast immediately
/// WHY: State changes take priority over notifications
#[test]
fn given_toast_when_new_state_arrives_then_toast_cleared() {
    let mut driver = SurfaceDriver::new(RecordingSurface::default());
    let now = Instant::now();
    driver.handle(SurfaceMessage::State(RecordingState::Idle), now);
    driver.handle(toast("Hook failed"), now);

    driver.handle(SurfaceMessage::State(RecordingState::Recording), now);
    driver.tick(now + NOTIFICATION_DURATION);

    assert!(driver.next_deadline().is_none());
    assert_eq!(
        driver.surface().rendered.last(),
        Some(&Rendered::State(RecordingState::Recording))
    );
    assert_eq!(driver.surface().rendered.len(), 3);
}

/// WHAT: Pump drains queued messages in order and stops at Close
/// WHY: Surfaces apply the controller's ordering unchanged
#[test]
#[allow(clippy::unwrap_used)]
fn given_queued_messages_when_pumped_then_applied_in_order_until_close() {
    // Given: Messages queued through a subscriber
    let (subscriber, mut inbox) = surface_channel("test");
    subscriber
        .deliver(SurfaceMessage::State(RecordingState::Recording))
        .unwrap();
    subscriber
        .deliver(SurfaceMessage::State(RecordingState::Processing))
        .unwrap();
    subscriber.deliver(SurfaceMessage::Close).unwrap();
    subscriber
        .deliver(SurfaceMessage::State(RecordingState::Idle))
        .unwrap();
    let mut driver = SurfaceDriver::new(RecordingSurface::default());

    // When: Pumping
    let status = driver.pump(&mut inbox, Instant::now());

    // Then: Closed, nothing applied after Close
    assert_eq!(status, DriverStatus::Closed);
    assert_eq!(
        driver.surface().rendered,
        vec![
            Rendered::State(RecordingState::Recording),
            Rendered::State(RecordingState::Processing),
            Rendered::Closed
        ]
    );
    assert_eq!(
        driver.handle(SurfaceMessage::State(RecordingState::Idle), Instant::now()),
        DriverStatus::Closed
    );
}

/// WHAT: An empty inbox leaves the driver running
/// WHY: Pump is called on every wakeup, most of which have nothing queued
#[test]
fn given_empty_inbox_when_pumped_then_running() {
    let (_subscriber, mut inbox) = surface_channel("test");
    let mut driver = SurfaceDriver::new(RecordingSurface::default());

    assert_eq!(driver.pump(&mut inbox, Instant::now()), DriverStatus::Running);
    assert!(driver.surface().rendered.is_empty());
}

/// WHAT: A disconnected inbox closes the surface exactly once
/// WHY: The controller going away ends the surface
#[test]
fn given_disconnected_inbox_when_pumped_then_closed_once() {
    let (subscriber, mut inbox) = surface_channel("test");
    drop(subscriber);
    let mut driver = SurfaceDriver::new(RecordingSurface::default());

    assert_eq!(driver.pump(&mut inbox, Instant::now()), DriverStatus::Closed);
    driver.close();

    assert_eq!(driver.surface().rendered, vec![Rendered::Closed]);
}

/// WHAT: A render failure is logged and the driver keeps going
/// WHY: One failed redraw must not stop later updates
#[test]
fn given_failing_surface_when_state_applied_then_driver_keeps_running() {
    let mut driver = SurfaceDriver::new(RecordingSurface {
        fail_states: true,
        ..Default::default()
    });
    let now = Instant::now();

    let first = driver.handle(SurfaceMessage::State(RecordingState::Recording), now);
    let second = driver.handle(SurfaceMessage::State(RecordingState::Processing), now);

    assert_eq!(first, DriverStatus::Running);
    assert_eq!(second, DriverStatus::Running);
    assert_eq!(driver.cached_state(), Some(RecordingState::Processing));
}

/// WHAT: A subscriber reports closed once its inbox is dropped
/// WHY: The controller prunes on this error
#[test]
fn given_dropped_inbox_when_delivering_then_subscriber_closed() {
    let (subscriber, inbox) = surface_channel("overlay");
    drop(inbox);

    let result = subscriber.deliver(SurfaceMessage::Close);

    assert!(matches!(result, Err(CoreError::SubscriberClosed { name, .. }) if name == "overlay"));
}
