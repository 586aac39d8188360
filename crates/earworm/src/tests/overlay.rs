use crate::{
    AppError, AppResult,
    overlay::{
        BAR_COUNT, FRAME_INTERVAL, FRAME_SIZE, FRAME_WRAP, FrameSink, IDLE, IDLE_GLOW,
        OverlayAnimator, OverlayFrame, PANEL, PROCESSING, RECORDING, RECORDING_GLOW,
        READY_TIMEOUT, Scene, TOAST, lerp_color, rasterize, spawn_overlay,
    },
};

use std::{
    f32::consts::TAU,
    panic::Location,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::{Duration, Instant},
};

use earworm_core::{RecordingState, Subscriber, SurfaceMessage, surface_channel};
use error_location::ErrorLocation;
use image::Rgba;
use parking_lot::Mutex;

#[derive(Clone, Default)]
struct CapturingSink {
    titles: Arc<Mutex<Vec<String>>>,
    closed: Arc<AtomicBool>,
    fail: bool,
}

impl FrameSink for CapturingSink {
    fn present(&self, frame: OverlayFrame) -> AppResult<()> {
        if self.fail {
            return Err(AppError::OverlayError {
                reason: "window destroyed".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.titles.lock().push(frame.title);
        Ok(())
    }

    fn closed(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

impl CapturingSink {
    fn wait_for_title(&self, title: &str) -> bool {
        let deadline = Instant::now() + READY_TIMEOUT;
        while Instant::now() < deadline {
            if self.titles.lock().iter().any(|t| t == title) {
                return true;
            }
            thread::sleep(Duration::from_millis(10));
        }
        false
    }
}

/// WHAT: Colour interpolation hits both ends and clamps outside them
/// WHY: Glow factors can overshoot slightly
#[test]
fn given_colors_when_interpolating_then_endpoints_and_clamping_hold() {
    assert_eq!(lerp_color(IDLE, IDLE_GLOW, 0.0), IDLE);
    assert_eq!(lerp_color(IDLE, IDLE_GLOW, 1.0), IDLE_GLOW);
    assert_eq!(lerp_color(IDLE, IDLE_GLOW, -3.0), IDLE);
    assert_eq!(lerp_color(IDLE, IDLE_GLOW, 7.5), IDLE_GLOW);
    assert_eq!(
        lerp_color(Rgba([0, 0, 0, 255]), Rgba([200, 100, 50, 255]), 0.5),
        Rgba([100, 50, 25, 255])
    );
}

/// WHAT: Idle frames breathe within their radius range and show the hint
/// WHY: The idle overlay tells the user which key to hold
#[test]
#[allow(clippy::panic)]
fn given_idle_animator_when_advancing_then_pulse_with_trigger_hint() {
    // Given: A fresh animator
    let mut animator = OverlayAnimator::new("F9");

    // When: Advancing a full pulse cycle
    let frames: Vec<_> = (0..80).map(|_| animator.advance()).collect();

    // Then: Radius stays in range and actually changes
    let radii: Vec<f32> = frames
        .iter()
        .map(|frame| match frame.scene {
            Scene::Pulse { radius, .. } => radius,
            ref other => panic!("unexpected scene {:?}", other),
        })
        .collect();
    assert!(radii.iter().all(|r| (10.0..=14.0).contains(r)));
    assert!(radii.iter().any(|r| (r - radii[0]).abs() > 1.0));
    assert_eq!(frames[0].status, "Ready");
    assert_eq!(frames[0].hint, "Hold F9 to speak");
    assert_eq!(frames[0].accent, IDLE);
}

/// WHAT: Recording frames show five bouncing bars
/// WHY: The sound wave is the recording cue
#[test]
#[allow(clippy::panic)]
fn given_recording_when_advancing_then_bars_bounce_within_bounds() {
    // Given: A recording animator
    let mut animator = OverlayAnimator::new("F9");
    animator.set_state(RecordingState::Recording);

    // When: Advancing a few frames
    let first = animator.advance();
    let second = animator.advance();

    // Then: Bars stay in range and move between frames
    let (Scene::SoundWave { bars: a }, Scene::SoundWave { bars: b }) = (&first.scene, &second.scene)
    else {
        panic!("expected sound wave scenes");
    };
    assert_eq!(a.len(), BAR_COUNT);
    assert!(a.iter().all(|bar| (6.0..=22.0).contains(&bar.half_height)));
    assert!(a.iter().zip(b.iter()).any(|(x, y)| x.half_height != y.half_height));
    assert!(a.windows(2).all(|pair| pair[0].offset_x < pair[1].offset_x));
    assert_eq!(first.status, "Listening");
    assert_eq!(first.hint, "Release to finish");
    assert_eq!(first.accent, RECORDING);
    assert!(
        a.iter()
            .all(|bar| bar.color[0] >= RECORDING[0] && bar.color[0] <= RECORDING_GLOW[0])
    );
}

/// WHAT: The processing spinner turns by a fixed step per frame
/// WHY: A steady spin reads as work in progress
#[test]
#[allow(clippy::panic)]
fn given_processing_when_advancing_then_spinner_rotates() {
    // Given: A processing animator
    let mut animator = OverlayAnimator::new("F9");
    animator.set_state(RecordingState::Processing);

    // When: Advancing 50 frames
    let frames: Vec<_> = (0..50).map(|_| animator.advance()).collect();

    // Then: Start advances 8 degrees a frame, wrapping at 360
    let starts: Vec<f32> = frames
        .iter()
        .map(|frame| match frame.scene {
            Scene::Spinner { start, extent, .. } => {
                assert!((40.0..=100.0).contains(&extent));
                start
            }
            ref other => panic!("unexpected scene {:?}", other),
        })
        .collect();
    assert_eq!(starts[0], 8.0);
    assert_eq!(starts[1], 16.0);
    assert_eq!(starts[44], 0.0);
    assert_eq!(frames[0].status, "Transcribing");
    assert_eq!(frames[0].accent, PROCESSING);
}

/// WHAT: Counters wrap and the spinner keeps turning after the wrap
/// WHY: An overlay left running for days must not freeze its animation
#[test]
#[allow(clippy::panic)]
fn given_long_running_animator_when_counters_wrap_then_animation_continues() {
    // Given: An idle animator
    let mut animator = OverlayAnimator::new("F9");

    // When: Advancing past the wrap point
    for _ in 0..FRAME_WRAP + 10 {
        animator.advance();
    }

    // Then: Both counters stayed bounded
    let (frame, pulse_phase) = animator.counters();
    assert_eq!(frame, 10);
    assert!((0.0..TAU).contains(&pulse_phase));

    // And: The spinner still steps 8 degrees a frame
    animator.set_state(RecordingState::Processing);
    let starts: Vec<f32> = (0..2)
        .map(|_| match animator.advance().scene {
            Scene::Spinner { start, .. } => start,
            other => panic!("unexpected scene {:?}", other),
        })
        .collect();
    assert_eq!(starts, vec![88.0, 96.0]);
}

/// WHAT: A toast overrides the state until the next state change
/// WHY: Notifications sit on top of whatever the overlay shows
#[test]
fn given_toast_when_state_changes_then_toast_cleared() {
    // Given: Recording with a toast
    let mut animator = OverlayAnimator::new("F9");
    animator.set_state(RecordingState::Recording);
    animator.show_toast("Recording reset", "Key release was missed");

    // When: Advancing, then changing state
    let toast = animator.advance();
    animator.set_state(RecordingState::Idle);
    let after = animator.advance();

    // Then: Toast first, idle after
    assert_eq!(toast.scene, Scene::Toast);
    assert_eq!(toast.status, "Recording reset");
    assert_eq!(toast.hint, "Key release was missed");
    assert_eq!(toast.accent, TOAST);
    assert!(!animator.is_showing_toast());
    assert_eq!(animator.state(), RecordingState::Idle);
    assert_eq!(after.status, "Ready");
}

/// WHAT: Rasterized scenes put their colour where the geometry is
/// WHY: The frame is the only visual the overlay window gets
#[test]
fn given_each_scene_when_rasterized_then_pixels_match_geometry() {
    let mut animator = OverlayAnimator::new("F9");

    // Idle: solid pulse colour at the centre, panel in the corner
    let idle = animator.advance();
    let img = rasterize(&idle);
    assert_eq!(img.dimensions(), (FRAME_SIZE, FRAME_SIZE));
    if let Scene::Pulse { color, .. } = idle.scene {
        assert_eq!(*img.get_pixel(32, 32), color);
    }
    assert_eq!(*img.get_pixel(0, 0), PANEL);

    // Recording: inside the first bar is coloured, the gap after it is not
    animator.set_state(RecordingState::Recording);
    let recording = animator.advance();
    let img = rasterize(&recording);
    if let Scene::SoundWave { bars } = &recording.scene {
        assert_eq!(*img.get_pixel(17, 32), bars[0].color);
    }
    assert_eq!(*img.get_pixel(21, 32), PANEL);

    // Processing: the arc near 48 degrees, the background ring opposite
    animator.set_state(RecordingState::Processing);
    let processing = animator.advance();
    let img = rasterize(&processing);
    if let Scene::Spinner { color, .. } = processing.scene {
        assert_eq!(*img.get_pixel(41, 21), color);
    }
    assert_eq!(*img.get_pixel(22, 42), Rgba([0x0D, 0x0D, 0x0D, 0xFF]));

    // Toast: the badge ring is drawn in the accent colour
    animator.show_toast("Saved", "ok");
    let img = rasterize(&animator.advance());
    assert!(img.get_pixel(50, 31)[2] > 200);
    assert_eq!(*img.get_pixel(0, 0), PANEL);
}

/// WHAT: Rendering packs the pixels and builds the window title
/// WHY: The window shows status and hint in its title
#[test]
fn given_frame_when_rendered_then_rgba_and_title_filled() {
    let mut animator = OverlayAnimator::new("Ctrl+Space");

    let frame = OverlayFrame::render(&animator.advance());

    assert_eq!(frame.width, FRAME_SIZE);
    assert_eq!(frame.height, FRAME_SIZE);
    assert_eq!(frame.rgba.len(), (FRAME_SIZE * FRAME_SIZE * 4) as usize);
    assert_eq!(frame.title, "Ready - Hold Ctrl+Space to speak");
}

/// WHAT: The overlay thread follows its inbox and stops on Close
/// WHY: The overlay must track state and shut down with the controller
#[test]
#[allow(clippy::unwrap_used)]
fn given_running_overlay_when_messages_arrive_then_frames_follow_until_close() {
    // Given: Recording queued before the overlay starts
    let (subscriber, inbox) = surface_channel("overlay");
    subscriber
        .deliver(SurfaceMessage::State(RecordingState::Recording))
        .unwrap();
    let sink = CapturingSink::default();

    // When: Starting, showing a toast, then closing
    let handle = spawn_overlay(inbox, sink.clone(), "F9".to_string()).unwrap();
    let recording_seen = sink.wait_for_title("Listening - Release to finish");
    subscriber
        .deliver(SurfaceMessage::Notify {
            title: "Hook failed".to_string(),
            message: "exit 3".to_string(),
        })
        .unwrap();
    let toast_seen = sink.wait_for_title("Hook failed - exit 3");
    subscriber.deliver(SurfaceMessage::Close).unwrap();
    handle.join();

    // Then: Both frames were shown and the sink was told it closed
    assert!(recording_seen);
    assert!(toast_seen);
    assert!(sink.closed.load(Ordering::SeqCst));
    assert!(subscriber.deliver(SurfaceMessage::State(RecordingState::Idle)).is_err());
}

/// WHAT: An unchanging frame is posted once, not every interval
/// WHY: Re-posting a static toast wastes main-thread work
#[test]
#[allow(clippy::unwrap_used)]
fn given_static_toast_when_overlay_runs_then_frame_posted_once() {
    // Given: A toast queued before the overlay starts
    let (subscriber, inbox) = surface_channel("overlay");
    subscriber
        .deliver(SurfaceMessage::Notify {
            title: "Saved".to_string(),
            message: "ok".to_string(),
        })
        .unwrap();
    let sink = CapturingSink::default();

    // When: Running for several frame intervals
    let handle = spawn_overlay(inbox, sink.clone(), "F9".to_string()).unwrap();
    let toast_seen = sink.wait_for_title("Saved - ok");
    thread::sleep(FRAME_INTERVAL * 6);
    subscriber.deliver(SurfaceMessage::Close).unwrap();
    handle.join();

    // Then: Exactly one frame was posted
    assert!(toast_seen);
    assert_eq!(*sink.titles.lock(), vec!["Saved - ok".to_string()]);
}

/// WHAT: The animator stops when frames can no longer be presented
/// WHY: A destroyed window must not leave a spinning thread behind
#[test]
#[allow(clippy::unwrap_used)]
fn given_failing_sink_when_overlay_runs_then_thread_exits() {
    // Given: A sink that always fails
    let (subscriber, inbox) = surface_channel("overlay");
    let sink = CapturingSink {
        fail: true,
        ..CapturingSink::default()
    };

    // When: Starting and joining
    let handle = spawn_overlay(inbox, sink.clone(), "F9".to_string()).unwrap();
    handle.join();

    // Then: Closed, and the controller side sees the inbox gone
    assert!(sink.closed.load(Ordering::SeqCst));
    assert!(sink.titles.lock().is_empty());
    assert!(subscriber.deliver(SurfaceMessage::Close).is_err());
}
