//! Global keyboard hook feeding the hotkey matcher.
//!
//! rdev's `listen` installs a process-wide hook and blocks its thread for
//! the rest of the process, so the hook is installed once and `stop` only
//! detaches it from the controller.

use crate::{AppError, AppResult, keyboard::to_raw_key};

use std::{
    panic::Location,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
};

use earworm_core::{HotkeyAction, HotkeyMatcher, PushToTalkController, ResetReason};
use error_location::ErrorLocation;
use parking_lot::Mutex;
use rdev::EventType;
use tracing::{debug, error, info, instrument, warn};

/// Owns the matcher and the lifetime of the keyboard hook.
#[derive(Clone)]
pub(crate) struct KeyboardListener {
    matcher: Arc<Mutex<HotkeyMatcher<HotkeyAction>>>,
    running: Arc<AtomicBool>,
    hook_installed: Arc<AtomicBool>,
}

impl KeyboardListener {
    /// Wrap a configured matcher. Nothing is hooked until [`start`](Self::start).
    pub(crate) fn new(matcher: HotkeyMatcher<HotkeyAction>) -> Self {
        Self {
            matcher: Arc::new(Mutex::new(matcher)),
            running: Arc::new(AtomicBool::new(false)),
            hook_installed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A listener that accepts events without installing the OS hook.
    #[cfg(test)]
    pub(crate) fn detached(matcher: HotkeyMatcher<HotkeyAction>) -> Self {
        let listener = Self::new(matcher);
        listener.running.store(true, Ordering::SeqCst);
        listener
    }

    /// Start delivering key events to `controller`.
    ///
    /// Calling this while already running is a no-op.
    #[track_caller]
    #[instrument(skip_all)]
    pub(crate) fn start(&self, controller: Arc<PushToTalkController>) -> AppResult<()> {
        if self.running.swap(true, Ordering::SeqCst) {
            debug!("Keyboard listener already running");
            return Ok(());
        }

        if self.hook_installed.swap(true, Ordering::SeqCst) {
            info!("Keyboard listener resumed");
            return Ok(());
        }

        let listener = self.clone();
        let spawned = thread::Builder::new()
            .name("keyboard-listener".to_string())
            .spawn(move || {
                let hook_controller = Arc::clone(&controller);
                let hook_listener = listener.clone();
                let result = rdev::listen(move |event| {
                    hook_listener.process_event(&event.event_type, &hook_controller);
                });

                if let Err(e) = result {
                    error!(error = ?e, "Keyboard hook failed");
                    listener.hook_failed(&controller, &format!("{:?}", e));
                }
            });

        if let Err(e) = spawned {
            self.running.store(false, Ordering::SeqCst);
            self.hook_installed.store(false, Ordering::SeqCst);
            return Err(AppError::KeyboardListenerFailed {
                reason: format!("Failed to spawn listener thread: {}", e),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        info!("Keyboard listener started");

        Ok(())
    }

    /// Stop delivering events and forget every held key.
    #[instrument(skip_all)]
    pub(crate) fn stop(&self) {
        if self.running.swap(false, Ordering::SeqCst) {
            self.matcher.lock().reset();
            info!("Keyboard listener stopped");
        }
    }

    /// Forget every held key, recovering from a lost key-up.
    pub(crate) fn resync(&self) {
        let mut matcher = self.matcher.lock();
        if !matcher.pressed().is_empty() {
            warn!(held = matcher.pressed().len(), "Resyncing held keys");
        }
        matcher.reset();
    }

    /// The OS hook is gone, so held keys can no longer be observed.
    ///
    /// A live session is reset with [`ResetReason::Resync`] since its
    /// trigger release would never arrive.
    pub(crate) fn hook_failed(&self, controller: &PushToTalkController, reason: &str) {
        self.running.store(false, Ordering::SeqCst);
        self.hook_installed.store(false, Ordering::SeqCst);
        self.matcher.lock().reset();

        if let Some(transition) = controller.reset(ResetReason::Resync) {
            warn!(
                session_id = %transition.session_id,
                from = %transition.from,
                "Session reset after hook failure"
            );
        }
        controller.notify("Keyboard hook failed", reason);
    }

    /// Whether events are currently delivered.
    pub(crate) fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Run one hook event through the matcher and hand the resulting edges
    /// to `controller`.
    pub(crate) fn process_event(&self, event: &EventType, controller: &PushToTalkController) {
        if !self.is_running() {
            return;
        }

        // Matcher lock is released before the controller is called.
        let edges = {
            let mut matcher = self.matcher.lock();
            match *event {
                EventType::KeyPress(key) => matcher.on_key_down(to_raw_key(key)),
                EventType::KeyRelease(key) => matcher.on_key_up(to_raw_key(key)),
                _ => return,
            }
        };

        for edge in edges {
            if let Err(e) = controller.handle_hotkey(edge) {
                error!(action = %edge.action(), error = ?e, "Failed to handle hotkey");
            }
        }
    }
}
