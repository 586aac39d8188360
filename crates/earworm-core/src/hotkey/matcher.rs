//! Held-key tracking and combo edge detection.
//!
//! The matcher owns the set of currently held canonical keys and turns raw
//! press/release events into [`HotkeyEvent`]s. It never calls out; callers
//! route the returned events wherever they need to go.
//!
//! A reset forgets held keys, but the OS keeps auto-repeating a key that is
//! still physically down. Keys held at reset are remembered with the time
//! they were last seen; a key-down for one of them inside
//! [`AUTO_REPEAT_WINDOW`] is taken as repeat and re-held silently.

use crate::{HotkeyEvent, KeyCombo, RawKey, key::CanonicalKey, normalize};

use std::{
    collections::{HashMap, HashSet},
    fmt::Debug,
    time::{Duration, Instant},
};

use tracing::{debug, trace};

/// Longest gap between key-downs of a held key that still counts as
/// auto-repeat. Typical repeat periods are 30 to 100 ms.
pub const AUTO_REPEAT_WINDOW: Duration = Duration::from_millis(500);

struct Binding<A> {
    combo: KeyCombo,
    action: A,
    held: bool,
}

/// Tracks held keys and evaluates them against registered combos.
pub struct HotkeyMatcher<A> {
    pressed: HashSet<CanonicalKey>,
    last_seen: HashMap<CanonicalKey, Instant>,
    held_at_reset: HashMap<CanonicalKey, Instant>,
    bindings: Vec<Binding<A>>,
    suppress_auto_repeat: bool,
}

impl<A: Copy + Debug> HotkeyMatcher<A> {
    /// Create an empty matcher.
    ///
    /// With `suppress_auto_repeat` set, a key-down for a key that is already
    /// held produces no events at all.
    pub fn new(suppress_auto_repeat: bool) -> Self {
        Self {
            pressed: HashSet::new(),
            last_seen: HashMap::new(),
            held_at_reset: HashMap::new(),
            bindings: Vec::new(),
            suppress_auto_repeat,
        }
    }

    /// Bind `combo` to `action`.
    ///
    /// Bindings are evaluated in registration order. Overlapping combos are
    /// all allowed to fire from the same key-down.
    pub fn register(&mut self, combo: KeyCombo, action: A) {
        debug!(combo = %combo, action = ?action, "Hotkey registered");
        self.bindings.push(Binding {
            combo,
            action,
            held: false,
        });
    }

    /// Handle a key-down from the keyboard source.
    pub fn on_key_down(&mut self, raw: RawKey) -> Vec<HotkeyEvent<A>> {
        self.on_key_down_at(raw, Instant::now())
    }

    /// Handle a key-down observed at `now`.
    pub fn on_key_down_at(&mut self, raw: RawKey, now: Instant) -> Vec<HotkeyEvent<A>> {
        let key = normalize(raw);
        let seen_before_reset = self.held_at_reset.remove(&key);
        self.last_seen.insert(key, now);

        if let Some(seen) = seen_before_reset {
            if now.saturating_duration_since(seen) <= AUTO_REPEAT_WINDOW {
                self.rehold(key);
                return Vec::new();
            }
        }

        let repeat = !self.pressed.insert(key);

        if repeat && self.suppress_auto_repeat {
            trace!(key = %key, "Auto-repeat suppressed");
            return Vec::new();
        }

        let mut events = Vec::new();
        for binding in &mut self.bindings {
            if !binding.combo.is_held(&self.pressed) {
                continue;
            }
            // Without suppression a repeated key-down re-fires held combos.
            if !binding.held || (repeat && binding.combo.contains(key)) {
                binding.held = true;
                events.push(HotkeyEvent::Fired(binding.action));
            }
        }

        if !events.is_empty() {
            debug!(key = %key, events = ?events, "Hotkey fired");
        }

        events
    }

    /// Handle a key-up from the keyboard source.
    pub fn on_key_up(&mut self, raw: RawKey) -> Vec<HotkeyEvent<A>> {
        let key = normalize(raw);

        self.last_seen.remove(&key);
        self.held_at_reset.remove(&key);
        if !self.pressed.remove(&key) {
            trace!(key = %key, "Release for key that was not held");
        }

        let mut events = Vec::new();
        for binding in &mut self.bindings {
            if binding.held && !binding.combo.is_held(&self.pressed) {
                binding.held = false;
                events.push(HotkeyEvent::Released(binding.action));
            }
        }

        events
    }

    /// Forget every held key and every held combo without emitting events.
    ///
    /// Keys that were held stay remembered until their next key-down or
    /// key-up, so auto-repeat from a key still down does not fire.
    pub fn reset(&mut self) {
        if !self.pressed.is_empty() {
            debug!(held = self.pressed.len(), "Hotkey matcher reset");
        }
        for key in self.pressed.drain() {
            if let Some(seen) = self.last_seen.remove(&key) {
                self.held_at_reset.insert(key, seen);
            }
        }
        self.last_seen.clear();
        for binding in &mut self.bindings {
            binding.held = false;
        }
    }

    /// Put a key that was down at reset back into the held set, marking the
    /// combos it completes as held without firing them.
    fn rehold(&mut self, key: CanonicalKey) {
        self.pressed.insert(key);
        for binding in &mut self.bindings {
            if binding.combo.is_held(&self.pressed) {
                binding.held = true;
            }
        }
        debug!(key = %key, "Auto-repeat after reset, key held again without firing");
    }

    /// Keys currently held.
    pub fn pressed(&self) -> &HashSet<CanonicalKey> {
        &self.pressed
    }

    /// Whether auto-repeat key-downs are dropped.
    pub fn suppresses_auto_repeat(&self) -> bool {
        self.suppress_auto_repeat
    }
}
