use crate::{AUTO_REPEAT_WINDOW, HotkeyEvent, HotkeyMatcher, KeyCombo, RawKey};

use std::time::{Duration, Instant};

const REPEAT: Duration = Duration::from_millis(33);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TestAction {
    Toggle,
    Cancel,
    Talk,
}

#[allow(clippy::unwrap_used)]
fn combo(names: &[&str]) -> KeyCombo {
    KeyCombo::parse(names).unwrap()
}

fn toggle_matcher(suppress_auto_repeat: bool) -> HotkeyMatcher<TestAction> {
    let mut matcher = HotkeyMatcher::new(suppress_auto_repeat);
    matcher.register(combo(&["ControlLeft", "Shift", "Space"]), TestAction::Toggle);
    matcher.register(combo(&["Escape"]), TestAction::Cancel);
    matcher
}

/// WHAT: Ctrl+Shift+Space fires toggle exactly once and releases cleanly
/// WHY: Core scenario for multi-key combos
#[test]
fn given_toggle_combo_when_pressed_and_released_then_fires_once_and_set_empties() {
    // Given: A matcher with ctrl+shift+space bound to toggle
    let mut matcher = toggle_matcher(true);
    let mut fired = Vec::new();

    // When: Pressing ctrl, shift, space
    fired.extend(matcher.on_key_down(RawKey::ControlLeft));
    fired.extend(matcher.on_key_down(RawKey::ShiftLeft));
    fired.extend(matcher.on_key_down(RawKey::Space));

    // Then: Exactly one toggle fire
    assert_eq!(fired, vec![HotkeyEvent::Fired(TestAction::Toggle)]);

    // When: Releasing space, shift, ctrl
    let mut released = Vec::new();
    released.extend(matcher.on_key_up(RawKey::Space));
    released.extend(matcher.on_key_up(RawKey::ShiftLeft));
    released.extend(matcher.on_key_up(RawKey::ControlLeft));

    // Then: One release edge and nothing held
    assert_eq!(released, vec![HotkeyEvent::Released(TestAction::Toggle)]);
    assert!(matcher.pressed().is_empty());
}

/// WHAT: Auto-repeat of a held key never re-fires the combo
/// WHY: OS key repeat must not look like a second press
#[test]
fn given_held_combo_when_auto_repeat_arrives_then_no_duplicate_fire() {
    // Given: Toggle combo fully held
    let mut matcher = toggle_matcher(true);
    matcher.on_key_down(RawKey::ControlLeft);
    matcher.on_key_down(RawKey::ShiftLeft);
    assert_eq!(matcher.on_key_down(RawKey::Space).len(), 1);

    // When: Space auto-repeats several times
    let repeats: Vec<_> = (0..5)
        .flat_map(|_| matcher.on_key_down(RawKey::Space))
        .collect();

    // Then: Nothing fires
    assert!(repeats.is_empty());
}

/// WHAT: Each not-held → held transition fires once, across every event order
/// WHY: Edge detection must not depend on the order keys go down or up
#[test]
fn given_all_press_orders_when_cycling_combo_then_one_fire_per_cycle() {
    let keys = [RawKey::ControlLeft, RawKey::ShiftLeft, RawKey::Space];
    let orders = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];

    for down in orders {
        for up in orders {
            // Given: A fresh matcher
            let mut matcher = toggle_matcher(true);
            let mut fires = 0;

            // When: Two full press/release cycles with a repeat in between
            for _ in 0..2 {
                for i in down {
                    fires += matcher.on_key_down(keys[i]).len();
                }
                fires += matcher.on_key_down(keys[down[2]]).len();
                for i in up {
                    matcher.on_key_up(keys[i]);
                }
            }

            // Then: Exactly one fire per cycle
            assert_eq!(fires, 2, "down {down:?} up {up:?}");
            assert!(matcher.pressed().is_empty());
        }
    }
}

/// WHAT: Releasing any combo key breaks the combo; re-pressing it fires again
/// WHY: Partial release followed by re-press is a new transition
#[test]
fn given_held_combo_when_one_key_released_and_repressed_then_fires_again() {
    let mut matcher = toggle_matcher(true);
    matcher.on_key_down(RawKey::ControlLeft);
    matcher.on_key_down(RawKey::ShiftLeft);
    matcher.on_key_down(RawKey::Space);

    // When: Shift released and pressed again
    let released = matcher.on_key_up(RawKey::ShiftLeft);
    let fired = matcher.on_key_down(RawKey::ShiftRight);

    // Then: One release edge, then one fire (right shift counts as shift)
    assert_eq!(released, vec![HotkeyEvent::Released(TestAction::Toggle)]);
    assert_eq!(fired, vec![HotkeyEvent::Fired(TestAction::Toggle)]);
}

/// WHAT: Right alt reported through two codes is one held key
/// WHY: The second encoding must look like auto-repeat, not a new press
#[test]
fn given_right_alt_via_two_codes_when_pressed_then_single_held_key() {
    // Given: Push-to-talk bound to right alt
    let mut matcher = HotkeyMatcher::new(true);
    matcher.register(combo(&["AltRight"]), TestAction::Talk);

    // When: AltRight then VK_RMENU without a release
    let first = matcher.on_key_down(RawKey::AltRight);
    let second = matcher.on_key_down(RawKey::Code(165));

    // Then: One fire, one held key
    assert_eq!(first, vec![HotkeyEvent::Fired(TestAction::Talk)]);
    assert!(second.is_empty());
    assert_eq!(matcher.pressed().len(), 1);

    // When: Released through the AltGr encoding
    let released = matcher.on_key_up(RawKey::AltGr);

    // Then: The key is released
    assert_eq!(released, vec![HotkeyEvent::Released(TestAction::Talk)]);
    assert!(matcher.pressed().is_empty());
}

/// WHAT: Overlapping combos all fire from one key-down, in registration order
/// WHY: Multiple actions may fire with no precedence between them
#[test]
fn given_overlapping_combos_when_superset_pressed_then_all_fire_in_order() {
    // Given: Space alone and ctrl+space bound to different actions
    let mut matcher = HotkeyMatcher::new(true);
    matcher.register(combo(&["Ctrl", "Space"]), TestAction::Toggle);
    matcher.register(combo(&["Space"]), TestAction::Talk);

    // When: Ctrl then Space
    matcher.on_key_down(RawKey::ControlRight);
    let fired = matcher.on_key_down(RawKey::Space);

    // Then: Both fire, in registration order
    assert_eq!(
        fired,
        vec![
            HotkeyEvent::Fired(TestAction::Toggle),
            HotkeyEvent::Fired(TestAction::Talk)
        ]
    );
}

/// WHAT: With suppression off, a repeated key-down re-fires the held combo
/// WHY: The toggle exists for sources that already filter repeats
#[test]
fn given_suppression_disabled_when_key_repeats_then_combo_refires() {
    let mut matcher = HotkeyMatcher::new(false);
    matcher.register(combo(&["F9"]), TestAction::Talk);

    let first = matcher.on_key_down(RawKey::F(9));
    let repeat = matcher.on_key_down(RawKey::F(9));

    assert_eq!(first, vec![HotkeyEvent::Fired(TestAction::Talk)]);
    assert_eq!(repeat, vec![HotkeyEvent::Fired(TestAction::Talk)]);
    assert!(!matcher.suppresses_auto_repeat());
}

/// WHAT: After reset a key-down past the repeat window is a fresh press
/// WHY: A lost key-up must not wedge the trigger
#[test]
fn given_lost_key_up_when_reset_then_later_press_fires() {
    // Given: F9 held and its release lost
    let t0 = Instant::now();
    let mut matcher = HotkeyMatcher::new(true);
    matcher.register(combo(&["F9"]), TestAction::Talk);
    matcher.on_key_down_at(RawKey::F(9), t0);
    assert!(matcher.on_key_down_at(RawKey::F(9), t0 + REPEAT).is_empty());

    // When: Resetting, then pressing again well after the last repeat
    matcher.reset();
    assert!(matcher.pressed().is_empty());
    let later = t0 + REPEAT + AUTO_REPEAT_WINDOW + Duration::from_millis(200);
    let events = matcher.on_key_down_at(RawKey::F(9), later);

    // Then: The press fires
    assert_eq!(events, vec![HotkeyEvent::Fired(TestAction::Talk)]);
}

/// WHAT: Auto-repeat of a key still down at reset is re-held without firing
/// WHY: A forced reset must not restart a recording while the key is held
#[test]
fn given_held_key_when_reset_then_auto_repeat_does_not_fire() {
    // Given: F9 held and repeating when the matcher is reset
    let t0 = Instant::now();
    let mut matcher = HotkeyMatcher::new(true);
    matcher.register(combo(&["F9"]), TestAction::Talk);
    matcher.on_key_down_at(RawKey::F(9), t0);
    matcher.on_key_down_at(RawKey::F(9), t0 + REPEAT);
    matcher.reset();

    // When: The next repeats arrive
    let first = matcher.on_key_down_at(RawKey::F(9), t0 + REPEAT * 2);
    let second = matcher.on_key_down_at(RawKey::F(9), t0 + REPEAT * 3);

    // Then: Nothing fires, but the key is held again and its release is seen
    assert!(first.is_empty());
    assert!(second.is_empty());
    assert_eq!(matcher.pressed().len(), 1);
    assert_eq!(
        matcher.on_key_up(RawKey::F(9)),
        vec![HotkeyEvent::Released(TestAction::Talk)]
    );

    // And: A real press after that fires as usual
    assert_eq!(
        matcher.on_key_down_at(RawKey::F(9), t0 + REPEAT * 4),
        vec![HotkeyEvent::Fired(TestAction::Talk)]
    );
}

/// WHAT: A key released and pressed again across a reset fires normally
/// WHY: Only keys still down at reset are treated as repeat
#[test]
fn given_key_released_after_reset_when_pressed_then_fires() {
    let t0 = Instant::now();
    let mut matcher = HotkeyMatcher::new(true);
    matcher.register(combo(&["F9"]), TestAction::Talk);
    matcher.on_key_down_at(RawKey::F(9), t0);
    matcher.reset();

    assert!(matcher.on_key_up(RawKey::F(9)).is_empty());

    assert_eq!(
        matcher.on_key_down_at(RawKey::F(9), t0 + REPEAT),
        vec![HotkeyEvent::Fired(TestAction::Talk)]
    );
}

/// WHAT: Release of a key that was never pressed is harmless
/// WHY: Sources may deliver a stray key-up after focus changes
#[test]
fn given_no_held_keys_when_key_released_then_no_events() {
    let mut matcher = toggle_matcher(true);

    assert!(matcher.on_key_up(RawKey::Escape).is_empty());
    assert!(matcher.pressed().is_empty());
}

/// WHAT: Unrelated keys are tracked but never fire
/// WHY: Typing must not trigger anything
#[test]
fn given_unbound_key_when_pressed_then_tracked_without_events() {
    let mut matcher = toggle_matcher(true);

    assert!(matcher.on_key_down(RawKey::Char('q')).is_empty());
    assert_eq!(matcher.pressed().len(), 1);
}
