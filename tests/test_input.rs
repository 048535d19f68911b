use space_shooter::input::*;

#[test]
fn held_fire_produces_a_single_edge() {
    let mut keys = KeyTracker::default();
    keys.press(Action::Fire, 1);
    assert!(keys.snapshot(1).fire);

    // Repeats and OS key-repeat presses while held never re-fire
    for frame in 2..10 {
        keys.repeat(Action::Fire, frame);
        keys.press(Action::Fire, frame);
        assert!(!keys.snapshot(frame).fire, "fired again on frame {frame}");
    }
}

#[test]
fn release_then_press_fires_again() {
    let mut keys = KeyTracker::default();
    keys.press(Action::Fire, 1);
    assert!(keys.snapshot(1).fire);
    keys.release(Action::Fire);
    keys.press(Action::Fire, 2);
    assert!(keys.snapshot(2).fire);
}

#[test]
fn separate_taps_without_releases_each_fire() {
    // Terminals without release events: two taps, ten frames apart
    let mut keys = KeyTracker::default();
    keys.press(Action::Fire, 1);
    assert!(keys.snapshot(1).fire);
    for frame in 2..=10 {
        assert!(!keys.snapshot(frame).fire);
    }
    keys.press(Action::Fire, 11);
    assert!(keys.snapshot(11).fire, "second tap was swallowed");
}

#[test]
fn default_window_bridges_os_key_repeat() {
    // 30 ms repeats at 60 FPS arrive every other frame
    let mut keys = KeyTracker::default();
    keys.press(Action::Left, 1);
    for frame in 1..40 {
        if frame % 2 == 1 {
            keys.press(Action::Left, frame);
        }
        assert!(keys.snapshot(frame).left, "movement stalled on frame {frame}");
    }
}

#[test]
fn tap_between_snapshots_still_counts() {
    let mut keys = KeyTracker::default();
    keys.press(Action::Confirm, 3);
    keys.release(Action::Confirm);
    let snap = keys.snapshot(3);
    assert!(snap.confirm);
    assert!(!keys.snapshot(4).confirm);
}

#[test]
fn movement_is_held_until_released() {
    let mut keys = KeyTracker::default();
    keys.press(Action::Left, 1);
    assert!(keys.snapshot(1).left);
    assert!(keys.snapshot(2).left);
    keys.release(Action::Left);
    assert!(!keys.snapshot(3).left);
}

#[test]
fn held_key_expires_without_fresh_presses() {
    let mut keys = KeyTracker::new(4);
    keys.press(Action::Right, 10);
    assert!(keys.snapshot(14).right);
    assert!(!keys.snapshot(15).right);
}

#[test]
fn expired_key_pressed_again_is_a_new_edge() {
    let mut keys = KeyTracker::new(4);
    keys.press(Action::Restart, 1);
    assert!(keys.snapshot(1).restart);
    keys.press(Action::Restart, 20);
    assert!(keys.snapshot(20).restart);
}

#[test]
fn both_directions_can_be_held() {
    let mut keys = KeyTracker::default();
    keys.press(Action::Left, 1);
    keys.press(Action::Right, 1);
    let snap = keys.snapshot(1);
    assert!(snap.left && snap.right);
}

#[test]
fn quit_is_reported_until_snapshot() {
    let mut keys = KeyTracker::default();
    assert!(!keys.quit_requested());
    keys.press(Action::Quit, 1);
    assert!(keys.quit_requested());
    let _ = keys.snapshot(1);
    assert!(!keys.quit_requested());
}
