/// Turns raw key events into per-frame `InputSnapshot`s.
///
/// Terminals fall in two classes:
/// * keyboard-enhancement capable (kitty protocol): proper press / repeat /
///   release events, so keys are dropped on release;
/// * classic: only presses, with OS key-repeat showing up as more presses.
///   A held key then expires after `hold_window` frames without a fresh
///   press.  The window only has to bridge the OS repeat interval, so two
///   separate taps a little further apart still latch two edges.
///
/// Edge-triggered actions latch only on a released → pressed transition, so
/// a key kept down for many frames fires once.

use std::collections::{HashMap, HashSet};

use crate::entities::InputSnapshot;

/// Default hold window: 6 frames ≈ 100 ms at 60 FPS.  OS key-repeat runs at
/// 25–50 ms per repeat, so a held key is always refreshed before expiry.
pub const HOLD_WINDOW: u64 = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Fire,
    Confirm,
    Restart,
    Quit,
}

#[derive(Debug)]
pub struct KeyTracker {
    /// Action → frame of its most recent press/repeat.
    held: HashMap<Action, u64>,
    /// Rising edges not yet consumed by `snapshot`.
    edges: HashSet<Action>,
    hold_window: u64,
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new(HOLD_WINDOW)
    }
}

impl KeyTracker {
    pub fn new(hold_window: u64) -> Self {
        Self {
            held: HashMap::new(),
            edges: HashSet::new(),
            hold_window,
        }
    }

    /// Record a press (or an OS repeat that arrives as a press).
    pub fn press(&mut self, action: Action, frame: u64) {
        if !self.is_held(action, frame) {
            self.edges.insert(action);
        }
        self.held.insert(action, frame);
    }

    /// Record a repeat event; keeps the key alive without a new edge.
    pub fn repeat(&mut self, action: Action, frame: u64) {
        self.held.insert(action, frame);
    }

    pub fn release(&mut self, action: Action) {
        self.held.remove(&action);
    }

    pub fn is_held(&self, action: Action, frame: u64) -> bool {
        self.held
            .get(&action)
            .map(|&last| frame.saturating_sub(last) <= self.hold_window)
            .unwrap_or(false)
    }

    pub fn quit_requested(&self) -> bool {
        self.edges.contains(&Action::Quit)
    }

    /// Build this frame's snapshot and consume pending edges.
    pub fn snapshot(&mut self, frame: u64) -> InputSnapshot {
        let window = self.hold_window;
        self.held
            .retain(|_, last| frame.saturating_sub(*last) <= window);

        let snapshot = InputSnapshot {
            left: self.is_held(Action::Left, frame),
            right: self.is_held(Action::Right, frame),
            fire: self.edges.contains(&Action::Fire),
            confirm: self.edges.contains(&Action::Confirm),
            restart: self.edges.contains(&Action::Restart),
        };
        self.edges.clear();
        snapshot
    }
}
