/// All game entity types: pure data plus a few geometry helpers.
///
/// Coordinates are playfield pixels with the origin at the bottom-left
/// corner and y growing upward.

use crate::config::RulesConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    GameOver,
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle anchored at its bottom-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Strict AABB test: touching edges do not count as an overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

// ── Player & projectiles ──────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub health: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
}

// ── Input & effects ───────────────────────────────────────────────────────────

/// One frame of input as seen by the simulator.
///
/// `left` / `right` are held flags, true every frame the key is down.
/// `fire`, `confirm` and `restart` are edges, true only on the frame the
/// key went from released to pressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub confirm: bool,
    pub restart: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundId {
    Shoot,
    Explosion,
}

/// A side effect requested by the simulator for the host to carry out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    PlaySound(SoundId),
    ScreenChanged(Screen),
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so the update functions can return a
/// new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameWorld {
    pub player: Player,
    /// Player shots, oldest first.
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub score: u32,
    /// Seconds accumulated toward the next enemy spawn.
    pub spawn_timer: f32,
    pub screen: Screen,
    /// Diagnostics counter: frames simulated while playing.  Only read by
    /// tracing; no rule depends on it.
    pub frame: u64,
    pub rules: RulesConfig,
}
