/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameWorld` (plus, where needed, the frame delta or an RNG handle) and
/// returns a brand-new `GameWorld`.  Side effects are limited to the injected
/// RNG; sounds and screen changes come back as `Effect` values.

use rand::Rng;
use tracing::{debug, info, trace};

use crate::config::RulesConfig;
use crate::entities::{
    Bullet, Effect, Enemy, GameWorld, InputSnapshot, Player, Rect, Screen, SoundId,
};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial world: full health, empty playfield, on the menu.
pub fn init_state(rules: RulesConfig) -> GameWorld {
    let (x, y) = rules.player_start();
    GameWorld {
        player: Player {
            rect: Rect::new(x, y, rules.player_width, rules.player_height),
            health: rules.max_health,
        },
        bullets: Vec::new(),
        enemies: Vec::new(),
        score: 0,
        spawn_timer: 0.0,
        screen: Screen::Menu,
        frame: 0,
        rules,
    }
}

/// Fresh round after a game over: everything back to its starting value and
/// straight into play.
pub fn reset(state: &GameWorld) -> GameWorld {
    GameWorld {
        screen: Screen::Playing,
        ..init_state(state.rules)
    }
}

// ── Input-driven transitions (pure) ──────────────────────────────────────────

/// Apply held left/right input for `dt` seconds.  Both directions are applied
/// in turn, so holding both cancels out.  The result is clamped to the
/// playfield rather than rejected.
pub fn move_player(state: &GameWorld, dt: f32, left: bool, right: bool) -> GameWorld {
    let rules = &state.rules;
    let mut x = state.player.rect.x;
    if left {
        x -= rules.player_speed * dt;
    }
    if right {
        x += rules.player_speed * dt;
    }
    let x = x.clamp(0.0, rules.max_player_x());

    GameWorld {
        player: Player {
            rect: Rect { x, ..state.player.rect },
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// Fire one bullet, centred on the ship and sitting on its nose.
pub fn player_shoot(state: &GameWorld) -> GameWorld {
    let rules = &state.rules;
    let ship = &state.player.rect;
    let bullet = Bullet {
        rect: Rect::new(
            ship.center_x() - rules.bullet_width / 2.0,
            ship.top(),
            rules.bullet_width,
            rules.bullet_height,
        ),
    };
    let mut bullets = state.bullets.clone();
    bullets.push(bullet);
    GameWorld {
        bullets,
        ..state.clone()
    }
}

// ── Per-frame steps ──────────────────────────────────────────────────────────

/// Move every bullet up and drop the ones past the top edge.
pub fn advance_bullets(state: &GameWorld, dt: f32) -> GameWorld {
    let rules = &state.rules;
    let bullets = state
        .bullets
        .iter()
        .map(|b| Bullet {
            rect: Rect {
                y: b.rect.y + rules.bullet_speed * dt,
                ..b.rect
            },
        })
        .filter(|b| b.rect.y <= rules.playfield_height)
        .collect();
    GameWorld {
        bullets,
        ..state.clone()
    }
}

/// Accumulate `dt` on the spawn timer and create at most one enemy once it
/// passes the spawn interval.  Overshoot is discarded.
pub fn spawn_enemies(state: &GameWorld, dt: f32, rng: &mut impl Rng) -> GameWorld {
    let rules = &state.rules;
    let timer = state.spawn_timer + dt;
    if timer <= rules.spawn_interval {
        return GameWorld {
            spawn_timer: timer,
            ..state.clone()
        };
    }

    let x = rng.gen_range(0.0..=rules.max_enemy_x());
    debug!(x, "enemy spawned");
    let mut enemies = state.enemies.clone();
    enemies.push(Enemy {
        rect: Rect::new(x, rules.playfield_height, rules.enemy_width, rules.enemy_height),
    });
    GameWorld {
        enemies,
        spawn_timer: 0.0,
        ..state.clone()
    }
}

/// Move every enemy down and drop the ones fully below the bottom edge.
pub fn advance_enemies(state: &GameWorld, dt: f32) -> GameWorld {
    let speed = state.rules.enemy_speed;
    let enemies = state
        .enemies
        .iter()
        .map(|e| Enemy {
            rect: Rect {
                y: e.rect.y - speed * dt,
                ..e.rect
            },
        })
        .filter(|e| e.rect.top() >= 0.0)
        .collect();
    GameWorld {
        enemies,
        ..state.clone()
    }
}

/// Every enemy touching the ship is destroyed and costs one health point.
/// Reaching zero health ends the game, but the remaining enemies are still
/// checked in the same frame.
pub fn resolve_player_hits(state: &GameWorld) -> (GameWorld, Vec<Effect>) {
    let mut enemies = state.enemies.clone();
    let mut health = state.player.health;
    let mut screen = state.screen;
    let mut effects = Vec::new();

    for i in (0..enemies.len()).rev() {
        if !enemies[i].rect.overlaps(&state.player.rect) {
            continue;
        }
        enemies.remove(i);
        health = health.saturating_sub(1);
        debug!(health, "player hit");
        if health == 0 && screen != Screen::GameOver {
            screen = Screen::GameOver;
            effects.push(Effect::ScreenChanged(Screen::GameOver));
            info!(score = state.score, "game over");
        }
    }

    let next = GameWorld {
        player: Player {
            health,
            ..state.player.clone()
        },
        enemies,
        screen,
        ..state.clone()
    };
    (next, effects)
}

/// Each bullet destroys at most one enemy: the first overlapping one found
/// scanning enemies from the back.
pub fn resolve_bullet_hits(state: &GameWorld) -> (GameWorld, Vec<Effect>) {
    let mut bullets = state.bullets.clone();
    let mut enemies = state.enemies.clone();
    let mut score = state.score;
    let mut effects = Vec::new();

    for bi in (0..bullets.len()).rev() {
        let hit = (0..enemies.len())
            .rev()
            .find(|&ei| bullets[bi].rect.overlaps(&enemies[ei].rect));
        if let Some(ei) = hit {
            bullets.remove(bi);
            enemies.remove(ei);
            score += state.rules.score_per_kill;
            effects.push(Effect::PlaySound(SoundId::Explosion));
            debug!(score, "enemy destroyed");
        }
    }

    let next = GameWorld {
        bullets,
        enemies,
        score,
        ..state.clone()
    };
    (next, effects)
}

// ── Per-frame update ─────────────────────────────────────────────────────────

/// Advance the game by one frame of `dt` seconds.
///
/// Screen transitions are handled first; a frame that leaves the menu or
/// restarts after a game over does nothing else.  All randomness comes
/// through `rng` so callers control determinism.
pub fn update(
    state: &GameWorld,
    dt: f32,
    input: &InputSnapshot,
    rng: &mut impl Rng,
) -> (GameWorld, Vec<Effect>) {
    match state.screen {
        Screen::Menu => {
            if input.confirm {
                info!("leaving menu");
                let next = GameWorld {
                    screen: Screen::Playing,
                    ..state.clone()
                };
                (next, vec![Effect::ScreenChanged(Screen::Playing)])
            } else {
                (state.clone(), Vec::new())
            }
        }
        Screen::GameOver => {
            if input.restart {
                info!(final_score = state.score, "restarting");
                (reset(state), vec![Effect::ScreenChanged(Screen::Playing)])
            } else {
                (state.clone(), Vec::new())
            }
        }
        Screen::Playing => play_frame(state, dt, input, rng),
    }
}

fn play_frame(
    state: &GameWorld,
    dt: f32,
    input: &InputSnapshot,
    rng: &mut impl Rng,
) -> (GameWorld, Vec<Effect>) {
    let mut effects = Vec::new();

    // ── 1. Movement ───────────────────────────────────────────────────────────
    let mut next = move_player(state, dt, input.left, input.right);

    // ── 2. Firing ─────────────────────────────────────────────────────────────
    if input.fire {
        next = player_shoot(&next);
        effects.push(Effect::PlaySound(SoundId::Shoot));
    }

    // ── 3–5. Advance bullets, spawn and advance enemies ───────────────────────
    next = advance_bullets(&next, dt);
    next = spawn_enemies(&next, dt, rng);
    next = advance_enemies(&next, dt);

    // ── 6. Player ↔ enemy ─────────────────────────────────────────────────────
    let (after_hits, hit_effects) = resolve_player_hits(&next);
    effects.extend(hit_effects);

    // ── 7. Bullet ↔ enemy ─────────────────────────────────────────────────────
    let (after_kills, kill_effects) = resolve_bullet_hits(&after_hits);
    effects.extend(kill_effects);

    let next = GameWorld {
        frame: state.frame + 1,
        ..after_kills
    };
    trace!(
        frame = next.frame,
        bullets = next.bullets.len(),
        enemies = next.enemies.len(),
        "frame simulated"
    );
    (next, effects)
}
