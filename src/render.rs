/// Drawing boundary.
///
/// `render` translates a `GameWorld` into sprite and text draw calls in
/// playfield coordinates (origin bottom-left).  No game logic happens here;
/// a backend only has to implement `Canvas`.

use crate::entities::{GameWorld, Rect, Screen};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Player,
    Bullet,
    Enemy,
}

pub trait Canvas {
    type Error;

    fn clear(&mut self) -> Result<(), Self::Error>;
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) -> Result<(), Self::Error>;
    /// `(x, y)` is the text baseline origin in playfield coordinates.
    fn draw_text(&mut self, text: &str, x: f32, y: f32) -> Result<(), Self::Error>;
    fn present(&mut self) -> Result<(), Self::Error>;
}

// ── Text layout ───────────────────────────────────────────────────────────────

pub const TITLE_POS: (f32, f32) = (260.0, 350.0);
pub const START_HINT_POS: (f32, f32) = (230.0, 300.0);
pub const GAME_OVER_POS: (f32, f32) = (300.0, 350.0);
pub const FINAL_SCORE_POS: (f32, f32) = (260.0, 300.0);
pub const RESTART_HINT_POS: (f32, f32) = (240.0, 250.0);
pub const SCORE_POS: (f32, f32) = (20.0, 580.0);
pub const HEALTH_POS: (f32, f32) = (20.0, 550.0);

/// Render one complete frame.
pub fn render<C: Canvas>(state: &GameWorld, canvas: &mut C) -> Result<(), C::Error> {
    canvas.clear()?;
    match state.screen {
        Screen::Menu => draw_menu(canvas)?,
        Screen::Playing => draw_playfield(state, canvas)?,
        Screen::GameOver => draw_game_over(state, canvas)?,
    }
    canvas.present()
}

fn draw_menu<C: Canvas>(canvas: &mut C) -> Result<(), C::Error> {
    text_at(canvas, "SPACE SHOOTER", TITLE_POS)?;
    text_at(canvas, "Press ENTER to Start", START_HINT_POS)
}

fn draw_game_over<C: Canvas>(state: &GameWorld, canvas: &mut C) -> Result<(), C::Error> {
    text_at(canvas, "GAME OVER", GAME_OVER_POS)?;
    text_at(canvas, &format!("Final Score: {}", state.score), FINAL_SCORE_POS)?;
    text_at(canvas, "Press R to Restart", RESTART_HINT_POS)
}

fn draw_playfield<C: Canvas>(state: &GameWorld, canvas: &mut C) -> Result<(), C::Error> {
    canvas.draw_sprite(Sprite::Player, state.player.rect)?;
    for bullet in &state.bullets {
        canvas.draw_sprite(Sprite::Bullet, bullet.rect)?;
    }
    for enemy in &state.enemies {
        canvas.draw_sprite(Sprite::Enemy, enemy.rect)?;
    }
    text_at(canvas, &format!("Score: {}", state.score), SCORE_POS)?;
    text_at(canvas, &format!("Health: {}", state.player.health), HEALTH_POS)
}

fn text_at<C: Canvas>(canvas: &mut C, text: &str, (x, y): (f32, f32)) -> Result<(), C::Error> {
    canvas.draw_text(text, x, y)
}
