/// Terminal backend for the drawing boundary. All terminal output lives here.
///
/// The 800×600 playfield (origin bottom-left) is scaled onto whatever
/// character grid the terminal offers, inside a border.  No game logic is
/// performed; this module only turns draw calls into crossterm commands.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use space_shooter::audio::AudioSink;
use space_shooter::config::RulesConfig;
use space_shooter::entities::{Rect, SoundId};
use space_shooter::render::{Canvas, Sprite};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_TEXT: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_BULLET: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

pub struct TerminalCanvas<'a, W: Write> {
    out: &'a mut W,
    cols: u16,
    rows: u16,
    field_w: f32,
    field_h: f32,
}

impl<'a, W: Write> TerminalCanvas<'a, W> {
    pub fn new(out: &'a mut W, (cols, rows): (u16, u16), rules: &RulesConfig) -> Self {
        Self {
            out,
            cols,
            rows,
            field_w: rules.playfield_width,
            field_h: rules.playfield_height,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    fn inner_cols(&self) -> f32 {
        self.cols.saturating_sub(2).max(1) as f32
    }

    /// Rows between the top border (row 0) and the bottom border.
    fn inner_rows(&self) -> f32 {
        self.rows.saturating_sub(3).max(1) as f32
    }

    fn to_col(&self, x: f32) -> u16 {
        let inner = self.inner_cols();
        (1.0 + (x / self.field_w * inner).floor()).clamp(1.0, inner) as u16
    }

    fn to_row(&self, y: f32) -> u16 {
        let inner = self.inner_rows();
        (1.0 + ((self.field_h - y) / self.field_h * inner).floor()).clamp(1.0, inner) as u16
    }

    fn draw_border(&mut self) -> io::Result<()> {
        let w = self.cols as usize;
        let bottom = self.rows.saturating_sub(2);

        self.out.queue(style::SetForegroundColor(C_BORDER))?;

        self.out.queue(cursor::MoveTo(0, 0))?;
        self.out
            .queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

        self.out.queue(cursor::MoveTo(0, bottom))?;
        self.out
            .queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

        for row in 1..bottom {
            self.out.queue(cursor::MoveTo(0, row))?;
            self.out.queue(Print("│"))?;
            self.out.queue(cursor::MoveTo(self.cols.saturating_sub(1), row))?;
            self.out.queue(Print("│"))?;
        }

        // Controls hint on the last row
        self.out.queue(cursor::MoveTo(1, self.rows.saturating_sub(1)))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out.queue(Print(
            "← → / A D : Move   SPACE : Shoot   ENTER : Start   R : Restart   Q : Quit",
        ))?;
        Ok(())
    }
}

impl<W: Write> Canvas for TerminalCanvas<'_, W> {
    type Error = io::Error;

    fn clear(&mut self) -> io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.draw_border()
    }

    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) -> io::Result<()> {
        if rect.top() < 0.0 || rect.y > self.field_h {
            return Ok(());
        }
        let (glyph, color) = match sprite {
            Sprite::Player => ("█", C_PLAYER),
            Sprite::Bullet => ("║", C_BULLET),
            Sprite::Enemy => ("▼", C_ENEMY),
        };

        let left = self.to_col(rect.x);
        let right = self.to_col(rect.x + rect.width - 0.5).max(left);
        let top = self.to_row(rect.top() - 0.5);
        let bottom = self.to_row(rect.y).max(top);
        let run = glyph.repeat((right - left + 1) as usize);

        self.out.queue(style::SetForegroundColor(color))?;
        for row in top..=bottom {
            self.out.queue(cursor::MoveTo(left, row))?;
            self.out.queue(Print(&run))?;
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32) -> io::Result<()> {
        let col = self.to_col(x);
        let room = self.cols.saturating_sub(col + 1) as usize;
        let clipped: String = text.chars().take(room).collect();
        self.out.queue(cursor::MoveTo(col, self.to_row(y)))?;
        self.out.queue(style::SetForegroundColor(C_TEXT))?;
        self.out.queue(Print(clipped))?;
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}

// ── Audio ─────────────────────────────────────────────────────────────────────

/// Rings the terminal bell for sound effects.  A terminal has a single cue,
/// so shots and explosions share it; `quiet_shots` keeps the bell for
/// explosions only.
pub struct TerminalBell<W: Write = io::Stderr> {
    out: W,
    quiet_shots: bool,
}

impl TerminalBell {
    pub fn new(quiet_shots: bool) -> Self {
        Self::with_writer(io::stderr(), quiet_shots)
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn with_writer(out: W, quiet_shots: bool) -> Self {
        Self { out, quiet_shots }
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play_sound(&mut self, sound: SoundId) {
        if sound == SoundId::Shoot && self.quiet_shots {
            return;
        }
        let _ = self.out.write_all(b"\x07");
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(out: &mut Vec<u8>) -> TerminalCanvas<'_, Vec<u8>> {
        TerminalCanvas::new(out, (82, 25), &RulesConfig::default())
    }

    #[test]
    fn playfield_corners_map_inside_border() {
        let mut buf = Vec::new();
        let c = canvas(&mut buf);
        assert_eq!(c.to_col(0.0), 1);
        assert_eq!(c.to_col(800.0), 80);
        assert_eq!(c.to_row(600.0), 1);
        assert_eq!(c.to_row(0.0), 22);
    }

    #[test]
    fn offscreen_sprite_draws_nothing() {
        let mut buf = Vec::new();
        let mut c = canvas(&mut buf);
        c.draw_sprite(Sprite::Enemy, Rect::new(10.0, -100.0, 64.0, 64.0))
            .unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn bell_rings_for_shots_and_explosions() {
        let mut bell = TerminalBell::with_writer(Vec::new(), false);
        bell.play_sound(SoundId::Shoot);
        bell.play_sound(SoundId::Explosion);
        assert_eq!(bell.out, b"\x07\x07");
    }

    #[test]
    fn quiet_shots_only_rings_for_explosions() {
        let mut bell = TerminalBell::with_writer(Vec::new(), true);
        bell.play_sound(SoundId::Shoot);
        assert!(bell.out.is_empty());
        bell.play_sound(SoundId::Explosion);
        assert_eq!(bell.out, b"\x07");
    }

    #[test]
    fn text_is_clipped_to_terminal_width() {
        let mut buf = Vec::new();
        let mut c = TerminalCanvas::new(&mut buf, (10, 10), &RulesConfig::default());
        c.draw_text("SPACE SHOOTER", 400.0, 300.0).unwrap();
        let written = String::from_utf8_lossy(&buf);
        assert!(!written.contains("SPACE SHOOTER"));
    }
}
