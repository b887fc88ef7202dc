//! Rendering layer: all terminal I/O lives here.
//!
//! Each frame is redrawn from scratch from an immutable view of the
//! session.  No game logic is performed; this module only translates state
//! into terminal commands.  An entity that is no longer in its collection
//! is simply not drawn.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::config::GameConfig;
use crate::entities::{GameStatus, Sprite};
use crate::session::Session;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_BACKGROUND: Color = Color::DarkGrey;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LEVEL: Color = Color::Green;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_BARRIER: Color = Color::DarkYellow;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

// ── Fallback shapes for entities without frames ──────────────────────────────

const F_PLAYER: &str = "▲";
const F_ENEMY: &str = "W";
const F_BULLET_PLAYER: &str = "║";
const F_BULLET_ENEMY: &str = "↓";
const F_BARRIER: &str = "███";

/// Anything that can show a session.
pub trait Renderer {
    fn present(&mut self, session: &Session) -> std::io::Result<()>;
}

/// Full-screen crossterm renderer.
///
/// Layout: row 0 HUD, row 1 top border, row `height-2` bottom border, row
/// `height-1` controls hint.  The world is scaled to fit between the
/// borders.
pub struct Terminal<W: Write> {
    out: W,
    width: u16,
    height: u16,
}

impl<W: Write> Terminal<W> {
    pub fn new(out: W, width: u16, height: u16) -> Self {
        Self { out, width, height }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for Terminal<W> {
    fn present(&mut self, session: &Session) -> std::io::Result<()> {
        let view = View {
            width: self.width,
            height: self.height,
            config: session.config(),
        };
        render(&mut self.out, &view, session)
    }
}

/// Terminal geometry plus the world it maps.
struct View<'a> {
    width: u16,
    height: u16,
    config: &'a GameConfig,
}

impl View<'_> {
    /// Map a world position to a terminal cell inside the border, or `None`
    /// if it falls outside the play-field.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let cols = self.width.saturating_sub(2) as f32;
        let rows = self.height.saturating_sub(4) as f32;
        let fx = (x + self.config.half_width()) / self.config.screen_width;
        let fy = (self.config.half_height() - y) / self.config.screen_height;
        if !(0.0..1.0).contains(&fx) || !(0.0..1.0).contains(&fy) {
            return None;
        }
        Some((1 + (fx * cols) as u16, 2 + (fy * rows) as u16))
    }

    /// First column of a glyph centred on `col`, kept inside the side walls.
    fn centred(&self, col: u16, glyph: &str) -> u16 {
        let len = glyph.chars().count() as u16;
        let max = self.width.saturating_sub(1 + len).max(1);
        col.saturating_sub(len / 2).clamp(1, max)
    }
}

// ── Frame ─────────────────────────────────────────────────────────────────────

/// Render one complete frame.
fn render<W: Write>(out: &mut W, view: &View<'_>, session: &Session) -> std::io::Result<()> {
    let state = session.state();
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_background(out, view, state.background.shape())?;
    draw_border(out, view)?;
    draw_hud(out, view, session)?;

    for barrier in &state.barriers {
        draw_sprite(out, view, &barrier.sprite, F_BARRIER, C_BARRIER)?;
    }
    for enemy in &state.enemies {
        draw_sprite(out, view, &enemy.sprite, F_ENEMY, C_ENEMY)?;
    }
    for bullet in &state.player_projectiles {
        draw_sprite(out, view, &bullet.sprite, F_BULLET_PLAYER, C_BULLET_PLAYER)?;
    }
    for bullet in &state.enemy_projectiles {
        draw_sprite(out, view, &bullet.sprite, F_BULLET_ENEMY, C_BULLET_ENEMY)?;
    }
    draw_sprite(out, view, &state.player.sprite, F_PLAYER, C_PLAYER)?;
    draw_controls_hint(out, view)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, view, session)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Background ────────────────────────────────────────────────────────────────

/// Tile the current background frame across the play area, shifted per row.
fn draw_background<W: Write>(
    out: &mut W,
    view: &View<'_>,
    pattern: Option<&str>,
) -> std::io::Result<()> {
    let Some(pattern) = pattern else {
        return Ok(());
    };
    let len = pattern.chars().count();
    if len == 0 {
        return Ok(());
    }
    let cols = view.width.saturating_sub(2) as usize;

    out.queue(style::SetForegroundColor(C_BACKGROUND))?;
    for row in 2..view.height.saturating_sub(2) {
        let line: String = pattern
            .chars()
            .cycle()
            .skip((row as usize * 7) % len)
            .take(cols)
            .collect();
        out.queue(cursor::MoveTo(1, row))?;
        out.queue(Print(line))?;
    }
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &View<'_>) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: &View<'_>, session: &Session) -> std::io::Result<()> {
    // Score and high score, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(session.scoreboard().status_text()))?;

    // Level, right
    let level_str = format!("[ LEVEL {} ]", session.level());
    let lx = view
        .width
        .saturating_sub(level_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(level_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(
    out: &mut W,
    view: &View<'_>,
    sprite: &Sprite,
    fallback: &str,
    color: Color,
) -> std::io::Result<()> {
    let Some((col, row)) = view.cell(sprite.x, sprite.y) else {
        return Ok(());
    };
    let glyph = sprite.shape().unwrap_or(fallback);
    out.queue(cursor::MoveTo(view.centred(col, glyph), row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &View<'_>) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Fire   R : Restart   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, view: &View<'_>, session: &Session) -> std::io::Result<()> {
    let scoreboard = session.scoreboard();
    let new_best = scoreboard.score() > 0 && scoreboard.score() >= scoreboard.high_score();
    let score_line = format!("Final Score: {:>6}", scoreboard.score());
    let best_line = if new_best {
        format!("★ NEW BEST: {:>6} ★", scoreboard.best())
    } else {
        format!("Best Score:  {:>6}", scoreboard.best())
    };
    let best_color = if new_best { Color::Yellow } else { Color::DarkGrey };

    let lines: [(&str, Color); 6] = [
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
        (score_line.as_str(), Color::Yellow),
        (best_line.as_str(), best_color),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = view.width / 2;
    let start_row = (view.height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
