/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use invaders::entities::{
    BulletOwner, Entity, GameState, GameStatus, InvaderKind, FIELD_HEIGHT, FIELD_WIDTH,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::Yellow;
const C_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_INVADER_NORMAL: Color = Color::Green;
const C_INVADER_SHOOTING: Color = Color::Red;
const C_INVADER_FAST: Color = Color::Magenta;
const C_INVADER_SLOW: Color = Color::Cyan;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

/// The field is drawn one column to the right so the left border wall sits
/// in terminal column 0, matching the simulation's `[0, FIELD_WIDTH)` cells.
fn cell(x: i32, y: i32) -> cursor::MoveTo {
    cursor::MoveTo((x + 1) as u16, y as u16)
}

fn on_screen(x: i32, y: i32) -> bool {
    x >= 0 && x < FIELD_WIDTH && y >= 0 && y < FIELD_HEIGHT
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out)?;

    for entity in &state.entities {
        draw_entity(out, entity)?;
    }

    draw_player(out, state)?;
    draw_hud(out, state)?;
    draw_controls_hint(out)?;

    match state.status {
        GameStatus::GameOver => draw_outcome(out, "--- G A M E   O V E R ---", Color::Red)?,
        GameStatus::Victory => draw_outcome(out, "--- V I C T O R Y ---", Color::Green)?,
        GameStatus::Playing => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, FIELD_HEIGHT as u16 + 3))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Side walls flanking the field
    for row in 0..FIELD_HEIGHT as u16 {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(FIELD_WIDTH as u16 + 1, row))?;
        out.queue(Print("│"))?;
    }

    // Bottom bar
    out.queue(cursor::MoveTo(0, FIELD_HEIGHT as u16))?;
    out.queue(Print(format!("└{}┘", "─".repeat(FIELD_WIDTH as usize))))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let p = &state.player;
    if p.lives == 0 || !on_screen(p.x, p.y) {
        return Ok(());
    }
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(cell(p.x, p.y))?;
    out.queue(Print(p.symbol()))?;
    Ok(())
}

fn draw_entity<W: Write>(out: &mut W, entity: &Entity) -> std::io::Result<()> {
    // Entities may sit transiently outside the field (a bullet just fired
    // off the top, an invader on the bottom row awaiting collision); those
    // cells are simply not drawn.
    if !on_screen(entity.x(), entity.y()) {
        return Ok(());
    }

    let color = match entity {
        Entity::Bullet(b) => match b.owner {
            BulletOwner::Player => C_BULLET_PLAYER,
            BulletOwner::Enemy => C_BULLET_ENEMY,
        },
        Entity::Invader(i) => match i.kind {
            InvaderKind::Normal => C_INVADER_NORMAL,
            InvaderKind::Shooting => C_INVADER_SHOOTING,
            InvaderKind::Fast => C_INVADER_FAST,
            InvaderKind::Slow => C_INVADER_SLOW,
        },
    };

    out.queue(style::SetForegroundColor(color))?;
    out.queue(cell(entity.x(), entity.y()))?;
    out.queue(Print(entity.symbol()))?;
    Ok(())
}

// ── HUD (below the field) ─────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, FIELD_HEIGHT as u16 + 1))?;
    out.queue(style::SetForegroundColor(C_LIVES))?;
    out.queue(Print(format!(
        "Lives: {}/{}",
        state.player.lives, state.player.max_lives
    )))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        " | Score: {} | Entities: {}",
        state.player.score,
        state.entities.len()
    )))?;
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, FIELD_HEIGHT as u16 + 2))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── End-of-run overlay ────────────────────────────────────────────────────────

fn draw_outcome<W: Write>(out: &mut W, banner: &str, color: Color) -> std::io::Result<()> {
    let cx = (FIELD_WIDTH / 2 + 1) as u16;
    let cy = (FIELD_HEIGHT / 2) as u16;

    let col = cx.saturating_sub(banner.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, cy))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(banner))?;

    let hint = "R - Play Again   Q - Quit";
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, cy + 2))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
