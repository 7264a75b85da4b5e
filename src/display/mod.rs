//! Terminal drawing for every screen of the binary.
//!
//! Positions are kept in world units by the library; [`Viewport`] scales
//! them onto whatever terminal size is current.  Nothing here mutates a
//! session.

pub mod particles;
pub mod screens;

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use glam::Vec2;

use galaxia::entities::{Entity, GameStatus, Kind, KindTag, LaserKind, PowerUpKind, Session};
use galaxia::pilot::ShipClass;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_SHIELD: Color = Color::Cyan;
const C_HUD_LOW_SHIELD: Color = Color::Red;
const C_STAR: Color = Color::DarkGrey;
const C_ASTEROID: Color = Color::Grey;
const C_HAZARD: Color = Color::DarkRed;
const C_BOSS: Color = Color::Red;
const C_BOSS_SHOT: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps world coordinates onto the terminal cells inside the border.
///
/// Row 0 is the HUD, rows 1 and `rows - 2` are the border bars, and the
/// last row carries the objective line.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub world: Vec2,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, world_width: f32, world_height: f32) -> Self {
        Self {
            cols,
            rows,
            world: Vec2::new(world_width, world_height),
        }
    }

    fn inner(&self) -> Vec2 {
        Vec2::new(
            f32::from(self.cols.saturating_sub(2)).max(1.0),
            f32::from(self.rows.saturating_sub(4)).max(1.0),
        )
    }

    /// Terminal cell holding world point `p`, if it is on screen.
    pub fn to_cell(&self, p: Vec2) -> Option<(u16, u16)> {
        if p.x < 0.0 || p.y < 0.0 || p.x >= self.world.x || p.y >= self.world.y {
            return None;
        }
        let cell = p / self.world * self.inner();
        Some((1 + cell.x as u16, 2 + cell.y as u16))
    }

    /// World point at the centre of a terminal cell.
    pub fn to_world(&self, col: u16, row: u16) -> Vec2 {
        let cell = Vec2::new(
            f32::from(col.saturating_sub(1)) + 0.5,
            f32::from(row.saturating_sub(2)) + 0.5,
        );
        cell / self.inner() * self.world
    }

    /// Cell rectangle (`col0..col1`, `row0..row1`) covered by a box,
    /// clipped to the playfield.  Boxes smaller than a cell still get one.
    fn span(&self, pos: Vec2, size: Vec2) -> Option<(u16, u16, u16, u16)> {
        let inner = self.inner();
        let lo = (pos / self.world * inner).max(Vec2::ZERO);
        let hi = ((pos + size) / self.world * inner).min(inner);
        if hi.x <= 0.0 || hi.y <= 0.0 || lo.x >= inner.x || lo.y >= inner.y {
            return None;
        }
        let (c0, r0) = (lo.x as u16, lo.y as u16);
        let c1 = (hi.x.ceil() as u16).max(c0 + 1);
        let r1 = (hi.y.ceil() as u16).max(r0 + 1);
        Some((1 + c0, 1 + c1, 2 + r0, 2 + r1))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &Session, view: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, state, view)?;

    // Back to front
    let layers = [
        KindTag::Hazard,
        KindTag::Star,
        KindTag::Asteroid,
        KindTag::PowerUp,
        KindTag::Hostile,
        KindTag::Boss,
        KindTag::BossShot,
        KindTag::Laser,
    ];
    for tag in layers {
        for handle in state.arena.handles(tag) {
            if let Some(entity) = state.arena.get(handle) {
                draw_entity(out, entity, view)?;
            }
        }
    }

    if let Some(ship) = state.player_entity() {
        draw_player(out, ship, state.pilot.class, view)?;
    }
    draw_objective(out, state, view)?;

    if state.status == GameStatus::GameOver {
        screens::draw_game_over(out, state, view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

pub fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

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
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &Session, view: &Viewport) -> std::io::Result<()> {
    // Score, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>7.0}", state.score)))?;
    if state.pilot.combo > 0 {
        out.queue(Print(format!("  x{:.1}", state.pilot.multiplier())))?;
    }

    // Stage, centre
    let stage_str = format!("[ STAGE {} ]", state.stage);
    let sx = (view.cols / 2).saturating_sub(stage_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(&stage_str))?;

    // Shield and resources, right
    let shield = state.pilot.shield.max(0.0);
    let right = format!(
        "Res: {}  Lv {}  Shield: {:>3.0}",
        state.resources, state.pilot.level, shield
    );
    let rx = view
        .cols
        .saturating_sub(right.chars().count() as u16 + 1);
    let color = if shield < 30.0 {
        C_HUD_LOW_SHIELD
    } else {
        C_HUD_SHIELD
    };
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(&right))?;

    Ok(())
}

// ── Objective and ability line (last row) ────────────────────────────────────

fn draw_objective<W: Write>(out: &mut W, state: &Session, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    let mission = match state.objectives.active() {
        Some(o) => format!("Mission: {} ({}/{})", o.description(), o.progress, o.target),
        None => "Mission: all done".to_string(),
    };
    let ticks_per_sec = state.config.tick_hz.max(1);
    let ability = |name: &str, cooldown: u32| {
        if cooldown == 0 {
            format!("{name} ready")
        } else {
            format!("{name} {}s", cooldown.div_ceil(ticks_per_sec))
        }
    };
    out.queue(Print(format!(
        "{mission}   [B] {}  [N] {}",
        ability("shield", state.pilot.shield_cooldown),
        ability("blast", state.pilot.blast_cooldown)
    )))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn fill<W: Write>(
    out: &mut W,
    view: &Viewport,
    entity: &Entity,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    let Some((c0, c1, r0, r1)) = view.span(entity.pos, entity.size) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(color))?;
    let line = glyph.repeat(usize::from(c1 - c0));
    for row in r0..r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

fn draw_entity<W: Write>(out: &mut W, entity: &Entity, view: &Viewport) -> std::io::Result<()> {
    match &entity.kind {
        Kind::Player => Ok(()),
        Kind::Star => fill(out, view, entity, "·", C_STAR),
        Kind::Hazard { .. } => fill(out, view, entity, "░", C_HAZARD),
        Kind::Asteroid { .. } => fill(out, view, entity, "o", C_ASTEROID),
        Kind::PowerUp(kind) => {
            let (glyph, color) = match kind {
                PowerUpKind::Shield => ("S", Color::Blue),
                PowerUpKind::Speed => ("»", Color::Green),
                PowerUpKind::Weapon => ("W", Color::Yellow),
            };
            fill(out, view, entity, glyph, color)
        }
        Kind::Hostile { stage, .. } => {
            let (glyph, color) = match stage {
                0 | 1 => ("●", Color::Red),
                2 => ("▲", Color::Yellow),
                _ => ("■", Color::Blue),
            };
            fill(out, view, entity, glyph, color)
        }
        Kind::Boss { health, .. } => {
            fill(out, view, entity, "█", C_BOSS)?;
            if let Some((c0, _, r0, _)) = view.span(entity.pos, entity.size) {
                out.queue(cursor::MoveTo(c0, r0.saturating_sub(1).max(2)))?;
                out.queue(style::SetForegroundColor(Color::Yellow))?;
                out.queue(Print(format!("BOSS {health}")))?;
            }
            Ok(())
        }
        Kind::BossShot => fill(out, view, entity, "↓", C_BOSS_SHOT),
        Kind::Laser { kind, .. } => {
            let color = match kind {
                LaserKind::Normal => Color::Green,
                LaserKind::Rapid => Color::Blue,
                LaserKind::Heavy => Color::Red,
            };
            fill(out, view, entity, "║", color)
        }
    }
}

fn draw_player<W: Write>(
    out: &mut W,
    ship: &Entity,
    class: ShipClass,
    view: &Viewport,
) -> std::io::Result<()> {
    // Sprite (2 rows, 3 cols):
    //   ▲       ← nose row
    //  /|\      ← wings + fuselage
    let color = match class {
        ShipClass::Standard => Color::White,
        ShipClass::Swift => Color::Green,
        ShipClass::Heavy => Color::Red,
    };
    let nose = Vec2::new(ship.center().x, ship.top());
    let Some((x, y)) = view.to_cell(nose) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(x, y))?;
    out.queue(Print("▲"))?;

    let wing_y = y + 1;
    if wing_y < view.rows.saturating_sub(2) {
        let left = x.saturating_sub(1).max(1);
        out.queue(cursor::MoveTo(left, wing_y))?;
        out.queue(Print("/|\\"))?;
    }
    Ok(())
}
