//! Particle field renderer.
//!
//! Particles are binned into terminal cells; the glyph shows how many share
//! a cell and the colour comes from the last particle binned there.

use std::collections::HashMap;
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use glam::Vec2;

use galaxia::particles::{Mode, ParticleField};

use super::Viewport;

/// Snow, blanched almond, seashell, cornsilk, ivory, linen.
const METALS: [(u8, u8, u8); 6] = [
    (255, 250, 250),
    (255, 235, 205),
    (255, 245, 238),
    (255, 248, 220),
    (255, 255, 240),
    (250, 240, 230),
];

struct Cell {
    count: usize,
    shade: u8,
    /// Only wild particles landed here; holds the brightest opacity.
    wild: Option<f32>,
}

fn metal(shade: u8, opacity: f32) -> Color {
    let (r, g, b) = METALS[usize::from(shade) % METALS.len()];
    let scale = |c: u8| (f32::from(c) * opacity.clamp(0.0, 1.0)) as u8;
    Color::Rgb {
        r: scale(r),
        g: scale(g),
        b: scale(b),
    }
}

fn density_glyph(count: usize) -> char {
    match count {
        0 | 1 => '.',
        2 | 3 => ':',
        4..=7 => '*',
        _ => '#',
    }
}

pub fn render<W: Write>(
    out: &mut W,
    field: &ParticleField,
    view: &Viewport,
    cursor_at: Option<Vec2>,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    super::draw_border(out, view)?;

    let mut cells: HashMap<(u16, u16), Cell> = HashMap::new();
    for p in field.particles().iter().filter(|p| p.alive) {
        let Some(at) = view.to_cell(p.pos) else {
            continue;
        };
        let wild = match p.mode {
            Mode::Wild { .. } => Some(p.opacity()),
            _ => None,
        };
        let cell = cells.entry(at).or_insert(Cell {
            count: 0,
            shade: p.shade,
            wild,
        });
        cell.count += 1;
        cell.shade = p.shade;
        cell.wild = match (cell.wild, wild) {
            (Some(a), Some(b)) => Some(a.max(b)),
            _ => None,
        };
    }

    for ((col, row), cell) in &cells {
        let (glyph, color) = match cell.wild {
            Some(opacity) => ('+', metal(cell.shade, opacity)),
            None => (density_glyph(cell.count), metal(cell.shade, 1.0)),
        };
        out.queue(cursor::MoveTo(*col, *row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }

    if let Some((col, row)) = cursor_at.and_then(|c| view.to_cell(c)) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(Color::Cyan))?;
        out.queue(Print('⊕'))?;
    }

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print(format!(
        "{} particles   move the mouse to stir   Q : Quit",
        field.particles().len()
    )))?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}
