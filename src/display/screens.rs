//! Menu, hangar and game-over screens.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use galaxia::entities::Session;
use galaxia::flow::{SelectPurpose, ShipSelection};
use galaxia::pilot::ShipClass;

use super::Viewport;

fn centered<W: Write>(out: &mut W, cx: u16, row: u16, text: &str, color: Color) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(
        cx.saturating_sub(text.chars().count() as u16 / 2),
        row,
    ))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Main menu ─────────────────────────────────────────────────────────────────

pub fn draw_menu<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    centered(out, cx, cy.saturating_sub(6), "★  G A L A X I A  ★", Color::Cyan)?;

    let options: &[(&str, &str, Color)] = &[
        ("1", "Launch", Color::Green),
        ("2", "Hangar", Color::Yellow),
        ("3", "Quit", Color::Red),
    ];
    for (i, (key, label, color)) in options.iter().enumerate() {
        let row = cy.saturating_sub(3) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(8), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*label))?;
    }

    // Power-up legend
    out.queue(cursor::MoveTo(cx.saturating_sub(16), cy + 1))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("Power-ups (fly into falling items):"))?;

    let legend: &[(&str, Color, &str)] = &[
        ("S", Color::Blue, " Shield  — +50 shield"),
        ("»", Color::Green, " Speed   — faster ship"),
        ("W", Color::Yellow, " Weapon  — next laser tier"),
    ];
    for (i, (sym, color, desc)) in legend.iter().enumerate() {
        let row = cy + 2 + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(16), row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*sym))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(*desc))?;
    }

    centered(
        out,
        cx,
        cy + 6,
        "Arrows / WASD : Move   SPACE : Fire   B : Shield   N : Blast   Q : Quit",
        Color::DarkGrey,
    )?;

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── Hangar ────────────────────────────────────────────────────────────────────

pub fn draw_ship_select<W: Write>(
    out: &mut W,
    selection: &ShipSelection,
    purpose: SelectPurpose,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let top = (height / 2).saturating_sub(8);

    centered(out, cx, top, "SHIP SELECTION", Color::Cyan)?;

    for (i, class) in ShipClass::ALL.iter().enumerate() {
        let marked = i == selection.index;
        let label = if marked {
            format!("> {} <", class.name())
        } else {
            class.name().to_string()
        };
        let color = if marked { Color::Green } else { Color::White };
        centered(out, cx, top + 2 + i as u16, &label, color)?;
    }

    let u = &selection.upgrades;
    let lines = [
        format!("Upgrade points: {}", selection.points_left),
        format!("Speed: {}  [Q]", u.speed),
        format!("Shield: {}  [W]", u.shield),
        format!("Fire power: {}  [E]", u.fire_power),
    ];
    for (i, line) in lines.iter().enumerate() {
        let color = if i == 0 { Color::Yellow } else { Color::White };
        centered(out, cx, top + 6 + i as u16, line, color)?;
    }

    let confirm = match purpose {
        SelectPurpose::Launch => "SPACE : Launch   R : Reset points   ESC : Back",
        SelectPurpose::Browse => "SPACE : Save loadout   R : Reset points   ESC : Back",
    };
    centered(out, cx, top + 12, confirm, Color::DarkGrey)?;

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

pub fn draw_game_over<W: Write>(out: &mut W, state: &Session, view: &Viewport) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:.0}", state.score);
    let stage_line = format!("Stage {}   Resources {}", state.stage, state.resources);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (score_line.as_str(), Color::Yellow),
        (stage_line.as_str(), Color::White),
        ("Any key - Menu", Color::DarkGrey),
    ];

    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        centered(out, cx, start_row + i as u16, msg, *color)?;
    }

    Ok(())
}
