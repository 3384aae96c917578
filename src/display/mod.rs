/// Terminal output layer: all crossterm drawing lives here.
///
/// The simulation draws into a `Canvas`; this module only copies that grid
/// to the terminal, centered when the window is larger than the play area.
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::config::{GAME_HEIGHT, GAME_WIDTH, MIN_TERMINAL_HEIGHT, MIN_TERMINAL_WIDTH};
use crate::error::GameError;
use crate::render::Canvas;

/// Refuse terminals smaller than the play area.
pub fn check_size(width: u16, height: u16) -> Result<(), GameError> {
    if width < MIN_TERMINAL_WIDTH || height < MIN_TERMINAL_HEIGHT {
        return Err(GameError::TerminalTooSmall {
            need_w: MIN_TERMINAL_WIDTH,
            need_h: MIN_TERMINAL_HEIGHT,
            got_w: width,
            got_h: height,
        });
    }
    Ok(())
}

/// Top-left corner of the play area inside a `width` x `height` terminal.
pub fn origin(width: u16, height: u16) -> (u16, u16) {
    (
        width.saturating_sub(GAME_WIDTH as u16) / 2,
        height.saturating_sub(GAME_HEIGHT as u16) / 2,
    )
}

pub fn clear<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.flush()
}

/// Render one complete frame. Runs of equally coloured cells are written
/// with a single colour change.
pub fn present<W: Write>(out: &mut W, canvas: &Canvas, at: (u16, u16)) -> std::io::Result<()> {
    let (ox, oy) = at;
    let mut run = String::new();

    for y in 0..GAME_HEIGHT {
        out.queue(cursor::MoveTo(ox, oy + y as u16))?;
        let mut run_color: Option<Color> = None;
        for cell in canvas.row(y) {
            if run_color != Some(cell.color) {
                flush_run(out, &mut run, run_color)?;
                run_color = Some(cell.color);
            }
            run.push(cell.ch);
        }
        flush_run(out, &mut run, run_color)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(ox, oy + GAME_HEIGHT as u16 - 1))?;
    out.flush()
}

fn flush_run<W: Write>(out: &mut W, run: &mut String, color: Option<Color>) -> std::io::Result<()> {
    if run.is_empty() {
        return Ok(());
    }
    if let Some(color) = color {
        out.queue(style::SetForegroundColor(color))?;
    }
    out.queue(Print(run.as_str()))?;
    run.clear();
    Ok(())
}
