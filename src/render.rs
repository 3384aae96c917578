//! The character-grid surface states draw into.
//!
//! States only ever write to a `Surface`; they never read it back. `Canvas`
//! is the in-memory grid the binary flushes to the terminal each frame.

use crossterm::style::Color;

use crate::config::{GAME_HEIGHT, GAME_WIDTH};

pub trait Surface {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    /// Write `text` starting at `(x, y)`; anything off the grid is clipped.
    fn put(&mut self, x: i32, y: i32, text: &str, color: Color);
    fn clear(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub color: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            ch: ' ',
            color: Color::Reset,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Canvas {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas::new(GAME_WIDTH, GAME_HEIGHT)
    }
}

impl Canvas {
    pub fn new(width: i32, height: i32) -> Self {
        Canvas {
            width,
            height,
            cells: vec![Cell::default(); (width.max(0) * height.max(0)) as usize],
        }
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    pub fn row(&self, y: i32) -> &[Cell] {
        match self.index(0, y) {
            Some(start) => &self.cells[start..start + self.width as usize],
            None => &[],
        }
    }

    /// The characters of row `y` as a string, for tests and debugging.
    pub fn row_text(&self, y: i32) -> String {
        self.row(y).iter().map(|c| c.ch).collect()
    }

    /// Whether `needle` appears anywhere on the grid.
    pub fn contains(&self, needle: &str) -> bool {
        (0..self.height).any(|y| self.row_text(y).contains(needle))
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }
}

impl Surface for Canvas {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn put(&mut self, x: i32, y: i32, text: &str, color: Color) {
        for (i, ch) in text.chars().enumerate() {
            if let Some(idx) = self.index(x + i as i32, y) {
                self.cells[idx] = Cell { ch, color };
            }
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }
}

// ── Drawing helpers ──────────────────────────────────────────────────────────

/// Column at which `text` is centered within the play area.
pub fn centered_x(text: &str) -> i32 {
    (GAME_WIDTH - text.chars().count() as i32) / 2
}

pub fn put_centered(surface: &mut dyn Surface, y: i32, text: &str, color: Color) {
    surface.put(centered_x(text), y, text, color);
}

pub fn put_lines(surface: &mut dyn Surface, x: i32, y: i32, lines: &[&str], color: Color) {
    for (i, line) in lines.iter().enumerate() {
        surface.put(x, y + i as i32, line, color);
    }
}

/// Double-line frame around the whole play area.
pub fn draw_frame(surface: &mut dyn Surface, color: Color) {
    let w = GAME_WIDTH as usize;
    let h = surface.height().min(GAME_HEIGHT);
    surface.put(0, 0, &format!("╔{}╗", "═".repeat(w - 2)), color);
    for y in 1..h - 1 {
        surface.put(0, y, "║", color);
        surface.put(GAME_WIDTH - 1, y, "║", color);
    }
    surface.put(0, h - 1, &format!("╚{}╝", "═".repeat(w - 2)), color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_clips_at_edges() {
        let mut c = Canvas::new(4, 2);
        c.put(-1, 0, "abcdef", Color::White);
        assert_eq!(c.row_text(0), "bcde");
        c.put(0, 5, "zz", Color::White);
        assert_eq!(c.row_text(1), "    ");
    }

    #[test]
    fn clear_resets_every_cell() {
        let mut c = Canvas::new(3, 1);
        c.put(0, 0, "xyz", Color::Red);
        c.clear();
        assert_eq!(c.cell(1, 0), Some(Cell::default()));
    }
}
