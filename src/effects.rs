//! Visual effects: explosion animations and the color modes.
//!
//! Color selection is a pure function of (mode, frame, entity id) so that
//! rendering never consumes simulation randomness.

use crossterm::style::Color;

use crate::sprites::EXPLOSION;

const EXPLOSION_FRAME_TIME: f32 = 0.1;

// ── Explosions ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Explosion {
    pub x: i32,
    pub y: i32,
    pub frame: usize,
    frame_time: f32,
    pub alive: bool,
}

impl Explosion {
    pub fn new(x: i32, y: i32) -> Self {
        Explosion {
            x,
            y,
            frame: 0,
            frame_time: 0.0,
            alive: true,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.frame_time += dt;
        if self.frame_time >= EXPLOSION_FRAME_TIME {
            self.frame_time = 0.0;
            self.frame += 1;
            if self.frame >= EXPLOSION.len() {
                self.alive = false;
            }
        }
    }

    pub fn sprite(&self) -> Option<&'static str> {
        EXPLOSION.get(self.frame).copied()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Effects {
    pub explosions: Vec<Explosion>,
}

impl Effects {
    pub fn add_explosion(&mut self, x: i32, y: i32) {
        self.explosions.push(Explosion::new(x, y));
    }

    pub fn update(&mut self, dt: f32) {
        for explosion in &mut self.explosions {
            explosion.update(dt);
        }
        self.explosions.retain(|e| e.alive);
    }

    pub fn clear(&mut self) {
        self.explosions.clear();
    }
}

// ── Color modes ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    #[default]
    Normal,
    Rainbow,
    Disco,
    Matrix,
    Psychedelic,
}

impl ColorMode {
    pub fn parse(name: &str) -> Self {
        match name {
            "rainbow" => ColorMode::Rainbow,
            "disco" => ColorMode::Disco,
            "matrix" => ColorMode::Matrix,
            "psychedelic" => ColorMode::Psychedelic,
            _ => ColorMode::Normal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Normal => "normal",
            ColorMode::Rainbow => "rainbow",
            ColorMode::Disco => "disco",
            ColorMode::Matrix => "matrix",
            ColorMode::Psychedelic => "psychedelic",
        }
    }
}

const DISCO: [Color; 12] = [
    Color::DarkRed,
    Color::DarkGreen,
    Color::DarkYellow,
    Color::DarkBlue,
    Color::DarkMagenta,
    Color::DarkCyan,
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
];

const RAINBOW: [Color; 12] = [
    Color::DarkRed,
    Color::Red,
    Color::DarkYellow,
    Color::Yellow,
    Color::DarkGreen,
    Color::Green,
    Color::DarkCyan,
    Color::Cyan,
    Color::DarkBlue,
    Color::Blue,
    Color::DarkMagenta,
    Color::Magenta,
];

const MATRIX: [Color; 2] = [Color::DarkGreen, Color::Green];

const PSYCHEDELIC: [Color; 6] = [
    Color::Magenta,
    Color::Cyan,
    Color::Yellow,
    Color::Red,
    Color::Blue,
    Color::Green,
];

// Stable ids so non-alien entities get their own slot in the cycling palettes.
pub const PLAYER_COLOR_ID: usize = 999;
pub const PLAYER_BULLET_COLOR_ID: usize = 1000;
pub const ALIEN_BULLET_COLOR_ID: usize = 2000;
pub const SHIELD_COLOR_ID: usize = 100;
pub const MYSTERY_COLOR_ID: usize = 500;

#[derive(Clone, Debug, Default)]
pub struct ColorEffects {
    pub mode: ColorMode,
    pub frame: u64,
}

impl ColorEffects {
    pub fn set_mode(&mut self, mode: ColorMode) {
        self.mode = mode;
    }

    /// Call once per simulation frame.
    pub fn update(&mut self) {
        self.frame += 1;
    }

    pub fn color(&self, original: Color, entity_id: usize) -> Color {
        let frame = self.frame as usize;
        match self.mode {
            ColorMode::Normal => original,
            ColorMode::Rainbow => RAINBOW[(frame / 3 + entity_id) % RAINBOW.len()],
            ColorMode::Disco => {
                if frame % 2 == 0 {
                    DISCO[scramble(frame, entity_id) % DISCO.len()]
                } else {
                    original
                }
            }
            ColorMode::Matrix => MATRIX[scramble(frame, entity_id) % MATRIX.len()],
            ColorMode::Psychedelic => {
                PSYCHEDELIC[(frame / 2 + entity_id * 3) % PSYCHEDELIC.len()]
            }
        }
    }

    pub fn ui_color(&self, original: Color) -> Color {
        match self.mode {
            ColorMode::Matrix => Color::Green,
            ColorMode::Psychedelic => self.color(original, 0),
            _ => original,
        }
    }
}

/// Cheap deterministic mix of frame and id for the flickering modes.
fn scramble(frame: usize, entity_id: usize) -> usize {
    let mut h = (frame as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ entity_id as u64;
    h ^= h >> 29;
    h = h.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    (h >> 32) as usize
}
