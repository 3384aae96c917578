//! Game constants and command-line configuration.
//!
//! Everything the simulation needs is a compile-time constant; only paths,
//! pacing and the RNG seed come from the command line.

use std::path::PathBuf;

use clap::Parser;

// ── Display ──────────────────────────────────────────────────────────────────

pub const MIN_TERMINAL_WIDTH: u16 = 80;
pub const MIN_TERMINAL_HEIGHT: u16 = 24;
pub const DEFAULT_FPS: u32 = 60;

// ── Play area ────────────────────────────────────────────────────────────────

pub const GAME_WIDTH: i32 = 80;
pub const GAME_HEIGHT: i32 = 24;
/// Rows 0..3 hold the HUD.
pub const PLAY_AREA_TOP: i32 = 3;
pub const PLAY_AREA_BOTTOM: i32 = GAME_HEIGHT - 1;

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER_START_X: f32 = (GAME_WIDTH / 2) as f32;
pub const PLAYER_START_Y: i32 = PLAY_AREA_BOTTOM - 2;
/// Cells per second.
pub const PLAYER_SPEED: f32 = 90.0;
pub const PLAYER_LIVES: u32 = 3;
/// Seconds between shots.
pub const PLAYER_SHOOT_COOLDOWN: f32 = 0.3;

// ── Bullets ──────────────────────────────────────────────────────────────────

pub const BULLET_SPEED: f32 = 40.0;

// ── Formation ────────────────────────────────────────────────────────────────

pub const ALIEN_COLS: usize = 11;
pub const ALIEN_ROWS: usize = 5;
pub const MAX_ALIEN_ROWS: usize = 7;
pub const ALIEN_SPACING_X: i32 = 5;
pub const ALIEN_SPACING_Y: i32 = 2;
pub const ALIEN_START_X: i32 = 5;
pub const ALIEN_START_Y: i32 = PLAY_AREA_TOP + 2;
pub const ALIEN_BASE_SPEED: f32 = 5.0;
pub const ALIEN_SPEED_INCREMENT: f32 = 1.5;
pub const ALIEN_DESCENT: i32 = 1;
pub const ALIEN_BASE_SHOOT_INTERVAL: f32 = 2.5;
pub const ALIEN_SHOOT_INTERVAL_DECREMENT: f32 = 0.15;
pub const MIN_SHOOT_INTERVAL: f32 = 0.5;
/// Seconds between animation frame flips.
pub const ALIEN_ANIMATION_PERIOD: f32 = 0.5;

// ── Scoring ──────────────────────────────────────────────────────────────────

pub const SCORE_ALIEN_TOP: u32 = 30;
pub const SCORE_ALIEN_MID: u32 = 20;
pub const SCORE_ALIEN_BOT: u32 = 10;

// ── Shields ──────────────────────────────────────────────────────────────────

pub const SHIELD_COUNT: usize = 4;
pub const SHIELD_Y: i32 = PLAYER_START_Y - 5;
pub const SHIELD_WIDTH: i32 = 8;
pub const SHIELD_HEIGHT: i32 = 3;
pub const SHIELD_HEALTH: i32 = 10;

// ── Mystery ship ─────────────────────────────────────────────────────────────

pub const MYSTERY_SHIP_SPEED: f32 = 15.0;
pub const MYSTERY_SHIP_INTERVAL: f32 = 25.0;
/// How far past either edge the ship travels before despawning.
pub const MYSTERY_SHIP_EXIT_MARGIN: f32 = 5.0;
pub const MYSTERY_BONUS: u32 = 300;
pub const MYSTERY_BONUS_FIRST_SHOT: u32 = 23;
pub const MYSTERY_BONUS_PERIOD: u32 = 15;
pub const MYSTERY_SMALL_SCORES: [u32; 3] = [50, 100, 150];

// ── Modifiers ────────────────────────────────────────────────────────────────

/// Bullet hell adds an extra alien shot attempt every this many frames.
pub const BULLET_HELL_FRAME_PERIOD: u64 = 10;
pub const CHAOS_ALIEN_RANGE: (f32, f32) = (0.5, 2.0);
pub const CHAOS_BULLET_RANGE: (f32, f32) = (0.8, 1.5);

// ── Screens ──────────────────────────────────────────────────────────────────

pub const GAME_OVER_WAIT: f32 = 2.0;
pub const HIGH_SCORE_NAME_LEN: usize = 3;

// ── Persistence ──────────────────────────────────────────────────────────────

pub const MAX_HIGH_SCORES: usize = 10;
pub const HIGH_SCORE_FILE: &str = "scores.json";
pub const SETTINGS_FILE: &str = "settings.json";
pub const LOG_FILE: &str = "tty_invaders.log";

// ── Command line ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Parser)]
#[command(name = "tty_invaders", about = "Space invaders in your terminal")]
pub struct Config {
    /// Directory holding scores.json, settings.json and the log file.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Target frames per second.
    #[arg(long, default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// Seed for the simulation RNG (random when omitted).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start with sound muted.
    #[arg(long)]
    pub mute: bool,

    /// Log file path (defaults to <data-dir>/tty_invaders.log).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    pub fn high_score_path(&self) -> PathBuf {
        self.data_dir().join(HIGH_SCORE_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir().join(SETTINGS_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.data_dir().join(LOG_FILE))
    }
}

fn default_data_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".tty_invaders")
}
