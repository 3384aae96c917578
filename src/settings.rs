//! Player-facing settings: a key/value map with typed defaults, game-mode
//! presets, and JSON persistence.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::effects::ColorMode;
use crate::storage::{read_json, write_json_atomic};

pub const SOUND_ENABLED: &str = "sound_enabled";
pub const PLAYER_SPEED_MULTIPLIER: &str = "player_speed_multiplier";
pub const ALIEN_SPEED_MULTIPLIER: &str = "alien_speed_multiplier";
pub const BULLET_SPEED_MULTIPLIER: &str = "bullet_speed_multiplier";
pub const COLOR_MODE: &str = "color_mode";
pub const SHOW_TRAILS: &str = "show_trails";
pub const RAPID_FIRE: &str = "rapid_fire";
pub const BULLET_HELL: &str = "bullet_hell";
pub const INVINCIBLE: &str = "invincible";
pub const CHAOS_MODE: &str = "chaos_mode";
pub const GAME_MODE: &str = "game_mode";

fn num(v: f64) -> Value {
    Value::from(v)
}

// ── Game modes ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameMode {
    #[default]
    Normal,
    SlowMo,
    Turbo,
    Insane,
    Zen,
    Nightmare,
    SuperDuperCrazy,
}

impl GameMode {
    pub const ALL: [GameMode; 7] = [
        GameMode::Normal,
        GameMode::SlowMo,
        GameMode::Turbo,
        GameMode::Insane,
        GameMode::Zen,
        GameMode::Nightmare,
        GameMode::SuperDuperCrazy,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        GameMode::ALL.into_iter().find(|m| m.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Normal => "normal",
            GameMode::SlowMo => "slow_mo",
            GameMode::Turbo => "turbo",
            GameMode::Insane => "insane",
            GameMode::Zen => "zen",
            GameMode::Nightmare => "nightmare",
            GameMode::SuperDuperCrazy => "superdupercrazy",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GameMode::Normal => "Normal",
            GameMode::SlowMo => "Slow-Mo (Bullet Time)",
            GameMode::Turbo => "Turbo (Speed Demon)",
            GameMode::Insane => "Insane (Total Chaos)",
            GameMode::Zen => "Zen (Chill Mode)",
            GameMode::Nightmare => "Nightmare (Ultra Hard)",
            GameMode::SuperDuperCrazy => "SUPERDUPERCRAZY",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            GameMode::Normal => "Classic Space Invaders experience",
            GameMode::SlowMo => "Time slows down, Matrix-style combat",
            GameMode::Turbo => "Everything is super fast and intense",
            GameMode::Insane => "CHAOS! Random speeds, rapid fire, maximum mayhem",
            GameMode::Zen => "Relaxing mode - you can't die",
            GameMode::Nightmare => "Prepare to suffer. Good luck.",
            GameMode::SuperDuperCrazy => "ABSOLUTELY BONKERS! Maximum speed, chaos, mayhem!",
        }
    }

    /// Three-letter code used in the leaderboard.
    pub fn short_code(self) -> &'static str {
        match self {
            GameMode::Normal => "NRM",
            GameMode::SlowMo => "SLO",
            GameMode::Turbo => "TRB",
            GameMode::Insane => "INS",
            GameMode::Zen => "ZEN",
            GameMode::Nightmare => "NGT",
            GameMode::SuperDuperCrazy => "SDC",
        }
    }

    /// Keys written by this preset. Keys not listed keep their current value.
    fn preset(self) -> Vec<(&'static str, Value)> {
        match self {
            GameMode::Normal => vec![
                (PLAYER_SPEED_MULTIPLIER, num(1.0)),
                (ALIEN_SPEED_MULTIPLIER, num(1.0)),
                (BULLET_SPEED_MULTIPLIER, num(1.0)),
                (RAPID_FIRE, false.into()),
                (BULLET_HELL, false.into()),
                (CHAOS_MODE, false.into()),
                (COLOR_MODE, "normal".into()),
                (INVINCIBLE, false.into()),
            ],
            GameMode::SlowMo => vec![
                (PLAYER_SPEED_MULTIPLIER, num(1.5)),
                (ALIEN_SPEED_MULTIPLIER, num(0.3)),
                (BULLET_SPEED_MULTIPLIER, num(0.5)),
                (COLOR_MODE, "matrix".into()),
            ],
            GameMode::Turbo => vec![
                (PLAYER_SPEED_MULTIPLIER, num(2.0)),
                (ALIEN_SPEED_MULTIPLIER, num(1.8)),
                (BULLET_SPEED_MULTIPLIER, num(2.0)),
                (RAPID_FIRE, true.into()),
                (COLOR_MODE, "rainbow".into()),
            ],
            GameMode::Insane => vec![
                (PLAYER_SPEED_MULTIPLIER, num(3.0)),
                (ALIEN_SPEED_MULTIPLIER, num(2.5)),
                (BULLET_SPEED_MULTIPLIER, num(2.5)),
                (RAPID_FIRE, true.into()),
                (BULLET_HELL, true.into()),
                (CHAOS_MODE, true.into()),
                (COLOR_MODE, "psychedelic".into()),
            ],
            GameMode::Zen => vec![
                (PLAYER_SPEED_MULTIPLIER, num(0.7)),
                (ALIEN_SPEED_MULTIPLIER, num(0.5)),
                (BULLET_SPEED_MULTIPLIER, num(0.8)),
                (INVINCIBLE, true.into()),
                (COLOR_MODE, "matrix".into()),
            ],
            GameMode::Nightmare => vec![
                (PLAYER_SPEED_MULTIPLIER, num(0.8)),
                (ALIEN_SPEED_MULTIPLIER, num(2.0)),
                (BULLET_SPEED_MULTIPLIER, num(1.5)),
                (BULLET_HELL, true.into()),
                (RAPID_FIRE, false.into()),
                (COLOR_MODE, "disco".into()),
            ],
            GameMode::SuperDuperCrazy => vec![
                (PLAYER_SPEED_MULTIPLIER, num(5.0)),
                (ALIEN_SPEED_MULTIPLIER, num(4.0)),
                (BULLET_SPEED_MULTIPLIER, num(4.5)),
                (RAPID_FIRE, true.into()),
                (BULLET_HELL, true.into()),
                (CHAOS_MODE, true.into()),
                (COLOR_MODE, "psychedelic".into()),
                (SHOW_TRAILS, true.into()),
            ],
        }
    }
}

// ── Settings ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    values: BTreeMap<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        let defaults: [(&str, Value); 11] = [
            (SOUND_ENABLED, true.into()),
            (PLAYER_SPEED_MULTIPLIER, num(1.0)),
            (ALIEN_SPEED_MULTIPLIER, num(1.0)),
            (BULLET_SPEED_MULTIPLIER, num(1.0)),
            (COLOR_MODE, "normal".into()),
            (SHOW_TRAILS, false.into()),
            (RAPID_FIRE, false.into()),
            (BULLET_HELL, false.into()),
            (INVINCIBLE, false.into()),
            (CHAOS_MODE, false.into()),
            (GAME_MODE, "normal".into()),
        ];
        Settings {
            values: defaults
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }
}

impl Settings {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    pub fn get_f32(&self, key: &str, default: f32) -> f32 {
        self.get(key)
            .and_then(Value::as_f64)
            .map_or(default, |v| v as f32)
    }

    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).and_then(Value::as_str).unwrap_or(default)
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// `(player, alien, bullet)`.
    pub fn speed_multipliers(&self) -> (f32, f32, f32) {
        (
            self.get_f32(PLAYER_SPEED_MULTIPLIER, 1.0),
            self.get_f32(ALIEN_SPEED_MULTIPLIER, 1.0),
            self.get_f32(BULLET_SPEED_MULTIPLIER, 1.0),
        )
    }

    pub fn game_mode(&self) -> GameMode {
        GameMode::parse(self.get_str(GAME_MODE, "normal")).unwrap_or(GameMode::Normal)
    }

    pub fn color_mode(&self) -> ColorMode {
        ColorMode::parse(self.get_str(COLOR_MODE, "normal"))
    }

    pub fn sound_enabled(&self) -> bool {
        self.get_bool(SOUND_ENABLED, true)
    }

    /// A copy of these settings with `mode`'s preset written over them.
    pub fn with_game_mode(&self, mode: GameMode) -> Settings {
        let mut next = self.clone();
        next.set(GAME_MODE, mode.as_str());
        for (key, value) in mode.preset() {
            next.set(key, value);
        }
        next
    }

    /// Apply a preset as a single replacement of the whole map.
    pub fn apply_game_mode(&mut self, mode: GameMode) {
        *self = self.with_game_mode(mode);
    }

    pub fn reset_to_defaults(&mut self) {
        *self = Settings::default();
    }
}

// ── Persistence ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SettingsStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Defaults overlaid with whatever the file holds.
    pub fn load(&self) -> Settings {
        let mut settings = Settings::default();
        if let Some(stored) = read_json::<BTreeMap<String, Value>>(&self.path) {
            settings.values.extend(stored);
        }
        settings
    }

    pub fn save(&self, settings: &Settings) {
        match write_json_atomic(&self.path, &settings.values) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "settings saved"),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "could not save settings")
            }
        }
    }
}
