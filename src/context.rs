//! Everything the states share: counters, settings, persistence, audio and
//! the seeded random source. Passed by reference into every state hook.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::audio::{AudioSink, Cue, NullAudio};
use crate::config::PLAYER_LIVES;
use crate::highscores::{HighScoreStore, HighScoreTable};
use crate::scoring::ScoreBoard;
use crate::settings::{Settings, SettingsStore};
use crate::states::StateId;

pub struct GameContext {
    pub scores: ScoreBoard,
    pub lives: u32,
    pub level: u32,
    pub running: bool,
    pub settings: Settings,
    pub high_scores: HighScoreTable,
    pub audio: Box<dyn AudioSink>,
    pub rng: StdRng,
    settings_store: Option<SettingsStore>,
    high_score_store: Option<HighScoreStore>,
    pending: Option<StateId>,
}

impl GameContext {
    /// A context with default settings, an empty score table, no persistence
    /// and silent audio.
    pub fn new(rng: StdRng) -> Self {
        GameContext {
            scores: ScoreBoard::default(),
            lives: PLAYER_LIVES,
            level: 1,
            running: true,
            settings: Settings::default(),
            high_scores: HighScoreTable::new(),
            audio: Box::new(NullAudio),
            rng,
            settings_store: None,
            high_score_store: None,
            pending: None,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn with_audio(mut self, audio: Box<dyn AudioSink>) -> Self {
        self.audio = audio;
        self.audio.set_enabled(self.settings.sound_enabled());
        self
    }

    /// Load settings and high scores from disk and keep the stores for saving.
    pub fn with_persistence(
        mut self,
        settings: SettingsStore,
        high_scores: HighScoreStore,
    ) -> Self {
        self.settings = settings.load();
        self.high_scores = high_scores.load();
        self.scores.load_high_score(self.high_scores.top_score());
        self.audio.set_enabled(self.settings.sound_enabled());
        self.settings_store = Some(settings);
        self.high_score_store = Some(high_scores);
        self
    }

    /// Fresh round: zero score, full lives, level one.
    pub fn reset_round(&mut self) {
        self.scores.reset();
        self.lives = PLAYER_LIVES;
        self.level = 1;
    }

    pub fn play(&mut self, cue: Cue) {
        self.audio.play(cue);
    }

    pub fn save_settings(&self) {
        if let Some(store) = &self.settings_store {
            store.save(&self.settings);
        }
    }

    /// Record a finished game and return its rank (0 when it did not place).
    pub fn record_high_score(&mut self, name: &str) -> usize {
        let mode = self.settings.game_mode();
        let rank = self
            .high_scores
            .add(name, self.scores.score, self.level, mode.as_str());
        self.scores.load_high_score(self.high_scores.top_score());
        if let Some(store) = &self.high_score_store {
            store.save(&self.high_scores);
        }
        rank
    }

    // ── Transitions ──────────────────────────────────────────────────────────

    /// Ask the manager to switch states once the current hook returns.
    pub fn request_state(&mut self, id: StateId) {
        self.pending = Some(id);
    }

    pub fn pending_state(&self) -> Option<StateId> {
        self.pending
    }

    pub(crate) fn take_pending(&mut self) -> Option<StateId> {
        self.pending.take()
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}
