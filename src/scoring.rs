//! Score values and the mystery ship's shot-count bonus rule.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{
    MYSTERY_BONUS, MYSTERY_BONUS_FIRST_SHOT, MYSTERY_BONUS_PERIOD, MYSTERY_SMALL_SCORES,
    SCORE_ALIEN_BOT, SCORE_ALIEN_MID, SCORE_ALIEN_TOP,
};
use crate::entities::AlienTier;

/// Score awarded per alien destroyed.
pub fn alien_score(tier: AlienTier) -> u32 {
    match tier {
        AlienTier::Top => SCORE_ALIEN_TOP,
        AlienTier::Mid => SCORE_ALIEN_MID,
        AlienTier::Bottom => SCORE_ALIEN_BOT,
    }
}

/// Whether the destroying shot earns the large bonus: shot 23, then every
/// 15th shot after it (38, 53, 68, ...).
pub fn is_bonus_shot(shot_count: u32) -> bool {
    shot_count >= MYSTERY_BONUS_FIRST_SHOT
        && (shot_count - MYSTERY_BONUS_FIRST_SHOT) % MYSTERY_BONUS_PERIOD == 0
}

/// Value of a mystery ship destroyed by player shot number `shot_count`.
pub fn mystery_ship_score(shot_count: u32, rng: &mut impl Rng) -> u32 {
    if is_bonus_shot(shot_count) {
        return MYSTERY_BONUS;
    }
    *MYSTERY_SMALL_SCORES
        .choose(rng)
        .unwrap_or(&MYSTERY_SMALL_SCORES[0])
}

// ── Score keeping ────────────────────────────────────────────────────────────

/// Running score plus the best score seen, shown live in the HUD.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    pub score: u32,
    pub high_score: u32,
}

impl ScoreBoard {
    pub fn add(&mut self, points: u32) {
        self.score += points;
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }

    pub fn reset(&mut self) {
        self.score = 0;
    }

    /// Merge a persisted best score, never lowering the current one.
    pub fn load_high_score(&mut self, high_score: u32) {
        self.high_score = self.high_score.max(high_score);
    }
}
