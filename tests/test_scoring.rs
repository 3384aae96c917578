use rand::rngs::StdRng;
use rand::SeedableRng;

use tty_invaders::config::{MYSTERY_BONUS, MYSTERY_SMALL_SCORES, SCORE_ALIEN_BOT, SCORE_ALIEN_TOP};
use tty_invaders::entities::AlienTier;
use tty_invaders::scoring::*;

// ── Alien values ──────────────────────────────────────────────────────────────

#[test]
fn top_row_is_worth_most() {
    assert_eq!(alien_score(AlienTier::Top), SCORE_ALIEN_TOP);
    assert_eq!(alien_score(AlienTier::Bottom), SCORE_ALIEN_BOT);
    assert!(alien_score(AlienTier::Top) > alien_score(AlienTier::Mid));
    assert!(alien_score(AlienTier::Mid) > alien_score(AlienTier::Bottom));
}

// ── Mystery ship bonus sequence ───────────────────────────────────────────────

#[test]
fn only_shot_23_is_bonus_before_24() {
    let bonus: Vec<u32> = (1..=23).filter(|&n| is_bonus_shot(n)).collect();
    assert_eq!(bonus, vec![23]);
}

#[test]
fn every_fifteenth_after_23_is_bonus() {
    let bonus: Vec<u32> = (24..=100).filter(|&n| is_bonus_shot(n)).collect();
    assert_eq!(bonus, vec![38, 53, 68, 83, 98]);
}

#[test]
fn mystery_score_matches_sequence() {
    let mut rng = StdRng::seed_from_u64(7);
    for shot in 1..=100 {
        let score = mystery_ship_score(shot, &mut rng);
        if is_bonus_shot(shot) {
            assert_eq!(score, MYSTERY_BONUS, "shot {shot}");
        } else {
            assert!(MYSTERY_SMALL_SCORES.contains(&score), "shot {shot} gave {score}");
        }
    }
}

#[test]
fn small_scores_all_show_up() {
    let mut rng = StdRng::seed_from_u64(1);
    let seen: Vec<u32> = (0..200).map(|_| mystery_ship_score(1, &mut rng)).collect();
    for value in MYSTERY_SMALL_SCORES {
        assert!(seen.contains(&value));
    }
}

// ── Score board ───────────────────────────────────────────────────────────────

#[test]
fn high_score_tracks_running_score() {
    let mut board = ScoreBoard::default();
    board.load_high_score(100);
    board.add(60);
    assert_eq!(board.high_score, 100);
    board.add(60);
    assert_eq!(board.score, 120);
    assert_eq!(board.high_score, 120);

    board.reset();
    assert_eq!(board.score, 0);
    assert_eq!(board.high_score, 120);
    board.load_high_score(50);
    assert_eq!(board.high_score, 120);
}
