//! Collision detection.
//!
//! Detection only: every function here reads entity collections and reports
//! what overlaps. Killing, damage and scoring happen in the playing state.
//! Dead entities are skipped, never special-cased.

use crate::entities::{Alien, Bounds, Bullet, Player, Shield};

/// Strict AABB overlap. Boxes that merely share an edge do not collide.
pub fn overlap(a: Bounds, b: Bounds) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Player-owned bullets against aliens, as `(bullet index, alien index)`.
///
/// Each bullet resolves at most one alien: the first overlapping one in
/// enumeration order.
pub fn bullet_alien_hits(bullets: &[Bullet], aliens: &[Alien]) -> Vec<(usize, usize)> {
    bullets
        .iter()
        .enumerate()
        .filter(|(_, b)| b.alive && b.is_player())
        .filter_map(|(bi, b)| {
            let bb = b.bounds();
            aliens
                .iter()
                .position(|a| a.alive && overlap(bb, a.bounds()))
                .map(|ai| (bi, ai))
        })
        .collect()
}

/// Any alive bullet against shields, as `(bullet index, shield index)`,
/// first match per bullet.
pub fn bullet_shield_hits(bullets: &[Bullet], shields: &[Shield]) -> Vec<(usize, usize)> {
    bullets
        .iter()
        .enumerate()
        .filter(|(_, b)| b.alive)
        .filter_map(|(bi, b)| {
            let bb = b.bounds();
            shields
                .iter()
                .position(|s| s.alive && overlap(bb, s.bounds()))
                .map(|si| (bi, si))
        })
        .collect()
}

/// Index of the first alien-owned bullet overlapping the player.
pub fn bullet_player_hit(bullets: &[Bullet], player: &Player) -> Option<usize> {
    if !player.alive {
        return None;
    }
    let pb = player.bounds();
    bullets
        .iter()
        .position(|b| b.alive && !b.is_player() && overlap(b.bounds(), pb))
}

/// Index of the first player bullet overlapping `target`.
pub fn first_player_bullet_hit(bullets: &[Bullet], target: Bounds) -> Option<usize> {
    bullets
        .iter()
        .position(|b| b.alive && b.is_player() && overlap(b.bounds(), target))
}

pub fn alien_player_contact(aliens: &[Alien], player: &Player) -> bool {
    if !player.alive {
        return false;
    }
    let pb = player.bounds();
    aliens.iter().any(|a| a.alive && overlap(a.bounds(), pb))
}

/// True once any alive alien's lower edge is at or past `bottom_y`.
pub fn aliens_reached_bottom(aliens: &[Alien], bottom_y: i32) -> bool {
    aliens.iter().any(|a| a.alive && a.bounds().bottom() >= bottom_y)
}
