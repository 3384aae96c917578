//! The alien formation: a rigid grid that marches, descends and fires as one.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{
    ALIEN_ANIMATION_PERIOD, ALIEN_BASE_SHOOT_INTERVAL, ALIEN_BASE_SPEED, ALIEN_COLS,
    ALIEN_DESCENT, ALIEN_ROWS, ALIEN_SHOOT_INTERVAL_DECREMENT, ALIEN_SPACING_X, ALIEN_SPACING_Y,
    ALIEN_SPEED_INCREMENT, ALIEN_START_X, ALIEN_START_Y, GAME_WIDTH, MAX_ALIEN_ROWS,
    MIN_SHOOT_INTERVAL,
};
use crate::entities::{Alien, Bullet, BulletOwner};
use crate::sprites::{ALIEN_HEIGHT, ALIEN_WIDTH};

// ── Difficulty tables ────────────────────────────────────────────────────────

pub fn speed_for_level(level: u32) -> f32 {
    ALIEN_BASE_SPEED + level.saturating_sub(1) as f32 * ALIEN_SPEED_INCREMENT
}

pub fn shoot_interval_for_level(level: u32) -> f32 {
    let interval =
        ALIEN_BASE_SHOOT_INTERVAL - level.saturating_sub(1) as f32 * ALIEN_SHOOT_INTERVAL_DECREMENT;
    interval.max(MIN_SHOOT_INTERVAL)
}

/// One extra row every two levels, capped.
pub fn rows_for_level(level: u32) -> usize {
    (ALIEN_ROWS + level.saturating_sub(1) as usize / 2).min(MAX_ALIEN_ROWS)
}

// ── Formation ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Formation {
    pub aliens: Vec<Alien>,
    pub level: u32,
    /// 1 = right, -1 = left. Shared by every alien.
    pub direction: i32,
    pub speed: f32,
    pub shoot_timer: f32,
    pub shoot_interval: f32,
    pub animation_timer: f32,
    pub animation_phase: bool,
    pub rows: usize,
}

impl Formation {
    pub fn new(level: u32) -> Self {
        let mut formation = Formation {
            aliens: Vec::new(),
            level,
            direction: 1,
            speed: 0.0,
            shoot_timer: 0.0,
            shoot_interval: 0.0,
            animation_timer: 0.0,
            animation_phase: false,
            rows: 0,
        };
        formation.reset(level);
        formation
    }

    /// Hard reset for `level`: motion state recomputed, grid rebuilt.
    pub fn reset(&mut self, level: u32) {
        self.level = level;
        self.direction = 1;
        self.speed = speed_for_level(level);
        self.shoot_interval = shoot_interval_for_level(level);
        self.shoot_timer = 0.0;
        self.animation_timer = 0.0;
        self.animation_phase = false;
        self.rows = rows_for_level(level);

        self.aliens.clear();
        for row in 0..self.rows {
            for col in 0..ALIEN_COLS {
                let x = ALIEN_START_X + col as i32 * ALIEN_SPACING_X;
                let y = ALIEN_START_Y + row as i32 * ALIEN_SPACING_Y;
                self.aliens.push(Alien::new(x, y, row, col));
            }
        }
    }

    /// Advance animation, march or descend, and accumulate the shoot timer.
    pub fn update(&mut self, dt: f32) {
        if self.aliens.is_empty() {
            return;
        }

        self.animation_timer += dt;
        if self.animation_timer >= ALIEN_ANIMATION_PERIOD {
            self.animation_timer = 0.0;
            self.animation_phase = !self.animation_phase;
            let phase = self.animation_phase;
            self.alive_mut().for_each(|a| a.animated = phase);
        }

        let delta = self.speed * dt * self.direction as f32;
        let must_descend = self.alive().any(|a| {
            let new_x = a.x + delta;
            new_x < 0.0 || new_x + ALIEN_WIDTH as f32 >= GAME_WIDTH as f32
        });

        if must_descend {
            self.direction = -self.direction;
            self.alive_mut().for_each(|a| a.y += ALIEN_DESCENT);
        } else {
            self.alive_mut().for_each(|a| a.x += delta);
        }

        self.shoot_timer += dt;
    }

    /// Once the shoot interval has elapsed, a uniformly chosen alive alien
    /// fires from its bottom-center. With no aliens left nothing is emitted
    /// and the timer keeps running.
    pub fn try_shoot(&mut self, rng: &mut impl Rng) -> Option<Bullet> {
        if self.shoot_timer < self.shoot_interval {
            return None;
        }

        let shooters: Vec<&Alien> = self.alive().collect();
        let shooter = shooters.choose(rng)?;
        let x = (shooter.x + (ALIEN_WIDTH / 2) as f32) as i32;
        let y = shooter.y + ALIEN_HEIGHT;
        self.shoot_timer = 0.0;
        Some(Bullet::new(x, y, BulletOwner::Alien))
    }

    pub fn alive(&self) -> impl Iterator<Item = &Alien> {
        self.aliens.iter().filter(|a| a.alive)
    }

    fn alive_mut(&mut self) -> impl Iterator<Item = &mut Alien> {
        self.aliens.iter_mut().filter(|a| a.alive)
    }

    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    pub fn is_cleared(&self) -> bool {
        self.alive().next().is_none()
    }

    /// Lower edge of the lowest alive alien, or 0 when the grid is empty.
    pub fn lowest_y(&self) -> i32 {
        self.alive().map(|a| a.y + ALIEN_HEIGHT).max().unwrap_or(0)
    }
}
