//! Game entity types: per-entity state plus pure position/timer advances.
//!
//! Continuous coordinates are truncated (never rounded) when bounds are read,
//! so collision boxes are reproducible from float-accumulated motion.

use crate::config::{
    BULLET_SPEED, GAME_WIDTH, MYSTERY_SHIP_EXIT_MARGIN, MYSTERY_SHIP_SPEED, PLAYER_SHOOT_COOLDOWN,
    PLAYER_SPEED, PLAYER_START_X, PLAYER_START_Y, PLAY_AREA_BOTTOM, PLAY_AREA_TOP, SHIELD_COUNT,
    SHIELD_HEALTH, SHIELD_HEIGHT, SHIELD_WIDTH, SHIELD_Y,
};
use crate::sprites::{
    ALIEN_BOT, ALIEN_HEIGHT, ALIEN_MID, ALIEN_TOP, ALIEN_WIDTH, MYSTERY_SHIP_HEIGHT,
    MYSTERY_SHIP_WIDTH, PLAYER_HEIGHT, PLAYER_WIDTH,
};

// ── Bounding boxes ───────────────────────────────────────────────────────────

/// Axis-aligned box in grid cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Bounds {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Bounds { x, y, w, h }
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }
}

// ── Projectiles ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Alien,
}

#[derive(Clone, Debug)]
pub struct Bullet {
    pub x: i32,
    pub y: f32,
    /// +1 moves down, -1 moves up.
    pub direction: i32,
    pub owner: BulletOwner,
    pub speed: f32,
    pub alive: bool,
}

impl Bullet {
    pub fn new(x: i32, y: i32, owner: BulletOwner) -> Self {
        let direction = match owner {
            BulletOwner::Player => -1,
            BulletOwner::Alien => 1,
        };
        Bullet {
            x,
            y: y as f32,
            direction,
            owner,
            speed: BULLET_SPEED,
            alive: true,
        }
    }

    pub fn is_player(&self) -> bool {
        self.owner == BulletOwner::Player
    }

    /// Integrate position; a bullet dies once it leaves the play area on the
    /// side it is travelling towards.
    pub fn update(&mut self, dt: f32) {
        self.y += self.direction as f32 * self.speed * dt;

        let out = if self.direction < 0 {
            self.y < PLAY_AREA_TOP as f32
        } else {
            self.y > PLAY_AREA_BOTTOM as f32
        };
        if out {
            self.alive = false;
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y as i32, 1, 1)
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: i32,
    /// Cells per second, already scaled by the player speed multiplier.
    pub speed: f32,
    /// Counts down; firing is allowed once it reaches zero or below.
    pub shoot_cooldown: f32,
    pub alive: bool,
}

impl Default for Player {
    fn default() -> Self {
        Player {
            x: PLAYER_START_X,
            y: PLAYER_START_Y,
            speed: PLAYER_SPEED,
            shoot_cooldown: 0.0,
            alive: true,
        }
    }
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_left(&mut self, dt: f32) {
        self.x = (self.x - self.speed * dt).max(0.0);
    }

    pub fn move_right(&mut self, dt: f32) {
        self.x = (self.x + self.speed * dt).min((GAME_WIDTH - PLAYER_WIDTH) as f32);
    }

    pub fn can_shoot(&self) -> bool {
        self.shoot_cooldown <= 0.0
    }

    /// Fire if the cooldown has expired, restarting it.
    pub fn shoot(&mut self) -> Option<Bullet> {
        if !self.can_shoot() {
            return None;
        }
        self.shoot_cooldown = PLAYER_SHOOT_COOLDOWN;
        Some(self.create_bullet())
    }

    /// Spawn a bullet from the top-center without consulting or touching the
    /// cooldown (rapid fire).
    pub fn create_bullet(&self) -> Bullet {
        let x = (self.x + (PLAYER_WIDTH / 2) as f32) as i32;
        Bullet::new(x, self.y - 1, BulletOwner::Player)
    }

    pub fn update(&mut self, dt: f32) {
        if self.shoot_cooldown > 0.0 {
            self.shoot_cooldown -= dt;
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x as i32, self.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    /// Back to the start position with a ready gun.
    pub fn reset(&mut self) {
        self.x = PLAYER_START_X;
        self.y = PLAYER_START_Y;
        self.alive = true;
        self.shoot_cooldown = 0.0;
    }
}

// ── Aliens ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlienTier {
    Top,
    Mid,
    Bottom,
}

impl AlienTier {
    /// Row 0 is the top tier, rows 1-2 the middle tier, the rest the bottom.
    pub fn for_row(row: usize) -> Self {
        match row {
            0 => AlienTier::Top,
            1 | 2 => AlienTier::Mid,
            _ => AlienTier::Bottom,
        }
    }

    /// Skin for this tier; `animated` selects the alternate frame.
    pub fn sprite(self, animated: bool) -> [&'static str; 2] {
        let frames = match self {
            AlienTier::Top => &ALIEN_TOP,
            AlienTier::Mid => &ALIEN_MID,
            AlienTier::Bottom => &ALIEN_BOT,
        };
        frames[usize::from(animated)]
    }
}

#[derive(Clone, Debug)]
pub struct Alien {
    pub x: f32,
    pub y: i32,
    pub row: usize,
    pub col: usize,
    pub alive: bool,
    /// Which of the two animation frames is shown.
    pub animated: bool,
}

impl Alien {
    pub fn new(x: i32, y: i32, row: usize, col: usize) -> Self {
        Alien {
            x: x as f32,
            y,
            row,
            col,
            alive: true,
            animated: false,
        }
    }

    pub fn tier(&self) -> AlienTier {
        AlienTier::for_row(self.row)
    }

    pub fn sprite(&self) -> [&'static str; 2] {
        self.tier().sprite(self.animated)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x as i32, self.y, ALIEN_WIDTH, ALIEN_HEIGHT)
    }
}

// ── Shields ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Shield {
    pub x: i32,
    pub y: i32,
    pub health: i32,
    pub max_health: i32,
    pub alive: bool,
}

impl Shield {
    pub fn new(x: i32, y: i32) -> Self {
        Shield {
            x,
            y,
            health: SHIELD_HEALTH,
            max_health: SHIELD_HEALTH,
            alive: true,
        }
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
        if self.health <= 0 {
            self.alive = false;
        }
    }

    pub fn health_fraction(&self) -> f32 {
        self.health as f32 / self.max_health as f32
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, SHIELD_WIDTH, SHIELD_HEIGHT)
    }
}

/// The standard row of shields, evenly spaced across the play area.
pub fn create_shields() -> Vec<Shield> {
    let spacing = GAME_WIDTH / (SHIELD_COUNT as i32 + 1);
    (0..SHIELD_COUNT as i32)
        .map(|i| Shield::new(spacing * (i + 1) - SHIELD_WIDTH / 2, SHIELD_Y))
        .collect()
}

// ── Mystery ship ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct MysteryShip {
    pub x: f32,
    pub y: i32,
    /// 1 flies left-to-right, -1 right-to-left.
    pub direction: i32,
    pub speed: f32,
    pub alive: bool,
    /// Assigned only when the ship is destroyed.
    pub score_value: u32,
}

impl MysteryShip {
    /// A ship entering from the edge opposite its direction of travel.
    pub fn new(direction: i32) -> Self {
        let x = if direction > 0 {
            -MYSTERY_SHIP_WIDTH as f32
        } else {
            GAME_WIDTH as f32
        };
        MysteryShip {
            x,
            y: PLAY_AREA_TOP,
            direction,
            speed: MYSTERY_SHIP_SPEED,
            alive: true,
            score_value: 0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.x += self.direction as f32 * self.speed * dt;

        let gone = if self.direction > 0 {
            self.x > GAME_WIDTH as f32 + MYSTERY_SHIP_EXIT_MARGIN
        } else {
            self.x < -(MYSTERY_SHIP_WIDTH as f32) - MYSTERY_SHIP_EXIT_MARGIN
        };
        if gone {
            self.alive = false;
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            self.x as i32,
            self.y,
            MYSTERY_SHIP_WIDTH,
            MYSTERY_SHIP_HEIGHT,
        )
    }
}
