use crossterm::style::Color;
use rand::Rng;

use super::{State, StateId};
use crate::audio::Cue;
use crate::collision::{
    aliens_reached_bottom, alien_player_contact, bullet_alien_hits, bullet_player_hit,
    bullet_shield_hits, first_player_bullet_hit,
};
use crate::config::{
    BULLET_HELL_FRAME_PERIOD, CHAOS_ALIEN_RANGE, CHAOS_BULLET_RANGE, GAME_WIDTH,
    MYSTERY_SHIP_INTERVAL, PLAYER_SPEED, PLAY_AREA_BOTTOM,
};
use crate::context::GameContext;
use crate::effects::{
    ColorEffects, Effects, ALIEN_BULLET_COLOR_ID, MYSTERY_COLOR_ID, PLAYER_BULLET_COLOR_ID,
    PLAYER_COLOR_ID, SHIELD_COLOR_ID,
};
use crate::entities::{create_shields, AlienTier, Bullet, MysteryShip, Player, Shield};
use crate::formation::Formation;
use crate::input::Key;
use crate::render::{put_lines, Surface};
use crate::scoring::{alien_score, mystery_ship_score};
use crate::settings::{BULLET_HELL, CHAOS_MODE, INVINCIBLE, RAPID_FIRE};
use crate::sprites::{self, ALIEN_BULLET, MYSTERY_SHIP, PLAYER, PLAYER_BULLET};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_UI: Color = Color::Cyan;
const C_SCORE: Color = Color::White;
const C_HIGH_SCORE: Color = Color::Yellow;
const C_PLAYER: Color = Color::Green;
const C_SHIELD: Color = Color::Green;
const C_MYSTERY: Color = Color::Red;
const C_BULLET_PLAYER: Color = Color::White;
const C_BULLET_ALIEN: Color = Color::Red;
const C_EXPLOSION: Color = Color::Yellow;

fn alien_color(tier: AlienTier) -> Color {
    match tier {
        AlienTier::Top => Color::Magenta,
        AlienTier::Mid => Color::Cyan,
        AlienTier::Bottom => Color::Green,
    }
}

/// Actions gathered from this frame's keys, consumed by the next update.
#[derive(Clone, Copy, Debug, Default)]
struct Intent {
    left: bool,
    right: bool,
    shoot: bool,
}

#[derive(Debug)]
pub struct PlayingState {
    player: Player,
    formation: Formation,
    shields: Vec<Shield>,
    bullets: Vec<Bullet>,
    effects: Effects,
    colors: ColorEffects,
    mystery_ship: Option<MysteryShip>,
    mystery_ship_timer: f32,
    /// Player shots fired this round; indexes the mystery ship bonus.
    shot_count: u32,
    frame_count: u64,
    intent: Intent,
}

impl Default for PlayingState {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayingState {
    pub fn new() -> Self {
        PlayingState {
            player: Player::new(),
            formation: Formation::new(1),
            shields: create_shields(),
            bullets: Vec::new(),
            effects: Effects::default(),
            colors: ColorEffects::default(),
            mystery_ship: None,
            mystery_ship_timer: 0.0,
            shot_count: 0,
            frame_count: 0,
            intent: Intent::default(),
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn formation(&self) -> &Formation {
        &self.formation
    }

    pub fn formation_mut(&mut self) -> &mut Formation {
        &mut self.formation
    }

    pub fn shields(&self) -> &[Shield] {
        &self.shields
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn add_bullet(&mut self, bullet: Bullet) {
        self.bullets.push(bullet);
    }

    pub fn mystery_ship(&self) -> Option<&MysteryShip> {
        self.mystery_ship.as_ref()
    }

    pub fn spawn_mystery_ship(&mut self, direction: i32) {
        self.mystery_ship = Some(MysteryShip::new(direction));
        self.mystery_ship_timer = 0.0;
    }

    pub fn shot_count(&self) -> u32 {
        self.shot_count
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    // ── Per-tick phases ──────────────────────────────────────────────────────

    fn fire_player(&mut self, ctx: &mut GameContext, rapid_fire: bool, bullet_mult: f32) {
        let bullet = if rapid_fire {
            Some(self.player.create_bullet())
        } else {
            self.player.shoot()
        };
        if let Some(mut bullet) = bullet {
            bullet.speed *= bullet_mult;
            self.bullets.push(bullet);
            ctx.play(Cue::Shoot);
            self.shot_count += 1;
        }
    }

    fn fire_aliens(&mut self, ctx: &mut GameContext, bullet_mult: f32) {
        if let Some(mut bullet) = self.formation.try_shoot(&mut ctx.rng) {
            bullet.speed *= bullet_mult;
            self.bullets.push(bullet);
        }
    }

    fn update_mystery_ship(&mut self, ctx: &mut GameContext, dt: f32) {
        self.mystery_ship_timer += dt;
        if self.mystery_ship_timer >= MYSTERY_SHIP_INTERVAL && self.mystery_ship.is_none() {
            let direction = if ctx.rng.gen_bool(0.5) { 1 } else { -1 };
            self.spawn_mystery_ship(direction);
        }

        if let Some(ship) = &mut self.mystery_ship {
            ship.update(dt);
            if !ship.alive {
                self.mystery_ship = None;
            }
        }
    }

    /// Detect and apply every collision for this frame. Stops early once the
    /// round is lost.
    fn resolve_collisions(&mut self, ctx: &mut GameContext) {
        for (b, a) in bullet_alien_hits(&self.bullets, &self.formation.aliens) {
            let alien = &mut self.formation.aliens[a];
            // Already killed by an earlier bullet this frame; this one flies on.
            if !alien.alive {
                continue;
            }
            alien.alive = false;
            self.bullets[b].alive = false;
            ctx.scores.add(alien_score(alien.tier()));
            self.effects.add_explosion(alien.x as i32, alien.y);
            ctx.play(Cue::Explosion);
        }

        if let Some(ship) = self.mystery_ship.as_mut().filter(|s| s.alive) {
            if let Some(b) = first_player_bullet_hit(&self.bullets, ship.bounds()) {
                self.bullets[b].alive = false;
                ship.alive = false;
                ship.score_value = mystery_ship_score(self.shot_count, &mut ctx.rng);
                ctx.scores.add(ship.score_value);
                tracing::debug!(
                    shot = self.shot_count,
                    score = ship.score_value,
                    "mystery ship down"
                );
                self.effects.add_explosion(ship.x as i32, ship.y);
                ctx.play(Cue::Explosion);
            }
        }

        for (b, s) in bullet_shield_hits(&self.bullets, &self.shields) {
            self.bullets[b].alive = false;
            self.shields[s].take_damage(1);
        }

        if let Some(b) = bullet_player_hit(&self.bullets, &self.player) {
            self.bullets[b].alive = false;
            if self.player_hit(ctx) {
                return;
            }
        }

        if alien_player_contact(&self.formation.aliens, &self.player) && self.player_hit(ctx) {
            return;
        }

        if aliens_reached_bottom(&self.formation.aliens, PLAY_AREA_BOTTOM) {
            self.player_hit(ctx);
        }
    }

    /// Apply one hit to the player. Returns `true` when it ended the game.
    pub fn player_hit(&mut self, ctx: &mut GameContext) -> bool {
        self.effects.add_explosion(self.player.x as i32, self.player.y);
        ctx.play(Cue::Explosion);

        if ctx.settings.get_bool(INVINCIBLE, false) {
            return false;
        }

        ctx.lives = ctx.lives.saturating_sub(1);
        if ctx.lives == 0 {
            self.player.alive = false;
            tracing::info!(score = ctx.scores.score, level = ctx.level, "game over");
            ctx.request_state(StateId::GameOver);
            true
        } else {
            self.player.reset();
            self.bullets.clear();
            false
        }
    }

    fn check_level_clear(&mut self, ctx: &mut GameContext) {
        if !self.formation.is_cleared() {
            return;
        }
        ctx.play(Cue::LevelComplete);
        ctx.level += 1;
        tracing::info!(level = ctx.level, score = ctx.scores.score, "level cleared");
        self.formation.reset(ctx.level);
        self.shields = create_shields();
        self.bullets.clear();
    }

    fn render_hud(&self, ctx: &GameContext, surface: &mut dyn Surface) {
        let bar = "=".repeat(GAME_WIDTH as usize);
        let ui = self.colors.ui_color(C_UI);
        surface.put(0, 0, &bar, ui);

        surface.put(2, 1, &format!("SCORE: {:06}", ctx.scores.score), C_SCORE);

        let high = format!("HI-SCORE: {:06}", ctx.scores.high_score);
        let x = (GAME_WIDTH - high.len() as i32) / 2;
        surface.put(x, 1, &high, C_HIGH_SCORE);

        let info = format!("LIVES: {}  LVL: {}", ctx.lives, ctx.level);
        surface.put(GAME_WIDTH - info.len() as i32 - 2, 1, &info, C_SCORE);

        surface.put(0, 2, &bar, ui);
    }
}

impl State for PlayingState {
    fn enter(&mut self, ctx: &mut GameContext, from: Option<StateId>) {
        if from == Some(StateId::Paused) {
            return;
        }

        ctx.reset_round();
        self.player.reset();
        self.formation.reset(ctx.level);
        self.shields = create_shields();
        self.bullets.clear();
        self.effects.clear();
        self.frame_count = 0;
        self.intent = Intent::default();

        let (player_mult, _, _) = ctx.settings.speed_multipliers();
        self.player.speed = PLAYER_SPEED * player_mult;
        self.colors.set_mode(ctx.settings.color_mode());

        self.mystery_ship = None;
        self.mystery_ship_timer = 0.0;
        self.shot_count = 0;
        tracing::info!(mode = ctx.settings.game_mode().as_str(), "round started");
    }

    fn exit(&mut self, _ctx: &mut GameContext) {
        self.intent = Intent::default();
    }

    fn handle_input(&mut self, ctx: &mut GameContext, key: Key) {
        if key.is_left() {
            self.intent.left = true;
        } else if key.is_right() {
            self.intent.right = true;
        }
        if key.is_select() {
            self.intent.shoot = true;
        }

        if key.is_pause() {
            ctx.request_state(StateId::Paused);
        } else if key.is_quit() {
            ctx.request_state(StateId::Menu);
        }
    }

    fn update(&mut self, ctx: &mut GameContext, dt: f32) {
        self.frame_count += 1;

        let (player_mult, mut alien_mult, mut bullet_mult) = ctx.settings.speed_multipliers();
        let rapid_fire = ctx.settings.get_bool(RAPID_FIRE, false);
        let bullet_hell = ctx.settings.get_bool(BULLET_HELL, false);
        if ctx.settings.get_bool(CHAOS_MODE, false) {
            alien_mult *= ctx.rng.gen_range(CHAOS_ALIEN_RANGE.0..CHAOS_ALIEN_RANGE.1);
            bullet_mult *= ctx.rng.gen_range(CHAOS_BULLET_RANGE.0..CHAOS_BULLET_RANGE.1);
        }
        self.player.speed = PLAYER_SPEED * player_mult;

        let intent = std::mem::take(&mut self.intent);
        if intent.left {
            self.player.move_left(dt);
        }
        if intent.right {
            self.player.move_right(dt);
        }
        if intent.shoot {
            self.fire_player(ctx, rapid_fire, bullet_mult);
        }
        self.player.update(dt);

        self.formation.update(dt * alien_mult);
        if bullet_hell && self.frame_count % BULLET_HELL_FRAME_PERIOD == 0 {
            self.fire_aliens(ctx, bullet_mult);
        }
        self.fire_aliens(ctx, bullet_mult);

        self.update_mystery_ship(ctx, dt);

        for bullet in &mut self.bullets {
            bullet.update(dt);
        }
        self.effects.update(dt);
        self.colors.update();

        self.resolve_collisions(ctx);
        self.bullets.retain(|b| b.alive);

        if ctx.pending_state() != Some(StateId::GameOver) {
            self.check_level_clear(ctx);
        }
    }

    fn render(&self, ctx: &GameContext, surface: &mut dyn Surface) {
        self.render_hud(ctx, surface);

        for (i, shield) in self.shields.iter().enumerate().filter(|(_, s)| s.alive) {
            let color = self.colors.color(C_SHIELD, SHIELD_COLOR_ID + i);
            put_lines(
                surface,
                shield.x,
                shield.y,
                &sprites::shield(shield.health_fraction()),
                color,
            );
        }

        for (i, alien) in self.formation.alive().enumerate() {
            let color = self.colors.color(alien_color(alien.tier()), i);
            put_lines(surface, alien.x as i32, alien.y, &alien.sprite(), color);
        }

        if let Some(ship) = self.mystery_ship.as_ref().filter(|s| s.alive) {
            let color = self.colors.color(C_MYSTERY, MYSTERY_COLOR_ID);
            surface.put(ship.x as i32, ship.y, MYSTERY_SHIP, color);
        }

        if self.player.alive {
            let color = self.colors.color(C_PLAYER, PLAYER_COLOR_ID);
            put_lines(surface, self.player.x as i32, self.player.y, &PLAYER, color);
        }

        for bullet in self.bullets.iter().filter(|b| b.alive) {
            let b = bullet.bounds();
            let (glyph, color) = if bullet.is_player() {
                (PLAYER_BULLET, self.colors.color(C_BULLET_PLAYER, PLAYER_BULLET_COLOR_ID))
            } else {
                (ALIEN_BULLET, self.colors.color(C_BULLET_ALIEN, ALIEN_BULLET_COLOR_ID))
            };
            surface.put(b.x, b.y, glyph, color);
        }

        for explosion in &self.effects.explosions {
            if let Some(frame) = explosion.sprite() {
                let color = self.colors.color(C_EXPLOSION, self.frame_count as usize);
                surface.put(explosion.x, explosion.y, frame, color);
            }
        }
    }

    fn continuous_input(&self) -> bool {
        true
    }
}
