use tty_invaders::config::*;
use tty_invaders::entities::*;
use tty_invaders::sprites::{MYSTERY_SHIP_WIDTH, PLAYER_WIDTH};

// ── Player movement ───────────────────────────────────────────────────────────

#[test]
fn player_clamps_to_play_area() {
    let mut p = Player::new();
    p.move_left(10.0);
    assert_eq!(p.x, 0.0);
    p.move_right(10.0);
    assert_eq!(p.x, (GAME_WIDTH - PLAYER_WIDTH) as f32);
}

#[test]
fn player_moves_by_speed_times_dt() {
    let mut p = Player::new();
    p.move_right(0.1);
    assert!((p.x - (PLAYER_START_X + PLAYER_SPEED * 0.1)).abs() < 1e-4);
}

// ── Shooting ──────────────────────────────────────────────────────────────────

#[test]
fn shoot_respects_cooldown() {
    let mut p = Player::new();
    let bullet = p.shoot().expect("first shot fires");
    assert!(bullet.is_player());
    assert_eq!(bullet.direction, -1);
    assert!(p.shoot().is_none());

    p.update(PLAYER_SHOOT_COOLDOWN);
    assert!(p.can_shoot());
    assert!(p.shoot().is_some());
}

#[test]
fn bullet_spawns_top_center() {
    let p = Player::new();
    let b = p.create_bullet();
    assert_eq!(b.x, PLAYER_START_X as i32 + 1);
    assert_eq!(b.y as i32, PLAYER_START_Y - 1);
}

#[test]
fn create_bullet_leaves_cooldown_alone() {
    let mut p = Player::new();
    p.shoot();
    let before = p.shoot_cooldown;
    p.create_bullet();
    p.create_bullet();
    assert_eq!(p.shoot_cooldown, before);

    let fresh = Player::new();
    fresh.create_bullet();
    assert!(fresh.can_shoot());
}

#[test]
fn reset_restores_start() {
    let mut p = Player::new();
    p.move_left(1.0);
    p.shoot();
    p.alive = false;
    p.reset();
    assert_eq!(p.x, PLAYER_START_X);
    assert_eq!(p.y, PLAYER_START_Y);
    assert!(p.alive);
    assert!(p.can_shoot());
}

// ── Bullets ───────────────────────────────────────────────────────────────────

#[test]
fn player_bullet_dies_past_top() {
    let mut b = Bullet::new(10, PLAY_AREA_TOP + 1, BulletOwner::Player);
    b.update(1.0 / BULLET_SPEED);
    assert!(b.alive);
    b.update(2.0 / BULLET_SPEED);
    assert!(!b.alive);
}

#[test]
fn alien_bullet_dies_past_bottom() {
    let mut b = Bullet::new(10, PLAY_AREA_BOTTOM - 1, BulletOwner::Alien);
    b.update(1.0 / BULLET_SPEED);
    assert!(b.alive);
    b.update(2.0 / BULLET_SPEED);
    assert!(!b.alive);
}

#[test]
fn bounds_truncate_continuous_coordinates() {
    let mut b = Bullet::new(5, 10, BulletOwner::Alien);
    b.y = 10.9;
    assert_eq!(b.bounds(), Bounds::new(5, 10, 1, 1));

    let mut a = Alien::new(7, 5, 0, 0);
    a.x = 7.99;
    assert_eq!(a.bounds().x, 7);
}

// ── Aliens and shields ────────────────────────────────────────────────────────

#[test]
fn tiers_follow_rows() {
    assert_eq!(AlienTier::for_row(0), AlienTier::Top);
    assert_eq!(AlienTier::for_row(1), AlienTier::Mid);
    assert_eq!(AlienTier::for_row(2), AlienTier::Mid);
    assert_eq!(AlienTier::for_row(3), AlienTier::Bottom);
    assert_eq!(AlienTier::for_row(6), AlienTier::Bottom);
}

#[test]
fn animation_swaps_skin_not_bounds() {
    let mut a = Alien::new(10, 5, 0, 0);
    let before = (a.sprite(), a.bounds());
    a.animated = true;
    assert_ne!(a.sprite(), before.0);
    assert_eq!(a.bounds(), before.1);
}

#[test]
fn shield_dies_at_zero_health() {
    let mut s = Shield::new(0, SHIELD_Y);
    for _ in 0..SHIELD_HEALTH - 1 {
        s.take_damage(1);
    }
    assert!(s.alive);
    s.take_damage(1);
    assert!(!s.alive);
}

#[test]
fn shields_are_evenly_spaced() {
    let shields = create_shields();
    assert_eq!(shields.len(), SHIELD_COUNT);
    let gaps: Vec<i32> = shields.windows(2).map(|w| w[1].x - w[0].x).collect();
    assert!(gaps.iter().all(|&g| g == gaps[0]));
    assert!(shields.iter().all(|s| s.y == SHIELD_Y && s.alive));
}

// ── Mystery ship ──────────────────────────────────────────────────────────────

#[test]
fn mystery_ship_enters_opposite_edge() {
    assert_eq!(MysteryShip::new(1).x, -MYSTERY_SHIP_WIDTH as f32);
    assert_eq!(MysteryShip::new(-1).x, GAME_WIDTH as f32);
}

#[test]
fn mystery_ship_despawns_off_screen() {
    let mut ship = MysteryShip::new(1);
    let crossing = (GAME_WIDTH + MYSTERY_SHIP_WIDTH) as f32 + MYSTERY_SHIP_EXIT_MARGIN;
    ship.update(crossing / MYSTERY_SHIP_SPEED - 0.5);
    assert!(ship.alive);
    ship.update(1.0);
    assert!(!ship.alive);
}
