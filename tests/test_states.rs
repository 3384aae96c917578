use std::cell::RefCell;
use std::rc::Rc;

use tty_invaders::config::*;
use tty_invaders::context::GameContext;
use tty_invaders::entities::{Bullet, BulletOwner};
use tty_invaders::error::GameError;
use tty_invaders::game::Game;
use tty_invaders::input::Key;
use tty_invaders::render::{Canvas, Surface};
use tty_invaders::highscores::HighScoreStore;
use tty_invaders::settings::{GameMode, SettingsStore, INVINCIBLE, RAPID_FIRE};
use tty_invaders::sprites::{ALIEN_HEIGHT, PLAYER_WIDTH};
use tty_invaders::states::*;

const DT: f32 = 1.0 / 60.0;

fn playing(ctx: &mut GameContext) -> PlayingState {
    let mut state = PlayingState::new();
    state.enter(ctx, Some(StateId::Menu));
    state
}

fn alien_bullet_on_player(state: &PlayingState) -> Bullet {
    let p = state.player();
    Bullet::new(p.x as i32 + 1, p.y, BulletOwner::Alien)
}

fn new_game() -> Game {
    Game::new(GameContext::seeded(42)).unwrap()
}

// ── Playing: movement and shooting ────────────────────────────────────────────

#[test]
fn holding_right_reaches_clamp_exactly() {
    let mut ctx = GameContext::seeded(1);
    let mut state = playing(&mut ctx);
    for _ in 0..60 {
        state.handle_input(&mut ctx, Key::Right);
        state.update(&mut ctx, DT);
    }
    assert_eq!(state.player().x, (GAME_WIDTH - PLAYER_WIDTH) as f32);
}

#[test]
fn no_input_means_no_movement() {
    let mut ctx = GameContext::seeded(1);
    let mut state = playing(&mut ctx);
    state.update(&mut ctx, DT);
    state.handle_input(&mut ctx, Key::Left);
    state.update(&mut ctx, DT);
    let x = state.player().x;
    state.update(&mut ctx, DT);
    assert_eq!(state.player().x, x);
}

#[test]
fn cooldown_limits_fire_rate() {
    let mut ctx = GameContext::seeded(1);
    let mut state = playing(&mut ctx);
    for _ in 0..2 {
        state.handle_input(&mut ctx, Key::Fire);
        state.update(&mut ctx, DT);
    }
    assert_eq!(state.shot_count(), 1);
    assert_eq!(state.bullets().iter().filter(|b| b.is_player()).count(), 1);
}

#[test]
fn rapid_fire_ignores_cooldown() {
    let mut ctx = GameContext::seeded(1);
    ctx.settings.set(RAPID_FIRE, true);
    let mut state = playing(&mut ctx);
    for _ in 0..3 {
        state.handle_input(&mut ctx, Key::Fire);
        state.update(&mut ctx, DT);
    }
    assert_eq!(state.shot_count(), 3);
}

#[test]
fn player_speed_multiplier_applies() {
    let mut ctx = GameContext::seeded(1);
    ctx.settings.apply_game_mode(GameMode::Turbo);
    let mut state = playing(&mut ctx);
    state.handle_input(&mut ctx, Key::Left);
    state.update(&mut ctx, 0.1);
    assert!((state.player().x - (PLAYER_START_X - PLAYER_SPEED * 2.0 * 0.1)).abs() < 1e-3);
}

// ── Playing: hits and game over ───────────────────────────────────────────────

#[test]
fn three_hits_end_the_game() {
    let mut ctx = GameContext::seeded(2);
    let mut state = playing(&mut ctx);
    for lives_left in (0..PLAYER_LIVES).rev() {
        state.add_bullet(alien_bullet_on_player(&state));
        state.update(&mut ctx, DT);
        assert_eq!(ctx.lives, lives_left);
    }
    assert!(!state.player().alive);
    assert_eq!(ctx.pending_state(), Some(StateId::GameOver));
}

#[test]
fn non_fatal_hit_respawns_and_clears_bullets() {
    let mut ctx = GameContext::seeded(2);
    let mut state = playing(&mut ctx);
    state.handle_input(&mut ctx, Key::Right);
    state.update(&mut ctx, DT);
    state.add_bullet(Bullet::new(5, 10, BulletOwner::Alien));
    assert!(!state.player_hit(&mut ctx));
    assert_eq!(ctx.lives, PLAYER_LIVES - 1);
    assert_eq!(state.player().x, PLAYER_START_X);
    assert!(state.bullets().is_empty());
    assert_eq!(state.effects().explosions.len(), 1);
    assert_eq!(ctx.pending_state(), None);
}

#[test]
fn invincible_hits_are_cosmetic() {
    let mut ctx = GameContext::seeded(3);
    ctx.settings.set(INVINCIBLE, true);
    let mut state = playing(&mut ctx);
    for _ in 0..5 {
        assert!(!state.player_hit(&mut ctx));
    }
    assert_eq!(ctx.lives, PLAYER_LIVES);
    assert!(state.player().alive);
    assert_eq!(state.effects().explosions.len(), 5);
    assert_eq!(ctx.pending_state(), None);
}

#[test]
fn kill_scores_before_player_hit() {
    let mut ctx = GameContext::seeded(4);
    ctx.lives = 1;
    let mut state = playing(&mut ctx);
    ctx.lives = 1;

    let target = state.formation().aliens[0].clone();
    state.add_bullet(Bullet::new(target.x as i32 + 1, target.y + 1, BulletOwner::Player));
    state.add_bullet(alien_bullet_on_player(&state));
    state.update(&mut ctx, DT);

    assert_eq!(ctx.scores.score, SCORE_ALIEN_TOP);
    assert_eq!(ctx.pending_state(), Some(StateId::GameOver));
}

#[test]
fn two_bullets_on_one_alien_score_once() {
    let mut ctx = GameContext::seeded(4);
    let mut state = playing(&mut ctx);
    let total = state.formation().aliens.len();

    let target = state.formation().aliens[0].clone();
    state.add_bullet(Bullet::new(target.x as i32 + 1, target.y + 2, BulletOwner::Player));
    state.add_bullet(Bullet::new(target.x as i32 + 3, target.y + 2, BulletOwner::Player));
    state.update(&mut ctx, DT);

    assert_eq!(state.formation().alive_count(), total - 1);
    assert_eq!(ctx.scores.score, SCORE_ALIEN_TOP);
    assert_eq!(state.effects().explosions.len(), 1);
    // The second bullet was not spent on the dead alien.
    assert_eq!(state.bullets().iter().filter(|b| b.is_player()).count(), 1);
}

#[test]
fn alien_bullet_chips_one_shield() {
    let mut ctx = GameContext::seeded(10);
    let mut state = playing(&mut ctx);
    let shield = state.shields()[0].clone();
    state.add_bullet(Bullet::new(shield.x + 2, shield.y, BulletOwner::Alien));
    state.update(&mut ctx, DT);

    assert_eq!(state.shields()[0].health, SHIELD_HEALTH - 1);
    assert!(state.shields()[1..].iter().all(|s| s.health == SHIELD_HEALTH));
    assert!(state.bullets().iter().all(|b| b.is_player()));
    assert_eq!(ctx.lives, PLAYER_LIVES);
}

#[test]
fn alien_touching_player_costs_a_life() {
    let mut ctx = GameContext::seeded(11);
    let mut state = playing(&mut ctx);
    let (px, py) = (state.player().x, state.player().y);
    let alien = &mut state.formation_mut().aliens[0];
    alien.x = px;
    alien.y = py - 1;
    state.update(&mut ctx, DT);

    assert_eq!(ctx.lives, PLAYER_LIVES - 1);
    assert_eq!(ctx.pending_state(), None);
}

#[test]
fn alien_at_bottom_costs_a_life() {
    let mut ctx = GameContext::seeded(12);
    let mut state = playing(&mut ctx);
    let alien = &mut state.formation_mut().aliens[0];
    alien.x = 0.0;
    alien.y = PLAY_AREA_BOTTOM - ALIEN_HEIGHT;
    state.update(&mut ctx, DT);
    assert_eq!(ctx.lives, PLAYER_LIVES - 1);
}

#[test]
fn alien_at_bottom_spares_invincible_player() {
    let mut ctx = GameContext::seeded(12);
    ctx.settings.set(INVINCIBLE, true);
    let mut state = playing(&mut ctx);
    let alien = &mut state.formation_mut().aliens[0];
    alien.x = 0.0;
    alien.y = PLAY_AREA_BOTTOM - ALIEN_HEIGHT;
    state.update(&mut ctx, DT);
    assert_eq!(ctx.lives, PLAYER_LIVES);
}

#[test]
fn twenty_third_shot_earns_mystery_bonus() {
    let mut ctx = GameContext::seeded(13);
    ctx.settings.set(RAPID_FIRE, true);
    ctx.settings.set(INVINCIBLE, true);
    let mut state = playing(&mut ctx);
    for _ in 0..MYSTERY_BONUS_FIRST_SHOT {
        state.handle_input(&mut ctx, Key::Fire);
        state.update(&mut ctx, DT);
    }
    assert_eq!(state.shot_count(), MYSTERY_BONUS_FIRST_SHOT);

    // Let every player bullet leave the field.
    for _ in 0..20 {
        state.update(&mut ctx, 0.05);
    }
    assert!(!state.bullets().iter().any(|b| b.is_player()));

    let before = ctx.scores.score;
    state.spawn_mystery_ship(1);
    state.add_bullet(Bullet::new(-4, PLAY_AREA_TOP + 1, BulletOwner::Player));
    state.update(&mut ctx, DT);

    assert!(!state.mystery_ship().is_some_and(|s| s.alive));
    assert_eq!(ctx.scores.score, before + MYSTERY_BONUS);
}

#[test]
fn pause_drops_pending_movement() {
    let mut ctx = GameContext::seeded(14);
    let mut state = playing(&mut ctx);
    state.handle_input(&mut ctx, Key::Left);
    state.handle_input(&mut ctx, Key::Char('p'));
    state.exit(&mut ctx);

    state.enter(&mut ctx, Some(StateId::Paused));
    state.update(&mut ctx, DT);
    assert_eq!(state.player().x, PLAYER_START_X);
}

// ── Playing: level flow and mystery ship ──────────────────────────────────────

#[test]
fn clearing_formation_advances_level() {
    let mut ctx = GameContext::seeded(5);
    let mut state = playing(&mut ctx);
    state
        .formation_mut()
        .aliens
        .iter_mut()
        .for_each(|a| a.alive = false);
    state.update(&mut ctx, DT);

    assert_eq!(ctx.level, 2);
    assert_eq!(state.formation().level, 2);
    assert!(!state.formation().is_cleared());
    assert_eq!(state.shields().len(), SHIELD_COUNT);
    assert!(state.bullets().is_empty());
}

#[test]
fn mystery_ship_spawns_on_interval() {
    let mut ctx = GameContext::seeded(6);
    ctx.settings.set(INVINCIBLE, true);
    let mut state = playing(&mut ctx);
    let steps = (MYSTERY_SHIP_INTERVAL / 0.5) as usize;
    for _ in 0..steps - 1 {
        state.update(&mut ctx, 0.5);
    }
    assert!(state.mystery_ship().is_none());
    state.update(&mut ctx, 0.5);
    assert!(state.mystery_ship().is_some());
}

#[test]
fn enter_resets_the_round() {
    let mut ctx = GameContext::seeded(7);
    let mut state = playing(&mut ctx);
    ctx.scores.add(990);
    ctx.level = 4;
    ctx.lives = 1;
    state.enter(&mut ctx, Some(StateId::GameOver));
    assert_eq!(ctx.scores.score, 0);
    assert_eq!(ctx.level, 1);
    assert_eq!(ctx.lives, PLAYER_LIVES);
    assert_eq!(state.shot_count(), 0);
}

#[test]
fn chaos_mode_keeps_running() {
    let mut ctx = GameContext::seeded(8);
    ctx.settings.apply_game_mode(GameMode::SuperDuperCrazy);
    ctx.settings.set(INVINCIBLE, true);
    let mut state = playing(&mut ctx);
    for _ in 0..600 {
        state.handle_input(&mut ctx, Key::Fire);
        state.update(&mut ctx, DT);
    }
    assert_eq!(ctx.lives, PLAYER_LIVES);
    assert!(state.shot_count() > 0);
}

// ── State manager ─────────────────────────────────────────────────────────────

struct Recorder {
    name: &'static str,
    log: Rc<RefCell<Vec<String>>>,
}

impl State for Recorder {
    fn enter(&mut self, _ctx: &mut GameContext, _from: Option<StateId>) {
        self.log.borrow_mut().push(format!("enter {}", self.name));
    }

    fn exit(&mut self, _ctx: &mut GameContext) {
        self.log.borrow_mut().push(format!("exit {}", self.name));
    }

    fn handle_input(&mut self, ctx: &mut GameContext, key: Key) {
        if key == Key::Enter {
            ctx.request_state(StateId::Options);
        }
    }

    fn render(&self, _ctx: &GameContext, _surface: &mut dyn Surface) {}
}

#[test]
fn transitions_pair_exit_and_enter() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut ctx = GameContext::seeded(0);
    let mut manager = StateManager::new();
    for (id, name) in [(StateId::Menu, "menu"), (StateId::Options, "options")] {
        let log = Rc::clone(&log);
        manager.add_state(id, Box::new(Recorder { name, log }));
    }

    manager.change_state(&mut ctx, StateId::Menu).unwrap();
    manager.handle_input(&mut ctx, Key::Enter).unwrap();
    assert_eq!(manager.current(), Some(StateId::Options));
    assert_eq!(
        *log.borrow(),
        ["enter menu", "exit menu", "enter options"]
    );
}

#[test]
fn unknown_state_is_an_error() {
    let mut ctx = GameContext::seeded(0);
    let mut manager = StateManager::new();
    manager.add_state(StateId::Menu, Box::new(MenuState::new()));

    assert!(matches!(
        "bogus".parse::<StateId>(),
        Err(GameError::UnknownState(name)) if name == "bogus"
    ));
    assert!(manager.change_state_by_name(&mut ctx, "bogus").is_err());
    assert!(matches!(
        manager.change_state(&mut ctx, StateId::Options),
        Err(GameError::UnknownState(_))
    ));
    assert_eq!(manager.current(), None);
    manager.change_state_by_name(&mut ctx, "menu").unwrap();
    assert_eq!(manager.current(), Some(StateId::Menu));
}

// ── Whole game ────────────────────────────────────────────────────────────────

#[test]
fn starts_on_menu() {
    let game = new_game();
    assert_eq!(game.state(), Some(StateId::Menu));
    assert!(!game.wants_continuous_input());
    let mut canvas = Canvas::default();
    game.render(&mut canvas);
    assert!(canvas.contains("TTY INVADERS"));
    assert!(canvas.contains("► Start Game"));
}

#[test]
fn menu_quit_stops_the_game() {
    let mut game = new_game();
    game.step(&[Key::Down, Key::Down, Key::Down, Key::Enter], DT).unwrap();
    assert!(!game.is_running());
}

#[test]
fn interrupt_stops_immediately() {
    let mut game = new_game();
    game.step(&[Key::Enter], DT).unwrap();
    game.step(&[Key::Interrupt, Key::Char('p')], DT).unwrap();
    assert!(!game.is_running());
    assert_eq!(game.state(), Some(StateId::Playing));
}

#[test]
fn pause_and_resume_keep_the_round() {
    let mut game = new_game();
    game.step(&[Key::Enter], DT).unwrap();
    assert_eq!(game.state(), Some(StateId::Playing));
    assert!(game.wants_continuous_input());

    game.ctx.scores.add(500);
    game.ctx.level = 3;
    game.step(&[Key::Char('p')], DT).unwrap();
    assert_eq!(game.state(), Some(StateId::Paused));

    let mut canvas = Canvas::default();
    game.render(&mut canvas);
    assert!(canvas.contains("PAUSED"));
    assert!(canvas.contains("SCORE: 000500"));

    game.step(&[Key::Escape], DT).unwrap();
    assert_eq!(game.state(), Some(StateId::Playing));
    assert_eq!(game.ctx.scores.score, 500);
    assert_eq!(game.ctx.level, 3);
}

#[test]
fn quit_from_pause_returns_to_menu() {
    let mut game = new_game();
    game.step(&[Key::Enter], DT).unwrap();
    game.step(&[Key::Char('p')], DT).unwrap();
    game.step(&[Key::Char('q')], DT).unwrap();
    assert_eq!(game.state(), Some(StateId::Menu));
    assert!(game.is_running());
}

#[test]
fn idle_game_ends_and_records_name() {
    let mut game = new_game();
    game.step(&[Key::Enter], DT).unwrap();
    for _ in 0..20_000 {
        if game.state() == Some(StateId::GameOver) {
            break;
        }
        game.step(&[], DT).unwrap();
    }
    assert_eq!(game.state(), Some(StateId::GameOver));
    assert_eq!(game.ctx.lives, 0);

    let keys = [Key::Char('a'), Key::Char('1'), Key::Char('b'), Key::Char('c'), Key::Char('d')];
    game.step(&keys, DT).unwrap();
    game.step(&[Key::Enter], DT).unwrap();
    assert_eq!(game.ctx.high_scores.len(), 1);
    assert_eq!(game.ctx.high_scores.entries()[0].name, "ABC");

    // Any key only returns to the menu once the wait is over.
    game.step(&[Key::Char('x')], DT).unwrap();
    assert_eq!(game.state(), Some(StateId::GameOver));
    for _ in 0..(GAME_OVER_WAIT / DT) as usize + 2 {
        game.step(&[], DT).unwrap();
    }
    game.step(&[Key::Char('x')], DT).unwrap();
    assert_eq!(game.state(), Some(StateId::Menu));
}

#[test]
fn leaderboard_lists_scores_and_returns() {
    let mut game = new_game();
    game.ctx.high_scores.add("ACE", 4200, 5, "turbo");
    game.step(&[Key::Down, Key::Down, Key::Enter], DT).unwrap();
    assert_eq!(game.state(), Some(StateId::Leaderboard));

    let mut canvas = Canvas::default();
    game.render(&mut canvas);
    assert!(canvas.contains("HIGH SCORES"));
    assert!(canvas.contains("ACE"));
    assert!(canvas.contains("TRB"));

    game.step(&[Key::Char('z')], DT).unwrap();
    assert_eq!(game.state(), Some(StateId::Menu));
}

#[test]
fn options_change_mode_and_sound() {
    let mut game = new_game();
    game.step(&[Key::Down, Key::Enter], DT).unwrap();
    assert_eq!(game.state(), Some(StateId::Options));

    game.step(&[Key::Right], DT).unwrap();
    assert_eq!(game.ctx.settings.game_mode(), GameMode::SlowMo);
    game.step(&[Key::Left, Key::Left], DT).unwrap();
    assert_eq!(game.ctx.settings.game_mode(), GameMode::SuperDuperCrazy);

    game.step(&[Key::Down, Key::Enter], DT).unwrap();
    assert!(!game.ctx.settings.sound_enabled());

    game.step(&[Key::Escape], DT).unwrap();
    assert_eq!(game.state(), Some(StateId::Menu));
}

#[test]
fn options_persist_on_exit() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = GameContext::seeded(9).with_persistence(
        SettingsStore::new(dir.path().join("settings.json")),
        HighScoreStore::new(dir.path().join("scores.json")),
    );
    let mut game = Game::new(ctx).unwrap();
    game.step(&[Key::Down, Key::Enter], DT).unwrap();
    game.step(&[Key::Right], DT).unwrap();
    game.step(&[Key::Char('q')], DT).unwrap();

    let reloaded = SettingsStore::new(dir.path().join("settings.json")).load();
    assert_eq!(reloaded.game_mode(), GameMode::SlowMo);
}
