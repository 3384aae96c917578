use crossterm::style::Color;

use super::{State, StateId};
use crate::audio::Cue;
use crate::config::{GAME_OVER_WAIT, HIGH_SCORE_NAME_LEN};
use crate::context::GameContext;
use crate::input::Key;
use crate::render::{put_centered, Surface};

#[derive(Debug, Default)]
pub struct GameOverState {
    is_high_score: bool,
    entering_name: bool,
    name: String,
    wait_time: f32,
    rank: usize,
}

impl GameOverState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_entering_name(&self) -> bool {
        self.entering_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rank earned by the recorded entry, 0 until one is recorded.
    pub fn rank(&self) -> usize {
        self.rank
    }

    fn enter_name_key(&mut self, ctx: &mut GameContext, key: Key) {
        match key {
            Key::Enter | Key::Fire => {
                if self.name.chars().count() == HIGH_SCORE_NAME_LEN {
                    self.rank = ctx.record_high_score(&self.name);
                    tracing::info!(name = %self.name, rank = self.rank, "high score recorded");
                    self.entering_name = false;
                }
            }
            Key::Backspace => {
                self.name.pop();
            }
            Key::Char(c) if c.is_ascii_alphabetic() => {
                if self.name.chars().count() < HIGH_SCORE_NAME_LEN {
                    self.name.push(c.to_ascii_uppercase());
                }
            }
            _ => {}
        }
    }
}

impl State for GameOverState {
    fn enter(&mut self, ctx: &mut GameContext, _from: Option<StateId>) {
        ctx.play(Cue::GameOver);
        self.is_high_score = ctx.high_scores.is_high_score(ctx.scores.score);
        self.entering_name = self.is_high_score;
        self.name.clear();
        self.wait_time = 0.0;
        self.rank = 0;
    }

    fn handle_input(&mut self, ctx: &mut GameContext, key: Key) {
        if self.entering_name {
            self.enter_name_key(ctx, key);
        } else if self.wait_time > GAME_OVER_WAIT {
            ctx.request_state(StateId::Menu);
        }
    }

    fn update(&mut self, _ctx: &mut GameContext, dt: f32) {
        self.wait_time += dt;
    }

    fn render(&self, ctx: &GameContext, surface: &mut dyn Surface) {
        let h = surface.height();
        let mut y = h / 2 - 2;
        put_centered(surface, y, "GAME OVER", Color::Red);
        y += 2;
        put_centered(
            surface,
            y,
            &format!("FINAL SCORE: {:06}", ctx.scores.score),
            Color::Cyan,
        );
        if self.is_high_score {
            put_centered(surface, y + 2, "NEW HIGH SCORE!", Color::Yellow);
        }

        let prompt_y = h / 2 + 4;
        if self.entering_name {
            let pad = HIGH_SCORE_NAME_LEN.saturating_sub(self.name.chars().count());
            put_centered(surface, prompt_y, "Enter name (3 letters):", Color::White);
            put_centered(
                surface,
                prompt_y + 2,
                &format!("{}{}", self.name, "_".repeat(pad)),
                Color::Yellow,
            );
        } else if self.wait_time > GAME_OVER_WAIT {
            put_centered(surface, prompt_y, "Press any key to continue", Color::DarkGrey);
        }
    }
}
