//! Top-level orchestration: the state manager plus the shared context,
//! advanced one frame at a time.

use crate::context::GameContext;
use crate::error::GameError;
use crate::input::Key;
use crate::render::{Canvas, Surface};
use crate::states::{
    GameOverState, LeaderboardState, MenuState, OptionsState, PausedState, PlayingState,
    StateId, StateManager,
};

pub struct Game {
    pub manager: StateManager,
    pub ctx: GameContext,
}

impl Game {
    /// Register every screen and enter the main menu.
    pub fn new(mut ctx: GameContext) -> Result<Self, GameError> {
        let mut manager = StateManager::new();
        manager.add_state(StateId::Menu, Box::new(MenuState::new()));
        manager.add_state(StateId::Playing, Box::new(PlayingState::new()));
        manager.add_state(StateId::Paused, Box::new(PausedState::new()));
        manager.add_state(StateId::GameOver, Box::new(GameOverState::new()));
        manager.add_state(StateId::Leaderboard, Box::new(LeaderboardState::new()));
        manager.add_state(StateId::Options, Box::new(OptionsState::new()));
        manager.change_state(&mut ctx, StateId::Menu)?;
        Ok(Game { manager, ctx })
    }

    /// One frame: dispatch input, then update. Ctrl+C stops the game
    /// before anything else is processed.
    pub fn step(&mut self, keys: &[Key], dt: f32) -> Result<(), GameError> {
        for &key in keys {
            if key == Key::Interrupt {
                tracing::info!("interrupted");
                self.ctx.quit();
                return Ok(());
            }
            if key.is_mute() && matches!(self.state(), Some(StateId::Playing | StateId::Paused)) {
                self.ctx.audio.toggle_mute();
            }
            self.manager.handle_input(&mut self.ctx, key)?;
            if !self.ctx.running {
                return Ok(());
            }
        }
        self.manager.update(&mut self.ctx, dt)
    }

    pub fn render(&self, canvas: &mut Canvas) {
        canvas.clear();
        self.manager.render(&self.ctx, canvas);
    }

    pub fn state(&self) -> Option<StateId> {
        self.manager.current()
    }

    pub fn wants_continuous_input(&self) -> bool {
        self.manager.continuous_input()
    }

    pub fn is_running(&self) -> bool {
        self.ctx.running
    }
}
