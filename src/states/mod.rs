//! Screen state machine.
//!
//! Exactly one state is active. Every transition runs `exit` on the outgoing
//! state and then `enter` on the incoming one before any further input,
//! update or render happens. States never switch directly: they call
//! `GameContext::request_state` and the manager applies the request as soon
//! as the hook that made it returns.

mod game_over;
mod leaderboard;
mod menu;
mod options;
mod paused;
mod playing;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub use game_over::GameOverState;
pub use leaderboard::LeaderboardState;
pub use menu::MenuState;
pub use options::OptionsState;
pub use paused::PausedState;
pub use playing::PlayingState;

use crate::context::GameContext;
use crate::error::GameError;
use crate::input::Key;
use crate::render::Surface;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StateId {
    Menu,
    Playing,
    Paused,
    GameOver,
    Leaderboard,
    Options,
}

impl StateId {
    pub const ALL: [StateId; 6] = [
        StateId::Menu,
        StateId::Playing,
        StateId::Paused,
        StateId::GameOver,
        StateId::Leaderboard,
        StateId::Options,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StateId::Menu => "menu",
            StateId::Playing => "playing",
            StateId::Paused => "paused",
            StateId::GameOver => "game_over",
            StateId::Leaderboard => "leaderboard",
            StateId::Options => "options",
        }
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StateId {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StateId::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| GameError::UnknownState(s.to_string()))
    }
}

pub trait State {
    /// `from` is the state being left, `None` on the very first transition.
    fn enter(&mut self, _ctx: &mut GameContext, _from: Option<StateId>) {}
    fn exit(&mut self, _ctx: &mut GameContext) {}
    fn handle_input(&mut self, ctx: &mut GameContext, key: Key);
    fn update(&mut self, _ctx: &mut GameContext, _dt: f32) {}
    fn render(&self, ctx: &GameContext, surface: &mut dyn Surface);

    /// Whether held movement and fire keys should be replayed every frame.
    fn continuous_input(&self) -> bool {
        false
    }

    /// A state drawn underneath this one, e.g. the frozen game behind the
    /// pause overlay.
    fn underlay(&self) -> Option<StateId> {
        None
    }
}

#[derive(Default)]
pub struct StateManager {
    states: HashMap<StateId, Box<dyn State>>,
    current: Option<StateId>,
}

impl StateManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_state(&mut self, id: StateId, state: Box<dyn State>) {
        self.states.insert(id, state);
    }

    pub fn current(&self) -> Option<StateId> {
        self.current
    }

    pub fn change_state(&mut self, ctx: &mut GameContext, id: StateId) -> Result<(), GameError> {
        if !self.states.contains_key(&id) {
            return Err(GameError::UnknownState(id.name().to_string()));
        }
        let from = self.current;
        if let Some(state) = from.and_then(|old| self.states.get_mut(&old)) {
            state.exit(ctx);
        }
        self.current = Some(id);
        tracing::debug!(from = ?from.map(StateId::name), to = id.name(), "state change");
        if let Some(state) = self.states.get_mut(&id) {
            state.enter(ctx, from);
        }
        Ok(())
    }

    pub fn change_state_by_name(
        &mut self,
        ctx: &mut GameContext,
        name: &str,
    ) -> Result<(), GameError> {
        let id = name.parse()?;
        self.change_state(ctx, id)
    }

    /// Apply transitions requested by the last hook, including any requested
    /// from inside an `enter`.
    pub fn apply_pending(&mut self, ctx: &mut GameContext) -> Result<(), GameError> {
        while let Some(next) = ctx.take_pending() {
            self.change_state(ctx, next)?;
        }
        Ok(())
    }

    pub fn handle_input(&mut self, ctx: &mut GameContext, key: Key) -> Result<(), GameError> {
        if let Some(state) = self.active_mut() {
            state.handle_input(ctx, key);
        }
        self.apply_pending(ctx)
    }

    pub fn update(&mut self, ctx: &mut GameContext, dt: f32) -> Result<(), GameError> {
        if let Some(state) = self.active_mut() {
            state.update(ctx, dt);
        }
        self.apply_pending(ctx)
    }

    pub fn render(&self, ctx: &GameContext, surface: &mut dyn Surface) {
        let Some(state) = self.current.and_then(|id| self.states.get(&id)) else {
            return;
        };
        if let Some(under) = state.underlay().and_then(|id| self.states.get(&id)) {
            under.render(ctx, surface);
        }
        state.render(ctx, surface);
    }

    pub fn continuous_input(&self) -> bool {
        self.current
            .and_then(|id| self.states.get(&id))
            .is_some_and(|s| s.continuous_input())
    }

    fn active_mut(&mut self) -> Option<&mut Box<dyn State>> {
        let id = self.current?;
        self.states.get_mut(&id)
    }
}
