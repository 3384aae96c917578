use crossterm::style::Color;

use super::{State, StateId};
use crate::context::GameContext;
use crate::input::Key;
use crate::render::{put_centered, Surface};

/// Freezes the round. The playing screen stays visible underneath and is
/// resumed without a reset.
#[derive(Debug, Default)]
pub struct PausedState;

impl PausedState {
    pub fn new() -> Self {
        PausedState
    }
}

impl State for PausedState {
    fn handle_input(&mut self, ctx: &mut GameContext, key: Key) {
        if key.is_pause() {
            ctx.request_state(StateId::Playing);
        } else if key.is_quit() {
            ctx.request_state(StateId::Menu);
        }
    }

    fn render(&self, _ctx: &GameContext, surface: &mut dyn Surface) {
        let y = surface.height() / 2;
        put_centered(surface, y, "PAUSED", Color::Yellow);
        put_centered(surface, y + 2, "Press P to resume", Color::Cyan);
    }

    fn underlay(&self) -> Option<StateId> {
        Some(StateId::Playing)
    }
}
