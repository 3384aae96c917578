use crossterm::style::Color;

use super::{State, StateId};
use crate::context::GameContext;
use crate::input::Key;
use crate::render::{draw_frame, put_centered, Surface};

const TITLE: &str = "TTY INVADERS";
const FOOTER: &str = "Use ↑↓ or WS to navigate, ENTER/SPACE to select, Q/ESC to quit";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuItem {
    Start,
    Options,
    Leaderboard,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [
        MenuItem::Start,
        MenuItem::Options,
        MenuItem::Leaderboard,
        MenuItem::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            MenuItem::Start => "Start Game",
            MenuItem::Options => "Options",
            MenuItem::Leaderboard => "Leaderboard",
            MenuItem::Quit => "Quit",
        }
    }
}

#[derive(Debug, Default)]
pub struct MenuState {
    selected: usize,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> MenuItem {
        MenuItem::ALL[self.selected]
    }

    fn select(&self, ctx: &mut GameContext) {
        match self.selected() {
            MenuItem::Start => ctx.request_state(StateId::Playing),
            MenuItem::Options => ctx.request_state(StateId::Options),
            MenuItem::Leaderboard => ctx.request_state(StateId::Leaderboard),
            MenuItem::Quit => ctx.quit(),
        }
    }
}

impl State for MenuState {
    fn enter(&mut self, _ctx: &mut GameContext, _from: Option<StateId>) {
        self.selected = 0;
    }

    fn handle_input(&mut self, ctx: &mut GameContext, key: Key) {
        let n = MenuItem::ALL.len();
        if key.is_up() {
            self.selected = (self.selected + n - 1) % n;
        } else if key.is_down() {
            self.selected = (self.selected + 1) % n;
        } else if key.is_select() {
            self.select(ctx);
        } else if key.is_quit() || key == Key::Escape {
            ctx.quit();
        }
    }

    fn render(&self, _ctx: &GameContext, surface: &mut dyn Surface) {
        let h = surface.height();
        draw_frame(surface, Color::Cyan);
        put_centered(surface, h / 4, TITLE, Color::Cyan);

        let start_y = h / 2 - MenuItem::ALL.len() as i32;
        for (i, item) in MenuItem::ALL.iter().enumerate() {
            let selected = i == self.selected;
            let prefix = if selected { "► " } else { "  " };
            let color = if selected { Color::White } else { Color::Grey };
            put_centered(
                surface,
                start_y + i as i32 * 2,
                &format!("{prefix}{}", item.label()),
                color,
            );
        }

        put_centered(surface, h - 3, FOOTER, Color::DarkGrey);
    }
}
