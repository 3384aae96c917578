use crossterm::style::Color;

use super::{State, StateId};
use crate::config::GAME_WIDTH;
use crate::context::GameContext;
use crate::input::Key;
use crate::render::{put_centered, Surface};
use crate::settings::{GameMode, SOUND_ENABLED};

const HELP: &str = "↑↓ / WS: Navigate  |  ←→ / AD: Change  |  ENTER: Select  |  ESC / Q: Back";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionItem {
    GameMode,
    Sound,
    Back,
}

impl OptionItem {
    pub const ALL: [OptionItem; 3] = [OptionItem::GameMode, OptionItem::Sound, OptionItem::Back];
}

#[derive(Debug, Default)]
pub struct OptionsState {
    selected: usize,
}

impl OptionsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> OptionItem {
        OptionItem::ALL[self.selected]
    }

    fn change(&mut self, ctx: &mut GameContext, step: isize) {
        match self.selected() {
            OptionItem::GameMode => {
                let modes = GameMode::ALL;
                let current = modes
                    .iter()
                    .position(|&m| m == ctx.settings.game_mode())
                    .unwrap_or(0);
                let next = (current as isize + step).rem_euclid(modes.len() as isize) as usize;
                ctx.settings.apply_game_mode(modes[next]);
                tracing::debug!(mode = modes[next].as_str(), "game mode changed");
            }
            OptionItem::Sound => {
                let enabled = !ctx.settings.sound_enabled();
                ctx.settings.set(SOUND_ENABLED, enabled);
                ctx.audio.set_enabled(enabled);
            }
            OptionItem::Back => {}
        }
    }
}

impl State for OptionsState {
    fn enter(&mut self, _ctx: &mut GameContext, _from: Option<StateId>) {
        self.selected = 0;
    }

    fn exit(&mut self, ctx: &mut GameContext) {
        ctx.save_settings();
    }

    fn handle_input(&mut self, ctx: &mut GameContext, key: Key) {
        let n = OptionItem::ALL.len();
        if key.is_up() {
            self.selected = (self.selected + n - 1) % n;
        } else if key.is_down() {
            self.selected = (self.selected + 1) % n;
        } else if key.is_left() {
            self.change(ctx, -1);
        } else if key.is_right() {
            self.change(ctx, 1);
        } else if key.is_select() {
            if self.selected() == OptionItem::Back {
                ctx.request_state(StateId::Menu);
            } else {
                self.change(ctx, 1);
            }
        } else if key == Key::Escape || key.is_quit() {
            ctx.request_state(StateId::Menu);
        }
    }

    fn render(&self, ctx: &GameContext, surface: &mut dyn Surface) {
        put_centered(surface, 2, "⚙ OPTIONS ⚙", Color::Cyan);
        put_centered(surface, 3, "Customize Your Experience", Color::DarkGrey);

        let mut y = 6;
        for (i, item) in OptionItem::ALL.iter().enumerate() {
            let selected = i == self.selected;
            let color = if selected { Color::Yellow } else { Color::White };
            let (name, value) = match item {
                OptionItem::GameMode => ("GAME MODE", ctx.settings.game_mode().label()),
                OptionItem::Sound => (
                    "SOUND",
                    if ctx.settings.sound_enabled() { "On" } else { "Off" },
                ),
                OptionItem::Back => {
                    put_centered(surface, y + 1, "< Back to Menu", color);
                    continue;
                }
            };
            let indicator = if selected { "►" } else { " " };
            surface.put(10, y, &format!("{indicator} {name}"), color);
            let value_text = format!("< {value} >");
            surface.put(GAME_WIDTH - value_text.chars().count() as i32 - 10, y, &value_text, color);
            y += 2;
        }

        let help_y = surface.height() - 4;
        put_centered(surface, help_y, HELP, Color::DarkGrey);
        put_centered(
            surface,
            help_y - 3,
            ctx.settings.game_mode().description(),
            Color::DarkGrey,
        );
    }
}
