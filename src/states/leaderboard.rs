use crossterm::style::Color;

use super::{State, StateId};
use crate::context::GameContext;
use crate::input::Key;
use crate::render::{draw_frame, put_centered, Surface};
use crate::settings::GameMode;

const HEADER: &str = "  RANK  NAME   SCORE    LVL  MODE";

#[derive(Debug, Default)]
pub struct LeaderboardState;

impl LeaderboardState {
    pub fn new() -> Self {
        LeaderboardState
    }
}

fn rank_color(rank: usize) -> Color {
    match rank {
        1 => Color::Yellow,
        2 | 3 => Color::White,
        _ => Color::DarkGrey,
    }
}

impl State for LeaderboardState {
    fn handle_input(&mut self, ctx: &mut GameContext, _key: Key) {
        ctx.request_state(StateId::Menu);
    }

    fn render(&self, ctx: &GameContext, surface: &mut dyn Surface) {
        let h = surface.height();
        draw_frame(surface, Color::Cyan);
        put_centered(surface, 2, "HIGH SCORES", Color::Cyan);

        let entries = ctx.high_scores.entries();
        if entries.is_empty() {
            put_centered(surface, h / 2, "No high scores yet!", Color::DarkGrey);
        } else {
            let header_y = 5;
            put_centered(surface, header_y, HEADER, Color::White);
            let rule = format!("  {}", "─".repeat(HEADER.len() - 2));
            put_centered(surface, header_y + 1, &rule, Color::DarkGrey);

            for (i, entry) in entries.iter().enumerate() {
                let rank = i + 1;
                let mode = GameMode::parse(&entry.game_mode).unwrap_or_default();
                let line = format!(
                    "  {rank:2}.  {:<5}  {:6}   {:3}  {}",
                    entry.name,
                    entry.score,
                    entry.level,
                    mode.short_code()
                );
                put_centered(surface, header_y + 1 + rank as i32, &line, rank_color(rank));
            }
        }

        put_centered(surface, h - 3, "Press any key to return to menu", Color::DarkGrey);
    }
}
