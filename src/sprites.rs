//! Character-grid sprites.
//!
//! Collision extents are fixed per entity kind and never depend on which
//! skin is currently shown.

pub const PLAYER: [&str; 2] = [" ▲ ", "███"];
pub const PLAYER_WIDTH: i32 = 3;
pub const PLAYER_HEIGHT: i32 = 2;

pub const ALIEN_WIDTH: i32 = 5;
pub const ALIEN_HEIGHT: i32 = 2;

pub const ALIEN_TOP: [[&str; 2]; 2] = [[" ▄▀▄ ", "█▀█▀█"], [" ▀▄▀ ", "█▄█▄█"]];
pub const ALIEN_MID: [[&str; 2]; 2] = [[" ◢█◣ ", "▀███▀"], [" ◥█◤ ", "▄███▄"]];
pub const ALIEN_BOT: [[&str; 2]; 2] = [[" ╱█╲ ", "◢███◣"], [" ╲█╱ ", "◥███◤"]];

pub const MYSTERY_SHIP: &str = " <-O-> ";
pub const MYSTERY_SHIP_WIDTH: i32 = 7;
pub const MYSTERY_SHIP_HEIGHT: i32 = 1;

pub const PLAYER_BULLET: &str = "|";
pub const ALIEN_BULLET: &str = "!";

const SHIELD_FULL: [&str; 3] = ["████████", "███  ███", "██    ██"];
const SHIELD_DAMAGED_1: [&str; 3] = ["█ ██ ███", "███  █ █", "██   ██"];
const SHIELD_DAMAGED_2: [&str; 3] = ["█ ██  ██", "█ █  █ █", "█    ██"];
const SHIELD_DAMAGED_3: [&str; 3] = ["█  █  ██", "█ █   █ ", "█    █ "];

pub const EXPLOSION: [&str; 6] = [" * ", " ╳ ", "*╳*", "╳*╳", " * ", "   "];

/// Shield skin for a health fraction in `0.0..=1.0`.
pub fn shield(health_fraction: f32) -> [&'static str; 3] {
    if health_fraction > 0.75 {
        SHIELD_FULL
    } else if health_fraction > 0.5 {
        SHIELD_DAMAGED_1
    } else if health_fraction > 0.25 {
        SHIELD_DAMAGED_2
    } else {
        SHIELD_DAMAGED_3
    }
}
