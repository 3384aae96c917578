//! Keyboard input: decoding crossterm events into the keys the states
//! understand, and the hold-window model for continuous movement.
//!
//! Many terminals never report key releases; a key is treated as held while
//! its press/repeat events keep arriving within the hold window. Terminals
//! with keyboard enhancement (kitty protocol) report releases, which end the
//! hold immediately.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Fire,
    Enter,
    Backspace,
    Escape,
    Char(char),
    /// Ctrl+C.
    Interrupt,
}

impl Key {
    pub fn is_left(self) -> bool {
        matches!(self, Key::Left | Key::Char('a' | 'A'))
    }

    pub fn is_right(self) -> bool {
        matches!(self, Key::Right | Key::Char('d' | 'D'))
    }

    pub fn is_up(self) -> bool {
        matches!(self, Key::Up | Key::Char('w' | 'W'))
    }

    pub fn is_down(self) -> bool {
        matches!(self, Key::Down | Key::Char('s' | 'S'))
    }

    pub fn is_select(self) -> bool {
        matches!(self, Key::Enter | Key::Fire)
    }

    pub fn is_pause(self) -> bool {
        matches!(self, Key::Escape | Key::Char('p' | 'P'))
    }

    pub fn is_quit(self) -> bool {
        matches!(self, Key::Char('q' | 'Q'))
    }

    pub fn is_mute(self) -> bool {
        matches!(self, Key::Char('m' | 'M'))
    }

    /// Keys replayed every frame while held during gameplay.
    pub fn is_continuous(self) -> bool {
        self.is_left() || self.is_right() || self == Key::Fire
    }
}

pub fn decode(event: &KeyEvent) -> Option<Key> {
    let key = match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Key::Interrupt,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Char(' ') => Key::Fire,
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace | KeyCode::Delete => Key::Backspace,
        KeyCode::Esc => Key::Escape,
        KeyCode::Char(c) => Key::Char(c),
        _ => return None,
    };
    Some(key)
}

/// Hold window in frames for a given frame rate (about 130 ms).
pub fn hold_frames_for_fps(fps: u32) -> u64 {
    (u64::from(fps) * 130).div_ceil(1000).max(1)
}

pub struct InputDecoder {
    /// Continuous key -> frame it was last pressed or repeated.
    held: HashMap<Key, u64>,
    hold_window: u64,
}

impl InputDecoder {
    pub fn new(hold_window: u64) -> Self {
        InputDecoder {
            held: HashMap::new(),
            hold_window,
        }
    }

    /// Record one terminal event. Returns the key for presses and repeats;
    /// releases only end a hold.
    pub fn feed(&mut self, event: &KeyEvent, frame: u64) -> Option<Key> {
        let key = decode(event)?;
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if key.is_continuous() {
                    self.held.insert(key, frame);
                }
                Some(key)
            }
            KeyEventKind::Release => {
                self.held.remove(&key);
                None
            }
        }
    }

    /// Continuous keys still inside the hold window at `frame`.
    pub fn held(&mut self, frame: u64) -> Vec<Key> {
        let window = self.hold_window;
        self.held
            .retain(|_, &mut last| frame.saturating_sub(last) <= window);
        let mut keys: Vec<Key> = self.held.keys().copied().collect();
        keys.sort();
        keys
    }

    /// Fresh keys for this frame, topped up with held keys when the active
    /// screen wants continuous input.
    pub fn frame_keys(&mut self, fresh: Vec<Key>, frame: u64, continuous: bool) -> Vec<Key> {
        let mut keys = fresh;
        if continuous {
            for key in self.held(frame) {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
        keys
    }
}
