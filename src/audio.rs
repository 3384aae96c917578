//! Fire-and-forget sound cues.

use std::io::Write;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Shoot,
    Explosion,
    GameOver,
    LevelComplete,
}

impl Cue {
    pub fn name(self) -> &'static str {
        match self {
            Cue::Shoot => "shoot",
            Cue::Explosion => "explosion",
            Cue::GameOver => "game_over",
            Cue::LevelComplete => "level_complete",
        }
    }
}

/// The core never waits on, or reads anything back from, an audio sink.
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
    fn set_enabled(&mut self, enabled: bool);
    fn toggle_mute(&mut self);
}

/// Rings the terminal bell for every cue.
pub struct BellAudio<W: Write> {
    out: W,
    enabled: bool,
    muted: bool,
}

impl<W: Write> BellAudio<W> {
    pub fn new(out: W, enabled: bool) -> Self {
        BellAudio {
            out,
            enabled,
            muted: false,
        }
    }

    pub fn can_play(&self) -> bool {
        self.enabled && !self.muted
    }
}

impl<W: Write> AudioSink for BellAudio<W> {
    fn play(&mut self, cue: Cue) {
        if !self.can_play() {
            return;
        }
        tracing::trace!(cue = cue.name(), "bell");
        // A failed bell is not worth interrupting the frame for.
        let _ = self.out.write_all(b"\x07").and_then(|()| self.out.flush());
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }
}

/// Discards every cue.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: Cue) {}
    fn set_enabled(&mut self, _enabled: bool) {}
    fn toggle_mute(&mut self) {}
}
