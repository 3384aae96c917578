//! Frame pacing.

use std::time::{Duration, Instant};

pub struct FrameTimer {
    frame_time: Duration,
    last: Option<Instant>,
}

impl FrameTimer {
    pub fn new(fps: u32) -> Self {
        FrameTimer {
            frame_time: Duration::from_secs_f64(1.0 / f64::from(fps.max(1))),
            last: None,
        }
    }

    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    /// Seconds since the previous tick. The first tick reports one nominal
    /// frame so the simulation never sees a spurious start-up spike.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last),
            None => self.frame_time,
        };
        self.last = Some(now);
        dt.as_secs_f32()
    }

    /// How long to sleep at `now` to hold the target frame period.
    pub fn remaining_at(&self, now: Instant) -> Duration {
        match self.last {
            Some(last) => self
                .frame_time
                .saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }

    pub fn sleep_remaining(&self) {
        let remaining = self.remaining_at(Instant::now());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
    }
}
