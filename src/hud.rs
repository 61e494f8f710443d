//! Scoreboard values
//!
//! Read-only view of the session for the HUD, plus a wall-clock FPS estimate.

use serde::Serialize;

use crate::consts::FPS_WINDOW_MS;
use crate::sim::Session;

/// Values shown in the scoreboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scoreboard {
    /// Elapsed game time, two decimals
    pub time: String,
    pub score: u64,
    pub lives: i32,
    pub fps: u32,
}

impl Scoreboard {
    pub fn from_session(session: &Session, fps: u32) -> Self {
        Self {
            time: format!("{:.2}", session.elapsed_secs),
            score: session.score,
            lives: session.lives,
            fps,
        }
    }
}

/// Counts frames over one-second windows of wall-clock time
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    frames: u32,
    window_start: Option<f64>,
    fps: u32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new window at `now` (ms), e.g. after a pause
    pub fn restart_window(&mut self, now: f64) {
        self.frames = 0;
        self.window_start = Some(now);
    }

    /// Count a frame. Returns the new estimate when a window closes.
    pub fn frame(&mut self, now: f64) -> Option<u32> {
        self.frames += 1;
        let start = *self.window_start.get_or_insert(now);
        if now - start >= FPS_WINDOW_MS {
            self.fps = self.frames;
            self.frames = 0;
            self.window_start = Some(now);
            return Some(self.fps);
        }
        None
    }

    /// Last completed estimate
    pub fn fps(&self) -> u32 {
        self.fps
    }
}
