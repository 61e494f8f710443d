//! Headless platform
//!
//! A manual clock, a display that records what it was told, and a runner
//! that plays the role of the browser's frame scheduler. Used by tests and
//! the native binary.

use std::cell::Cell;
use std::collections::HashMap;

use glam::Vec2;

use super::{Clock, Display, Surface};
use crate::driver::{FrameOutcome, Game};
use crate::hud::Scoreboard;
use crate::input::Key;
use crate::sim::{Action, EntityId, Session};

/// Clock advanced by hand
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Display that keeps the last state it was given
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub visible: HashMap<Surface, bool>,
    pub scoreboard: Option<Scoreboard>,
    pub player_pos: Option<Vec2>,
    pub enemy_ids: Vec<EntityId>,
    pub bullet_ids: Vec<EntityId>,
    pub notices: Vec<String>,
}

impl RecordingDisplay {
    pub fn is_visible(&self, surface: Surface) -> bool {
        self.visible.get(&surface).copied().unwrap_or(false)
    }

    /// Record a notice for the user
    pub fn notify(&mut self, message: &str) {
        log::info!("{}", message);
        self.notices.push(message.to_string());
    }
}

impl Display for RecordingDisplay {
    fn set_surface_visible(&mut self, surface: Surface, visible: bool) {
        self.visible.insert(surface, visible);
    }

    fn update_scoreboard(&mut self, board: &Scoreboard) {
        self.scoreboard = Some(board.clone());
    }

    fn sync_entities(&mut self, session: &Session) {
        self.player_pos = Some(session.player.pos);
        self.enemy_ids = session.store.enemies().iter().map(|e| e.id).collect();
        self.bullet_ids = session.store.bullets().iter().map(|b| b.id).collect();
    }
}

/// Drives a `Game` at a fixed frame period, delivering frames only while one
/// is requested, the way `requestAnimationFrame` would
#[derive(Debug)]
pub struct HeadlessRunner {
    pub clock: ManualClock,
    pub display: RecordingDisplay,
    pub frame_ms: f64,
    scheduled: bool,
    frames_run: u64,
}

impl HeadlessRunner {
    pub fn new(frame_ms: f64) -> Self {
        Self {
            clock: ManualClock::new(0.0),
            display: RecordingDisplay::default(),
            frame_ms,
            scheduled: false,
            frames_run: 0,
        }
    }

    /// Frames delivered so far
    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    pub fn act(&mut self, game: &mut Game, action: Action) {
        let now = self.clock.now_ms();
        if game.act(action, now, &mut self.display) {
            self.scheduled = true;
        }
        self.show_notices(game);
    }

    pub fn key_down(&mut self, game: &mut Game, key: Key) {
        let now = self.clock.now_ms();
        if game.key_down(key, now, &mut self.display) {
            self.scheduled = true;
        }
        self.show_notices(game);
    }

    pub fn key_up(&mut self, game: &mut Game, key: Key) {
        game.key_up(key);
    }

    /// Let `duration_ms` of wall-clock time pass, one frame period at a time
    pub fn run_for(&mut self, game: &mut Game, duration_ms: f64) {
        let mut remaining = duration_ms;
        while remaining > 1e-9 {
            let step = self.frame_ms.min(remaining);
            self.clock.advance(step);
            remaining -= step;
            if self.scheduled {
                self.scheduled = false;
                self.frames_run += 1;
                let now = self.clock.now_ms();
                if game.frame(now, &mut self.display) == FrameOutcome::Continue {
                    self.scheduled = true;
                }
                self.show_notices(game);
            }
        }
    }

    fn show_notices(&mut self, game: &mut Game) {
        for notice in game.take_notices() {
            self.display.notify(&notice);
        }
    }

    /// Whether a frame is waiting to be delivered
    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(5.0);
        clock.advance(10.5);
        assert_eq!(clock.now_ms(), 15.5);
    }

    #[test]
    fn test_runner_stops_delivering_when_paused() {
        let mut game = Game::new(GameConfig::default(), 1);
        let mut runner = HeadlessRunner::new(10.0);
        runner.act(&mut game, Action::Start);
        runner.run_for(&mut game, 100.0);
        assert_eq!(runner.frames_run(), 10);

        runner.act(&mut game, Action::Pause);
        runner.run_for(&mut game, 100.0);
        // Only the already-requested frame fires
        assert_eq!(runner.frames_run(), 11);
        assert!(!runner.is_scheduled());
    }

    #[test]
    fn test_display_mirrors_entities() {
        let mut game = Game::new(GameConfig::default(), 1);
        let mut runner = HeadlessRunner::new(10.0);
        runner.act(&mut game, Action::Start);
        runner.key_down(&mut game, Key::Shoot);
        runner.run_for(&mut game, 10.0);
        assert_eq!(runner.display.bullet_ids.len(), 1);
        assert_eq!(
            runner.display.bullet_ids[0],
            game.session().store.bullets()[0].id
        );
        assert_eq!(runner.display.player_pos, Some(game.session().player.pos));
    }
}
