//! Frame loop driver
//!
//! `Game` owns the session and everything around it that is not simulation:
//! the time baseline, sampled input, FPS counting and the single outstanding
//! frame request. Platforms call [`Game::frame`] from their frame callback
//! and schedule another frame whenever a method returns `true` /
//! [`FrameOutcome::Continue`].
//!
//! User notices (game over, exit) are queued rather than shown, so a platform
//! can drain them with [`Game::take_notices`] once it no longer holds the game
//! borrowed. Browser alerts are blocking and may run nested event handlers.

use crate::hud::{FpsCounter, Scoreboard};
use crate::input::{InputState, Key};
use crate::platform::{Display, Surface};
use crate::settings::GameConfig;
use crate::sim::{self, Action, GameEvent, GamePhase, Session, Transition};

/// Whether the platform should deliver another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Stop,
}

/// Game instance holding all state
#[derive(Debug)]
pub struct Game {
    session: Session,
    input: InputState,
    fps: FpsCounter,
    /// Timestamp (ms) the next delta is measured from
    last_time: Option<f64>,
    /// A frame has been requested and not yet delivered
    frame_pending: bool,
    /// Phase the surfaces were last laid out for
    shown_phase: Option<GamePhase>,
    /// Baseline was just reset by an action; the next frame may carry an
    /// earlier timestamp than the action saw
    fresh_baseline: bool,
    /// Messages for the user, oldest first
    notices: Vec<String>,
}

impl Game {
    /// `fallback_seed` is used when the config does not pin one
    pub fn new(config: GameConfig, fallback_seed: u64) -> Self {
        let seed = config.seed.unwrap_or(fallback_seed);
        log::info!("Game initialized with seed: {}", seed);
        Self {
            session: Session::new(config, seed),
            input: InputState::new(),
            fps: FpsCounter::new(),
            last_time: None,
            frame_pending: false,
            shown_phase: None,
            fresh_baseline: false,
            notices: Vec::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    pub fn scoreboard(&self) -> Scoreboard {
        Scoreboard::from_session(&self.session, self.fps.fps())
    }

    pub fn is_frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Route a key press. Pause acts at once, once per press; everything else
    /// waits for the next tick. Returns `true` if a frame must be scheduled.
    pub fn key_down(&mut self, key: Key, now: f64, display: &mut impl Display) -> bool {
        if key == Key::Pause {
            if !self.input.press_pause() {
                return false;
            }
            return self.act(Action::TogglePause, now, display);
        }
        self.input.key_down(key);
        false
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.key_up(key);
    }

    /// Window lost focus or page hidden: drop held keys and pause
    pub fn focus_lost(&mut self, now: f64, display: &mut impl Display) -> bool {
        self.input.release_all();
        self.act(Action::Pause, now, display)
    }

    /// Apply a menu action. Returns `true` if a frame must be scheduled.
    pub fn act(&mut self, action: Action, now: f64, display: &mut impl Display) -> bool {
        let transition = sim::flow::apply(&mut self.session, action);

        if transition.resumes_ticking() {
            // Wall-clock time spent outside Running is never charged to the game
            self.last_time = Some(now);
            self.fresh_baseline = true;
            self.fps.restart_window(now);
            self.input.discard_pending();
        }

        if transition != Transition::Unchanged {
            self.present(display);
        }
        if transition == Transition::Exited {
            self.notices.push("Game exited".to_string());
        }

        self.request_frame()
    }

    pub fn start(&mut self, now: f64, display: &mut impl Display) -> bool {
        self.act(Action::Start, now, display)
    }

    pub fn pause(&mut self, now: f64, display: &mut impl Display) -> bool {
        self.act(Action::Pause, now, display)
    }

    pub fn resume(&mut self, now: f64, display: &mut impl Display) -> bool {
        self.act(Action::Resume, now, display)
    }

    pub fn restart(&mut self, now: f64, display: &mut impl Display) -> bool {
        self.act(Action::Restart, now, display)
    }

    pub fn exit(&mut self, now: f64, display: &mut impl Display) -> bool {
        self.act(Action::Exit, now, display)
    }

    /// Run one frame at timestamp `now` (ms).
    ///
    /// Outside `Running` this is a no-op that lets the chain die.
    pub fn frame(&mut self, now: f64, display: &mut impl Display) -> FrameOutcome {
        self.frame_pending = false;
        if !self.session.is_running() {
            return FrameOutcome::Stop;
        }

        let last = self.last_time.unwrap_or(now);
        let raw_dt = ((now - last) / 1000.0) as f32;
        let dt = if raw_dt < 0.0 {
            // A frame requested before a resume is stamped before the resume
            if self.fresh_baseline {
                log::debug!("Frame stamped {:.3}ms before the new baseline", last - now);
            } else {
                log::warn!("Clock went backwards by {:.3}ms", last - now);
            }
            0.0
        } else {
            raw_dt.min(self.session.config.max_frame_dt)
        };
        self.last_time = Some(now.max(last));
        self.fresh_baseline = false;

        let input = self.input.sample();
        let events = sim::tick(&mut self.session, &input, dt);

        if let Some(fps) = self.fps.frame(now) {
            log::trace!("FPS: {}", fps);
        }
        self.present(display);

        for event in &events {
            if let GameEvent::GameOver { score } = event {
                self.notices
                    .push(format!("Game Over! Your score: {}", score));
            }
        }

        if self.request_frame() {
            FrameOutcome::Continue
        } else {
            FrameOutcome::Stop
        }
    }

    /// Drain queued notices. Show them only after releasing any borrow of
    /// the game.
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    /// Push current state to the display
    pub fn present(&mut self, display: &mut impl Display) {
        let phase = self.session.phase;
        if self.shown_phase != Some(phase) {
            for surface in Surface::ALL {
                display.set_surface_visible(surface, surface.visible_in(phase));
            }
            self.shown_phase = Some(phase);
        }
        display.sync_entities(&self.session);
        display.update_scoreboard(&self.scoreboard());
    }

    /// Claim the single frame slot if the game wants ticks
    fn request_frame(&mut self) -> bool {
        if self.session.is_running() && !self.frame_pending {
            self.frame_pending = true;
            true
        } else {
            false
        }
    }
}
