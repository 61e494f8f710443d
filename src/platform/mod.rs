//! Platform abstraction layer
//!
//! The simulation never touches the host directly. It needs:
//! - a monotonic clock
//! - a display that mirrors entity positions, scoreboard text and menu
//!   visibility
//!
//! Frame scheduling stays with the caller: `Game` reports whether another
//! frame is wanted and the platform decides how to deliver it. Notices for
//! the user are likewise pulled from `Game` and shown by the platform.

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::hud::Scoreboard;
use crate::sim::{GamePhase, Session};

/// Monotonic time source in milliseconds
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Toggleable screen surfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    StartMenu,
    /// Shown while paused and after game over (resume/restart/exit)
    PauseMenu,
    PlayArea,
}

impl Surface {
    pub const ALL: [Surface; 3] = [Surface::StartMenu, Surface::PauseMenu, Surface::PlayArea];

    /// Whether this surface is visible in `phase`
    pub fn visible_in(self, phase: GamePhase) -> bool {
        match self {
            Surface::StartMenu => phase == GamePhase::MenuIdle,
            Surface::PauseMenu => matches!(phase, GamePhase::Paused | GamePhase::Ended),
            Surface::PlayArea => phase != GamePhase::MenuIdle,
        }
    }
}

/// Render collaborator. A projection of session state, never a source of it.
pub trait Display {
    fn set_surface_visible(&mut self, surface: Surface, visible: bool);

    fn update_scoreboard(&mut self, board: &Scoreboard);

    /// Bring drawn entities in line with the session's player, enemies and
    /// bullets
    fn sync_entities(&mut self, session: &Session);
}
