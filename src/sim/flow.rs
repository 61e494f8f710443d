//! Game flow state machine
//!
//! Menu actions move the session between phases. Reaching zero lives is the
//! only transition not driven by an action; `tick` performs it.

use super::state::{GamePhase, Session};

/// Player-initiated menu action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Pause,
    Resume,
    /// Escape key: pause when running, resume when paused
    TogglePause,
    Restart,
    Exit,
}

/// Result of applying an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Action not valid in the current phase
    Unchanged,
    Started,
    Paused,
    Resumed,
    Restarted,
    Exited,
}

impl Transition {
    /// Whether ticking must (re)start from a fresh time baseline
    pub fn resumes_ticking(self) -> bool {
        matches!(
            self,
            Transition::Started | Transition::Resumed | Transition::Restarted
        )
    }
}

/// Apply a menu action to the session.
///
/// Start works only from the start menu. Exit is offered by the pause and
/// game-over menus, so it is ignored while running or already at the start
/// menu. Restart works from any phase.
pub fn apply(session: &mut Session, action: Action) -> Transition {
    use GamePhase::*;

    let action = match (action, session.phase) {
        (Action::TogglePause, Running) => Action::Pause,
        (Action::TogglePause, Paused) => Action::Resume,
        (action, _) => action,
    };

    let transition = match (action, session.phase) {
        (Action::Start, MenuIdle) => {
            session.reset();
            session.phase = Running;
            Transition::Started
        }
        (Action::Pause, Running) => {
            session.phase = Paused;
            Transition::Paused
        }
        (Action::Resume, Paused) => {
            session.phase = Running;
            Transition::Resumed
        }
        (Action::Restart, _) => {
            session.reset();
            session.phase = Running;
            Transition::Restarted
        }
        (Action::Exit, Paused | Ended) => {
            session.phase = MenuIdle;
            Transition::Exited
        }
        _ => Transition::Unchanged,
    };

    match transition {
        Transition::Unchanged => {
            log::debug!("{:?} ignored in {:?}", action, session.phase)
        }
        transition => log::info!("{:?} -> {:?}", transition, session.phase),
    }
    transition
}
