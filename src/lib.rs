//! Descent Shooter - dodge and shoot descending enemies
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, game flow)
//! - `driver`: Frame loop driver tying the simulation to a clock and display
//! - `platform`: Browser/headless platform abstraction
//! - `input`: Keyboard state shared between event handlers and the loop
//! - `hud`: Scoreboard values and FPS estimate
//! - `settings`: Data-driven play-area and entity tuning

pub mod driver;
pub mod error;
pub mod hud;
pub mod input;
pub mod platform;
pub mod settings;
pub mod sim;

pub use driver::{FrameOutcome, Game};
pub use error::{ConfigError, StartupError};
pub use settings::GameConfig;

/// Baseline tuning values
pub mod consts {
    /// Play area size (pixels)
    pub const BOUNDS_WIDTH: f32 = 800.0;
    pub const BOUNDS_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_ORIGIN_X: f32 = 100.0;
    pub const PLAYER_ORIGIN_Y: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Pixels per second along each held axis
    pub const PLAYER_SPEED: f32 = 200.0;

    /// Enemy defaults
    pub const ENEMY_WIDTH: f32 = 40.0;
    pub const ENEMY_HEIGHT: f32 = 40.0;
    pub const ENEMY_SPEED: f32 = 50.0;

    /// Bullet defaults
    pub const BULLET_WIDTH: f32 = 5.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    pub const BULLET_SPEED: f32 = 300.0;

    /// Milliseconds between enemy spawns
    pub const SPAWN_INTERVAL_MS: f32 = 3000.0;

    pub const INITIAL_LIVES: i32 = 3;

    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// FPS sampling window (milliseconds of wall-clock time)
    pub const FPS_WINDOW_MS: f64 = 1000.0;
}
