//! Game state and core simulation types
//!
//! Everything one game attempt mutates lives in [`Session`]; components take
//! it (or the parts they need) by reference.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::spawner::Spawner;
use super::store::{EntityId, EntityStore};
use crate::settings::GameConfig;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start menu shown, nothing simulated yet
    MenuIdle,
    /// Active gameplay
    Running,
    /// Game is paused
    Paused,
    /// Out of lives
    Ended,
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner (pixels)
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per second along each held axis
    pub speed: f32,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: config.player_origin,
            size: config.player_size,
            speed: config.player_speed,
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }
}

/// A descending enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Enemy {
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }
}

/// A player bullet travelling up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Bullet {
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }
}

/// Full mutable state of one game attempt
#[derive(Debug, Clone)]
pub struct Session {
    pub config: GameConfig,
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Game time in seconds (paused time excluded)
    pub elapsed_secs: f64,
    pub score: u64,
    /// Ends the game at zero or below
    pub lives: i32,
    pub player: Player,
    pub store: EntityStore,
    pub spawner: Spawner,
}

impl Session {
    /// Create a session sitting at the start menu
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::MenuIdle,
            elapsed_secs: 0.0,
            score: 0,
            lives: config.initial_lives,
            player: Player::new(&config),
            store: EntityStore::new(),
            spawner: Spawner::default(),
            config,
        }
    }

    /// Put time, score, lives, player and entities back to their initial
    /// values. The phase is left to the caller.
    pub fn reset(&mut self) {
        self.elapsed_secs = 0.0;
        self.score = 0;
        self.lives = self.config.initial_lives;
        self.player = Player::new(&self.config);
        self.store.clear();
        self.spawner.reset();
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Fire a bullet from the player's current position, centred on the ship
    pub fn fire_bullet(&mut self) -> EntityId {
        let size = self.config.bullet_size;
        let pos = Vec2::new(
            self.player.pos.x + self.player.size.x / 2.0 - size.x / 2.0,
            self.player.pos.y,
        );
        self.store.spawn_bullet(pos, size, self.config.bullet_speed)
    }
}
