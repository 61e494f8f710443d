//! Deterministic game simulation
//!
//! This module contains all game logic that must be deterministic:
//! - Entity state and the entity store
//! - Movement integration
//! - Enemy spawning
//! - Collision detection and response
//! - Game flow (start/pause/resume/restart/exit)

pub mod collision;
pub mod flow;
pub mod kinematics;
pub mod spawner;
pub mod state;
pub mod store;
pub mod tick;

pub use collision::{Aabb, CollisionOutcome};
pub use flow::{Action, Transition};
pub use kinematics::Heading;
pub use spawner::Spawner;
pub use state::{Bullet, Enemy, GamePhase, Player, Session};
pub use store::{EntityId, EntityStore};
pub use tick::{GameEvent, TickInput, tick};
