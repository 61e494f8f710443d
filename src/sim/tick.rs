//! Per-frame simulation tick
//!
//! Pipeline order is fixed: shots, movement, spawning, collisions, then the
//! end-of-game check. Collisions always see post-movement positions.

use super::collision;
use super::kinematics::{self, Heading};
use super::state::{GamePhase, Session};
use super::store::EntityId;

/// Input sampled at the start of a tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held directional keys
    pub heading: Heading,
    /// Shoot presses since the last tick, one bullet each
    pub shots: u32,
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    BulletFired { id: EntityId },
    EnemySpawned { id: EntityId },
    EnemyDestroyed { enemy: EntityId, bullet: EntityId },
    /// Enemy fell past the bottom edge (costs a life)
    EnemyEscaped { id: EntityId },
    /// Enemy rammed the player (costs a life)
    PlayerHit { enemy: EntityId },
    GameOver { score: u64 },
}

/// Advance the session by `dt` seconds.
///
/// Does nothing unless the session is running.
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if session.phase != GamePhase::Running {
        return events;
    }

    session.elapsed_secs += f64::from(dt);

    for _ in 0..input.shots {
        let id = session.fire_bullet();
        events.push(GameEvent::BulletFired { id });
    }

    // Movement
    kinematics::move_player(&mut session.player, input.heading, dt, &session.config);
    kinematics::advance_bullets(&mut session.store, dt);
    let escaped =
        kinematics::advance_enemies(&mut session.store, dt, session.config.bounds_height);
    for enemy in escaped {
        session.lives -= 1;
        log::debug!("Enemy {:?} escaped, {} lives left", enemy.id, session.lives);
        events.push(GameEvent::EnemyEscaped { id: enemy.id });
    }

    // Spawning
    if let Some(id) =
        session
            .spawner
            .tick(dt, &session.config, &mut session.store, &mut session.rng)
    {
        events.push(GameEvent::EnemySpawned { id });
    }

    // Collisions
    let outcome = collision::resolve(session);
    events.extend(
        outcome
            .kills
            .into_iter()
            .map(|(bullet, enemy)| GameEvent::EnemyDestroyed { enemy, bullet }),
    );
    events.extend(
        outcome
            .player_hits
            .into_iter()
            .map(|enemy| GameEvent::PlayerHit { enemy }),
    );

    if session.lives <= 0 {
        session.phase = GamePhase::Ended;
        log::info!(
            "Game over after {:.2}s with score {}",
            session.elapsed_secs,
            session.score
        );
        events.push(GameEvent::GameOver {
            score: session.score,
        });
    }

    events
}
