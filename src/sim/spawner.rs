//! Periodic enemy spawning

use glam::Vec2;
use rand::Rng;

use super::store::{EntityId, EntityStore};
use crate::settings::GameConfig;

/// Accumulates game time and drops in a new enemy each interval
#[derive(Debug, Clone, Default)]
pub struct Spawner {
    timer_ms: f32,
}

impl Spawner {
    /// Milliseconds accumulated toward the next spawn
    pub fn timer_ms(&self) -> f32 {
        self.timer_ms
    }

    pub fn reset(&mut self) {
        self.timer_ms = 0.0;
    }

    /// Advance the timer by `dt` seconds, spawning at most one enemy.
    ///
    /// A spawn happens once the timer strictly exceeds the interval. The
    /// overshoot is dropped unless `carry_spawn_remainder` is set, so the
    /// default cadence runs slightly slower than the nominal interval.
    pub fn tick(
        &mut self,
        dt: f32,
        config: &GameConfig,
        store: &mut EntityStore,
        rng: &mut impl Rng,
    ) -> Option<EntityId> {
        self.timer_ms += dt * 1000.0;
        if self.timer_ms <= config.spawn_interval_ms {
            return None;
        }

        self.timer_ms = if config.carry_spawn_remainder {
            (self.timer_ms - config.spawn_interval_ms).min(config.spawn_interval_ms)
        } else {
            0.0
        };

        let size = config.enemy_size;
        let x = rng.random_range(0.0..=config.enemy_spawn_max_x());
        let id = store.spawn_enemy(Vec2::new(x, -size.y), size, config.enemy_speed);
        log::debug!("Spawned enemy {:?} at x={:.1}", id, x);
        Some(id)
    }
}
