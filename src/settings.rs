//! Game configuration
//!
//! Play-area bounds and entity tuning are explicit values handed to the
//! simulation, never read from live page layout.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Tunable parameters for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Play area ===
    pub bounds_width: f32,
    pub bounds_height: f32,
    /// Left margin the player may not enter (menu chrome)
    pub inset_left: f32,
    /// Top margin the player may not enter (scoreboard chrome)
    pub inset_top: f32,

    // === Player ===
    pub player_origin: Vec2,
    pub player_size: Vec2,
    pub player_speed: f32,
    /// Scale diagonal movement back to `player_speed`.
    /// Off by default: holding two axes moves at speed × √2.
    pub normalize_diagonal: bool,

    // === Enemies ===
    pub enemy_size: Vec2,
    pub enemy_speed: f32,
    pub spawn_interval_ms: f32,
    /// Keep the overshoot past the interval instead of dropping it
    pub carry_spawn_remainder: bool,

    // === Bullets ===
    pub bullet_size: Vec2,
    pub bullet_speed: f32,

    // === Session ===
    pub initial_lives: i32,
    /// Upper bound on a single frame's delta (seconds)
    pub max_frame_dt: f32,
    /// RNG seed; taken from the clock when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            bounds_width: BOUNDS_WIDTH,
            bounds_height: BOUNDS_HEIGHT,
            inset_left: 0.0,
            inset_top: 0.0,

            player_origin: Vec2::new(PLAYER_ORIGIN_X, PLAYER_ORIGIN_Y),
            player_size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            player_speed: PLAYER_SPEED,
            normalize_diagonal: false,

            enemy_size: Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT),
            enemy_speed: ENEMY_SPEED,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            carry_spawn_remainder: false,

            bullet_size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            bullet_speed: BULLET_SPEED,

            initial_lives: INITIAL_LIVES,
            max_frame_dt: MAX_FRAME_DT,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_path(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded game config from {}", path.display());
        Ok(config)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.bounds_width > 0.0 && self.bounds_height > 0.0) {
            return Err(ConfigError::EmptyBounds {
                width: self.bounds_width,
                height: self.bounds_height,
            });
        }

        let positive = [
            ("player speed", self.player_speed),
            ("enemy speed", self.enemy_speed),
            ("bullet speed", self.bullet_speed),
            ("spawn interval", self.spawn_interval_ms),
            ("max frame delta", self.max_frame_dt),
        ];
        for (what, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { what, value });
            }
        }

        let sizes = [
            ("player", self.player_size),
            ("enemy", self.enemy_size),
            ("bullet", self.bullet_size),
        ];
        for (entity, size) in sizes {
            if !(size.x > 0.0 && size.y > 0.0)
                || size.x > self.bounds_width
                || size.y > self.bounds_height
            {
                return Err(ConfigError::EntityTooLarge {
                    entity,
                    width: size.x,
                    height: size.y,
                });
            }
        }

        // The insets shrink the player's room; it must still fit
        if self.inset_left < 0.0
            || self.inset_top < 0.0
            || self.inset_left + self.player_size.x > self.bounds_width
            || self.inset_top + self.player_size.y > self.bounds_height
        {
            return Err(ConfigError::EntityTooLarge {
                entity: "player (with insets)",
                width: self.player_size.x,
                height: self.player_size.y,
            });
        }

        if self.initial_lives < 1 {
            return Err(ConfigError::NoLives(self.initial_lives));
        }

        Ok(())
    }

    /// Smallest allowed player position
    pub fn player_min(&self) -> Vec2 {
        Vec2::new(self.inset_left, self.inset_top)
    }

    /// Largest allowed player position
    pub fn player_max(&self) -> Vec2 {
        Vec2::new(
            self.bounds_width - self.player_size.x,
            self.bounds_height - self.player_size.y,
        )
    }

    /// Largest x an enemy can spawn at
    pub fn enemy_spawn_max_x(&self) -> f32 {
        (self.bounds_width - self.enemy_size.x).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = GameConfig::from_json(r#"{ "bounds_width": 640, "inset_top": 30 }"#).unwrap();
        assert_eq!(config.bounds_width, 640.0);
        assert_eq!(config.inset_top, 30.0);
        assert_eq!(config.bounds_height, BOUNDS_HEIGHT);
        assert_eq!(config.spawn_interval_ms, SPAWN_INTERVAL_MS);
        assert_eq!(config.player_size, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT));
    }

    #[test]
    fn test_vec_fields_parse_as_arrays() {
        let config = GameConfig::from_json(r#"{ "player_origin": [10, 20] }"#).unwrap();
        assert_eq!(config.player_origin, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let err = GameConfig::from_json("{ bounds_width: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_enemy_wider_than_area_is_rejected() {
        let err = GameConfig::from_json(r#"{ "bounds_width": 30 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::EntityTooLarge { .. }));
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let err = GameConfig::from_json(r#"{ "spawn_interval_ms": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotPositive {
                what: "spawn interval",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_lives_is_rejected() {
        let err = GameConfig::from_json(r#"{ "initial_lives": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NoLives(0)));
    }

    #[test]
    fn test_insets_must_leave_room_for_player() {
        let err = GameConfig::from_json(r#"{ "inset_left": 780 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::EntityTooLarge { .. }));
    }

    #[test]
    fn test_player_clamp_range() {
        let config = GameConfig {
            inset_left: 120.0,
            inset_top: 40.0,
            ..Default::default()
        };
        assert_eq!(config.player_min(), Vec2::new(120.0, 40.0));
        assert_eq!(config.player_max(), Vec2::new(750.0, 550.0));
        assert_eq!(config.enemy_spawn_max_x(), 760.0);
    }
}
