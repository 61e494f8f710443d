//! Movement integration
//!
//! Positions advance by `speed * dt`. The player is clamped into the play
//! area; enemies and bullets leaving it are removed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Bullet, Enemy, Player};
use super::store::EntityStore;
use crate::settings::GameConfig;

/// Held directional keys. Axes are independent; opposite keys cancel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Heading {
    /// Unit step per held axis (screen coordinates, +y is down)
    pub fn axes(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }
}

/// Move the player along every held axis, then clamp into the allowed area
pub fn move_player(player: &mut Player, heading: Heading, dt: f32, config: &GameConfig) {
    let mut dir = heading.axes();
    if config.normalize_diagonal {
        dir = dir.normalize_or_zero();
    }
    player.pos += dir * player.speed * dt;
    player.pos = player.pos.clamp(config.player_min(), config.player_max());
}

/// Move enemies straight down. Returns the ones that fell past the bottom.
pub fn advance_enemies(store: &mut EntityStore, dt: f32, bounds_height: f32) -> Vec<Enemy> {
    for enemy in store.enemies_mut() {
        enemy.pos.y += enemy.speed * dt;
    }
    store.remove_enemies_where(|e| e.pos.y > bounds_height)
}

/// Move bullets straight up. Returns the ones that left through the top.
pub fn advance_bullets(store: &mut EntityStore, dt: f32) -> Vec<Bullet> {
    for bullet in store.bullets_mut() {
        bullet.pos.y -= bullet.speed * dt;
    }
    store.remove_bullets_where(|b| b.pos.y < 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(config: &GameConfig) -> Player {
        Player::new(config)
    }

    #[test]
    fn test_single_axis_move() {
        let config = GameConfig::default();
        let mut p = player(&config);
        let heading = Heading {
            right: true,
            ..Default::default()
        };
        move_player(&mut p, heading, 0.5, &config);
        assert_eq!(p.pos, Vec2::new(200.0, 100.0));
    }

    #[test]
    fn test_diagonal_is_unnormalized() {
        let config = GameConfig::default();
        let mut p = player(&config);
        let heading = Heading {
            down: true,
            right: true,
            ..Default::default()
        };
        move_player(&mut p, heading, 0.1, &config);
        // Each axis gets the full 20px, so the step is 20 * sqrt(2)
        assert!(p.pos.abs_diff_eq(Vec2::new(120.0, 120.0), 1e-3));
        let step = (p.pos - Vec2::new(100.0, 100.0)).length();
        assert!((step - 20.0 * std::f32::consts::SQRT_2).abs() < 1e-3);
    }

    #[test]
    fn test_diagonal_normalized_when_configured() {
        let config = GameConfig {
            normalize_diagonal: true,
            ..Default::default()
        };
        let mut p = player(&config);
        let heading = Heading {
            down: true,
            right: true,
            ..Default::default()
        };
        move_player(&mut p, heading, 0.1, &config);
        let step = (p.pos - Vec2::new(100.0, 100.0)).length();
        assert!((step - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let config = GameConfig::default();
        let mut p = player(&config);
        let heading = Heading {
            up: true,
            down: true,
            left: true,
            right: true,
        };
        move_player(&mut p, heading, 1.0, &config);
        assert_eq!(p.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_player_clamped_to_bounds() {
        let config = GameConfig::default();
        let mut p = player(&config);
        let heading = Heading {
            up: true,
            left: true,
            ..Default::default()
        };
        move_player(&mut p, heading, 10.0, &config);
        assert_eq!(p.pos, Vec2::ZERO);

        let heading = Heading {
            down: true,
            right: true,
            ..Default::default()
        };
        move_player(&mut p, heading, 10.0, &config);
        assert_eq!(p.pos, Vec2::new(750.0, 550.0));
    }

    #[test]
    fn test_player_respects_insets() {
        let config = GameConfig {
            inset_left: 150.0,
            inset_top: 60.0,
            ..Default::default()
        };
        let mut p = player(&config);
        let heading = Heading {
            up: true,
            left: true,
            ..Default::default()
        };
        move_player(&mut p, heading, 10.0, &config);
        assert_eq!(p.pos, Vec2::new(150.0, 60.0));
    }

    #[test]
    fn test_enemies_descend() {
        let mut store = EntityStore::new();
        store.spawn_enemy(Vec2::new(10.0, -40.0), Vec2::splat(40.0), 50.0);
        let escaped = advance_enemies(&mut store, 0.2, 600.0);
        assert!(escaped.is_empty());
        assert_eq!(store.enemies()[0].pos, Vec2::new(10.0, -30.0));
    }

    #[test]
    fn test_enemy_bottom_exit_boundary() {
        let mut store = EntityStore::new();
        let kept = store.spawn_enemy(Vec2::new(0.0, 600.0 - 0.01), Vec2::splat(40.0), 50.0);
        let gone = store.spawn_enemy(Vec2::new(100.0, 600.0 + 0.01), Vec2::splat(40.0), 50.0);

        let escaped = advance_enemies(&mut store, 0.0, 600.0);

        assert_eq!(escaped.len(), 1);
        assert_eq!(escaped[0].id, gone);
        assert_eq!(store.enemies().len(), 1);
        assert_eq!(store.enemies()[0].id, kept);
    }

    #[test]
    fn test_enemy_exactly_at_bottom_is_kept() {
        let mut store = EntityStore::new();
        store.spawn_enemy(Vec2::new(0.0, 600.0), Vec2::splat(40.0), 50.0);
        assert!(advance_enemies(&mut store, 0.0, 600.0).is_empty());
    }

    #[test]
    fn test_bullets_ascend_and_leave_top() {
        let mut store = EntityStore::new();
        let high = store.spawn_bullet(Vec2::new(0.0, 10.0), Vec2::new(5.0, 10.0), 300.0);
        let low = store.spawn_bullet(Vec2::new(0.0, 400.0), Vec2::new(5.0, 10.0), 300.0);

        let gone = advance_bullets(&mut store, 0.1);

        assert_eq!(gone.len(), 1);
        assert_eq!(gone[0].id, high);
        assert_eq!(store.bullets()[0].id, low);
        assert!((store.bullets()[0].pos.y - 370.0).abs() < 1e-3);
    }
}
