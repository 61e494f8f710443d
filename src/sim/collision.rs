//! Collision detection and response
//!
//! Axis-aligned boxes only. Every bullet is tested against every enemy, which
//! is fine for the handful of entities alive at once.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Session;
use super::store::EntityId;

/// Axis-aligned bounding box in screen space (+y is down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box from a top-left corner and a size
    #[inline]
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Strict overlap test. Boxes that only share an edge do not collide.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// What the resolver removed this tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionOutcome {
    /// (bullet, enemy) pairs destroyed together, in bullet order
    pub kills: Vec<(EntityId, EntityId)>,
    /// Enemies that rammed the player
    pub player_hits: Vec<EntityId>,
}

/// Resolve bullet/enemy and enemy/player overlaps.
///
/// Each bullet destroys at most the first live enemy it overlaps (spawn
/// order), scoring one point. Remaining enemies touching the player are
/// removed and cost one life each, with no per-tick cap.
pub fn resolve(session: &mut Session) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();

    let enemies = session.store.enemies();
    let mut enemy_alive = vec![true; enemies.len()];
    for bullet in session.store.bullets() {
        let bullet_box = bullet.aabb();
        let target = enemies
            .iter()
            .enumerate()
            .find(|(idx, enemy)| enemy_alive[*idx] && bullet_box.overlaps(&enemy.aabb()));
        if let Some((idx, enemy)) = target {
            enemy_alive[idx] = false;
            outcome.kills.push((bullet.id, enemy.id));
        }
    }

    if !outcome.kills.is_empty() {
        let kills = &outcome.kills;
        session
            .store
            .remove_bullets_where(|b| kills.iter().any(|(bullet, _)| *bullet == b.id));
        session
            .store
            .remove_enemies_where(|e| kills.iter().any(|(_, enemy)| *enemy == e.id));
        session.score += kills.len() as u64;
        for (bullet, enemy) in kills {
            log::debug!("Bullet {:?} destroyed enemy {:?}", bullet, enemy);
        }
    }

    let player_box = session.player.aabb();
    let rammed = session
        .store
        .remove_enemies_where(|e| e.aabb().overlaps(&player_box));
    for enemy in rammed {
        session.lives -= 1;
        log::debug!("Enemy {:?} hit the player, {} lives left", enemy.id, session.lives);
        outcome.player_hits.push(enemy.id);
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;

    fn boxed(x: f32, y: f32, w: f32, h: f32) -> Aabb {
        Aabb::from_pos_size(Vec2::new(x, y), Vec2::new(w, h))
    }

    fn session() -> Session {
        // Player sits at (100, 100) with a 50x50 box
        Session::new(GameConfig::default(), 1)
    }

    #[test]
    fn test_overlap_basic() {
        let a = boxed(0.0, 0.0, 10.0, 10.0);
        let b = boxed(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_overlap_disjoint() {
        let a = boxed(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&boxed(20.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&boxed(0.0, 20.0, 10.0, 10.0)));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = boxed(0.0, 0.0, 10.0, 10.0);
        // Shares the right edge
        assert!(!a.overlaps(&boxed(10.0, 0.0, 10.0, 10.0)));
        // Shares the bottom edge
        assert!(!a.overlaps(&boxed(0.0, 10.0, 10.0, 10.0)));
        // Shares a single corner
        assert!(!a.overlaps(&boxed(10.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = boxed(0.0, 0.0, 100.0, 100.0);
        let inner = boxed(40.0, 40.0, 5.0, 10.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_bullet_destroys_enemy() {
        let mut s = session();
        let enemy = s
            .store
            .spawn_enemy(Vec2::new(400.0, 200.0), Vec2::splat(40.0), 50.0);
        let bullet = s
            .store
            .spawn_bullet(Vec2::new(410.0, 230.0), Vec2::new(5.0, 10.0), 300.0);

        let outcome = resolve(&mut s);

        assert_eq!(outcome.kills, vec![(bullet, enemy)]);
        assert_eq!(s.score, 1);
        assert!(s.store.is_empty());
        assert_eq!(s.lives, 3);
    }

    #[test]
    fn test_one_enemy_per_bullet() {
        let mut s = session();
        // Two enemies stacked on the same spot, one bullet over both
        let first = s
            .store
            .spawn_enemy(Vec2::new(400.0, 200.0), Vec2::splat(40.0), 50.0);
        let second = s
            .store
            .spawn_enemy(Vec2::new(400.0, 200.0), Vec2::splat(40.0), 50.0);
        s.store
            .spawn_bullet(Vec2::new(410.0, 210.0), Vec2::new(5.0, 10.0), 300.0);

        let outcome = resolve(&mut s);

        assert_eq!(outcome.kills.len(), 1);
        assert_eq!(outcome.kills[0].1, first);
        assert_eq!(s.score, 1);
        assert_eq!(s.store.enemies().len(), 1);
        assert_eq!(s.store.enemies()[0].id, second);
    }

    #[test]
    fn test_two_bullets_two_enemies() {
        let mut s = session();
        s.store
            .spawn_enemy(Vec2::new(400.0, 200.0), Vec2::splat(40.0), 50.0);
        s.store
            .spawn_enemy(Vec2::new(400.0, 200.0), Vec2::splat(40.0), 50.0);
        s.store
            .spawn_bullet(Vec2::new(410.0, 210.0), Vec2::new(5.0, 10.0), 300.0);
        s.store
            .spawn_bullet(Vec2::new(420.0, 210.0), Vec2::new(5.0, 10.0), 300.0);

        let outcome = resolve(&mut s);

        // The second bullet skips the enemy already claimed by the first
        assert_eq!(outcome.kills.len(), 2);
        assert_ne!(outcome.kills[0].1, outcome.kills[1].1);
        assert_eq!(s.score, 2);
        assert!(s.store.is_empty());
    }

    #[test]
    fn test_missing_bullet_survives() {
        let mut s = session();
        s.store
            .spawn_enemy(Vec2::new(400.0, 200.0), Vec2::splat(40.0), 50.0);
        let bullet = s
            .store
            .spawn_bullet(Vec2::new(600.0, 210.0), Vec2::new(5.0, 10.0), 300.0);

        let outcome = resolve(&mut s);

        assert!(outcome.kills.is_empty());
        assert_eq!(s.store.bullets()[0].id, bullet);
        assert_eq!(s.store.enemies().len(), 1);
    }

    #[test]
    fn test_enemies_hit_player_without_cap() {
        let mut s = session();
        for x in [90.0, 110.0, 130.0] {
            s.store
                .spawn_enemy(Vec2::new(x, 90.0), Vec2::splat(40.0), 50.0);
        }
        let outcome = resolve(&mut s);

        assert_eq!(outcome.player_hits.len(), 3);
        assert_eq!(s.lives, 0);
        assert_eq!(s.score, 0);
        assert!(s.store.enemies().is_empty());
    }

    #[test]
    fn test_shot_enemy_cannot_also_hit_player() {
        let mut s = session();
        s.store
            .spawn_enemy(Vec2::new(100.0, 80.0), Vec2::splat(40.0), 50.0);
        s.store
            .spawn_bullet(Vec2::new(110.0, 100.0), Vec2::new(5.0, 10.0), 300.0);

        let outcome = resolve(&mut s);

        assert_eq!(outcome.kills.len(), 1);
        assert!(outcome.player_hits.is_empty());
        assert_eq!(s.lives, 3);
        assert_eq!(s.score, 1);
    }

    #[test]
    fn test_enemy_touching_player_edge_is_harmless() {
        let mut s = session();
        // Enemy bottom edge sits exactly on the player's top edge (y=100)
        s.store
            .spawn_enemy(Vec2::new(100.0, 60.0), Vec2::splat(40.0), 50.0);
        let outcome = resolve(&mut s);
        assert!(outcome.player_hits.is_empty());
        assert_eq!(s.lives, 3);
    }
}
