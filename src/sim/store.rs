//! Entity store
//!
//! Owns every live enemy and bullet. Collections keep spawn order, and
//! removal walks indices back to front so nothing is skipped or visited twice.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Bullet, Enemy};

/// Unique identity of an enemy or bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Live enemies and bullets
#[derive(Debug, Clone)]
pub struct EntityStore {
    enemies: Vec<Enemy>,
    bullets: Vec<Bullet>,
    /// Never reused, even across restarts
    next_id: u32,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            enemies: Vec::new(),
            bullets: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn spawn_enemy(&mut self, pos: Vec2, size: Vec2, speed: f32) -> EntityId {
        let id = self.next_entity_id();
        self.enemies.push(Enemy {
            id,
            pos,
            size,
            speed,
        });
        id
    }

    pub fn spawn_bullet(&mut self, pos: Vec2, size: Vec2, speed: f32) -> EntityId {
        let id = self.next_entity_id();
        self.bullets.push(Bullet {
            id,
            pos,
            size,
            speed,
        });
        id
    }

    /// Enemies in spawn order
    #[inline]
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Bullets in firing order
    #[inline]
    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    #[inline]
    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    #[inline]
    pub fn bullets_mut(&mut self) -> &mut [Bullet] {
        &mut self.bullets
    }

    pub fn remove_enemy(&mut self, id: EntityId) -> Option<Enemy> {
        let idx = self.enemies.iter().position(|e| e.id == id)?;
        Some(self.enemies.remove(idx))
    }

    pub fn remove_bullet(&mut self, id: EntityId) -> Option<Bullet> {
        let idx = self.bullets.iter().position(|b| b.id == id)?;
        Some(self.bullets.remove(idx))
    }

    /// Remove every enemy matching `pred`, returned in spawn order
    pub fn remove_enemies_where(&mut self, pred: impl FnMut(&Enemy) -> bool) -> Vec<Enemy> {
        remove_where(&mut self.enemies, pred)
    }

    /// Remove every bullet matching `pred`, returned in firing order
    pub fn remove_bullets_where(&mut self, pred: impl FnMut(&Bullet) -> bool) -> Vec<Bullet> {
        remove_where(&mut self.bullets, pred)
    }

    pub fn clear(&mut self) {
        self.enemies.clear();
        self.bullets.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty() && self.bullets.is_empty()
    }
}

/// Reverse-index removal: later indices shift, earlier ones never do
fn remove_where<T>(items: &mut Vec<T>, mut pred: impl FnMut(&T) -> bool) -> Vec<T> {
    let mut removed = Vec::new();
    for idx in (0..items.len()).rev() {
        if pred(&items[idx]) {
            removed.push(items.remove(idx));
        }
    }
    removed.reverse();
    removed
}
