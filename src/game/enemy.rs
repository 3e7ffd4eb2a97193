// Enemies chase the hero but never leave their territory

use glam::Vec2;

use super::animation::{AnimationSet, Animator};
use super::config::{EnemySpawn, EnemyStats, COLLISION_DISTANCE, ENEMY_SPAWNS};
use crate::core::math::Rect;

/// Animation states of an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnemyAnimation {
    #[default]
    Walk,
}

impl AnimationSet for EnemyAnimation {
    fn frames(self) -> &'static [&'static str] {
        match self {
            Self::Walk => &["enemy_walk_0", "enemy_walk_1", "enemy_walk_2", "enemy_walk_3"],
        }
    }
}

#[derive(Debug)]
pub struct Enemy {
    position: Vec2,
    territory: Rect,
    stats: EnemyStats,
    alive: bool,
    animation: Animator<EnemyAnimation>,
}

impl Enemy {
    pub fn new(position: Vec2, territory: Rect, stats: EnemyStats) -> Self {
        debug_assert!(
            territory.contains(position),
            "enemy spawned at {position:?} outside its territory {territory:?}"
        );
        Self {
            position: territory.clamp_point(position),
            territory,
            stats,
            alive: true,
            animation: Animator::new(EnemyAnimation::Walk),
        }
    }

    pub fn from_spawn(spawn: &EnemySpawn, stats: EnemyStats) -> Self {
        Self::new(spawn.position, spawn.territory, stats)
    }

    /// Steer straight toward the hero. Each axis moves only if the new
    /// coordinate stays inside the territory, so an enemy can stick to an
    /// edge while the hero is out of reach.
    pub fn update(&mut self, dt: f32, hero_position: Vec2) {
        if !self.alive {
            return;
        }

        let offset = hero_position - self.position;
        let distance = offset.length();
        if distance > self.stats.arrive_threshold {
            let next = self.position + offset / distance * self.stats.speed * dt;
            if self.territory.contains_x(next.x) {
                self.position.x = next.x;
            }
            if self.territory.contains_y(next.y) {
                self.position.y = next.y;
            }
        }

        self.animation.update(dt);
    }

    /// Whether the hero is close enough to be caught
    pub fn touches(&self, hero_position: Vec2) -> bool {
        self.position.distance(hero_position) < COLLISION_DISTANCE
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[cfg(test)]
    pub fn territory(&self) -> Rect {
        self.territory
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn animation(&self) -> &Animator<EnemyAnimation> {
        &self.animation
    }

    pub fn image(&self) -> &'static str {
        self.animation.image()
    }
}

/// A fresh set of enemies at their spawn points
pub fn spawn_enemies(stats: EnemyStats) -> Vec<Enemy> {
    ENEMY_SPAWNS
        .iter()
        .map(|spawn| Enemy::from_spawn(spawn, stats))
        .collect()
}
