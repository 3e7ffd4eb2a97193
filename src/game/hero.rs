// The player-controlled hero

use glam::Vec2;
use log::debug;

use super::animation::{AnimationSet, Animator};
use super::config::HeroStats;
use crate::core::math::Rect;
use crate::engine::input::Controls;

/// Animation states of the hero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HeroAnimation {
    #[default]
    Idle,
    Walk,
    Dead,
}

impl AnimationSet for HeroAnimation {
    fn frames(self) -> &'static [&'static str] {
        match self {
            Self::Idle => &["hero_idle_0", "hero_idle_1"],
            Self::Walk => &["hero_walk_0", "hero_walk_1", "hero_walk_2", "hero_walk_3"],
            Self::Dead => &["hero_dead_0", "hero_dead_1", "hero_dead_2"],
        }
    }
}

/// The hero is created once and reused across games
#[derive(Debug)]
pub struct Hero {
    position: Vec2,
    stats: HeroStats,
    /// Region the hero's center is kept inside
    arena: Rect,
    alive: bool,
    animation: Animator<HeroAnimation>,
}

impl Hero {
    pub fn new(position: Vec2, stats: HeroStats) -> Self {
        let arena = stats.arena();
        Self {
            position: arena.clamp_point(position),
            stats,
            arena,
            alive: true,
            animation: Animator::new(HeroAnimation::Idle),
        }
    }

    /// Move according to the held controls and advance the animation.
    /// A dead hero only plays its death animation.
    pub fn update(&mut self, dt: f32, controls: &Controls) {
        if !self.alive {
            self.animation.play(HeroAnimation::Dead);
            self.animation.update(dt);
            return;
        }

        let direction = controls.direction();
        if direction != Vec2::ZERO {
            let speed = if controls.sprint {
                self.stats.speed * self.stats.sprint_multiplier
            } else {
                self.stats.speed
            };
            self.position += direction.normalize() * speed * dt;
            self.animation.play(HeroAnimation::Walk);
        } else {
            self.animation.play(HeroAnimation::Idle);
        }

        self.position = self.arena.clamp_point(self.position);
        self.animation.update(dt);
    }

    /// Kill the hero. Killing an already dead hero changes nothing.
    pub fn mark_dead(&mut self) {
        if self.alive {
            debug!("Hero died at {:?}", self.position);
            self.alive = false;
        }
    }

    /// Bring the hero back for a new game
    pub fn reset(&mut self, position: Vec2) {
        self.position = self.arena.clamp_point(position);
        self.alive = true;
        self.animation.restart(HeroAnimation::Idle);
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn animation(&self) -> &Animator<HeroAnimation> {
        &self.animation
    }

    /// Image identifier to draw this frame
    pub fn image(&self) -> &'static str {
        self.animation.image()
    }
}
