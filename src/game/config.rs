// Game tuning - every value the session and its entities read at startup

use glam::Vec2;
use std::path::PathBuf;

use crate::core::math::Rect;

pub const TITLE: &str = "Dungeon Escape";

/// Logical screen size in pixels
pub const SCREEN_WIDTH: f32 = 800.0;
pub const SCREEN_HEIGHT: f32 = 600.0;

/// Size of one background grid tile
pub const TILE_SIZE: f32 = 48.0;

/// Hero and enemy collide when their centers are closer than this
pub const COLLISION_DISTANCE: f32 = 10.0;

/// Seconds spent in the dying state before the game-over screen
pub const DEATH_DURATION: f32 = 2.0;

/// Sound played when the hero is caught
pub const HIT_SOUND: &str = "hit";

/// Background music track
pub const MUSIC_TRACK: &str = "background";

/// Environment variable overriding the asset directory
pub const ASSETS_ENV_VAR: &str = "DUNGEON_ESCAPE_ASSETS";

/// Whole screen as a rectangle
pub const SCREEN: Rect = Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT);

/// Hero tuning
#[derive(Debug, Clone, Copy)]
pub struct HeroStats {
    /// Walking speed (pixels/second)
    pub speed: f32,
    /// Speed multiplier while sprint is held
    pub sprint_multiplier: f32,
    /// Half the sprite size; keeps the sprite fully on screen
    pub sprite_margin: f32,
}

pub const HERO_STATS: HeroStats = HeroStats {
    speed: 160.0,
    sprint_multiplier: 1.75,
    sprite_margin: 16.0,
};

impl Default for HeroStats {
    fn default() -> Self {
        HERO_STATS
    }
}

impl HeroStats {
    /// Region the hero's center may occupy
    pub fn arena(&self) -> Rect {
        SCREEN.inset(self.sprite_margin)
    }
}

/// Enemy tuning
#[derive(Debug, Clone, Copy)]
pub struct EnemyStats {
    /// Chase speed (pixels/second)
    pub speed: f32,
    /// Enemies stop advancing once this close to the hero
    pub arrive_threshold: f32,
}

pub const ENEMY_STATS: EnemyStats = EnemyStats {
    speed: 90.0,
    arrive_threshold: 5.0,
};

impl Default for EnemyStats {
    fn default() -> Self {
        ENEMY_STATS
    }
}

/// Where an enemy starts and the territory it may never leave
#[derive(Debug, Clone, Copy)]
pub struct EnemySpawn {
    pub position: Vec2,
    pub territory: Rect,
}

pub const ENEMY_SPAWNS: [EnemySpawn; 2] = [
    EnemySpawn {
        position: Vec2::new(200.0, 200.0),
        territory: Rect::new(150.0, 150.0, 200.0, 200.0),
    },
    EnemySpawn {
        position: Vec2::new(600.0, 400.0),
        territory: Rect::new(520.0, 320.0, 160.0, 160.0),
    },
];

/// Menu button geometry
pub const BUTTON_WIDTH: f32 = 220.0;
pub const BUTTON_HEIGHT: f32 = 54.0;

pub fn arena_center() -> Vec2 {
    SCREEN.center()
}

/// Asset directory, `assets` unless overridden by the environment
pub fn asset_dir() -> PathBuf {
    std::env::var_os(ASSETS_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats() {
        let hero = HeroStats::default();
        assert_eq!(hero.speed, 160.0);
        assert_eq!(hero.sprite_margin, 16.0);

        let enemy = EnemyStats::default();
        assert_eq!(enemy.speed, 90.0);
        assert_eq!(enemy.arrive_threshold, 5.0);
    }

    #[test]
    fn test_hero_arena_is_screen_minus_margin() {
        let arena = HERO_STATS.arena();
        assert_eq!(arena.left(), 16.0);
        assert_eq!(arena.right(), 784.0);
        assert_eq!(arena.top(), 16.0);
        assert_eq!(arena.bottom(), 584.0);
    }

    #[test]
    fn test_spawns_inside_their_territory() {
        for spawn in ENEMY_SPAWNS {
            assert!(spawn.territory.contains(spawn.position));
        }
    }

    #[test]
    fn test_arena_center() {
        assert_eq!(arena_center(), Vec2::new(400.0, 300.0));
    }
}
