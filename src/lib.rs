//! Grow Arena - an arena arcade game about eating and growing
//!
//! Core modules:
//! - `sim`: Simulation core (entities, collisions, enemy behavior, tick)
//! - `session`: Idle / Running / GameOver state machine and commands
//! - `render`: Draw commands and the renderer collaborator interface
//! - `audio`: Audio cues, mixer and the audio collaborator interface
//! - `persistence`: Key-value storage (high score, settings)
//! - `platform`: Browser/native input helpers
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScore;
pub use session::{Screen, Session};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (centered on the world origin)
    pub const ARENA_WIDTH: f32 = 2000.0;
    pub const ARENA_HEIGHT: f32 = 2000.0;

    /// Player defaults
    pub const PLAYER_START_SIZE: f32 = 10.0;
    pub const PLAYER_SPEED: f32 = 2.0;
    pub const MAX_PLAYER_SIZE: f32 = 150.0;
    /// Fraction of the remaining gap closed per tick
    pub const GROWTH_RATE: f32 = 0.1;

    /// Population capacities
    pub const MAX_ITEMS: usize = 20;
    pub const MAX_ENEMIES: usize = 10;

    /// Item defaults
    pub const ITEM_SIZE: f32 = 10.0;

    /// Enemy defaults
    pub const ENEMY_MIN_SIZE: f32 = 20.0;
    pub const ENEMY_MAX_SIZE: f32 = 50.0;
    pub const ENEMY_BASE_SPEED: f32 = 0.5;
    /// Extra spawn speed per point of score at spawn time
    pub const ENEMY_SPEED_PER_POINT: f32 = 0.001;
    /// Global speed multiplier is `1 + score / DIFFICULTY_SCORE_DIVISOR`
    pub const DIFFICULTY_SCORE_DIVISOR: f32 = 300.0;
    /// Per-tick chance that a random walker picks a new heading
    pub const RANDOM_TURN_CHANCE: f64 = 0.01;

    /// Scoring
    pub const ITEM_SCORE: u64 = 10;
    pub const ENEMY_SCORE: u64 = 50;
    pub const ITEM_GROWTH: f32 = 1.0;
    pub const ENEMY_GROWTH: f32 = 2.0;

    /// Background parallax factor (background scrolls slower than the player)
    pub const PARALLAX: f32 = 0.1;

    /// Background music volume
    pub const MUSIC_VOLUME: f32 = 0.03;

    /// Storage key for the persisted high score
    pub const HIGH_SCORE_KEY: &str = "highScore";
}

/// Unit direction from `origin` toward `target` via atan2.
///
/// Returns the +X axis when both points coincide (atan2(0, 0) == 0).
#[inline]
pub fn direction_toward(origin: Vec2, target: Vec2) -> Vec2 {
    let delta = target - origin;
    let angle = delta.y.atan2(delta.x);
    Vec2::new(angle.cos(), angle.sin())
}

/// Convert a world position into screen space for a camera centered on `camera`
#[inline]
pub fn world_to_screen(world: Vec2, camera: Vec2, viewport: Vec2) -> Vec2 {
    world - camera + viewport * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_toward_is_unit() {
        let dir = direction_toward(Vec2::new(400.0, 300.0), Vec2::new(700.0, 700.0));
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!((dir.x - 0.6).abs() < 1e-6);
        assert!((dir.y - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_world_to_screen_centers_camera() {
        let viewport = Vec2::new(800.0, 600.0);
        let camera = Vec2::new(120.0, -40.0);
        assert_eq!(world_to_screen(camera, camera, viewport), Vec2::new(400.0, 300.0));
        assert_eq!(
            world_to_screen(camera + Vec2::new(10.0, 5.0), camera, viewport),
            Vec2::new(410.0, 305.0)
        );
    }
}
