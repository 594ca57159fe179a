//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads at runtime. Defaults mirror
//! [`crate::consts`]; a JSON document may override any subset of them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Runtime gameplay parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub arena_width: f32,
    pub arena_height: f32,

    pub player_start_size: f32,
    pub player_speed: f32,
    pub max_player_size: f32,
    pub growth_rate: f32,

    pub max_items: usize,
    pub max_enemies: usize,
    pub item_size: f32,

    pub enemy_min_size: f32,
    pub enemy_max_size: f32,
    pub enemy_base_speed: f32,
    pub enemy_speed_per_point: f32,
    pub difficulty_score_divisor: f32,
    pub random_turn_chance: f64,

    pub item_score: u64,
    pub enemy_score: u64,
    pub item_growth: f32,
    pub enemy_growth: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            player_start_size: PLAYER_START_SIZE,
            player_speed: PLAYER_SPEED,
            max_player_size: MAX_PLAYER_SIZE,
            growth_rate: GROWTH_RATE,

            max_items: MAX_ITEMS,
            max_enemies: MAX_ENEMIES,
            item_size: ITEM_SIZE,

            enemy_min_size: ENEMY_MIN_SIZE,
            enemy_max_size: ENEMY_MAX_SIZE,
            enemy_base_speed: ENEMY_BASE_SPEED,
            enemy_speed_per_point: ENEMY_SPEED_PER_POINT,
            difficulty_score_divisor: DIFFICULTY_SCORE_DIVISOR,
            random_turn_chance: RANDOM_TURN_CHANCE,

            item_score: ITEM_SCORE,
            enemy_score: ENEMY_SCORE,
            item_growth: ITEM_GROWTH,
            enemy_growth: ENEMY_GROWTH,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Half of the arena extent on each axis
    #[inline]
    pub fn arena_half_extent(&self) -> Vec2 {
        Vec2::new(self.arena_width / 2.0, self.arena_height / 2.0)
    }

    /// Global enemy speed multiplier for the given score
    #[inline]
    pub fn speed_multiplier(&self, score: u64) -> f32 {
        1.0 + score as f32 / self.difficulty_score_divisor
    }

    /// Spawn-time enemy speed for the given score
    #[inline]
    pub fn enemy_spawn_speed(&self, score: u64) -> f32 {
        self.enemy_base_speed + score as f32 * self.enemy_speed_per_point
    }
}
