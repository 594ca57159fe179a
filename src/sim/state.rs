//! Game state and core simulation types
//!
//! Everything the tick mutates lives in [`GameState`]. The session owns one
//! of these; collaborators only ever see the [`crate::render::Frame`] a tick
//! produces.

use glam::Vec2;
use rand::distr::{Distribution, StandardUniform};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Bounds;
use super::population;
use crate::render::Sprite;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start or instructions screen, nothing simulated
    #[default]
    Idle,
    /// One simulation step per scheduler tick
    Running,
    /// Run ended, waiting for restart
    GameOver,
}

/// Enemy movement strategy, fixed at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Heads straight for the player
    Chaser,
    /// Runs straight away from the player
    Evader,
    /// Wanders, occasionally picking a new heading
    Random,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Chaser, EnemyKind::Evader, EnemyKind::Random];

    /// Asset handle used to draw this kind
    pub fn sprite(self) -> Sprite {
        match self {
            EnemyKind::Chaser => Sprite::Chaser,
            EnemyKind::Evader => Sprite::Evader,
            EnemyKind::Random => Sprite::Random,
        }
    }
}

impl Distribution<EnemyKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> EnemyKind {
        EnemyKind::ALL[rng.random_range(0..EnemyKind::ALL.len())]
    }
}

/// The player blob
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// World position
    pub pos: Vec2,
    /// Current half-extent
    pub size: f32,
    /// Size the player is easing toward
    pub target_size: f32,
    pub speed: f32,
    /// Unit heading (zero until the first pointer event)
    pub direction: Vec2,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::ZERO,
            size: tuning.player_start_size,
            target_size: tuning.player_start_size,
            speed: tuning.player_speed,
            direction: Vec2::ZERO,
        }
    }

    /// Move one step along the current heading
    pub fn advance(&mut self) {
        self.pos += self.direction * self.speed;
    }

    /// Exponential approach of `size` toward `target_size`
    pub fn ease_size(&mut self, growth_rate: f32) {
        self.size += (self.target_size - self.size) * growth_rate;
        // Float rounding must never push size past its target
        self.size = self.size.min(self.target_size);
    }

    /// Raise the growth target, never past `cap`
    pub fn grow(&mut self, amount: f32, cap: f32) {
        self.target_size = (self.target_size + amount).min(cap);
    }

    /// True when the player's box pokes out of the arena
    pub fn is_outside(&self, half_extent: Vec2) -> bool {
        self.pos.x - self.size < -half_extent.x
            || self.pos.x + self.size > half_extent.x
            || self.pos.y - self.size < -half_extent.y
            || self.pos.y + self.size > half_extent.y
    }
}

/// A food pellet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub pos: Vec2,
    pub size: f32,
}

/// A roaming enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    /// Half-extent, fixed at spawn
    pub size: f32,
    /// Base speed, frozen at spawn
    pub speed: f32,
    /// Heading; only chasers and evaders keep it normalized
    pub direction: Vec2,
    pub kind: EnemyKind,
}

impl Enemy {
    /// True when the enemy has fully left the arena inflated by its own size
    pub fn is_outside(&self, half_extent: Vec2) -> bool {
        self.pos.x < -half_extent.x - self.size
            || self.pos.x > half_extent.x + self.size
            || self.pos.y < -half_extent.y - self.size
            || self.pos.y > half_extent.y + self.size
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Player left the arena
    Boundary,
    /// Player touched an enemy at least as big as itself
    Enemy(EnemyKind),
}

/// Gameplay events emitted by a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ItemCollected { points: u64 },
    EnemyEaten { kind: EnemyKind, points: u64 },
    EnemyRelocated { kind: EnemyKind },
    GameOver { cause: DeathCause, score: u64 },
    NewHighScore { score: u64 },
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub player: Player,
    /// Item pool (iteration order is pool order)
    pub items: Vec<Item>,
    /// Enemy pool (iteration order is pool order)
    pub enemies: Vec<Enemy>,
    pub score: u64,
    pub high_score: u64,
    /// Canvas size in pixels; the player is drawn at its center
    pub viewport: Vec2,
    /// Ticks simulated in the current run
    pub time_ticks: u64,
}

impl GameState {
    /// Create an idle state; call [`GameState::reset_run`] to begin playing
    pub fn new(tuning: Tuning, seed: u64, high_score: u64, viewport: Vec2) -> Self {
        Self {
            player: Player::new(&tuning),
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            items: Vec::new(),
            enemies: Vec::new(),
            score: 0,
            high_score,
            viewport,
            time_ticks: 0,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Screen-space center of the canvas (where the player is drawn)
    #[inline]
    pub fn canvas_center(&self) -> Vec2 {
        self.viewport * 0.5
    }

    /// Player box in screen space
    #[inline]
    pub fn player_screen_bounds(&self) -> Bounds {
        Bounds::new(self.canvas_center(), self.player.size)
    }

    /// Fresh player, full pools, zero score. Enters `Running`.
    pub fn reset_run(&mut self) {
        self.player = Player::new(&self.tuning);
        self.score = 0;
        self.time_ticks = 0;
        self.items.clear();
        self.enemies.clear();
        population::fill_pools(self);
        self.phase = GamePhase::Running;
    }

    /// Point the player toward a screen-space pointer position.
    ///
    /// Ignored unless running.
    pub fn aim_at(&mut self, pointer: Vec2) {
        if !self.is_running() {
            return;
        }
        self.player.direction = crate::direction_toward(self.canvas_center(), pointer);
    }

    /// Leave `Running` for `GameOver`, updating the high score.
    ///
    /// Returns true when the run set a new high score.
    pub fn end_run(&mut self) -> bool {
        self.phase = GamePhase::GameOver;
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::{prop_assert, proptest};

    #[test]
    fn test_reset_run_fills_pools() {
        let mut state = GameState::new(Tuning::default(), 7, 0, Vec2::new(800.0, 600.0));
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.items.is_empty());

        state.reset_run();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.items.len(), state.tuning.max_items);
        assert_eq!(state.enemies.len(), state.tuning.max_enemies);
        assert_eq!(state.score, 0);
        assert_eq!(state.player, Player::new(&state.tuning));
    }

    #[test]
    fn test_easing_converges_without_overshoot() {
        let mut player = Player::new(&Tuning::default());
        player.size = 10.0;
        player.target_size = 50.0;

        let mut previous = player.size;
        for _ in 0..100 {
            player.ease_size(0.1);
            assert!(player.size <= player.target_size);
            assert!(player.size >= previous);
            previous = player.size;
        }
        // 40 * 0.9^100 is just over 1e-3
        assert!((50.0 - player.size) < 1.1e-3);

        for _ in 0..50 {
            player.ease_size(0.1);
        }
        assert!((50.0 - player.size) < 1e-3);
        assert!(player.size <= 50.0);
    }

    #[test]
    fn test_grow_is_capped() {
        let mut player = Player::new(&Tuning::default());
        player.target_size = 149.5;
        player.grow(2.0, 150.0);
        assert_eq!(player.target_size, 150.0);
        player.grow(1.0, 150.0);
        assert_eq!(player.target_size, 150.0);
    }

    #[test]
    fn test_aim_ignored_when_not_running() {
        let mut state = GameState::new(Tuning::default(), 1, 0, Vec2::new(800.0, 600.0));
        state.aim_at(Vec2::new(800.0, 300.0));
        assert_eq!(state.player.direction, Vec2::ZERO);

        state.reset_run();
        state.aim_at(Vec2::new(800.0, 300.0));
        assert!((state.player.direction - Vec2::X).length() < 1e-6);
    }

    #[test]
    fn test_end_run_high_score() {
        let mut state = GameState::new(Tuning::default(), 1, 100, Vec2::new(800.0, 600.0));
        state.reset_run();
        state.score = 80;
        assert!(!state.end_run());
        assert_eq!(state.high_score, 100);
        assert_eq!(state.phase, GamePhase::GameOver);

        state.reset_run();
        state.score = 150;
        assert!(state.end_run());
        assert_eq!(state.high_score, 150);
    }

    #[test]
    fn test_enemy_kind_distribution_covers_all_kinds() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let kind: EnemyKind = rng.random();
            seen[kind as usize] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    proptest! {
        #[test]
        fn proptest_easing_never_exceeds_target(
            start in 0.0f32..150.0,
            extra in 0.0f32..150.0,
            rate in 0.01f32..1.0,
            steps in 1usize..300,
        ) {
            let mut player = Player::new(&Tuning::default());
            player.size = start;
            player.target_size = start + extra;
            for _ in 0..steps {
                player.ease_size(rate);
                prop_assert!(player.size <= player.target_size);
            }
        }
    }
}
