//! Item and enemy pools
//!
//! Pools are plain `Vec`s kept at a fixed capacity: the tick tops them up
//! before its interaction pass and removes entities as they are consumed.
//! Enemies that wander out of the arena are recycled in place.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, GameState, Item};
use crate::tuning::Tuning;

/// Append freshly spawned entities until `pool` holds `capacity` of them.
///
/// Returns how many were spawned.
pub fn top_up<T>(pool: &mut Vec<T>, capacity: usize, mut spawn: impl FnMut() -> T) -> usize {
    let missing = capacity.saturating_sub(pool.len());
    pool.extend((0..missing).map(|_| spawn()));
    missing
}

/// Uniform position inside the arena
pub fn random_position<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> Vec2 {
    Vec2::new(
        rng.random::<f32>() * tuning.arena_width - tuning.arena_width / 2.0,
        rng.random::<f32>() * tuning.arena_height - tuning.arena_height / 2.0,
    )
}

/// Random heading in `[-0.5, 0.5]²` (deliberately not normalized)
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5)
}

pub fn spawn_item<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> Item {
    Item {
        pos: random_position(rng, tuning),
        size: tuning.item_size,
    }
}

/// Spawn an enemy; its speed is fixed from the score at spawn time
pub fn spawn_enemy<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning, score: u64) -> Enemy {
    let pos = random_position(rng, tuning);
    let span = tuning.enemy_max_size - tuning.enemy_min_size;
    // A sample just under 1.0 can round up to the max, which is excluded
    let size = (tuning.enemy_min_size + rng.random::<f32>() * span)
        .min(tuning.enemy_max_size.next_down());
    Enemy {
        pos,
        size,
        speed: tuning.enemy_spawn_speed(score),
        direction: random_direction(rng),
        kind: rng.random(),
    }
}

/// Top up both pools of `state` to capacity
pub fn fill_pools(state: &mut GameState) {
    let GameState {
        tuning,
        rng,
        items,
        enemies,
        score,
        ..
    } = state;
    let tuning: &Tuning = tuning;

    let new_items = top_up(items, tuning.max_items, || spawn_item(&mut *rng, tuning));
    let new_enemies = top_up(enemies, tuning.max_enemies, || {
        spawn_enemy(&mut *rng, tuning, *score)
    });
    if new_items + new_enemies > 0 {
        log::trace!("Spawned {} items, {} enemies", new_items, new_enemies);
    }
}

/// Move an enemy that left the inflated arena back to a random spot inside it.
///
/// Kind, size and speed are kept. Returns true if the enemy was relocated.
pub fn relocate_if_outside<R: Rng + ?Sized>(
    enemy: &mut Enemy,
    rng: &mut R,
    tuning: &Tuning,
) -> bool {
    if !enemy.is_outside(tuning.arena_half_extent()) {
        return false;
    }
    enemy.pos = random_position(rng, tuning);
    enemy.direction = random_direction(rng);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::EnemyKind;
    use rand::{RngCore, SeedableRng};
    use rand_pcg::Pcg32;

    /// Always yields the largest possible sample
    struct SaturatedRng;

    impl RngCore for SaturatedRng {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }

        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(u8::MAX);
        }
    }

    #[test]
    fn test_top_up_fills_to_capacity() {
        let mut pool = vec![1, 2];
        let spawned = top_up(&mut pool, 5, || 0);
        assert_eq!(spawned, 3);
        assert_eq!(pool, vec![1, 2, 0, 0, 0]);

        // Already full (or over) pools are left alone
        let spawned = top_up(&mut pool, 4, || 9);
        assert_eq!(spawned, 0);
        assert_eq!(pool.len(), 5);
    }

    #[test]
    fn test_spawns_stay_in_arena() {
        let tuning = Tuning::default();
        let half = tuning.arena_half_extent();
        let mut rng = Pcg32::seed_from_u64(3);

        for _ in 0..500 {
            let item = spawn_item(&mut rng, &tuning);
            assert!(item.pos.abs().cmple(half).all());
            assert_eq!(item.size, tuning.item_size);

            let enemy = spawn_enemy(&mut rng, &tuning, 0);
            assert!(enemy.pos.abs().cmple(half).all());
            assert!(enemy.size >= tuning.enemy_min_size && enemy.size < tuning.enemy_max_size);
            assert!(enemy.direction.abs().cmple(Vec2::splat(0.5)).all());
        }
    }

    #[test]
    fn test_enemy_size_never_reaches_max() {
        let tuning = Tuning::default();
        let enemy = spawn_enemy(&mut SaturatedRng, &tuning, 0);
        assert!(enemy.size < tuning.enemy_max_size, "size {}", enemy.size);
        assert!(enemy.size > tuning.enemy_max_size - 1e-3);
    }

    #[test]
    fn test_enemy_speed_frozen_from_spawn_score() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let enemy = spawn_enemy(&mut rng, &tuning, 1000);
        assert!((enemy.speed - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_relocates_only_beyond_inflated_boundary() {
        let tuning = Tuning::default();
        let half = tuning.arena_half_extent();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut enemy = Enemy {
            pos: Vec2::new(half.x + 30.0, 0.0),
            size: 30.0,
            speed: 0.5,
            direction: Vec2::new(0.4, 0.0),
            kind: EnemyKind::Evader,
        };

        // Exactly on the inflated edge: still inside
        assert!(!relocate_if_outside(&mut enemy, &mut rng, &tuning));
        assert_eq!(enemy.pos, Vec2::new(half.x + 30.0, 0.0));

        enemy.pos.x = half.x + 31.0;
        assert!(relocate_if_outside(&mut enemy, &mut rng, &tuning));
        assert!(enemy.pos.abs().cmple(half).all());
        assert_eq!(enemy.size, 30.0);
        assert_eq!(enemy.speed, 0.5);
        assert_eq!(enemy.kind, EnemyKind::Evader);
    }
}
