//! Enemy steering
//!
//! Each kind updates its heading once per tick, then every enemy moves by
//! `direction * speed * multiplier`, the multiplier being the score-driven
//! difficulty ramp shared by the whole tick.

use glam::Vec2;
use rand::Rng;

use super::population::random_direction;
use super::state::{Enemy, EnemyKind};

/// Update `enemy`'s heading for this tick and move it.
///
/// Chasers and evaders that sit exactly on the player keep their previous
/// heading.
pub fn steer<R: Rng + ?Sized>(
    enemy: &mut Enemy,
    player_pos: Vec2,
    speed_multiplier: f32,
    random_turn_chance: f64,
    rng: &mut R,
) {
    let to_player = player_pos - enemy.pos;

    match enemy.kind {
        EnemyKind::Chaser => {
            if let Some(dir) = to_player.try_normalize() {
                enemy.direction = dir;
            }
        }
        EnemyKind::Evader => {
            if let Some(dir) = (-to_player).try_normalize() {
                enemy.direction = dir;
            }
        }
        EnemyKind::Random => {
            if rng.random_bool(random_turn_chance.clamp(0.0, 1.0)) {
                enemy.direction = random_direction(rng);
            }
        }
    }

    enemy.pos += enemy.direction * enemy.speed * speed_multiplier;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn enemy(kind: EnemyKind, pos: Vec2) -> Enemy {
        Enemy {
            pos,
            size: 25.0,
            speed: 1.0,
            direction: Vec2::new(0.25, -0.25),
            kind,
        }
    }

    #[test]
    fn test_chaser_moves_toward_player() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut e = enemy(EnemyKind::Chaser, Vec2::new(30.0, 40.0));
        steer(&mut e, Vec2::ZERO, 2.0, 0.01, &mut rng);
        assert!((e.direction - Vec2::new(-0.6, -0.8)).length() < 1e-6);
        assert!((e.pos - Vec2::new(28.8, 38.4)).length() < 1e-4);
    }

    #[test]
    fn test_evader_moves_away_from_player() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut e = enemy(EnemyKind::Evader, Vec2::new(30.0, 40.0));
        steer(&mut e, Vec2::ZERO, 1.0, 0.01, &mut rng);
        assert!((e.direction - Vec2::new(0.6, 0.8)).length() < 1e-6);
        assert!(e.pos.length() > 50.0);
    }

    #[test]
    fn test_zero_distance_keeps_heading() {
        let mut rng = Pcg32::seed_from_u64(1);
        for kind in [EnemyKind::Chaser, EnemyKind::Evader] {
            let mut e = enemy(kind, Vec2::new(5.0, 5.0));
            steer(&mut e, Vec2::new(5.0, 5.0), 1.0, 0.01, &mut rng);
            assert_eq!(e.direction, Vec2::new(0.25, -0.25));
            assert!(e.pos.is_finite());
            assert_eq!(e.pos, Vec2::new(5.25, 4.75));
        }
    }

    #[test]
    fn test_random_walker_keeps_heading_without_turn() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut e = enemy(EnemyKind::Random, Vec2::ZERO);
        steer(&mut e, Vec2::new(100.0, 0.0), 1.0, 0.0, &mut rng);
        assert_eq!(e.direction, Vec2::new(0.25, -0.25));
        assert_eq!(e.pos, Vec2::new(0.25, -0.25));
    }

    #[test]
    fn test_random_walker_turns_when_forced() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut e = enemy(EnemyKind::Random, Vec2::ZERO);
        e.direction = Vec2::new(5.0, 5.0);
        steer(&mut e, Vec2::new(100.0, 0.0), 1.0, 1.0, &mut rng);
        assert!(e.direction.abs().cmple(Vec2::splat(0.5)).all());
    }
}
