//! Axis-aligned overlap tests
//!
//! Every entity is a square of half-width `size` centered on its position.
//! The tick feeds these tests screen-space boxes (the player always sits at
//! the canvas center), but the predicate itself is coordinate-agnostic.

use glam::Vec2;

/// A square box: center plus half-width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub center: Vec2,
    pub size: f32,
}

impl Bounds {
    #[inline]
    pub const fn new(center: Vec2, size: f32) -> Self {
        Self { center, size }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - Vec2::splat(self.size)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + Vec2::splat(self.size)
    }
}

/// True iff the two boxes overlap. Touching edges count (closed intervals).
#[inline]
pub fn is_colliding(a: &Bounds, b: &Bounds) -> bool {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());
    !(a_max.x < b_min.x || a_min.x > b_max.x || a_max.y < b_min.y || a_min.y > b_max.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn square(x: f32, y: f32, size: f32) -> Bounds {
        Bounds::new(Vec2::new(x, y), size)
    }

    #[test]
    fn test_touching_edges_collide() {
        assert!(is_colliding(&square(0.0, 0.0, 10.0), &square(20.0, 0.0, 10.0)));
        assert!(is_colliding(&square(0.0, 0.0, 10.0), &square(0.0, -20.0, 10.0)));
    }

    #[test]
    fn test_separated_boxes_miss() {
        assert!(!is_colliding(&square(0.0, 0.0, 10.0), &square(20.001, 0.0, 10.0)));
        assert!(!is_colliding(&square(0.0, 0.0, 10.0), &square(0.0, 20.001, 10.0)));
    }

    #[test]
    fn test_overlap_on_one_axis_only_misses() {
        // Same row, far apart vertically
        assert!(!is_colliding(&square(0.0, 0.0, 10.0), &square(5.0, 100.0, 10.0)));
    }

    #[test]
    fn test_containment_collides() {
        assert!(is_colliding(&square(0.0, 0.0, 100.0), &square(3.0, -4.0, 1.0)));
    }

    #[test]
    fn test_zero_size_points() {
        assert!(is_colliding(&square(1.0, 1.0, 0.0), &square(1.0, 1.0, 0.0)));
        assert!(!is_colliding(&square(1.0, 1.0, 0.0), &square(1.5, 1.0, 0.0)));
    }

    proptest! {
        #[test]
        fn proptest_collision_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0, asize in 0.0f32..150.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0, bsize in 0.0f32..150.0,
        ) {
            let a = square(ax, ay, asize);
            let b = square(bx, by, bsize);
            prop_assert_eq!(is_colliding(&a, &b), is_colliding(&b, &a));
        }
    }
}
