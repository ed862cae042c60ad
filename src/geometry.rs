//! Circle geometry shared by every entity in the game.
//!
//! The player, enemies, and particles are all circles; the single collision
//! primitive is the strict overlap test below. Entities expose a
//! [`Circle`] view of themselves (`fn circle(&self)`) so collision code never
//! cares which entity kind it is comparing.

use bevy::prelude::*;

/// A circle in simulation space: center plus radius.
///
/// Simulation space has its origin at the viewport's top-left corner with y
/// growing downward, matching pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// True iff the two circles' interiors intersect.
///
/// Strict inequality: circles whose boundaries exactly touch (center distance
/// equal to the radius sum) do NOT overlap. Every collision decision in the
/// game routes through this one test.
pub fn overlaps(a: Circle, b: Circle) -> bool {
    a.center.distance(b.center) < a.radius + b.radius
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn circle(x: f32, y: f32, r: f32) -> Circle {
        Circle::new(Vec2::new(x, y), r)
    }

    /// Boundary contact is not an overlap: distance == radius sum.
    #[test]
    fn touching_circles_do_not_overlap() {
        let a = circle(0.0, 0.0, 10.0);
        let b = circle(30.0, 0.0, 20.0);
        assert!(
            !overlaps(a, b),
            "circles at exact touch distance must not count as overlapping"
        );
    }

    /// One unit inside the touch distance is an overlap.
    #[test]
    fn circles_one_unit_closer_overlap() {
        let a = circle(0.0, 0.0, 10.0);
        let b = circle(29.0, 0.0, 20.0);
        assert!(overlaps(a, b), "one unit of penetration must overlap");
    }

    #[test]
    fn concentric_circles_overlap() {
        let a = circle(5.0, 5.0, 3.0);
        let b = circle(5.0, 5.0, 30.0);
        assert!(overlaps(a, b), "containment is an overlap");
    }

    #[test]
    fn distant_circles_do_not_overlap() {
        let a = circle(0.0, 0.0, 10.0);
        let b = circle(500.0, 500.0, 10.0);
        assert!(!overlaps(a, b));
    }

    /// Diagonal contact: 3-4-5 triangle puts the centers exactly 5 apart.
    #[test]
    fn touching_circles_diagonal() {
        let a = circle(0.0, 0.0, 2.0);
        let b = circle(3.0, 4.0, 3.0);
        assert!(!overlaps(a, b), "diagonal exact touch must not overlap");
    }

    proptest! {
        /// overlaps(A, B) == overlaps(B, A) for arbitrary circles.
        #[test]
        fn overlap_is_symmetric(
            ax in -1000.0f32..1000.0, ay in -1000.0f32..1000.0, ar in 0.0f32..100.0,
            bx in -1000.0f32..1000.0, by in -1000.0f32..1000.0, br in 0.0f32..100.0,
        ) {
            let a = circle(ax, ay, ar);
            let b = circle(bx, by, br);
            prop_assert_eq!(overlaps(a, b), overlaps(b, a));
        }

        /// Integer-valued axis-aligned placement keeps the arithmetic exact:
        /// at distance == radius sum the strict test must reject, one unit
        /// closer it must accept.
        #[test]
        fn strictness_at_exact_distance(
            x in -1000i32..1000, y in -1000i32..1000,
            ar in 1i32..100, br in 1i32..100,
        ) {
            let sum = (ar + br) as f32;
            let a = circle(x as f32, y as f32, ar as f32);
            let touching = circle(x as f32 + sum, y as f32, br as f32);
            let closer = circle(x as f32 + sum - 1.0, y as f32, br as f32);
            prop_assert!(!overlaps(a, touching));
            prop_assert!(overlaps(a, closer));
        }
    }
}
