//! Orientation predicates used by the point-location walk and by validation.
//!
//! A kernel answers one question: on which side of the directed line
//! `p1 -> p2` does `q` lie? `Positive` is the left side, which is the inside
//! of a counter-clockwise face.
//!
//! [`ExactKernel`] uses Shewchuk's adaptive-precision `orient2d` from the
//! `robust` crate and never misclassifies. [`FloatKernel`] evaluates the same
//! determinant in plain `f64` and is only reliable away from degeneracies.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D point type used throughout the crate.
pub type Point2 = DVec2;

/// Side of a directed line a point lies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrientedSide {
    /// Strictly left of the directed line.
    Positive,
    /// Strictly right of the directed line.
    Negative,
    /// Exactly on the line.
    OnBoundary,
}

impl OrientedSide {
    /// Classify the sign of an orientation determinant.
    #[inline]
    pub fn from_determinant(det: f64) -> Self {
        if det > 0.0 {
            OrientedSide::Positive
        } else if det < 0.0 {
            OrientedSide::Negative
        } else {
            OrientedSide::OnBoundary
        }
    }
}

/// Orientation predicate provider.
pub trait Kernel {
    /// Side of the directed line `p1 -> p2` that `q` lies on.
    fn oriented_side(p1: Point2, p2: Point2, q: Point2) -> OrientedSide;

    /// Orientation of the triangle `a, b, c`: `Positive` when counter-clockwise.
    #[inline]
    fn triangle_orientation(a: Point2, b: Point2, c: Point2) -> OrientedSide {
        Self::oriented_side(a, b, c)
    }
}

/// Exact adaptive-precision kernel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExactKernel;

impl Kernel for ExactKernel {
    #[inline]
    fn oriented_side(p1: Point2, p2: Point2, q: Point2) -> OrientedSide {
        let det = robust::orient2d(
            robust::Coord { x: p1.x, y: p1.y },
            robust::Coord { x: p2.x, y: p2.y },
            robust::Coord { x: q.x, y: q.y },
        );
        OrientedSide::from_determinant(det)
    }
}

/// Plain floating-point kernel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FloatKernel;

impl Kernel for FloatKernel {
    #[inline]
    fn oriented_side(p1: Point2, p2: Point2, q: Point2) -> OrientedSide {
        OrientedSide::from_determinant((p2 - p1).perp_dot(q - p1))
    }
}
