//! Axis-aligned bounding box.

use crate::geometry::kernel::Point2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box `[min, max]`.
///
/// [`BoundingBox::inverse`] is the empty box (`min = +inf`, `max = -inf`);
/// expanding it by a point yields the degenerate box at that point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point2,
    pub max: Point2,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::inverse()
    }
}

impl BoundingBox {
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// The empty (inverted) box.
    pub fn inverse() -> Self {
        Self {
            min: Point2::splat(f64::INFINITY),
            max: Point2::splat(f64::NEG_INFINITY),
        }
    }

    /// Grow the box so it contains `p`.
    #[inline]
    pub fn expand(&mut self, p: Point2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Closed containment test.
    pub fn contains(&self, p: Point2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Extent along each axis; zero for an empty box.
    pub fn size(&self) -> Point2 {
        if self.is_empty() {
            Point2::ZERO
        } else {
            self.max - self.min
        }
    }
}

impl FromIterator<Point2> for BoundingBox {
    fn from_iter<I: IntoIterator<Item = Point2>>(iter: I) -> Self {
        let mut bbox = Self::inverse();
        for p in iter {
            bbox.expand(p);
        }
        bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_is_empty_until_expanded() {
        let mut bbox = BoundingBox::inverse();
        assert!(bbox.is_empty());
        assert_eq!(bbox.size(), Point2::ZERO);
        bbox.expand(Point2::new(1.0, 2.0));
        assert!(!bbox.is_empty());
        assert_eq!(bbox.min, bbox.max);
        assert!(bbox.contains(Point2::new(1.0, 2.0)));
    }

    #[test]
    fn collects_points() {
        let bbox: BoundingBox = [
            Point2::new(0.0, 1.0),
            Point2::new(-2.0, 3.0),
            Point2::new(4.0, -1.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(bbox.min, Point2::new(-2.0, -1.0));
        assert_eq!(bbox.max, Point2::new(4.0, 3.0));
        assert_eq!(bbox.size(), Point2::new(6.0, 4.0));
        assert!(!bbox.contains(Point2::new(5.0, 0.0)));
    }
}
