//! Axis-aligned rectangles and overlap tests
//!
//! All shooter entities are boxes in canvas pixel space (origin top-left,
//! y grows downward), so hit detection is a plain AABB overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box: top-left corner plus size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap: boxes that only share an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.right()
            && self.right() > other.pos.x
            && self.pos.y < other.bottom()
            && self.bottom() > other.pos.y
    }

    /// Half-open containment (`[x, x+w) × [y, y+h)`)
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.pos.x && p.x < self.right() && p.y >= self.pos.y && p.y < self.bottom()
    }
}

/// Distance test used by the bounce clicker
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance(center) < radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_contained_box_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_contains_point() {
        let r = Rect::new(10.0, 20.0, 5.0, 5.0);
        assert!(r.contains_point(Vec2::new(10.0, 20.0)));
        assert!(!r.contains_point(Vec2::new(15.0, 22.0)));
        assert_eq!(r.center(), Vec2::new(12.5, 22.5));
    }

    #[test]
    fn test_point_in_circle() {
        assert!(point_in_circle(Vec2::new(0.05, 0.0), Vec2::ZERO, 0.1));
        assert!(!point_in_circle(Vec2::new(0.1, 0.0), Vec2::ZERO, 0.1));
    }

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.5f32..200.0, 0.5f32..200.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn overlap_matches_interval_intersection(a in rect_strategy(), b in rect_strategy()) {
            let x = a.pos.x.max(b.pos.x) < a.right().min(b.right());
            let y = a.pos.y.max(b.pos.y) < a.bottom().min(b.bottom());
            prop_assert_eq!(a.overlaps(&b), x && y);
        }

        #[test]
        fn rect_overlaps_itself(a in rect_strategy()) {
            prop_assert!(a.overlaps(&a));
        }
    }
}
